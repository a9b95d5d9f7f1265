//! Pooled combat simulation core: projectile and sprite arenas, enemy and boss
//! state machines, and pickup collection, hosted as Bevy plugins.
//!
//! `game` wires everything into an `App`; integration tests in `tests/` build the
//! same app headless through `game::configure_headless`.

pub mod common;
pub mod game;
pub mod plugins;
