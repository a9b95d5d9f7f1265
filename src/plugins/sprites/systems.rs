use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::components::SpriteExpired;
use super::pool::SpritePool;

pub fn init_sprite_pool(mut commands: Commands, tunables: Res<Tunables>) {
    commands.insert_resource(SpritePool::new(tunables.sprite_pool).with_bounds(tunables.arena_rect()));
}

pub fn advance_sprites(time: Res<Time>, mut pool: ResMut<SpritePool>) {
    pool.advance(time.delta_secs());
}

pub fn expire_sprites(mut pool: ResMut<SpritePool>, mut expired: MessageWriter<SpriteExpired>) {
    for notice in pool.expire() {
        expired.write(notice);
    }
}

pub fn teardown_sprites(mut pool: ResMut<SpritePool>) {
    let released = pool.release_all();
    debug!("sprite teardown released {released}");
}
