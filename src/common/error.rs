//! Configuration errors.
//!
//! Nothing inside the frame loop returns these. They only surface when
//! tunables are loaded or a pool config is validated up front.

use thiserror::Error;

use super::pool::PoolCategory;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tunables: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tunables: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid {category:?} pool config: {reason}")]
    InvalidPool {
        category: PoolCategory,
        reason: &'static str,
    },
}
