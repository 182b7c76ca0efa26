

pub mod config;
pub mod error;

pub use self::config::ScamScoreConfig;
pub use self::error::{Result, ScamScoreError};
