use crate::client::FetchError;
use crate::config::ConfigError;
use crate::source::PeriodError;
use thiserror::Error;

/// Failures that end a run. Malformed games and fields never surface here;
/// they degrade to placeholder values instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Period(#[from] PeriodError),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
