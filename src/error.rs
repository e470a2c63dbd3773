use std::io;
use thiserror::Error;

/// Errors raised while configuring, growing or displaying a tree
#[derive(Error, Debug)]
pub enum TreeError {
    /// Configuration rejected before any growth started
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The pending-branch work list grew past its safety bound
    #[error("Growth depth {depth} exceeded the limit of {limit}; try a smaller life")]
    GrowthLimitExceeded { depth: usize, limit: usize },

    /// Terminal or output failure
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, TreeError>;
