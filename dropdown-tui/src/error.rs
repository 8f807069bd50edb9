use thiserror::Error;

use dropdown::config::ConfigError;

/// Errors that stop the terminal host.
#[derive(Debug, Error)]
pub enum TuiError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
