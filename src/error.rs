use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        AppError::Message(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_displays_verbatim() {
        let err = AppError::message("No tickers configured");
        assert_eq!(err.to_string(), "No tickers configured");
    }

    #[test]
    fn anyhow_errors_pass_through() {
        let err: AppError = anyhow::anyhow!("terminal went away").into();
        assert!(matches!(err, AppError::Other(_)));
        assert_eq!(err.to_string(), "terminal went away");
    }
}
