use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Received {status} {reason} from server")]
    Transport { status: u16, reason: String },

    #[error("Malformed response: {0}")]
    Protocol(String),

    #[error("Received error message from server: {message}")]
    Api { message: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Construction(String),

    #[error("Credentials file not found at {}", path.display())]
    CredentialsNotFound { path: PathBuf },

    #[error("Invalid credentials file {}: {message}", path.display())]
    Credentials { path: PathBuf, message: String },

    #[error("OAuth handshake failed: {0}")]
    OAuth(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::CredentialsNotFound { .. }
            | AppError::Credentials { .. }
            | AppError::OAuth(_) => 2,
            _ => 1,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Transport { .. } => "transport",
            AppError::Protocol(_) => "protocol",
            AppError::Api { .. } => "api",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Construction(_) => "construction",
            AppError::CredentialsNotFound { .. } => "credentials_not_found",
            AppError::Credentials { .. } => "credentials",
            AppError::OAuth(_) => "oauth",
            AppError::Http(_) => "http",
            AppError::Json(_) => "json",
            AppError::Yaml(_) => "yaml",
            AppError::Io(_) => "io",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "error": self.error_type(),
            "message": self.to_string(),
        });
        if let AppError::Transport { status, .. } = self {
            obj["status"] = serde_json::json!(status);
        }
        obj
    }
}
