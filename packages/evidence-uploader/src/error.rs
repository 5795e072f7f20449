use std::path::PathBuf;

use compress_core::CompressError;

/// 設定エラー
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// アップロード処理全体のエラー型
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("compression error: {0}")]
    Compress(#[from] CompressError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("too many files: {count} (max {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("{name} is too large after encoding: {encoded_size} bytes (max {max})")]
    PayloadTooLarge {
        name: String,
        encoded_size: usize,
        max: usize,
    },

    #[error("compression task failed: {0}")]
    Task(String),

    #[error("access denied by compliance API")]
    Unauthorized,

    #[error("compliance API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("http error: {0}")]
    Http(String),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        UploadError::Http(err.to_string())
    }
}

impl UploadError {
    /// ユーザーに表示するメッセージ（内部エラーの詳細はログにのみ出す）
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Config(err) => {
                tracing::error!(error = %err, "configuration error");
                format!("configuration error: {err}")
            }
            UploadError::Compress(err) => compress_message(err),
            UploadError::Io { path, source } => {
                tracing::warn!(path = %path.display(), error = %source, "failed to read file");
                format!("could not read {}", path.display())
            }
            UploadError::TooManyFiles { max, .. } => {
                format!("at most {max} evidence images can be submitted at once")
            }
            UploadError::PayloadTooLarge { name, encoded_size, max } => {
                tracing::warn!(name = %name, encoded_size, max, "payload exceeds upload ceiling");
                format!("image too large: {name}")
            }
            UploadError::Task(msg) => {
                tracing::error!(error = %msg, "compression task failed");
                "internal error".to_string()
            }
            UploadError::Unauthorized => {
                tracing::error!("access denied by compliance API (check COMPLIANCE_API_TOKEN)");
                "compliance service access denied".to_string()
            }
            UploadError::Api { status, message } => {
                tracing::error!(status, error = %message, "compliance API error");
                "compliance service error".to_string()
            }
            UploadError::Http(msg) => {
                tracing::error!(error = %msg, "http error");
                "compliance service unavailable".to_string()
            }
            UploadError::Json(err) => {
                tracing::error!(error = %err, "failed to serialize output");
                "internal error".to_string()
            }
        }
    }
}

fn compress_message(err: &CompressError) -> String {
    match err {
        CompressError::InvalidType { mime_type } => {
            tracing::warn!(mime_type = %mime_type, "unsupported file type");
            "unsupported file type (use JPEG, PNG, WebP or GIF)".to_string()
        }
        CompressError::TooLarge { max, .. } => {
            tracing::warn!(error = %err, "input file too large");
            format!("file too large (max {} MB)", max / (1024 * 1024))
        }
        CompressError::Decode(msg) => {
            tracing::warn!(error = %msg, "image could not be decoded");
            "image could not be read".to_string()
        }
        CompressError::InvalidDimensions { .. } | CompressError::ResolutionTooLarge { .. } => {
            tracing::warn!(error = %err, "unsupported image resolution");
            "unsupported image resolution".to_string()
        }
        CompressError::InvalidOptions(msg) => {
            tracing::error!(error = %msg, "invalid compression options");
            format!("invalid compression options: {msg}")
        }
        CompressError::Encode(msg) => {
            tracing::error!(error = %msg, "image encoding failed");
            "image processing failed".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = UploadError::from(CompressError::InvalidType {
            mime_type: "application/pdf".to_string(),
        });
        assert_eq!(err.user_message(), "unsupported file type (use JPEG, PNG, WebP or GIF)");

        let err = UploadError::from(CompressError::TooLarge {
            size: 30 * 1024 * 1024,
            max: 20 * 1024 * 1024,
        });
        assert_eq!(err.user_message(), "file too large (max 20 MB)");

        let err = UploadError::PayloadTooLarge {
            name: "site.jpg".to_string(),
            encoded_size: 5_000_000,
            max: 4_194_304,
        };
        assert_eq!(err.user_message(), "image too large: site.jpg");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = UploadError::Api {
            status: 500,
            message: "stack trace".to_string(),
        };
        assert_eq!(err.user_message(), "compliance service error");

        let err = UploadError::from(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert!(err.to_string().starts_with("failed to serialize output"));
        assert_eq!(err.user_message(), "internal error");
    }
}
