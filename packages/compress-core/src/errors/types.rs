use thiserror::Error;

/// 画像圧縮パイプラインのエラー型
///
/// いずれもコア内部ではリトライせず、そのまま呼び出し元へ返す。
/// 予算超過（Exhausted）はエラーではなく `CompressionResult` として返る。
#[derive(Debug, Error)]
pub enum CompressError {
    #[error("invalid compression options: {0}")]
    InvalidOptions(String),

    #[error("unsupported file type: {mime_type}")]
    InvalidType { mime_type: String },

    #[error("file too large: {size} bytes (max {max})")]
    TooLarge { size: u64, max: u64 },

    #[error("invalid source dimensions ({width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("image resolution exceeds maximum ({width}x{height})")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("encode failed: {0}")]
    Encode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CompressError::InvalidType {
            mime_type: "application/pdf".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported file type: application/pdf");

        let err = CompressError::TooLarge { size: 30, max: 20 };
        assert_eq!(err.to_string(), "file too large: 30 bytes (max 20)");
    }
}
