use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use compress_core::CompressionResult;
use serde::Serialize;

use crate::error::UploadError;

/// base64 エンコード後のペイロード上限（API ゲートウェイの制限）
pub const MAX_ENCODED_PAYLOAD_BYTES: usize = 4 * 1024 * 1024;

/// base64 エンコード後のバイト数（パディングあり）
pub fn encoded_len(size: usize) -> usize {
    size.div_ceil(3) * 4
}

/// API に送信する 1 枚分の画像
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedPayload {
    pub name: String,
    pub mime_type: String,
    /// base64 エンコードした画像データ
    pub data: String,
    pub stats: CompressionResult,
}

impl EncodedPayload {
    /// 圧縮結果を base64 エンコードする
    ///
    /// エンコード後に `ceiling` を超える場合は再圧縮せず PayloadTooLarge を返す
    pub fn from_result(result: CompressionResult, ceiling: usize) -> Result<Self, UploadError> {
        let artifact = &result.artifact;
        let encoded_size = encoded_len(artifact.data().len());

        if encoded_size > ceiling {
            return Err(UploadError::PayloadTooLarge {
                name: artifact.name().to_string(),
                encoded_size,
                max: ceiling,
            });
        }

        Ok(Self {
            name: artifact.name().to_string(),
            mime_type: artifact.mime_type().to_string(),
            data: STANDARD.encode(artifact.data()),
            stats: result,
        })
    }
}
