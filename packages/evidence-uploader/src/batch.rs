use std::path::Path;

use compress_core::{Artifact, CompressionResult, Compressor};
use futures::future::join_all;

use crate::error::UploadError;

/// 1 回に送信できる証拠画像の最大数
pub const MAX_BATCH_FILES: usize = 10;

/// 拡張子から MIME タイプを推測する
///
/// 判定できない場合は application/octet-stream を返し、判定はコアの検証に任せる
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// ファイルを読み込んで Artifact を作る
pub async fn load_artifact(path: &Path) -> Result<Artifact, UploadError> {
    let data = tokio::fs::read(path).await.map_err(|source| UploadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    Ok(Artifact::new(name, mime_type_for(path), data))
}

/// 1 枚の画像をブロッキングスレッドで圧縮する
pub async fn compress_one(
    compressor: &Compressor,
    artifact: Artifact,
) -> Result<CompressionResult, UploadError> {
    let compressor = compressor.clone();
    let name = artifact.name().to_string();

    let result = tokio::task::spawn_blocking(move || compressor.compress(&artifact))
        .await
        .map_err(|e| UploadError::Task(format!("{name}: {e}")))??;

    Ok(result)
}

/// 複数の画像を並行に圧縮する
///
/// 結果は入力と同じ順序で返す。1 枚の失敗は他の画像に影響しない
pub async fn compress_batch(
    compressor: &Compressor,
    artifacts: Vec<Artifact>,
) -> Result<Vec<Result<CompressionResult, UploadError>>, UploadError> {
    if artifacts.len() > MAX_BATCH_FILES {
        return Err(UploadError::TooManyFiles {
            count: artifacts.len(),
            max: MAX_BATCH_FILES,
        });
    }

    tracing::info!(count = artifacts.len(), "compressing evidence images");

    let tasks = artifacts
        .into_iter()
        .map(|artifact| compress_one(compressor, artifact));

    Ok(join_all(tasks).await)
}
