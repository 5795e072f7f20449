use crate::artifact::Artifact;
use crate::constants::MAX_INPUT_BYTES;
use crate::errors::CompressError;

/// 受け付ける MIME タイプ
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
];

/// 入力ファイルを検証する
///
/// メタデータ（MIME タイプ・サイズ）のみを見る。デコードは行わないので
/// 不正な入力は安価に弾かれる
pub fn validate_artifact(artifact: &Artifact) -> Result<(), CompressError> {
    // "image/png; charset=binary" のようなパラメータ付きも許容
    let essence = artifact
        .mime_type()
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if !ACCEPTED_MIME_TYPES.contains(&essence.as_str()) {
        return Err(CompressError::InvalidType {
            mime_type: artifact.mime_type().to_string(),
        });
    }

    let size = artifact.size();
    if size > MAX_INPUT_BYTES {
        return Err(CompressError::TooLarge {
            size,
            max: MAX_INPUT_BYTES,
        });
    }

    Ok(())
}
