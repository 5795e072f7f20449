use bytes::Bytes;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::options::OutputFormat;

/// 圧縮対象・圧縮結果のファイル（名前・MIME タイプ・バイト列）
///
/// `Bytes` で保持するため、元ファイルをそのまま結果に差し戻してもコピーは発生しない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    name: String,
    mime_type: String,
    data: Bytes,
}

impl Artifact {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 申告された MIME タイプ
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// バイト数
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// 出力フォーマットに合わせた名前・MIME タイプで新しい Artifact を作る
    ///
    /// 拡張子は差し替え、拡張子がない場合は付与する
    pub fn renamed_for(&self, format: OutputFormat, data: impl Into<Bytes>) -> Self {
        let stem = match self.name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => self.name.as_str(),
        };
        Self::new(
            format!("{stem}.{}", format.extension()),
            format.content_type(),
            data,
        )
    }
}

impl Serialize for Artifact {
    /// バイト列は含めず、名前・MIME タイプ・サイズのみ出力する
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Artifact", 3)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("mimeType", self.mime_type())?;
        state.serialize_field("size", &self.size())?;
        state.end()
    }
}
