use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_HEIGHT, DEFAULT_MAX_SIZE_KB, DEFAULT_MAX_WIDTH, DEFAULT_QUALITY,
};
use crate::errors::CompressError;

/// 出力フォーマット
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
    WebP,
    Avif,
}

impl OutputFormat {
    /// 文字列から OutputFormat を作成
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::WebP),
            "avif" => Some(Self::Avif),
            _ => None,
        }
    }

    /// Content-Type を取得
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
            Self::Avif => "image/avif",
        }
    }

    /// ファイル拡張子（ドットなし）
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::WebP => "webp",
            Self::Avif => "avif",
        }
    }

    /// 品質パラメータが出力サイズに効くか
    ///
    /// PNG と WebP（image クレートはロスレスのみ）は品質を無視する
    pub fn is_lossy(&self) -> bool {
        matches!(self, Self::Jpeg | Self::Avif)
    }
}

/// リサンプリングフィルタ
///
/// ニアレストネイバーは解析精度を落とすため選択肢に含めない
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    Bilinear,
    CatmullRom,
    #[default]
    Lanczos3,
}

/// 圧縮オプション（すべてデフォルト値あり）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressionOptions {
    pub max_width: u32,
    pub max_height: u32,
    /// 初期品質（0.0 < q <= 1.0）
    pub quality: f32,
    /// 目標サイズ（KB）
    #[serde(rename = "maxSizeKB")]
    pub max_size_kb: u64,
    pub output_format: OutputFormat,
    pub resample_filter: ResampleFilter,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            quality: DEFAULT_QUALITY,
            max_size_kb: DEFAULT_MAX_SIZE_KB,
            output_format: OutputFormat::Jpeg,
            resample_filter: ResampleFilter::Lanczos3,
        }
    }
}

impl CompressionOptions {
    /// 目標サイズをバイト単位で返す
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_kb.saturating_mul(1024)
    }

    /// 不変条件を検証する
    pub fn validate(&self) -> Result<(), CompressError> {
        crate::validation::validate_options(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("jpeg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_str("JPG"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_str("png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_str("webp"), Some(OutputFormat::WebP));
        assert_eq!(OutputFormat::from_str("avif"), Some(OutputFormat::Avif));
        assert_eq!(OutputFormat::from_str("gif"), None);
    }

    #[test]
    fn test_is_lossy() {
        assert!(OutputFormat::Jpeg.is_lossy());
        assert!(OutputFormat::Avif.is_lossy());
        assert!(!OutputFormat::Png.is_lossy());
        assert!(!OutputFormat::WebP.is_lossy());
    }

    #[test]
    fn test_content_type_and_extension() {
        assert_eq!(OutputFormat::Jpeg.content_type(), "image/jpeg");
        assert_eq!(OutputFormat::Avif.content_type(), "image/avif");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::WebP.extension(), "webp");
    }

    #[test]
    fn test_default_options() {
        let options = CompressionOptions::default();
        assert_eq!(options.max_width, 2048);
        assert_eq!(options.max_height, 2048);
        assert_eq!(options.quality, 0.85);
        assert_eq!(options.max_size_kb, 1024);
        assert_eq!(options.output_format, OutputFormat::Jpeg);
        assert_eq!(options.max_size_bytes(), 1024 * 1024);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_options() {
        let options: CompressionOptions =
            serde_json::from_str(r#"{"maxWidth":1000,"maxSizeKB":512,"outputFormat":"webp"}"#)
                .unwrap();
        assert_eq!(options.max_width, 1000);
        assert_eq!(options.max_height, 2048);
        assert_eq!(options.max_size_kb, 512);
        assert_eq!(options.output_format, OutputFormat::WebP);
        assert_eq!(options.resample_filter, ResampleFilter::Lanczos3);
    }
}
