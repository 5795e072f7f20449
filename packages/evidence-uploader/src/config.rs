use std::str::FromStr;

use compress_core::{CompressionOptions, OutputFormat};

use crate::error::ConfigError;

/// コンプライアンス API の接続設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_token: String,
}

impl ApiConfig {
    /// 環境変数から ApiConfig を作成する
    ///
    /// 必須の環境変数:
    /// - COMPLIANCE_API_URL
    /// - COMPLIANCE_API_TOKEN
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("COMPLIANCE_API_URL").ok_or(ConfigError::Missing("COMPLIANCE_API_URL"))?;
        let api_token =
            lookup("COMPLIANCE_API_TOKEN").ok_or(ConfigError::Missing("COMPLIANCE_API_TOKEN"))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }
}

/// 環境変数で圧縮オプションを上書きする
///
/// 任意の環境変数:
/// - COMPRESS_MAX_WIDTH / COMPRESS_MAX_HEIGHT
/// - COMPRESS_QUALITY（0.0 < q <= 1.0）
/// - COMPRESS_MAX_SIZE_KB
/// - COMPRESS_FORMAT（jpeg / png / webp / avif）
pub fn options_from_env() -> Result<CompressionOptions, ConfigError> {
    options_from_lookup(|key| std::env::var(key).ok())
}

pub fn options_from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<CompressionOptions, ConfigError> {
    let mut options = CompressionOptions::default();

    if let Some(v) = parse(&lookup, "COMPRESS_MAX_WIDTH")? {
        options.max_width = v;
    }
    if let Some(v) = parse(&lookup, "COMPRESS_MAX_HEIGHT")? {
        options.max_height = v;
    }
    if let Some(v) = parse(&lookup, "COMPRESS_QUALITY")? {
        options.quality = v;
    }
    if let Some(v) = parse(&lookup, "COMPRESS_MAX_SIZE_KB")? {
        options.max_size_kb = v;
    }
    if let Some(value) = lookup("COMPRESS_FORMAT") {
        options.output_format = OutputFormat::from_str(&value).ok_or(ConfigError::Invalid {
            key: "COMPRESS_FORMAT",
            value,
        })?;
    }

    // 範囲外の値は起動時に弾く
    options.validate().map_err(|e| ConfigError::Invalid {
        key: "COMPRESS_*",
        value: e.to_string(),
    })?;

    Ok(options)
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key, value })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_api_config() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("COMPLIANCE_API_URL", "https://api.example.com/"),
            ("COMPLIANCE_API_TOKEN", "secret"),
        ]))
        .unwrap();

        // 末尾のスラッシュが削除される
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.api_token, "secret");
    }

    #[test]
    fn test_api_config_missing_vars() {
        let result = ApiConfig::from_lookup(lookup(&[("COMPLIANCE_API_URL", "https://x")]));
        assert!(matches!(result, Err(ConfigError::Missing("COMPLIANCE_API_TOKEN"))));
    }

    #[test]
    fn test_default_options() {
        let options = options_from_lookup(lookup(&[])).unwrap();
        assert_eq!(options, CompressionOptions::default());
    }

    #[test]
    fn test_option_overrides() {
        let options = options_from_lookup(lookup(&[
            ("COMPRESS_MAX_WIDTH", "1000"),
            ("COMPRESS_MAX_HEIGHT", " 800 "),
            ("COMPRESS_QUALITY", "0.7"),
            ("COMPRESS_MAX_SIZE_KB", "512"),
            ("COMPRESS_FORMAT", "WEBP"),
        ]))
        .unwrap();

        assert_eq!(options.max_width, 1000);
        assert_eq!(options.max_height, 800);
        assert_eq!(options.quality, 0.7);
        assert_eq!(options.max_size_kb, 512);
        assert_eq!(options.output_format, OutputFormat::WebP);
    }

    #[test]
    fn test_invalid_overrides() {
        assert!(matches!(
            options_from_lookup(lookup(&[("COMPRESS_MAX_WIDTH", "wide")])),
            Err(ConfigError::Invalid { key: "COMPRESS_MAX_WIDTH", .. })
        ));
        assert!(matches!(
            options_from_lookup(lookup(&[("COMPRESS_FORMAT", "bmp")])),
            Err(ConfigError::Invalid { key: "COMPRESS_FORMAT", .. })
        ));
        assert!(options_from_lookup(lookup(&[("COMPRESS_QUALITY", "1.5")])).is_err());
        assert!(options_from_lookup(lookup(&[("COMPRESS_MAX_SIZE_KB", "0")])).is_err());
    }
}
