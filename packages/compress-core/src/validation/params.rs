use crate::errors::CompressError;
use crate::options::CompressionOptions;

/// 圧縮オプションを検証する
pub fn validate_options(options: &CompressionOptions) -> Result<(), CompressError> {
    // 品質の検証（NaN もここで弾かれる）
    if !(options.quality > 0.0 && options.quality <= 1.0) {
        return Err(CompressError::InvalidOptions(format!(
            "quality must be in (0, 1], got {}",
            options.quality
        )));
    }

    // 寸法の検証
    if options.max_width == 0 || options.max_height == 0 {
        return Err(CompressError::InvalidOptions(format!(
            "max dimensions must be positive, got {}x{}",
            options.max_width, options.max_height
        )));
    }

    // 目標サイズの検証
    if options.max_size_kb == 0 {
        return Err(CompressError::InvalidOptions(
            "maxSizeKB must be positive".to_string(),
        ));
    }

    Ok(())
}
