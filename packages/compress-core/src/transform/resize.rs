use crate::constants::MAX_PIXELS;
use crate::errors::CompressError;
use crate::options::ResampleFilter;
use crate::transform::raster::RasterImage;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, RgbImage, RgbaImage};

/// 画像をリサイズする
///
/// fast_image_resize の畳み込みフィルタを使用する。
/// アルファを持つ画像は RGBA8、それ以外は RGB8 として処理する
pub fn resize_image(
    raster: &RasterImage,
    target_w: u32,
    target_h: u32,
    filter: ResampleFilter,
) -> Result<RasterImage, CompressError> {
    if raster.dimensions() == (target_w, target_h) {
        return Ok(raster.clone());
    }

    // ピクセル数チェック
    let total_pixels = target_w as u64 * target_h as u64;
    if total_pixels == 0 || total_pixels > MAX_PIXELS {
        return Err(CompressError::ResolutionTooLarge {
            width: target_w,
            height: target_h,
        });
    }

    let img = raster.as_image();
    let (width, height) = (img.width(), img.height());
    let (raw, pixel_type) = if raster.has_alpha() {
        (img.to_rgba8().into_raw(), PixelType::U8x4)
    } else {
        (img.to_rgb8().into_raw(), PixelType::U8x3)
    };

    let src_image = Image::from_vec_u8(width, height, raw, pixel_type)
        .map_err(|e| CompressError::Encode(format!("failed to create source image: {e}")))?;
    let mut dst_image = Image::new(target_w, target_h, pixel_type);

    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(filter_type(filter)));
    Resizer::new()
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| CompressError::Encode(format!("resize failed: {e}")))?;

    let resized = match pixel_type {
        PixelType::U8x4 => RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
            .map(DynamicImage::ImageRgba8),
        _ => RgbImage::from_raw(target_w, target_h, dst_image.into_vec())
            .map(DynamicImage::ImageRgb8),
    }
    .ok_or_else(|| CompressError::Encode("failed to convert resized image".to_string()))?;

    Ok(RasterImage::new(resized))
}

fn filter_type(filter: ResampleFilter) -> FilterType {
    match filter {
        ResampleFilter::Bilinear => FilterType::Bilinear,
        ResampleFilter::CatmullRom => FilterType::CatmullRom,
        ResampleFilter::Lanczos3 => FilterType::Lanczos3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_image() {
        let raster = RasterImage::new(DynamicImage::new_rgb8(1000, 750));
        for filter in [
            ResampleFilter::Bilinear,
            ResampleFilter::CatmullRom,
            ResampleFilter::Lanczos3,
        ] {
            let resized = resize_image(&raster, 400, 300, filter).unwrap();
            assert_eq!(resized.dimensions(), (400, 300));
            assert!(!resized.has_alpha());
        }
    }

    #[test]
    fn test_resize_keeps_alpha() {
        let raster = RasterImage::new(DynamicImage::new_rgba8(200, 100));
        let resized = resize_image(&raster, 100, 50, ResampleFilter::Lanczos3).unwrap();
        assert_eq!(resized.dimensions(), (100, 50));
        assert!(resized.has_alpha());
    }

    #[test]
    fn test_same_dimensions_is_noop() {
        let raster = RasterImage::new(DynamicImage::new_luma8(30, 20));
        let resized = resize_image(&raster, 30, 20, ResampleFilter::Lanczos3).unwrap();
        assert_eq!(resized.dimensions(), (30, 20));
    }

    #[test]
    fn test_resize_exceeds_max_pixels() {
        let raster = RasterImage::new(DynamicImage::new_rgb8(100, 100));
        match resize_image(&raster, 100_000, 100_000, ResampleFilter::Lanczos3) {
            Err(CompressError::ResolutionTooLarge { width, height }) => {
                assert_eq!(width, 100_000);
                assert_eq!(height, 100_000);
            }
            other => panic!("expected ResolutionTooLarge error, got {other:?}"),
        }
    }
}
