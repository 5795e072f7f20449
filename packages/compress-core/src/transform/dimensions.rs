use crate::errors::CompressError;

/// 出力寸法を計算する
///
/// アスペクト比を維持しつつ `max_w` x `max_h` の領域に収める。
/// 元画像が既に収まっている場合はそのまま返す（拡大はしない）
pub fn plan_dimensions(
    src_w: u32,
    src_h: u32,
    max_w: u32,
    max_h: u32,
) -> Result<(u32, u32), CompressError> {
    if src_w == 0 || src_h == 0 {
        return Err(CompressError::InvalidDimensions {
            width: src_w,
            height: src_h,
        });
    }
    if max_w == 0 || max_h == 0 {
        return Err(CompressError::InvalidOptions(format!(
            "max dimensions must be positive, got {max_w}x{max_h}"
        )));
    }

    if src_w <= max_w && src_h <= max_h {
        return Ok((src_w, src_h));
    }

    let aspect = src_w as f64 / src_h as f64;

    // 長辺側を上限に合わせる
    let (mut dst_w, mut dst_h) = if src_w >= src_h {
        (max_w, height_for(max_w, aspect))
    } else {
        (width_for(max_h, aspect), max_h)
    };

    // もう一方の辺が上限を超えた場合はそちらを基準に計算し直す
    if dst_w > max_w {
        dst_w = max_w;
        dst_h = height_for(dst_w, aspect);
    }
    if dst_h > max_h {
        dst_h = max_h;
        dst_w = width_for(dst_h, aspect);
    }

    // 極端に細長い画像でも最小 1px を保証
    Ok((dst_w.clamp(1, max_w), dst_h.clamp(1, max_h)))
}

fn height_for(width: u32, aspect: f64) -> u32 {
    (width as f64 / aspect).round() as u32
}

fn width_for(height: u32, aspect: f64) -> u32 {
    (height as f64 * aspect).round() as u32
}
