use serde::Serialize;

use crate::codec::ImageCodec;
use crate::constants::{MAX_ATTEMPTS, QUALITY_FLOOR, QUALITY_STEP};
use crate::errors::CompressError;
use crate::options::OutputFormat;
use crate::transform::RasterImage;

/// 品質探索の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConvergenceState {
    Attempting,
    /// 目標サイズ以下に収まった
    Converged,
    /// 試行回数を使い切った（最後のエンコード結果を返す）
    Exhausted,
}

/// 品質探索の結果
#[derive(Debug, Clone)]
pub struct ConvergenceOutcome {
    pub data: Vec<u8>,
    pub state: ConvergenceState,
    pub attempts: u32,
    pub final_quality: f32,
    /// 各試行で使った品質（試行順）
    pub qualities: Vec<f32>,
}

impl ConvergenceOutcome {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// 次の試行で使う品質
///
/// 下限を下回らない範囲で下げる。初期値が既に下限未満ならそのまま維持する
pub fn next_quality(quality: f32) -> f32 {
    (quality - QUALITY_STEP).max(QUALITY_FLOOR).min(quality)
}

/// 目標サイズに収まるまで品質を下げながらエンコードを繰り返す
///
/// エンコーダのエラーは「品質を下げて再試行」の対象にせず、即座に返す
pub struct ConvergenceController<'a, C: ImageCodec> {
    codec: &'a C,
}

impl<'a, C: ImageCodec> ConvergenceController<'a, C> {
    pub fn new(codec: &'a C) -> Self {
        Self { codec }
    }

    pub fn converge(
        &self,
        raster: &RasterImage,
        target_w: u32,
        target_h: u32,
        format: OutputFormat,
        initial_quality: f32,
        max_size_kb: u64,
    ) -> Result<ConvergenceOutcome, CompressError> {
        let budget = max_size_kb.saturating_mul(1024);
        let mut state = ConvergenceState::Attempting;
        let mut quality = initial_quality;
        let mut attempts = 0;
        let mut qualities = Vec::with_capacity(MAX_ATTEMPTS as usize);

        // ロスレス形式では品質を下げてもサイズは変わらないが、試行回数の上限は同じに扱う
        if !format.is_lossy() {
            tracing::debug!(?format, "lossless output format, quality has no effect on size");
        }

        loop {
            attempts += 1;
            qualities.push(quality);

            let data = self
                .codec
                .encode(raster, target_w, target_h, format, quality)?;
            let size = data.len() as u64;

            tracing::debug!(attempt = attempts, quality, size, budget, "encode attempt");

            if size <= budget {
                state = ConvergenceState::Converged;
            } else if attempts >= MAX_ATTEMPTS {
                state = ConvergenceState::Exhausted;
            }

            match state {
                ConvergenceState::Attempting => {
                    quality = next_quality(quality);
                    continue;
                }
                ConvergenceState::Converged => {
                    tracing::debug!(attempts, quality, size, "converged within size budget");
                }
                ConvergenceState::Exhausted => {
                    tracing::warn!(
                        attempts,
                        quality,
                        size,
                        budget,
                        "could not reach size budget, returning last encoding"
                    );
                }
            }

            return Ok(ConvergenceOutcome {
                data,
                state,
                attempts,
                final_quality: quality,
                qualities,
            });
        }
    }
}
