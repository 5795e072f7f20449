use serde::Serialize;

use crate::artifact::Artifact;
use crate::convergence::{ConvergenceOutcome, ConvergenceState};
use crate::options::OutputFormat;

/// 幅と高さ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DimensionPair {
    pub width: u32,
    pub height: u32,
}

impl From<(u32, u32)> for DimensionPair {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub original: DimensionPair,
    pub compressed: DimensionPair,
}

/// 圧縮結果と統計
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionResult {
    pub artifact: Artifact,
    pub original_size: u64,
    pub compressed_size: u64,
    /// `1 - compressed / original`（縮小できなかった場合は 0）
    pub compression_ratio: f64,
    pub dimensions: Dimensions,
    /// エンコード試行回数（高速パスでは 0）
    pub attempts: u32,
    /// 採用したエンコード品質（元ファイルを返した場合は None）
    pub final_quality: Option<f32>,
    pub state: ConvergenceState,
    /// 返却したファイルが目標サイズ以下か
    pub within_budget: bool,
    /// 元ファイルをそのまま返したか（高速パス・差し戻し）
    pub unchanged: bool,
}

/// 圧縮率を計算する（負にはならない）
pub fn compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 || compressed_size >= original_size {
        return 0.0;
    }
    1.0 - compressed_size as f64 / original_size as f64
}

/// 圧縮結果をまとめる
///
/// エンコード結果が元ファイル以上のサイズになった場合は、元ファイルを差し戻す
pub fn report(
    original: &Artifact,
    outcome: ConvergenceOutcome,
    format: OutputFormat,
    original_dims: (u32, u32),
    target_dims: (u32, u32),
    budget: u64,
) -> CompressionResult {
    let original_size = original.size();

    if outcome.size() >= original_size {
        tracing::info!(
            original_size,
            encoded_size = outcome.size(),
            "encoded output is not smaller than original, keeping original"
        );
        return CompressionResult {
            attempts: outcome.attempts,
            state: outcome.state,
            ..report_unchanged(original, original_dims, budget)
        };
    }

    let compressed_size = outcome.size();
    CompressionResult {
        artifact: original.renamed_for(format, outcome.data),
        original_size,
        compressed_size,
        compression_ratio: compression_ratio(original_size, compressed_size),
        dimensions: Dimensions {
            original: original_dims.into(),
            compressed: target_dims.into(),
        },
        attempts: outcome.attempts,
        final_quality: Some(outcome.final_quality),
        state: outcome.state,
        within_budget: compressed_size <= budget,
        unchanged: false,
    }
}

/// 元ファイルをそのまま返す結果を作る
pub fn report_unchanged(original: &Artifact, dims: (u32, u32), budget: u64) -> CompressionResult {
    let size = original.size();
    CompressionResult {
        artifact: original.clone(),
        original_size: size,
        compressed_size: size,
        compression_ratio: 0.0,
        dimensions: Dimensions {
            original: dims.into(),
            compressed: dims.into(),
        },
        attempts: 0,
        final_quality: None,
        state: ConvergenceState::Converged,
        within_budget: size <= budget,
        unchanged: true,
    }
}
