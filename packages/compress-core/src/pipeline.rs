use crate::artifact::Artifact;
use crate::codec::{ImageCodec, NativeCodec};
use crate::convergence::ConvergenceController;
use crate::errors::CompressError;
use crate::options::CompressionOptions;
use crate::stats::{report, report_unchanged, CompressionResult};
use crate::transform::plan_dimensions;
use crate::validation::validate_artifact;

/// オプションとバックエンドを束ねた圧縮器
///
/// 呼び出し間で状態は共有しないため、複製して並行に使ってよい
#[derive(Debug, Clone)]
pub struct Compressor<C = NativeCodec> {
    codec: C,
    options: CompressionOptions,
}

impl Compressor<NativeCodec> {
    pub fn new(options: CompressionOptions) -> Self {
        Self {
            codec: NativeCodec::new(options.resample_filter),
            options,
        }
    }
}

impl<C: ImageCodec> Compressor<C> {
    pub fn with_codec(codec: C, options: CompressionOptions) -> Self {
        Self { codec, options }
    }

    pub fn compress(&self, artifact: &Artifact) -> Result<CompressionResult, CompressError> {
        compress_with(&self.codec, artifact, &self.options)
    }
}

/// ネイティブバックエンドで画像を圧縮する
///
/// CPU を占有する同期処理なので、非同期コンテキストからは
/// `spawn_blocking` 等で別スレッドに逃がして呼ぶこと
pub fn compress(
    artifact: &Artifact,
    options: &CompressionOptions,
) -> Result<CompressionResult, CompressError> {
    compress_with(&NativeCodec::new(options.resample_filter), artifact, options)
}

/// 指定したバックエンドで画像を圧縮する
///
/// 検証 → (高速パス) → デコード → 寸法計算 → 品質探索 → 統計の順に処理する
pub fn compress_with<C: ImageCodec>(
    codec: &C,
    artifact: &Artifact,
    options: &CompressionOptions,
) -> Result<CompressionResult, CompressError> {
    options.validate()?;
    validate_artifact(artifact)?;

    let budget = options.max_size_bytes();

    // 既に目標サイズ以下なら何もしない
    if artifact.size() <= budget {
        let dims = codec.probe(artifact.data())?;
        tracing::debug!(
            name = artifact.name(),
            size = artifact.size(),
            budget,
            "already within size budget, skipping compression"
        );
        return Ok(report_unchanged(artifact, dims, budget));
    }

    let raster = codec.decode(artifact.data())?;
    let original_dims = raster.dimensions();
    let (target_w, target_h) = plan_dimensions(
        original_dims.0,
        original_dims.1,
        options.max_width,
        options.max_height,
    )?;

    // リサンプリングは 1 回だけ行い、品質探索では再利用する
    // 寸法が変わらない場合は複製せずにそのまま使う
    let resized = if (target_w, target_h) == original_dims {
        raster
    } else {
        let resized = codec.resize(&raster, target_w, target_h)?;
        drop(raster);
        resized
    };

    let outcome = ConvergenceController::new(codec).converge(
        &resized,
        target_w,
        target_h,
        options.output_format,
        options.quality,
        options.max_size_kb,
    )?;
    drop(resized);

    let result = report(
        artifact,
        outcome,
        options.output_format,
        original_dims,
        (target_w, target_h),
        budget,
    );

    tracing::info!(
        name = artifact.name(),
        original_size = result.original_size,
        compressed_size = result.compressed_size,
        ratio = result.compression_ratio,
        attempts = result.attempts,
        state = ?result.state,
        width = result.dimensions.compressed.width,
        height = result.dimensions.compressed.height,
        "image compressed"
    );

    Ok(result)
}
