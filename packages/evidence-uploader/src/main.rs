use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use compress_core::Compressor;
use evidence_uploader::{
    compress_batch, compress_one, load_artifact, options_from_env, ComplianceClient,
    EncodedPayload, UploadError, MAX_ENCODED_PAYLOAD_BYTES,
};

/// 証拠画像を圧縮してビジュアルコンプライアンスチェックに送信する
#[derive(Debug, Parser)]
#[command(name = "evidence-uploader", version)]
struct Args {
    /// 参照画像
    #[arg(long)]
    reference: PathBuf,

    /// 証拠画像（最大 10 枚）
    #[arg(long, num_args = 1.., required = true)]
    evidence: Vec<PathBuf>,

    /// 圧縮のみ行い、統計を出力して終了する
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), UploadError> {
    let options = options_from_env()?;
    let compressor = Compressor::new(options);

    // 送信前に API 設定を確認し、圧縮してから失敗するのを避ける
    let client = if args.dry_run {
        None
    } else {
        Some(ComplianceClient::from_env()?)
    };

    let reference = compress_one(&compressor, load_artifact(&args.reference).await?).await?;

    let mut artifacts = Vec::with_capacity(args.evidence.len());
    for path in &args.evidence {
        artifacts.push(load_artifact(path).await?);
    }
    let evidence = compress_batch(&compressor, artifacts)
        .await?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    let Some(client) = client else {
        for result in std::iter::once(&reference).chain(&evidence) {
            println!("{}", serde_json::to_string(result)?);
        }
        return Ok(());
    };

    let reference = EncodedPayload::from_result(reference, MAX_ENCODED_PAYLOAD_BYTES)?;
    let evidence = evidence
        .into_iter()
        .map(|result| EncodedPayload::from_result(result, MAX_ENCODED_PAYLOAD_BYTES))
        .collect::<Result<Vec<_>, _>>()?;

    let response = client.submit(&reference, &evidence).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
