use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::UploadError;
use crate::payload::EncodedPayload;

/// ビジュアルコンプライアンスチェックのエンドポイント
const CHECK_PATH: &str = "visual-compliance/check";

#[derive(Debug, Serialize)]
struct CheckRequest<'a> {
    reference: &'a EncodedPayload,
    evidence: &'a [EncodedPayload],
}

/// コンプライアンス API クライアント
#[derive(Clone)]
pub struct ComplianceClient {
    client: Client,
    base_url: String,
    api_token: String,
}

impl ComplianceClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token,
        }
    }

    /// 環境変数から ComplianceClient を作成する
    pub fn from_env() -> Result<Self, UploadError> {
        Ok(Self::new(ApiConfig::from_env()?))
    }

    fn check_url(&self) -> String {
        format!("{}/{}", self.base_url, CHECK_PATH)
    }

    /// 参照画像と証拠画像を送信し、チェック結果を返す
    pub async fn submit(
        &self,
        reference: &EncodedPayload,
        evidence: &[EncodedPayload],
    ) -> Result<serde_json::Value, UploadError> {
        let url = self.check_url();
        tracing::info!(url = %url, evidence = evidence.len(), "submitting compliance check");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&CheckRequest { reference, evidence })
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(UploadError::Unauthorized);
            }
            status => {
                let message = response.text().await.unwrap_or_default();
                tracing::error!(status = %status, "unexpected response from compliance API");
                return Err(UploadError::Api {
                    status: status.as_u16(),
                    message,
                });
            }
        }

        Ok(response.json().await?)
    }
}
