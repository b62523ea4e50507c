use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_items: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_units: Option<i64>,
}

impl QuoteRequest {
    pub fn items(count: i64) -> Self {
        Self {
            number_of_items: Some(count),
            number_of_units: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub cost_usd: f64,
    pub items: u32,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Client for one service instance (quote or recommendation).
#[derive(Clone)]
pub struct StorefrontClient {
    client: Client,
    base_url: String,
}

impl StorefrontClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let resp = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        decode(resp).await
    }

    /// Request a shipping quote.
    pub async fn quote(&self, req: &QuoteRequest) -> Result<QuoteResponse, ClientError> {
        let resp = self
            .client
            .post(format!("{}/quote", self.base_url))
            .json(req)
            .send()
            .await?;
        decode(resp).await
    }

    /// Request recommendations, leaving out `exclude`.
    pub async fn recommendations(
        &self,
        exclude: &[&str],
    ) -> Result<RecommendationsResponse, ClientError> {
        let mut request = self.client.get(format!("{}/recommendations", self.base_url));
        if !exclude.is_empty() {
            request = request.query(&[("productIds", exclude.join(","))]);
        }
        decode(request.send().await?).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        return Err(format!("Service returned error status {}: {}", status, text).into());
    }

    Ok(serde_json::from_str::<T>(&text)?)
}
