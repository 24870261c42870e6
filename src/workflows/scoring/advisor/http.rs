use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{
    AdviceUnavailable, AdvisoryGateway, RankingRequest, RankingResponse, SuggestionRequest,
    SuggestionResponse,
};

/// HTTP client for the advisory service. Both endpoints share one
/// connection pool with a bounded request timeout, so a stalled advisory
/// call degrades into `AdviceUnavailable::Timeout` instead of hanging the
/// caller.
#[derive(Debug, Clone)]
pub struct HttpAdvisoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAdvisoryClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AdviceUnavailable> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AdviceUnavailable::Transport(err.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    fn map_error(err: reqwest::Error) -> AdviceUnavailable {
        if err.is_timeout() {
            AdviceUnavailable::Timeout
        } else if err.is_decode() {
            AdviceUnavailable::Malformed(err.to_string())
        } else {
            AdviceUnavailable::Transport(err.to_string())
        }
    }

    async fn post_json<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, AdviceUnavailable>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(Self::map_error)?
            .error_for_status()
            .map_err(Self::map_error)?;

        response.json().await.map_err(Self::map_error)
    }
}

impl AdvisoryGateway for HttpAdvisoryClient {
    async fn suggest(
        &self,
        request: SuggestionRequest,
    ) -> Result<SuggestionResponse, AdviceUnavailable> {
        self.post_json("/v1/advice/dimensions", &request).await
    }

    async fn rank(&self, request: RankingRequest) -> Result<RankingResponse, AdviceUnavailable> {
        self.post_json("/v1/advice/coach-ranking", &request).await
    }
}
