use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use crate::error::Error;

/// Sends a JSON body and hands back the raw response bytes.
///
/// Implementations must return the body for any HTTP response regardless of
/// status code; classifying the payload is the decoder's job, not the
/// transport's. Only network-level failures are errors here.
#[async_trait]
pub trait JsonPoster: Send + Sync {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Bytes, Error>;
}

/// Default transport backed by a shared reqwest client.
pub struct ReqwestPoster {
    client: reqwest::Client,
}

impl ReqwestPoster {
    pub fn new(client: reqwest::Client) -> ReqwestPoster {
        ReqwestPoster { client }
    }
}

#[async_trait]
impl JsonPoster for ReqwestPoster {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Bytes, Error> {
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::transport(redact(url), e))?;
        resp.bytes()
            .await
            .map_err(|e| Error::transport(redact(url), e))
    }
}

// The query string carries the access token; keep it out of error values.
fn redact(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
