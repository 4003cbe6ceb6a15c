use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::api::{self, CommonError, Envelope};
use crate::client::Cloud;
use crate::error::Error;

#[derive(Debug, Deserialize)]
struct InvokeResp {
    #[serde(flatten)]
    common: CommonError,
    #[serde(default)]
    resp_data: String,
}

impl Envelope for InvokeResp {
    fn common(&self) -> &CommonError {
        &self.common
    }
}

/// What a cloud function returned, as an uninterpreted string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionResult {
    pub resp_data: String,
}

impl Cloud {
    /// Invokes the named cloud function with an arbitrary payload.
    ///
    /// Unlike the database operations, environment and function name ride
    /// in the URL query string and the payload is posted verbatim, with no
    /// `env` wrapping. Payload and response stay opaque to this client.
    pub async fn invoke_function<P>(&self, name: &str, payload: &P) -> Result<FunctionResult, Error>
    where
        P: Serialize + ?Sized,
    {
        let token = self.tokens.access_token().await?;
        let url = format!(
            "{}{}?access_token={}&env={}&name={}",
            self.endpoint,
            api::INVOKE_CLOUD_FUNCTION,
            token,
            self.env,
            name
        );
        let body = serde_json::to_value(payload).map_err(Error::encode)?;
        debug!("POST {} name={}", api::INVOKE_CLOUD_FUNCTION, name);
        let raw = self.poster.post_json(&url, &body).await?;
        match api::decode_envelope::<InvokeResp>(&raw) {
            Ok(res) => Ok(FunctionResult {
                resp_data: res.resp_data,
            }),
            Err(e) => {
                error!("invoke of {} failed: {}", name, e);
                Err(e)
            }
        }
    }
}
