use async_trait::async_trait;

use crate::error::Error;

/// Source of bearer credentials for the API.
///
/// Refresh and caching are the provider's concern; the client only reads one
/// valid token per call. Failures surface as [`Error::Auth`].
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, Error>;
}

/// Provider handing out a fixed, externally managed token.
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> StaticToken {
        StaticToken(token.into())
    }
}

#[async_trait]
impl AccessTokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String, Error> {
        Ok(self.0.clone())
    }
}
