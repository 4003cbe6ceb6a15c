pub mod auth;
pub mod config;
pub mod transport;

use std::fs::File;
use std::io::Read;
use std::sync::Arc;

use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api;
use crate::api::Envelope;
use crate::error::Error;
use auth::AccessTokenProvider;
use config::ClientConfig;
use transport::{JsonPoster, ReqwestPoster};

/// Handle to one cloud environment.
///
/// The environment id is fixed at construction and injected into every
/// request body; credentials come from the token provider on each call.
/// Calls share no mutable state, so a `Cloud` can be cloned and used from
/// any number of tasks concurrently.
#[derive(Clone)]
pub struct Cloud {
    pub(crate) env: String,
    pub(crate) endpoint: String,
    pub(crate) tokens: Arc<dyn AccessTokenProvider>,
    pub(crate) poster: Arc<dyn JsonPoster>,
}

impl Cloud {
    /// Builds a client with the default reqwest transport.
    pub fn new(
        env: impl Into<String>,
        config: &ClientConfig,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<Cloud, Error> {
        let client = build_http_client(config)?;
        Ok(Cloud {
            env: env.into(),
            endpoint: config.endpoint.clone(),
            tokens,
            poster: Arc::new(ReqwestPoster::new(client)),
        })
    }

    /// Builds a client around a caller-supplied transport, e.g. a fake in
    /// tests or a poster with bespoke connection handling.
    pub fn with_poster(
        env: impl Into<String>,
        endpoint: impl Into<String>,
        tokens: Arc<dyn AccessTokenProvider>,
        poster: Arc<dyn JsonPoster>,
    ) -> Cloud {
        Cloud {
            env: env.into(),
            endpoint: endpoint.into(),
            tokens,
            poster,
        }
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    /// One request/response round trip: token, env-scoped body, post,
    /// envelope decode. Every operation except function invocation (which
    /// routes through the URL query string) funnels through here.
    pub(crate) async fn call<P, R>(&self, path: &str, params: &P) -> Result<R, Error>
    where
        P: Serialize,
        R: DeserializeOwned + Envelope,
    {
        let token = self.tokens.access_token().await?;
        let url = api::endpoint_url(&self.endpoint, path, &token);
        let body = serde_json::to_value(api::EnvScoped {
            params,
            env: &self.env,
        })
        .map_err(Error::encode)?;
        debug!("POST {}", path);
        let raw = self.poster.post_json(&url, &body).await?;
        match api::decode_envelope(&raw) {
            Ok(res) => Ok(res),
            Err(e) => {
                error!("{} failed: {}", path, e);
                Err(e)
            }
        }
    }
}

/// Builds the underlying reqwest client: TLS 1.2 at minimum, optionally
/// trusting an extra PEM root certificate.
pub fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client, Error> {
    let mut builder = reqwest::Client::builder()
        .use_rustls_tls()
        .min_tls_version(reqwest::tls::Version::TLS_1_2)
        .timeout(config.timeout);

    if let Some(cert_path) = &config.tls_cert {
        let mut cert_buf = vec![];
        File::open(cert_path)
            .and_then(|mut f| f.read_to_end(&mut cert_buf))
            .map_err(|e| Error::Config(format!("could not read TLS certificate: {}", e)))?;
        let cert = reqwest::Certificate::from_pem(&cert_buf)
            .map_err(|e| Error::Config(format!("invalid TLS certificate: {}", e)))?;
        builder = builder.add_root_certificate(cert);
    }

    builder
        .build()
        .map_err(|e| Error::Config(format!("could not build client: {}", e)))
}
