use std::time::Duration;

/// Public entry point of the production API.
pub const DEFAULT_ENDPOINT: &str = "https://api.weixin.qq.com";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub tls_cert: Option<String>,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }
}

impl Default for ClientConfig {
    fn default() -> ClientConfig {
        ClientConfig::builder().build()
    }
}

pub struct ClientConfigBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    tls_cert: Option<String>,
}

impl ClientConfigBuilder {
    pub fn new() -> ClientConfigBuilder {
        ClientConfigBuilder {
            endpoint: None,
            timeout: None,
            tls_cert: None,
        }
    }

    /// Overrides the API entry point, e.g. to hit a regional gateway or a
    /// local stub.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> ClientConfigBuilder {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> ClientConfigBuilder {
        self.timeout = Some(timeout);
        self
    }

    /// Path to an additional PEM root certificate to trust.
    pub fn tls_cert_opt(mut self, cert: Option<String>) -> ClientConfigBuilder {
        self.tls_cert = cert;
        self
    }

    pub fn build(self) -> ClientConfig {
        ClientConfig {
            endpoint: self.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout: self.timeout.unwrap_or(Duration::from_secs(30)), // 30s by default
            tls_cert: self.tls_cert,
        }
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }
}
