#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use cloudbase_client::{AccessTokenProvider, Cloud, Error, JsonPoster, StaticToken};

/// Transport fake: records every call and replays scripted response bodies.
pub struct FakePoster {
    calls: Mutex<Vec<(String, Value)>>,
    responses: Mutex<VecDeque<Bytes>>,
    fallback: Option<Bytes>,
}

impl FakePoster {
    /// Replays `bodies` in order; panics if a test makes more calls than it
    /// scripted.
    pub fn with_responses(bodies: &[&str]) -> Arc<FakePoster> {
        Arc::new(FakePoster {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(bodies.iter().map(|b| Bytes::copy_from_slice(b.as_bytes())).collect()),
            fallback: None,
        })
    }

    /// Answers every call with the same body, forever. For polling tests
    /// that end through cancellation or a deadline.
    pub fn repeating(body: &str) -> Arc<FakePoster> {
        Arc::new(FakePoster {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
            fallback: Some(Bytes::copy_from_slice(body.as_bytes())),
        })
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl JsonPoster for FakePoster {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Bytes, Error> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));
        if let Some(next) = self.responses.lock().unwrap().pop_front() {
            return Ok(next);
        }
        match &self.fallback {
            Some(body) => Ok(body.clone()),
            None => panic!("FakePoster ran out of scripted responses"),
        }
    }
}

/// Transport fake that fails every call at the network level.
pub struct BrokenPoster;

#[async_trait]
impl JsonPoster for BrokenPoster {
    async fn post_json(&self, url: &str, _body: &Value) -> Result<Bytes, Error> {
        // Mirror the real HttpPoster, which redacts the query string (and thus
        // the access token) before surfacing a transport failure.
        let redacted = url.split('?').next().unwrap_or(url);
        Err(Error::transport(redacted, "connection reset by peer"))
    }
}

/// Token provider whose backend is down.
pub struct FailingTokens;

#[async_trait]
impl AccessTokenProvider for FailingTokens {
    async fn access_token(&self) -> Result<String, Error> {
        Err(Error::auth("token backend down"))
    }
}

pub const TEST_ENV: &str = "env-1";
pub const TEST_ENDPOINT: &str = "https://api.example.com";

/// Client against the given transport, env `env-1`, fixed token `TOKEN`.
pub fn cloud_with(poster: Arc<FakePoster>) -> Cloud {
    Cloud::with_poster(
        TEST_ENV,
        TEST_ENDPOINT,
        Arc::new(StaticToken::new("TOKEN")),
        poster,
    )
}

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}
