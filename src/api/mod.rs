pub mod collection;
pub mod database;
pub mod function;
pub mod migrate;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub(crate) const DATABASE_MIGRATE_IMPORT: &str = "/tcb/databasemigrateimport";
pub(crate) const DATABASE_MIGRATE_EXPORT: &str = "/tcb/databasemigrateexport";
pub(crate) const DATABASE_MIGRATE_QUERY_INFO: &str = "/tcb/databasemigratequeryinfo";
pub(crate) const DATABASE_COLLECTION_ADD: &str = "/tcb/databasecollectionadd";
pub(crate) const DATABASE_COLLECTION_DELETE: &str = "/tcb/databasecollectiondelete";
pub(crate) const DATABASE_COLLECTION_GET: &str = "/tcb/databasecollectionget";
pub(crate) const DATABASE_ADD: &str = "/tcb/databaseadd";
pub(crate) const DATABASE_DELETE: &str = "/tcb/databasedelete";
pub(crate) const DATABASE_UPDATE: &str = "/tcb/databaseupdate";
pub(crate) const DATABASE_QUERY: &str = "/tcb/databasequery";
pub(crate) const DATABASE_COUNT: &str = "/tcb/databasecount";
pub(crate) const INVOKE_CLOUD_FUNCTION: &str = "/tcb/invokecloudfunction";

/// The error pair present in every response body. Code `0` means success;
/// anything else is a rejection by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonError {
    #[serde(default)]
    pub errcode: i64,
    #[serde(default)]
    pub errmsg: String,
}

/// Response types carry the common error pair alongside their own fields.
pub(crate) trait Envelope {
    fn common(&self) -> &CommonError;
}

/// Parses response bytes and inspects the embedded error code.
///
/// Parse failure and remote rejection come back as different error classes;
/// a caller must be able to tell a contract mismatch from a legitimate "no".
pub(crate) fn decode_envelope<T>(raw: &Bytes) -> Result<T, Error>
where
    T: DeserializeOwned + Envelope,
{
    let parsed: T = serde_json::from_slice(raw).map_err(|e| Error::Decode {
        source: e,
        raw: raw.clone(),
    })?;
    let common = parsed.common();
    if common.errcode != 0 {
        return Err(Error::Remote {
            code: common.errcode,
            message: common.errmsg.clone(),
        });
    }
    Ok(parsed)
}

/// Wraps operation parameters with the top-level `env` field every request
/// body must carry.
#[derive(Debug, Serialize)]
pub(crate) struct EnvScoped<'a, T: Serialize> {
    #[serde(flatten)]
    pub params: &'a T,
    pub env: &'a str,
}

/// Endpoints authenticate through the query string, not a header.
pub(crate) fn endpoint_url(endpoint: &str, path: &str, token: &str) -> String {
    format!("{}{}?access_token={}", endpoint, path, token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(flatten)]
        common: CommonError,
        #[serde(default)]
        job_id: i64,
    }

    impl Envelope for Probe {
        fn common(&self) -> &CommonError {
            &self.common
        }
    }

    #[test]
    fn zero_errcode_yields_payload() {
        let raw = Bytes::from_static(br#"{"errcode":0,"errmsg":"","job_id":555}"#);
        let probe: Probe = decode_envelope(&raw).unwrap();
        assert_eq!(probe.job_id, 555);
    }

    #[test]
    fn nonzero_errcode_yields_remote_error() {
        let raw = Bytes::from_static(br#"{"errcode":1,"errmsg":"job not found"}"#);
        let err = decode_envelope::<Probe>(&raw).unwrap_err();
        match err {
            Error::Remote { code, message } => {
                assert_eq!(code, 1);
                assert_eq!(message, "job not found");
            }
            other => panic!("expected Remote, got {other:?}"),
        }
    }

    #[test]
    fn malformed_bytes_yield_decode_error_with_raw_payload() {
        let raw = Bytes::from_static(b"<html>502 Bad Gateway</html>");
        let err = decode_envelope::<Probe>(&raw).unwrap_err();
        match err {
            Error::Decode { raw: kept, .. } => assert_eq!(kept, raw),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn env_scoped_puts_env_at_top_level() {
        #[derive(Serialize)]
        struct Params {
            collection_name: &'static str,
        }

        let body = serde_json::to_value(EnvScoped {
            params: &Params {
                collection_name: "orders",
            },
            env: "env-1",
        })
        .unwrap();
        assert_eq!(body, json!({"collection_name": "orders", "env": "env-1"}));
    }

    #[test]
    fn env_scoped_is_deterministic() {
        #[derive(Serialize)]
        struct Params {
            limit: i64,
            offset: i64,
        }

        let params = Params {
            limit: 10,
            offset: 20,
        };
        let a = serde_json::to_string(&EnvScoped {
            params: &params,
            env: "env-1",
        })
        .unwrap();
        let b = serde_json::to_string(&EnvScoped {
            params: &params,
            env: "env-1",
        })
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn endpoint_url_attaches_token() {
        let url = endpoint_url(
            "https://api.weixin.qq.com",
            DATABASE_MIGRATE_IMPORT,
            "TOKEN",
        );
        assert_eq!(
            url,
            "https://api.weixin.qq.com/tcb/databasemigrateimport?access_token=TOKEN"
        );
    }
}
