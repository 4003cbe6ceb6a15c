use serde::{Deserialize, Serialize};

use crate::api::{self, CommonError, Envelope};
use crate::client::Cloud;
use crate::error::Error;

/// Per-collection statistics as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    /// Number of documents.
    #[serde(default)]
    pub count: i64,
    /// Storage size in bytes.
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub index_count: i64,
    /// Index size in bytes.
    #[serde(default)]
    pub index_size: i64,
}

/// Pagination window echoed by listing calls. PascalCase on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Pager {
    pub offset: i64,
    pub limit: i64,
    pub total: i64,
}

/// One page of collections; drive further pages by bumping `offset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionList {
    pub pager: Pager,
    pub collections: Vec<CollectionInfo>,
}

#[derive(Debug, Serialize)]
struct CollectionParams<'a> {
    collection_name: &'a str,
}

#[derive(Debug, Serialize)]
struct ListParams {
    limit: i64,
    offset: i64,
}

// Envelope-only response for add/delete.
#[derive(Debug, Deserialize)]
struct Acked {
    #[serde(flatten)]
    common: CommonError,
}

impl Envelope for Acked {
    fn common(&self) -> &CommonError {
        &self.common
    }
}

#[derive(Debug, Deserialize)]
struct CollectionGetResp {
    #[serde(flatten)]
    common: CommonError,
    #[serde(default)]
    pager: Pager,
    #[serde(default)]
    collections: Vec<CollectionInfo>,
}

impl Envelope for CollectionGetResp {
    fn common(&self) -> &CommonError {
        &self.common
    }
}

impl Cloud {
    /// Creates a collection. Duplicate names come back as a remote error.
    pub async fn collection_add(&self, name: &str) -> Result<(), Error> {
        let _: Acked = self
            .call(
                api::DATABASE_COLLECTION_ADD,
                &CollectionParams { collection_name: name },
            )
            .await?;
        Ok(())
    }

    /// Deletes a collection and everything in it.
    pub async fn collection_delete(&self, name: &str) -> Result<(), Error> {
        let _: Acked = self
            .call(
                api::DATABASE_COLLECTION_DELETE,
                &CollectionParams { collection_name: name },
            )
            .await?;
        Ok(())
    }

    /// Lists collections in the environment, `limit` entries starting at
    /// `offset`. An error is reported only for a nonzero error code; a
    /// success with an empty message is just a success.
    pub async fn collection_list(&self, limit: i64, offset: i64) -> Result<CollectionList, Error> {
        let res: CollectionGetResp = self
            .call(api::DATABASE_COLLECTION_GET, &ListParams { limit, offset })
            .await?;
        Ok(CollectionList {
            pager: res.pager,
            collections: res.collections,
        })
    }
}
