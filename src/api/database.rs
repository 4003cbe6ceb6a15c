//! Document-level operations. Statements are opaque strings in the remote
//! query language; this client never interprets them.

use serde::{Deserialize, Serialize};

use crate::api::{self, CommonError, Envelope};
use crate::api::collection::Pager;
use crate::client::Cloud;
use crate::error::Error;

#[derive(Debug, Serialize)]
struct QueryParams<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct AddResp {
    #[serde(flatten)]
    common: CommonError,
    #[serde(default)]
    id_list: Vec<String>,
}

impl Envelope for AddResp {
    fn common(&self) -> &CommonError {
        &self.common
    }
}

#[derive(Debug, Deserialize)]
struct DeleteResp {
    #[serde(flatten)]
    common: CommonError,
    #[serde(default)]
    deleted: i64,
}

impl Envelope for DeleteResp {
    fn common(&self) -> &CommonError {
        &self.common
    }
}

#[derive(Debug, Deserialize)]
struct UpdateResp {
    #[serde(flatten)]
    common: CommonError,
    #[serde(default)]
    matched: i64,
    #[serde(default)]
    modified: i64,
    #[serde(default)]
    id: String,
}

impl Envelope for UpdateResp {
    fn common(&self) -> &CommonError {
        &self.common
    }
}

#[derive(Debug, Deserialize)]
struct QueryResp {
    #[serde(flatten)]
    common: CommonError,
    #[serde(default)]
    pager: Pager,
    #[serde(default)]
    data: Vec<String>,
}

impl Envelope for QueryResp {
    fn common(&self) -> &CommonError {
        &self.common
    }
}

#[derive(Debug, Deserialize)]
struct CountResp {
    #[serde(flatten)]
    common: CommonError,
    #[serde(default)]
    count: i64,
}

impl Envelope for CountResp {
    fn common(&self) -> &CommonError {
        &self.common
    }
}

/// Outcome of an update statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpdateResult {
    pub matched: i64,
    pub modified: i64,
    /// Id of the upserted document, when the statement created one.
    pub id: String,
}

/// One page of query results; each row is the document as an uninterpreted
/// JSON string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPage {
    pub pager: Pager,
    pub data: Vec<String>,
}

impl Cloud {
    /// Runs an insert statement and returns the ids of the new documents.
    pub async fn database_add(&self, query: &str) -> Result<Vec<String>, Error> {
        let res: AddResp = self.call(api::DATABASE_ADD, &QueryParams { query }).await?;
        Ok(res.id_list)
    }

    /// Runs a delete statement and returns the number of removed documents.
    pub async fn database_delete(&self, query: &str) -> Result<i64, Error> {
        let res: DeleteResp = self.call(api::DATABASE_DELETE, &QueryParams { query }).await?;
        Ok(res.deleted)
    }

    /// Runs an update statement.
    pub async fn database_update(&self, query: &str) -> Result<DocumentUpdateResult, Error> {
        let res: UpdateResp = self.call(api::DATABASE_UPDATE, &QueryParams { query }).await?;
        Ok(DocumentUpdateResult {
            matched: res.matched,
            modified: res.modified,
            id: res.id,
        })
    }

    /// Runs a read statement and returns one page of matching documents.
    pub async fn database_query(&self, query: &str) -> Result<DocumentPage, Error> {
        let res: QueryResp = self.call(api::DATABASE_QUERY, &QueryParams { query }).await?;
        Ok(DocumentPage {
            pager: res.pager,
            data: res.data,
        })
    }

    /// Counts the documents a statement matches.
    pub async fn database_count(&self, query: &str) -> Result<i64, Error> {
        let res: CountResp = self.call(api::DATABASE_COUNT, &QueryParams { query }).await?;
        Ok(res.count)
    }
}
