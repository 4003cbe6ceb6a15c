use log::debug;
use serde::{Deserialize, Serialize, Serializer};

use crate::api::{self, CommonError, Envelope};
use crate::client::Cloud;
use crate::error::Error;

/// Format of an import or export file. Serializes as the wire integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Json = 1,
    Csv = 2,
}

impl Serialize for FileType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(*self as i8)
    }
}

/// Policy for key collisions during import: `Insert` fails on a duplicate,
/// `Upsert` overwrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictMode {
    Insert = 1,
    Upsert = 2,
}

impl Serialize for ConflictMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(*self as i8)
    }
}

/// Parameters for a bulk import job.
///
/// The source file must already exist in the environment's object store;
/// the service rejects paths it cannot find.
#[derive(Debug, Clone, Serialize)]
pub struct ImportJobSpec {
    pub collection_name: String,
    pub file_path: String,
    pub file_type: FileType,
    /// Stop at the first bad record instead of importing the rest.
    pub stop_on_error: bool,
    pub conflict_mode: ConflictMode,
}

impl ImportJobSpec {
    fn validate(&self) -> Result<(), Error> {
        if self.collection_name.is_empty() {
            return Err(Error::InvalidSpec("collection_name must not be empty".into()));
        }
        if self.file_path.is_empty() {
            return Err(Error::InvalidSpec("file_path must not be empty".into()));
        }
        Ok(())
    }
}

/// Parameters for a bulk export job. The file lands in the environment's
/// object store under `file_path`.
#[derive(Debug, Clone, Serialize)]
pub struct ExportJobSpec {
    pub file_path: String,
    pub file_type: FileType,
    /// Filter statement in the remote query language, passed through
    /// verbatim and uninterpreted.
    pub query: String,
}

impl ExportJobSpec {
    fn validate(&self) -> Result<(), Error> {
        if self.file_path.is_empty() {
            return Err(Error::InvalidSpec("file_path must not be empty".into()));
        }
        if self.query.is_empty() {
            return Err(Error::InvalidSpec("query must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct JobCreated {
    #[serde(flatten)]
    common: CommonError,
    #[serde(default)]
    job_id: i64,
}

impl Envelope for JobCreated {
    fn common(&self) -> &CommonError {
        &self.common
    }
}

#[derive(Debug, Serialize)]
struct MigrateStatusParams {
    job_id: i64,
}

#[derive(Debug, Deserialize)]
struct MigrateStatusResp {
    #[serde(flatten)]
    common: CommonError,
    #[serde(default)]
    status: String,
    #[serde(default)]
    record_success: i64,
    #[serde(default)]
    record_fail: i64,
    #[serde(default)]
    err_msg: String,
    #[serde(default)]
    file_url: String,
}

impl Envelope for MigrateStatusResp {
    fn common(&self) -> &CommonError {
        &self.common
    }
}

/// Point-in-time view of a migration job. All state lives on the service;
/// every query fetches it fresh, nothing is cached client-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Status string as reported by the service. Not a closed set; match
    /// with [`MigrationStatus::is_terminal`] rather than by hand.
    pub status: String,
    pub record_success: i64,
    pub record_fail: i64,
    /// Failure detail for jobs that went wrong, empty otherwise.
    pub err_msg: String,
    /// Download URL of the result file once an export has finished.
    pub file_url: String,
}

impl MigrationStatus {
    /// Whether the job has finished, successfully or not. Status strings
    /// this client does not know are treated as still running.
    pub fn is_terminal(&self) -> bool {
        self.status.eq_ignore_ascii_case("success") || self.status.eq_ignore_ascii_case("fail")
    }

    pub fn succeeded(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }
}

impl Cloud {
    /// Submits a bulk import job and returns its job id.
    ///
    /// The job runs server-side; observe it with [`Cloud::migrate_status`]
    /// or [`crate::poll::wait_for_migration`].
    pub async fn database_import(&self, spec: &ImportJobSpec) -> Result<i64, Error> {
        spec.validate()?;
        let res: JobCreated = self.call(api::DATABASE_MIGRATE_IMPORT, spec).await?;
        debug!(
            "import job {} submitted for collection {}",
            res.job_id, spec.collection_name
        );
        Ok(res.job_id)
    }

    /// Submits a bulk export job and returns its job id.
    pub async fn database_export(&self, spec: &ExportJobSpec) -> Result<i64, Error> {
        spec.validate()?;
        let res: JobCreated = self.call(api::DATABASE_MIGRATE_EXPORT, spec).await?;
        debug!("export job {} submitted to {}", res.job_id, spec.file_path);
        Ok(res.job_id)
    }

    /// Reads the current status of a migration job. A single point-in-time
    /// query; polling cadence is the caller's decision.
    pub async fn migrate_status(&self, job_id: i64) -> Result<MigrationStatus, Error> {
        let res: MigrateStatusResp = self
            .call(api::DATABASE_MIGRATE_QUERY_INFO, &MigrateStatusParams { job_id })
            .await?;
        Ok(MigrationStatus {
            status: res.status,
            record_success: res.record_success,
            record_fail: res.record_fail,
            err_msg: res.err_msg,
            file_url: res.file_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn import_spec() -> ImportJobSpec {
        ImportJobSpec {
            collection_name: "orders".to_string(),
            file_path: "import/orders.json".to_string(),
            file_type: FileType::Json,
            stop_on_error: true,
            conflict_mode: ConflictMode::Upsert,
        }
    }

    #[test]
    fn enums_serialize_as_wire_integers() {
        assert_eq!(serde_json::to_value(FileType::Json).unwrap(), json!(1));
        assert_eq!(serde_json::to_value(FileType::Csv).unwrap(), json!(2));
        assert_eq!(serde_json::to_value(ConflictMode::Insert).unwrap(), json!(1));
        assert_eq!(serde_json::to_value(ConflictMode::Upsert).unwrap(), json!(2));
    }

    #[test]
    fn import_spec_serializes_wire_fields() {
        let body = serde_json::to_value(import_spec()).unwrap();
        assert_eq!(
            body,
            json!({
                "collection_name": "orders",
                "file_path": "import/orders.json",
                "file_type": 1,
                "stop_on_error": true,
                "conflict_mode": 2,
            })
        );
    }

    #[test]
    fn empty_collection_name_is_rejected() {
        let mut spec = import_spec();
        spec.collection_name.clear();
        assert!(matches!(spec.validate(), Err(Error::InvalidSpec(_))));
    }

    #[test]
    fn empty_file_path_is_rejected() {
        let mut spec = import_spec();
        spec.file_path.clear();
        assert!(matches!(spec.validate(), Err(Error::InvalidSpec(_))));
    }

    #[test]
    fn export_spec_requires_path_and_query() {
        let spec = ExportJobSpec {
            file_path: String::new(),
            file_type: FileType::Csv,
            query: "db.collection('orders').get()".to_string(),
        };
        assert!(matches!(spec.validate(), Err(Error::InvalidSpec(_))));

        let spec = ExportJobSpec {
            file_path: "export/orders.csv".to_string(),
            file_type: FileType::Csv,
            query: String::new(),
        };
        assert!(matches!(spec.validate(), Err(Error::InvalidSpec(_))));
    }

    fn status(s: &str) -> MigrationStatus {
        MigrationStatus {
            status: s.to_string(),
            record_success: 0,
            record_fail: 0,
            err_msg: String::new(),
            file_url: String::new(),
        }
    }

    #[test]
    fn terminal_statuses() {
        assert!(status("success").is_terminal());
        assert!(status("FAIL").is_terminal());
        assert!(status("Success").succeeded());
        assert!(!status("fail").succeeded());
    }

    #[test]
    fn unknown_statuses_are_not_terminal() {
        assert!(!status("running").is_terminal());
        assert!(!status("waiting").is_terminal());
        assert!(!status("some-future-state").is_terminal());
        assert!(!status("").is_terminal());
    }
}
