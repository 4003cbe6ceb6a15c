//! Client for a cloud document database's HTTP API: bulk import/export
//! migration jobs with status polling, collection management, document
//! operations and cloud function invocation, every call scoped to one
//! environment.

pub mod api;
pub mod client;
pub mod error;
pub mod poll;

pub use api::collection::{CollectionInfo, CollectionList, Pager};
pub use api::database::{DocumentPage, DocumentUpdateResult};
pub use api::function::FunctionResult;
pub use api::migrate::{ConflictMode, ExportJobSpec, FileType, ImportJobSpec, MigrationStatus};
pub use api::CommonError;
pub use client::auth::{AccessTokenProvider, StaticToken};
pub use client::config::{ClientConfig, ClientConfigBuilder};
pub use client::transport::{JsonPoster, ReqwestPoster};
pub use client::Cloud;
pub use error::{BoxError, Error};
pub use poll::{wait_for_migration, PollOptions};
