//! Storage subsystem for flatdb
//!
//! Each collection lives in its own JSON file holding the whole collection
//! document. Every mutation is a load, an in-memory change and a full
//! rewrite of the file.

mod accessor;
mod collection;
mod errors;

pub use accessor::{load, project_document, save};
pub use collection::{
    document_of, next_id, parse_id, project, record_id, records_of, replace_records,
    CollectionKind, Record, POST_FIELDS, USER_FIELDS,
};
pub use errors::{StorageError, StorageResult};
