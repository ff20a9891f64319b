//! # simref-storage
//!
//! SQLite implementations of the simref-core seams: reference-field reads
//! (target resolution + overlap lookup), the field catalog, and a listing
//! executor that turns a query plan into a runnable SELECT. All reads are
//! blocking and request-scoped; nothing here writes entity data.

pub mod catalog;
pub mod listing;
pub mod store;

pub use catalog::SqliteFieldCatalog;
pub use listing::{ListingQuery, ListingRow};
pub use store::SqliteReferenceStore;

use simref_core::SimrefError;

pub(crate) fn to_storage_err(message: String) -> SimrefError {
    SimrefError::Storage { message }
}
