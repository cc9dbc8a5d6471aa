//! Media attachment lifecycle.
//!
//! This module owns the replace-on-update pattern shared by every content
//! type with media:
//! - upload the incoming file under a namespaced, timestamp-prefixed key
//! - swap the record's reference to the new object
//! - delete the previously referenced object, at most once
//!
//! Upload always happens before delete, so a failed upload never destroys a
//! live attachment. Delete failures are logged and swallowed: a stale orphan
//! is preferred over data loss.

mod error;
mod service;
mod types;

pub use error::AttachmentError;
pub use service::AttachmentManager;
pub use types::{MediaRef, UploadedFile};
