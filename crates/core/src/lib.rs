//! Core media lifecycle logic for Atelier.
//!
//! This crate contains pure logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `storage` - Blob store adapter over OpenDAL (S3-compatible or local fs)
//! - `attachment` - Replace-on-update media attachment lifecycle

pub mod attachment;
pub mod storage;
