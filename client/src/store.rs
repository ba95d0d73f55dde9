//! # Bills Store
//!
//! The remote store holding bill records is consumed through the
//! [`BillStore`] trait so the listing engine and the new-bill workflow work
//! the same against the HTTP API in the browser and against fakes in tests.
//!
//! Futures are not `Send`: everything runs on the browser's single event loop.

use async_trait::async_trait;
use shared::{Bill, CreatedBill};

use crate::error::StoreError;

/// A supporting document selected by the user
#[derive(Debug, Clone, PartialEq)]
pub struct Justificatif {
    /// File name as reported by the file input, possibly a browser path
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Multipart payload of the create call: the file and its owner
#[derive(Debug, Clone, PartialEq)]
pub struct BillUpload {
    pub file: Justificatif,
    pub email: String,
}

/// Per-resource operations over the "bills" collection
#[async_trait(?Send)]
pub trait BillStore {
    /// Full collection visible to the current user
    async fn list(&self) -> Result<Vec<Bill>, StoreError>;

    /// Persist a draft holding only the uploaded file and its owner
    async fn create(&self, upload: BillUpload) -> Result<CreatedBill, StoreError>;

    /// Replace the record `id` with `bill`
    async fn update(&self, id: &str, bill: &Bill) -> Result<Bill, StoreError>;
}
