//! # Billed client
//!
//! Bill listing and new-bill submission for the employee area, written
//! against injected collaborators (remote store, session, UI bindings) so it
//! runs the same in the browser and in tests.

pub mod containers;
pub mod error;
pub mod session;
pub mod store;
pub mod view;

#[cfg(test)]
mod test_utils;

pub use containers::{
    AttachOutcome, Attachment, BillsContainer, BillsPageState, DraftState, NewBillWorkflow,
    SubmitOutcome,
};
pub use error::{SessionError, StoreError};
pub use session::{KeyValueStore, SessionContext, StoredSession};
pub use store::{BillStore, BillUpload, Justificatif};
pub use view::{
    BillsView, Navigator, NewBillFields, NewBillView, ProofModal, Route, SubmitEvent,
};
