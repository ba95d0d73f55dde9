//! Page containers: the logic behind the bills page and the new bill page.

pub mod bills;
pub mod new_bill;

pub use bills::{BillsContainer, BillsPageState};
pub use new_bill::{AttachOutcome, Attachment, DraftState, NewBillWorkflow, SubmitOutcome};
