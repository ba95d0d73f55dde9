//! New bill submission workflow.
//!
//! A bill is created in two phases. Attaching a valid justificatif
//! immediately creates a draft record holding the file and its owner; the
//! form submit then updates that draft with every other field. A draft whose
//! form is abandoned stays in the store as is.
//!
//! ```text
//! Empty ──select valid file──▶ FileAttaching ──create ok──▶ FileAttached
//!   ▲  ◀──invalid file / create failed──┘                      │ submit
//!   │                                                          ▼
//!   └──────────────────────────── Done ◀──update ok── Submitting
//!                                              update failed ──▶ FileAttached
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, error, info, warn};
use shared::{file_name_from_path, is_acceptable_file};

use crate::error::{SessionError, StoreError};
use crate::session::SessionContext;
use crate::store::{BillStore, BillUpload, Justificatif};
use crate::view::{Navigator, NewBillView, Route, SubmitEvent};

/// The stored justificatif a draft record points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Draft record id, the target of the final update
    pub id: String,
    pub file_url: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DraftState {
    #[default]
    Empty,
    FileAttaching,
    FileAttached(Attachment),
    Submitting(Attachment),
    Done,
}

impl DraftState {
    pub fn attachment(&self) -> Option<&Attachment> {
        match self {
            DraftState::FileAttached(attachment) | DraftState::Submitting(attachment) => {
                Some(attachment)
            }
            _ => None,
        }
    }
}

/// Result of selecting a file
#[derive(Debug, Clone, PartialEq)]
pub enum AttachOutcome {
    Attached(Attachment),
    /// Wrong extension; the input was cleared and the indicator shown
    InvalidFile,
    /// A submit is in flight, the selection was ignored
    Busy,
    /// A newer selection was made while this one was uploading; its result
    /// was dropped
    Superseded,
    NoSession(SessionError),
    /// The create call failed; logged, the draft has no id
    Failed(StoreError),
}

/// Result of submitting the form
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted,
    /// No justificatif was attached successfully, nothing was sent
    NoAttachment,
    Busy,
    NoSession(SessionError),
    /// The update call failed; logged, the form stays in place
    Failed(StoreError),
}

pub struct NewBillWorkflow {
    store: Rc<dyn BillStore>,
    session: Rc<dyn SessionContext>,
    navigator: Rc<dyn Navigator>,
    state: RefCell<DraftState>,
    /// Bumped on every file selection; a create answer is only kept when it
    /// belongs to the latest one
    selection: Cell<u64>,
}

impl NewBillWorkflow {
    pub fn new(
        store: Rc<dyn BillStore>,
        session: Rc<dyn SessionContext>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            session,
            navigator,
            state: RefCell::new(DraftState::Empty),
            selection: Cell::new(0),
        }
    }

    pub fn state(&self) -> DraftState {
        self.state.borrow().clone()
    }

    fn set_state(&self, state: DraftState) {
        *self.state.borrow_mut() = state;
    }

    /// Handle a new selection in the file input.
    ///
    /// A valid file is uploaded right away, before the rest of the form is
    /// filled in, and the returned draft id is kept for the submit.
    pub async fn handle_change_file(
        &self,
        view: &dyn NewBillView,
        file: Justificatif,
    ) -> AttachOutcome {
        if matches!(*self.state.borrow(), DraftState::Submitting(_)) {
            debug!("Ignoring file selection while submitting");
            return AttachOutcome::Busy;
        }
        let selection = self.selection.get() + 1;
        self.selection.set(selection);

        let file_name = file_name_from_path(&file.file_name).to_string();
        if !is_acceptable_file(&file_name) {
            info!("Rejected justificatif '{}': not a jpg, jpeg or png", file_name);
            view.clear_file_input();
            view.set_file_error(true);
            self.set_state(DraftState::Empty);
            return AttachOutcome::InvalidFile;
        }
        view.set_file_error(false);

        let email = match self.session.current_user() {
            Ok(user) => user.email,
            Err(e) => {
                error!("Cannot attach justificatif: {}", e);
                return AttachOutcome::NoSession(e);
            }
        };

        self.set_state(DraftState::FileAttaching);
        let upload = BillUpload {
            file: Justificatif {
                file_name: file_name.clone(),
                ..file
            },
            email,
        };

        let result = self.store.create(upload).await;
        if self.selection.get() != selection {
            debug!("Dropping upload result for '{}', a newer file was selected", file_name);
            return AttachOutcome::Superseded;
        }

        match result {
            Ok(created) => {
                let attachment = Attachment {
                    id: created.id,
                    file_url: created.file_url,
                    file_name: created.file_name.unwrap_or(file_name),
                };
                info!("Justificatif '{}' stored as draft {}", attachment.file_name, attachment.id);
                self.set_state(DraftState::FileAttached(attachment.clone()));
                AttachOutcome::Attached(attachment)
            }
            Err(e) => {
                error!("{}", e);
                self.set_state(DraftState::Empty);
                AttachOutcome::Failed(e)
            }
        }
    }

    /// Handle the form submit: finalize the draft and go back to the bills.
    ///
    /// Only a draft with a stored justificatif is ever updated. On failure
    /// the error is logged and the user stays on the form to retry.
    pub async fn handle_submit(
        &self,
        view: &dyn NewBillView,
        event: &dyn SubmitEvent,
    ) -> SubmitOutcome {
        event.prevent_default();

        let attachment = match &*self.state.borrow() {
            DraftState::FileAttached(attachment) => attachment.clone(),
            DraftState::Submitting(_) => return SubmitOutcome::Busy,
            _ => {
                warn!("Submit without an attached justificatif, nothing sent");
                return SubmitOutcome::NoAttachment;
            }
        };

        let email = match self.session.current_user() {
            Ok(user) => user.email,
            Err(e) => {
                error!("Cannot submit bill: {}", e);
                return SubmitOutcome::NoSession(e);
            }
        };

        let bill = view.form_fields().into_bill(email, &attachment);
        self.set_state(DraftState::Submitting(attachment.clone()));

        match self.store.update(&attachment.id, &bill).await {
            Ok(_) => {
                info!("Bill {} submitted", attachment.id);
                self.set_state(DraftState::Done);
                if view.is_mounted() {
                    self.navigator.navigate(Route::Bills);
                } else {
                    debug!("New bill page gone before bill {} was saved", attachment.id);
                }
                SubmitOutcome::Submitted
            }
            Err(e) => {
                error!("{}", e);
                self.set_state(DraftState::FileAttached(attachment));
                SubmitOutcome::Failed(e)
            }
        }
    }
}
