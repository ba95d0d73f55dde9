//! UI bindings the containers drive.
//!
//! The containers never touch the DOM. They read form state and push UI
//! changes through these traits, which the yew front end implements over
//! component state and the tests implement over plain cells.

use shared::{parse_integer, Bill, BillStatus, DEFAULT_PCT};

use crate::containers::new_bill::Attachment;

/// Pages reachable from the employee area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Bills,
    NewBill,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "#employee/bills" => Some(Route::Bills),
            "#employee/bill/new" => Some(Route::NewBill),
            _ => None,
        }
    }
}

pub trait Navigator {
    fn navigate(&self, route: Route);
}

/// The submit event of the new bill form
pub trait SubmitEvent {
    fn prevent_default(&self);
}

/// Raw values of the new bill form controls, as typed by the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewBillFields {
    /// `expense-type`
    pub expense_type: String,
    /// `expense-name`
    pub name: String,
    pub amount: String,
    /// `datepicker`
    pub date: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

impl NewBillFields {
    /// Build the finalized record for `attachment`, owned by `email`.
    ///
    /// `amount` that does not parse is 0; `pct` that is empty, zero or does
    /// not parse falls back to [`DEFAULT_PCT`].
    pub fn into_bill(self, email: String, attachment: &Attachment) -> Bill {
        Bill {
            id: None,
            email,
            expense_type: self.expense_type,
            name: self.name,
            amount: parse_integer(&self.amount).unwrap_or(0),
            date: self.date,
            vat: self.vat.trim().parse::<f64>().ok(),
            pct: parse_integer(&self.pct)
                .filter(|pct| *pct != 0)
                .unwrap_or(DEFAULT_PCT),
            commentary: self.commentary,
            file_url: Some(attachment.file_url.clone()),
            file_name: Some(attachment.file_name.clone()),
            status: BillStatus::Pending,
            comment_admin: Vec::new(),
        }
    }
}

/// The new bill page
pub trait NewBillView {
    /// False once the page has been torn down; late responses must not touch it
    fn is_mounted(&self) -> bool;

    fn clear_file_input(&self);

    /// Show or hide the inline "wrong file type" indicator
    fn set_file_error(&self, visible: bool);

    fn form_fields(&self) -> NewBillFields;
}

/// Content of the justificatif modal
#[derive(Debug, Clone, PartialEq)]
pub struct ProofModal {
    /// Empty when the bill has no file, which renders a broken image
    pub image_url: String,
    pub image_width: u32,
}

/// The bills page
pub trait BillsView {
    /// Current width of the justificatif modal, in CSS pixels
    fn modal_width(&self) -> f64;

    fn show_proof(&self, modal: ProofModal);
}
