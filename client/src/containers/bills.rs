//! Bills listing domain logic.
//!
//! Fetches the user's bills, formats them for display, orders them most
//! recent first and handles the row interactions of the bills page.
//!
//! ## Key Responsibilities
//!
//! - **Listing**: one `list()` call per load, formatted and sorted
//! - **Resilience**: a record whose date does not parse is shown with its raw
//!   date instead of breaking the page
//! - **Proof viewing**: opening the justificatif modal for a row
//! - **Navigation**: the "new bill" button

use std::rc::Rc;

use log::{debug, info, warn};
use shared::FormattedBill;

use crate::error::StoreError;
use crate::store::BillStore;
use crate::view::{BillsView, Navigator, ProofModal, Route};

/// What the bills page shows
#[derive(Debug, Clone, PartialEq)]
pub enum BillsPageState {
    Loading,
    Loaded(Vec<FormattedBill>),
    /// The store's message, shown verbatim on the error page
    Failed(String),
}

impl From<Result<Vec<FormattedBill>, StoreError>> for BillsPageState {
    fn from(result: Result<Vec<FormattedBill>, StoreError>) -> Self {
        match result {
            Ok(bills) => BillsPageState::Loaded(bills),
            Err(e) => BillsPageState::Failed(e.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct BillsContainer {
    store: Option<Rc<dyn BillStore>>,
    navigator: Rc<dyn Navigator>,
}

impl BillsContainer {
    pub fn new(store: Option<Rc<dyn BillStore>>, navigator: Rc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    /// Fetch and format the bills, most recent first.
    ///
    /// Sorting compares the raw ISO dates and is stable, so bills sharing a
    /// date keep the order the store returned them in. Without a store the
    /// list is empty; a store failure is returned untouched.
    pub async fn get_bills(&self) -> Result<Vec<FormattedBill>, StoreError> {
        let Some(store) = &self.store else {
            debug!("No bills store bound, nothing to list");
            return Ok(Vec::new());
        };

        let mut bills = store.list().await?;
        bills.sort_by(|a, b| b.date.cmp(&a.date));

        let formatted = bills
            .into_iter()
            .map(|bill| {
                let (formatted, error) = FormattedBill::from_bill(bill);
                if let Some(e) = error {
                    warn!("{} for bill {:?}", e, formatted.bill.id);
                }
                formatted
            })
            .collect::<Vec<_>>();

        info!("Listed {} bills", formatted.len());
        Ok(formatted)
    }

    /// Load the page content
    pub async fn load(&self) -> BillsPageState {
        self.get_bills().await.into()
    }

    pub fn handle_click_new_bill(&self) {
        self.navigator.navigate(Route::NewBill);
    }

    /// Open the justificatif modal for the row whose eye icon was clicked.
    ///
    /// The image takes half the modal's width.
    pub fn handle_click_icon_eye(&self, view: &dyn BillsView, file_url: Option<&str>) {
        let image_width = (view.modal_width() * 0.5).floor().max(0.0) as u32;
        let image_url = file_url.unwrap_or_default().to_string();
        if image_url.is_empty() {
            warn!("Bill has no justificatif to show");
        }

        view.show_proof(ProofModal {
            image_url,
            image_width,
        });
    }
}
