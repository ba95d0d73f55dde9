//! Test doubles for the store, session and UI bindings.
//!
//! Each fake records what the containers asked of it so tests can assert on
//! remote calls, navigation and UI changes without a browser.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde_json::json;
use shared::{Bill, CreatedBill, SessionUser, EMPLOYEE};
use tokio::sync::oneshot;

use crate::error::{SessionError, StoreError};
use crate::session::{KeyValueStore, SessionContext};
use crate::store::{BillStore, BillUpload, Justificatif};
use crate::view::{BillsView, Navigator, NewBillFields, NewBillView, ProofModal, Route, SubmitEvent};

/// `log` backend keeping records per thread, so parallel tests each see
/// only their own
struct CapturingLogger;

static CAPTURING_LOGGER: CapturingLogger = CapturingLogger;

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

/// Start capturing log records on the current thread, dropping earlier ones
pub fn capture_logs() {
    // Only the first test to get here installs the logger
    let _ = log::set_logger(&CAPTURING_LOGGER);
    log::set_max_level(LevelFilter::Trace);
    RECORDS.with(|records| records.borrow_mut().clear());
}

/// Messages logged at `Error` level on the current thread since `capture_logs`
pub fn captured_errors() -> Vec<String> {
    RECORDS.with(|records| {
        records
            .borrow()
            .iter()
            .filter(|(level, _)| *level == Level::Error)
            .map(|(_, message)| message.clone())
            .collect()
    })
}

/// Shared in-memory `localStorage`
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

/// The four bills of the bills API mock
pub fn fixture_bills() -> Vec<Bill> {
    serde_json::from_value(json!([
        {
            "id": "47qAXb6fIm2zOKkLzMro",
            "vat": "80",
            "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a…f-1.jpg?alt=media&token=c1640e12-a24b-4b11-ae52-529112e9602a",
            "status": "pending",
            "type": "Hôtel et logement",
            "commentary": "séminaire billed",
            "name": "encore",
            "fileName": "preview-facture-free-201801-pdf-1.jpg",
            "date": "2004-04-04",
            "amount": 400,
            "commentAdmin": "ok",
            "email": "a@a",
            "pct": 20
        },
        {
            "id": "BeKy5Mo4jkmdfPGYpTxZ",
            "vat": "",
            "amount": 100,
            "name": "test1",
            "fileName": "1592770761.jpeg",
            "commentary": "plop",
            "pct": 20,
            "type": "Transports",
            "email": "a@a",
            "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a…61.jpeg?alt=media&token=7685cd61-c112-42bc-9929-8a799bb82d8b",
            "date": "2001-01-01",
            "status": "refused",
            "commentAdmin": "en fait non"
        },
        {
            "id": "UIUZtnPQvnbFnB0ozvJh",
            "name": "test3",
            "email": "a@a",
            "type": "Services en ligne",
            "vat": "60",
            "pct": 20,
            "commentAdmin": "bon bah d'accord",
            "amount": 300,
            "status": "accepted",
            "date": "2003-03-03",
            "commentary": "",
            "fileName": "facture-client-php-exportee-dans-document-pdf-enregistre-sur-disque-dur.png",
            "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a…dur.png?alt=media&token=571d34cb-9c8f-430a-af52-66221cae1da3"
        },
        {
            "id": "qcCK3SzECmaZAGRrHjaC",
            "status": "refused",
            "pct": 20,
            "amount": 200,
            "email": "a@a",
            "name": "test2",
            "vat": "40",
            "fileName": "preview-facture-free-201801-pdf-1.jpg",
            "date": "2002-02-02",
            "commentAdmin": "pas la bonne facture",
            "commentary": "test2",
            "type": "Restaurants et bars",
            "fileUrl": "https://test.storage.tld/v0/b/billable-677b6.a…f-1.jpg?alt=media&token=4df6ed2c-12c8-42a2-b013-346c1346f732"
        }
    ]))
    .expect("fixture bills are valid")
}

pub fn justificatif(file_name: &str) -> Justificatif {
    Justificatif {
        file_name: file_name.to_string(),
        content_type: None,
        bytes: b"receipt".to_vec(),
    }
}

/// Bills store answering from memory and recording every call
pub struct FakeStore {
    bills: Vec<Bill>,
    created: CreatedBill,
    list_error: Option<StoreError>,
    create_error: Option<StoreError>,
    update_error: RefCell<Option<StoreError>>,
    gate_creates: bool,
    pending_creates: RefCell<Vec<Option<oneshot::Sender<Result<CreatedBill, StoreError>>>>>,
    list_calls: Cell<usize>,
    uploads: RefCell<Vec<BillUpload>>,
    updates: RefCell<Vec<(String, Bill)>>,
}

impl Default for FakeStore {
    fn default() -> Self {
        Self {
            bills: Vec::new(),
            created: CreatedBill {
                id: "1234".to_string(),
                file_url: "https://localhost:3456/images/test.jpg".to_string(),
                file_name: None,
            },
            list_error: None,
            create_error: None,
            update_error: RefCell::new(None),
            gate_creates: false,
            pending_creates: RefCell::new(Vec::new()),
            list_calls: Cell::new(0),
            uploads: RefCell::new(Vec::new()),
            updates: RefCell::new(Vec::new()),
        }
    }
}

impl FakeStore {
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            bills,
            ..Self::default()
        }
    }

    pub fn creating(mut self, created: CreatedBill) -> Self {
        self.created = created;
        self
    }

    pub fn failing_list(mut self, error: StoreError) -> Self {
        self.list_error = Some(error);
        self
    }

    pub fn failing_create(mut self, error: StoreError) -> Self {
        self.create_error = Some(error);
        self
    }

    pub fn failing_update(self, error: StoreError) -> Self {
        *self.update_error.borrow_mut() = Some(error);
        self
    }

    /// Hold every create until the test answers it with `resolve_create`
    pub fn gating_creates(mut self) -> Self {
        self.gate_creates = true;
        self
    }

    /// Creates still waiting for an answer
    pub fn pending_creates(&self) -> usize {
        self.pending_creates.borrow().iter().filter(|gate| gate.is_some()).count()
    }

    /// Answer the `index`-th create call, counting from the first one made
    pub fn resolve_create(&self, index: usize, result: Result<CreatedBill, StoreError>) {
        let gate = self.pending_creates.borrow_mut()[index]
            .take()
            .expect("create already answered");
        let _ = gate.send(result);
    }

    /// Let later updates succeed
    pub fn heal_update(&self) {
        self.update_error.borrow_mut().take();
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    pub fn uploads(&self) -> Vec<BillUpload> {
        self.uploads.borrow().clone()
    }

    pub fn updates(&self) -> Vec<(String, Bill)> {
        self.updates.borrow().clone()
    }
}

#[async_trait(?Send)]
impl BillStore for FakeStore {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        self.list_calls.set(self.list_calls.get() + 1);
        match &self.list_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.bills.clone()),
        }
    }

    async fn create(&self, upload: BillUpload) -> Result<CreatedBill, StoreError> {
        self.uploads.borrow_mut().push(upload);
        if self.gate_creates {
            let (gate, answer) = oneshot::channel();
            self.pending_creates.borrow_mut().push(Some(gate));
            return answer
                .await
                .unwrap_or_else(|_| Err(StoreError::Transport("create abandoned".to_string())));
        }
        match &self.create_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.created.clone()),
        }
    }

    async fn update(&self, id: &str, bill: &Bill) -> Result<Bill, StoreError> {
        self.updates.borrow_mut().push((id.to_string(), bill.clone()));
        if let Some(e) = self.update_error.borrow().as_ref() {
            return Err(e.clone());
        }
        Ok(Bill {
            id: Some(id.to_string()),
            ..bill.clone()
        })
    }
}

pub struct FakeSession {
    user: Option<SessionUser>,
}

impl FakeSession {
    pub fn employee(email: &str) -> Self {
        Self {
            user: Some(SessionUser {
                user_type: EMPLOYEE.to_string(),
                email: email.to_string(),
            }),
        }
    }

    pub fn logged_out() -> Self {
        Self { user: None }
    }
}

impl SessionContext for FakeSession {
    fn current_user(&self) -> Result<SessionUser, SessionError> {
        self.user.clone().ok_or(SessionError::Missing)
    }

    fn token(&self) -> Option<String> {
        None
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: RefCell<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.borrow_mut().push(route);
    }
}

#[derive(Default)]
pub struct RecordingSubmit {
    prevented: Cell<bool>,
}

impl RecordingSubmit {
    pub fn prevented(&self) -> bool {
        self.prevented.get()
    }
}

impl SubmitEvent for RecordingSubmit {
    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}

/// New bill page backed by plain cells
pub struct FakeNewBillView {
    mounted: Cell<bool>,
    file_value: RefCell<String>,
    file_error: Cell<bool>,
    fields: RefCell<NewBillFields>,
}

impl Default for FakeNewBillView {
    fn default() -> Self {
        Self {
            mounted: Cell::new(true),
            file_value: RefCell::new(String::new()),
            file_error: Cell::new(false),
            fields: RefCell::new(NewBillFields::default()),
        }
    }
}

impl FakeNewBillView {
    pub fn select_file(&self, name: &str) {
        *self.file_value.borrow_mut() = name.to_string();
    }

    pub fn file_value(&self) -> String {
        self.file_value.borrow().clone()
    }

    pub fn file_error_visible(&self) -> bool {
        self.file_error.get()
    }

    pub fn fill(&self, fields: NewBillFields) {
        *self.fields.borrow_mut() = fields;
    }

    pub fn unmount(&self) {
        self.mounted.set(false);
    }
}

impl NewBillView for FakeNewBillView {
    fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    fn clear_file_input(&self) {
        self.file_value.borrow_mut().clear();
    }

    fn set_file_error(&self, visible: bool) {
        self.file_error.set(visible);
    }

    fn form_fields(&self) -> NewBillFields {
        self.fields.borrow().clone()
    }
}

pub struct FakeBillsView {
    modal_width: f64,
    shown: RefCell<Vec<ProofModal>>,
}

impl FakeBillsView {
    pub fn with_modal_width(modal_width: f64) -> Self {
        Self {
            modal_width,
            shown: RefCell::new(Vec::new()),
        }
    }

    pub fn shown(&self) -> Vec<ProofModal> {
        self.shown.borrow().clone()
    }
}

impl BillsView for FakeBillsView {
    fn modal_width(&self) -> f64 {
        self.modal_width
    }

    fn show_proof(&self, modal: ProofModal) {
        self.shown.borrow_mut().push(modal);
    }
}
