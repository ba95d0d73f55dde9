pub mod api;
pub mod config;
pub mod logging;
pub mod navigation;
pub mod storage;

use std::rc::Rc;

use billed_client::{BillStore, SessionContext};

/// Collaborators shared by every page, provided through a yew context
#[derive(Clone)]
pub struct AppServices {
    pub store: Rc<dyn BillStore>,
    pub session: Rc<dyn SessionContext>,
}

impl PartialEq for AppServices {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store) && Rc::ptr_eq(&self.session, &other.session)
    }
}
