pub mod bills_page;
pub mod new_bill_page;
pub mod page_states;
pub mod proof_modal;
