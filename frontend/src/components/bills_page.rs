use std::rc::Rc;

use billed_client::{BillsContainer, BillsPageState, BillsView, ProofModal, Route};
use shared::FormattedBill;
use web_sys::Element;
use yew::prelude::*;

use crate::components::page_states::{ErrorPage, LoadingPage};
use crate::components::proof_modal::ProofModalView;
use crate::hooks::use_mounted::use_mounted;
use crate::services::navigation::CallbackNavigator;
use crate::services::AppServices;

/// Width used for the justificatif image when the dialog cannot be measured
const FALLBACK_MODAL_WIDTH: f64 = 800.0;

/// The justificatif modal, as the bills container sees it
struct ModalHandle {
    dialog_ref: NodeRef,
    proof: UseStateHandle<Option<ProofModal>>,
}

impl BillsView for ModalHandle {
    fn modal_width(&self) -> f64 {
        let width = self
            .dialog_ref
            .cast::<Element>()
            .map(|dialog| dialog.get_bounding_client_rect().width())
            .unwrap_or(0.0);
        // A hidden dialog measures 0
        if width > 0.0 { width } else { FALLBACK_MODAL_WIDTH }
    }

    fn show_proof(&self, modal: ProofModal) {
        self.proof.set(Some(modal));
    }
}

#[derive(Properties, PartialEq)]
pub struct BillsPageProps {
    pub on_navigate: Callback<Route>,
}

#[function_component(BillsPage)]
pub fn bills_page(props: &BillsPageProps) -> Html {
    let services = use_context::<AppServices>();
    let page_state = use_state(|| BillsPageState::Loading);
    let proof = use_state(|| None::<ProofModal>);
    let dialog_ref = use_node_ref();
    let mounted = use_mounted();

    let container = {
        let on_navigate = props.on_navigate.clone();
        let store = services.as_ref().map(|services| services.store.clone());
        use_memo(store.is_some(), move |_| {
            BillsContainer::new(store, Rc::new(CallbackNavigator::new(on_navigate)))
        })
    };

    {
        let container = container.clone();
        let page_state = page_state.clone();
        let mounted = mounted.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let state = container.load().await;
                if mounted.get() {
                    page_state.set(state);
                }
            });
            || ()
        });
    }

    let on_new_bill = {
        let container = container.clone();
        Callback::from(move |_: MouseEvent| container.handle_click_new_bill())
    };

    let on_show_proof = {
        let container = container.clone();
        let dialog_ref = dialog_ref.clone();
        let proof = proof.clone();
        Callback::from(move |file_url: Option<String>| {
            let handle = ModalHandle {
                dialog_ref: dialog_ref.clone(),
                proof: proof.clone(),
            };
            container.handle_click_icon_eye(&handle, file_url.as_deref());
        })
    };

    let on_close_proof = {
        let proof = proof.clone();
        Callback::from(move |_: ()| proof.set(None))
    };

    match &*page_state {
        BillsPageState::Loading => html! { <LoadingPage /> },
        BillsPageState::Failed(message) => html! { <ErrorPage message={message.clone()} /> },
        BillsPageState::Loaded(bills) => html! {
            <div class="content">
                <div class="content-header">
                    <div class="content-title">{"Mes notes de frais"}</div>
                    <button type="button" data-testid="btn-new-bill" class="btn btn-primary" onclick={on_new_bill}>
                        {"Nouvelle note de frais"}
                    </button>
                </div>
                <BillsTable bills={bills.clone()} on_show_proof={on_show_proof} />
                <ProofModalView proof={(*proof).clone()} on_close={on_close_proof} dialog_ref={dialog_ref} />
            </div>
        },
    }
}

#[derive(Properties, PartialEq)]
struct BillsTableProps {
    bills: Vec<FormattedBill>,
    on_show_proof: Callback<Option<String>>,
}

#[function_component(BillsTable)]
fn bills_table(props: &BillsTableProps) -> Html {
    html! {
        <div id="data-table">
            <table id="example" class="table table-striped" style="width:100%">
                <thead>
                    <tr>
                        <th>{"Type"}</th>
                        <th>{"Nom"}</th>
                        <th>{"Date"}</th>
                        <th>{"Montant"}</th>
                        <th>{"Statut"}</th>
                        <th>{"Actions"}</th>
                    </tr>
                </thead>
                <tbody data-testid="tbody">
                    {for props.bills.iter().map(|formatted| {
                        let bill = &formatted.bill;
                        let on_eye = {
                            let on_show_proof = props.on_show_proof.clone();
                            let file_url = bill.file_url.clone();
                            Callback::from(move |_: MouseEvent| on_show_proof.emit(file_url.clone()))
                        };

                        html! {
                            <tr>
                                <td>{&bill.expense_type}</td>
                                <td>{&bill.name}</td>
                                <td>{&formatted.formatted_date}</td>
                                <td>{format!("{} €", bill.amount)}</td>
                                <td>{&formatted.formatted_status}</td>
                                <td>
                                    <div class="icon-actions">
                                        <div id="eye" data-testid="icon-eye" data-bill-url={bill.file_url.clone().unwrap_or_default()} onclick={on_eye}>
                                            {"👁"}
                                        </div>
                                    </div>
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}
