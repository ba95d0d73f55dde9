use std::cell::Cell;
use std::rc::Rc;

use billed_client::{Justificatif, NewBillFields, NewBillView, NewBillWorkflow, Route};
use gloo::file::futures::read_as_bytes;
use shared::{is_acceptable_file, ExpenseType};
use web_sys::{FormData, HtmlFormElement, HtmlInputElement};
use yew::prelude::*;

use crate::components::page_states::ErrorPage;
use crate::hooks::use_mounted::use_mounted;
use crate::services::navigation::CallbackNavigator;
use crate::services::AppServices;

/// The form as the workflow sees it
#[derive(Clone)]
struct NewBillForm {
    mounted: Rc<Cell<bool>>,
    form_ref: NodeRef,
    file_ref: NodeRef,
    file_error: UseStateHandle<bool>,
}

impl NewBillView for NewBillForm {
    fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    fn clear_file_input(&self) {
        if let Some(input) = self.file_ref.cast::<HtmlInputElement>() {
            input.set_value("");
        }
    }

    fn set_file_error(&self, visible: bool) {
        self.file_error.set(visible);
    }

    fn form_fields(&self) -> NewBillFields {
        let Some(data) = self
            .form_ref
            .cast::<HtmlFormElement>()
            .and_then(|form| FormData::new_with_form(&form).ok())
        else {
            log::warn!("New bill form is not rendered, submitting empty fields");
            return NewBillFields::default();
        };
        let field = |name: &str| data.get(name).as_string().unwrap_or_default();

        NewBillFields {
            expense_type: field("expense-type"),
            name: field("expense-name"),
            amount: field("amount"),
            date: field("datepicker"),
            vat: field("vat"),
            pct: field("pct"),
            commentary: field("commentary"),
        }
    }
}

/// Submit event of the form, handed to the workflow
struct FormSubmit(SubmitEvent);

impl billed_client::SubmitEvent for FormSubmit {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

/// A selection the workflow refuses on its name alone, handed over unread
fn unread_if_rejected(file_name: &str) -> Option<Justificatif> {
    (!is_acceptable_file(file_name)).then(|| Justificatif {
        file_name: file_name.to_string(),
        content_type: None,
        bytes: Vec::new(),
    })
}

/// Read the first selected file of `input`, keeping the path the input reports
async fn read_selected_file(input: &HtmlInputElement) -> Option<Justificatif> {
    let file = gloo::file::File::from(input.files()?.get(0)?);
    let path = input.value();
    let file_name = if path.is_empty() { file.name() } else { path };
    if let Some(rejected) = unread_if_rejected(&file_name) {
        return Some(rejected);
    }
    let content_type = Some(file.raw_mime_type()).filter(|mime| !mime.is_empty());

    match read_as_bytes(&file).await {
        Ok(bytes) => Some(Justificatif {
            file_name,
            content_type,
            bytes,
        }),
        Err(e) => {
            log::error!("Failed to read '{}': {}", file_name, e);
            None
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct NewBillPageProps {
    pub on_navigate: Callback<Route>,
}

#[function_component(NewBillPage)]
pub fn new_bill_page(props: &NewBillPageProps) -> Html {
    let services = use_context::<AppServices>();
    let mounted = use_mounted();
    let form_ref = use_node_ref();
    let file_ref = use_node_ref();
    let file_error = use_state(|| false);

    let workflow = {
        let on_navigate = props.on_navigate.clone();
        use_memo((), move |_| {
            services.map(|services| {
                Rc::new(NewBillWorkflow::new(
                    services.store,
                    services.session,
                    Rc::new(CallbackNavigator::new(on_navigate)),
                ))
            })
        })
    };

    let Some(workflow) = (*workflow).clone() else {
        return html! { <ErrorPage message={"Services indisponibles".to_string()} /> };
    };

    let view = NewBillForm {
        mounted,
        form_ref: form_ref.clone(),
        file_ref: file_ref.clone(),
        file_error: file_error.clone(),
    };

    let on_change_file = {
        let workflow = workflow.clone();
        let view = view.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let workflow = workflow.clone();
            let view = view.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(file) = read_selected_file(&input).await {
                    workflow.handle_change_file(&view, file).await;
                }
            });
        })
    };

    let on_submit = Callback::from(move |e: SubmitEvent| {
        // Only honoured while the event is being dispatched
        e.prevent_default();
        let workflow = workflow.clone();
        let view = view.clone();
        wasm_bindgen_futures::spawn_local(async move {
            workflow.handle_submit(&view, &FormSubmit(e)).await;
        });
    });

    html! {
        <div class="content">
            <div class="content-header">
                <div class="content-title">{"Envoyer une note de frais"}</div>
            </div>
            <div class="form-newbill-container content-inner">
                <form data-testid="form-new-bill" ref={form_ref} onsubmit={on_submit}>
                    <div class="row">
                        <div class="col-md-6">
                            <div class="col-half">
                                <label for="expense-type" class="bold-label">{"Type de dépense"}</label>
                                <select required=true class="form-control blue-border" name="expense-type" data-testid="expense-type">
                                    {for ExpenseType::ALL.iter().map(|expense_type| html! {
                                        <option value={expense_type.label()}>{expense_type.label()}</option>
                                    })}
                                </select>
                            </div>
                            <div class="col-half">
                                <label for="expense-name" class="bold-label">{"Nom de la dépense"}</label>
                                <input type="text" class="form-control blue-border" name="expense-name" data-testid="expense-name" placeholder="Vol Paris Londres" />
                            </div>
                            <div class="col-half">
                                <label for="datepicker" class="bold-label">{"Date"}</label>
                                <input required=true type="date" class="form-control blue-border" name="datepicker" data-testid="datepicker" />
                            </div>
                            <div class="col-half">
                                <label for="amount" class="col-form-label bold-label">{"Montant TTC "}</label>
                                <input required=true type="number" class="form-control blue-border input-icon input-icon-right" name="amount" data-testid="amount" placeholder="348" />
                            </div>
                            <div class="col-half-row">
                                <div class="flex-col">
                                    <label for="vat" class="bold-label">{"TVA"}</label>
                                    <input type="number" class="form-control blue-border" name="vat" data-testid="vat" placeholder="70" />
                                </div>
                                <div class="flex-col">
                                    <input required=true type="number" class="form-control blue-border" name="pct" data-testid="pct" placeholder="20" />
                                </div>
                            </div>
                        </div>
                        <div class="col-md-6">
                            <div class="col-half">
                                <label for="commentary" class="bold-label">{"Commentaire"}</label>
                                <textarea class="form-control blue-border" name="commentary" data-testid="commentary" rows="3"></textarea>
                            </div>
                            <div class="col-half">
                                <label for="file" class="bold-label">{"Justificatif"}</label>
                                <input required=true type="file" accept=".png,.jpg,.jpeg" class="form-control blue-border" name="file" data-testid="file" ref={file_ref} onchange={on_change_file} />
                                {if *file_error {
                                    html! {
                                        <div class="iconError" data-testid="file-error">
                                            {"Seuls les fichiers jpg, jpeg et png sont acceptés"}
                                        </div>
                                    }
                                } else { html! {} }}
                            </div>
                        </div>
                    </div>
                    <div class="row">
                        <div class="col-md-6">
                            <div class="col-half">
                                <button type="submit" id="btn-send-bill" class="btn btn-primary">{"Envoyer"}</button>
                            </div>
                        </div>
                    </div>
                </form>
            </div>
        </div>
    }
}
