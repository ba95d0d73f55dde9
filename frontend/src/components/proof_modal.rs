use billed_client::ProofModal;
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProofModalViewProps {
    /// Content to show; the modal is hidden while `None`
    pub proof: Option<ProofModal>,
    pub on_close: Callback<()>,
    /// Handle on the dialog, measured to size the image
    pub dialog_ref: NodeRef,
}

#[function_component(ProofModalView)]
pub fn proof_modal_view(props: &ProofModalViewProps) -> Html {
    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_close.emit(());
        })
    };

    let display = if props.proof.is_some() { "display: block" } else { "display: none" };

    html! {
        <div class="modal-backdrop" data-testid="modaleFile" style={display} onclick={on_backdrop_click}>
            <div class="modal-dialog modal-lg" ref={props.dialog_ref.clone()} onclick={on_modal_click}>
                <div class="modal-header">
                    <h5 class="modal-title">{"Justificatif"}</h5>
                    <button type="button" class="close" aria-label="Close" onclick={on_close_click}>
                        {"×"}
                    </button>
                </div>
                <div class="modal-body">
                    {if let Some(proof) = &props.proof {
                        html! {
                            <div class="bill-proof-container" style="text-align: center;">
                                <img width={proof.image_width.to_string()} src={proof.image_url.clone()} alt="Bill" />
                            </div>
                        }
                    } else { html! {} }}
                </div>
            </div>
        </div>
    }
}
