use yew::prelude::*;

#[function_component(LoadingPage)]
pub fn loading_page() -> Html {
    html! {
        <div class="loading-page" data-testid="loading">
            {"Loading..."}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorPageProps {
    pub message: String,
}

/// Full-page error showing the message exactly as the API sent it
#[function_component(ErrorPage)]
pub fn error_page(props: &ErrorPageProps) -> Html {
    html! {
        <div class="error-page" data-testid="error-message">
            <div class="error-title">{"Erreur"}</div>
            <div class="error-message">{&props.message}</div>
        </div>
    }
}
