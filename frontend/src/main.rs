mod components;
mod hooks;
mod services;

use std::rc::Rc;

use billed_client::{Route, StoredSession};
use yew::prelude::*;

use crate::components::bills_page::BillsPage;
use crate::components::new_bill_page::NewBillPage;
use crate::services::api::HttpBillStore;
use crate::services::config::ApiConfig;
use crate::services::navigation::{current_route, on_hash_change, set_location_hash};
use crate::services::storage::BrowserStorage;
use crate::services::AppServices;

#[derive(Properties, PartialEq)]
struct AppProps {
    config: ApiConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let services = {
        let config = props.config.clone();
        use_memo(config, |config| {
            let session = Rc::new(StoredSession::new(BrowserStorage));
            AppServices {
                store: Rc::new(HttpBillStore::new(config.clone(), session.clone())),
                session,
            }
        })
    };
    let route = use_state(current_route);

    {
        let route = route.clone();
        use_effect_with((), move |_| {
            let listener = on_hash_change(Callback::from(move |next: Route| route.set(next)));
            move || drop(listener)
        });
    }

    let on_navigate = {
        let route = route.clone();
        Callback::from(move |next: Route| {
            log::debug!("Navigating to {}", next.path());
            set_location_hash(next);
            route.set(next);
        })
    };

    html! {
        <ContextProvider<AppServices> context={(*services).clone()}>
            <div class="layout">
                {match *route {
                    Route::Bills => html! { <BillsPage on_navigate={on_navigate} /> },
                    Route::NewBill => html! { <NewBillPage on_navigate={on_navigate} /> },
                }}
            </div>
        </ContextProvider<AppServices>>
    }
}

fn main() {
    let config = ApiConfig::from_build_env();
    services::logging::init(config.log_level);
    log::info!("Billed front end using {}", config.base_url);

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
