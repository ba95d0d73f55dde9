use billed_client::{Navigator, Route};
use gloo::events::EventListener;
use yew::Callback;

/// Navigator that hands the route to the app's router callback
pub struct CallbackNavigator {
    on_navigate: Callback<Route>,
}

impl CallbackNavigator {
    pub fn new(on_navigate: Callback<Route>) -> Self {
        Self { on_navigate }
    }
}

impl Navigator for CallbackNavigator {
    fn navigate(&self, route: Route) {
        self.on_navigate.emit(route);
    }
}

/// Route named by `hash`; the bills list when it names none
pub fn route_for_hash(hash: &str) -> Route {
    Route::from_path(hash).unwrap_or(Route::Bills)
}

pub fn current_route() -> Route {
    let hash = gloo::utils::window().location().hash().unwrap_or_default();
    route_for_hash(&hash)
}

/// Report the route each time the hash changes, back and forward buttons
/// included. Listening stops when the listener is dropped.
pub fn on_hash_change(on_route: Callback<Route>) -> EventListener {
    EventListener::new(&gloo::utils::window(), "hashchange", move |_| {
        on_route.emit(current_route());
    })
}

pub fn set_location_hash(route: Route) {
    if let Err(e) = gloo::utils::window().location().set_hash(route.path()) {
        log::warn!("Failed to update location hash: {:?}", e);
    }
}
