use std::cell::Cell;
use std::rc::Rc;

use yew::prelude::*;

/// Flag that turns false when the component unmounts.
///
/// Remote calls are never cancelled, so handlers resuming after a response
/// check it before touching the page.
#[hook]
pub fn use_mounted() -> Rc<Cell<bool>> {
    let mounted = use_memo((), |_| Cell::new(true));

    {
        let mounted = mounted.clone();
        use_effect_with((), move |_| move || mounted.set(false));
    }

    mounted
}
