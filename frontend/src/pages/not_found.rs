use yew::prelude::*;
use yew_router::prelude::*;
use crate::{styles, Route};

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class={styles::FLEX_CENTER}>
            <div class="text-center">
                <h1 class={styles::TEXT_H1}>{"404"}</h1>
                <p class={classes!(styles::TEXT_BODY, "mt-2")}>{"Esta página no existe."}</p>
                <Link<Route> to={Route::Gacha} classes={classes!(styles::BUTTON_PRIMARY, "mt-6")}>
                    {"Volver al gacha"}
                </Link<Route>>
            </div>
        </div>
    }
}
