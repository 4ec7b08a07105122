pub mod api;
pub mod base;
pub mod config;
pub mod hooks;
pub mod pages;
pub mod styles;

use yew::prelude::*;
use yew_router::prelude::*;
use crate::base::Base;
use crate::pages::{gacha::GachaPage, not_found::NotFound};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/gacha")]
    Gacha,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Base>
                <Switch<Route> render={switch} />
            </Base>
        </BrowserRouter>
    }
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Redirect<Route> to={Route::Gacha} /> },
        Route::Gacha => html! { <GachaPage /> },
        Route::NotFound => html! { <NotFound /> },
    }
}
