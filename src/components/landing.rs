//! Landing screen.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::{APP_HEADLINE, APP_NAME, APP_TAGLINE};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/landing.module.css");

#[component]
pub fn Landing() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let on_launch = move |_| {
        ctx.launch();
        request_animation_frame(dom::focus_terminal_input);
    };

    view! {
        <section class=css::landing>
            <span class=css::brand>{APP_NAME}</span>
            <h1 class=css::headline>{APP_HEADLINE}</h1>
            <p class=css::tagline>{APP_TAGLINE}</p>
            <button class=css::launch on:click=on_launch>
                <Icon icon=ic::TERMINAL />
                <span>"Launch Decoder"</span>
            </button>
        </section>
    }
}
