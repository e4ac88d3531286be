//! Terminal view component.
//!
//! The decoder overlay with the session log and command input.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::components::terminal::{Input, Output};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/terminal/terminal.module.css");

/// Scroll the log to its newest line whenever it changes.
fn setup_autoscroll_effect(ctx: AppContext, output_ref: NodeRef<leptos::html::Div>) {
    Effect::new(move || {
        ctx.log_revision.track();
        if let Some(el) = output_ref.get() {
            dom::scroll_to_bottom(&el);
        }
    });
}

#[component]
pub fn Terminal() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let output_ref = NodeRef::<leptos::html::Div>::new();

    setup_autoscroll_effect(ctx, output_ref);

    let on_submit = Callback::new(move |input: String| ctx.submit(&input));
    let on_history_nav = Callback::new(move |direction: i32| ctx.recall(direction));

    view! {
        <div class=css::overlay>
            <div class=css::container on:click=move |_| dom::focus_terminal_input()>
                <header class=css::titleBar>
                    <span class=css::title>"jwt-decoder"</span>
                    <button
                        class=css::close
                        title="Close"
                        on:click=move |ev| {
                            ev.stop_propagation();
                            ctx.dismiss();
                        }
                    >
                        <Icon icon=ic::CLOSE />
                    </button>
                </header>

                <div node_ref=output_ref class=css::output>
                    <For
                        each=move || ctx.lines()
                        key=|line| (line.id, line.shown.len())
                        children=|line| view! { <Output line=line /> }
                    />
                </div>

                <div class=css::inputArea>
                    <Input on_submit=on_submit on_history_nav=on_history_nav />
                </div>
            </div>
        </div>
    }
}
