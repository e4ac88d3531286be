//! Decode history panel.
//!
//! Lists every decode attempt with a status filter, a debounced
//! case-insensitive search over token and payload, and a newest/oldest sort.

use leptos::{ev, prelude::*};
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::SEARCH_DEBOUNCE_MS;
use crate::models::{HistoryEntry, HistoryFilter, HistoryQuery, SortOrder, TokenStatus};
use crate::utils::{BrowserTimers, TimerHandle, Timers, abbreviate_token, format_timestamp};

stylance::import_crate_style!(css, "src/components/history/history.module.css");

const TOKEN_PREVIEW_CHARS: usize = 24;

fn row(entry: HistoryEntry) -> impl IntoView {
    let status_class = match entry.status {
        TokenStatus::Valid => css::valid,
        TokenStatus::Invalid => css::invalid,
    };
    let payload = entry
        .payload
        .as_ref()
        .and_then(|p| serde_json::to_string_pretty(p).ok());

    view! {
        <li class=css::row>
            <div class=css::rowHeader>
                <span class=format!("{} {}", css::status, status_class)>
                    <Icon icon=ic::status(entry.status) />
                    {entry.status.as_str()}
                </span>
                <code class=css::token title=entry.token.clone()>
                    {abbreviate_token(&entry.token, TOKEN_PREVIEW_CHARS)}
                </code>
                <time class=css::time>{format_timestamp(entry.decoded_at)}</time>
            </div>
            {payload.map(|json| view! {
                <details class=css::payload>
                    <summary>"Payload"</summary>
                    <pre>{json}</pre>
                </details>
            })}
        </li>
    }
}

#[component]
pub fn HistoryPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let filter = RwSignal::new(HistoryFilter::All);
    let order = RwSignal::new(SortOrder::Newest);
    let search = RwSignal::new(String::new());
    let (draft, set_draft) = signal(String::new());
    let debounce = StoredValue::new_local(None::<TimerHandle>);

    let entries = move || {
        ctx.history(&HistoryQuery {
            filter: filter.get(),
            search: search.get(),
            order: order.get(),
        })
    };

    let on_search = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        set_draft.set(value.clone());
        let handle = BrowserTimers.once(SEARCH_DEBOUNCE_MS, Box::new(move || search.set(value)));
        // Replacing the handle cancels the previous keystroke's timer.
        debounce.set_value(Some(handle));
    };

    let on_filter = move |ev: ev::Event| match event_target_value(&ev).parse::<HistoryFilter>() {
        Ok(f) => filter.set(f),
        Err(e) => log::warn!("{e}"),
    };

    let on_order = move |ev: ev::Event| match event_target_value(&ev).parse::<SortOrder>() {
        Ok(o) => order.set(o),
        Err(e) => log::warn!("{e}"),
    };

    let filter_options = [HistoryFilter::All, HistoryFilter::Valid, HistoryFilter::Invalid];
    let order_options = [SortOrder::Newest, SortOrder::Oldest];

    view! {
        <section class=css::panel>
            <header class=css::header>
                <Icon icon=ic::HISTORY />
                <h2>"Decode history"</h2>
            </header>

            <div class=css::controls>
                <label class=css::search>
                    <Icon icon=ic::SEARCH />
                    <input
                        type="search"
                        placeholder="Search token or payload"
                        prop:value=draft
                        on:input=on_search
                    />
                </label>
                <select on:change=on_filter>
                    {filter_options.into_iter().map(|f| view! {
                        <option value=f.as_str() selected=move || filter.get() == f>
                            {f.as_str()}
                        </option>
                    }).collect_view()}
                </select>
                <select on:change=on_order>
                    {order_options.into_iter().map(|o| view! {
                        <option value=o.as_str() selected=move || order.get() == o>
                            {o.as_str()}
                        </option>
                    }).collect_view()}
                </select>
            </div>

            {move || {
                let entries = entries();
                if entries.is_empty() {
                    view! { <p class=css::empty>"No history entries"</p> }.into_any()
                } else {
                    view! {
                        <ul class=css::list>
                            {entries.into_iter().map(row).collect_view()}
                        </ul>
                    }
                    .into_any()
                }
            }}
        </section>
    }
}
