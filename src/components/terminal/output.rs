use leptos::prelude::*;
use leptos_icons::Icon;

use crate::components::icons as ic;
use crate::config::{ECHO_PREFIX, MS_PER_SECOND};
use crate::models::{DecodeResult, LogLine, SessionLine, TokenStatus};
use crate::utils::format_timestamp;

stylance::import_crate_style!(css, "src/components/terminal/output.module.css");

fn status_class(status: TokenStatus) -> &'static str {
    match status {
        TokenStatus::Valid => css::badgeValid,
        TokenStatus::Invalid => css::badgeInvalid,
    }
}

/// Caption under a decoded block: when the token expires, or that it never does.
fn expiry_caption(result: &DecodeResult) -> String {
    match result.expires_at() {
        Some(exp) => {
            let verb = if result.is_valid { "Expires" } else { "Expired" };
            format!("{verb} {} UTC", format_timestamp((exp * MS_PER_SECOND) as u64))
        }
        None => "No expiry claim".to_string(),
    }
}

/// One log line, showing whatever its reveal has produced so far.
#[component]
pub fn Output(line: LogLine) -> impl IntoView {
    let LogLine {
        line,
        shown,
        finished,
        ..
    } = line;
    match line {
        SessionLine::Plain { text, .. } if text.starts_with(ECHO_PREFIX) => view! {
            <div class=css::command>{shown}</div>
        }
        .into_any(),
        SessionLine::Plain { .. } => view! {
            <div class=css::line>{shown}</div>
        }
        .into_any(),
        SessionLine::StatusBadge(status) => view! {
            <div class=format!("{} {}", css::badge, status_class(status))>
                <Icon icon=ic::status(status) />
                <span>{shown}</span>
            </div>
        }
        .into_any(),
        SessionLine::DecodedBlock(result) => {
            let caption = finished.then(|| expiry_caption(&result));
            view! {
                <pre class=css::decoded>{shown}</pre>
                {caption.map(|text| view! { <div class=css::expiry>{text}</div> })}
            }
            .into_any()
        }
    }
}
