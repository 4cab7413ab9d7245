//! Icons used by the dropdown

use dioxus::prelude::*;

/// Downward chevron shown on the trigger
#[component]
pub fn ChevronDownIcon(#[props(default = "w-3 h-3 ml-1 shrink-0")] class: &'static str) -> Element {
    rsx! {
        svg {
            class: "{class}",
            xmlns: "http://www.w3.org/2000/svg",
            view_box: "0 0 12 12",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "1.5",
            stroke_linecap: "round",
            stroke_linejoin: "round",
            aria_hidden: "true",
            path { d: "M3 4.5L6 7.5L9 4.5" }
        }
    }
}
