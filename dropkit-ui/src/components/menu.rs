//! Overlay menu and its rows
//!
//! The menu renders as a `popover="manual"` element so it sits in the top
//! layer, out of any clipping or stacking context around the trigger. It is
//! shown on mount and placed with fixed viewport offsets.

use dioxus::prelude::*;
use dropkit_core::trigger::{item_test_id, menu_test_id};
use dropkit_core::{DropdownItem, Size};

use super::classes::{item_class, menu_class, DIVIDER_CLASS};
use super::handle::DropdownHandle;

#[component]
pub fn DropdownMenu(
    handle: DropdownHandle,
    id: String,
    items: Vec<DropdownItem<Element>>,
    size: Size,
    test_id: Option<String>,
) -> Element {
    // The popover UA stylesheet centers the element; the offsets override it.
    let style = format!("inset: auto; margin: 0; {}", handle.position().to_style());
    let class = menu_class(size);
    let rows = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| (item.key(index), index, item));

    rsx! {
        div {
            id: "{id}",
            popover: "manual",
            class: "{class}",
            style: "{style}",
            role: "menu",
            aria_orientation: "vertical",
            "data-testid": menu_test_id(test_id.as_deref()),
            onmounted: move |evt: MountedEvent| handle.menu_mounted(evt.data()),
            for (key, index, item) in rows {
                MenuRow {
                    key: "{key}",
                    handle,
                    index,
                    item,
                    test_id: test_id.clone(),
                }
            }
        }
    }
}

#[component]
fn MenuRow(
    handle: DropdownHandle,
    /// Position in the caller's item list
    index: usize,
    item: DropdownItem<Element>,
    test_id: Option<String>,
) -> Element {
    let action = match item {
        DropdownItem::Divider { id } => {
            return rsx! {
                div {
                    class: DIVIDER_CLASS,
                    role: "separator",
                    "data-testid": item_test_id(test_id.as_deref(), id.as_deref()),
                }
            };
        }
        DropdownItem::Action(action) => action,
    };
    let class = item_class(action.danger, action.disabled);
    let row_test_id = item_test_id(test_id.as_deref(), action.id.as_deref());

    rsx! {
        button {
            r#type: "button",
            class: "{class}",
            role: "menuitem",
            tabindex: "-1",
            disabled: action.disabled,
            aria_disabled: if action.disabled { Some("true") } else { None },
            "data-testid": row_test_id,
            onclick: move |evt: MouseEvent| {
                evt.stop_propagation();
                handle.click_item(index);
            },
            {action.icon.map(|icon| rsx! {
                span { class: "asm-dropdown-item__icon shrink-0", {icon} }
            })}
            span { class: "asm-dropdown-item__label", "{action.label}" }
        }
    }
}
