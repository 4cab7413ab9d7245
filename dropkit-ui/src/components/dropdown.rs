//! Dropdown menu component
//!
//! A trigger button plus an overlay menu of items, anchored to the trigger
//! and kept inside the viewport. Open state is either managed here or by the
//! caller through `is_open` + `on_toggle`.
//!
//! ```ignore
//! Dropdown {
//!     items: vec![
//!         DropdownItem::new("Edit").with_id("edit").on_select(move |_| edit()),
//!         DropdownItem::divider(),
//!         DropdownItem::new("Delete").with_id("delete").danger(true),
//!     ],
//!     placement: Placement::BottomEnd,
//!     test_id: "album-actions",
//!     "Actions"
//! }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use dioxus::prelude::*;
use dropkit_core::{
    DropdownConfig, DropdownItem, Placement, Size, Variant, DEFAULT_OFFSET, VIEWPORT_MARGIN,
};

use super::classes::container_class;
use super::handle::{use_dropdown, DropdownInputs};
use super::menu::DropdownMenu;
use super::trigger::{DropdownTrigger, TriggerContent};

/// Counter for generating unique menu IDs
static DROPDOWN_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

#[component]
pub fn Dropdown(
    /// Trigger content, wrapped in a button
    children: Element,
    /// Explicit trigger; takes precedence over `children`
    #[props(default)]
    trigger: Option<TriggerContent>,
    #[props(default)] items: Vec<DropdownItem<Element>>,
    /// Host-owned open state. Leave unset to let the dropdown manage it.
    #[props(default)]
    is_open: Option<bool>,
    /// Called with the requested value on every open/close
    #[props(default)]
    on_toggle: Option<EventHandler<bool>>,
    #[props(default)] placement: Placement,
    #[props(default)] size: Size,
    #[props(default)] variant: Variant,
    #[props(default)] disabled: bool,
    #[props(default = true)] close_on_select: bool,
    #[props(default = true)] show_chevron: bool,
    /// Gap between trigger and menu in pixels
    #[props(default = DEFAULT_OFFSET)]
    offset: f64,
    #[props(default)] class: Option<String>,
    #[props(default)] test_id: Option<String>,
) -> Element {
    let handle = use_dropdown();
    let menu_id = use_hook(|| {
        let id = DROPDOWN_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("dropdown-menu-{}", id)
    });

    handle.sync(DropdownInputs {
        is_open,
        on_toggle,
        disabled,
        config: DropdownConfig {
            placement,
            offset,
            viewport_margin: VIEWPORT_MARGIN,
            close_on_select,
            show_chevron,
            size,
            variant,
        },
        items: items.clone(),
    });
    let open = handle.is_open();
    let content = trigger.unwrap_or(TriggerContent::Content(children));
    let container_class = container_class(class.as_deref());

    rsx! {
        div {
            class: "{container_class}",
            "data-testid": test_id.clone(),
            onmounted: move |evt: MountedEvent| handle.container_mounted(evt.data()),
            DropdownTrigger {
                handle,
                content,
                menu_id: menu_id.clone(),
                size,
                variant,
                disabled,
                show_chevron,
            }
        }
        if open {
            DropdownMenu {
                handle,
                id: menu_id,
                items,
                size,
                test_id,
            }
        }
    }
}
