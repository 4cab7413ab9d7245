//! Trigger button
//!
//! The caller either describes a button ([`TriggerButton`]), which the
//! dropdown renders with its own handlers and attributes merged in, or hands
//! over arbitrary content, which gets wrapped in a widget-owned button.

use dioxus::prelude::*;
use dropkit_core::trigger::{
    merge_trigger_attrs, CallerButtonAttrs, ChevronSlot, TriggerStrategy, WidgetTriggerAttrs,
};
use dropkit_core::{NavKey, Size, Variant};

use super::classes::trigger_class;
use super::handle::DropdownHandle;
use super::icons::ChevronDownIcon;

/// A button the caller wants to open the menu with
#[derive(Clone, PartialEq)]
pub struct TriggerButton {
    pub label: Element,
    pub class: Option<String>,
    pub disabled: bool,
    pub test_id: Option<String>,
    /// Runs after the dropdown's own click handling
    pub onclick: Option<EventHandler<MouseEvent>>,
    /// Runs after the dropdown's own key handling
    pub onkeydown: Option<EventHandler<KeyboardEvent>>,
}

impl TriggerButton {
    pub fn new(label: Element) -> Self {
        Self {
            label,
            class: None,
            disabled: false,
            test_id: None,
            onclick: None,
            onkeydown: None,
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }

    pub fn onclick(mut self, handler: EventHandler<MouseEvent>) -> Self {
        self.onclick = Some(handler);
        self
    }

    pub fn onkeydown(mut self, handler: EventHandler<KeyboardEvent>) -> Self {
        self.onkeydown = Some(handler);
        self
    }
}

/// What the trigger is built from
#[derive(Clone, PartialEq)]
pub enum TriggerContent {
    Button(TriggerButton),
    Content(Element),
}

impl TriggerContent {
    pub fn strategy(&self) -> TriggerStrategy {
        match self {
            Self::Button(_) => TriggerStrategy::Augment,
            Self::Content(_) => TriggerStrategy::Wrap,
        }
    }
}

#[component]
pub fn DropdownTrigger(
    handle: DropdownHandle,
    content: TriggerContent,
    /// DOM id of the menu this trigger controls
    menu_id: String,
    size: Size,
    variant: Variant,
    disabled: bool,
    show_chevron: bool,
) -> Element {
    let strategy = content.strategy();
    let is_open = handle.is_open();

    let (caller, label, caller_click, caller_keydown) = match content {
        TriggerContent::Button(button) => (
            CallerButtonAttrs {
                class: button.class,
                disabled: button.disabled,
                test_id: button.test_id,
            },
            button.label,
            button.onclick,
            button.onkeydown,
        ),
        TriggerContent::Content(content) => (CallerButtonAttrs::default(), content, None, None),
    };
    let widget = WidgetTriggerAttrs {
        class: match strategy {
            TriggerStrategy::Wrap => Some(trigger_class(variant, size)),
            TriggerStrategy::Augment => None,
        },
        disabled,
        is_open,
        test_id: None,
    };
    let attrs = merge_trigger_attrs(strategy, &caller, &widget);
    let body = match strategy.chevron_slot() {
        ChevronSlot::InsideButton => rsx! {
            {label}
            if show_chevron {
                ChevronDownIcon {}
            }
        },
        ChevronSlot::AfterContent => rsx! {
            span { class: "asm-dropdown-trigger__content min-w-0 truncate", {label} }
            if show_chevron {
                ChevronDownIcon {}
            }
        },
    };

    rsx! {
        button {
            r#type: "button",
            class: "{attrs.class}",
            disabled: attrs.disabled,
            aria_haspopup: attrs.aria_haspopup,
            aria_expanded: if attrs.aria_expanded { "true" } else { "false" },
            aria_controls: if is_open { Some(menu_id.clone()) } else { None },
            "data-testid": attrs.test_id.clone(),
            onmounted: move |evt: MountedEvent| handle.trigger_mounted(evt.data()),
            onclick: move |evt: MouseEvent| {
                handle.toggle();
                if let Some(handler) = caller_click {
                    handler.call(evt);
                }
            },
            onkeydown: move |evt: KeyboardEvent| {
                if let Some(key) = NavKey::from_key(&evt.key().to_string()) {
                    if handle.trigger_key(key).is_some() {
                        evt.prevent_default();
                    }
                }
                if let Some(handler) = caller_keydown {
                    handler.call(evt);
                }
            },
            {body}
        }
    }
}
