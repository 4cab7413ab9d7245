//! Trigger composition
//!
//! The trigger is either a button the caller already built (augmented with
//! the widget's handlers and attributes) or arbitrary content wrapped in a
//! button by the widget. Nesting the caller's button inside another button
//! would be invalid markup, so the strategy is picked from what the caller
//! supplied.

/// Hook class on every trigger
pub const TRIGGER_CLASS: &str = "asm-dropdown-trigger";

/// How the trigger element is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerStrategy {
    /// The caller's own button gets the widget's attributes merged in
    Augment,
    /// The caller's content is wrapped in a widget-owned button
    Wrap,
}

/// Where the chevron glyph goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChevronSlot {
    /// Appended to the caller's button children
    InsideButton,
    /// Rendered after the caller's content, inside the wrapping button
    AfterContent,
}

impl TriggerStrategy {
    pub fn chevron_slot(&self) -> ChevronSlot {
        match self {
            Self::Augment => ChevronSlot::InsideButton,
            Self::Wrap => ChevronSlot::AfterContent,
        }
    }
}

/// Attributes the caller set on their own button (augment strategy only)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallerButtonAttrs {
    pub class: Option<String>,
    pub disabled: bool,
    pub test_id: Option<String>,
}

/// Attributes the widget wants on its trigger
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetTriggerAttrs {
    pub class: Option<String>,
    pub disabled: bool,
    pub is_open: bool,
    pub test_id: Option<String>,
}

/// Final attributes to render on the trigger button
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerAttrs {
    pub class: String,
    pub disabled: bool,
    pub aria_haspopup: &'static str,
    pub aria_expanded: bool,
    pub test_id: Option<String>,
}

/// Merge caller and widget attributes for the chosen strategy.
///
/// Class order is caller class, hook class, widget class. Disabled is the OR
/// of both. The widget's test id wins over the caller's.
pub fn merge_trigger_attrs(
    strategy: TriggerStrategy,
    caller: &CallerButtonAttrs,
    widget: &WidgetTriggerAttrs,
) -> TriggerAttrs {
    let caller_class = match strategy {
        TriggerStrategy::Augment => caller.class.as_deref(),
        TriggerStrategy::Wrap => None,
    };
    let class = [caller_class, Some(TRIGGER_CLASS), widget.class.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let (caller_disabled, caller_test_id) = match strategy {
        TriggerStrategy::Augment => (caller.disabled, caller.test_id.clone()),
        TriggerStrategy::Wrap => (false, None),
    };

    TriggerAttrs {
        class,
        disabled: widget.disabled || caller_disabled,
        aria_haspopup: "menu",
        aria_expanded: widget.is_open,
        test_id: widget.test_id.clone().or(caller_test_id),
    }
}

/// Test id of the menu surface for a dropdown test id.
pub fn menu_test_id(test_id: Option<&str>) -> Option<String> {
    test_id.map(|id| format!("{id}-menu"))
}

/// Test id of an item row; only items with an id get one.
pub fn item_test_id(test_id: Option<&str>, item_id: Option<&str>) -> Option<String> {
    match (test_id, item_id) {
        (Some(test_id), Some(item_id)) => Some(format!("{test_id}-item-{item_id}")),
        _ => None,
    }
}
