//! Menu entries supplied by the caller
//!
//! The icon type is opaque to the engine; the Dioxus layer uses `Element`,
//! headless callers can use `()` or a string name.

use std::fmt;
use std::rc::Rc;

/// Callback invoked when an item activates
pub type ItemCallback = Rc<dyn Fn(ItemEvent)>;

/// How an item was activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationSource {
    Pointer,
    Keyboard,
}

/// Payload passed to an item's callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEvent {
    /// Index in the caller's item list (dividers included)
    pub index: usize,
    pub id: Option<String>,
    pub source: ActivationSource,
}

/// An actionable menu row
pub struct ActionItem<I> {
    pub id: Option<String>,
    pub label: String,
    pub icon: Option<I>,
    pub disabled: bool,
    /// Destructive action (styling hint only)
    pub danger: bool,
    pub on_select: Option<ItemCallback>,
}

/// One entry in a dropdown menu: an action or a separator.
///
/// A divider has no label, icon or callback, so it can never be activated.
pub enum DropdownItem<I = ()> {
    Action(ActionItem<I>),
    Divider { id: Option<String> },
}

impl<I> DropdownItem<I> {
    pub fn new(label: impl Into<String>) -> Self {
        Self::Action(ActionItem {
            id: None,
            label: label.into(),
            icon: None,
            disabled: false,
            danger: false,
            on_select: None,
        })
    }

    pub fn divider() -> Self {
        Self::Divider { id: None }
    }

    pub fn with_id(mut self, new_id: impl Into<String>) -> Self {
        match &mut self {
            Self::Action(item) => item.id = Some(new_id.into()),
            Self::Divider { id } => *id = Some(new_id.into()),
        }
        self
    }

    pub fn with_icon(mut self, icon: I) -> Self {
        if let Self::Action(item) = &mut self {
            item.icon = Some(icon);
        }
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        if let Self::Action(item) = &mut self {
            item.disabled = disabled;
        }
        self
    }

    pub fn danger(mut self, danger: bool) -> Self {
        if let Self::Action(item) = &mut self {
            item.danger = danger;
        }
        self
    }

    pub fn on_select(mut self, callback: impl Fn(ItemEvent) + 'static) -> Self {
        if let Self::Action(item) = &mut self {
            item.on_select = Some(Rc::new(callback));
        }
        self
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Action(item) => item.id.as_deref(),
            Self::Divider { id } => id.as_deref(),
        }
    }

    /// Stable render key: the id when present, otherwise the list index.
    pub fn key(&self, index: usize) -> String {
        self.id()
            .map(str::to_string)
            .unwrap_or_else(|| index.to_string())
    }

    pub fn is_divider(&self) -> bool {
        matches!(self, Self::Divider { .. })
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Action(item) if item.disabled)
    }

    /// Participates in keyboard traversal (not a divider, not disabled).
    pub fn is_navigable(&self) -> bool {
        matches!(self, Self::Action(item) if !item.disabled)
    }

    pub fn as_action(&self) -> Option<&ActionItem<I>> {
        match self {
            Self::Action(item) => Some(item),
            Self::Divider { .. } => None,
        }
    }

    /// Run the item's callback. Returns whether the item accepted activation.
    ///
    /// Disabled items and dividers are no-ops. An enabled item without a
    /// callback still counts as activated so close-on-select applies.
    pub fn activate(&self, index: usize, source: ActivationSource) -> bool {
        let Self::Action(item) = self else {
            return false;
        };
        if item.disabled {
            return false;
        }
        if let Some(callback) = &item.on_select {
            callback(ItemEvent {
                index,
                id: item.id.clone(),
                source,
            });
        }
        true
    }
}

/// Indices (into `items`) of the entries that take part in keyboard traversal.
pub fn navigable_indices<I>(items: &[DropdownItem<I>]) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_navigable())
        .map(|(index, _)| index)
        .collect()
}

/// Map a position in the navigable sequence back to the caller's list.
pub fn navigable_item<I>(
    items: &[DropdownItem<I>],
    nav_index: usize,
) -> Option<(usize, &DropdownItem<I>)> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_navigable())
        .nth(nav_index)
}

impl<I: Clone> Clone for ActionItem<I> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            icon: self.icon.clone(),
            disabled: self.disabled,
            danger: self.danger,
            on_select: self.on_select.clone(),
        }
    }
}

impl<I: Clone> Clone for DropdownItem<I> {
    fn clone(&self) -> Self {
        match self {
            Self::Action(item) => Self::Action(item.clone()),
            Self::Divider { id } => Self::Divider { id: id.clone() },
        }
    }
}

impl<I: PartialEq> PartialEq for ActionItem<I> {
    fn eq(&self, other: &Self) -> bool {
        let same_callback = match (&self.on_select, &other.on_select) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.id == other.id
            && self.label == other.label
            && self.icon == other.icon
            && self.disabled == other.disabled
            && self.danger == other.danger
            && same_callback
    }
}

impl<I: PartialEq> PartialEq for DropdownItem<I> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Action(a), Self::Action(b)) => a == b,
            (Self::Divider { id: a }, Self::Divider { id: b }) => a == b,
            _ => false,
        }
    }
}

impl<I> fmt::Debug for ActionItem<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionItem")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("has_icon", &self.icon.is_some())
            .field("disabled", &self.disabled)
            .field("danger", &self.danger)
            .field("has_callback", &self.on_select.is_some())
            .finish()
    }
}

impl<I> fmt::Debug for DropdownItem<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(item) => item.fmt(f),
            Self::Divider { id } => f.debug_struct("Divider").field("id", id).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn sample() -> Vec<DropdownItem> {
        vec![
            DropdownItem::new("Edit").with_id("edit"),
            DropdownItem::divider(),
            DropdownItem::new("Archive").disabled(true),
            DropdownItem::new("Delete").danger(true),
        ]
    }

    #[test]
    fn test_navigable_indices_skip_dividers_and_disabled() {
        assert_eq!(navigable_indices(&sample()), vec![0, 3]);
    }

    #[test]
    fn test_navigable_item_maps_back() {
        let items = sample();
        let (index, item) = navigable_item(&items, 1).unwrap();
        assert_eq!(index, 3);
        assert_eq!(item.as_action().unwrap().label, "Delete");
        assert!(navigable_item(&items, 2).is_none());
    }

    #[test]
    fn test_divider_ignores_action_builders() {
        let divider: DropdownItem = DropdownItem::divider()
            .danger(true)
            .on_select(|_| panic!("divider activated"));
        assert!(divider.is_divider());
        assert!(!divider.is_navigable());
        assert!(!divider.activate(0, ActivationSource::Pointer));
    }

    #[test]
    fn test_activate_passes_event() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let item: DropdownItem = DropdownItem::new("Edit")
            .with_id("edit")
            .on_select(move |event| sink.borrow_mut().push(event));

        assert!(item.activate(2, ActivationSource::Keyboard));
        assert_eq!(
            *seen.borrow(),
            vec![ItemEvent {
                index: 2,
                id: Some("edit".into()),
                source: ActivationSource::Keyboard,
            }]
        );
    }

    #[test]
    fn test_disabled_never_fires() {
        let item: DropdownItem = DropdownItem::new("Archive")
            .disabled(true)
            .on_select(|_| panic!("disabled item activated"));
        assert!(!item.activate(0, ActivationSource::Pointer));
    }

    #[test]
    fn test_missing_callback_still_activates() {
        let item: DropdownItem = DropdownItem::new("Noop");
        assert!(item.activate(0, ActivationSource::Pointer));
    }

    #[test]
    fn test_key_prefers_id() {
        let items = sample();
        assert_eq!(items[0].key(0), "edit");
        assert_eq!(items[1].key(1), "1");
    }

    #[test]
    fn test_equality_compares_callback_identity() {
        let a: DropdownItem = DropdownItem::new("A").on_select(|_| {});
        let b = a.clone();
        let c: DropdownItem = DropdownItem::new("A").on_select(|_| {});
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
