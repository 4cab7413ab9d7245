//! dropkit-ui - Dioxus dropdown menu
//!
//! Renders the `dropkit-core` engine: a trigger button and a top-layer menu
//! anchored to it, wired to the live DOM for measurement, focus and global
//! listeners.

pub mod components;
pub mod dom;
pub mod wasm_utils;

pub use components::*;
pub use dropkit_core::{
    ActivationSource, DropdownConfig, DropdownItem, ItemEvent, Placement, Size, Variant,
};
