//! Class strings for the dropdown's elements
//!
//! Every element carries a stable `asm-dropdown*` hook class for external
//! styling next to the Tailwind utilities it renders with.

use dropkit_core::{Size, Variant};

const DISABLED: &str = "disabled:opacity-50 disabled:cursor-not-allowed";

/// Container around trigger and menu
pub fn container_class(extra: Option<&str>) -> String {
    match extra {
        Some(extra) if !extra.trim().is_empty() => {
            format!("asm-dropdown relative inline-block {}", extra.trim())
        }
        _ => "asm-dropdown relative inline-block".to_string(),
    }
}

/// Widget-owned trigger button for `variant` at `size`
pub fn trigger_class(variant: Variant, size: Size) -> String {
    let base = "inline-flex items-center gap-1 rounded-lg transition-colors";

    let padding = match size {
        Size::Sm => "px-2.5 py-1 text-xs",
        Size::Md => "px-3 py-1.5 text-sm",
        Size::Lg => "px-4 py-2 text-base",
    };

    let variant_class = match variant {
        Variant::Primary => "bg-indigo-600 hover:bg-indigo-500 text-white",
        Variant::Secondary => "bg-gray-700 hover:bg-gray-600 text-gray-300",
        Variant::Success => "bg-green-600 hover:bg-green-500 text-white",
        Variant::Warning => "bg-amber-500 hover:bg-amber-400 text-gray-900",
        Variant::Danger => "bg-red-600 hover:bg-red-500 text-white",
        Variant::Info => "bg-sky-600 hover:bg-sky-500 text-white",
        Variant::Ghost => "text-gray-400 hover:text-white hover:bg-gray-700/50",
        Variant::Outline => "border border-gray-600 text-gray-300 hover:bg-gray-700/50",
        Variant::Link => "text-indigo-400 hover:text-indigo-300 hover:underline",
        Variant::Brand => "bg-violet-600 hover:bg-violet-500 text-white",
    };

    format!("{base} {padding} {variant_class} {DISABLED}")
}

/// Overlay menu surface
pub fn menu_class(size: Size) -> String {
    let width = match size {
        Size::Sm => "min-w-32",
        Size::Md => "min-w-40",
        Size::Lg => "min-w-56",
    };
    format!(
        "asm-dropdown-menu asm-dropdown-menu--{size} bg-surface-overlay rounded-lg shadow-lg border border-border-subtle p-1 {width}"
    )
}

/// One actionable row
pub fn item_class(danger: bool, disabled: bool) -> String {
    let base = "asm-dropdown-item w-full text-left px-3 py-2 text-sm rounded-md transition-colors flex items-center gap-2 outline-none";
    let tone = if danger {
        "asm-dropdown-item--danger text-red-400 hover:bg-red-500/10 focus:bg-red-500/10"
    } else {
        "text-gray-300 hover:bg-hover hover:text-white focus:bg-hover focus:text-white"
    };
    if disabled {
        format!("{base} {tone} asm-dropdown-item--disabled opacity-50 cursor-not-allowed")
    } else {
        format!("{base} {tone}")
    }
}

pub const DIVIDER_CLASS: &str = "asm-dropdown-divider my-1 border-t border-border-subtle";
