//! Dropdown components

mod classes;
mod dropdown;
mod handle;
mod icons;
mod menu;
mod trigger;

pub use dropdown::Dropdown;
pub use handle::{use_dropdown, DropdownHandle, DropdownInputs};
pub use icons::ChevronDownIcon;
pub use menu::DropdownMenu;
pub use trigger::{DropdownTrigger, TriggerButton, TriggerContent};
