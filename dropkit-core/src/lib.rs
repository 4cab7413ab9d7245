//! dropkit-core - Headless dropdown menu engine
//!
//! Pure logic for an anchored dropdown menu: placement math, open/close
//! state, outside-click detection, keyboard navigation and listener
//! lifetime. No rendering framework or DOM; `dropkit-ui` binds this to
//! Dioxus and the browser, and [`headless::HeadlessHost`] runs it in memory.

pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod headless;
pub mod item;
pub mod keyboard;
pub mod outside;
pub mod overlay;
pub mod placement;
pub mod position;
pub mod session;
pub mod state;
pub mod style;
pub mod trigger;

pub use config::DropdownConfig;
pub use controller::{DropdownController, DropdownHost, MenuSlot, MountedMenu};
pub use error::{ConfigError, ParseError};
pub use geometry::{Rect, Viewport};
pub use item::{ActionItem, ActivationSource, DropdownItem, ItemCallback, ItemEvent};
pub use keyboard::{FocusModel, KeyOutcome, NavKey, TriggerKeyAction};
pub use outside::{Containment, OutsideClickDetector};
pub use placement::{Alignment, Placement, Side};
pub use position::{compute_position, Position, DEFAULT_OFFSET, VIEWPORT_MARGIN};
pub use session::{ListenerKind, ListenerTarget, OpenSession};
pub use state::{OpenState, ToggleCallback, Transition};
pub use style::{Size, Variant};
