//! Browser side of the dropdown engine
//!
//! Implements the engine's host seams against the live DOM: node containment,
//! focus over the rendered menu rows, measurement and listener attachment.

use std::rc::Rc;

use dioxus::prelude::*;
use dropkit_core::{Containment, FocusModel, ListenerKind, ListenerTarget, Rect, Viewport};
use dropkit_core::session::ListenerHost;
use wasm_bindgen_x::JsCast;

use crate::wasm_utils::DomEventListener;

/// Selector for the rows keyboard navigation moves between
pub const NAVIGABLE_ITEM_SELECTOR: &str = "[role=\"menuitem\"]:not([disabled])";

/// `Node.contains` as a [`Containment`]
#[derive(Debug, Clone, Copy, Default)]
pub struct DomTree;

impl Containment for DomTree {
    type Node = web_sys_x::Node;

    fn contains(&self, ancestor: &web_sys_x::Node, target: &web_sys_x::Node) -> bool {
        ancestor.contains(Some(target))
    }
}

/// Focus model over the enabled menu rows currently in the document.
///
/// Built per key press so the row list matches what is rendered; the focused
/// index is read back from `document.activeElement`. A menu that has not
/// mounted yet has no rows.
pub struct DomFocus {
    document: web_sys_x::Document,
    rows: Vec<web_sys_x::Element>,
}

impl DomFocus {
    pub fn new(document: web_sys_x::Document, menu: Option<&web_sys_x::Element>) -> Self {
        let mut rows = Vec::new();
        if let Some(Ok(list)) = menu.map(|m| m.query_selector_all(NAVIGABLE_ITEM_SELECTOR)) {
            for i in 0..list.length() {
                if let Some(row) = list.item(i).and_then(|n| n.dyn_into().ok()) {
                    rows.push(row);
                }
            }
        }
        Self { document, rows }
    }
}

impl FocusModel for DomFocus {
    fn item_count(&self) -> usize {
        self.rows.len()
    }

    fn focused_index(&self) -> Option<usize> {
        let active = self.document.active_element()?;
        self.rows.iter().position(|row| row.is_same_node(Some(&*active)))
    }

    fn focus(&mut self, index: usize) {
        if let Some(row) = self.rows.get(index) {
            focus_element(row);
        }
    }
}

/// Move input focus to `element`.
pub fn focus_element(element: &web_sys_x::Element) {
    if let Some(element) = element.dyn_ref::<web_sys_x::HtmlElement>() {
        if let Err(e) = element.focus() {
            tracing::warn!("Failed to focus element: {e:?}");
        }
    }
}

/// Whether `document.activeElement` is `element` or inside it.
pub fn has_focus_within(document: &web_sys_x::Document, element: &web_sys_x::Element) -> bool {
    let Some(active) = document.active_element() else {
        return false;
    };
    let active: web_sys_x::Node = active.into();
    element.contains(Some(&active))
}

/// Element behind a mounted handle.
pub fn element(mounted: &Rc<MountedData>) -> Option<web_sys_x::Element> {
    mounted.downcast::<web_sys_x::Element>().cloned()
}

/// Viewport-relative bounds of a mounted element.
pub fn measure(mounted: &Rc<MountedData>) -> Option<Rect> {
    let rect = element(mounted)?.get_bounding_client_rect();
    Some(Rect::new(rect.top(), rect.left(), rect.width(), rect.height()))
}

/// `innerWidth` x `innerHeight` of the window.
pub fn viewport(window: &web_sys_x::Window) -> Option<Viewport> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(width, height))
}

/// Target of a DOM event, as a node.
pub fn event_target_node(event: &wasm_bindgen_x::JsValue) -> Option<web_sys_x::Node> {
    event
        .dyn_ref::<web_sys_x::Event>()?
        .target()?
        .dyn_into::<web_sys_x::Node>()
        .ok()
}

/// Receives every event an open session listens to
pub type Dispatch = Rc<dyn Fn(ListenerKind, wasm_bindgen_x::JsValue)>;

/// Attaches session listeners to the window and document
pub struct DomListenerHost {
    window: web_sys_x::Window,
    document: web_sys_x::Document,
    dispatch: Dispatch,
}

impl DomListenerHost {
    pub fn new(dispatch: Dispatch) -> Option<Self> {
        let window = web_sys_x::window()?;
        let document = window.document()?;
        Some(Self {
            window,
            document,
            dispatch,
        })
    }
}

impl ListenerHost for DomListenerHost {
    type Guard = DomEventListener;

    fn attach(&mut self, kind: ListenerKind) -> DomEventListener {
        let target: web_sys_x::EventTarget = match kind.target() {
            ListenerTarget::Window => self.window.clone().into(),
            ListenerTarget::Document => self.document.clone().into(),
        };
        let dispatch = self.dispatch.clone();
        DomEventListener::new(target, kind.event_name(), kind.is_passive(), move |event| {
            dispatch(kind, event)
        })
    }
}
