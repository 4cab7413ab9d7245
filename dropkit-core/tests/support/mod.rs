use dropkit_core::headless::HeadlessHost;
use dropkit_core::overlay::NodeId;
use dropkit_core::{DropdownConfig, DropdownController, DropdownItem, Rect, Viewport};

/// Initialize tracing for tests with proper test output handling
#[allow(dead_code)]
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

/// A page with a dropdown container, its trigger, and an unrelated element
#[allow(dead_code)]
pub struct Page {
    pub host: HeadlessHost,
    pub container: NodeId,
    pub trigger: NodeId,
    pub elsewhere: NodeId,
}

/// 800x600 viewport, trigger at {top:100,left:100,width:50,height:20},
/// menus render at 120x80.
#[allow(dead_code)]
pub fn page() -> Page {
    let mut host = HeadlessHost::new(Viewport::new(800.0, 600.0));
    host.set_menu_size(120.0, 80.0);
    let root = host.document_root();
    let container = host.append(root);
    let trigger = host.append(container);
    host.set_bounds(trigger, Rect::new(100.0, 100.0, 50.0, 20.0));
    let elsewhere = host.append(root);
    Page {
        host,
        container,
        trigger,
        elsewhere,
    }
}

#[allow(dead_code)]
pub fn dropdown(
    page: &mut Page,
    config: DropdownConfig,
    items: Vec<DropdownItem>,
) -> DropdownController<HeadlessHost> {
    let mut controller = DropdownController::new(config);
    controller.attach(page.container, page.trigger);
    controller.set_items(&mut page.host, items);
    controller
}
