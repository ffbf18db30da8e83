/*
 * This module defines the contracts between the filter composition
 * controller and the hosting UI toolkit: handle traits for the widgets the
 * controller drives (`ButtonOperations`, `TextInputOperations`), the modal
 * filter dialog (`FilterDialogOperations` and its factory), the icon
 * identifiers the controller selects between, and the key codes it reacts
 * to. A host adapts its native widgets to these traits; the controller never
 * sees native handles.
 */
use crate::core::{FilterSpecification, FilterType};
use crate::platform_layer::context::ApplicationContext;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/*
 * Identifies the icons the filter button switches between. The host's icon
 * resources map `resource_name()` to a displayable image.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconId {
    Funnel,
    FunnelActive,
}

impl IconId {
    pub fn resource_name(&self) -> &'static str {
        match self {
            IconId::Funnel => "funnel",
            IconId::FunnelActive => "funnel-active",
        }
    }
}

// The keys the controller cares about. Hosts fold everything else into
// `Other` rather than enumerating their full key map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Enter,
    Other,
}

/*
 * A clickable button handle. Implementations must release any borrow of
 * themselves before invoking the registered action callback, since the
 * callback may call back into the same handle (e.g. to update its icon).
 */
pub trait ButtonOperations {
    fn set_icon(&mut self, icon: IconId);
    fn set_on_action(&mut self, callback: Box<dyn FnMut()>);
}

/*
 * A single-line text input handle. The same borrow rule as for
 * `ButtonOperations` applies: the key-press callback may read the input's
 * current text through the handle.
 */
pub trait TextInputOperations {
    fn text(&self) -> String;
    fn set_on_key_pressed(&mut self, callback: Box<dyn FnMut(KeyCode)>);
}

/*
 * The modal filter-editing dialog. `show_and_wait` blocks the calling event
 * loop until the user accepts or cancels; `None` means cancelled (or closed
 * without a result), and the caller must leave its state untouched in that
 * case.
 */
pub trait FilterDialogOperations {
    fn set_application_context(&mut self, context: Rc<ApplicationContext>);
    fn add_allowed_filter_types(&mut self, types: &HashSet<FilterType>);
    fn show_and_wait(&mut self) -> Option<FilterSpecification>;
}

// Creates a filter dialog scoped to one controller.
pub trait FilterDialogFactoryOperations {
    fn create_filter_dialog(&self) -> Rc<RefCell<dyn FilterDialogOperations>>;
}

/*
 * The widget handles a view hands to the controller during initialization.
 * A view without filter UI passes `None` instead of this bundle, which
 * disables the feature permanently for that view.
 */
pub struct FilterUiHandles {
    pub filter_button: Rc<RefCell<dyn ButtonOperations>>,
    pub quick_filter_button: Rc<RefCell<dyn ButtonOperations>>,
    pub quick_filter_text: Rc<RefCell<dyn TextInputOperations>>,
}
