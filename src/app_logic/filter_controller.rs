/*
 * The filter composition controller. It owns the filter specification a
 * view is currently displaying through, composes the effective filter from
 * that specification plus an optional quick filter, and wires the filter
 * dialog, the filter button, and the quick-filter input to the view's
 * refresh.
 *
 * Initialization is two-phase and opt-out, modeled as an explicit state
 * machine instead of the null checks a widget-inheritance design would use:
 * `initialize` binds (or declines) the widget handles, and
 * `set_application_context` makes the controller live. Only a live
 * controller has a dialog and attached callbacks.
 */
use crate::core::{
    ComparisonMode, Filter, FilterSpecification, FilterType, FrameField, ProfileFilter,
    StringFilter,
};
use crate::platform_layer::{
    ApplicationContext, FilterDialogFactoryOperations, FilterDialogOperations, FilterUiHandles,
    IconId, KeyCode, TextInputOperations,
};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use super::observable::ObservableCell;

/*
 * What a concrete view must provide to host a filter composition
 * controller. Implementors typically keep their render model in a dedicated
 * struct shared with the hosting view, so borrowing it during `refresh`
 * never overlaps a borrow of the widget tree.
 */
pub trait ViewOperations {
    // The filter categories this view's dialog should offer.
    fn allowed_filter_types(&self) -> HashSet<FilterType>;

    /*
     * Re-renders the view through the given effective filter. Called by the
     * controller after every filter-affecting event; nothing else in this
     * component calls it.
     */
    fn refresh(&mut self, effective_filter: &ProfileFilter);
}

// The controller's initialization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    // Neither setup phase has completed.
    Uninitialized,
    // The view declared it has no filter UI; the feature is permanently off.
    NoFilterUi,
    // Dialog created, callbacks attached; the controller is operational.
    Live,
}

pub struct FilterCompositionController {
    state: InitState,
    view: Rc<RefCell<dyn ViewOperations>>,
    dialog_factory: Rc<dyn FilterDialogFactoryOperations>,
    handles: Option<FilterUiHandles>,
    dialog: Option<Rc<RefCell<dyn FilterDialogOperations>>>,
    filter_spec: Rc<ObservableCell<FilterSpecification>>,
    // Rebuilt from the specification on every change; shared with the
    // specification subscriber.
    current_filter: Rc<RefCell<ProfileFilter>>,
    // At most one quick filter at a time; shared with the widget callbacks.
    quick_filter: Rc<RefCell<Option<StringFilter>>>,
}

impl FilterCompositionController {
    pub fn new(
        view: Rc<RefCell<dyn ViewOperations>>,
        dialog_factory: Rc<dyn FilterDialogFactoryOperations>,
    ) -> Self {
        FilterCompositionController {
            state: InitState::Uninitialized,
            view,
            dialog_factory,
            handles: None,
            dialog: None,
            filter_spec: Rc::new(ObservableCell::new(FilterSpecification::default())),
            current_filter: Rc::new(RefCell::new(ProfileFilter::default())),
            quick_filter: Rc::new(RefCell::new(None)),
        }
    }

    pub fn init_state(&self) -> InitState {
        self.state
    }

    // Whether a filter dialog exists; false before live-init and after opt-out.
    pub fn has_filter_dialog(&self) -> bool {
        self.dialog.is_some()
    }

    /*
     * First setup phase: binds the widget handles, or opts out of filtering
     * entirely when the view has no filter UI (`None`). Opting out is
     * permanent; the second phase becomes a no-op.
     */
    pub fn initialize(&mut self, handles: Option<FilterUiHandles>) {
        if self.state != InitState::Uninitialized || self.handles.is_some() {
            log::warn!("FilterController: initialize called more than once, ignoring");
            return;
        }
        match handles {
            None => {
                log::debug!("FilterController: view has no filter UI, filtering disabled");
                self.state = InitState::NoFilterUi;
            }
            Some(handles) => {
                self.handles = Some(handles);
            }
        }
    }

    /*
     * Second setup phase: makes the controller live. Creates the filter
     * dialog, hands it the application context and the view's allowed filter
     * types, and attaches the reactive bindings. Safe to call in any state:
     * before `initialize`, after opt-out, or a second time it does nothing.
     */
    pub fn set_application_context(&mut self, context: Rc<ApplicationContext>) {
        match self.state {
            InitState::NoFilterUi => {
                log::trace!("FilterController: filtering disabled, context ignored");
                return;
            }
            InitState::Live => {
                log::warn!("FilterController: already live, ignoring repeated context");
                return;
            }
            InitState::Uninitialized => {}
        }
        if self.handles.is_none() {
            log::debug!("FilterController: context set before widget handles were bound, ignoring");
            return;
        }

        self.initialize_filters(context);
        self.state = InitState::Live;
    }

    // The specification cell, for code that wants to observe changes.
    pub fn filter_specification(&self) -> &Rc<ObservableCell<FilterSpecification>> {
        &self.filter_spec
    }

    /*
     * The effective filter: the current specification's filters, with the
     * quick filter prepended when one is set. Recomputed on every call, so
     * it is always consistent with the current state; before any filter was
     * ever set it is the empty, match-all filter.
     */
    pub fn adjusted_profile_filter(&self) -> ProfileFilter {
        compose_effective_filter(&self.current_filter.borrow(), &self.quick_filter.borrow())
    }

    fn initialize_filters(&mut self, context: Rc<ApplicationContext>) {
        let (filter_button, quick_filter_button, quick_filter_text) = match self.handles.as_ref() {
            Some(h) => (
                h.filter_button.clone(),
                h.quick_filter_button.clone(),
                h.quick_filter_text.clone(),
            ),
            None => return,
        };

        let dialog = self.dialog_factory.create_filter_dialog();
        {
            let mut d = dialog.borrow_mut();
            d.set_application_context(context);
            d.add_allowed_filter_types(&self.view.borrow().allowed_filter_types());
        }
        self.dialog = Some(dialog.clone());
        log::debug!("FilterController: filter dialog created, attaching bindings");

        // Specification changes: icon first, then the rebuilt filter, then
        // the view refresh. All three complete before the triggering `set`
        // returns.
        {
            let button = filter_button.clone();
            let current_filter = self.current_filter.clone();
            let quick_filter = self.quick_filter.clone();
            let view = self.view.clone();
            self.filter_spec
                .subscribe(move |_old, new_spec: &FilterSpecification| {
                    let icon = if new_spec.is_filtering() {
                        IconId::FunnelActive
                    } else {
                        IconId::Funnel
                    };
                    button.borrow_mut().set_icon(icon);
                    *current_filter.borrow_mut() =
                        ProfileFilter::new(new_spec.filters().to_vec());
                    let effective =
                        compose_effective_filter(&current_filter.borrow(), &quick_filter.borrow());
                    view.borrow_mut().refresh(&effective);
                });
        }

        // Filter button: modal dialog; cancellation changes nothing and does
        // not refresh.
        {
            let dialog = dialog.clone();
            let spec_cell = self.filter_spec.clone();
            filter_button.borrow_mut().set_on_action(Box::new(move || {
                let result = dialog.borrow_mut().show_and_wait();
                match result {
                    Some(specification) => spec_cell.set(specification),
                    None => log::debug!("FilterController: filter dialog cancelled"),
                }
            }));
        }

        // Quick filter: button click or Enter in the text input.
        {
            let text_input = quick_filter_text.clone();
            let quick_filter = self.quick_filter.clone();
            let current_filter = self.current_filter.clone();
            let view = self.view.clone();
            quick_filter_button
                .borrow_mut()
                .set_on_action(Box::new(move || {
                    apply_quick_filter(&text_input, &quick_filter, &current_filter, &view);
                }));
        }
        {
            let text_input = quick_filter_text.clone();
            let quick_filter = self.quick_filter.clone();
            let current_filter = self.current_filter.clone();
            let view = self.view.clone();
            quick_filter_text
                .borrow_mut()
                .set_on_key_pressed(Box::new(move |key| {
                    if key == KeyCode::Enter {
                        apply_quick_filter(&text_input, &quick_filter, &current_filter, &view);
                    }
                }));
        }
    }
}

/*
 * Reads the quick-filter input and replaces the quick filter accordingly:
 * empty text clears it, anything else becomes a contains-filter over the
 * frame's full name. The view is refreshed unconditionally afterwards,
 * independent of the specification subscriber.
 */
fn apply_quick_filter(
    text_input: &Rc<RefCell<dyn TextInputOperations>>,
    quick_filter: &Rc<RefCell<Option<StringFilter>>>,
    current_filter: &Rc<RefCell<ProfileFilter>>,
    view: &Rc<RefCell<dyn ViewOperations>>,
) {
    let input = text_input.borrow().text();
    *quick_filter.borrow_mut() = if input.is_empty() {
        log::debug!("FilterController: quick filter cleared");
        None
    } else {
        log::debug!("FilterController: quick filter set to '{input}'");
        Some(StringFilter::new(
            ComparisonMode::Contains,
            FrameField::FullName,
            input,
        ))
    };
    let effective = compose_effective_filter(&current_filter.borrow(), &quick_filter.borrow());
    view.borrow_mut().refresh(&effective);
}

/*
 * Composes the effective filter: the specification-derived filter as-is
 * when no quick filter is set, otherwise the quick filter prepended to it,
 * preserving the specification's filter order.
 */
fn compose_effective_filter(
    current_filter: &ProfileFilter,
    quick_filter: &Option<StringFilter>,
) -> ProfileFilter {
    match quick_filter {
        None => current_filter.clone(),
        Some(quick) => {
            let mut filters = Vec::with_capacity(current_filter.filters().len() + 1);
            filters.push(Filter::String(quick.clone()));
            filters.extend_from_slice(current_filter.filters());
            ProfileFilter::new(filters)
        }
    }
}
