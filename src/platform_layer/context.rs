/*
 * The application-wide context handed to filter dialogs when a controller
 * goes live. It bundles the shared services a dialog needs beyond its own
 * widgets; currently that is the filter-preset storage, which the dialog
 * uses to offer previously saved filter sets.
 */
use crate::core::FilterPresetManagerOperations;
use std::rc::Rc;

pub struct ApplicationContext {
    app_name: String,
    preset_manager: Rc<dyn FilterPresetManagerOperations>,
}

impl ApplicationContext {
    pub fn new(
        app_name: impl Into<String>,
        preset_manager: Rc<dyn FilterPresetManagerOperations>,
    ) -> Self {
        ApplicationContext {
            app_name: app_name.into(),
            preset_manager,
        }
    }

    // The application name presets are stored under.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn preset_manager(&self) -> &Rc<dyn FilterPresetManagerOperations> {
        &self.preset_manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CoreFilterPresetManager;

    #[test]
    fn test_context_exposes_its_services() {
        let manager: Rc<dyn FilterPresetManagerOperations> =
            Rc::new(CoreFilterPresetManager::new());
        let context = ApplicationContext::new("FrameViewer", manager);
        assert_eq!(context.app_name(), "FrameViewer");
        // The preset manager is shared, not cloned per caller.
        assert_eq!(Rc::strong_count(context.preset_manager()), 1);
    }
}
