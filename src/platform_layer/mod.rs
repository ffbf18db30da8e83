/*
 * The platform layer: everything the filter composition controller needs
 * from the hosting UI toolkit, expressed as traits and plain data so the
 * controller stays toolkit-agnostic and fully testable with mocks.
 */
pub mod context;
pub mod types;

pub use context::ApplicationContext;
pub use types::{
    ButtonOperations, FilterDialogFactoryOperations, FilterDialogOperations, FilterUiHandles,
    IconId, KeyCode, TextInputOperations,
};
