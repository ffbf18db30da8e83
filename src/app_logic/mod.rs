/*
 * The application-logic layer: the filter composition controller, the view
 * contract it drives, and the observable cell used to expose the current
 * filter specification reactively.
 */
pub mod filter_controller;
pub mod observable;


pub use filter_controller::{FilterCompositionController, InitState, ViewOperations};
pub use observable::ObservableCell;
