/*
 * This module consolidates the platform-agnostic domain logic: the frame
 * model the filters inspect, the filter predicates themselves, the filter
 * specification value produced by the filter dialog, and the persistence of
 * named filter presets (via the `FilterPresetManagerOperations` abstraction).
 */
pub mod filter;
pub mod filter_spec;
pub mod frame;
pub mod path_utils;
pub mod presets;

pub use filter::{
    ComparisonMode, Filter, FrameField, ProfileFilter, ShareComparison, StringFilter,
    TimeShareFilter, TimeShareScope,
};
pub use filter_spec::{FilterSpecification, FilterType};
pub use frame::FrameInfo;
pub use presets::{
    CoreFilterPresetManager, FilterPresetManagerOperations, PresetError, sanitize_preset_name,
};
