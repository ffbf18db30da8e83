/*
 * frame_filter: the filter-composition layer of a CPU-profile viewer.
 *
 * The crate is split into three layers:
 * - `core`: platform-agnostic domain logic (profiling frames, filter
 *   predicates, filter specifications, and filter-preset persistence).
 * - `app_logic`: the filter composition controller and the observable cell
 *   it exposes. This layer knows nothing about any native widget toolkit.
 * - `platform_layer`: the contracts a hosting UI must provide (button and
 *   text-input handles, the modal filter dialog, icon identifiers).
 */

pub mod app_logic;
pub mod core;
pub mod platform_layer;

use std::sync::Once;

static LOGGING_INIT: Once = Once::new();

/*
 * Initializes terminal logging for the whole process. Safe to call more than
 * once; only the first call has any effect. Tests call this freely from
 * their setup so log output is available when a test fails.
 */
pub fn initialize_logging() {
    LOGGING_INIT.call_once(|| {
        let result = simplelog::TermLogger::init(
            simplelog::LevelFilter::Debug,
            simplelog::Config::default(),
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        );
        if let Err(e) = result {
            eprintln!("frame_filter: failed to initialize logging: {e}");
        }
    });
}
