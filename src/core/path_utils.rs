/*
 * Utility for resolving the per-application local configuration directory,
 * where filter presets are stored. Centralized here so every part of the
 * core resolves the same location.
 */
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/*
 * Returns the application's local (non-roaming) configuration directory,
 * creating it if necessary. The path is derived from the application name
 * alone, without an organization qualifier. Returns `None` when the platform
 * offers no suitable location or the directory cannot be created.
 */
pub fn get_base_app_config_local_dir(app_name: &str) -> Option<PathBuf> {
    log::trace!("PathUtils: Resolving base app config local dir for '{app_name}'");
    ProjectDirs::from("", "", app_name).and_then(|proj_dirs| {
        let config_path = proj_dirs.config_local_dir();
        if !config_path.exists() {
            if let Err(e) = fs::create_dir_all(config_path) {
                log::error!("PathUtils: Failed to create config directory {config_path:?}: {e}");
                return None;
            }
            log::debug!("PathUtils: Created config directory: {config_path:?}");
        }
        Some(config_path.to_path_buf())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // ProjectDirs resolution is environment-dependent, so these tests use
    // unique app names and clean up after themselves.

    fn cleanup(app_name: &str) {
        if let Some(proj_dirs) = ProjectDirs::from("", "", app_name) {
            let dir = proj_dirs.config_local_dir();
            if dir.exists() {
                if let Err(e) = fs::remove_dir_all(dir) {
                    eprintln!("Test cleanup failed for {app_name}: {e}");
                }
            }
        }
    }

    #[test]
    fn test_config_dir_is_created_when_missing() {
        let app_name = format!("FrameFilterTest_Create_{}", rand::random::<u128>());
        cleanup(&app_name);

        let path = get_base_app_config_local_dir(&app_name);
        assert!(path.is_some(), "Should resolve a path for a new app name");
        let path = path.unwrap();
        assert!(path.exists());
        assert!(path.is_dir());
        assert!(
            path.to_string_lossy()
                .to_lowercase()
                .contains(&app_name.to_lowercase())
        );

        cleanup(&app_name);
    }

    #[test]
    fn test_config_dir_is_stable_across_calls() {
        let app_name = format!("FrameFilterTest_Stable_{}", rand::random::<u128>());

        let first = get_base_app_config_local_dir(&app_name).expect("first resolution failed");
        let second = get_base_app_config_local_dir(&app_name).expect("second resolution failed");
        assert_eq!(first, second);

        cleanup(&app_name);
    }
}
