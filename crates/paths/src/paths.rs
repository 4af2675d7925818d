//! Where the viewer keeps its settings file and logs.
//!
//! Binaries started through cargo write below a development directory, installed
//! binaries below the platform's local data directory.

use std::path::{Path, PathBuf};

/// Folder name used below the platform data directory for installed builds.
const INSTALLED_FOLDER: &str = "Walkthrough";

const LOGS_FOLDER: &str = "logs";

/// File locations of one application.
#[derive(Debug, Clone)]
pub struct PathContext {
    data_root: PathBuf,
    app_id: &'static str,
}

impl PathContext {
    /// Picks the data root from how the binary was launched.
    pub fn detect(app_id: &'static str) -> Self {
        let data_root = if launched_by_cargo() {
            development_root()
        } else {
            installed_root()
        };
        Self::in_dir(data_root, app_id)
    }

    /// Uses `data_root` as is, e.g. a `.out/` directory or a test folder.
    pub fn in_dir(data_root: impl Into<PathBuf>, app_id: &'static str) -> Self {
        Self {
            data_root: data_root.into(),
            app_id,
        }
    }

    pub fn app_id(&self) -> &str {
        self.app_id
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// `<root>/<app_id>.settings.ron`
    pub fn settings_file(&self) -> PathBuf {
        self.data_root
            .join(format!("{}.settings.ron", self.app_id))
    }

    /// `<root>/logs/`
    pub fn logs_dir(&self) -> PathBuf {
        self.data_root.join(LOGS_FOLDER)
    }

    /// `<root>/logs/<app_id>.<timestamp>.log`
    pub fn log_file(&self, timestamp: &str) -> PathBuf {
        self.logs_dir()
            .join(format!("{}.{timestamp}.log", self.app_id))
    }

    /// Log file stamped with the local start time of this run.
    pub fn log_file_now(&self) -> PathBuf {
        let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
        self.log_file(&timestamp)
    }

    /// Creates the data root and the logs directory.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.logs_dir())
    }
}

fn launched_by_cargo() -> bool {
    let in_target_dir = std::env::current_exe()
        .map(|exe| exe.components().any(|c| c.as_os_str() == "target"))
        .unwrap_or(false);
    in_target_dir || std::env::var_os("CARGO").is_some()
}

fn development_root() -> PathBuf {
    std::env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn installed_root() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(INSTALLED_FOLDER))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("walkthrough_paths_{name}_{nanos}"))
    }

    #[test]
    fn settings_file_is_named_after_the_app() {
        let ctx = PathContext::in_dir("/viewer/.out", "walkthrough");

        assert_eq!(ctx.app_id(), "walkthrough");
        assert_eq!(
            ctx.settings_file(),
            PathBuf::from("/viewer/.out/walkthrough.settings.ron")
        );
    }

    #[test]
    fn log_files_live_in_the_logs_folder() {
        let ctx = PathContext::in_dir("/viewer/.out", "walkthrough");

        assert_eq!(
            ctx.log_file("20260101-093000"),
            PathBuf::from("/viewer/.out/logs/walkthrough.20260101-093000.log")
        );
        assert_eq!(ctx.log_file_now().parent(), Some(ctx.logs_dir().as_path()));
    }

    #[test]
    fn ensure_directories_creates_root_and_logs() {
        let root = scratch_dir("ensure");
        let ctx = PathContext::in_dir(root.clone(), "walkthrough");

        ctx.ensure_directories().expect("create directories");
        // A second call on existing directories is fine
        ctx.ensure_directories().expect("directories already exist");

        assert!(ctx.data_root().is_dir());
        assert!(ctx.logs_dir().is_dir());
        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn detected_root_is_never_empty() {
        let ctx = PathContext::detect("walkthrough");
        assert!(!ctx.data_root().as_os_str().is_empty());
    }
}
