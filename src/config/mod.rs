//! Storage location configuration
//!
//! Resolves where the widget keeps its state database. Hosts and tests can
//! point it at any directory with [`AppPaths::with_data_dir`].

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

use crate::shared::error::{AppError, AppResult};

pub const DATABASE_FILE: &str = "conversion_widgets.redb";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    /// Platform data directory, e.g. `~/Library/Application Support/com.antigravity.conversion-widgets`
    pub fn from_project_dirs() -> AppResult<Self> {
        let dirs = ProjectDirs::from("com", "antigravity", "conversion-widgets")
            .ok_or_else(|| AppError::Io("Failed to determine data directory".to_string()))?;
        Ok(Self {
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_is_inside_data_dir() {
        let paths = AppPaths::with_data_dir("/tmp/widgets");
        assert_eq!(paths.data_dir(), Path::new("/tmp/widgets"));
        assert_eq!(paths.database_path(), Path::new("/tmp/widgets").join(DATABASE_FILE));
    }
}
