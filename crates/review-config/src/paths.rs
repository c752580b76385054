use anyhow::Result;
use std::path::{Path, PathBuf};

/// Get the container base path from environment variable, defaulting to "/app"
pub fn container_base_path() -> PathBuf {
    std::env::var("REVIEWDECK_BASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/app"))
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("reviewdeck");

        Ok(Self {
            config_dir: base_dir.clone(),
            data_dir: base_dir.join("data"),
            log_dir: base_dir.join("logs"),
        })
    }

    pub fn from_docker_env() -> Self {
        let base = container_base_path();
        // In containers, config files sit at the base level with data/logs in subdirs
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    /// Root every path under an explicit base directory (used by tests).
    pub fn with_base(base: &Path) -> Self {
        Self {
            config_dir: base.to_path_buf(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// The approval ledger document. Owned exclusively by the ledger
    /// component; nothing else reads or writes this file.
    pub fn approved_reviews_file(&self) -> PathBuf {
        self.data_dir.join("approvedReviews.json")
    }

    /// Ordered candidate locations for the mock review fixture. First
    /// existing path wins. The working-directory fallback keeps
    /// `data/mockReviews.json` in a source checkout usable during
    /// development.
    pub fn fixture_candidates(&self) -> Vec<PathBuf> {
        vec![
            self.data_dir.join("mock").join("reviews.json"),
            self.data_dir.join("mockReviews.json"),
            self.data_dir.join("reviews.json"),
            PathBuf::from("data/mockReviews.json"),
        ]
    }

    pub fn server_log_file(&self) -> PathBuf {
        self.log_dir.join("reviewdeck.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // The container base directory is created in the Containerfile, so
        // its presence indicates Docker
        let base = container_base_path();
        if base.exists() {
            return Self::from_docker_env();
        }

        // Otherwise, use platform-specific paths (e.g., ~/.config/reviewdeck on Linux)
        Self::new().unwrap_or_else(|_| Self::from_docker_env())
    }
}
