use anyhow::Context;
use std::path::{Path, PathBuf};

/// Subpath of the platform application-data directory that holds the
/// database and logs.
const APP_SUBPATH: &str = "linkset";

const LOGS_SUBPATH: &str = "logs";

#[derive(Clone, Debug)]
pub struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    /// Resolution order: `--data-dir` flag, `LINKSET_DATA_DIR`, then the
    /// platform data directory joined with the fixed subpath.
    pub fn resolve(flag: Option<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = flag
            .or_else(|| std::env::var_os("LINKSET_DATA_DIR").map(PathBuf::from))
            .or_else(|| dirs::data_local_dir().map(|base| base.join(APP_SUBPATH)))
            .context("could not determine an application data directory")?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join(LOGS_SUBPATH)
    }
}
