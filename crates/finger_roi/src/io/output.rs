use std::fs;
use std::path::{Path, PathBuf};

use crate::{error::Result, landmarks::Finger};

/// Where per-image outputs are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    pub masks: PathBuf,
    pub fingers: PathBuf,
}

fn basename(source: &Path) -> String {
    source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl OutputDirs {
    pub fn new<M: Into<PathBuf>, F: Into<PathBuf>>(masks: M, fingers: F) -> Self {
        Self { masks: masks.into(), fingers: fingers.into() }
    }

    /// `<fingers>/<FINGER><basename>`
    pub fn finger_path(&self, finger: Finger, source: &Path) -> PathBuf {
        self.fingers.join(format!("{}{}", finger.name(), basename(source)))
    }

    /// `<masks>/seg_<basename>`
    pub fn mask_path(&self, source: &Path) -> PathBuf {
        self.masks.join(format!("seg_{}", basename(source)))
    }

    /// `<masks>/overlay_<basename>`
    pub fn overlay_path(&self, source: &Path) -> PathBuf {
        self.masks.join(format!("overlay_{}", basename(source)))
    }

    pub fn create_all(&self) -> Result<()> {
        fs::create_dir_all(&self.masks)?;
        fs::create_dir_all(&self.fingers)?;
        Ok(())
    }
}
