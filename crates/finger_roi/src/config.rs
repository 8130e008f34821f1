use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    algorithms::ChainApproximation,
    error::{FingerRoiError, Result},
    landmarks::Finger,
};

/// Tunables for the per-finger pipeline
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Grayscale intensity above which a segmented pixel counts as foreground
    pub mask_threshold: u8,
    /// Black border added around the source image before the finger loop
    pub padding: u32,
    /// Fraction added to each side length of a finger's bounding rectangle
    #[schemars(range(min = 0.0, max = 2.0))]
    pub roi_margin: f64,
    /// Radius in pixels of the joint markers drawn on each ROI
    pub marker_radius: i32,
    /// RGB colour of the joint markers
    pub marker_color: [u8; 3],
    /// Fingers to crop, in output order
    pub fingers: Vec<Finger>,
    pub chain_approximation: ChainApproximation,
    /// Scale the source so its longest edge has this length before processing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize_longest_edge: Option<u32>,
    /// Also write a landmark/contour debug overlay next to the mask
    pub write_overlay: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mask_threshold: 11,
            padding: 200,
            roi_margin: 0.15,
            marker_radius: 3,
            marker_color: [255, 0, 0],
            fingers: Finger::ROI_FINGERS.to_vec(),
            chain_approximation: ChainApproximation::Simple,
            resize_longest_edge: None,
            write_overlay: false,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.roi_margin.is_finite() || self.roi_margin < 0.0 {
            return Err(FingerRoiError::InvalidConfig(format!(
                "roi_margin must be a non-negative number, got {}",
                self.roi_margin
            )));
        }
        if self.marker_radius <= 0 {
            return Err(FingerRoiError::InvalidConfig(format!(
                "marker_radius must be positive, got {}",
                self.marker_radius
            )));
        }
        if self.fingers.is_empty() {
            return Err(FingerRoiError::InvalidConfig("fingers must not be empty".to_string()));
        }
        if self.resize_longest_edge == Some(0) {
            return Err(FingerRoiError::InvalidConfig(
                "resize_longest_edge must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the JSON schema for the configuration
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(PipelineConfig)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: PipelineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&fs::read_to_string(path_ref)?),
            Some("json") => Self::from_json(&fs::read_to_string(path_ref)?),
            _ => Err(FingerRoiError::UnsupportedFileFormat),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save configuration, choosing TOML or JSON from the file extension
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path_ref = path.as_ref();
        let content = match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => self.to_toml()?,
            Some("json") => self.to_json()?,
            _ => return Err(FingerRoiError::UnsupportedFileFormat),
        };
        fs::write(path_ref, content)?;
        Ok(())
    }
}
