use finger_roi::{
    FileSegmenter, FingerRoiPipeline, JsonLandmarkDetector, OutputDirs, PipelineConfig,
    ProcessReport, Result,
};
use std::path::{Path, PathBuf};

/// Everything needed to process a single image from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessJob {
    pub image: PathBuf,
    /// Landmark JSON; defaults to the image path with a `.json` extension
    pub landmarks: Option<PathBuf>,
    /// Pre-segmented image; without it the source itself is thresholded
    pub segmented: Option<PathBuf>,
    pub masks_dir: PathBuf,
    pub fingers_dir: PathBuf,
    pub config: Option<PathBuf>,
}

impl ProcessJob {
    /// Configuration from `--config`, or the defaults
    pub fn load_config(&self) -> Result<PipelineConfig> {
        match &self.config {
            Some(path) => PipelineConfig::from_file(path),
            None => Ok(PipelineConfig::default()),
        }
    }

    pub fn outputs(&self) -> OutputDirs {
        OutputDirs::new(&self.masks_dir, &self.fingers_dir)
    }

    /// Assemble the pipeline this job describes
    pub fn build_pipeline(&self) -> Result<FingerRoiPipeline> {
        let detector = match &self.landmarks {
            Some(path) => JsonLandmarkDetector::from_file(path),
            None => JsonLandmarkDetector::sidecar(),
        };

        let mut builder = FingerRoiPipeline::builder()
            .with_detector(detector)
            .with_config(self.load_config()?);

        if let Some(path) = &self.segmented {
            builder = builder.with_segmenter(FileSegmenter::open(path)?);
        }

        builder.build()
    }

    pub fn run(&self) -> Result<ProcessReport> {
        let pipeline = self.build_pipeline()?;
        pipeline.process_path(&self.image, &self.outputs())
    }
}

/// Write the default configuration; the format follows the file extension
pub fn init_config<P: AsRef<Path>>(path: P) -> Result<()> {
    PipelineConfig::default().to_file(path)
}

/// Pretty JSON schema of the configuration file
pub fn config_schema() -> Result<String> {
    Ok(serde_json::to_string_pretty(&PipelineConfig::schema())?)
}

/// One-line human summary of a finished job
pub fn summarize(report: &ProcessReport) -> String {
    match report {
        ProcessReport::NoHandDetected => "no hand detected, nothing written".to_string(),
        ProcessReport::Completed { finger_outputs, skipped_fingers, mask_output, overlay_output } => {
            let mut summary = format!(
                "{} finger ROIs written, mask at {}",
                finger_outputs.len(),
                mask_output.display()
            );
            if !skipped_fingers.is_empty() {
                let names: Vec<&str> = skipped_fingers.iter().map(|f| f.name()).collect();
                summary.push_str(&format!(", skipped {}", names.join(", ")));
            }
            if let Some(overlay) = overlay_output {
                summary.push_str(&format!(", overlay at {}", overlay.display()));
            }
            summary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finger_roi::{Finger, FingerRoiError};

    fn job(dir: &Path) -> ProcessJob {
        ProcessJob {
            image: dir.join("hand.jpg"),
            landmarks: None,
            segmented: None,
            masks_dir: dir.join("masks"),
            fingers_dir: dir.join("fingers"),
            config: None,
        }
    }

    #[test]
    fn test_default_config_without_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(job(dir.path()).load_config().unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_config_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("roi.toml");
        std::fs::write(&config_path, "mask_threshold = 40\nfingers = [\"RING\"]\n").unwrap();

        let job = ProcessJob { config: Some(config_path), ..job(dir.path()) };
        let pipeline = job.build_pipeline().unwrap();
        assert_eq!(pipeline.config().mask_threshold, 40);
        assert_eq!(pipeline.config().fingers, vec![Finger::Ring]);
    }

    #[test]
    fn test_missing_segmented_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let job = ProcessJob { segmented: Some(dir.path().join("missing.png")), ..job(dir.path()) };
        assert!(matches!(job.build_pipeline(), Err(FingerRoiError::ImageLoad(_))));
    }

    #[test]
    fn test_init_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.json");
        init_config(&path).unwrap();
        assert_eq!(PipelineConfig::from_file(&path).unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_schema_mentions_fields() {
        let schema = config_schema().unwrap();
        assert!(schema.contains("mask_threshold"));
        assert!(schema.contains("roi_margin"));
    }

    #[test]
    fn test_summary() {
        assert_eq!(summarize(&ProcessReport::NoHandDetected), "no hand detected, nothing written");

        let report = ProcessReport::Completed {
            finger_outputs: vec![PathBuf::from("f/INDEXa.png")],
            skipped_fingers: vec![Finger::Pinky],
            mask_output: PathBuf::from("m/seg_a.png"),
            overlay_output: None,
        };
        assert_eq!(summarize(&report), "1 finger ROIs written, mask at m/seg_a.png, skipped PINKY");
    }
}
