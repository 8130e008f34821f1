use crate::{
    algorithms::{HistogramEqualizer, NoContrastEnhancement, PassthroughSegmenter},
    config::PipelineConfig,
    error::Result,
    io::JsonLandmarkDetector,
    landmarks::Finger,
    pipeline::FingerRoiPipeline,
    traits::{ContrastEnhancer, HandLandmarkDetector, Segmenter},
};

/// Builder for creating finger ROI pipelines with a fluent API
pub struct FingerRoiPipelineBuilder {
    detector: Option<Box<dyn HandLandmarkDetector>>,
    segmenter: Option<Box<dyn Segmenter>>,
    contrast_enhancer: Option<Box<dyn ContrastEnhancer>>,
    config: PipelineConfig,
}

impl FingerRoiPipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            detector: None,
            segmenter: None,
            contrast_enhancer: None,
            config: PipelineConfig::default(),
        }
    }

    /// Set the hand landmark detector (replaces any existing one)
    pub fn with_detector<D>(mut self, detector: D) -> Self
    where
        D: HandLandmarkDetector + 'static,
    {
        self.detector = Some(Box::new(detector));
        self
    }

    /// Set the background segmenter (replaces any existing one)
    pub fn with_segmenter<S>(mut self, segmenter: S) -> Self
    where
        S: Segmenter + 'static,
    {
        self.segmenter = Some(Box::new(segmenter));
        self
    }

    /// Set the contrast enhancer run before segmentation
    pub fn with_contrast_enhancer<C>(mut self, enhancer: C) -> Self
    where
        C: ContrastEnhancer + 'static,
    {
        self.contrast_enhancer = Some(Box::new(enhancer));
        self
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_mask_threshold(mut self, threshold: u8) -> Self {
        self.config.mask_threshold = threshold;
        self
    }

    pub fn with_fingers(mut self, fingers: Vec<Finger>) -> Self {
        self.config.fingers = fingers;
        self
    }

    /// Also write the landmark/contour debug overlay
    pub fn with_overlay(mut self) -> Self {
        self.config.write_overlay = true;
        self
    }

    /// Build the pipeline with default components where none were given.
    ///
    /// Without a segmenter the source is thresholded directly, so contrast
    /// enhancement defaults to off; with one it defaults to histogram equalisation.
    pub fn build(self) -> Result<FingerRoiPipeline> {
        self.config.validate()?;

        let detector = self.detector
            .unwrap_or_else(|| Box::new(JsonLandmarkDetector::sidecar()));

        let (segmenter, default_enhancer): (Box<dyn Segmenter>, Box<dyn ContrastEnhancer>) =
            match self.segmenter {
                Some(segmenter) => (segmenter, Box::new(HistogramEqualizer)),
                None => (Box::new(PassthroughSegmenter), Box::new(NoContrastEnhancement)),
            };

        let contrast_enhancer = self.contrast_enhancer.unwrap_or(default_enhancer);

        Ok(FingerRoiPipeline::new(
            detector,
            segmenter,
            contrast_enhancer,
            self.config,
        ))
    }
}

impl Default for FingerRoiPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
