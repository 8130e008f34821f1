pub mod builder;

use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgb, RgbImage};
use tracing::{debug, info, warn};
use crate::{
    algorithms::{
        closest_contour_points, draw_landmarks_and_connections, draw_marker,
        extract_rotated_roi, landmarks_to_pixel_coordinates, pad_image, resize_longest_edge,
        ImageprocContourExtractor, MaskBuilder, RoiResult,
    },
    config::PipelineConfig,
    error::{FingerRoiError, Result},
    io::OutputDirs,
    landmarks::{Finger, HandDetections, TIP_LANDMARKS},
    traits::{ContrastEnhancer, HandLandmarkDetector, Segmenter},
    types::{Contour, ContourNeighbors, PixelPoint},
};

/// One finger's crop with its two joints in ROI-local coordinates
#[derive(Debug, Clone)]
pub struct FingerRoi {
    pub finger: Finger,
    pub roi: RoiResult,
    pub joints: [PixelPoint; 2],
}

impl FingerRoi {
    pub fn is_blank(&self) -> bool {
        self.roi.is_blank()
    }
}

/// Everything computed for the first hand of an image
#[derive(Debug, Clone)]
pub struct HandRois {
    /// Landmarks in the source image frame, index-aligned with the detector output
    pub landmark_pixels: Vec<PixelPoint>,
    pub contour: Contour,
    pub neighbors: Vec<ContourNeighbors>,
    /// Binary foreground mask replicated to RGB; the ROIs are cut from this image
    pub mask: RgbImage,
    /// Source framed by a black border. ROI geometry is not expressed in this frame.
    pub padded_source: RgbImage,
    pub fingers: Vec<FingerRoi>,
    /// Fingers whose rectangle could not be computed; they have no entry in `fingers`
    pub failed_fingers: Vec<Finger>,
}

/// A finger whose rectangle cannot be computed is dropped; any other error fails the image
fn skip_failed_finger(finger: Finger, result: Result<RoiResult>) -> Result<Option<RoiResult>> {
    match result {
        Ok(roi) => Ok(Some(roi)),
        Err(FingerRoiError::GeometricComputation(reason)) => {
            warn!(%finger, %reason, "could not compute finger ROI, skipping finger");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Outcome of processing one image file
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessReport {
    NoHandDetected,
    Completed {
        finger_outputs: Vec<PathBuf>,
        skipped_fingers: Vec<Finger>,
        mask_output: PathBuf,
        overlay_output: Option<PathBuf>,
    },
}

/// Per-image pipeline: landmarks + segmentation -> one aligned ROI per finger
pub struct FingerRoiPipeline {
    detector: Box<dyn HandLandmarkDetector>,
    segmenter: Box<dyn Segmenter>,
    contrast_enhancer: Box<dyn ContrastEnhancer>,
    config: PipelineConfig,
}

impl FingerRoiPipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::FingerRoiPipelineBuilder {
        builder::FingerRoiPipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        detector: Box<dyn HandLandmarkDetector>,
        segmenter: Box<dyn Segmenter>,
        contrast_enhancer: Box<dyn ContrastEnhancer>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            detector,
            segmenter,
            contrast_enhancer,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every geometric step for one image without touching the filesystem.
    ///
    /// Returns `Ok(None)` when no hand was detected. A segmentation without any
    /// foreground fails the whole image.
    pub fn process_image(&self, image: &RgbImage, detections: &HandDetections) -> Result<Option<HandRois>> {
        // Step 1: Only the first detected hand is used
        let Some(hand) = detections.first_hand()? else {
            debug!("no hand landmarks detected");
            return Ok(None);
        };

        // Step 2: Landmarks into source pixel coordinates
        let landmark_pixels = landmarks_to_pixel_coordinates(hand, image.width(), image.height());

        // Step 3: Contrast enhancement, then segmentation
        let enhanced = self.contrast_enhancer.enhance(image);
        let segmented = self.segmenter.segment(&enhanced)?;

        // Step 4: Binary mask and its largest outer contour
        let mask = MaskBuilder { threshold: self.config.mask_threshold }.build(&segmented)?;
        let contour = ImageprocContourExtractor::new(self.config.chain_approximation).extract(&mask)?;
        let mask = DynamicImage::ImageLuma8(mask).to_rgb8();

        // Step 5: Contour neighbours of every landmark
        let neighbors = closest_contour_points(&landmark_pixels, &contour, &TIP_LANDMARKS)?;

        // Step 6: Padded source, kept alongside the results
        let padded_source = pad_image(image, self.config.padding);
        debug!(
            width = padded_source.width(),
            height = padded_source.height(),
            "padded source image"
        );

        // Step 7: One rotated crop per finger, cut from the mask
        let marker_color = Rgb(self.config.marker_color);
        let mut fingers = Vec::with_capacity(self.config.fingers.len());
        let mut failed_fingers = Vec::new();
        for &finger in &self.config.fingers {
            let landmarks = finger.landmarks();

            let mut points: Vec<PixelPoint> = landmarks
                .joints
                .iter()
                .flat_map(|&joint| [neighbors[joint].left, neighbors[joint].right])
                .collect();
            points.push(landmark_pixels[landmarks.tip]);

            let result = extract_rotated_roi(&mask, &points, self.config.roi_margin);
            let Some(mut roi) = skip_failed_finger(finger, result)? else {
                failed_fingers.push(finger);
                continue;
            };
            let joints = landmarks.joints.map(|joint| roi.to_roi_local(landmark_pixels[joint]));

            if !roi.is_blank() {
                for joint in joints {
                    draw_marker(roi.image_mut(), joint, self.config.marker_radius, marker_color);
                }
            }

            debug!(%finger, ?joints, "finger ROI ready");
            fingers.push(FingerRoi { finger, roi, joints });
        }

        Ok(Some(HandRois {
            landmark_pixels,
            contour,
            neighbors,
            mask,
            padded_source,
            fingers,
            failed_fingers,
        }))
    }

    /// Detect, process and write all outputs for the image at `path`
    pub fn process_path(&self, path: &Path, outputs: &OutputDirs) -> Result<ProcessReport> {
        info!(path = %path.display(), "processing image");

        let (mut image, detections) = self.detector.detect(path)?;
        if let Some(target) = self.config.resize_longest_edge {
            image = resize_longest_edge(&image, target);
        }

        let Some(hand) = self.process_image(&image, &detections)? else {
            warn!(path = %path.display(), "No landmarks detected, skipping save operation");
            return Ok(ProcessReport::NoHandDetected);
        };

        outputs.create_all()?;

        let mut finger_outputs = Vec::new();
        let mut skipped_fingers = hand.failed_fingers.clone();
        for finger_roi in &hand.fingers {
            let output = outputs.finger_path(finger_roi.finger, path);
            if finger_roi.is_blank() {
                warn!(
                    finger = %finger_roi.finger,
                    output = %output.display(),
                    "ROI image is empty, skipping save operation"
                );
                skipped_fingers.push(finger_roi.finger);
                continue;
            }
            finger_roi.roi.image().save(&output)?;
            finger_outputs.push(output);
        }

        let mask_output = outputs.mask_path(path);
        hand.mask.save(&mask_output)?;

        let overlay_output = if self.config.write_overlay {
            let overlay_path = outputs.overlay_path(path);
            draw_landmarks_and_connections(&image, &hand.landmark_pixels, &hand.neighbors)
                .save(&overlay_path)?;
            Some(overlay_path)
        } else {
            None
        };

        info!(
            path = %path.display(),
            written = finger_outputs.len(),
            skipped = skipped_fingers.len(),
            "finished image"
        );

        Ok(ProcessReport::Completed {
            finger_outputs,
            skipped_fingers,
            mask_output,
            overlay_output,
        })
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: threshold {}, margin {:.2}, fingers [{}]",
            self.config.mask_threshold,
            self.config.roi_margin,
            self.config
                .fingers
                .iter()
                .map(|f| f.name())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
