//! Hand landmark topology and detector output types.
//!
//! Landmark indices follow the 21-point MediaPipe hand model:
//! 0 is the wrist, then four points per finger from the knuckle to the tip.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{FingerRoiError, Result};

/// Number of landmarks the detector emits per hand
pub const HAND_LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_FINGER_MCP: usize = 5;
pub const INDEX_FINGER_PIP: usize = 6;
pub const INDEX_FINGER_DIP: usize = 7;
pub const INDEX_FINGER_TIP: usize = 8;
pub const MIDDLE_FINGER_MCP: usize = 9;
pub const MIDDLE_FINGER_PIP: usize = 10;
pub const MIDDLE_FINGER_DIP: usize = 11;
pub const MIDDLE_FINGER_TIP: usize = 12;
pub const RING_FINGER_MCP: usize = 13;
pub const RING_FINGER_PIP: usize = 14;
pub const RING_FINGER_DIP: usize = 15;
pub const RING_FINGER_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Landmarks that use the fingertip rule in nearest contour point search
pub const TIP_LANDMARKS: [usize; 5] = [
    THUMB_TIP,
    INDEX_FINGER_TIP,
    MIDDLE_FINGER_TIP,
    RING_FINGER_TIP,
    PINKY_TIP,
];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

/// Landmark indices associated with one finger: the tip and the two joints
/// below it (DIP then PIP, or IP then MCP for the thumb)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerLandmarks {
    pub tip: usize,
    pub joints: [usize; 2],
}

const FINGER_LANDMARKS: [(Finger, FingerLandmarks); 5] = [
    (Finger::Thumb, FingerLandmarks { tip: THUMB_TIP, joints: [THUMB_IP, THUMB_MCP] }),
    (Finger::Index, FingerLandmarks { tip: INDEX_FINGER_TIP, joints: [INDEX_FINGER_DIP, INDEX_FINGER_PIP] }),
    (Finger::Middle, FingerLandmarks { tip: MIDDLE_FINGER_TIP, joints: [MIDDLE_FINGER_DIP, MIDDLE_FINGER_PIP] }),
    (Finger::Ring, FingerLandmarks { tip: RING_FINGER_TIP, joints: [RING_FINGER_DIP, RING_FINGER_PIP] }),
    (Finger::Pinky, FingerLandmarks { tip: PINKY_TIP, joints: [PINKY_DIP, PINKY_PIP] }),
];

impl Finger {
    /// The fingers cropped by default; the thumb is left out
    pub const ROI_FINGERS: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    pub fn landmarks(self) -> FingerLandmarks {
        // table rows follow variant order
        FINGER_LANDMARKS[self as usize].1
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

pub fn is_tip(index: usize) -> bool {
    TIP_LANDMARKS.contains(&index)
}

/// A landmark as emitted by the detector, normalised to 0..1 of the image size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct NormalizedLandmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

/// Detector result: zero or more hands of normalised landmarks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct HandDetections {
    #[serde(default)]
    pub hand_landmarks: Vec<Vec<NormalizedLandmark>>,
}

impl HandDetections {
    pub fn new(hand_landmarks: Vec<Vec<NormalizedLandmark>>) -> Self {
        Self { hand_landmarks }
    }

    pub fn is_empty(&self) -> bool {
        self.hand_landmarks.is_empty()
    }

    /// The first detected hand, checked to carry the full landmark set
    pub fn first_hand(&self) -> Result<Option<&[NormalizedLandmark]>> {
        match self.hand_landmarks.first() {
            None => Ok(None),
            Some(hand) if hand.len() != HAND_LANDMARK_COUNT => Err(FingerRoiError::LandmarkCount {
                expected: HAND_LANDMARK_COUNT,
                actual: hand.len(),
            }),
            Some(hand) => Ok(Some(hand.as_slice())),
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
