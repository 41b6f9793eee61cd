//! Rendering modes and options.
use crate::error::Dm2GymError;
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Camera of the tracking view, used when no camera is given.
pub const TRACKING_CAMERA: i32 = 0;

/// Default height of rendered images in pixels.
pub const DEFAULT_HEIGHT: usize = 240;

/// Default width of rendered images in pixels.
pub const DEFAULT_WIDTH: usize = 320;

/// Render modes of the gym interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    /// Shows the image in an on-screen viewer.
    #[serde(rename = "human")]
    Human,

    /// Returns the image.
    #[serde(rename = "rgb_array")]
    RgbArray,
}

impl RenderMode {
    /// Name of the mode in the gym interface.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::RgbArray => "rgb_array",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = Dm2GymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(Self::Human),
            "rgb_array" => Ok(Self::RgbArray),
            _ => Err(Dm2GymError::UnsupportedRenderMode(s.to_string())),
        }
    }
}

/// Options given to [`Env::render`](crate::Env::render).
///
/// Unset fields fall back to the tracking camera and a 320x240 image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Camera id.
    pub camera_id: Option<i32>,

    /// Height of the image.
    pub height: Option<usize>,

    /// Width of the image.
    pub width: Option<usize>,

    /// Selects the viewer backend when the viewer is created.
    ///
    /// `None` uses the backend of the environment configuration.
    pub use_opencv_renderer: Option<bool>,
}

impl RenderOptions {
    /// Sets the camera id.
    pub fn camera_id(mut self, v: i32) -> Self {
        self.camera_id = Some(v);
        self
    }

    /// Sets the image size.
    pub fn size(mut self, height: usize, width: usize) -> Self {
        self.height = Some(height);
        self.width = Some(width);
        self
    }

    /// Sets the viewer backend selection.
    pub fn use_opencv_renderer(mut self, v: bool) -> Self {
        self.use_opencv_renderer = Some(v);
        self
    }

    /// Camera setting passed to the simulator, defaults filled in.
    pub fn camera_config(&self) -> CameraConfig {
        CameraConfig {
            camera_id: self.camera_id.unwrap_or(TRACKING_CAMERA),
            height: self.height.unwrap_or(DEFAULT_HEIGHT),
            width: self.width.unwrap_or(DEFAULT_WIDTH),
        }
    }
}

/// Arguments of [`Simulator::render`](crate::Simulator::render).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraConfig {
    /// Camera id.
    pub camera_id: i32,

    /// Height of the image.
    pub height: usize,

    /// Width of the image.
    pub width: usize,
}

impl Default for CameraConfig {
    fn default() -> Self {
        RenderOptions::default().camera_config()
    }
}

/// Output of [`Env::render`](crate::Env::render).
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Raw image for [`RenderMode::RgbArray`].
    RgbArray(RgbImage),

    /// Whether the viewer is still open, for [`RenderMode::Human`].
    Human(bool),
}

impl Rendered {
    /// Returns the image of `rgb_array` mode.
    pub fn into_image(self) -> Option<RgbImage> {
        match self {
            Self::RgbArray(img) => Some(img),
            Self::Human(_) => None,
        }
    }
}
