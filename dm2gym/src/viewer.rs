//! On-screen viewers for `human` rendering.
//!
//! A viewer is created lazily by [`DmControlEnv`](crate::DmControlEnv) on the first call
//! of `render("human", ..)` and lives until the environment is closed. Two backends are
//! available:
//!
//! * [`ViewerBackend::Simple`] (`"gym"`) - downscales images wider than a maximum width
//!   and stretches later frames to the size of the window, like the simple image viewer
//!   of gym.
//! * [`ViewerBackend::OpenCv`] (`"opencv"`) - shows images at their native size, like an
//!   OpenCV highgui window, and optionally closes on Escape.
//!
//! Windows are provided by `minifb` and require the `window` feature. Without it,
//! [`open_viewer`] fails with [`Dm2GymError::ViewerUnavailable`]; a custom
//! [`ViewerBuilder`] can be installed with
//! [`DmControlEnv::with_viewer_builder`](crate::DmControlEnv::with_viewer_builder).
#[cfg(feature = "window")]
mod window;
use anyhow::Result;
use dm2gym_core::error::Dm2GymError;
use image::{imageops, RgbImage};
use std::{fmt, str::FromStr};

/// Displays images on screen.
pub trait Viewer {
    /// Shows an image.
    fn imshow(&mut self, img: &RgbImage) -> Result<()>;

    /// `false` once the window has been closed.
    fn is_open(&self) -> bool;

    /// Closes the window.
    fn close(&mut self);
}

/// Viewer backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerBackend {
    /// Window downscaling wide images (`"gym"`).
    Simple,

    /// Auto-sized window (`"opencv"`).
    OpenCv,
}

impl ViewerBackend {
    /// Name of the backend in configurations.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "gym",
            Self::OpenCv => "opencv",
        }
    }
}

impl fmt::Display for ViewerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewerBackend {
    type Err = Dm2GymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gym" => Ok(Self::Simple),
            "opencv" => Ok(Self::OpenCv),
            _ => Err(Dm2GymError::InvalidViewerBackend(s.to_string())),
        }
    }
}

/// Settings given to a [`ViewerBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Window title.
    pub title: String,

    /// Images wider than this are downscaled by [`ViewerBackend::Simple`].
    pub max_width: usize,

    /// Close [`ViewerBackend::OpenCv`] windows on Escape.
    pub escape_to_exit: bool,
}

/// Opens a viewer of a backend.
pub type ViewerBuilder = Box<dyn Fn(ViewerBackend, &ViewerConfig) -> Result<Box<dyn Viewer>>>;

/// Opens a window of the given backend.
#[cfg(feature = "window")]
pub fn open_viewer(backend: ViewerBackend, config: &ViewerConfig) -> Result<Box<dyn Viewer>> {
    Ok(match backend {
        ViewerBackend::Simple => Box::new(window::SimpleImageViewer::new(config)),
        ViewerBackend::OpenCv => Box::new(window::OpenCvImageViewer::new(config)),
    })
}

/// Opens a window of the given backend.
#[cfg(not(feature = "window"))]
pub fn open_viewer(backend: ViewerBackend, _config: &ViewerConfig) -> Result<Box<dyn Viewer>> {
    Err(Dm2GymError::ViewerUnavailable(format!(
        "backend '{}' needs the `window` feature",
        backend
    ))
    .into())
}

/// Downscales an image wider than `max_width`, keeping the aspect ratio.
pub fn fit_width(img: &RgbImage, max_width: usize) -> RgbImage {
    let (w, h) = img.dimensions();
    if (w as usize) <= max_width {
        return img.clone();
    }
    let scale = max_width as f64 / w as f64;
    let nw = ((w as f64 * scale) as u32).max(1);
    let nh = ((h as f64 * scale) as u32).max(1);
    imageops::resize(img, nw, nh, imageops::FilterType::Triangle)
}

/// Resizes an image to `width` x `height`, ignoring the aspect ratio.
pub fn stretch(img: &RgbImage, width: u32, height: u32) -> RgbImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    imageops::resize(img, width, height, imageops::FilterType::Triangle)
}

/// Packs pixels into `0RGB` words, the frame buffer format of windows.
pub fn pack_rgb(img: &RgbImage) -> Vec<u32> {
    img.pixels()
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect()
}
