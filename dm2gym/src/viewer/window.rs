use super::{fit_width, pack_rgb, stretch, Viewer, ViewerConfig};
use anyhow::{anyhow, Result};
use image::RgbImage;
use minifb::{Key, Window, WindowOptions};

fn open_window(title: &str, img: &RgbImage) -> Result<Window> {
    let (w, h) = img.dimensions();
    Window::new(title, w as usize, h as usize, WindowOptions::default())
        .map_err(|e| anyhow!("Failed to open window: {}", e))
}

fn show(window: &mut Window, img: &RgbImage) -> Result<()> {
    let (w, h) = img.dimensions();
    window
        .update_with_buffer(&pack_rgb(img), w as usize, h as usize)
        .map_err(|e| anyhow!("Failed to update window: {}", e))
}

/// Window sized by the first image, downscaling images wider than the maximum width.
pub(super) struct SimpleImageViewer {
    title: String,
    max_width: usize,
    window: Option<Window>,
    is_open: bool,
}

impl SimpleImageViewer {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            title: config.title.clone(),
            max_width: config.max_width,
            window: None,
            is_open: true,
        }
    }
}

impl Viewer for SimpleImageViewer {
    fn imshow(&mut self, img: &RgbImage) -> Result<()> {
        let img = fit_width(img, self.max_width);
        let mut window = match self.window.take() {
            Some(window) => window,
            None => open_window(&self.title, &img)?,
        };
        // Frames of another size are stretched to the window
        let (w, h) = window.get_size();
        let img = stretch(&img, w as u32, h as u32);
        let shown = show(&mut window, &img);
        self.is_open = window.is_open();
        self.window = Some(window);
        shown
    }

    fn is_open(&self) -> bool {
        self.is_open
    }

    fn close(&mut self) {
        self.window = None;
        self.is_open = false;
    }
}

/// Auto-sized window showing images at their native size.
pub(super) struct OpenCvImageViewer {
    title: String,
    escape_to_exit: bool,
    window: Option<Window>,
    is_open: bool,
}

impl OpenCvImageViewer {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            title: config.title.clone(),
            escape_to_exit: config.escape_to_exit,
            window: None,
            is_open: true,
        }
    }
}

impl Viewer for OpenCvImageViewer {
    fn imshow(&mut self, img: &RgbImage) -> Result<()> {
        if !self.is_open {
            return Ok(());
        }

        // Reopen on size change, as an autosized window does
        let resized = match self.window.as_ref() {
            Some(window) => window.get_size() != (img.width() as usize, img.height() as usize),
            None => true,
        };
        if resized {
            self.window = Some(open_window(&self.title, img)?);
        }

        if let Some(window) = self.window.as_mut() {
            show(window, img)?;
            if self.escape_to_exit && window.is_key_down(Key::Escape) {
                self.window = None;
                self.is_open = false;
            }
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.is_open
    }

    fn close(&mut self) {
        self.window = None;
        self.is_open = false;
    }
}
