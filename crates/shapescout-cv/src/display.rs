//! Preview window.

use crate::Result;
use opencv::{core::Mat, highgui};

/// Key code `wait_key` reports for escape.
pub const KEY_ESC: i32 = 27;

/// Thin wrapper over the highgui preview window.
pub struct Window {
    name: String,
}

impl Window {
    pub fn new(name: &str) -> Result<Self> {
        highgui::named_window(name, highgui::WINDOW_AUTOSIZE)?;
        Ok(Self {
            name: name.to_string(),
        })
    }

    pub fn show(&self, frame: &Mat) -> Result<()> {
        highgui::imshow(&self.name, frame)?;
        Ok(())
    }

    /// Pump the UI event loop for one millisecond and report the pressed
    /// key, -1 when none.
    pub fn poll_key(&self) -> Result<i32> {
        Ok(highgui::wait_key(1)?)
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        let _ = highgui::destroy_window(&self.name);
    }
}
