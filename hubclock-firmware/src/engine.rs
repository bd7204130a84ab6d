//! Display engine shared between the refresh and drawing paths
//!
//! The engine sits behind a critical-section mutex. The refresh hook holds
//! it for one scan step; the drawing side holds it for one `draw_iter`
//! batch at a time, so a long frame never stalls refresh for more than a
//! single primitive.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use hubclock_core::{DisplayEngine, PixelWriter};
use hubclock_render::PixelSink;

use crate::board::{PANEL_HEIGHT, PANEL_WIDTH};

pub type Engine = DisplayEngine<PANEL_WIDTH, PANEL_HEIGHT>;
pub type EngineMutex = Mutex<CriticalSectionRawMutex, RefCell<Engine>>;

/// Handle to the shared engine
#[derive(Clone, Copy)]
pub struct SharedEngine(&'static EngineMutex);

impl SharedEngine {
    pub fn new(engine: &'static EngineMutex) -> Self {
        Self(engine)
    }

    /// Run `f` with exclusive access to the engine
    pub fn with<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        self.0.lock(|cell| f(&mut cell.borrow_mut()))
    }

    pub fn is_swap_pending(&self) -> bool {
        self.0.lock(|cell| cell.borrow().is_swap_pending())
    }

    pub fn request_swap(&self) {
        self.with(|engine| engine.request_swap());
    }
}

impl PixelSink<PANEL_WIDTH, PANEL_HEIGHT> for SharedEngine {
    fn with_pixels<R>(
        &mut self,
        f: impl FnOnce(&mut PixelWriter<'_, PANEL_WIDTH, PANEL_HEIGHT>) -> R,
    ) -> R {
        self.with(|engine| f(&mut engine.pixels()))
    }
}
