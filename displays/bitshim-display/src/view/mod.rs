//! Display views
//!
//! - [`matrix`] - LEDs as squares (basic and small views)
//! - [`text`] - LEDs as text characters
//! - [`enhanced`] - Small matrix plus text pane and live pin panel
//! - [`text_pane`], [`pin_widget`] - Parts of the enhanced view

pub mod enhanced;
pub mod matrix;
pub mod pin_widget;
pub mod text;
pub mod text_pane;

use alloc::rc::Rc;
use core::cell::RefCell;

use bitshim_core::config::ViewMode;
use bitshim_core::pin::PinRegistry;
use bitshim_core::{Error, Framebuffer, Result};

pub use enhanced::{EnhancedView, PinPanel, MAX_PIN_WIDGETS};
pub use matrix::MatrixView;
pub use text::TextView;

use crate::surface::{Surface, SurfaceError};

/// The view currently rendering the framebuffer
pub enum DisplayView {
    Basic(MatrixView),
    Small(MatrixView),
    Text(TextView),
    Enhanced(EnhancedView),
}

impl DisplayView {
    /// Build the view for `mode`
    ///
    /// Nothing is drawn until the first update.
    pub fn new<S: Surface + 'static>(
        mode: ViewMode,
        surface: &Rc<RefCell<S>>,
        rows: usize,
        cols: usize,
        registry: &PinRegistry,
    ) -> Result<Self> {
        let screen = surface
            .try_borrow()
            .map_err(|_| Error::InvalidState("surface is busy"))?
            .dimensions();
        let view = match mode {
            ViewMode::Basic => DisplayView::Basic(MatrixView::basic(screen, rows, cols)),
            ViewMode::Small => DisplayView::Small(MatrixView::small(screen, rows, cols)),
            ViewMode::Text => DisplayView::Text(TextView::new(rows, cols)),
            ViewMode::Enhanced => {
                DisplayView::Enhanced(EnhancedView::new(surface, screen, rows, cols, registry))
            }
            ViewMode::Standard => return Err(Error::Unsupported("standard view")),
        };
        info!("display view is now {}", mode.name());
        Ok(view)
    }

    pub fn mode(&self) -> ViewMode {
        match self {
            DisplayView::Basic(_) => ViewMode::Basic,
            DisplayView::Small(_) => ViewMode::Small,
            DisplayView::Text(_) => ViewMode::Text,
            DisplayView::Enhanced(_) => ViewMode::Enhanced,
        }
    }

    /// Render framebuffer changes; `hint` is the one cell that changed
    pub fn update<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        framebuffer: &Framebuffer,
        hint: Option<(usize, usize)>,
    ) -> core::result::Result<(), SurfaceError> {
        match self {
            DisplayView::Basic(view) | DisplayView::Small(view) => {
                view.update(surface, framebuffer, hint)
            }
            DisplayView::Text(view) => view.update(surface, framebuffer, hint),
            DisplayView::Enhanced(view) => view.update(surface, framebuffer, hint),
        }
    }

    /// Show the text being displayed, where the view has room for it
    pub fn update_string<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        text: &str,
    ) -> core::result::Result<(), SurfaceError> {
        match self {
            DisplayView::Enhanced(view) => view.update_string(surface, text),
            _ => Ok(()),
        }
    }

    /// Mark character `index` of the text as the one on the LEDs
    pub fn update_string_pos<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        index: usize,
    ) -> core::result::Result<(), SurfaceError> {
        match self {
            DisplayView::Enhanced(view) => view.update_string_pos(surface, index),
            _ => Ok(()),
        }
    }
}
