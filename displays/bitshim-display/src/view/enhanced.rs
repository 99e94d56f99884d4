//! Enhanced view
//!
//! A small LED matrix, the text being shown underneath it, and a panel of
//! widgets for the pins the program has used. The panel is fed by hooks on
//! every registered pin, so it updates as pin operations happen.

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

use bitshim_core::pin::{hook, Hook, PinEvent, PinOp, PinRegistry};
use bitshim_core::{Framebuffer, HookError};
use heapless::Vec;

use super::matrix::MatrixView;
use super::pin_widget::{truncated, PinWidget, Reading, WidgetSize};
use super::text_pane::TextPane;
use crate::surface::{self, Surface, SurfaceError};

/// Most pins shown at once; later pins are not shown
pub const MAX_PIN_WIDGETS: usize = 6;

/// Top of the pin panel, in pixels
pub const PIN_AREA_TOP: u16 = 156;

/// Widgets for the pins seen so far, in order of first use
#[derive(Debug)]
pub struct PinPanel {
    widgets: Vec<PinWidget, MAX_PIN_WIDGETS>,
    area_width: u16,
    area_height: u16,
}

impl PinPanel {
    /// Panel below the matrix on a screen of the given size
    pub fn new(screen: (u16, u16)) -> Self {
        Self {
            widgets: Vec::new(),
            area_width: screen.0,
            // The screens this targets are square, so width sizes the area
            area_height: screen.0.saturating_sub(PIN_AREA_TOP),
        }
    }

    pub fn widgets(&self) -> &[PinWidget] {
        &self.widgets
    }

    pub fn widget(&self, name: &str) -> Option<&PinWidget> {
        self.widgets.iter().find(|w| w.name() == name)
    }

    /// Show a completed pin operation
    ///
    /// Returns whether the pin is on the panel.
    pub fn update<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        event: &PinEvent<'_>,
    ) -> Result<bool, SurfaceError> {
        let name: heapless::String<{ bitshim_core::config::MAX_NAME_LEN }> = truncated(event.pin);
        let role = event.op.role();

        let index = match self.widgets.iter().position(|w| w.name() == name.as_str()) {
            Some(index) => {
                let widget = &mut self.widgets[index];
                if widget.role() != role {
                    debug!("pin {} now shown as {}", event.pin, role.name());
                    widget.rebuild(role);
                }
                index
            }
            None => {
                let size = WidgetSize::for_count(self.widgets.len() + 1);
                if self.widgets.push(PinWidget::new(&name, role, size)).is_err() {
                    debug!("no room to show pin {}", event.pin);
                    return Ok(false);
                }
                self.layout(surface)?;
                self.widgets.len() - 1
            }
        };

        self.widgets[index].set_reading(Reading::from(&event.value));
        for widget in self.widgets.iter_mut() {
            widget.render(surface)?;
        }
        Ok(true)
    }

    /// Size and place every widget for the current pin count
    ///
    /// One or two pins are stacked full width; more go in two columns.
    fn layout<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), SurfaceError> {
        let count = self.widgets.len();
        let size = WidgetSize::for_count(count);
        let (width, _) = size.dimensions();
        let rows = if count == 2 { 2 } else { (count + 1) / 2 };
        let cols = if count <= 2 { 1 } else { 2 };

        // Evenly spaced rows, rounded to the nearest pixel
        let area_height = u32::from(self.area_height);
        let rows = rows.max(1) as u32;
        let right = self.area_width.saturating_sub(width);

        for (index, widget) in self.widgets.iter_mut().enumerate() {
            let (x, row) = if cols == 1 {
                (0, index as u32)
            } else {
                (right * (index & 1) as u16, (index >> 1) as u32)
            };
            let offset = (2 * area_height * row + rows) / (2 * rows);
            widget.place(surface, size, x, PIN_AREA_TOP + offset as u16)?;
        }
        Ok(())
    }
}

/// Matrix, text pane and live pin panel
pub struct EnhancedView {
    matrix: MatrixView,
    pane: TextPane,
    panel: Rc<RefCell<PinPanel>>,
    registry: PinRegistry,
    hook: Hook,
}

impl EnhancedView {
    /// Build the view and subscribe to every registered pin
    ///
    /// Pins registered after this are not watched.
    pub fn new<S: Surface + 'static>(
        surface: &Rc<RefCell<S>>,
        screen: (u16, u16),
        rows: usize,
        cols: usize,
        registry: &PinRegistry,
    ) -> Self {
        let panel = Rc::new(RefCell::new(PinPanel::new(screen)));
        let hook = panel_hook(Rc::downgrade(&panel), Rc::downgrade(surface));

        let mut subscribed = 0;
        for op in PinOp::ALL {
            subscribed += registry.add_hook_all(op, &hook);
        }
        info!("enhanced view watching {} pin operations", subscribed);

        Self {
            matrix: MatrixView::small(screen, rows, cols),
            pane: TextPane::new(),
            panel,
            registry: registry.clone(),
            hook,
        }
    }

    pub fn matrix(&self) -> &MatrixView {
        &self.matrix
    }

    pub fn pane(&self) -> &TextPane {
        &self.pane
    }

    /// Shared pin panel
    pub fn panel(&self) -> &Rc<RefCell<PinPanel>> {
        &self.panel
    }

    pub fn update<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        framebuffer: &Framebuffer,
        hint: Option<(usize, usize)>,
    ) -> Result<(), SurfaceError> {
        self.matrix.update(surface, framebuffer, hint)
    }

    pub fn update_string<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        text: &str,
    ) -> Result<(), SurfaceError> {
        self.pane.set_text(text);
        self.pane.render(surface)
    }

    pub fn update_string_pos<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        index: usize,
    ) -> Result<(), SurfaceError> {
        self.pane.set_position(index);
        self.pane.render(surface)
    }
}

impl Drop for EnhancedView {
    fn drop(&mut self) {
        let removed: usize = PinOp::ALL
            .iter()
            .map(|&op| self.registry.remove_hook_all(op, &self.hook))
            .sum();
        debug!("enhanced view released {} pin hooks", removed);
    }
}

fn panel_hook<S: Surface + 'static>(
    panel: Weak<RefCell<PinPanel>>,
    surface: Weak<RefCell<S>>,
) -> Hook {
    hook(move |event| {
        let panel = panel.upgrade().ok_or(HookError::Detached)?;
        let screen = surface.upgrade().ok_or(HookError::Detached)?;
        let mut panel = panel.try_borrow_mut().map_err(|_| HookError::Busy)?;
        let mut screen = screen.try_borrow_mut().map_err(|_| HookError::Busy)?;
        surface::batch(&mut *screen, |s| panel.update(s, event))
            .map(|_| ())
            .map_err(|_| HookError::Rejected)
    })
}
