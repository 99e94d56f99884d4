//! The micro:bit `display` object
//!
//! Owns the LED framebuffer and the active view. Every framebuffer change is
//! pushed to the view straight away; `show` and `scroll` block, sleeping on
//! the injected delay between steps.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use bitshim_core::config::{DisplayConfig, ViewMode};
use bitshim_core::pin::PinRegistry;
use bitshim_core::{Error, Font, Framebuffer, Image, Result, Symbol, MAX_BRIGHTNESS};
use bitshim_hal::LightSensor;
use embedded_hal::delay::DelayNs;

use crate::session::{ScrollSession, ShowItem, ShowSession};
use crate::surface::{self, Surface, BLACK};
use crate::view::{DisplayView, MatrixView};

/// Something `show` can put on the LEDs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Showable {
    /// Copied onto the LEDs at once
    Image(Image),
    /// Shown one character at a time
    Text(String),
    /// Shown one image at a time
    Images(Vec<Image>),
}

impl From<Image> for Showable {
    fn from(image: Image) -> Self {
        Showable::Image(image)
    }
}

impl From<Symbol> for Showable {
    fn from(symbol: Symbol) -> Self {
        Showable::Image(symbol.image())
    }
}

impl From<&str> for Showable {
    fn from(text: &str) -> Self {
        Showable::Text(String::from(text))
    }
}

impl From<String> for Showable {
    fn from(text: String) -> Self {
        Showable::Text(text)
    }
}

impl From<i32> for Showable {
    fn from(n: i32) -> Self {
        Showable::Text(format!("{}", n))
    }
}

impl From<Vec<Image>> for Showable {
    fn from(images: Vec<Image>) -> Self {
        Showable::Images(images)
    }
}

impl From<&[Symbol]> for Showable {
    fn from(symbols: &[Symbol]) -> Self {
        Showable::Images(symbols.iter().map(|s| s.image()).collect())
    }
}

/// Options of [`Display::show`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowOptions {
    /// Pause after each item, in milliseconds
    pub delay_ms: u32,
    /// Block until done; `false` is not supported
    pub wait: bool,
    /// Repeat forever
    pub looping: bool,
    /// Clear the LEDs when done
    pub clear: bool,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            delay_ms: 400,
            wait: true,
            looping: false,
            clear: false,
        }
    }
}

/// Options of [`Display::scroll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOptions {
    /// Pause after each column shift, in milliseconds
    pub delay_ms: u32,
    /// Block until done; `false` is not supported
    pub wait: bool,
    /// Repeat forever
    pub looping: bool,
    /// Give every character the full glyph width
    pub monospace: bool,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            delay_ms: 150,
            wait: true,
            looping: false,
            monospace: false,
        }
    }
}

/// LED matrix display rendered on a surface
pub struct Display<S: Surface + 'static, D: DelayNs> {
    surface: Rc<RefCell<S>>,
    delay: D,
    registry: PinRegistry,
    font: Font,
    framebuffer: Framebuffer,
    view: DisplayView,
    light_sensor: Option<Box<dyn LightSensor>>,
    strict_power: bool,
    view_update_count: u32,
}

impl<S: Surface + 'static, D: DelayNs> Display<S, D> {
    /// Create a blank display and draw it
    ///
    /// The enhanced view watches the pins already attached to `registry`.
    pub fn new(config: &DisplayConfig, surface: S, delay: D, registry: PinRegistry) -> Result<Self> {
        let rows = usize::from(config.led_rows);
        let cols = usize::from(config.led_cols);
        let framebuffer = Framebuffer::new(rows, cols)?;
        let surface = Rc::new(RefCell::new(surface));
        let view = DisplayView::new(config.mode, &surface, rows, cols, &registry)?;

        let mut display = Self {
            surface,
            delay,
            registry,
            font: Font::pendolino3(),
            framebuffer,
            view,
            light_sensor: None,
            strict_power: config.strict_power,
            view_update_count: 0,
        };
        display.redraw()?;
        info!(
            "display {}x{} in {} view",
            config.led_cols,
            config.led_rows,
            config.mode.name()
        );
        Ok(display)
    }

    /// Use another font for `show` and `scroll`
    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    /// The LED brightness grid
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// The active view
    pub fn view(&self) -> &DisplayView {
        &self.view
    }

    /// Shared handle on the surface
    pub fn surface(&self) -> &Rc<RefCell<S>> {
        &self.surface
    }

    /// View updates since the last `show`, `scroll`, `clear` or mode switch
    pub fn view_update_count(&self) -> u32 {
        self.view_update_count
    }

    /// Brightness at column `x`, row `y`
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<u8> {
        self.framebuffer.get_pixel(x, y)
    }

    /// Set the brightness at column `x`, row `y`, 0 to 9
    pub fn set_pixel(&mut self, x: usize, y: usize, value: u8) -> Result<()> {
        if self.framebuffer.set_pixel(x, y, value)? {
            self.view_update(Some((x, y)), None, None)?;
        }
        Ok(())
    }

    /// Turn every LED off
    pub fn clear(&mut self) -> Result<()> {
        self.framebuffer.clear();
        self.view_update_count = 0;
        self.view_update(None, Some(""), None)
    }

    /// Show an image, a number, text or a sequence of images
    ///
    /// An image, a single character or a one-image sequence is shown at
    /// once without any delay. Anything longer is shown item by item with
    /// `options.delay_ms` after each. With `options.looping` this never
    /// returns.
    pub fn show(&mut self, value: impl Into<Showable>, options: ShowOptions) -> Result<()> {
        let value = value.into();
        if !options.wait {
            return Err(Error::Unsupported("show without wait"));
        }
        self.view_update_count = 0;

        match value {
            Showable::Image(image) => self.show_image(&image),
            Showable::Images(ref images) if images.len() == 1 => self.show_image(&images[0]),
            Showable::Text(ref text) if text.chars().count() == 1 => {
                let c = text.chars().next().unwrap_or(' ');
                self.show_char(c, Some(text.as_str()), None)
            }
            value => {
                let mut session = ShowSession::new(value, options.looping);
                while self.step_show(&mut session)? {
                    self.delay.delay_ms(options.delay_ms);
                }
                if options.clear {
                    self.clear()?;
                }
                Ok(())
            }
        }
    }

    /// Start a show to be stepped by the caller
    pub fn start_show(&mut self, value: impl Into<Showable>, options: ShowOptions) -> Result<ShowSession> {
        if !options.wait {
            return Err(Error::Unsupported("show without wait"));
        }
        self.view_update_count = 0;
        Ok(ShowSession::new(value.into(), options.looping))
    }

    /// Show the next item of a session
    ///
    /// Returns `false` once the session is finished.
    pub fn step_show(&mut self, session: &mut ShowSession) -> Result<bool> {
        match session.next_item() {
            None => Ok(false),
            Some(ShowItem::Char { c, text, index }) => {
                self.show_char(c, Some(text), Some(index))?;
                Ok(true)
            }
            Some(ShowItem::Image(image)) => {
                self.show_image(image)?;
                Ok(true)
            }
        }
    }

    /// Scroll text across the LEDs, one column every `options.delay_ms`
    ///
    /// With `options.looping` this never returns.
    pub fn scroll(&mut self, text: &str, options: ScrollOptions) -> Result<()> {
        let mut session = self.start_scroll(text, options)?;
        while self.step_scroll(&mut session)? {
            self.delay.delay_ms(options.delay_ms);
        }
        Ok(())
    }

    /// Clear the LEDs and start a scroll to be stepped by the caller
    pub fn start_scroll(&mut self, text: &str, options: ScrollOptions) -> Result<ScrollSession> {
        if !options.wait {
            return Err(Error::Unsupported("scroll without wait"));
        }
        self.clear()?;
        self.view_update_count = 0;
        Ok(ScrollSession::new(text, &options))
    }

    /// Shift the LEDs one column left for the next step of a session
    ///
    /// Returns `false` once the session is finished.
    pub fn step_scroll(&mut self, session: &mut ScrollSession) -> Result<bool> {
        let Some(step) = session.next_step(&self.font) else {
            return Ok(false);
        };
        let column = if step.gap {
            Vec::new()
        } else {
            self.framebuffer.glyph_column(
                &self.font,
                step.c,
                usize::from(step.column),
                MAX_BRIGHTNESS,
                0,
            )
        };
        self.framebuffer.shift_left(&column);
        self.view_update(None, Some(session.text()), Some(step.index))?;
        Ok(true)
    }

    /// Current view
    pub fn mode(&self) -> ViewMode {
        self.view.mode()
    }

    /// Switch view, keeping what is on the LEDs
    ///
    /// Switching to the current view does nothing.
    pub fn set_mode(&mut self, mode: ViewMode) -> Result<()> {
        if mode == self.view.mode() {
            return Ok(());
        }
        if mode == ViewMode::Standard {
            return Err(Error::Unsupported("standard view"));
        }
        let rows = self.framebuffer.rows();
        let cols = self.framebuffer.cols();

        // Park a hookless view so the old one drops (and unsubscribes) first
        self.view = DisplayView::Basic(MatrixView::basic((0, 0), rows, cols));
        self.view = DisplayView::new(mode, &self.surface, rows, cols, &self.registry)?;
        self.redraw()
    }

    /// Install the ambient light sensor
    pub fn set_light_sensor(&mut self, sensor: Box<dyn LightSensor>) {
        self.light_sensor = Some(sensor);
    }

    /// Ambient light, 0 to 255
    pub fn read_light_level(&mut self) -> Result<u8> {
        let sensor = self
            .light_sensor
            .as_mut()
            .ok_or(Error::MissingCapability("no light sensor"))?;
        Ok((sensor.read_clear()? / 256) as u8)
    }

    /// Turn the LEDs on; always on here
    pub fn on(&mut self) -> Result<()> {
        self.power_noop("display on()")
    }

    /// Turn the LEDs off; ignored here
    pub fn off(&mut self) -> Result<()> {
        self.power_noop("display off()")
    }

    pub fn is_on(&self) -> bool {
        true
    }

    fn power_noop(&self, what: &'static str) -> Result<()> {
        if self.strict_power {
            return Err(Error::Unsupported(what));
        }
        Ok(())
    }

    /// Drop the view (unsubscribing its hooks) and give back the surface
    pub fn release(self) -> Result<(S, D)> {
        let Self {
            surface,
            delay,
            view,
            ..
        } = self;
        drop(view);
        let surface = Rc::try_unwrap(surface)
            .map_err(|_| Error::InvalidState("surface is still shared"))?
            .into_inner();
        Ok((surface, delay))
    }

    fn show_image(&mut self, image: &Image) -> Result<()> {
        self.framebuffer.blit(image);
        self.view_update(None, None, None)
    }

    fn show_char(&mut self, c: char, text: Option<&str>, index: Option<usize>) -> Result<()> {
        self.framebuffer
            .draw_glyph(&self.font, c, MAX_BRIGHTNESS, 0);
        self.view_update(None, text, index)
    }

    /// Clear the surface and draw the whole framebuffer into a fresh view
    fn redraw(&mut self) -> Result<()> {
        {
            let mut screen = self
                .surface
                .try_borrow_mut()
                .map_err(|_| Error::InvalidState("surface is busy"))?;
            let (width, height) = screen.dimensions();
            screen.fill_rect(0, 0, width, height, BLACK)?;
        }
        self.view_update_count = 0;
        self.view_update(None, None, None)
    }

    /// Push framebuffer changes to the view
    ///
    /// The text is only passed on for the first update of a show or
    /// scroll; the position is passed on every time.
    fn view_update(
        &mut self,
        hint: Option<(usize, usize)>,
        text: Option<&str>,
        index: Option<usize>,
    ) -> Result<()> {
        let first = self.view_update_count == 0;
        let mut screen = self
            .surface
            .try_borrow_mut()
            .map_err(|_| Error::InvalidState("surface is busy"))?;
        let view = &mut self.view;
        let framebuffer = &self.framebuffer;
        surface::batch(&mut *screen, |s| {
            view.update(s, framebuffer, hint)?;
            if let (Some(text), true) = (text, first) {
                view.update_string(s, text)?;
            }
            if let Some(index) = index {
                view.update_string_pos(s, index)?;
            }
            Ok(())
        })?;
        self.view_update_count = self.view_update_count.wrapping_add(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::testing::RecordingSurface;
    use crate::view::text_pane::{HIGHLIGHT_COLOR, PANE_TOP};
    use bitshim_core::led::ALL_CLOCKS;
    use bitshim_core::pin::{Pin, PinOp};
    use bitshim_hal::{Capability, Pull};
    use bitshim_hal_sim::{SimBoard, SimDelay, SimLightSensor};
    use std::vec;

    fn display(mode: ViewMode) -> (Display<RecordingSurface, SimDelay>, SimDelay) {
        display_with(mode, PinRegistry::new())
    }

    fn display_with(
        mode: ViewMode,
        registry: PinRegistry,
    ) -> (Display<RecordingSurface, SimDelay>, SimDelay) {
        let config = DisplayConfig {
            mode,
            ..DisplayConfig::default()
        };
        let delay = SimDelay::new();
        let display =
            Display::new(&config, RecordingSurface::new(240, 240), delay.clone(), registry).unwrap();
        (display, delay)
    }

    /// Colour at the centre of LED (x, y) in the small and enhanced views
    fn small_led(display: &Display<RecordingSurface, SimDelay>, x: u16, y: u16) -> u32 {
        display.surface().borrow().pixel(60 + x * 24 + 12, y * 24 + 12)
    }

    #[test]
    fn test_show_image_scenario() {
        let (mut display, delay) = display(ViewMode::Basic);
        let image: Image = "05050:05050:00000:50005:05550".parse().unwrap();
        display.show(image, ShowOptions::default()).unwrap();
        assert_eq!(display.get_pixel(1, 0), Ok(5));
        assert_eq!(display.get_pixel(0, 3), Ok(5));
        assert_eq!(display.get_pixel(0, 1), Ok(0));
        assert_eq!(display.get_pixel(2, 2), Ok(0));
        assert!(delay.sleeps_ms().is_empty());
    }

    #[test]
    fn test_show_single_character_has_no_delay() {
        let (mut display, delay) = display(ViewMode::Basic);
        display.show("I", ShowOptions::default()).unwrap();
        assert_eq!(display.get_pixel(1, 2), Ok(9));
        display.show(7, ShowOptions::default()).unwrap();
        assert!(delay.sleeps_ms().is_empty());
    }

    #[test]
    fn test_show_one_image_sequence_has_no_delay() {
        let (mut display, delay) = display(ViewMode::Basic);
        let options = ShowOptions {
            clear: true,
            ..ShowOptions::default()
        };
        display.show(&[Symbol::Heart][..], options).unwrap();
        assert!(delay.sleeps_ms().is_empty());
        assert_eq!(display.framebuffer().cells(), Symbol::Heart.image().pixels());
    }

    #[test]
    fn test_show_sequence_sleeps_after_each_item() {
        let (mut display, delay) = display(ViewMode::Basic);
        let options = ShowOptions {
            delay_ms: 250,
            clear: true,
            ..ShowOptions::default()
        };
        display.show(42, options).unwrap();
        assert_eq!(delay.sleeps_ms(), vec![250, 250]);
        assert!(display.framebuffer().cells().iter().all(|&c| c == 0));

        display.show(&ALL_CLOCKS[..], ShowOptions::default()).unwrap();
        assert_eq!(delay.sleeps_ms().len(), 2 + 12);
    }

    #[test]
    fn test_no_wait_is_unsupported() {
        let (mut display, delay) = display(ViewMode::Basic);
        let options = ShowOptions {
            wait: false,
            ..ShowOptions::default()
        };
        assert!(matches!(display.show("hi", options), Err(Error::Unsupported(_))));
        let options = ScrollOptions {
            wait: false,
            ..ScrollOptions::default()
        };
        display.set_pixel(0, 0, 9).unwrap();
        assert!(matches!(display.scroll("hi", options), Err(Error::Unsupported(_))));
        assert_eq!(display.get_pixel(0, 0), Ok(9));
        assert!(delay.sleeps_ms().is_empty());
    }

    #[test]
    fn test_scroll_sleeps_per_column() {
        let (mut display, delay) = display(ViewMode::Basic);
        display.scroll("IA", ScrollOptions::default()).unwrap();
        assert_eq!(delay.sleeps_ms(), vec![150; 15]);
        // Scrolled fully off
        assert!(display.framebuffer().cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_scroll_feeds_right_edge() {
        let (mut display, _) = display(ViewMode::Basic);
        let mut session = display.start_scroll("I", ScrollOptions::default()).unwrap();
        assert!(display.step_scroll(&mut session).unwrap());
        // First column of I: top and bottom rows lit
        let edge: Vec<u8> = (0..5).map(|y| display.get_pixel(4, y).unwrap()).collect();
        assert_eq!(edge, [9, 0, 0, 0, 9]);
        assert!(display.step_scroll(&mut session).unwrap());
        assert_eq!(display.get_pixel(3, 0), Ok(9));
        assert_eq!(display.get_pixel(4, 2), Ok(9));
    }

    #[test]
    fn test_set_pixel_renders_on_change_only() {
        let (mut display, _) = display(ViewMode::Basic);
        display.surface().borrow_mut().clear_ops();
        display.set_pixel(2, 2, 9).unwrap();
        assert_eq!(display.surface().borrow().fills(), 1);
        assert_eq!(display.view_update_count(), 2);

        display.surface().borrow_mut().clear_ops();
        display.set_pixel(2, 2, 9).unwrap();
        assert!(display.surface().borrow().ops().is_empty());
        assert!(display.set_pixel(2, 2, 10).is_err());
        assert_eq!(display.get_pixel(2, 2), Ok(9));
    }

    #[test]
    fn test_mode_switch_keeps_framebuffer() {
        let (mut display, _) = display(ViewMode::Basic);
        display.set_pixel(2, 2, 9).unwrap();
        assert_eq!(display.surface().borrow().pixel(2 * 48 + 24, 2 * 48 + 24), 0xff0000);

        display.set_mode(ViewMode::Enhanced).unwrap();
        assert_eq!(display.mode(), ViewMode::Enhanced);
        assert_eq!(display.get_pixel(2, 2), Ok(9));
        assert_eq!(small_led(&display, 2, 2), 0xff0000);
        assert_eq!(small_led(&display, 1, 2), 0x000000);
        assert_eq!(display.view_update_count(), 1);
    }

    #[test]
    fn test_standard_mode_unsupported() {
        let (mut display, _) = display(ViewMode::Text);
        display.surface().borrow_mut().clear_ops();
        assert!(matches!(
            display.set_mode(ViewMode::Standard),
            Err(Error::Unsupported(_))
        ));
        assert_eq!(display.mode(), ViewMode::Text);
        assert!(display.surface().borrow().ops().is_empty());

        // Same mode again is a no-op
        display.set_mode(ViewMode::Text).unwrap();
        assert!(display.surface().borrow().ops().is_empty());
    }

    #[test]
    fn test_enhanced_pane_tracks_scroll() {
        let (mut display, _) = display(ViewMode::Enhanced);
        let mut session = display.start_scroll("HI", ScrollOptions::default()).unwrap();
        // H is 4 columns plus its gap
        for _ in 0..6 {
            display.step_scroll(&mut session).unwrap();
        }
        match display.view() {
            DisplayView::Enhanced(view) => {
                assert_eq!(view.pane().text(), "HI ");
                assert_eq!(view.pane().highlight(), Some(1));
            }
            _ => panic!("expected the enhanced view"),
        }
        let highlights: Vec<_> = display
            .surface()
            .borrow()
            .texts()
            .into_iter()
            .filter(|t| t.3 == HIGHLIGHT_COLOR && t.1 == PANE_TOP)
            .map(|t| t.0)
            .collect();
        assert_eq!(highlights, [0, 12]);

        display.clear().unwrap();
        match display.view() {
            DisplayView::Enhanced(view) => assert_eq!(view.pane().text(), ""),
            _ => panic!("expected the enhanced view"),
        }
    }

    #[test]
    fn test_enhanced_view_follows_pins_until_switched() {
        let board = SimBoard::new();
        let registry = PinRegistry::new();
        let mut pin = Pin::new(board.line("pin0", Capability::Touch), Pull::PullDown);
        registry.attach(&pin).unwrap();

        let (mut display, _) = display_with(ViewMode::Enhanced, registry);
        pin.write_analog(512).unwrap();
        match display.view() {
            DisplayView::Enhanced(view) => {
                assert_eq!(view.panel().borrow().widgets().len(), 1);
            }
            _ => panic!("expected the enhanced view"),
        }

        display.set_mode(ViewMode::Small).unwrap();
        assert_eq!(pin.hooks().len(PinOp::WriteAnalog), 0);
        display.set_mode(ViewMode::Enhanced).unwrap();
        assert_eq!(pin.hooks().len(PinOp::WriteAnalog), 1);

        let (_surface, _delay) = display.release().unwrap();
        assert!(pin.hooks().is_empty());
    }

    #[test]
    fn test_light_level() {
        let (mut display, _) = display(ViewMode::Basic);
        assert!(matches!(
            display.read_light_level(),
            Err(Error::MissingCapability(_))
        ));
        display.set_light_sensor(Box::new(SimLightSensor::new(30 * 256 + 100)));
        assert_eq!(display.read_light_level(), Ok(30));
    }

    #[test]
    fn test_power_calls() {
        let (mut display, _) = display(ViewMode::Basic);
        assert!(display.on().is_ok() && display.off().is_ok());
        assert!(display.is_on());

        let config = DisplayConfig {
            strict_power: true,
            ..DisplayConfig::default()
        };
        let mut strict =
            Display::new(&config, RecordingSurface::new(240, 240), SimDelay::new(), PinRegistry::new())
                .unwrap();
        assert!(matches!(strict.off(), Err(Error::Unsupported(_))));
    }
}
