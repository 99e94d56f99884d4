//! Show and scroll sessions
//!
//! A session is the position within one `show` or `scroll` call. The
//! display advances it one step at a time and sleeps in between; callers
//! that drive their own timing can step a session themselves with
//! [`Display::step_show`](crate::Display::step_show) and
//! [`Display::step_scroll`](crate::Display::step_scroll).

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use bitshim_core::{Font, Image};

use crate::display::{ScrollOptions, Showable};

enum Items {
    Text { text: String, chars: Vec<char> },
    Images(Vec<Image>),
}

/// Progress through a sequence shown item by item
pub struct ShowSession {
    items: Items,
    next: usize,
    looping: bool,
}

/// One item to put on the LEDs
pub(crate) enum ShowItem<'a> {
    Char { c: char, text: &'a str, index: usize },
    Image(&'a Image),
}

impl ShowSession {
    pub(crate) fn new(value: Showable, looping: bool) -> Self {
        let items = match value {
            Showable::Image(image) => Items::Images(vec![image]),
            Showable::Images(images) => Items::Images(images),
            Showable::Text(text) => {
                let chars = text.chars().collect();
                Items::Text { text, chars }
            }
        };
        Self {
            items,
            next: 0,
            looping,
        }
    }

    /// Number of items in one pass
    pub fn len(&self) -> usize {
        match &self.items {
            Items::Text { chars, .. } => chars.len(),
            Items::Images(images) => images.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the next item
    pub fn position(&self) -> usize {
        self.next
    }

    /// Check if another step would show something
    pub fn is_finished(&self) -> bool {
        self.is_empty() || (self.next >= self.len() && !self.looping)
    }

    pub(crate) fn next_item(&mut self) -> Option<ShowItem<'_>> {
        if self.is_finished() {
            return None;
        }
        if self.next >= self.len() {
            self.next = 0;
        }
        let index = self.next;
        self.next += 1;
        Some(match &self.items {
            Items::Text { text, chars } => ShowItem::Char {
                c: chars[index],
                text,
                index,
            },
            Items::Images(images) => ShowItem::Image(&images[index]),
        })
    }
}

/// One column shift of a scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScrollStep {
    pub c: char,
    pub column: u8,
    /// The blank column after a character
    pub gap: bool,
    pub index: usize,
}

/// Progress through text scrolled column by column
///
/// The text gets a trailing space so it scrolls fully off the LEDs.
pub struct ScrollSession {
    text: String,
    chars: Vec<char>,
    index: usize,
    column: u8,
    looping: bool,
    monospace: bool,
}

impl ScrollSession {
    pub(crate) fn new(text: &str, options: &ScrollOptions) -> Self {
        let mut text = String::from(text);
        text.push(' ');
        let chars = text.chars().collect();
        Self {
            text,
            chars,
            index: 0,
            column: 0,
            looping: options.looping,
            monospace: options.monospace,
        }
    }

    /// Text being scrolled, trailing space included
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Index of the character entering the LEDs
    pub fn index(&self) -> usize {
        self.index
    }

    /// Next column of that character
    pub fn column(&self) -> u8 {
        self.column
    }

    /// Check if another step would shift the LEDs
    pub fn is_finished(&self) -> bool {
        self.index >= self.chars.len() && !self.looping
    }

    pub(crate) fn next_step(&mut self, font: &Font) -> Option<ScrollStep> {
        if self.is_finished() {
            return None;
        }
        if self.index >= self.chars.len() {
            self.index = 0;
            self.column = 0;
        }
        let c = self.chars[self.index];
        let width = if self.monospace {
            font.glyph_width()
        } else {
            font.width_of(c)
        };
        let step = ScrollStep {
            c,
            column: self.column,
            gap: self.column == width,
            index: self.index,
        };
        self.column += 1;
        if self.column > width {
            self.column = 0;
            self.index += 1;
        }
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    fn steps(session: &mut ScrollSession, font: &Font, n: usize) -> Vec<ScrollStep> {
        (0..n).filter_map(|_| session.next_step(font)).collect()
    }

    #[test]
    fn test_scroll_step_count() {
        let font = Font::pendolino3();
        let mut session = ScrollSession::new("IA", &ScrollOptions::default());
        assert_eq!(session.text(), "IA ");

        // I is 3 wide, A is 4: each plus its gap
        let first = steps(&mut session, &font, 9);
        assert_eq!(first.len(), 9);
        assert!(first[3].gap && first[8].gap);
        assert_eq!(session.index(), 2);

        // Trailing space is 5 wide plus its gap
        assert_eq!(steps(&mut session, &font, 100).len(), 6);
        assert!(session.is_finished());
    }

    #[test]
    fn test_monospace_uses_glyph_width() {
        let font = Font::pendolino3();
        let options = ScrollOptions {
            monospace: true,
            ..ScrollOptions::default()
        };
        let mut session = ScrollSession::new("I", &options);
        assert_eq!(steps(&mut session, &font, 100).len(), 12);
    }

    #[test]
    fn test_looping_scroll_restarts() {
        let font = Font::pendolino3();
        let options = ScrollOptions {
            looping: true,
            ..ScrollOptions::default()
        };
        let mut session = ScrollSession::new("I", &options);
        let all = steps(&mut session, &font, 10);
        assert_eq!(all[9].index, 1);
        let next = session.next_step(&font).unwrap();
        assert_eq!((next.c, next.column, next.index), ('I', 0, 0));
        assert!(!session.is_finished());
    }

    #[test]
    fn test_show_session_items() {
        let mut session = ShowSession::new(Showable::from("ab"), true);
        let mut seen = Vec::new();
        for _ in 0..5 {
            match session.next_item() {
                Some(ShowItem::Char { c, index, .. }) => seen.push((c, index)),
                _ => panic!("expected a character"),
            }
        }
        assert_eq!(seen, [('a', 0), ('b', 1), ('a', 0), ('b', 1), ('a', 0)]);

        let mut empty = ShowSession::new(Showable::from(""), true);
        assert!(empty.is_finished());
        assert!(empty.next_item().is_none());
    }
}
