//! Built-in images
//!
//! The micro:bit's named images (`Image.HEART`, `Image.CLOCK3`, ...) as a
//! closed enum. Each symbol is stored as packed 5x5 glyph rows and expanded
//! to a full-brightness [`Image`] on request.

use super::image::Image;

/// Named built-in image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    Heart,
    HeartSmall,
    Happy,
    Smile,
    Sad,
    Confused,
    Angry,
    Asleep,
    Surprised,
    Silly,
    Fabulous,
    Meh,
    Yes,
    No,
    Clock12,
    Clock1,
    Clock2,
    Clock3,
    Clock4,
    Clock5,
    Clock6,
    Clock7,
    Clock8,
    Clock9,
    Clock10,
    Clock11,
    ArrowN,
    ArrowNe,
    ArrowE,
    ArrowSe,
    ArrowS,
    ArrowSw,
    ArrowW,
    ArrowNw,
    Triangle,
    TriangleLeft,
    Chessboard,
    Diamond,
    DiamondSmall,
    Square,
    SquareSmall,
    Rabbit,
    Cow,
    MusicCrotchet,
    MusicQuaver,
    MusicQuavers,
    Pitchfork,
    Xmas,
    Pacman,
    Target,
    Tshirt,
    Rollerskate,
    Duck,
    House,
    Tortoise,
    Butterfly,
    Stickfigure,
    Ghost,
    Sword,
    Giraffe,
    Skull,
    Umbrella,
    Snake,
}

#[rustfmt::skip]
static SYMBOL_ROWS: [[u8; 5]; Symbol::COUNT] = [
    [0x0a, 0x1f, 0x1f, 0x0e, 0x04], // Heart
    [0x00, 0x0a, 0x0e, 0x04, 0x00], // HeartSmall
    [0x00, 0x0a, 0x00, 0x11, 0x0e], // Happy
    [0x00, 0x00, 0x00, 0x11, 0x0e], // Smile
    [0x00, 0x0a, 0x00, 0x0e, 0x11], // Sad
    [0x00, 0x0a, 0x00, 0x0a, 0x15], // Confused
    [0x11, 0x0a, 0x00, 0x1f, 0x15], // Angry
    [0x00, 0x1b, 0x00, 0x0e, 0x00], // Asleep
    [0x0a, 0x00, 0x04, 0x0a, 0x04], // Surprised
    [0x11, 0x00, 0x1f, 0x05, 0x07], // Silly
    [0x1f, 0x1b, 0x00, 0x0a, 0x0e], // Fabulous
    [0x0a, 0x00, 0x02, 0x04, 0x08], // Meh
    [0x00, 0x01, 0x02, 0x14, 0x08], // Yes
    [0x11, 0x0a, 0x04, 0x0a, 0x11], // No
    [0x04, 0x04, 0x04, 0x00, 0x00], // Clock12
    [0x02, 0x02, 0x04, 0x00, 0x00], // Clock1
    [0x00, 0x03, 0x04, 0x00, 0x00], // Clock2
    [0x00, 0x00, 0x07, 0x00, 0x00], // Clock3
    [0x00, 0x00, 0x04, 0x03, 0x00], // Clock4
    [0x00, 0x00, 0x04, 0x02, 0x02], // Clock5
    [0x00, 0x00, 0x04, 0x04, 0x04], // Clock6
    [0x00, 0x00, 0x04, 0x08, 0x08], // Clock7
    [0x00, 0x00, 0x04, 0x18, 0x00], // Clock8
    [0x00, 0x00, 0x1c, 0x00, 0x00], // Clock9
    [0x00, 0x18, 0x04, 0x00, 0x00], // Clock10
    [0x08, 0x08, 0x04, 0x00, 0x00], // Clock11
    [0x04, 0x0e, 0x15, 0x04, 0x04], // ArrowN
    [0x07, 0x03, 0x05, 0x08, 0x10], // ArrowNe
    [0x04, 0x02, 0x1f, 0x02, 0x04], // ArrowE
    [0x10, 0x08, 0x05, 0x03, 0x07], // ArrowSe
    [0x04, 0x04, 0x15, 0x0e, 0x04], // ArrowS
    [0x01, 0x02, 0x14, 0x18, 0x1c], // ArrowSw
    [0x04, 0x08, 0x1f, 0x08, 0x04], // ArrowW
    [0x1c, 0x18, 0x14, 0x02, 0x01], // ArrowNw
    [0x00, 0x04, 0x0a, 0x1f, 0x00], // Triangle
    [0x10, 0x18, 0x14, 0x12, 0x1f], // TriangleLeft
    [0x0a, 0x15, 0x0a, 0x15, 0x0a], // Chessboard
    [0x04, 0x0a, 0x11, 0x0a, 0x04], // Diamond
    [0x00, 0x04, 0x0a, 0x04, 0x00], // DiamondSmall
    [0x1f, 0x11, 0x11, 0x11, 0x1f], // Square
    [0x00, 0x0e, 0x0a, 0x0e, 0x00], // SquareSmall
    [0x14, 0x14, 0x1e, 0x1a, 0x1e], // Rabbit
    [0x11, 0x11, 0x1f, 0x0e, 0x04], // Cow
    [0x04, 0x04, 0x04, 0x1c, 0x1c], // MusicCrotchet
    [0x04, 0x06, 0x05, 0x1c, 0x1c], // MusicQuaver
    [0x0f, 0x09, 0x09, 0x1b, 0x1b], // MusicQuavers
    [0x15, 0x15, 0x1f, 0x04, 0x04], // Pitchfork
    [0x04, 0x0e, 0x04, 0x0e, 0x1f], // Xmas
    [0x0f, 0x1a, 0x1c, 0x1e, 0x0f], // Pacman
    [0x04, 0x0e, 0x1b, 0x0e, 0x04], // Target
    [0x1b, 0x1f, 0x0e, 0x0e, 0x0e], // Tshirt
    [0x03, 0x03, 0x1f, 0x1f, 0x0a], // Rollerskate
    [0x0c, 0x1c, 0x0f, 0x0e, 0x00], // Duck
    [0x04, 0x0e, 0x1f, 0x0e, 0x0a], // House
    [0x00, 0x0e, 0x1f, 0x0a, 0x00], // Tortoise
    [0x1b, 0x1f, 0x04, 0x1f, 0x1b], // Butterfly
    [0x04, 0x1f, 0x04, 0x0a, 0x11], // Stickfigure
    [0x1f, 0x15, 0x1f, 0x1f, 0x15], // Ghost
    [0x04, 0x04, 0x04, 0x0e, 0x04], // Sword
    [0x18, 0x08, 0x08, 0x0e, 0x0a], // Giraffe
    [0x0e, 0x15, 0x1f, 0x0e, 0x0e], // Skull
    [0x0e, 0x1f, 0x04, 0x14, 0x0c], // Umbrella
    [0x18, 0x1b, 0x0a, 0x0e, 0x00], // Snake
];

/// Clock faces from 12 o'clock clockwise
pub const ALL_CLOCKS: [Symbol; 12] = [
    Symbol::Clock12,
    Symbol::Clock1,
    Symbol::Clock2,
    Symbol::Clock3,
    Symbol::Clock4,
    Symbol::Clock5,
    Symbol::Clock6,
    Symbol::Clock7,
    Symbol::Clock8,
    Symbol::Clock9,
    Symbol::Clock10,
    Symbol::Clock11,
];

/// Arrows from north clockwise
pub const ALL_ARROWS: [Symbol; 8] = [
    Symbol::ArrowN,
    Symbol::ArrowNe,
    Symbol::ArrowE,
    Symbol::ArrowSe,
    Symbol::ArrowS,
    Symbol::ArrowSw,
    Symbol::ArrowW,
    Symbol::ArrowNw,
];

impl Symbol {
    /// Number of built-in images
    pub const COUNT: usize = 63;

    /// Every symbol, in table order
    pub const ALL: [Symbol; Self::COUNT] = [
        Symbol::Heart,
        Symbol::HeartSmall,
        Symbol::Happy,
        Symbol::Smile,
        Symbol::Sad,
        Symbol::Confused,
        Symbol::Angry,
        Symbol::Asleep,
        Symbol::Surprised,
        Symbol::Silly,
        Symbol::Fabulous,
        Symbol::Meh,
        Symbol::Yes,
        Symbol::No,
        Symbol::Clock12,
        Symbol::Clock1,
        Symbol::Clock2,
        Symbol::Clock3,
        Symbol::Clock4,
        Symbol::Clock5,
        Symbol::Clock6,
        Symbol::Clock7,
        Symbol::Clock8,
        Symbol::Clock9,
        Symbol::Clock10,
        Symbol::Clock11,
        Symbol::ArrowN,
        Symbol::ArrowNe,
        Symbol::ArrowE,
        Symbol::ArrowSe,
        Symbol::ArrowS,
        Symbol::ArrowSw,
        Symbol::ArrowW,
        Symbol::ArrowNw,
        Symbol::Triangle,
        Symbol::TriangleLeft,
        Symbol::Chessboard,
        Symbol::Diamond,
        Symbol::DiamondSmall,
        Symbol::Square,
        Symbol::SquareSmall,
        Symbol::Rabbit,
        Symbol::Cow,
        Symbol::MusicCrotchet,
        Symbol::MusicQuaver,
        Symbol::MusicQuavers,
        Symbol::Pitchfork,
        Symbol::Xmas,
        Symbol::Pacman,
        Symbol::Target,
        Symbol::Tshirt,
        Symbol::Rollerskate,
        Symbol::Duck,
        Symbol::House,
        Symbol::Tortoise,
        Symbol::Butterfly,
        Symbol::Stickfigure,
        Symbol::Ghost,
        Symbol::Sword,
        Symbol::Giraffe,
        Symbol::Skull,
        Symbol::Umbrella,
        Symbol::Snake,
    ];

    /// Packed glyph rows
    pub fn rows(self) -> &'static [u8; 5] {
        &SYMBOL_ROWS[self as usize]
    }

    /// Expand to a 5x5 image
    pub fn image(self) -> Image {
        Image::from_glyph(self.rows())
    }

    /// Name as used by the micro:bit `Image` class
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Heart => "HEART",
            Symbol::HeartSmall => "HEART_SMALL",
            Symbol::Happy => "HAPPY",
            Symbol::Smile => "SMILE",
            Symbol::Sad => "SAD",
            Symbol::Confused => "CONFUSED",
            Symbol::Angry => "ANGRY",
            Symbol::Asleep => "ASLEEP",
            Symbol::Surprised => "SURPRISED",
            Symbol::Silly => "SILLY",
            Symbol::Fabulous => "FABULOUS",
            Symbol::Meh => "MEH",
            Symbol::Yes => "YES",
            Symbol::No => "NO",
            Symbol::Clock12 => "CLOCK12",
            Symbol::Clock1 => "CLOCK1",
            Symbol::Clock2 => "CLOCK2",
            Symbol::Clock3 => "CLOCK3",
            Symbol::Clock4 => "CLOCK4",
            Symbol::Clock5 => "CLOCK5",
            Symbol::Clock6 => "CLOCK6",
            Symbol::Clock7 => "CLOCK7",
            Symbol::Clock8 => "CLOCK8",
            Symbol::Clock9 => "CLOCK9",
            Symbol::Clock10 => "CLOCK10",
            Symbol::Clock11 => "CLOCK11",
            Symbol::ArrowN => "ARROW_N",
            Symbol::ArrowNe => "ARROW_NE",
            Symbol::ArrowE => "ARROW_E",
            Symbol::ArrowSe => "ARROW_SE",
            Symbol::ArrowS => "ARROW_S",
            Symbol::ArrowSw => "ARROW_SW",
            Symbol::ArrowW => "ARROW_W",
            Symbol::ArrowNw => "ARROW_NW",
            Symbol::Triangle => "TRIANGLE",
            Symbol::TriangleLeft => "TRIANGLE_LEFT",
            Symbol::Chessboard => "CHESSBOARD",
            Symbol::Diamond => "DIAMOND",
            Symbol::DiamondSmall => "DIAMOND_SMALL",
            Symbol::Square => "SQUARE",
            Symbol::SquareSmall => "SQUARE_SMALL",
            Symbol::Rabbit => "RABBIT",
            Symbol::Cow => "COW",
            Symbol::MusicCrotchet => "MUSIC_CROTCHET",
            Symbol::MusicQuaver => "MUSIC_QUAVER",
            Symbol::MusicQuavers => "MUSIC_QUAVERS",
            Symbol::Pitchfork => "PITCHFORK",
            Symbol::Xmas => "XMAS",
            Symbol::Pacman => "PACMAN",
            Symbol::Target => "TARGET",
            Symbol::Tshirt => "TSHIRT",
            Symbol::Rollerskate => "ROLLERSKATE",
            Symbol::Duck => "DUCK",
            Symbol::House => "HOUSE",
            Symbol::Tortoise => "TORTOISE",
            Symbol::Butterfly => "BUTTERFLY",
            Symbol::Stickfigure => "STICKFIGURE",
            Symbol::Ghost => "GHOST",
            Symbol::Sword => "SWORD",
            Symbol::Giraffe => "GIRAFFE",
            Symbol::Skull => "SKULL",
            Symbol::Umbrella => "UMBRELLA",
            Symbol::Snake => "SNAKE",
        }
    }

    /// Look up a symbol by its micro:bit name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

impl From<Symbol> for Image {
    fn from(symbol: Symbol) -> Self {
        symbol.image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heart() {
        let heart = Symbol::Heart.image();
        assert_eq!(heart, Image::parse("09090:99999:99999:09990:00900").unwrap());
    }

    #[test]
    fn test_table_order() {
        for (i, symbol) in Symbol::ALL.iter().enumerate() {
            assert_eq!(*symbol as usize, i);
            assert_eq!(Symbol::from_name(symbol.name()), Some(*symbol));
        }
        assert_eq!(Symbol::from_name("NOPE"), None);
    }

    #[test]
    fn test_sequences() {
        assert_eq!(ALL_CLOCKS[3], Symbol::Clock3);
        assert_eq!(ALL_ARROWS[4], Symbol::ArrowS);
        assert_ne!(ALL_CLOCKS[0].image(), ALL_CLOCKS[6].image());
    }
}
