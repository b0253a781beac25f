//! Fixed color palette and the markup code table.
//!
//! Colors are stored as console attribute bits (blue = 0x1, green = 0x2,
//! red = 0x4, intensity = 0x8). The ANSI sink translates them to SGR
//! foreground parameters.

/// Character that introduces a markup escape (`~<code>`).
pub const MARKUP_CHAR: char = '~';

/// Code used for untagged text at the start of a message.
pub const DEFAULT_CODE: char = 'g';

const FG_BLUE: u8 = 0x1;
const FG_GREEN: u8 = 0x2;
const FG_RED: u8 = 0x4;
const FG_INTENSITY: u8 = 0x8;

/// A foreground color attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u8);

impl Color {
    pub const RED: Color = Color(FG_RED);
    pub const GREEN: Color = Color(FG_GREEN);
    pub const BLUE: Color = Color(FG_BLUE);
    pub const YELLOW: Color = Color(FG_RED | FG_GREEN);
    pub const PURPLE: Color = Color(FG_RED | FG_BLUE);
    pub const CYAN: Color = Color(FG_GREEN | FG_BLUE);
    pub const WHITE: Color = Color(FG_RED | FG_GREEN | FG_BLUE);
    pub const GRAY: Color = Color(FG_RED | FG_GREEN | FG_BLUE | FG_INTENSITY);
    pub const LIGHT_RED: Color = Color(FG_RED | FG_INTENSITY);
    pub const LIGHT_GREEN: Color = Color(FG_GREEN | FG_INTENSITY);
    pub const LIGHT_BLUE: Color = Color(FG_BLUE | FG_INTENSITY);
    pub const LIGHT_YELLOW: Color = Color(FG_RED | FG_GREEN | FG_INTENSITY);
    pub const LIGHT_PURPLE: Color = Color(FG_RED | FG_BLUE | FG_INTENSITY);
    pub const LIGHT_CYAN: Color = Color(FG_GREEN | FG_BLUE | FG_INTENSITY);

    /// Every palette entry, in markup code order.
    pub const ALL: [Color; 14] = [
        Color::RED,
        Color::GREEN,
        Color::BLUE,
        Color::YELLOW,
        Color::PURPLE,
        Color::CYAN,
        Color::WHITE,
        Color::GRAY,
        Color::LIGHT_RED,
        Color::LIGHT_GREEN,
        Color::LIGHT_BLUE,
        Color::LIGHT_YELLOW,
        Color::LIGHT_PURPLE,
        Color::LIGHT_CYAN,
    ];

    /// Look up the color selected by a markup code character.
    ///
    /// Returns `None` for any character outside `a-h` and `1-6`.
    pub fn from_code(code: char) -> Option<Color> {
        CODE_TABLE
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, color)| *color)
    }

    /// The markup code character that selects this color.
    pub fn code(self) -> char {
        CODE_TABLE
            .iter()
            .find(|(_, color)| *color == self)
            .map(|(c, _)| *c)
            .unwrap_or(DEFAULT_CODE)
    }

    /// Human-readable palette name.
    pub fn name(self) -> &'static str {
        match self {
            Color::RED => "red",
            Color::GREEN => "green",
            Color::BLUE => "blue",
            Color::YELLOW => "yellow",
            Color::PURPLE => "purple",
            Color::CYAN => "cyan",
            Color::WHITE => "white",
            Color::GRAY => "gray",
            Color::LIGHT_RED => "light red",
            Color::LIGHT_GREEN => "light green",
            Color::LIGHT_BLUE => "light blue",
            Color::LIGHT_YELLOW => "light yellow",
            Color::LIGHT_PURPLE => "light purple",
            Color::LIGHT_CYAN => "light cyan",
            _ => "unknown",
        }
    }

    /// Raw console attribute bits.
    pub fn attribute(self) -> u8 {
        self.0
    }

    pub fn is_intense(self) -> bool {
        self.0 & FG_INTENSITY != 0
    }

    /// SGR foreground parameter: 30-37 for normal colors, 90-97 for intense.
    pub fn ansi_sgr(self) -> u8 {
        // ANSI orders the base colors red = 1, green = 2, blue = 4.
        let mut index = 0;
        if self.0 & FG_RED != 0 {
            index |= 1;
        }
        if self.0 & FG_GREEN != 0 {
            index |= 2;
        }
        if self.0 & FG_BLUE != 0 {
            index |= 4;
        }
        if self.is_intense() { 90 + index } else { 30 + index }
    }
}

/// Markup code → color mapping.
const CODE_TABLE: [(char, Color); 14] = [
    ('a', Color::RED),
    ('b', Color::GREEN),
    ('c', Color::BLUE),
    ('d', Color::YELLOW),
    ('e', Color::PURPLE),
    ('f', Color::CYAN),
    ('g', Color::WHITE),
    ('h', Color::GRAY),
    ('1', Color::LIGHT_RED),
    ('2', Color::LIGHT_GREEN),
    ('3', Color::LIGHT_BLUE),
    ('4', Color::LIGHT_YELLOW),
    ('5', Color::LIGHT_PURPLE),
    ('6', Color::LIGHT_CYAN),
];
