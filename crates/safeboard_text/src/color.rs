//! Text colors.
//!
//! Modern clients accept any 24 bit [`RgbColor`]. Older ones only know the
//! sixteen [`NamedColor`]s, which is also the only palette teams can use.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Color {
    /// Whatever color the surrounding text has.
    #[default]
    Reset,
    Rgb(RgbColor),
    Named(NamedColor),
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    #[default]
    White,
}

#[derive(Clone, PartialEq, Eq, Debug, Error)]
#[error("\"{0}\" is not a color name, \"reset\" or a #rrggbb hex code")]
pub struct ColorError(pub String);

struct PaletteEntry {
    name: &'static str,
    code: char,
    rgb: RgbColor,
}

const fn entry(name: &'static str, code: char, rgb: u32) -> PaletteEntry {
    PaletteEntry {
        name,
        code,
        rgb: RgbColor::from_u24(rgb),
    }
}

/// Indexed by [`NamedColor::ordinal`].
const PALETTE: [PaletteEntry; 16] = [
    entry("black", '0', 0x000000),
    entry("dark_blue", '1', 0x0000aa),
    entry("dark_green", '2', 0x00aa00),
    entry("dark_aqua", '3', 0x00aaaa),
    entry("dark_red", '4', 0xaa0000),
    entry("dark_purple", '5', 0xaa00aa),
    entry("gold", '6', 0xffaa00),
    entry("gray", '7', 0xaaaaaa),
    entry("dark_gray", '8', 0x555555),
    entry("blue", '9', 0x5555ff),
    entry("green", 'a', 0x55ff55),
    entry("aqua", 'b', 0x55ffff),
    entry("red", 'c', 0xff5555),
    entry("light_purple", 'd', 0xff55ff),
    entry("yellow", 'e', 0xffff55),
    entry("white", 'f', 0xffffff),
];

impl Color {
    pub const RESET: Self = Self::Reset;
    pub const BLACK: Self = Self::Named(NamedColor::Black);
    pub const DARK_BLUE: Self = Self::Named(NamedColor::DarkBlue);
    pub const DARK_GREEN: Self = Self::Named(NamedColor::DarkGreen);
    pub const DARK_AQUA: Self = Self::Named(NamedColor::DarkAqua);
    pub const DARK_RED: Self = Self::Named(NamedColor::DarkRed);
    pub const DARK_PURPLE: Self = Self::Named(NamedColor::DarkPurple);
    pub const GOLD: Self = Self::Named(NamedColor::Gold);
    pub const GRAY: Self = Self::Named(NamedColor::Gray);
    pub const DARK_GRAY: Self = Self::Named(NamedColor::DarkGray);
    pub const BLUE: Self = Self::Named(NamedColor::Blue);
    pub const GREEN: Self = Self::Named(NamedColor::Green);
    pub const AQUA: Self = Self::Named(NamedColor::Aqua);
    pub const RED: Self = Self::Named(NamedColor::Red);
    pub const LIGHT_PURPLE: Self = Self::Named(NamedColor::LightPurple);
    pub const YELLOW: Self = Self::Named(NamedColor::Yellow);
    pub const WHITE: Self = Self::Named(NamedColor::White);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(RgbColor::new(r, g, b))
    }
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`.
    pub const fn to_u24(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Bits above the low 24 are ignored.
    pub const fn from_u24(value: u32) -> Self {
        Self::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// The palette color with the smallest euclidean distance to this one.
    /// Ties go to the lower ordinal.
    pub fn to_named_lossy(self) -> NamedColor {
        let distance = |named: &NamedColor| {
            let other = named.rgb();
            let dr = i32::from(self.r) - i32::from(other.r);
            let dg = i32::from(self.g) - i32::from(other.g);
            let db = i32::from(self.b) - i32::from(other.b);
            dr * dr + dg * dg + db * db
        };

        NamedColor::VALUES
            .into_iter()
            .min_by_key(distance)
            .unwrap_or_default()
    }
}

impl NamedColor {
    pub const VALUES: [Self; 16] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkAqua,
        Self::DarkRed,
        Self::DarkPurple,
        Self::Gold,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Aqua,
        Self::Red,
        Self::LightPurple,
        Self::Yellow,
        Self::White,
    ];

    pub const fn ordinal(self) -> usize {
        self as usize
    }

    pub const fn from_ordinal(ordinal: usize) -> Option<Self> {
        if ordinal < Self::VALUES.len() {
            Some(Self::VALUES[ordinal])
        } else {
            None
        }
    }

    /// Identifier used in JSON text, e.g. `dark_red`.
    pub const fn name(self) -> &'static str {
        PALETTE[self.ordinal()].name
    }

    /// Character following `§` in legacy formatting codes.
    pub const fn code(self) -> char {
        PALETTE[self.ordinal()].code
    }

    pub const fn rgb(self) -> RgbColor {
        PALETTE[self.ordinal()].rgb
    }
}

impl From<NamedColor> for RgbColor {
    fn from(value: NamedColor) -> Self {
        value.rgb()
    }
}

impl From<RgbColor> for Color {
    fn from(value: RgbColor) -> Self {
        Self::Rgb(value)
    }
}

impl From<NamedColor> for Color {
    fn from(value: NamedColor) -> Self {
        Self::Named(value)
    }
}

impl FromStr for NamedColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::VALUES
            .into_iter()
            .find(|named| named.name() == s)
            .ok_or_else(|| ColorError(s.to_owned()))
    }
}

impl FromStr for RgbColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .map(Self::from_u24)
            .ok_or_else(|| ColorError(s.to_owned()))
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reset" => Ok(Self::Reset),
            _ if s.starts_with('#') => s.parse().map(Self::Rgb),
            _ => s.parse().map(Self::Named),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Cow::<str>::deserialize(deserializer)?
            .parse()
            .map_err(D::Error::custom)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Reset => f.write_str("reset"),
            Self::Rgb(rgb) => rgb.fmt(f),
            Self::Named(named) => named.fmt(f),
        }
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:06x}", self.to_u24())
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!("#aBcDeF".parse(), Ok(Color::rgb(0xab, 0xcd, 0xef)));
        assert_eq!("dark_red".parse(), Ok(Color::DARK_RED));
        assert_eq!("reset".parse(), Ok(Color::Reset));
        assert!("#ffTf00".parse::<Color>().is_err());
        assert!("#+fff00".parse::<Color>().is_err());
        assert!("#00000000".parse::<Color>().is_err());
        assert_eq!(
            "crimson".parse::<Color>(),
            Err(ColorError("crimson".to_owned()))
        );
    }

    #[test]
    fn palette_follows_ordinals() {
        for (i, named) in NamedColor::VALUES.into_iter().enumerate() {
            assert_eq!(named.ordinal(), i);
            assert_eq!(NamedColor::from_ordinal(i), Some(named));
            assert_eq!(named.name().parse(), Ok(named));
        }
        assert_eq!(NamedColor::from_ordinal(16), None);
        assert_eq!(NamedColor::Red.code(), 'c');
    }

    #[test]
    fn nearest_named_color() {
        assert_eq!(RgbColor::new(250, 80, 80).to_named_lossy(), NamedColor::Red);
        assert_eq!(RgbColor::new(1, 2, 3).to_named_lossy(), NamedColor::Black);
        assert_eq!(NamedColor::Gold.rgb().to_named_lossy(), NamedColor::Gold);
    }

    #[test]
    fn display_round_trips() {
        let rgb = RgbColor::from_u24(0x12_34_56);
        assert_eq!(rgb, RgbColor::new(0x12, 0x34, 0x56));
        assert_eq!(rgb.to_string(), "#123456");
        assert_eq!(Color::Rgb(rgb).to_string().parse(), Ok(Color::Rgb(rgb)));
    }
}
