//! Text decorations and the precomputed mask lookup table.
//!
//! A [`Component`](crate::Component) stores its decorations as a five bit
//! [`DecorationMask`]. Converting it to a [`Text`] goes through
//! [`decorations`], which indexes a table holding every one of the 32
//! possible combinations. The table is built by a `const fn`, so it lives in
//! read-only memory and needs no synchronization.

use bitfield_struct::bitfield;

use crate::Text;

/// One of the five boolean text decorations.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum TextDecoration {
    Bold,
    Italic,
    Obfuscated,
    Strikethrough,
    Underlined,
}

impl TextDecoration {
    /// Every decoration, indexed by its bit position in a [`DecorationMask`].
    pub const VALUES: [Self; 5] = [
        Self::Bold,
        Self::Italic,
        Self::Obfuscated,
        Self::Strikethrough,
        Self::Underlined,
    ];

    /// The bit this decoration occupies in a [`DecorationMask`].
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Packed decoration flags.
#[bitfield(u8)]
#[derive(PartialEq, Eq, Hash)]
pub struct DecorationMask {
    pub bold: bool,
    pub italic: bool,
    pub obfuscated: bool,
    pub strikethrough: bool,
    pub underlined: bool,
    #[bits(3)]
    _pad: u8,
}

impl DecorationMask {
    /// Number of distinct masks.
    pub const COMBINATIONS: usize = 1 << TextDecoration::VALUES.len();

    /// Returns the mask with `decoration` set.
    pub const fn with(self, decoration: TextDecoration) -> Self {
        Self::from_bits(self.into_bits() | decoration.bit())
    }

    pub const fn contains(self, decoration: TextDecoration) -> bool {
        self.into_bits() & decoration.bit() != 0
    }

    /// Index into the decoration table. Padding bits are ignored.
    pub const fn index(self) -> usize {
        (self.into_bits() as usize) & (Self::COMBINATIONS - 1)
    }
}

impl FromIterator<TextDecoration> for DecorationMask {
    fn from_iter<T: IntoIterator<Item = TextDecoration>>(iter: T) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}

/// A resolved decoration set in the shape [`Text`] stores it.
///
/// Decorations in the set are `Some(true)`. Everything else is left unset so
/// it inherits from the parent text.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Decorations {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub obfuscated: Option<bool>,
    pub strikethrough: Option<bool>,
    pub underlined: Option<bool>,
}

impl Decorations {
    const fn from_mask(mask: u8) -> Self {
        const fn flag(mask: u8, decoration: TextDecoration) -> Option<bool> {
            if mask & decoration.bit() != 0 {
                Some(true)
            } else {
                None
            }
        }

        Self {
            bold: flag(mask, TextDecoration::Bold),
            italic: flag(mask, TextDecoration::Italic),
            obfuscated: flag(mask, TextDecoration::Obfuscated),
            strikethrough: flag(mask, TextDecoration::Strikethrough),
            underlined: flag(mask, TextDecoration::Underlined),
        }
    }

    pub const fn get(&self, decoration: TextDecoration) -> Option<bool> {
        match decoration {
            TextDecoration::Bold => self.bold,
            TextDecoration::Italic => self.italic,
            TextDecoration::Obfuscated => self.obfuscated,
            TextDecoration::Strikethrough => self.strikethrough,
            TextDecoration::Underlined => self.underlined,
        }
    }

    pub const fn contains(&self, decoration: TextDecoration) -> bool {
        matches!(self.get(decoration), Some(true))
    }

    /// Iterates over the decorations that are in the set.
    pub fn iter(&self) -> impl Iterator<Item = TextDecoration> + '_ {
        TextDecoration::VALUES
            .into_iter()
            .filter(|&decoration| self.contains(decoration))
    }

    /// Turns on the decorations in the set, leaving the others on `text`
    /// as they are.
    pub fn merge_into(&self, text: &mut Text) {
        text.bold = self.bold.or(text.bold);
        text.italic = self.italic.or(text.italic);
        text.obfuscated = self.obfuscated.or(text.obfuscated);
        text.strikethrough = self.strikethrough.or(text.strikethrough);
        text.underlined = self.underlined.or(text.underlined);
    }

    /// Copies the decoration flags onto `text`.
    pub fn apply_to(&self, text: &mut Text) {
        text.bold = self.bold;
        text.italic = self.italic;
        text.obfuscated = self.obfuscated;
        text.strikethrough = self.strikethrough;
        text.underlined = self.underlined;
    }
}

static DECORATION_TABLE: [Decorations; DecorationMask::COMBINATIONS] = build_table();

const fn build_table() -> [Decorations; DecorationMask::COMBINATIONS] {
    let mut table = [Decorations {
        bold: None,
        italic: None,
        obfuscated: None,
        strikethrough: None,
        underlined: None,
    }; DecorationMask::COMBINATIONS];

    let mut mask = 0;
    while mask < DecorationMask::COMBINATIONS {
        table[mask] = Decorations::from_mask(mask as u8);
        mask += 1;
    }

    table
}

/// Resolves `mask` to its decoration set. Constant time, never fails.
#[inline]
pub fn decorations(mask: DecorationMask) -> &'static Decorations {
    &DECORATION_TABLE[mask.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mask_resolves_to_exactly_its_bits() {
        for bits in 0..DecorationMask::COMBINATIONS as u8 {
            let set = decorations(DecorationMask::from_bits(bits));
            for decoration in TextDecoration::VALUES {
                assert_eq!(
                    set.contains(decoration),
                    bits & decoration.bit() != 0,
                    "mask {bits:#07b}, {decoration:?}"
                );
            }
            assert_eq!(set.iter().count(), bits.count_ones() as usize);
        }
    }

    #[test]
    fn unset_flags_inherit() {
        let set = decorations(DecorationMask::new().with_italic(true));
        assert_eq!(set.italic, Some(true));
        assert_eq!(set.bold, None);
        assert_eq!(set.underlined, None);
    }

    #[test]
    fn padding_bits_are_ignored() {
        let mask = DecorationMask::from_bits(0b1110_0001);
        assert_eq!(decorations(mask), decorations(DecorationMask::new().with_bold(true)));
    }

    #[test]
    fn mask_from_decorations() {
        let mask: DecorationMask = [TextDecoration::Bold, TextDecoration::Underlined]
            .into_iter()
            .collect();
        assert!(mask.bold());
        assert!(mask.underlined());
        assert!(!mask.italic());
        assert_eq!(mask.into_bits(), 0b1_0001);
    }
}
