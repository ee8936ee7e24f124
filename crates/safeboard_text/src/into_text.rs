//! Builder methods for native [`Text`].

use std::borrow::Cow;

use crate::{decorations, Color, DecorationMask, Text, TextDecoration};

/// Anything that can become a native [`Text`].
///
/// The styling methods consume the value and return owned text, so they can
/// be chained straight off string literals: `"HP".color(Color::RED).bold()`.
pub trait IntoText<'a>: Sized {
    fn into_cow_text(self) -> Cow<'a, Text>;

    fn into_text(self) -> Text {
        self.into_cow_text().into_owned()
    }

    fn color(self, color: impl Into<Color>) -> Text {
        let mut text = self.into_text();
        text.color = Some(color.into());
        text
    }

    /// Sets the font resource location, e.g. `minecraft:uniform`.
    fn font(self, font: impl Into<Cow<'static, str>>) -> Text {
        let mut text = self.into_text();
        text.font = Some(font.into());
        text
    }

    /// Turns on every decoration in `mask`. Decorations already set on the
    /// text are kept.
    fn decorated(self, mask: DecorationMask) -> Text {
        let mut text = self.into_text();
        decorations(mask).merge_into(&mut text);
        text
    }

    fn decorate(self, decoration: TextDecoration) -> Text {
        self.decorated(DecorationMask::new().with(decoration))
    }

    fn bold(self) -> Text {
        self.decorate(TextDecoration::Bold)
    }

    fn italic(self) -> Text {
        self.decorate(TextDecoration::Italic)
    }

    fn underlined(self) -> Text {
        self.decorate(TextDecoration::Underlined)
    }

    fn strikethrough(self) -> Text {
        self.decorate(TextDecoration::Strikethrough)
    }

    fn obfuscated(self) -> Text {
        self.decorate(TextDecoration::Obfuscated)
    }
}

impl IntoText<'static> for Text {
    fn into_cow_text(self) -> Cow<'static, Text> {
        Cow::Owned(self)
    }
}

impl<'a> IntoText<'a> for &'a Text {
    fn into_cow_text(self) -> Cow<'a, Text> {
        Cow::Borrowed(self)
    }
}

impl<'a> IntoText<'a> for Cow<'a, Text> {
    fn into_cow_text(self) -> Cow<'a, Text> {
        self
    }
}

macro_rules! impl_into_text_for_str {
    ($($ty:ty),*) => {
        $(
            impl IntoText<'static> for $ty {
                fn into_cow_text(self) -> Cow<'static, Text> {
                    Cow::Owned(Text::text(self))
                }
            }

            impl From<$ty> for Text {
                fn from(value: $ty) -> Self {
                    Text::text(value)
                }
            }
        )*
    };
}

impl_into_text_for_str!(String, &'static str, Cow<'static, str>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decorations_accumulate() {
        let text = "kills".bold().italic();

        assert_eq!(text.bold, Some(true));
        assert_eq!(text.italic, Some(true));
        assert_eq!(text.underlined, None);
    }

    #[test]
    fn decorated_applies_whole_mask() {
        let mask = DecorationMask::new().with_strikethrough(true).with_obfuscated(true);
        let text = "x".underlined().decorated(mask);

        assert_eq!(text.underlined, Some(true));
        assert_eq!(text.strikethrough, Some(true));
        assert_eq!(text.obfuscated, Some(true));
        assert_eq!(text.bold, None);
    }
}
