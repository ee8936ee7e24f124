#![doc = include_str!("../README.md")]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    rustdoc::missing_crate_level_docs,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls,
    rustdoc::invalid_html_tags
)]
#![warn(
    trivial_casts,
    trivial_numeric_casts,
    unused_lifetimes,
    unused_import_braces,
    unreachable_pub,
    clippy::dbg_macro
)]

use std::borrow::Cow;
use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

pub mod color;
mod component;
pub mod decoration;
mod into_text;
mod version;


pub use color::{Color, NamedColor, RgbColor};
pub use component::{Component, StructuredComponent, TextStyle};
pub use decoration::{decorations, DecorationMask, Decorations, TextDecoration};
pub use into_text::IntoText;
pub use version::ProtocolVersion;

/// A JSON chat component as understood by the client.
///
/// This is the native representation that [`Component`] trees are converted
/// into. It can also be wrapped back into a [`Component`] with
/// [`Component::native`], in which case conversion returns it untouched.
///
/// ```
/// use safeboard_text::{Color, IntoText};
///
/// let txt = "Health: ".into_text() + "20".color(Color::RED).bold();
///
/// assert_eq!(txt.to_plain_string(), "Health: 20");
/// assert_eq!(
///     txt.to_string(),
///     r#"{"text":"Health: ","extra":[{"text":"20","color":"red","bold":true}]}"#
/// );
/// ```
#[derive(Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Text(Box<TextInner>);

/// Text data and formatting.
#[derive(Clone, PartialEq, Default, Debug, Serialize, Deserialize)]
pub struct TextInner {
    pub text: Cow<'static, str>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,

    /// Resource location of the font, e.g. `minecraft:uniform`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Cow<'static, str>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlined: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obfuscated: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<Text>,
}

impl Text {
    /// Constructs a new plain text object.
    pub fn text(plain: impl Into<Cow<'static, str>>) -> Self {
        Self(Box::new(TextInner {
            text: plain.into(),
            ..Default::default()
        }))
    }

    /// Appends a child, returning the modified text.
    pub fn add_child<'a>(mut self, child: impl IntoText<'a>) -> Self {
        self.0.extra.push(child.into_text());
        self
    }

    /// Returns `true` if neither this text nor any of its children contain
    /// characters.
    pub fn is_empty(&self) -> bool {
        self.0.text.is_empty() && self.0.extra.iter().all(Text::is_empty)
    }

    /// Writes the text content of this component and its children without
    /// any formatting.
    pub fn write_plain(&self, w: &mut impl fmt::Write) -> fmt::Result {
        w.write_str(&self.0.text)?;
        for child in &self.0.extra {
            child.write_plain(w)?;
        }
        Ok(())
    }

    pub fn to_plain_string(&self) -> String {
        let mut buf = String::new();
        // Writing to a `String` cannot fail.
        let _ = self.write_plain(&mut buf);
        buf
    }
}

impl Deref for Text {
    type Target = TextInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Text {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: IntoText<'static>> std::ops::Add<T> for Text {
    type Output = Self;

    fn add(self, rhs: T) -> Self::Output {
        self.add_child(rhs)
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// Prints the JSON form of the text. The alternate flag (`{:#}`)
/// pretty-prints it.
impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let json = if f.alternate() {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
        .map_err(|_| fmt::Error)?;

        f.write_str(&json)
    }
}
