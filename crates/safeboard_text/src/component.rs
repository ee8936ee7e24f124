use std::borrow::Cow;

use crate::{decorations, Color, DecorationMask, ProtocolVersion, RgbColor, Text, TextInner};

/// Immutable text tree that scoreboard content is authored in.
///
/// A component is independent of any client: it is only turned into wire
/// [`Text`] by [`Component::convert`], once the protocol version of the
/// receiving client is known.
#[derive(Clone, PartialEq, Debug)]
pub enum Component {
    /// Text that is already in native form. Converted as-is.
    Native(Text),
    /// Unstyled literal text.
    Simple(Cow<'static, str>),
    /// Styled text with children.
    Structured(StructuredComponent),
}

/// A styled node. Children inherit the style of their parent unless they
/// override it.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct StructuredComponent {
    text: Cow<'static, str>,
    style: TextStyle,
    extra: Vec<StructuredComponent>,
}

/// Style of a [`StructuredComponent`].
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct TextStyle {
    pub color: Option<RgbColor>,
    pub decorations: DecorationMask,
    pub font: Option<Cow<'static, str>>,
}

impl Component {
    pub fn simple(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Simple(text.into())
    }

    pub fn native(text: Text) -> Self {
        Self::Native(text)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Native(text) => text.is_empty(),
            Self::Simple(text) => text.is_empty(),
            Self::Structured(node) => node.is_empty(),
        }
    }

    /// Converts this component to the native text sent to a client running
    /// `version`.
    ///
    /// Native components are borrowed, everything else is built fresh. The
    /// result depends only on `self` and `version`.
    pub fn convert(&self, version: ProtocolVersion) -> Cow<'_, Text> {
        match self {
            Self::Native(text) => Cow::Borrowed(text),
            Self::Simple(text) => Cow::Owned(Text::text(text.clone())),
            Self::Structured(node) => Cow::Owned(node.convert(version)),
        }
    }

    /// The literal text of the tree in order, without styling.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Native(text) => text.to_plain_string(),
            Self::Simple(text) => text.to_string(),
            Self::Structured(node) => {
                let mut buf = String::new();
                node.write_plain(&mut buf);
                buf
            }
        }
    }
}

impl Default for Component {
    fn default() -> Self {
        Self::Simple(Cow::Borrowed(""))
    }
}

impl From<&'static str> for Component {
    fn from(value: &'static str) -> Self {
        Self::Simple(Cow::Borrowed(value))
    }
}

impl From<String> for Component {
    fn from(value: String) -> Self {
        Self::Simple(Cow::Owned(value))
    }
}

impl From<Text> for Component {
    fn from(value: Text) -> Self {
        Self::Native(value)
    }
}

impl From<StructuredComponent> for Component {
    fn from(value: StructuredComponent) -> Self {
        Self::Structured(value)
    }
}

impl StructuredComponent {
    pub fn new(text: impl Into<Cow<'static, str>>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            extra: vec![],
        }
    }

    /// Appends a child node.
    #[must_use]
    pub fn with_child(mut self, child: StructuredComponent) -> Self {
        self.extra.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = StructuredComponent>) -> Self {
        self.extra.extend(children);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn children(&self) -> &[StructuredComponent] {
        &self.extra
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.extra.iter().all(StructuredComponent::is_empty)
    }

    fn write_plain(&self, buf: &mut String) {
        buf.push_str(&self.text);
        for child in &self.extra {
            child.write_plain(buf);
        }
    }

    fn convert(&self, version: ProtocolVersion) -> Text {
        let mut text = Text(Box::new(TextInner {
            text: self.text.clone(),
            color: self.style.color.map(|rgb| {
                if version.supports_rgb() {
                    Color::Rgb(rgb)
                } else {
                    Color::Named(rgb.to_named_lossy())
                }
            }),
            font: self
                .style
                .font
                .as_ref()
                .filter(|_| version.supports_fonts())
                .cloned(),
            extra: self.extra.iter().map(|child| child.convert(version)).collect(),
            ..Default::default()
        }));

        decorations(self.style.decorations).apply_to(&mut text);
        text
    }
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn color(mut self, color: RgbColor) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn decorations(mut self, decorations: DecorationMask) -> Self {
        self.decorations = decorations;
        self
    }

    #[must_use]
    pub fn font(mut self, font: impl Into<Cow<'static, str>>) -> Self {
        self.font = Some(font.into());
        self
    }
}
