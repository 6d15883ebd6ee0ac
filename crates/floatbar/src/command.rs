//! Commands sent from the toolbar to the host's text engine.
//!
//! The engine speaks a `(commandName, ...args)` protocol. [`Command`] is the
//! typed form of that protocol: every wire name the toolbar can produce has a
//! variant, and anything else travels as [`Command::Custom`].

use std::fmt;

/// One positional argument of a command on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArg {
    /// A string argument: URL, color, font stack, select value.
    Text(String),
    /// A numeric argument: heading level.
    Level(u32),
}

impl fmt::Display for CommandArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Level(level) => write!(f, "{level}"),
        }
    }
}

/// A formatting request for the host's text engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bold,
    Italic,
    Underline,
    Strike,
    ClearFormat,
    /// Wrap the selection in a link to the URL.
    Link(String),
    Unlink,
    /// Set the text color. `inherit` resets it.
    SetColor(String),
    /// Set the highlight color. `inherit` resets it.
    SetBackgroundColor(String),
    Paragraph,
    Blockquote,
    /// Turn the block into a heading of the given level.
    Heading(u32),
    /// Set the font stack, e.g. `Georgia, serif`.
    SetFontFamily(String),
    AlignLeft,
    AlignCenter,
    AlignRight,
    AlignJustify,
    UnorderedList,
    OrderedList,
    /// A command the toolbar does not know, forwarded verbatim.
    Custom {
        name: String,
        argument: Option<String>,
    },
}

impl Command {
    /// Build a command from its wire name and an optional string argument.
    ///
    /// Known names taking a string argument fall back to [`Command::Custom`]
    /// when the argument is missing, and so does `heading` when the argument
    /// is not a level.
    ///
    /// ```
    /// use floatbar::Command;
    ///
    /// assert_eq!(Command::from_parts("bold", None), Command::Bold);
    /// assert_eq!(
    ///     Command::from_parts("setColor", Some("#ff0000".into())),
    ///     Command::SetColor("#ff0000".into()),
    /// );
    /// ```
    pub fn from_parts(name: &str, argument: Option<String>) -> Self {
        let custom = |argument| Self::Custom {
            name: name.to_string(),
            argument,
        };
        match (name, argument) {
            ("bold", None) => Self::Bold,
            ("italic", None) => Self::Italic,
            ("underline", None) => Self::Underline,
            ("strike", None) => Self::Strike,
            ("clearFormat", None) => Self::ClearFormat,
            ("unlink", None) => Self::Unlink,
            ("paragraph", None) => Self::Paragraph,
            ("blockquote", None) => Self::Blockquote,
            ("alignLeft", None) => Self::AlignLeft,
            ("alignCenter", None) => Self::AlignCenter,
            ("alignRight", None) => Self::AlignRight,
            ("alignJustify", None) => Self::AlignJustify,
            ("unorderedList", None) => Self::UnorderedList,
            ("orderedList", None) => Self::OrderedList,
            ("link", Some(url)) => Self::Link(url),
            ("setColor", Some(color)) => Self::SetColor(color),
            ("setBackgroundColor", Some(color)) => Self::SetBackgroundColor(color),
            ("setFontFamily", Some(font)) => Self::SetFontFamily(font),
            ("heading", Some(level)) => match level.parse() {
                Ok(level) => Self::Heading(level),
                Err(_) => custom(Some(level)),
            },
            (_, argument) => custom(argument),
        }
    }

    /// The wire name of the command.
    pub fn name(&self) -> &str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Strike => "strike",
            Self::ClearFormat => "clearFormat",
            Self::Link(_) => "link",
            Self::Unlink => "unlink",
            Self::SetColor(_) => "setColor",
            Self::SetBackgroundColor(_) => "setBackgroundColor",
            Self::Paragraph => "paragraph",
            Self::Blockquote => "blockquote",
            Self::Heading(_) => "heading",
            Self::SetFontFamily(_) => "setFontFamily",
            Self::AlignLeft => "alignLeft",
            Self::AlignCenter => "alignCenter",
            Self::AlignRight => "alignRight",
            Self::AlignJustify => "alignJustify",
            Self::UnorderedList => "unorderedList",
            Self::OrderedList => "orderedList",
            Self::Custom { name, .. } => name,
        }
    }

    /// The positional arguments on the wire.
    pub fn arguments(&self) -> Vec<CommandArg> {
        match self {
            Self::Link(text)
            | Self::SetColor(text)
            | Self::SetBackgroundColor(text)
            | Self::SetFontFamily(text) => vec![CommandArg::Text(text.clone())],
            Self::Heading(level) => vec![CommandArg::Level(*level)],
            Self::Custom {
                argument: Some(argument),
                ..
            } => vec![CommandArg::Text(argument.clone())],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        let arguments = self.arguments();
        if !arguments.is_empty() {
            f.write_str("(")?;
            for (i, argument) in arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{argument}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}
