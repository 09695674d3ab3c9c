use std::fmt;

use super::date_format::DateFormat;

/// One element of a compiled pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternToken {
    /// Text copied verbatim
    Literal(String),
    /// `%date` / `%date{FORMAT}`; `parameterized` records whether braces were given
    Date {
        format: DateFormat,
        parameterized: bool,
    },
    /// `%level`
    Level,
    /// `%file`
    FileStem,
    /// `%fext`
    FileExtension,
    /// `%line`
    Line,
    /// `%column`
    Column,
    /// `%func`
    Function,
    /// `%msg`
    Message,
    /// `%n`
    Newline,
}

impl fmt::Display for PatternToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Date {
                format,
                parameterized: true,
            } => write!(f, "%date{{{format}}}"),
            Self::Date { .. } => f.write_str("%date"),
            Self::Level => f.write_str("%level"),
            Self::FileStem => f.write_str("%file"),
            Self::FileExtension => f.write_str("%fext"),
            Self::Line => f.write_str("%line"),
            Self::Column => f.write_str("%column"),
            Self::Function => f.write_str("%func"),
            Self::Message => f.write_str("%msg"),
            Self::Newline => f.write_str("%n"),
        }
    }
}

/// Ordered token sequence produced by the pattern compiler
///
/// Immutable once built; `Display` reproduces the source pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledPattern {
    tokens: Vec<PatternToken>,
}

impl CompiledPattern {
    pub(crate) const fn from_tokens(tokens: Vec<PatternToken>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tokens.iter().try_for_each(|token| write!(f, "{token}"))
    }
}
