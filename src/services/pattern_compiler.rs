use crate::domain::models::{CompiledPattern, DateFormat, PatternToken};

/// Parser for one `%`-directive
struct DirectiveParser {
    prefix: &'static str,
    kind: DirectiveKind,
}

enum DirectiveKind {
    Simple(PatternToken),
    /// `%date` with an optional `{FORMAT}` suffix
    Date,
}

// Tried in this order; every prefix is distinct, so the first match wins.
static PARSERS: [DirectiveParser; 9] = [
    DirectiveParser::simple("%n", PatternToken::Newline),
    DirectiveParser::simple("%msg", PatternToken::Message),
    DirectiveParser::simple("%file", PatternToken::FileStem),
    DirectiveParser::simple("%fext", PatternToken::FileExtension),
    DirectiveParser::simple("%line", PatternToken::Line),
    DirectiveParser::simple("%level", PatternToken::Level),
    DirectiveParser::simple("%column", PatternToken::Column),
    DirectiveParser::simple("%func", PatternToken::Function),
    DirectiveParser {
        prefix: "%date",
        kind: DirectiveKind::Date,
    },
];

impl DirectiveParser {
    const fn simple(prefix: &'static str, token: PatternToken) -> Self {
        Self {
            prefix,
            kind: DirectiveKind::Simple(token),
        }
    }

    /// Returns the token and the number of bytes consumed from `input`
    fn parse(&self, input: &str) -> Option<(PatternToken, usize)> {
        if !input.starts_with(self.prefix) {
            return None;
        }

        match &self.kind {
            DirectiveKind::Simple(token) => Some((token.clone(), self.prefix.len())),
            DirectiveKind::Date => {
                let after = &input[self.prefix.len()..];
                match parameter(after) {
                    Some(param) => Some((
                        PatternToken::Date {
                            format: DateFormat::new(param),
                            parameterized: true,
                        },
                        self.prefix.len() + param.len() + 2,
                    )),
                    None => Some((
                        PatternToken::Date {
                            format: DateFormat::default(),
                            parameterized: false,
                        },
                        self.prefix.len(),
                    )),
                }
            }
        }
    }
}

/// Text between `{` and the first `}`, when `input` starts with a brace block
fn parameter(input: &str) -> Option<&str> {
    if input.len() < 2 || !input.starts_with('{') {
        return None;
    }
    input.find('}').map(|end| &input[1..end])
}

/// Compiles pattern strings into token sequences
///
/// Compilation never fails: a `%` that starts no known directive becomes a
/// one-character literal.
///
/// # Examples
///
/// ```
/// use tracelog::domain::models::PatternToken;
/// use tracelog::services::PatternCompiler;
///
/// let pattern = PatternCompiler::new().compile("%level [%line] %msg%n");
/// assert_eq!(
///     pattern.tokens(),
///     &[
///         PatternToken::Level,
///         PatternToken::Literal(" [".to_string()),
///         PatternToken::Line,
///         PatternToken::Literal("] ".to_string()),
///         PatternToken::Message,
///         PatternToken::Newline,
///     ]
/// );
/// assert_eq!(pattern.to_string(), "%level [%line] %msg%n");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternCompiler;

impl PatternCompiler {
    pub const fn new() -> Self {
        Self
    }

    pub fn compile(&self, pattern: &str) -> CompiledPattern {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern;

        while let Some(current) = rest.chars().next() {
            if current == '%' {
                flush_literal(&mut literal, &mut tokens);

                let (token, consumed) = PARSERS
                    .iter()
                    .find_map(|parser| parser.parse(rest))
                    .unwrap_or_else(|| (PatternToken::Literal("%".to_string()), 1));

                tokens.push(token);
                rest = &rest[consumed..];
            } else {
                literal.push(current);
                rest = &rest[current.len_utf8()..];
            }
        }

        flush_literal(&mut literal, &mut tokens);
        CompiledPattern::from_tokens(tokens)
    }
}

fn flush_literal(literal: &mut String, tokens: &mut Vec<PatternToken>) {
    if !literal.is_empty() {
        tokens.push(PatternToken::Literal(std::mem::take(literal)));
    }
}

/// Shorthand for `PatternCompiler::new().compile(pattern)`
pub fn compile(pattern: &str) -> CompiledPattern {
    PatternCompiler::new().compile(pattern)
}
