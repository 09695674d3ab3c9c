//! Date patterns for the `%date{...}` directive
//!
//! Patterns use the familiar `yyyy-MM-dd HH:mm:ss.SSS` letters. They are
//! compiled once into a list of fields; each field is either literal text, a
//! `chrono` strftime specifier, or a fractional-seconds run, so rendering an
//! event never reparses the pattern.

use std::fmt::{self, Write as _};

use chrono::{DateTime, FixedOffset, Timelike};

/// Format used by `%date` when no parameter is given
pub const DEFAULT_DATE_PATTERN: &str = "yyyy-MM-dd HH:mm:ss.SSS";

#[derive(Debug, Clone, PartialEq, Eq)]
enum DateField {
    Literal(String),
    Chrono(&'static str),
    /// Fractional seconds truncated to the given number of digits
    Fraction(usize),
}

/// A compiled date pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    fields: Vec<DateField>,
}

impl DateFormat {
    /// Compiles `pattern`. Unknown letters are kept as literal text.
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            fields: compile(pattern),
        }
    }

    /// Source text of the pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Appends the formatted timestamp to `out`
    pub fn write_to(&self, timestamp: &DateTime<FixedOffset>, out: &mut String) {
        for field in &self.fields {
            match field {
                DateField::Literal(text) => out.push_str(text),
                DateField::Chrono(spec) => {
                    // Specifiers are fixed and valid, so this cannot fail.
                    let _ = write!(out, "{}", timestamp.format(spec));
                }
                DateField::Fraction(digits) => {
                    let nanos = timestamp.nanosecond() % 1_000_000_000;
                    let full = format!("{nanos:09}");
                    if *digits <= full.len() {
                        out.push_str(&full[..*digits]);
                    } else {
                        out.push_str(&full);
                        out.extend(std::iter::repeat('0').take(digits - full.len()));
                    }
                }
            }
        }
    }

    /// Formats the timestamp into a new string
    pub fn format(&self, timestamp: &DateTime<FixedOffset>) -> String {
        let mut out = String::with_capacity(self.pattern.len() + 8);
        self.write_to(timestamp, &mut out);
        out
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_PATTERN)
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

fn compile(pattern: &str) -> Vec<DateField> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let current = chars[pos];

        if current == '\'' {
            // '' is an escaped quote, otherwise everything up to the closing quote is literal
            if chars.get(pos + 1) == Some(&'\'') {
                push_literal(&mut fields, "'");
                pos += 2;
                continue;
            }

            let mut text = String::new();
            pos += 1;
            while pos < chars.len() {
                if chars[pos] == '\'' {
                    if chars.get(pos + 1) == Some(&'\'') {
                        text.push('\'');
                        pos += 2;
                        continue;
                    }
                    pos += 1;
                    break;
                }
                text.push(chars[pos]);
                pos += 1;
            }
            push_literal(&mut fields, &text);
        } else if current.is_ascii_alphabetic() {
            let run = chars[pos..].iter().take_while(|&&c| c == current).count();
            match letter_field(current, run) {
                Some(field) => fields.push(field),
                None => {
                    let text: String = std::iter::repeat(current).take(run).collect();
                    push_literal(&mut fields, &text);
                }
            }
            pos += run;
        } else {
            let mut buf = [0u8; 4];
            push_literal(&mut fields, current.encode_utf8(&mut buf));
            pos += 1;
        }
    }

    fields
}

fn letter_field(letter: char, run: usize) -> Option<DateField> {
    let spec = match (letter, run) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M', 1) => "%-m",
        ('M', 2) => "%m",
        ('M', 3) => "%b",
        ('M', _) => "%B",
        ('d', 1) => "%-d",
        ('d', _) => "%d",
        ('H', 1) => "%-H",
        ('H', _) => "%H",
        ('h', 1) => "%-I",
        ('h', _) => "%I",
        ('m', 1) => "%-M",
        ('m', _) => "%M",
        ('s', 1) => "%-S",
        ('s', _) => "%S",
        ('S', digits) => return Some(DateField::Fraction(digits)),
        ('a', _) => "%p",
        ('E', 1..=3) => "%a",
        ('E', _) => "%A",
        ('D', _) => "%j",
        ('Z', 1..=3) => "%z",
        ('Z' | 'X' | 'x', _) => "%:z",
        ('z', _) => "%Z",
        _ => return None,
    };
    Some(DateField::Chrono(spec))
}

fn push_literal(fields: &mut Vec<DateField>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(DateField::Literal(last)) = fields.last_mut() {
        last.push_str(text);
    } else {
        fields.push(DateField::Literal(text.to_string()));
    }
}
