use std::fmt::Write as _;
use std::path::Path;

use crate::domain::models::{CompiledPattern, LogEvent, PatternToken};

/// Renders one event with a compiled pattern
///
/// Pure and infallible: every token contributes its text independently and
/// missing data (no file extension, empty function name) renders as nothing.
pub fn render(pattern: &CompiledPattern, event: &LogEvent<'_>) -> String {
    let mut out = String::with_capacity(event.message.len() + 64);
    for token in pattern.tokens() {
        write_token(token, event, &mut out);
    }
    out
}

fn write_token(token: &PatternToken, event: &LogEvent<'_>, out: &mut String) {
    match token {
        PatternToken::Literal(text) => out.push_str(text),
        PatternToken::Date { format, .. } => format.write_to(&event.timestamp, out),
        PatternToken::Level => out.push_str(&event.level.display_name()),
        PatternToken::FileStem => {
            if let Some(stem) = Path::new(event.site.file).file_stem() {
                out.push_str(&stem.to_string_lossy());
            }
        }
        PatternToken::FileExtension => {
            if let Some(ext) = Path::new(event.site.file).extension() {
                out.push_str(&ext.to_string_lossy());
            }
        }
        PatternToken::Line => {
            let _ = write!(out, "{}", event.site.line);
        }
        PatternToken::Column => {
            let _ = write!(out, "{}", event.site.column);
        }
        PatternToken::Function => out.push_str(event.site.function),
        PatternToken::Message => out.push_str(&event.message),
        PatternToken::Newline => out.push('\n'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{CallSite, LogLevel};
    use crate::services::pattern_compiler::compile;
    use chrono::{FixedOffset, TimeZone};

    fn event(level: LogLevel, message: &str) -> LogEvent<'_> {
        LogEvent::new(
            FixedOffset::east_opt(3600)
                .unwrap()
                .timestamp_millis_opt(12_343_123)
                .unwrap(),
            level,
            CallSite::new("/srv/app/src/request_handler.rs", "handle_request", 18, 24),
            message,
        )
    }

    #[test]
    fn test_render_full_pattern() {
        let pattern = compile("%date{HH:mm:ss.SSS} %level %file.%fext[%line:%column] - %msg%n");
        assert_eq!(
            render(&pattern, &event(LogLevel::Error, "This is error")),
            "04:25:43.123 ERROR request_handler.rs[18:24] - This is error\n"
        );
    }

    #[test]
    fn test_render_dates() {
        let iso = compile("%date{yyyy-MM-dd'T'HH:mm:ss.SSS Z}");
        assert_eq!(
            render(&iso, &event(LogLevel::Info, "")),
            "1970-01-01T04:25:43.123 +0100"
        );

        let default = compile("%date");
        assert_eq!(render(&default, &event(LogLevel::Info, "")), "1970-01-01 04:25:43.123");
    }

    #[test]
    fn test_render_function_and_custom_level() {
        let pattern = compile("%level|%func|%msg");
        assert_eq!(
            render(&pattern, &event(LogLevel::Custom("audit".to_string()), "ok")),
            "AUDIT|handle_request|ok"
        );
    }

    #[test]
    fn test_missing_extension_renders_empty() {
        let pattern = compile("[%file][%fext]");
        let mut ev = event(LogLevel::Info, "");
        ev.site.file = "Makefile";
        assert_eq!(render(&pattern, &ev), "[Makefile][]");

        ev.site.file = "";
        assert_eq!(render(&pattern, &ev), "[][]");
    }

    #[test]
    fn test_message_is_verbatim() {
        let pattern = compile("%msg");
        assert_eq!(
            render(&pattern, &event(LogLevel::Info, "100% {} %n done")),
            "100% {} %n done"
        );
    }

    #[test]
    fn test_compiling_twice_renders_identically() {
        let source = "%date %level %file:%line %func %msg%n";
        let ev = event(LogLevel::Warning, "same");
        assert_eq!(render(&compile(source), &ev), render(&compile(source), &ev));
    }
}
