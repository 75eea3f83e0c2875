use ecss_compiler::GrammarError;
use std::error::Error;
use std::fmt;

/// 1-based line and column (in characters) of a byte offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Locate `offset` inside `source`. Offsets past the end clamp to it.
    pub fn of(source: &str, offset: usize) -> Self {
        let mut end = offset.min(source.len());
        while !source.is_char_boundary(end) {
            end -= 1;
        }
        let before = source.get(..end).unwrap_or_default();
        let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
        Self {
            line: before.matches('\n').count() + 1,
            column: before.get(line_start..).unwrap_or_default().chars().count() + 1,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.line, self.column)
    }
}

/// An opening marker without its closing delimiter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    /// Byte offset of the marker in the module.
    pub offset: usize,
    pub location: Location,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "unterminated invocation starting at {} (byte {})",
            self.location, self.offset
        )
    }
}

impl Error for SyntaxError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RewriteError {
    Syntax(SyntaxError),
    /// Invocation content failed to compile. The span is relative to the module.
    Grammar {
        error: GrammarError,
        location: Location,
    },
}

impl RewriteError {
    /// Byte offset in the module where the problem starts.
    pub const fn offset(&self) -> usize {
        match self {
            Self::Syntax(err) => err.offset,
            Self::Grammar { error, .. } => error.span.start,
        }
    }

    pub const fn location(&self) -> Location {
        match self {
            Self::Syntax(err) => err.location,
            Self::Grammar { location, .. } => *location,
        }
    }
}

impl fmt::Display for RewriteError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(err) => write!(formatter, "syntax error: {err}"),
            Self::Grammar { error, location } => {
                write!(formatter, "grammar error at {location}: {error}")
            }
        }
    }
}

impl Error for RewriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Syntax(err) => Some(err),
            Self::Grammar { error, .. } => Some(error),
        }
    }
}

impl From<SyntaxError> for RewriteError {
    fn from(err: SyntaxError) -> Self {
        Self::Syntax(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_counts_lines_and_chars() {
        let source = "ab\ncé d\nx";
        assert_eq!(Location::of(source, 0), Location { line: 1, column: 1 });
        assert_eq!(Location::of(source, 3), Location { line: 2, column: 1 });
        // `é` is two bytes but one column.
        assert_eq!(Location::of(source, 6), Location { line: 2, column: 3 });
        assert_eq!(Location::of(source, 100), Location { line: 3, column: 2 });
    }
}
