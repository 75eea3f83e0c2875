//! Locating marker-delimited invocations in module text.

use crate::error::{Location, SyntaxError};

/// Back-tick delimiter that opens and closes an invocation.
pub const DELIMITER: char = '`';

/// One `` marker`...` `` occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Offset of the marker's first byte.
    pub start: usize,
    /// Offset just past the closing delimiter.
    pub end: usize,
    /// Offset of the first byte of the invocation text.
    pub text_start: usize,
    /// Offset of the closing delimiter.
    pub text_end: usize,
}

impl Invocation {
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.text_start..self.text_end).unwrap_or_default()
    }
}

const fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '$')
}

/// Find every invocation of `marker` in `source`, in source order.
///
/// The marker only counts when it is not the tail of a longer identifier
/// (`myecss` is left alone).
///
/// # Errors
///
/// Returns a [`SyntaxError`] for an opening marker whose closing delimiter is
/// missing.
pub fn find_invocations(source: &str, marker: &str) -> Result<Vec<Invocation>, SyntaxError> {
    let opener = format!("{marker}{DELIMITER}");
    let mut found = Vec::new();
    let mut cursor = 0;

    while let Some(rel) = source.get(cursor..).and_then(|rest| rest.find(&opener)) {
        let start = cursor + rel;
        let text_start = start + opener.len();
        let glued = source
            .get(..start)
            .and_then(|before| before.chars().next_back())
            .is_some_and(is_ident_char);
        if glued {
            cursor = text_start;
            continue;
        }

        let Some(close) = source
            .get(text_start..)
            .and_then(|rest| rest.find(DELIMITER))
        else {
            return Err(SyntaxError {
                offset: start,
                location: Location::of(source, start),
            });
        };
        let text_end = text_start + close;
        let end = text_end + DELIMITER.len_utf8();
        found.push(Invocation {
            start,
            end,
            text_start,
            text_end,
        });
        cursor = end;
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_each_pair() {
        let source = "a(ecss`p=4`, ecss`m=2`)";
        let found = find_invocations(source, "ecss").unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].text(source), "p=4");
        assert_eq!(found[1].text(source), "m=2");
        assert_eq!(&source[found[0].start..found[0].end], "ecss`p=4`");
    }

    #[test]
    fn identifier_tail_is_not_a_marker() {
        let source = "myecss`p=4` ecss`m=1`";
        let found = find_invocations(source, "ecss").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text(source), "m=1");
    }

    #[test]
    fn multiline_invocation() {
        let source = "x = ecss`\n  p=4\n  m=2\n`;";
        let found = find_invocations(source, "ecss").unwrap();
        assert_eq!(found[0].text(source), "\n  p=4\n  m=2\n");
    }

    #[test]
    fn unterminated_marker() {
        let source = "ok\nconst a = ecss`p=4";
        let err = find_invocations(source, "ecss").unwrap_err();
        assert_eq!(err.offset, 13);
        assert_eq!(err.location, Location { line: 2, column: 11 });
    }

    #[test]
    fn no_invocations() {
        assert!(find_invocations("const a = `plain`; // ecss", "ecss").unwrap().is_empty());
    }
}
