//! Rename replacement templates
//!
//! Replacement strings use the `$` forms automation users already write in
//! workflow files: `$1`..`$99`, `$<name>`, `$&`, `` $` ``, `$'` and `$$`.
//! A `$` that does not start one of these is literal, so `$1_SUFFIX` is
//! group 1 followed by `_SUFFIX`. Templates are parsed once against the
//! search regex so group numbers are resolved before any key is seen.

use regex::{Captures, Regex};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Group(usize),
    Named(String),
    Before,
    After,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Template {
    pieces: Vec<Piece>,
}

fn digit(b: Option<&u8>) -> Option<usize> {
    b.filter(|b| b.is_ascii_digit()).map(|b| usize::from(b - b'0'))
}

impl Template {
    pub(crate) fn parse(raw: &str, search: &Regex) -> Self {
        // Explicit groups only; group 0 is the whole match.
        let groups = search.captures_len() - 1;
        let has_names = search.capture_names().flatten().next().is_some();

        let mut pieces = Vec::new();
        let mut literal = String::new();
        let bytes = raw.as_bytes();
        let mut i = 0;

        while i < raw.len() {
            if bytes[i] != b'$' {
                let next = raw[i..].find('$').map_or(raw.len(), |offset| i + offset);
                literal.push_str(&raw[i..next]);
                i = next;
                continue;
            }

            let (piece, consumed) = match bytes.get(i + 1) {
                Some(b'$') => (Piece::Literal("$".to_string()), 2),
                Some(b'&') => (Piece::Group(0), 2),
                Some(b'`') => (Piece::Before, 2),
                Some(b'\'') => (Piece::After, 2),
                Some(b'<') if has_names => match raw[i + 2..].find('>') {
                    Some(end) => (Piece::Named(raw[i + 2..i + 2 + end].to_string()), end + 3),
                    None => (Piece::Literal("$<".to_string()), 2),
                },
                next => match (digit(next), digit(bytes.get(i + 2))) {
                    (Some(tens), Some(ones)) if (1..=groups).contains(&(tens * 10 + ones)) => {
                        (Piece::Group(tens * 10 + ones), 3)
                    }
                    (Some(n), _) if (1..=groups).contains(&n) => (Piece::Group(n), 2),
                    _ => (Piece::Literal("$".to_string()), 1),
                },
            };

            match piece {
                Piece::Literal(text) => literal.push_str(&text),
                other => {
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(other);
                }
            }
            i += consumed;
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Self { pieces }
    }

    /// Text that replaces the match described by `caps` inside `haystack`.
    pub(crate) fn expand(&self, caps: &Captures<'_>, haystack: &str, dst: &mut String) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());

        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => dst.push_str(text),
                Piece::Group(n) => dst.push_str(caps.get(*n).map_or("", |m| m.as_str())),
                Piece::Named(name) => dst.push_str(caps.name(name).map_or("", |m| m.as_str())),
                Piece::Before => dst.push_str(&haystack[..whole.start]),
                Piece::After => dst.push_str(&haystack[whole.end..]),
            }
        }
    }
}
