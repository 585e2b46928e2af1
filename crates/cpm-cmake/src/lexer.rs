//! A small tokenizer for CMake list files.
//!
//! Only the lexical structure needed to find command invocations is
//! recognized: words, quoted and bracket arguments, parentheses, and
//! comments. Variable references and escapes are kept verbatim inside the
//! token text. All delimiters are ASCII, so byte offsets are always valid
//! `str` boundaries.

use std::ops::Range;

/// Kinds of lexical tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An unquoted word: a command name or an unquoted argument.
    Word,
    /// A `"..."` argument. The token text excludes the quotes.
    Quoted,
    /// A `[[...]]` / `[=[...]=]` argument. The token text excludes the brackets.
    Bracket,
    OpenParen,
    CloseParen,
    /// A `#` line comment or `#[[...]]` bracket comment.
    Comment,
}

/// A token with its byte span in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Token content (without quotes or brackets for arguments).
    pub text: &'a str,
    /// Full span in the source, delimiters included.
    pub span: Range<usize>,
}

/// Split `source` into tokens. Whitespace is dropped.
///
/// Lexing never fails: an unterminated quoted or bracket argument runs to
/// the end of the input.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        match bytes[pos] {
            b if b.is_ascii_whitespace() => {
                pos += 1;
            }
            b'(' => {
                pos += 1;
                tokens.push(token(source, TokenKind::OpenParen, start..pos, start..pos));
            }
            b')' => {
                pos += 1;
                tokens.push(token(source, TokenKind::CloseParen, start..pos, start..pos));
            }
            b'#' => {
                pos = match bracket_open(bytes, pos + 1) {
                    Some((level, content_start)) => {
                        bracket_close(bytes, content_start, level).map_or(bytes.len(), |(_, end)| end)
                    }
                    None => line_end(bytes, pos),
                };
                tokens.push(token(source, TokenKind::Comment, start..pos, start..pos));
            }
            b'"' => {
                let content_start = pos + 1;
                let (content_end, end) = quoted_end(bytes, content_start);
                pos = end;
                tokens.push(token(
                    source,
                    TokenKind::Quoted,
                    content_start..content_end,
                    start..pos,
                ));
            }
            b'[' => match bracket_open(bytes, pos) {
                Some((level, content_start)) => {
                    let (content_end, end) = bracket_close(bytes, content_start, level)
                        .unwrap_or((bytes.len(), bytes.len()));
                    pos = end;
                    tokens.push(token(
                        source,
                        TokenKind::Bracket,
                        content_start..content_end,
                        start..pos,
                    ));
                }
                None => {
                    pos = word_end(bytes, pos);
                    tokens.push(token(source, TokenKind::Word, start..pos, start..pos));
                }
            },
            _ => {
                pos = word_end(bytes, pos);
                tokens.push(token(source, TokenKind::Word, start..pos, start..pos));
            }
        }
    }

    tokens
}

fn token(source: &str, kind: TokenKind, text: Range<usize>, span: Range<usize>) -> Token<'_> {
    Token {
        kind,
        text: &source[text],
        span,
    }
}

/// If a bracket opener `[`, `=`*, `[` starts at `pos`, return its level and
/// the offset just past it.
fn bracket_open(bytes: &[u8], pos: usize) -> Option<(usize, usize)> {
    if bytes.get(pos) != Some(&b'[') {
        return None;
    }
    let mut cursor = pos + 1;
    while bytes.get(cursor) == Some(&b'=') {
        cursor += 1;
    }
    if bytes.get(cursor) == Some(&b'[') {
        Some((cursor - pos - 1, cursor + 1))
    } else {
        None
    }
}

/// Find the closer `]`, `=` x level, `]` at or after `from`. Returns the
/// content end and the offset just past the closer.
fn bracket_close(bytes: &[u8], from: usize, level: usize) -> Option<(usize, usize)> {
    let mut cursor = from;
    while cursor < bytes.len() {
        if bytes[cursor] == b']' {
            let equals = bytes[cursor + 1..]
                .iter()
                .take_while(|&&b| b == b'=')
                .count();
            let closer = cursor + 1 + equals;
            if equals == level && bytes.get(closer) == Some(&b']') {
                return Some((cursor, closer + 1));
            }
        }
        cursor += 1;
    }
    None
}

fn line_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |offset| from + offset)
}

/// Returns the content end and the offset just past the closing quote.
fn quoted_end(bytes: &[u8], from: usize) -> (usize, usize) {
    let mut cursor = from;
    while cursor < bytes.len() {
        match bytes[cursor] {
            b'\\' => cursor += 2,
            b'"' => return (cursor, cursor + 1),
            _ => cursor += 1,
        }
    }
    (bytes.len(), bytes.len())
}

fn word_end(bytes: &[u8], from: usize) -> usize {
    let mut cursor = from;
    while cursor < bytes.len() {
        match bytes[cursor] {
            b'\\' => cursor += 2,
            b'(' | b')' | b'"' | b'#' => break,
            b if b.is_ascii_whitespace() => break,
            _ => cursor += 1,
        }
    }
    cursor.min(bytes.len())
}
