//! Locating the CPM anchor and package declarations in a list file.
//!
//! The scan works on command invocations produced from [`lexer::tokenize`]:
//!
//! - the **anchor** is the first `include(...)` whose first argument names a
//!   file ending in `CPM.cmake`;
//! - a **declaration** is a `CPMAddPackage("<source>")` call with exactly one
//!   quoted, whitespace-free argument;
//! - the **insertion point** is the end of the line holding the last
//!   declaration of the contiguous run that directly follows the anchor
//!   (comments and blank lines in between are allowed), or the end of the
//!   anchor's line when no declaration follows it. A comment trailing that
//!   line stays on it.
//!
//! Command names are matched case-insensitively, as CMake does.

use std::ops::Range;

use crate::lexer::{tokenize, Token, TokenKind};

/// Name of the CPM bootstrap file the anchor must include.
pub const CPM_BOOTSTRAP_FILE: &str = "CPM.cmake";

/// Command used for package declarations.
pub const DECLARATION_COMMAND: &str = "CPMAddPackage";

/// One argument of a command invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argument<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// A command invocation such as `include(cmake/CPM.cmake)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command<'a> {
    pub name: &'a str,
    pub arguments: Vec<Argument<'a>>,
    /// From the first byte of the name to just past the closing paren.
    pub span: Range<usize>,
}

impl Command<'_> {
    fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// A package declaration found in a list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// The CPM package source, e.g. `gh:fmtlib/fmt@10.2.1`.
    pub source: &'a str,
    pub span: Range<usize>,
}

/// Extract every complete command invocation from `source`, in order.
///
/// An unterminated invocation at the end of the input is dropped.
pub fn commands(source: &str) -> Vec<Command<'_>> {
    let tokens: Vec<Token<'_>> = tokenize(source)
        .into_iter()
        .filter(|t| t.kind != TokenKind::Comment)
        .collect();

    let mut commands = Vec::new();
    let mut index = 0;
    while index < tokens.len() {
        let name = &tokens[index];
        let opens = tokens.get(index + 1).map(|t| t.kind) == Some(TokenKind::OpenParen);
        if name.kind != TokenKind::Word || !is_identifier(name.text) || !opens {
            index += 1;
            continue;
        }

        let mut depth = 0usize;
        let mut arguments = Vec::new();
        let mut cursor = index + 1;
        let mut end = None;
        while cursor < tokens.len() {
            let token = &tokens[cursor];
            match token.kind {
                TokenKind::OpenParen => {
                    depth += 1;
                    if depth > 1 {
                        arguments.push(Argument {
                            kind: TokenKind::Word,
                            text: token.text,
                        });
                    }
                }
                TokenKind::CloseParen => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(token.span.end);
                        break;
                    }
                    arguments.push(Argument {
                        kind: TokenKind::Word,
                        text: token.text,
                    });
                }
                kind => arguments.push(Argument {
                    kind,
                    text: token.text,
                }),
            }
            cursor += 1;
        }

        match end {
            Some(end) => {
                commands.push(Command {
                    name: name.text,
                    arguments,
                    span: name.span.start..end,
                });
                index = cursor + 1;
            }
            None => break,
        }
    }

    commands
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_anchor(command: &Command<'_>) -> bool {
    command.is("include")
        && command
            .arguments
            .first()
            .is_some_and(|arg| arg.kind != TokenKind::Bracket && arg.text.ends_with(CPM_BOOTSTRAP_FILE))
}

fn as_declaration<'a>(command: &Command<'a>) -> Option<Declaration<'a>> {
    if !command.is(DECLARATION_COMMAND) {
        return None;
    }
    match command.arguments.as_slice() {
        [arg] if arg.kind == TokenKind::Quoted && is_valid_source(arg.text) => Some(Declaration {
            source: arg.text,
            span: command.span.clone(),
        }),
        _ => None,
    }
}

/// Whether `source` can appear as the argument of a declaration.
pub fn is_valid_source(source: &str) -> bool {
    !source.is_empty() && !source.contains(|c: char| c.is_whitespace() || c == '"' || c == '\\')
}

/// Span of the anchor, if the file has one.
pub fn find_anchor(source: &str) -> Option<Range<usize>> {
    commands(source)
        .into_iter()
        .find(is_anchor)
        .map(|command| command.span)
}

/// Byte offset at which a new declaration belongs, or `None` when the file
/// has no anchor.
pub fn insertion_point(source: &str) -> Option<usize> {
    let commands = commands(source);
    let anchor = commands.iter().position(is_anchor)?;

    let run_end = commands[anchor + 1..]
        .iter()
        .map_while(as_declaration)
        .last()
        .map(|declaration| declaration.span.end);

    let end = run_end.unwrap_or(commands[anchor].span.end);
    Some(past_trailing_comment(source, end))
}

/// Move `point` past a comment that starts on the same line.
fn past_trailing_comment(source: &str, point: usize) -> usize {
    let rest = &source[point..];
    match tokenize(rest).first() {
        Some(token)
            if token.kind == TokenKind::Comment && !rest[..token.span.start].contains('\n') =>
        {
            point + token.span.start + token.text.trim_end_matches('\r').len()
        }
        _ => point,
    }
}

/// Every declaration in the file, in source order.
pub fn declarations(source: &str) -> Vec<Declaration<'_>> {
    commands(source)
        .iter()
        .filter_map(as_declaration)
        .collect()
}

/// The project name from the first `project(<name> ...)` call.
pub fn project_name(source: &str) -> Option<&str> {
    commands(source)
        .into_iter()
        .find(|command| command.is("project"))
        .and_then(|command| command.arguments.first().map(|arg| arg.text))
        .filter(|name| !name.is_empty())
}
