//! Line visitor for LOC counting.
//!
//! The visitor walks a source text line by line and categorizes each line as
//! one of:
//!
//! - **code**: the line contains at least one code token
//! - **comment**: the line contains comment text and nothing else
//! - **blank**: the line is empty or whitespace only
//!
//! Lines that consist only of a documentation string (Python `"""..."""`) are
//! counted as comments when doc strings are counted, and dropped otherwise.
//!
//! The recognizer is deliberately small: it knows line comments, block
//! comments, doc strings and double quoted string literals, which is enough to
//! keep comment markers inside strings from being mistaken for comments.

use std::fs;
use std::path::Path;

use crate::error::LoccError;
use crate::Result;

use super::counts::Counts;

/// Comment syntax of one language.
#[derive(Debug, Clone, Copy)]
pub struct Syntax {
    /// Markers starting a comment that runs to the end of the line
    pub line_comments: &'static [&'static str],
    /// Start/end delimiter pairs of block comments
    pub block_comments: &'static [(&'static str, &'static str)],
    /// Start/end delimiter pairs of documentation strings
    pub doc_strings: &'static [(&'static str, &'static str)],
}

/// Multi-line construct the visitor is currently inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    BlockComment(&'static str),
    DocString(&'static str),
    StringLiteral(&'static str),
}

/// Tokens recognized while scanning code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    LineComment,
    BlockCommentOpen(&'static str, &'static str),
    StringBlockOpen(&'static str, &'static str),
    DoubleQuote,
}

/// Tracks what kind of content has been seen on the current line.
#[derive(Default, Debug, Clone, Copy)]
struct LineContext {
    has_code: bool,
    has_comment: bool,
    has_doc_string: bool,
}

/// Stateful line classifier for one source text.
pub struct LineVisitor {
    syntax: &'static Syntax,
    count_doc_strings: bool,
    state: State,
    counts: Counts,
}

impl LineVisitor {
    pub fn new(syntax: &'static Syntax, count_doc_strings: bool) -> Self {
        Self {
            syntax,
            count_doc_strings,
            state: State::Normal,
            counts: Counts::ZERO,
        }
    }

    /// Classify every line of `text` and return the accumulated counts.
    pub fn visit_str(mut self, text: &str) -> Counts {
        for line in text.lines() {
            self.visit_line(line);
        }
        self.counts
    }

    fn visit_line(&mut self, line: &str) {
        let ctx = self.scan(line);

        if line.trim().is_empty() {
            self.counts.blank += 1;
        } else if ctx.has_code {
            self.counts.code += 1;
        } else if ctx.has_comment {
            self.counts.comment += 1;
        } else if ctx.has_doc_string && self.count_doc_strings {
            self.counts.comment += 1;
        }
    }

    fn scan(&mut self, line: &str) -> LineContext {
        let mut ctx = LineContext::default();
        let mut rest = line;

        loop {
            match self.state {
                State::BlockComment(end) => {
                    ctx.has_comment = true;
                    match skip_past(rest, end) {
                        Some(after) => {
                            rest = after;
                            self.state = State::Normal;
                        }
                        None => break,
                    }
                }
                State::DocString(end) => {
                    ctx.has_doc_string = true;
                    match skip_past(rest, end) {
                        Some(after) => {
                            rest = after;
                            self.state = State::Normal;
                        }
                        None => break,
                    }
                }
                State::StringLiteral(end) => {
                    ctx.has_code = true;
                    match skip_past(rest, end) {
                        Some(after) => {
                            rest = after;
                            self.state = State::Normal;
                        }
                        None => break,
                    }
                }
                State::Normal => {
                    let trimmed = rest.trim_start();
                    if trimmed.is_empty() {
                        break;
                    }

                    // A doc string only counts as documentation when it opens a line.
                    if !ctx.has_code {
                        if let Some(&(open, close)) = self
                            .syntax
                            .doc_strings
                            .iter()
                            .find(|(open, _)| trimmed.starts_with(open))
                        {
                            self.state = State::DocString(close);
                            rest = &trimmed[open.len()..];
                            continue;
                        }
                    }

                    let Some((pos, token)) = next_token(trimmed, self.syntax) else {
                        ctx.has_code = true;
                        break;
                    };
                    if !trimmed[..pos].trim().is_empty() {
                        ctx.has_code = true;
                    }
                    match token {
                        Token::LineComment => {
                            ctx.has_comment = true;
                            break;
                        }
                        Token::BlockCommentOpen(open, close) => {
                            ctx.has_comment = true;
                            self.state = State::BlockComment(close);
                            rest = &trimmed[pos + open.len()..];
                        }
                        Token::StringBlockOpen(open, close) => {
                            ctx.has_code = true;
                            self.state = State::StringLiteral(close);
                            rest = &trimmed[pos + open.len()..];
                        }
                        Token::DoubleQuote => {
                            ctx.has_code = true;
                            rest = skip_string(&trimmed[pos + 1..]);
                        }
                    }
                }
            }
        }

        ctx
    }
}

/// Return the text following the first occurrence of `end`, if any.
fn skip_past<'a>(text: &'a str, end: &str) -> Option<&'a str> {
    text.find(end).map(|idx| &text[idx + end.len()..])
}

/// Skip a double quoted string body. An unterminated string ends the line.
fn skip_string(text: &str) -> &str {
    let mut chars = text.char_indices();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '"' => return &text[idx + 1..],
            _ => {}
        }
    }
    ""
}

/// Find the earliest token in `text`. At equal positions block comments win
/// over line comments (Lua's `--[[` vs `--`), and string blocks over quotes.
fn next_token(text: &str, syntax: &Syntax) -> Option<(usize, Token)> {
    for (idx, _) in text.char_indices() {
        let tail = &text[idx..];
        if let Some(&(open, close)) = syntax
            .block_comments
            .iter()
            .find(|(open, _)| tail.starts_with(open))
        {
            return Some((idx, Token::BlockCommentOpen(open, close)));
        }
        if syntax
            .line_comments
            .iter()
            .any(|marker| tail.starts_with(marker))
        {
            return Some((idx, Token::LineComment));
        }
        if let Some(&(open, close)) = syntax
            .doc_strings
            .iter()
            .find(|(open, _)| tail.starts_with(open))
        {
            return Some((idx, Token::StringBlockOpen(open, close)));
        }
        if tail.starts_with('"') {
            return Some((idx, Token::DoubleQuote));
        }
    }
    None
}

/// Count the lines of a string with the given syntax.
pub fn count_str(text: &str, syntax: &'static Syntax, count_doc_strings: bool) -> Counts {
    LineVisitor::new(syntax, count_doc_strings).visit_str(text)
}

/// Count the lines of a file with the given syntax.
///
/// The file is decoded as UTF-8, replacing invalid sequences.
pub fn count_path(
    path: impl AsRef<Path>,
    syntax: &'static Syntax,
    count_doc_strings: bool,
) -> Result<Counts> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| LoccError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(count_str(&text, syntax, count_doc_strings))
}
