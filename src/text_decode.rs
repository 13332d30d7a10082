//! Line-oriented, indentation-sensitive parser for the ISLA text format.
//!
//! The grammar is driven by comparing each line's leading-tab count against
//! the nesting level `L` of the scope currently being read. Concretely: a
//! scope is a run of lines at exactly `L` tabs; a shallower line ends it
//! (and possibly several enclosing scopes at once); a deeper line is a
//! syntax error. There is no separate tokenizing pass — each line is
//! classified and consumed directly by the scope it belongs to.

use crate::error::{Error, Result};
use crate::value::{TextValue, ValueMap};

const HEADER: &str = "ISLA1";

/// Recursion ceiling on nesting level. Not a grammar rule — spec.md puts no
/// numeric limit on text nesting — but a defensive cap so a crafted input
/// with thousands of tabs on one line can't blow the call stack. `level`
/// already counts nesting depth exactly (it increments by one per opened
/// scope), so it doubles as the recursion guard with no extra bookkeeping.
const MAX_NESTING_DEPTH: usize = 256;

struct Cursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(lines: Vec<&'a str>) -> Self {
        Self { lines, pos: 0 }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<&'a str> {
        let line = self.peek();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    /// 1-based line number of the line that `peek()`/the next `advance()`
    /// would return.
    fn line_no(&self) -> usize {
        self.pos + 1
    }
}

/// Decode a `&str` input, splitting it on LF into the line sequence
/// `decode_text` expects.
pub fn decode_text_str(input: &str) -> Result<TextValue> {
    decode_text(input.split('\n'))
}

/// Decode a pre-split sequence of lines into a [`TextValue`].
pub fn decode_text<'a>(lines: impl Iterator<Item = &'a str>) -> Result<TextValue> {
    let mut cursor = Cursor::new(lines.collect());
    let header = cursor.advance().ok_or_else(|| Error::BadHeader {
        expected: HEADER.to_string(),
        got: String::new(),
    })?;
    if header != HEADER {
        return Err(Error::BadHeader {
            expected: HEADER.to_string(),
            got: header.to_string(),
        });
    }
    parse_scope(&mut cursor, 0)
}

fn leading_tabs(line: &str) -> usize {
    line.chars().take_while(|&c| c == '\t').count()
}

fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c == '\t' || c == ' ')
}

/// `;` is a comment marker only when every character before it (at a column
/// `<= level`) is a tab — i.e. it sits in the indentation prefix, not inside
/// a value.
fn is_comment(line: &str, level: usize) -> bool {
    for (col, ch) in line.chars().enumerate() {
        match ch {
            '\t' if col < level => continue,
            ';' if col <= level => return true,
            _ => return false,
        }
    }
    false
}

/// Skip blank and comment lines at `level`, then report whether the next
/// real line is shallower, equal to, or deeper than `level`.
enum NextLine<'a> {
    /// No more input.
    Eof,
    /// A shallower content line starting this many tabs in; the scope at
    /// `level` ends without consuming it.
    Dedent,
    /// A content line at exactly `level` tabs (the leading tabs already
    /// stripped).
    Content { line: usize, rest: &'a str },
}

fn skip_to_content<'a>(cursor: &mut Cursor<'a>, level: usize) -> Result<NextLine<'a>> {
    loop {
        let raw = match cursor.peek() {
            None => return Ok(NextLine::Eof),
            Some(raw) => raw,
        };
        if is_blank(raw) {
            cursor.advance();
            continue;
        }
        if is_comment(raw, level) {
            cursor.advance();
            continue;
        }
        let tabs = leading_tabs(raw);
        if tabs > level {
            return Err(Error::NestingTooDeep {
                expected_level: level,
                line: cursor.line_no(),
            });
        }
        if tabs < level {
            return Ok(NextLine::Dedent);
        }
        let line = cursor.line_no();
        cursor.advance();
        return Ok(NextLine::Content {
            line,
            rest: &raw[level..],
        });
    }
}

/// Parse the scope beginning at nesting level `level`. The scope's shape
/// (list vs map) is decided by its first content line; a scope with no
/// content line before dedent/EOF decodes to [`TextValue::None`] (see
/// DESIGN.md for why `None` was chosen over an error here).
fn parse_scope(cursor: &mut Cursor<'_>, level: usize) -> Result<TextValue> {
    if level > MAX_NESTING_DEPTH {
        return Err(Error::NestingDepthExceeded {
            max: MAX_NESTING_DEPTH,
        });
    }
    let save = cursor.pos;
    match skip_to_content(cursor, level)? {
        NextLine::Eof | NextLine::Dedent => Ok(TextValue::None),
        NextLine::Content { .. } => {
            cursor.pos = save;
            // Re-run skip_to_content to land exactly on the first content
            // line without re-deciding blank/comment lines twice; peek its
            // shape without consuming it.
            loop {
                let raw = cursor.peek().expect("content line must exist");
                if is_blank(raw) || is_comment(raw, level) {
                    cursor.advance();
                    continue;
                }
                let rest = &raw[level..];
                break if rest.starts_with('-') {
                    parse_list(cursor, level)
                } else {
                    parse_map(cursor, level)
                };
            }
        }
    }
}

fn parse_list(cursor: &mut Cursor<'_>, level: usize) -> Result<TextValue> {
    let mut items = Vec::new();
    loop {
        match skip_to_content(cursor, level)? {
            NextLine::Eof | NextLine::Dedent => break,
            NextLine::Content { line, rest } => {
                if !rest.starts_with('-') {
                    return Err(Error::ExpectedListItem { line });
                }
                let after_dash = &rest[1..];
                let item = if after_dash == ":" {
                    parse_scope(cursor, level + 1)?
                } else if after_dash == "\"" {
                    TextValue::Leaf(parse_multiline(cursor, line)?)
                } else if after_dash == "\\:" {
                    TextValue::Leaf(":".to_string())
                } else if after_dash == "\\\"" {
                    TextValue::Leaf("\"".to_string())
                } else {
                    TextValue::Leaf(after_dash.to_string())
                };
                items.push(item);
            }
        }
    }
    Ok(TextValue::List(items))
}

fn parse_map(cursor: &mut Cursor<'_>, level: usize) -> Result<TextValue> {
    let mut map = ValueMap::new();
    loop {
        match skip_to_content(cursor, level)? {
            NextLine::Eof | NextLine::Dedent => break,
            NextLine::Content { line, rest } => {
                let (key, op, tail) = split_map_line(rest);
                match op {
                    '=' => {
                        let leaf = if tail == "\"" {
                            parse_multiline(cursor, line)?
                        } else if tail == "\\\"" {
                            "\"".to_string()
                        } else {
                            tail.to_string()
                        };
                        map.insert(key, TextValue::Leaf(leaf));
                    }
                    ':' => {
                        if !tail.is_empty() {
                            return Err(Error::UnexpectedAfterColon {
                                line,
                                trailing: tail.to_string(),
                            });
                        }
                        let sub = parse_scope(cursor, level + 1)?;
                        map.insert(key, sub);
                    }
                    _ => unreachable!("split_map_line only produces '=' or ':'"),
                }
            }
        }
    }
    Ok(TextValue::Map(map))
}

/// Split `KEY OP TAIL` on the first *unescaped* `=`/`:`, applying the key
/// escape rules (`\=`, `\:`, `\-`, `\;` → literal; any other `\X` stays
/// literal; a trailing backslash with nothing after it stays literal). The
/// `\;` case mirrors `\-`: a leading `;` in the key would otherwise be read
/// as a full-line comment by `is_comment` before this function ever runs, so
/// `encode_key` always escapes it there, and this unescapes it back.
/// When no unescaped operator is found, the entire line becomes the key with
/// an implicit empty `=` value — the grammar does not otherwise define a
/// keyless map line, so this keeps decode total instead of panicking on
/// malformed input.
fn split_map_line(content: &str) -> (String, char, &str) {
    let mut key = String::new();
    let mut chars = content.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.peek().copied() {
                Some((_, '=')) => {
                    key.push('=');
                    chars.next();
                }
                Some((_, ':')) => {
                    key.push(':');
                    chars.next();
                }
                Some((_, '-')) => {
                    key.push('-');
                    chars.next();
                }
                Some((_, ';')) => {
                    key.push(';');
                    chars.next();
                }
                _ => key.push('\\'),
            },
            '=' | ':' => {
                let tail_start = i + c.len_utf8();
                return (key, c, &content[tail_start..]);
            }
            other => key.push(other),
        }
    }
    (key, '=', "")
}

/// Consume lines until a lone `"` closes the multi-line value, joining the
/// body with `"\n"`. The body has no indentation rules, and a line equal
/// to `\"` decodes to a literal `"` line.
fn parse_multiline(cursor: &mut Cursor<'_>, opening_line: usize) -> Result<String> {
    let mut parts: Vec<String> = Vec::new();
    loop {
        match cursor.advance() {
            None => return Err(Error::UnterminatedMultiLineValue { opening_line }),
            Some(raw) => {
                if raw == "\"" {
                    return Ok(parts.join("\n"));
                } else if raw == "\\\"" {
                    parts.push("\"".to_string());
                } else {
                    parts.push(raw.to_string());
                }
            }
        }
    }
}
