//! Lightweight source scanning.
//!
//! Only comments are recognized: enough to find `/* global ... */`
//! directives and to reject sources with an unterminated block comment.
//! String literals are skipped so that comment markers inside them are not
//! misread.

/// A block comment with the 1-based position of its opening `/*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockComment {
    pub text: String,
    pub line: usize,
    pub column: usize,
}

/// A scan failure with its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// A `/* global a, b */` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalDirective {
    pub names: Vec<String>,
    pub line: usize,
    pub column: usize,
}

#[derive(Clone, Copy)]
enum State {
    Code,
    LineComment,
    BlockComment,
    Str(char),
}

/// Collects the block comments of `source`.
pub fn block_comments(source: &str) -> Result<Vec<BlockComment>, ScanError> {
    let mut comments = Vec::new();
    let mut state = State::Code;
    let mut line = 1;
    let mut column = 1;
    let mut start = (0, 0);
    let mut text = String::new();
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        let (cur_line, cur_col) = (line, column);
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }

        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    column += 1;
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    column += 1;
                    start = (cur_line, cur_col);
                    text.clear();
                    state = State::BlockComment;
                }
                '"' | '\'' | '`' => state = State::Str(c),
                _ => {}
            },
            State::LineComment => {
                if c == '\n' {
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    column += 1;
                    comments.push(BlockComment {
                        text: std::mem::take(&mut text),
                        line: start.0,
                        column: start.1,
                    });
                    state = State::Code;
                } else {
                    text.push(c);
                }
            }
            State::Str(quote) => match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        if escaped == '\n' {
                            line += 1;
                            column = 1;
                        } else {
                            column += 1;
                        }
                    }
                }
                '\n' if quote != '`' => state = State::Code,
                _ if c == quote => state = State::Code,
                _ => {}
            },
        }
    }

    if let State::BlockComment = state {
        return Err(ScanError {
            message: "Unterminated comment".to_string(),
            line: start.0,
            column: start.1,
        });
    }

    Ok(comments)
}

/// Extracts `global`/`globals` directives from block comments.
///
/// Names may carry a `:true`/`:false` suffix, which is dropped.
pub fn global_directives(comments: &[BlockComment]) -> Vec<GlobalDirective> {
    comments
        .iter()
        .filter_map(|comment| {
            let body = comment.text.trim();
            let rest = body
                .strip_prefix("globals")
                .or_else(|| body.strip_prefix("global"))?;
            if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
                return None;
            }

            let names = rest
                .split(|c: char| c == ',' || c.is_whitespace())
                .map(|part| part.split(':').next().unwrap_or("").trim())
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();

            Some(GlobalDirective {
                names,
                line: comment.line,
                column: comment.column,
            })
        })
        .collect()
}
