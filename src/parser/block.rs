//! Block scanner.
//!
//! An outline block opens on a line like `// outline: name` (any of `//`,
//! `//!`, `#`, `--`, `*` or `/*` may lead it, or nothing at all inside a
//! block comment) and runs over every following line that is indented deeper
//! than the opening line. Continuation lines must carry the same comment
//! leader; after a `/*` or `/**` opener they may start with a lone `*`.
//! A `*/` closes the block. Blank lines do not end a block.

use regex::Regex;
use std::sync::LazyLock;

static RE_OUTLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([[:blank:]]*)(//!|//+|/\*+|\*+|#+|--)?([[:blank:]]*)outline:(.*)$").unwrap()
});

/// Raw lines of one outline block.
#[derive(Debug, PartialEq)]
pub struct Block {
    /// Text after `outline:`, trimmed
    pub name: String,
    /// 1-based line number of the `outline:` line
    pub line: usize,
    pub lines: Vec<BlockLine>,
}

/// A non-blank line inside a block, with its comment leader removed.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLine {
    /// 1-based source line number
    pub number: usize,
    /// Leading whitespace width in characters
    pub indent: usize,
    /// Blank lines between this line and the previous one in the block
    pub blank_before: usize,
    /// Line content including its leading whitespace
    pub raw: String,
}

impl BlockLine {
    pub fn text(&self) -> &str {
        self.raw.trim_start()
    }
}

/// Find every outline block in `source`.
pub fn find_blocks(source: &str) -> Vec<Block> {
    let lines: Vec<&str> = source.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(caps) = RE_OUTLINE.captures(lines[i]) else {
            i += 1;
            continue;
        };

        let leader = caps.get(2).map(|m| m.as_str());
        let base = match leader {
            Some(_) => width(&caps[3]),
            None => width(&caps[1]) + width(&caps[3]),
        };
        let continuation = match leader {
            // A `/* outline:` opener starts a block comment, so the lines that
            // follow carry at most a decorative `*`.
            Some(l) if l.starts_with("/*") => Continuation::Star,
            Some(l) => Continuation::Leader(l),
            None => Continuation::Bare,
        };

        let mut block = Block {
            name: close_comment(&caps[4]).0.trim().to_string(),
            line: i + 1,
            lines: Vec::new(),
        };
        let mut closed = close_comment(&caps[4]).1;
        let mut blanks = 0;
        i += 1;

        while i < lines.len() && !closed {
            let Some(body) = continuation.strip(lines[i]) else {
                break;
            };
            let (body, ends) = close_comment(body);
            let body = body.trim_end();
            if body.trim().is_empty() {
                blanks += 1;
            } else {
                let indent = width(body);
                if indent <= base {
                    break;
                }
                block.lines.push(BlockLine {
                    number: i + 1,
                    indent,
                    blank_before: blanks,
                    raw: body.to_string(),
                });
                blanks = 0;
            }
            closed = ends;
            i += 1;
        }

        blocks.push(block);
    }

    blocks
}

/// How continuation lines of a block are introduced.
enum Continuation<'a> {
    /// Every line repeats the opener's leader, e.g. `#` or `//!`.
    Leader(&'a str),
    /// Inside a `/*` comment; a leading `*` is optional.
    Star,
    /// No leader at all.
    Bare,
}

impl Continuation<'_> {
    /// The part of `line` after its leader, or `None` when the leader is
    /// missing.
    fn strip<'l>(&self, line: &'l str) -> Option<&'l str> {
        match self {
            Continuation::Leader(l) => line.trim_start().strip_prefix(*l),
            Continuation::Star => match line.trim_start().strip_prefix('*') {
                Some(rest) if !rest.starts_with('/') => Some(rest),
                _ => Some(line),
            },
            Continuation::Bare => Some(line),
        }
    }
}

/// Split off a trailing `*/`, reporting whether one was found.
fn close_comment(text: &str) -> (&str, bool) {
    match text.find("*/") {
        Some(pos) => (&text[..pos], true),
        None => (text, false),
    }
}

/// Number of leading whitespace characters.
fn width(text: &str) -> usize {
    text.chars().take_while(|c| c.is_whitespace()).count()
}
