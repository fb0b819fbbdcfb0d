//! Metadata block (frontmatter) editing.
//!
//! A metadata block is a run of `key: value` lines fenced by a `---` line at
//! the very start of a document and a second `---` line closing it. Parsing is
//! line based and walks three states: before the block, inside it, and after
//! it. A block that is opened but never closed is not a block, and the marker
//! text stays part of the ordinary content.

/// Fence line that opens and closes a metadata block.
pub const MARKER: &str = "---";

/// Key under which the published gist URL is tracked.
pub const PUBLISH_URL_KEY: &str = "gist-publish-url";

/// A metadata block borrowed from the document it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataBlock<'a> {
    raw: &'a str,
    body: &'a str,
}

impl<'a> MetadataBlock<'a> {
    /// The whole block including both fences and the closing line terminator.
    /// `raw() + rest` reproduces the source text byte for byte.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The lines between the fences, without the final line terminator.
    pub fn body(&self) -> &'a str {
        trim_line_end(self.body)
    }

    /// Value of the first `key: value` line for `key`, if any and not empty.
    pub fn value(&self, key: &str) -> Option<&'a str> {
        self.body
            .lines()
            .find_map(|line| key_value(line, key))
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Copy)]
struct BlockSpan {
    body_start: usize,
    body_end: usize,
    end: usize,
}

enum State {
    BeforeBlock,
    InBlock { body_start: usize },
    AfterBlock(BlockSpan),
}

fn locate(text: &str) -> Option<BlockSpan> {
    let mut state = State::BeforeBlock;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let next = offset + line.len();
        let is_marker = trim_line_end(line) == MARKER;

        state = match state {
            State::BeforeBlock if is_marker => State::InBlock { body_start: next },
            State::BeforeBlock => return None,
            State::InBlock { body_start } if is_marker => State::AfterBlock(BlockSpan {
                body_start,
                body_end: offset,
                end: next,
            }),
            other => other,
        };

        if let State::AfterBlock(_) = state {
            break;
        }
        offset = next;
    }

    match state {
        State::AfterBlock(span) => Some(span),
        _ => None,
    }
}

/// Split `text` into its leading metadata block (if well formed) and the rest.
pub fn extract_block(text: &str) -> (Option<MetadataBlock<'_>>, &str) {
    match locate(text) {
        Some(span) => (
            Some(MetadataBlock {
                raw: &text[..span.end],
                body: &text[span.body_start..span.body_end],
            }),
            &text[span.end..],
        ),
        None => (None, text),
    }
}

/// `text` with its leading metadata block removed.
pub fn strip_block(text: &str) -> &str {
    extract_block(text).1
}

/// Set `key` to `value` in the document's metadata block.
///
/// An existing `key` line is rewritten in place, a missing key is appended as
/// the last line of the block, and a document without a block gets a new one
/// holding only this key. Every other byte is preserved.
pub fn upsert_value(text: &str, key: &str, value: &str) -> String {
    let entry = format!("{}: {}", key, value);

    let Some(span) = locate(text) else {
        return format!("{MARKER}\n{entry}\n{MARKER}\n{text}");
    };

    let newline = if text[..span.body_start].ends_with("\r\n") { "\r\n" } else { "\n" };
    let mut out = String::with_capacity(text.len() + entry.len() + newline.len());
    out.push_str(&text[..span.body_start]);

    let mut replaced = false;
    for line in text[span.body_start..span.body_end].split_inclusive('\n') {
        if !replaced && key_value(trim_line_end(line), key).is_some() {
            out.push_str(&entry);
            out.push_str(&line[trim_line_end(line).len()..]);
            replaced = true;
        } else {
            out.push_str(line);
        }
    }
    if !replaced {
        out.push_str(&entry);
        out.push_str(newline);
    }

    out.push_str(&text[span.body_end..]);
    out
}

fn key_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.strip_prefix(key)?
        .strip_prefix(':')
        .map(|v| v.trim())
}

fn trim_line_end(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
