//! Block level tokenizer.

use regex::Regex;
use std::sync::LazyLock;

use super::inline::{Inline, parse_inline};

const FENCE: &str = "```";

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,9})\.\s+(.*)$").expect("valid ordered item regex"));

static BULLET_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[*-]\s+(.*)$").expect("valid bullet item regex"));

/// Kind of list container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    /// Numbered list starting at the first item's number.
    Ordered { start: u64 },
}

impl ListKind {
    fn continues(&self, other: &ListKind) -> bool {
        matches!(
            (self, other),
            (ListKind::Bullet, ListKind::Bullet) | (ListKind::Ordered { .. }, ListKind::Ordered { .. })
        )
    }
}

/// Block node produced by [`parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    CodeBlock { language: Option<String>, code: String },
    List { kind: ListKind, items: Vec<Vec<Inline>> },
    Rule,
    /// Consecutive text lines joined by [`Inline::LineBreak`].
    Paragraph(Vec<Inline>),
}

/// Splits markdown source into blocks.
///
/// Precedence per line: fence, blank line, horizontal rule, heading,
/// list item, paragraph text. Consecutive list items of the same kind
/// share one list; a blank line or any other block ends it.
pub fn parse(source: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut in_list = false;
    let mut lines = source.lines();

    while let Some(line) = lines.next() {
        if let Some(info) = line.trim_start().strip_prefix(FENCE) {
            flush_paragraph(&mut paragraph, &mut blocks);
            in_list = false;

            // Single line form: ```code```
            if let Some(close) = info.find(FENCE) {
                blocks.push(Block::CodeBlock {
                    language: None,
                    code: info[..close].to_string(),
                });
                let trailing = info[close + FENCE.len()..].trim();
                if !trailing.is_empty() {
                    paragraph.push(trailing);
                }
                continue;
            }

            let mut code = Vec::new();
            for inner in lines.by_ref() {
                if inner.trim_start().starts_with(FENCE) {
                    break;
                }
                code.push(inner);
            }

            // Only the first word of the info string names the language.
            blocks.push(Block::CodeBlock {
                language: info.split_whitespace().next().map(str::to_string),
                code: code.join("\n"),
            });
            continue;
        }

        if line.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            in_list = false;
            continue;
        }

        if is_rule(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Rule);
            in_list = false;
            continue;
        }

        if let Some((level, text)) = heading(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Heading {
                level,
                content: parse_inline(text),
            });
            in_list = false;
            continue;
        }

        if let Some((kind, text)) = list_item(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            let item = parse_inline(text);
            match blocks.last_mut() {
                Some(Block::List { kind: current, items }) if in_list && current.continues(&kind) => {
                    items.push(item);
                }
                _ => blocks.push(Block::List {
                    kind,
                    items: vec![item],
                }),
            }
            in_list = true;
            continue;
        }

        in_list = false;
        paragraph.push(line);
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    blocks
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if lines.is_empty() {
        return;
    }

    let mut content = Vec::new();
    for (i, line) in lines.drain(..).enumerate() {
        if i > 0 {
            content.push(Inline::LineBreak);
        }
        content.extend(parse_inline(line));
    }
    blocks.push(Block::Paragraph(content));
}

/// A line of three or more `-`, or three or more `*`, and nothing else.
fn is_rule(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3
        && (trimmed.bytes().all(|b| b == b'-') || trimmed.bytes().all(|b| b == b'*'))
}

/// Returns heading level and text for `# `, `## ` and `### ` lines.
fn heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    let text = line[hashes..].strip_prefix(' ')?;
    Some((hashes as u8, text.trim()))
}

fn list_item(line: &str) -> Option<(ListKind, &str)> {
    if let Some(caps) = ORDERED_ITEM.captures(line) {
        let start = caps.get(1)?.as_str().parse().ok()?;
        let text = caps.get(2)?.as_str();
        return Some((ListKind::Ordered { start }, text.trim()));
    }

    let caps = BULLET_ITEM.captures(line)?;
    Some((ListKind::Bullet, caps.get(1)?.as_str().trim()))
}
