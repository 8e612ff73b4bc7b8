//! Inline span tokenizer.
//!
//! Splits a single line (or heading, list item, link label) into styled
//! runs. Literal text stays raw here; escaping happens when the nodes are
//! rendered.
//!
//! Code spans bind first: a `DelimiterIndex` pairs backtick runs before
//! anything else, then records emphasis and link closers that lie outside
//! those spans. Every closer lookup is a binary search over the index, so
//! unmatched openers never rescan the rest of the line.

use std::collections::HashMap;

/// Inline node produced by [`parse_inline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Literal text, unescaped.
    Text(String),
    /// Backtick code span. Content is never interpreted further.
    Code(String),
    /// `**strong**` run.
    Strong(Vec<Inline>),
    /// `*emphasis*` run.
    Emphasis(Vec<Inline>),
    /// `[label](url)` link. Labels never contain nested links.
    Link { label: Vec<Inline>, url: String },
    /// Hard break between two source lines of one paragraph.
    LineBreak,
}

/// Parses inline markup from a single line of text.
///
/// Unmatched delimiters are kept as literal text, so every input yields
/// some sequence of nodes. `***text***` nests emphasis inside strong.
///
/// # Examples
///
/// ```
/// use qcmark::markdown::{Inline, parse_inline};
///
/// let nodes = parse_inline("**bold**");
/// assert_eq!(nodes, vec![Inline::Strong(vec![Inline::Text("bold".into())])]);
/// ```
pub fn parse_inline(text: &str) -> Vec<Inline> {
    parse_spans(text, true)
}

fn parse_spans(text: &str, allow_links: bool) -> Vec<Inline> {
    let index = DelimiterIndex::build(text);
    let mut nodes = Vec::new();
    let mut literal = String::new();
    let mut pos = 0;

    while let Some(c) = text[pos..].chars().next() {
        let matched = match c {
            '`' => index.code_span(pos),
            '*' => index.emphasis_run(pos),
            '[' if allow_links => index.link(pos),
            _ => None,
        };

        if let Some((node, end)) = matched {
            flush_literal(&mut literal, &mut nodes);
            nodes.push(node);
            pos = end;
            continue;
        }

        // A failed backtick run is literal as a whole, otherwise "``x`"
        // would reopen on the second backtick.
        let skip = if c == '`' {
            backtick_run(&text.as_bytes()[pos..])
        } else {
            c.len_utf8()
        };
        literal.push_str(&text[pos..pos + skip]);
        pos += skip;
    }

    flush_literal(&mut literal, &mut nodes);
    nodes
}

fn flush_literal(literal: &mut String, nodes: &mut Vec<Inline>) {
    if !literal.is_empty() {
        nodes.push(Inline::Text(std::mem::take(literal)));
    }
}

fn backtick_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|&&b| b == b'`').count()
}

/// Byte positions of every delimiter that can close an inline run.
///
/// All positions outside code spans; star and bracket lists are sorted.
struct DelimiterIndex<'a> {
    text: &'a str,
    /// Opening backtick position to (content start, content end, span end).
    code_spans: HashMap<usize, (usize, usize, usize)>,
    /// Start of every `**`, overlapping inside longer star runs.
    double_stars: Vec<usize>,
    /// Start of every `***`, overlapping inside longer star runs.
    triple_stars: Vec<usize>,
    /// Last star of each odd-length run. Even runs pair up as `**` and
    /// never close single emphasis.
    single_star_closers: Vec<usize>,
    closing_brackets: Vec<usize>,
    /// Opening parenthesis position to its balanced closing position.
    paren_closers: HashMap<usize, usize>,
}

impl<'a> DelimiterIndex<'a> {
    fn build(text: &'a str) -> Self {
        let bytes = text.as_bytes();
        let mut index = Self {
            text,
            code_spans: match_code_spans(bytes),
            double_stars: Vec::new(),
            triple_stars: Vec::new(),
            single_star_closers: Vec::new(),
            closing_brackets: Vec::new(),
            paren_closers: HashMap::new(),
        };

        let mut open_parens = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            if let Some(&(_, _, end)) = index.code_spans.get(&i) {
                i = end;
                continue;
            }

            match bytes[i] {
                b'*' => {
                    let run = bytes[i..].iter().take_while(|&&b| b == b'*').count();
                    index.double_stars.extend(i..(i + run).saturating_sub(1));
                    index.triple_stars.extend(i..(i + run).saturating_sub(2));
                    if run % 2 == 1 {
                        index.single_star_closers.push(i + run - 1);
                    }
                    i += run;
                    continue;
                }
                b']' => index.closing_brackets.push(i),
                b'(' => open_parens.push(i),
                b')' => {
                    if let Some(open) = open_parens.pop() {
                        index.paren_closers.insert(open, i);
                    }
                }
                _ => {}
            }
            i += 1;
        }

        index
    }

    fn code_span(&self, pos: usize) -> Option<(Inline, usize)> {
        let &(start, end, span_end) = self.code_spans.get(&pos)?;
        Some((Inline::Code(self.text[start..end].to_string()), span_end))
    }

    fn emphasis_run(&self, pos: usize) -> Option<(Inline, usize)> {
        let rest = &self.text[pos..];

        if rest.starts_with("***")
            && let Some(close) = next_at(&self.triple_stars, pos + 3)
        {
            let inner = &self.text[pos + 3..close];
            if is_flanked(inner) {
                let node = Inline::Strong(vec![Inline::Emphasis(parse_spans(inner, true))]);
                return Some((node, close + 3));
            }
        }

        if rest.starts_with("**") {
            let close = next_at(&self.double_stars, pos + 2)?;
            let inner = &self.text[pos + 2..close];
            if !is_flanked(inner) {
                return None;
            }
            return Some((Inline::Strong(parse_spans(inner, true)), close + 2));
        }

        let close = next_at(&self.single_star_closers, pos + 1)?;
        let inner = &self.text[pos + 1..close];
        if !is_flanked(inner) {
            return None;
        }
        Some((Inline::Emphasis(parse_spans(inner, true)), close + 1))
    }

    /// Matches `[label](url)`. The URL runs to the parenthesis that
    /// balances the opening one, so `Foo_(bar)` style targets stay whole.
    fn link(&self, pos: usize) -> Option<(Inline, usize)> {
        let label_end = next_at(&self.closing_brackets, pos + 1)?;
        let open = label_end + 1;
        if self.text.as_bytes().get(open) != Some(&b'(') {
            return None;
        }
        let close = *self.paren_closers.get(&open)?;

        let label = &self.text[pos + 1..label_end];
        let url = self.text[open + 1..close].trim();
        if label.is_empty() || url.is_empty() {
            return None;
        }

        let node = Inline::Link {
            label: parse_spans(label, false),
            url: url.to_string(),
        };
        Some((node, close + 1))
    }
}

/// Pairs each backtick run with the next run of the same length, left to
/// right. Runs without a partner stay literal.
fn match_code_spans(bytes: &[u8]) -> HashMap<usize, (usize, usize, usize)> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let len = backtick_run(&bytes[i..]);
            runs.push((i, len));
            i += len;
        } else {
            i += 1;
        }
    }

    let mut next_same = vec![None; runs.len()];
    let mut later: HashMap<usize, usize> = HashMap::new();
    for (k, &(_, len)) in runs.iter().enumerate().rev() {
        next_same[k] = later.insert(len, k);
    }

    let mut spans = HashMap::new();
    let mut k = 0;
    while k < runs.len() {
        let (start, len) = runs[k];
        match next_same[k] {
            Some(m) => {
                let (close, _) = runs[m];
                spans.insert(start, (start + len, close, close + len));
                k = m + 1;
            }
            None => k += 1,
        }
    }
    spans
}

/// First position in a sorted list at or after `from`.
fn next_at(positions: &[usize], from: usize) -> Option<usize> {
    let i = positions.partition_point(|&p| p < from);
    positions.get(i).copied()
}

/// Delimited content must be non-empty and must not start or end with
/// whitespace, so `2 * 3 * 4` stays literal.
fn is_flanked(inner: &str) -> bool {
    !inner.is_empty()
        && !inner.starts_with(char::is_whitespace)
        && !inner.ends_with(char::is_whitespace)
}
