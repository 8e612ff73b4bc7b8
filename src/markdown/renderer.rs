//! HTML rendering for parsed markdown blocks.

use anyhow::{Context, Result};
use log::{debug, warn};
use maud::{Markup, PreEscaped, html};
use std::path::Path;

use super::block::{Block, ListKind, parse};
use super::highlight::Highlighter;
use super::inline::Inline;
use super::links::sanitize_url;

/// Renders the editor markdown dialect to HTML.
///
/// All literal text is escaped by maud while the markup is built, so raw
/// HTML in the source shows up as text and rendering already rendered
/// output never nests tags. Fenced blocks with a known language tag are
/// highlighted with `hl-*` CSS classes unless highlighting is disabled.
pub struct MarkdownRenderer {
    highlighter: Option<Highlighter>,
}

impl MarkdownRenderer {
    /// Creates renderer with code block highlighting enabled.
    pub fn new() -> Self {
        Self {
            highlighter: Some(Highlighter::new()),
        }
    }

    /// Creates renderer that emits every code block as plain text.
    ///
    /// Skips loading syntax definitions, which makes construction cheap
    /// for callers that render short snippets.
    pub fn without_highlighting() -> Self {
        Self { highlighter: None }
    }

    /// Renders markdown content to an HTML fragment.
    ///
    /// A document that is a single paragraph is returned without a `<p>`
    /// wrapper, so plain text maps to itself with newlines turned into
    /// `<br>`. Never fails: malformed markup degrades to literal text.
    ///
    /// # Examples
    ///
    /// ```
    /// use qcmark::MarkdownRenderer;
    ///
    /// let renderer = MarkdownRenderer::without_highlighting();
    /// assert_eq!(renderer.render("# Title"), "<h1>Title</h1>");
    /// assert_eq!(renderer.render("line\nbreak"), "line<br>break");
    /// ```
    pub fn render(&self, content: &str) -> String {
        let blocks = parse(content);
        debug!(
            "Parsed {} blocks from {} bytes of markdown",
            blocks.len(),
            content.len()
        );

        if let [Block::Paragraph(inlines)] = blocks.as_slice() {
            return render_inlines(inlines).into_string();
        }

        html! {
            @for block in &blocks {
                (self.render_block(block))
            }
        }
        .into_string()
    }

    /// Renders optional content, mapping `None` to an empty string.
    pub fn render_optional(&self, content: Option<&str>) -> String {
        content.map(|c| self.render(c)).unwrap_or_default()
    }

    /// Renders markdown file at given path.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or is not valid UTF8
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file: {}", path.display()))?;
        Ok(self.render(&content))
    }

    fn render_block(&self, block: &Block) -> Markup {
        match block {
            Block::Heading { level, content } => {
                let inner = render_inlines(content);
                match level {
                    1 => html! { h1 { (inner) } },
                    2 => html! { h2 { (inner) } },
                    _ => html! { h3 { (inner) } },
                }
            }
            Block::CodeBlock { language, code } => self.render_code_block(language.as_deref(), code),
            Block::List { kind, items } => render_list(*kind, items),
            Block::Rule => html! { hr; },
            Block::Paragraph(inlines) => html! { p { (render_inlines(inlines)) } },
        }
    }

    fn render_code_block(&self, language: Option<&str>, code: &str) -> Markup {
        let highlighted = match (language, &self.highlighter) {
            (Some(lang), Some(highlighter)) => match highlighter.highlight(code, lang) {
                Ok(html) => html,
                Err(e) => {
                    warn!("Falling back to plain code block: {:#}", e);
                    None
                }
            },
            _ => None,
        };

        debug!(
            "Code block language={:?} highlighted={}",
            language,
            highlighted.is_some()
        );

        html! {
            pre {
                code class=[language.map(|l| format!("language-{}", l))] {
                    @if let Some(spans) = highlighted {
                        (PreEscaped(spans))
                    } @else {
                        (code)
                    }
                }
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn render_list(kind: ListKind, items: &[Vec<Inline>]) -> Markup {
    let item_markup = html! {
        @for item in items {
            li { (render_inlines(item)) }
        }
    };

    match kind {
        ListKind::Bullet => html! { ul { (item_markup) } },
        ListKind::Ordered { start } => {
            html! { ol start=[(start != 1).then_some(start)] { (item_markup) } }
        }
    }
}

fn render_inlines(nodes: &[Inline]) -> Markup {
    html! {
        @for node in nodes {
            (render_inline(node))
        }
    }
}

fn render_inline(node: &Inline) -> Markup {
    match node {
        Inline::Text(text) => html! { (text) },
        Inline::Code(code) => html! { code { (code) } },
        Inline::Strong(children) => html! { strong { (render_inlines(children)) } },
        Inline::Emphasis(children) => html! { em { (render_inlines(children)) } },
        Inline::Link { label, url } => html! {
            a href=(sanitize_url(url)) target="_blank" rel="noopener noreferrer" {
                (render_inlines(label))
            }
        },
        Inline::LineBreak => html! { br; },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::time::{Duration, Instant};

    fn plain() -> MarkdownRenderer {
        MarkdownRenderer::without_highlighting()
    }

    #[test]
    fn test_render_empty_markdown() {
        // Arrange
        let renderer = plain();

        // Act & Assert
        assert_eq!(renderer.render(""), "");
        assert_eq!(renderer.render_optional(None), "");
        assert_eq!(renderer.render_optional(Some("")), "");
    }

    #[test]
    fn test_plain_text_only_gains_line_breaks() {
        // Arrange
        let renderer = plain();
        let markdown = "Which answer is correct\nfor question 12";

        // Act
        let html = renderer.render(markdown);

        // Assert
        assert_eq!(html, "Which answer is correct<br>for question 12");
    }

    #[test]
    fn test_single_heading_has_no_paragraph() {
        // Arrange
        let renderer = plain();

        // Act
        let html = renderer.render("# Title");

        // Assert
        assert_eq!(html, "<h1>Title</h1>");
    }

    #[test]
    fn test_heading_with_inline_formatting() {
        // Arrange & Act
        let html = plain().render("## Part *two*");

        // Assert
        assert_eq!(html, "<h2>Part <em>two</em></h2>");
    }

    #[test]
    fn test_bold_and_italic() {
        // Arrange & Act
        let html = plain().render("**bold** and *italic*");

        // Assert
        assert_eq!(html, "<strong>bold</strong> and <em>italic</em>");
    }

    #[test]
    fn test_bold_italic_combination() {
        // Arrange & Act
        let html = plain().render("***both***");

        // Assert
        assert_eq!(html, "<strong><em>both</em></strong>");
    }

    #[test]
    fn test_fenced_block_is_verbatim() {
        // Arrange
        let markdown = "```\ncode()\n```";

        // Act
        let html = plain().render(markdown);

        // Assert
        assert_eq!(html, "<pre><code>code()</code></pre>");
    }

    #[test]
    fn test_fenced_block_skips_inline_rules() {
        // Arrange
        let markdown = indoc! {"
            ```
            # heading
            **bold** *em* [a](b)
            ```
        "};

        // Act
        let html = plain().render(markdown);

        // Assert
        assert_eq!(
            html,
            "<pre><code># heading\n**bold** *em* [a](b)</code></pre>"
        );
    }

    #[test]
    fn test_single_line_fence() {
        // Arrange & Act
        let html = plain().render("```code()```");

        // Assert
        assert_eq!(html, "<pre><code>code()</code></pre>");
    }

    #[test]
    fn test_inline_code() {
        // Arrange & Act
        let html = plain().render("call `f(*x*)` here");

        // Assert
        assert_eq!(html, "call <code>f(*x*)</code> here");
    }

    #[test]
    fn test_link_opens_new_tab_without_referrer() {
        // Arrange & Act
        let html = plain().render("[text](https://example.com)");

        // Assert
        assert_eq!(
            html,
            "<a href=\"https://example.com\" target=\"_blank\" rel=\"noopener noreferrer\">text</a>"
        );
    }

    #[test]
    fn test_javascript_link_is_neutralized() {
        // Arrange & Act
        let html = plain().render("[click](javascript:alert(1))");

        // Assert
        assert!(html.contains("href=\"#\""), "Should neutralize: {}", html);
        assert!(!html.contains("javascript"), "Should drop script URL: {}", html);
    }

    #[test]
    fn test_link_url_is_attribute_escaped() {
        // Arrange & Act
        let html = plain().render("[x](https://e.com/?a=1&b=\"2\")");

        // Assert
        assert!(
            html.contains("href=\"https://e.com/?a=1&amp;b=&quot;2&quot;\""),
            "Should escape attribute: {}",
            html
        );
    }

    #[test]
    fn test_raw_html_is_escaped() {
        // Arrange
        let markdown = "<script>alert('xss')</script>\n\nNormal text.";

        // Act
        let html = plain().render(markdown);

        // Assert
        assert!(!html.contains("<script>"), "Raw HTML must not pass: {}", html);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<p>Normal text.</p>"));
    }

    #[test]
    fn test_rerender_does_not_double_wrap() {
        // Arrange
        let renderer = plain();
        let first = renderer.render("# Title\n\n**bold**");

        // Act
        let second = renderer.render(&first);

        // Assert
        assert!(!second.contains("<h1>"), "Second pass: {}", second);
        assert!(!second.contains("<strong>"), "Second pass: {}", second);
        assert!(second.contains("&lt;h1&gt;Title&lt;/h1&gt;"));
    }

    #[test]
    fn test_consecutive_list_items_share_a_list() {
        // Arrange
        let markdown = "- alpha\n- beta\n- gamma";

        // Act
        let html = plain().render(markdown);

        // Assert
        assert_eq!(html, "<ul><li>alpha</li><li>beta</li><li>gamma</li></ul>");
    }

    #[test]
    fn test_ordered_list_start() {
        // Arrange & Act
        let from_one = plain().render("1. a\n2. b");
        let from_five = plain().render("5. e\n6. f");

        // Assert
        assert_eq!(from_one, "<ol><li>a</li><li>b</li></ol>");
        assert_eq!(from_five, "<ol start=\"5\"><li>e</li><li>f</li></ol>");
    }

    #[test]
    fn test_horizontal_rule() {
        // Arrange & Act
        let html = plain().render("above\n\n---\n\nbelow");

        // Assert
        assert_eq!(html, "<p>above</p><hr><p>below</p>");
    }

    #[test]
    fn test_paragraphs_and_breaks() {
        // Arrange
        let markdown = "one\ntwo\n\nthree";

        // Act
        let html = plain().render(markdown);

        // Assert
        assert_eq!(html, "<p>one<br>two</p><p>three</p>");
    }

    #[test]
    fn test_mixed_document() {
        // Arrange
        let markdown = indoc! {"
            # Question 7

            Pick the **correct** option:

            1. `O(n)`
            2. *O(log n)*

            See [notes](./notes.md).
        "};

        // Act
        let html = plain().render(markdown);

        // Assert
        assert_eq!(
            html,
            concat!(
                "<h1>Question 7</h1>",
                "<p>Pick the <strong>correct</strong> option:</p>",
                "<ol><li><code>O(n)</code></li><li><em>O(log n)</em></li></ol>",
                "<p>See <a href=\"./notes.md\" target=\"_blank\" rel=\"noopener noreferrer\">notes</a>.</p>",
            )
        );
    }

    #[test]
    fn test_code_blocks_highlighted_when_enabled() {
        // Arrange
        let renderer = MarkdownRenderer::new();
        let markdown = indoc! {r#"
            ```rust
            fn main() {
                println!("hello");
            }
            ```
        "#};

        // Act
        let html = renderer.render(markdown);

        // Assert
        assert!(
            html.contains("<code class=\"language-rust\">"),
            "Should keep language class: {}",
            html
        );
        assert!(
            html.contains("<span class=\"hl-"),
            "Should contain highlight spans: {}",
            html
        );
        assert!(html.contains("println!"), "Should keep code content");
    }

    #[test]
    fn test_unknown_language_is_plain_escaped() {
        // Arrange
        let renderer = MarkdownRenderer::new();
        let markdown = "```unknownlang\na < b\n```";

        // Act
        let html = renderer.render(markdown);

        // Assert
        assert_eq!(
            html,
            "<pre><code class=\"language-unknownlang\">a &lt; b</code></pre>"
        );
    }

    #[test]
    fn test_without_highlighting_keeps_language_class() {
        // Arrange & Act
        let html = plain().render("```rust\nlet x = 1;\n```");

        // Assert
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">let x = 1;</code></pre>"
        );
    }

    #[test]
    fn test_render_file_missing() {
        // Arrange
        let renderer = plain();

        // Act
        let result = renderer.render_file("/nonexistent/question.md");

        // Assert
        assert!(result.is_err(), "Missing file should fail");
    }

    #[test]
    fn test_render_large_document() {
        // Arrange
        let renderer = plain();
        let section = "# Section\n\nSome **text** with `code`.\n\n- a\n- b\n\n";
        let large = section.repeat(5_000);

        // Act
        let html = renderer.render(&large);

        // Assert
        assert_eq!(html.matches("<h1>").count(), 5_000);
        assert_eq!(html.matches("<ul>").count(), 5_000);
    }

    #[test]
    fn test_code_span_inside_strong() {
        // Arrange
        let renderer = plain();

        // Act & Assert
        assert_eq!(
            renderer.render("**Compute `2**10`**"),
            "<strong>Compute <code>2**10</code></strong>"
        );
        assert_eq!(
            renderer.render("**a `**` b**"),
            "<strong>a <code>**</code> b</strong>"
        );
    }

    #[test]
    fn test_code_span_inside_emphasis() {
        // Arrange
        let renderer = plain();

        // Act & Assert
        assert_eq!(
            renderer.render("*use `x*y` here*"),
            "<em>use <code>x*y</code> here</em>"
        );
        assert_eq!(
            renderer.render("*use `x*y`*"),
            "<em>use <code>x*y</code></em>"
        );
    }

    #[test]
    fn test_link_url_with_parentheses() {
        // Arrange & Act
        let html = plain().render("[x](https://en.wikipedia.org/wiki/Foo_(bar))");

        // Assert
        assert_eq!(
            html,
            "<a href=\"https://en.wikipedia.org/wiki/Foo_(bar)\" target=\"_blank\" rel=\"noopener noreferrer\">x</a>"
        );
    }

    #[test]
    fn test_fence_info_words_after_language_are_ignored() {
        // Arrange
        let markdown = "```rust ignore\nfn main() {}\n```";

        // Act
        let plain_html = plain().render(markdown);
        let highlighted = MarkdownRenderer::new().render(markdown);

        // Assert
        assert_eq!(
            plain_html,
            "<pre><code class=\"language-rust\">fn main() {}</code></pre>"
        );
        assert!(
            highlighted.contains("<code class=\"language-rust\">"),
            "Got: {}",
            highlighted
        );
        assert!(
            highlighted.contains("<span class=\"hl-"),
            "Should highlight as rust: {}",
            highlighted
        );
    }

    #[test]
    fn test_unmatched_openers_render_in_linear_time() {
        // Arrange
        let renderer = plain();
        let inputs = [
            "[".repeat(200_000),
            "** a".repeat(50_000),
            "*x ".repeat(70_000),
            "[a](".repeat(50_000),
        ];

        for input in &inputs {
            // Act
            let started = Instant::now();
            let html = renderer.render(input);
            let elapsed = started.elapsed();

            // Assert
            assert!(
                elapsed < Duration::from_secs(2),
                "Rendering {} bytes took {:?}",
                input.len(),
                elapsed
            );
            assert!(!html.contains("<strong>"), "Nothing should match");
            assert!(!html.contains("<em>"), "Nothing should match");
            assert!(!html.contains("<a "), "Nothing should match");
        }
    }
}
