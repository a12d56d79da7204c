//! Rendering and escaping of documentation comments.
//!
//! Escaping is applied lazily: each text segment is escaped at the moment it
//! is materialized into the line buffer, never when the caller supplies it.
//! A caller-written newline therefore re-enters the active comment indent
//! first, and the text after it is escaped under the same rules as the text
//! before it, including an open inline tag's delimiter escaping.

use joule_ast::doc::{DocComment, DocPart};

use crate::prefs::IndentKind;
use crate::writer::{EmitError, Sink, Writer};

pub(crate) fn emit_doc<S: Sink>(doc: &DocComment, w: &mut Writer<'_, S>) -> Result<(), EmitError> {
    w.text("/**");
    w.newline();
    w.push_indent(IndentKind::Comment);
    let had_body = !doc.body.is_empty();
    {
        let mut body = DocBody::new(w);
        body.parts(&doc.body);
        body.finish_line();
        if doc.has_tags() {
            if had_body {
                body.bare_line();
                body.finish_line();
            }
            for (name, parts) in &doc.params {
                body.tag(&format!("@param {}", name), parts);
            }
            if let Some(parts) = &doc.returns {
                body.tag("@return", parts);
            }
            for (ty, parts) in &doc.throws {
                body.tag(&format!("@throws {}", ty), parts);
            }
            if let Some(parts) = &doc.deprecated {
                body.tag("@deprecated", parts);
            }
            for target in &doc.see {
                body.tag(&format!("@see {}", target), &[]);
            }
            if let Some(version) = &doc.since {
                body.tag(&format!("@since {}", version), &[]);
            }
            if let Some(name) = &doc.author {
                body.tag(&format!("@author {}", name), &[]);
            }
        }
    }
    w.text("*/");
    w.pop_indent(IndentKind::Comment)?;
    w.newline();
    Ok(())
}

/// Line-oriented assembly of comment content.
///
/// Tracks whether the current starred line is open and how deep the HTML
/// block nesting is; the HTML indent applies after the `* ` prefix, so it is
/// carried here rather than on the writer's indent stack.
struct DocBody<'w, 'p, S: Sink> {
    w: &'w mut Writer<'p, S>,
    line_open: bool,
    inline_depth: usize,
    html_indent: usize,
    html_width: usize,
}

impl<'w, 'p, S: Sink> DocBody<'w, 'p, S> {
    fn new(w: &'w mut Writer<'p, S>) -> Self {
        let html_width = w.prefs().indent(IndentKind::HtmlTag).width;
        Self {
            w,
            line_open: false,
            inline_depth: 0,
            html_indent: 0,
            html_width,
        }
    }

    fn parts(&mut self, parts: &[DocPart]) {
        for part in parts {
            match part {
                DocPart::Text(text) => self.text(text),
                DocPart::Code(content) => self.inline_tag("code", content),
                DocPart::Literal(content) => self.inline_tag("literal", content),
                DocPart::Link(target) => self.inline_tag("link", target),
                DocPart::Html { tag, parts } => self.html(tag, parts),
            }
        }
    }

    /// Open the current starred line if nothing is on it yet.
    fn open_line(&mut self) {
        if !self.line_open {
            let mut prefix = String::from("* ");
            for _ in 0..self.html_indent {
                prefix.push(' ');
            }
            self.w.text(&prefix);
            self.line_open = true;
        }
    }

    /// A line holding only the star, used as a paragraph separator.
    fn bare_line(&mut self) {
        self.w.text("*");
        self.line_open = true;
    }

    fn newline(&mut self) {
        self.w.newline();
        self.line_open = false;
    }

    fn finish_line(&mut self) {
        if self.line_open {
            self.newline();
        }
    }

    /// Write text, honoring embedded newlines and escaping each segment as
    /// it lands in the line buffer.
    fn text(&mut self, text: &str) {
        let pieces: Vec<&str> = text.split('\n').collect();
        let count = pieces.len();
        for (i, piece) in pieces.iter().copied().enumerate() {
            if i > 0 {
                self.newline();
            }
            // Segments followed by a break shed trailing whitespace so no
            // line ends in a space.
            let piece = if i + 1 < count {
                piece.trim_end()
            } else {
                piece
            };
            if piece.is_empty() {
                if i > 0 && i + 1 < count {
                    self.bare_line();
                }
                continue;
            }
            let at_line_start = !self.line_open;
            self.open_line();
            let escaped = escape_doc(piece, at_line_start, self.inline_depth > 0);
            self.w.text(&escaped);
        }
    }

    /// `{@tag content}`. The delimiters themselves are written raw; the
    /// content is escaped with the delimiter pair added to the reserved set,
    /// across any line breaks it contains.
    fn inline_tag(&mut self, keyword: &str, content: &str) {
        self.open_line();
        if content.is_empty() {
            self.w.text(&format!("{{@{}}}", keyword));
            return;
        }
        self.w.text(&format!("{{@{} ", keyword));
        self.inline_depth += 1;
        self.text(content);
        self.inline_depth -= 1;
        self.w.text("}");
    }

    /// An HTML element laid out as a block: open tag, indented body, close
    /// tag, each on its own line.
    fn html(&mut self, tag: &str, parts: &[DocPart]) {
        self.finish_line();
        self.open_line();
        self.w.text(&format!("<{}>", tag));
        self.newline();
        self.html_indent += self.html_width;
        self.parts(parts);
        self.finish_line();
        self.html_indent -= self.html_width;
        self.open_line();
        self.w.text(&format!("</{}>", tag));
        self.newline();
    }

    /// A block tag line: the raw tag header, then escaped description parts.
    fn tag(&mut self, header: &str, parts: &[DocPart]) {
        self.open_line();
        self.w.text(header);
        if !parts.is_empty() {
            self.w.text(" ");
            self.parts(parts);
        }
        self.finish_line();
    }
}

/// Escape one text segment for a documentation comment body.
///
/// Markup metacharacters become entities, a `*/` inside the body loses its
/// slash to an entity so it cannot terminate the comment, a line-leading `@`
/// is escaped so it cannot open a block tag, and inside an inline tag the
/// brace delimiter pair is escaped as well.
fn escape_doc(text: &str, at_line_start: bool, in_inline_tag: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut first = true;
    while let Some(c) = chars.next() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '@' if first && at_line_start => out.push_str("&#64;"),
            '{' if in_inline_tag => out.push_str("&#123;"),
            '}' if in_inline_tag => out.push_str("&#125;"),
            '*' if chars.peek() == Some(&'/') => {
                chars.next();
                out.push_str("*&#47;");
            }
            c => out.push(c),
        }
        first = false;
    }
    out
}
