//! Forgiving HTML loader for offline indexing.
//!
//! Builds a [`Document`] from page markup. Only the structure the indexer
//! cares about is recovered: elements, attributes, text and the page title.
//! Malformed markup never fails; unknown constructs are skipped.

use std::path::Path;

use pagesift_core::{CoreError, Result};

use crate::{
    document::{Document, NodeId},
    indexer::collapse_whitespace,
};

/// Elements that never have children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is taken verbatim up to the matching end tag.
/// `<template>` is included so its inert content stays out of the tree walk,
/// as it does in a browser DOM.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "template", "textarea", "title"];

/// Read and parse an HTML file.
pub fn parse_file(path: &Path) -> Result<Document> {
    let bytes = std::fs::read(path)?;
    let html = String::from_utf8(bytes)
        .map_err(|e| CoreError::parse(path, format!("not valid UTF-8: {e}")))?;
    let document = parse(&html);
    tracing::debug!(?path, nodes = document.len(), "Parsed HTML document");
    Ok(document)
}

/// Parse HTML markup into a [`Document`].
pub fn parse(html: &str) -> Document {
    Parser::new(html).run()
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    doc: Document,
    open: Vec<NodeId>,
    title_seen: bool,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        let doc = Document::new();
        let root = doc.root();
        Self {
            input,
            pos: 0,
            doc,
            open: vec![root],
            title_seen: false,
        }
    }

    fn run(mut self) -> Document {
        while self.pos < self.input.len() {
            let rest = self.rest();

            if rest.starts_with("<!--") {
                self.skip_past("-->");
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.skip_past(">");
            } else if rest.starts_with("</") && next_is_alpha(rest, 2) {
                self.end_tag();
            } else if rest.starts_with('<') && next_is_alpha(rest, 1) {
                self.start_tag();
            } else {
                self.text();
            }
        }

        self.doc
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or_else(|| self.doc.root())
    }

    fn skip_past(&mut self, marker: &str) {
        match self.rest().find(marker) {
            Some(offset) => self.pos += offset + marker.len(),
            None => self.pos = self.input.len(),
        }
    }

    fn text(&mut self) {
        let rest = self.rest();
        // a lone '<' is text; look for the next one after it
        let first = rest.chars().next().map_or(1, char::len_utf8);
        let end = rest[first..]
            .find('<')
            .map(|offset| offset + first)
            .unwrap_or(rest.len());
        let raw = &rest[..end];
        self.pos += end;

        let parent = self.current();
        self.doc.append_text(parent, decode_entities(raw));
    }

    fn end_tag(&mut self) {
        self.pos += 2;
        let name = self.read_name();
        self.skip_past(">");

        // pop up to the innermost matching element; stray end tags are ignored
        if let Some(depth) = self
            .open
            .iter()
            .rposition(|id| self.doc.tag(*id) == Some(name.as_str()))
        {
            self.open.truncate(depth);
        }
    }

    fn start_tag(&mut self) {
        self.pos += 1;
        let name = self.read_name();
        let (attributes, self_closing) = self.read_attributes();

        self.close_implied(&name);

        let parent = self.current();
        let element = self.doc.append_element(parent, &name, attributes);

        if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            self.raw_text(element, &name);
        } else if !self_closing && !VOID_ELEMENTS.contains(&name.as_str()) {
            self.open.push(element);
        }
    }

    /// Close elements that cannot contain the one being opened.
    fn close_implied(&mut self, name: &str) {
        let closes: &[&str] = match name {
            "p" => &["p"],
            "li" => &["li"],
            "dt" | "dd" => &["dt", "dd"],
            "tr" => &["tr", "td", "th"],
            "td" | "th" => &["td", "th"],
            "option" => &["option"],
            _ => return,
        };

        let top = self.open.last().copied();
        if top.and_then(|id| self.doc.tag(id)).is_some_and(|t| closes.contains(&t)) {
            self.open.pop();
        }
    }

    fn raw_text(&mut self, element: NodeId, name: &str) {
        let rest = self.rest();
        let end = find_end_tag(rest, name).unwrap_or(rest.len());
        let raw = &rest[..end];
        self.pos += end;
        self.skip_past(">");

        let text = match name {
            "script" | "style" | "template" => raw.to_string(),
            _ => decode_entities(raw),
        };

        if name == "title" && !self.title_seen {
            self.title_seen = true;
            self.doc.set_title(Some(collapse_whitespace(&text)));
        }

        if !text.is_empty() {
            self.doc.append_text(element, text);
        }
    }

    fn read_name(&mut self) -> String {
        let rest = self.rest();
        let end = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
            .unwrap_or(rest.len());
        self.pos += end;
        rest[..end].to_ascii_lowercase()
    }

    fn read_attributes(&mut self) -> (Vec<(String, String)>, bool) {
        let mut attributes = Vec::new();

        loop {
            self.skip_whitespace();
            let rest = self.rest();

            if rest.is_empty() {
                return (attributes, false);
            }
            if rest.starts_with('>') {
                self.pos += 1;
                return (attributes, false);
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                return (attributes, true);
            }
            if rest.starts_with('/') {
                self.pos += 1;
                continue;
            }

            let name_end = match rest
                .find(|c: char| c.is_ascii_whitespace() || matches!(c, '=' | '>' | '/'))
            {
                Some(0) => rest.chars().next().map_or(1, char::len_utf8),
                Some(end) => end,
                None => rest.len(),
            };
            let name = rest[..name_end].to_ascii_lowercase();
            self.pos += name_end;

            self.skip_whitespace();
            let value = if self.rest().starts_with('=') {
                self.pos += 1;
                self.skip_whitespace();
                self.read_attribute_value()
            } else {
                String::new()
            };

            attributes.push((name, value));
        }
    }

    fn read_attribute_value(&mut self) -> String {
        let rest = self.rest();

        if let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') {
            let body = &rest[1..];
            let end = body.find(quote).unwrap_or(body.len());
            self.pos += 1 + end + usize::from(end < body.len());
            return decode_entities(&body[..end]);
        }

        let end = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '>')
            .unwrap_or(rest.len());
        self.pos += end;
        decode_entities(&rest[..end])
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }
}

fn next_is_alpha(s: &str, at: usize) -> bool {
    s.as_bytes().get(at).is_some_and(u8::is_ascii_alphabetic)
}

/// Byte offset of `</name` (case-insensitive) in `haystack`.
fn find_end_tag(haystack: &str, name: &str) -> Option<usize> {
    let bytes = haystack.as_bytes();
    let mut from = 0;

    while let Some(offset) = haystack[from..].find("</") {
        let start = from + offset;
        let tag_start = start + 2;
        let tag_end = tag_start + name.len();
        if tag_end <= bytes.len() && bytes[tag_start..tag_end].eq_ignore_ascii_case(name.as_bytes())
        {
            return Some(start);
        }
        from = start + 2;
    }

    None
}

/// Decode the character references that commonly appear in page text.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|semi| *semi <= 10)
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                result.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                result.push('&');
                rest = &rest[1..];
            }
        }
    }

    result.push_str(rest);
    result
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(numeric) = name.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse().ok()?,
        };
        return char::from_u32(code);
    }

    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '©',
        "mdash" => '—',
        "ndash" => '–',
        "hellip" => '…',
        _ => return None,
    };
    Some(c)
}
