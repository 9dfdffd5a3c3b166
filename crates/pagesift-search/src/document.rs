//! Document content model.
//!
//! [`ContentProvider`] is the seam between the indexer and whatever holds the
//! page: the browser DOM, or the in-memory [`Document`] tree produced by
//! [`crate::html::parse`].

/// Element facts the indexer needs about a text node's parent.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentInfo<E> {
    /// Lowercase tag name of the parent element.
    pub tag: String,

    /// Handle to the parent element.
    pub element: E,

    /// Whether the parent or any ancestor is `hidden` or `aria-hidden="true"`.
    pub hidden: bool,
}

/// A text node yielded in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode<E> {
    /// Raw text content, whitespace untouched.
    pub text: String,

    /// Owning element, `None` for text without an element parent.
    pub parent: Option<ParentInfo<E>>,
}

/// Source of ordered text nodes for indexing.
pub trait ContentProvider {
    /// Handle used to refer back to an element once indexed.
    type Element: Clone;

    /// Document title, if the page has a non-empty one.
    fn title(&self) -> Option<String>;

    /// All text nodes under the content root, in document order.
    fn text_nodes(&self) -> Vec<TextNode<Self::Element>>;
}

/// Index of a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the document's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Root,
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    title: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
            title: None,
        }
    }

    /// The document root.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Append an element under `parent`. Tag and attribute names are lowercased.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: Vec<(String, String)>,
    ) -> NodeId {
        let attributes = attributes
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        self.push(
            parent,
            NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
                attributes,
            },
        )
    }

    /// Append a text node under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        self.push(parent, NodeKind::Text(text.into()))
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Set the document title.
    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title.filter(|t| !t.trim().is_empty());
    }

    /// Tag name when `id` is an element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Attribute value of an element.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Text of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Parent node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0)?.parent
    }

    /// Direct children.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Nearest element parent of a node.
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|p| self.tag(*p).is_some())
    }

    /// Nodes under `from` in document order, `from` included.
    pub fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![from];

        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }

        order
    }

    /// First element with the given tag, in document order.
    pub fn find_element(&self, tag: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|id| self.tag(*id).is_some_and(|t| t.eq_ignore_ascii_case(tag)))
    }

    /// Element carrying `id="..."`.
    pub fn element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|id| self.attribute(*id, "id") == Some(element_id))
    }

    /// Closest element, starting at `id` itself, that satisfies `predicate`.
    pub fn closest(&self, id: NodeId, predicate: impl Fn(NodeId) -> bool) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.tag(node).is_some() && predicate(node) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// Closest element, starting at `id` itself, carrying the attribute `name`.
    pub fn closest_with_attribute(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.closest(id, |n| self.attribute(n, name).is_some())
    }

    /// Whether `id` or any ancestor is `hidden` or `aria-hidden="true"`.
    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.closest(id, |n| {
            self.attribute(n, "hidden").is_some() || self.attribute(n, "aria-hidden") == Some("true")
        })
        .is_some()
    }

    /// Concatenated text of all text nodes under `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|n| self.text(n))
            .collect()
    }

    /// Root of indexable content: `<body>` when present, the root otherwise.
    pub fn content_root(&self) -> NodeId {
        self.find_element("body").unwrap_or_else(|| self.root())
    }

    /// Nodes of the page body in document order.
    ///
    /// Without a `<body>` element the whole tree is walked, minus `<head>`
    /// and `<title>` subtrees, which a browser keeps out of `document.body`.
    pub fn content_nodes(&self) -> Vec<NodeId> {
        let root = self.content_root();
        if root != self.root() {
            return self.descendants(root);
        }

        let mut order = Vec::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            if matches!(self.tag(id), Some("head" | "title")) {
                continue;
            }
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }

        order
    }
}

impl ContentProvider for Document {
    type Element = NodeId;

    fn title(&self) -> Option<String> {
        self.title.clone()
    }

    fn text_nodes(&self) -> Vec<TextNode<NodeId>> {
        self.content_nodes()
            .into_iter()
            .filter_map(|id| {
                let text = self.text(id)?;
                let parent = self.parent_element(id).map(|element| ParentInfo {
                    tag: self.tag(element).unwrap_or_default().to_string(),
                    element,
                    hidden: self.is_hidden(element),
                });
                Some(TextNode {
                    text: text.to_string(),
                    parent,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.append_element(doc.root(), "BODY", vec![]);
        let section = doc.append_element(
            body,
            "section",
            vec![("data-infogram-element".to_string(), String::new())],
        );
        let para = doc.append_element(section, "p", vec![]);
        doc.append_text(para, "Hello ");
        let em = doc.append_element(para, "em", vec![]);
        doc.append_text(em, "world");
        (doc, section, em)
    }

    #[test]
    fn test_tags_are_lowercased() {
        let (doc, _, _) = sample();
        assert_eq!(doc.find_element("body"), Some(NodeId(1)));
        assert_eq!(doc.tag(NodeId(1)), Some("body"));
    }

    #[test]
    fn test_descendants_in_document_order() {
        let (doc, _, _) = sample();
        let texts: Vec<_> = doc
            .descendants(doc.root())
            .into_iter()
            .filter_map(|id| doc.text(id))
            .collect();
        assert_eq!(texts, vec!["Hello ", "world"]);
        assert_eq!(doc.text_content(doc.root()), "Hello world");
    }

    #[test]
    fn test_closest_with_attribute() {
        let (doc, section, em) = sample();
        assert_eq!(
            doc.closest_with_attribute(em, "data-infogram-element"),
            Some(section)
        );
        assert_eq!(doc.closest_with_attribute(em, "data-missing"), None);
    }

    #[test]
    fn test_hidden_ancestor() {
        let mut doc = Document::new();
        let hidden = doc.append_element(
            doc.root(),
            "div",
            vec![("aria-hidden".to_string(), "true".to_string())],
        );
        let span = doc.append_element(hidden, "span", vec![]);
        let visible = doc.append_element(
            doc.root(),
            "div",
            vec![("aria-hidden".to_string(), "false".to_string())],
        );

        assert!(doc.is_hidden(span));
        assert!(!doc.is_hidden(visible));
    }

    #[test]
    fn test_text_nodes_reports_parent() {
        let (doc, _, em) = sample();
        let nodes = doc.text_nodes();
        assert_eq!(nodes.len(), 2);
        let last = nodes[1].parent.as_ref().expect("parent");
        assert_eq!(last.tag, "em");
        assert_eq!(last.element, em);
        assert!(!last.hidden);
    }

    #[test]
    fn test_content_nodes_skip_head_without_body() {
        let mut doc = Document::new();
        let html = doc.append_element(doc.root(), "html", vec![]);
        let head = doc.append_element(html, "head", vec![]);
        let meta_text = doc.append_text(head, "head text");
        let p = doc.append_element(html, "p", vec![]);
        let body_text = doc.append_text(p, "body text");

        let nodes = doc.content_nodes();
        assert!(!nodes.contains(&head));
        assert!(!nodes.contains(&meta_text));
        assert!(nodes.contains(&body_text));
        assert_eq!(doc.text_nodes().len(), 1);
    }

    #[test]
    fn test_blank_title_is_dropped() {
        let mut doc = Document::new();
        doc.set_title(Some("   ".to_string()));
        assert_eq!(ContentProvider::title(&doc), None);
        doc.set_title(Some("Guide".to_string()));
        assert_eq!(ContentProvider::title(&doc), Some("Guide".to_string()));
    }
}
