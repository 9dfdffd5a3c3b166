//! Live-DOM content provider.

use pagesift_search::{ContentProvider, ParentInfo, TextNode};
use web_sys::{Document, Element, Node};

/// `NodeFilter.SHOW_TEXT`.
const SHOW_TEXT: u32 = 0x4;

/// Selector matching elements that hide their subtree.
const HIDDEN_SELECTOR: &str = r#"[aria-hidden="true"], [hidden]"#;

/// Yields the text nodes under `document.body`.
pub struct DomProvider {
    document: Document,
}

impl DomProvider {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn root(&self) -> Option<Node> {
        self.document
            .body()
            .map(Node::from)
            .or_else(|| self.document.document_element().map(Node::from))
    }
}

impl ContentProvider for DomProvider {
    type Element = Element;

    fn title(&self) -> Option<String> {
        let title = self.document.title();
        let title = title.trim();
        (!title.is_empty()).then(|| title.to_string())
    }

    fn text_nodes(&self) -> Vec<TextNode<Element>> {
        let Some(root) = self.root() else {
            return Vec::new();
        };

        let walker = match self
            .document
            .create_tree_walker_with_what_to_show(&root, SHOW_TEXT)
        {
            Ok(walker) => walker,
            Err(err) => {
                log::warn!("Cannot walk document text: {err:?}");
                return Vec::new();
            }
        };

        let mut nodes = Vec::new();
        while let Ok(Some(node)) = walker.next_node() {
            let text = node.text_content().unwrap_or_default();
            let parent = node.parent_element().map(|element| ParentInfo {
                tag: element.tag_name().to_lowercase(),
                hidden: matches!(element.closest(HIDDEN_SELECTOR), Ok(Some(_))),
                element,
            });
            nodes.push(TextNode { text, parent });
        }
        nodes
    }
}
