//! DOM abstraction shared by every page behavior
//!
//! Behaviors are written against the [`Dom`] trait so the same code drives the
//! in-memory [`MemoryDocument`] (tests, demo, benches) and, with the `wasm`
//! feature, the live browser document.

mod memory;

pub use memory::{MemoryDocument, NodeId};

/// Minimal element-level view of a document.
///
/// All node lists are returned in document order. Only element nodes are
/// exposed; text is reached through [`Dom::text_content`].
pub trait Dom {
    /// Handle to an element. Cheap to clone, compared by identity.
    type Node: Clone + PartialEq + std::fmt::Debug;

    // ========================
    // Lookup
    // ========================

    /// First element with the given id
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Every element carrying `class`
    fn elements_by_class(&self, class: &str) -> Vec<Self::Node>;

    /// Every element in the document
    fn all_elements(&self) -> Vec<Self::Node>;

    /// Element descendants of `node` with the given tag (not including `node`)
    fn descendants_by_tag(&self, node: &Self::Node, tag: &str) -> Vec<Self::Node>;

    /// Element children of `node`
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Parent element of `node`, `None` at the top of the tree
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    // ========================
    // Element state
    // ========================

    /// Lower-case tag name
    fn tag_name(&self, node: &Self::Node) -> String;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_class(&mut self, node: &Self::Node, class: &str);

    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Concatenated text of the subtree
    fn text_content(&self, node: &Self::Node) -> String;

    /// Set one inline style property, replacing any previous value
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str);

    /// Current `checked` property of a form control
    fn is_checked(&self, node: &Self::Node) -> bool;

    fn set_checked(&mut self, node: &Self::Node, checked: bool);

    fn is_disabled(&self, node: &Self::Node) -> bool;

    fn set_disabled(&mut self, node: &Self::Node, disabled: bool);

    /// Current `value` property; selects report their selected option
    fn value(&self, node: &Self::Node) -> String;

    // ========================
    // Construction
    // ========================

    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> Self::Node;

    /// Append a text node as the last child of `parent`
    fn append_text(&mut self, parent: &Self::Node, text: &str);

    /// Append `child` as the last child of `parent`
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);

    /// Remove every child of `node`
    fn clear_children(&mut self, node: &Self::Node);

    // ========================
    // Provided helpers
    // ========================

    /// Nearest inclusive ancestor carrying `class`
    fn closest_with_class(&self, node: &Self::Node, class: &str) -> Option<Self::Node> {
        let mut cursor = Some(node.clone());
        while let Some(current) = cursor {
            if self.has_class(&current, class) {
                return Some(current);
            }
            cursor = self.parent(&current);
        }
        None
    }

    /// Add or remove `class` depending on `on`
    fn toggle_class(&mut self, node: &Self::Node, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// Lower-case `type` attribute of an input, empty for other elements
    fn input_type(&self, node: &Self::Node) -> String {
        if self.tag_name(node) != "input" {
            return String::new();
        }
        self.attribute(node, "type")
            .map(|t| t.to_ascii_lowercase())
            .unwrap_or_else(|| "text".to_string())
    }

    /// Create an element with a class list in one step
    fn create_element_with_class(&mut self, tag: &str, classes: &[&str]) -> Self::Node {
        let node = self.create_element(tag);
        for class in classes {
            self.add_class(&node, class);
        }
        node
    }
}

/// Heading tags considered when deriving section titles
pub const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Whether a tag name is a heading
pub fn is_heading(tag: &str) -> bool {
    HEADING_TAGS.contains(&tag)
}
