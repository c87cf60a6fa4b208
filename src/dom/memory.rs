//! In-memory arena document

use super::Dom;

/// Index of a node inside a [`MemoryDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Root,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    /// Attributes in insertion order; `class` and `style` live here too
    attrs: Vec<(String, String)>,
    checked: bool,
    disabled: bool,
    /// Explicitly assigned value, overriding the markup
    value: Option<String>,
}

impl Element {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_attr(&mut self, name: &str, value: String) {
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(key, _)| key != name);
    }

    fn classes(&self) -> Vec<String> {
        self.attr("class")
            .map(|value| value.split_whitespace().map(ToOwned::to_owned).collect())
            .unwrap_or_default()
    }

    fn set_classes(&mut self, classes: &[String]) {
        if classes.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", classes.join(" "));
        }
    }
}

/// A small DOM tree held entirely in memory.
///
/// Nodes are never freed; detached or cleared nodes simply stop being
/// reachable from the root.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    body: NodeId,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create a document holding an empty `<body>`
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Root,
            }],
            body: NodeId(0),
        };
        let body = doc.create_element("body");
        doc.attach(NodeId(0), body);
        doc.body = body;
        doc
    }

    /// The `<body>` element
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Append a new element under `parent`.
    ///
    /// `checked`, `disabled` and `value` attributes also initialize the
    /// matching form-control properties, as a parser would.
    pub fn append_element(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let node = self.create_element(tag);
        if let Some(element) = self.element_mut(node) {
            for (name, value) in attrs {
                element.set_attr(name, value.to_string());
                match *name {
                    "checked" => element.checked = true,
                    "disabled" => element.disabled = true,
                    _ => {}
                }
            }
        }
        self.attach(parent, node);
        node
    }

    /// Append an element with a single text child
    pub fn append_text_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> NodeId {
        let node = self.append_element(parent, tag, attrs);
        self.append_text(&node, text);
        node
    }

    /// Assign the `value` property (selects and text inputs)
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.value = Some(value.to_string());
        }
    }

    /// Inline style property value, if set
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        let style = self.element(node)?.attr("style")?;
        parse_style(style)
            .into_iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value)
    }

    /// Class list of an element
    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.element(node).map(Element::classes).unwrap_or_default()
    }

    /// Serialize the subtree rooted at `node`
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    /// Serialize the whole body
    pub fn to_html(&self) -> String {
        self.outer_html(self.body)
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node.0)?.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old_parent) = self.nodes[child.0].parent.take() {
            self.nodes[old_parent.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn element_children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[node.0]
            .children
            .iter()
            .copied()
            .filter(|child| self.element(*child).is_some())
    }

    /// Pre-order walk of element descendants of `node`
    fn walk(&self, node: NodeId, out: &mut Vec<NodeId>) {
        for child in self.element_children(node) {
            out.push(child);
            self.walk(child, out);
        }
    }

    fn selected_option_value(&self, select: NodeId) -> String {
        let mut options = Vec::new();
        self.walk(select, &mut options);
        let options: Vec<NodeId> = options
            .into_iter()
            .filter(|node| self.tag_name(node) == "option")
            .collect();
        let chosen = options
            .iter()
            .find(|node| self.attribute(node, "selected").is_some())
            .or_else(|| options.first());
        match chosen {
            Some(option) => self
                .attribute(option, "value")
                .unwrap_or_else(|| self.text_content(option)),
            None => String::new(),
        }
    }

    fn write_node(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Root => {
                for child in &self.nodes[node.0].children {
                    self.write_node(*child, out);
                }
            }
            NodeKind::Text(text) => out.push_str(&escape_html(text)),
            NodeKind::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                for (name, value) in &element.attrs {
                    // Properties win over their markup attributes
                    if matches!(name.as_str(), "checked" | "disabled" | "value") {
                        continue;
                    }
                    out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
                }
                if let Some(value) = element.value.as_deref().or_else(|| element.attr("value")) {
                    out.push_str(&format!(" value=\"{}\"", escape_html(value)));
                }
                if element.checked {
                    out.push_str(" checked");
                }
                if element.disabled {
                    out.push_str(" disabled");
                }
                out.push('>');
                if is_void(&element.tag) {
                    return;
                }
                for child in &self.nodes[node.0].children {
                    self.write_node(*child, out);
                }
                out.push_str(&format!("</{}>", element.tag));
            }
        }
    }
}

impl Dom for MemoryDocument {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.all_elements()
            .into_iter()
            .find(|node| self.attribute(node, "id").as_deref() == Some(id))
    }

    fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.all_elements()
            .into_iter()
            .filter(|node| self.has_class(node, class))
            .collect()
    }

    fn all_elements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(NodeId(0), &mut out);
        out
    }

    fn descendants_by_tag(&self, node: &NodeId, tag: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk(*node, &mut out);
        out.retain(|child| self.tag_name(child) == tag);
        out
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.element_children(*node).collect()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        let parent = self.nodes.get(node.0)?.parent?;
        self.element(parent).map(|_| parent)
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.element(*node)
            .map(|element| element.tag.clone())
            .unwrap_or_default()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.element(*node)?.attr(name).map(ToOwned::to_owned)
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(*node) {
            element.set_attr(name, value.to_string());
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.element(*node)
            .and_then(|element| element.attr("class"))
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if let Some(element) = self.element_mut(*node) {
            let mut classes = element.classes();
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
                element.set_classes(&classes);
            }
        }
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        if let Some(element) = self.element_mut(*node) {
            let mut classes = element.classes();
            classes.retain(|c| c != class);
            element.set_classes(&classes);
        }
    }

    fn text_content(&self, node: &NodeId) -> String {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => text.clone(),
            _ => self.nodes[node.0]
                .children
                .iter()
                .map(|child| self.text_content(child))
                .collect(),
        }
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) {
        if let Some(element) = self.element_mut(*node) {
            let mut decls = parse_style(element.attr("style").unwrap_or_default());
            match decls.iter_mut().find(|(name, _)| name == property) {
                Some(slot) => slot.1 = value.to_string(),
                None => decls.push((property.to_string(), value.to_string())),
            }
            let style = decls
                .iter()
                .map(|(name, value)| format!("{}: {};", name, value))
                .collect::<Vec<_>>()
                .join(" ");
            element.set_attr("style", style);
        }
    }

    fn is_checked(&self, node: &NodeId) -> bool {
        self.element(*node).map(|e| e.checked).unwrap_or(false)
    }

    fn set_checked(&mut self, node: &NodeId, checked: bool) {
        if let Some(element) = self.element_mut(*node) {
            element.checked = checked;
        }
    }

    fn is_disabled(&self, node: &NodeId) -> bool {
        self.element(*node).map(|e| e.disabled).unwrap_or(false)
    }

    fn set_disabled(&mut self, node: &NodeId, disabled: bool) {
        if let Some(element) = self.element_mut(*node) {
            element.disabled = disabled;
        }
    }

    fn value(&self, node: &NodeId) -> String {
        let Some(element) = self.element(*node) else {
            return String::new();
        };
        if let Some(value) = &element.value {
            return value.clone();
        }
        if element.tag == "select" {
            return self.selected_option_value(*node);
        }
        element.attr("value").unwrap_or_default().to_string()
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(NodeKind::Element(Element {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            checked: false,
            disabled: false,
            value: None,
        }))
    }

    fn append_text(&mut self, parent: &NodeId, text: &str) {
        let node = self.push_node(NodeKind::Text(text.to_string()));
        self.attach(*parent, node);
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.attach(*parent, *child);
    }

    fn clear_children(&mut self, node: &NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            Some((name, value.trim().to_string()))
        })
        .collect()
}

fn escape_html(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for ch in src.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "input" | "br" | "hr" | "img" | "meta" | "link")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_order() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let a = doc.append_element(body, "div", &[("id", "a")]);
        let b = doc.append_element(a, "span", &[("id", "b")]);
        let c = doc.append_element(body, "p", &[("id", "c")]);

        let all = doc.all_elements();
        assert_eq!(all, vec![body, a, b, c]);
        assert_eq!(doc.element_by_id("b"), Some(b));
        assert_eq!(doc.parent(&b), Some(a));
        assert_eq!(doc.parent(&body), None);
    }

    #[test]
    fn test_class_list_edits() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let div = doc.append_element(body, "div", &[("class", "one two")]);

        doc.add_class(&div, "three");
        doc.add_class(&div, "one");
        doc.remove_class(&div, "two");

        assert_eq!(doc.classes(div), vec!["one", "three"]);
        assert!(doc.has_class(&div, "three"));
        assert!(!doc.has_class(&div, "two"));
    }

    #[test]
    fn test_style_replaces_existing_property() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let div = doc.append_element(body, "div", &[]);

        doc.set_style(&div, "transition", "none");
        doc.set_style(&div, "opacity", "1");
        doc.set_style(&div, "transition", "all 500ms ease-in-out");

        assert_eq!(doc.style(div, "transition").as_deref(), Some("all 500ms ease-in-out"));
        assert_eq!(doc.style(div, "opacity").as_deref(), Some("1"));
    }

    #[test]
    fn test_select_value_follows_selected_option() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let select = doc.append_element(body, "select", &[("id", "kind")]);
        doc.append_text_element(select, "option", &[("value", "")], "---");
        doc.append_text_element(select, "option", &[("value", "2"), ("selected", "")], "List B");

        assert_eq!(doc.value(&select), "2");
        doc.set_value(select, "1");
        assert_eq!(doc.value(&select), "1");
    }

    #[test]
    fn test_serialization_escapes_text() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        doc.append_text_element(body, "p", &[("class", "note")], "a < b & c");
        let input = doc.append_element(body, "input", &[("type", "checkbox"), ("checked", "")]);
        doc.set_disabled(&input, true);

        assert_eq!(
            doc.to_html(),
            "<body><p class=\"note\">a &lt; b &amp; c</p><input type=\"checkbox\" checked disabled></body>"
        );
    }
}
