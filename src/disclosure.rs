//! Disclosure controller - collapses long tables and lists behind a toggle
//!
//! A marked container with more than `threshold + margin` rows keeps its first
//! `threshold` rows visible and gains a "More"/"Less" affordance as its last
//! child. Shorter containers are left untouched, so a section is never
//! collapsed just to hide one or two rows.

use log::{debug, trace};

use crate::config::{
    parse_count, parse_duration, parse_positive, transition_value, DisclosureDefaults, PageConfig,
};
use crate::dom::Dom;

/// Class of the inserted toggle row/item
pub const AFFORDANCE_CLASS: &str = "hide-toggle";
/// Class carried by the affordance while the section is expanded
pub const OPEN_CLASS: &str = "open";
const ICON_COLLAPSED: &str = "fa-chevron-down";
const ICON_EXPANDED: &str = "fa-chevron-up";
const ICON_ROTATED: &str = "rotated";
const LABEL_CLASS: &str = "hide-toggle-label";
const LABEL_COLLAPSED: &str = "More";
const LABEL_EXPANDED: &str = "Less";

/// Expand/collapse state of one section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleState {
    Expanded,
    #[default]
    Collapsed,
}

impl ToggleState {
    /// The opposite state
    pub fn inverted(self) -> Self {
        match self {
            Self::Expanded => Self::Collapsed,
            Self::Collapsed => Self::Expanded,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }
}

/// Row-based (table) or item-based (list) container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Table,
    List,
}

impl ContainerKind {
    /// Classify a container by tag name
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "table" | "tbody" | "thead" | "tfoot" => Some(Self::Table),
            "ul" | "ol" => Some(Self::List),
            _ => None,
        }
    }
}

/// Per-section settings, parsed once from the container's data attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionConfig {
    /// Items kept visible while collapsed
    pub threshold: usize,
    /// Hysteresis margin above the threshold
    pub margin: usize,
    /// Explicit trigger count replacing `threshold + margin`
    pub hide_after: Option<usize>,
    /// Transition for user toggles; 0 is instantaneous
    pub duration_ms: u32,
}

impl From<&DisclosureDefaults> for SectionConfig {
    fn from(defaults: &DisclosureDefaults) -> Self {
        Self {
            threshold: defaults.threshold,
            margin: defaults.margin,
            hide_after: None,
            duration_ms: defaults.duration_ms,
        }
    }
}

impl SectionConfig {
    /// Read `data-display`, `data-margin`, `data-hide-after` and
    /// `data-duration`, keeping the defaults for anything malformed
    pub fn from_attributes<D: Dom>(dom: &D, container: &D::Node, defaults: &DisclosureDefaults) -> Self {
        let attr = |name: &str| dom.attribute(container, name);
        let base = Self::from(defaults);
        Self {
            threshold: parse_positive(attr("data-display").as_deref()).unwrap_or(base.threshold),
            margin: parse_count(attr("data-margin").as_deref()).unwrap_or(base.margin),
            hide_after: parse_positive(attr("data-hide-after").as_deref()),
            duration_ms: parse_duration(attr("data-duration").as_deref()).unwrap_or(base.duration_ms),
        }
    }

    /// Item count that must be exceeded before an affordance is added
    pub fn trigger(&self) -> usize {
        self.hide_after.unwrap_or(self.threshold + self.margin)
    }

    /// Whether a section of `count` items gets an affordance. There must
    /// also be something to hide past the visible threshold.
    pub fn needs_affordance(&self, count: usize) -> bool {
        count > self.trigger() && count > self.threshold
    }
}

/// A wired collapsible section
#[derive(Debug, Clone)]
pub struct Disclosure<N> {
    container: N,
    kind: ContainerKind,
    items: Vec<N>,
    affordance: N,
    icon: N,
    label: N,
    config: SectionConfig,
    hidden_class: String,
    state: ToggleState,
}

impl<N: Clone + PartialEq + std::fmt::Debug> Disclosure<N> {
    /// Wire one container.
    ///
    /// Returns `None` when the element is not a table or list, when it is
    /// already wired, or when it is short enough to stay fully visible.
    /// Otherwise the affordance is appended and the tail collapsed at once.
    pub fn attach<D: Dom<Node = N>>(dom: &mut D, container: &N, page: &PageConfig) -> Option<Self> {
        let tag = dom.tag_name(container);
        let Some(kind) = ContainerKind::from_tag(&tag) else {
            debug!("disclosure: <{}> is not a table or list, skipping", tag);
            return None;
        };

        let candidates = match kind {
            ContainerKind::Table => dom.descendants_by_tag(container, "tr"),
            ContainerKind::List => dom
                .children(container)
                .into_iter()
                .filter(|child| dom.tag_name(child) == "li")
                .collect(),
        };
        if candidates.iter().any(|item| dom.has_class(item, AFFORDANCE_CLASS)) {
            debug!("disclosure: {:?} already has an affordance", container);
            return None;
        }

        let config = SectionConfig::from_attributes(&*dom, container, &page.disclosure);
        if !config.needs_affordance(candidates.len()) {
            trace!(
                "disclosure: {} items within trigger {}, leaving visible",
                candidates.len(),
                config.trigger()
            );
            return None;
        }

        let (affordance, icon, label) = build_affordance(dom, kind);
        dom.append_child(container, &affordance);

        let disclosure = Self {
            container: container.clone(),
            kind,
            items: candidates,
            affordance,
            icon,
            label,
            config,
            hidden_class: page.hidden_class.clone(),
            state: ToggleState::Collapsed,
        };
        disclosure.apply(dom, false);
        debug!(
            "disclosure: wired {:?} section with {} items, {} visible",
            kind,
            disclosure.items.len(),
            disclosure.config.threshold
        );
        Some(disclosure)
    }

    /// Invert the state with the configured transition
    pub fn toggle<D: Dom<Node = N>>(&mut self, dom: &mut D) -> ToggleState {
        self.state = self.state.inverted();
        trace!("disclosure: {:?} -> {:?}", self.container, self.state);
        self.apply(dom, true);
        self.state
    }

    pub fn expand<D: Dom<Node = N>>(&mut self, dom: &mut D) {
        if !self.state.is_expanded() {
            self.toggle(dom);
        }
    }

    pub fn collapse<D: Dom<Node = N>>(&mut self, dom: &mut D) {
        if self.state.is_expanded() {
            self.toggle(dom);
        }
    }

    /// Write the current state to the DOM
    fn apply<D: Dom<Node = N>>(&self, dom: &mut D, animate: bool) {
        let expanded = self.state.is_expanded();
        let transition = transition_value(if animate { self.config.duration_ms } else { 0 });

        for item in self.tail() {
            dom.set_style(item, "transition", &transition);
            dom.toggle_class(item, &self.hidden_class, !expanded);
        }

        dom.toggle_class(&self.affordance, OPEN_CLASS, expanded);
        dom.toggle_class(&self.icon, ICON_COLLAPSED, !expanded);
        dom.toggle_class(&self.icon, ICON_EXPANDED, expanded);
        dom.toggle_class(&self.icon, ICON_ROTATED, expanded);
        dom.clear_children(&self.label);
        dom.append_text(
            &self.label,
            if expanded { LABEL_EXPANDED } else { LABEL_COLLAPSED },
        );
    }

    /// Items hidden while collapsed
    pub fn tail(&self) -> &[N] {
        let start = self.config.threshold.min(self.items.len());
        &self.items[start..]
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn container(&self) -> &N {
        &self.container
    }

    pub fn affordance(&self) -> &N {
        &self.affordance
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    pub fn config(&self) -> &SectionConfig {
        &self.config
    }
}

fn build_affordance<D: Dom>(dom: &mut D, kind: ContainerKind) -> (D::Node, D::Node, D::Node) {
    let icon = dom.create_element_with_class("span", &["rotate-icon", "fa", "fa-lg", ICON_COLLAPSED]);
    let label = dom.create_element_with_class("span", &[LABEL_CLASS]);

    let affordance = match kind {
        ContainerKind::Table => {
            let row = dom.create_element_with_class("tr", &[AFFORDANCE_CLASS]);
            let cell = dom.create_element("td");
            dom.set_attribute(&cell, "colspan", "100%");
            dom.append_child(&cell, &icon);
            dom.append_child(&cell, &label);
            dom.append_child(&row, &cell);
            row
        }
        ContainerKind::List => {
            let item = dom.create_element_with_class("li", &[AFFORDANCE_CLASS]);
            dom.append_child(&item, &icon);
            dom.append_child(&item, &label);
            item
        }
    };
    (affordance, icon, label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;

    fn list_with(doc: &mut MemoryDocument, count: usize, attrs: &[(&str, &str)]) -> crate::dom::NodeId {
        let body = doc.body();
        let list = doc.append_element(body, "ul", attrs);
        for i in 0..count {
            doc.append_text_element(list, "li", &[], &format!("item {}", i));
        }
        list
    }

    #[test]
    fn test_trigger_uses_margin() {
        let config = SectionConfig::from(&DisclosureDefaults::default());
        assert_eq!(config.trigger(), 13);
        assert!(config.needs_affordance(14));
        assert!(!config.needs_affordance(13));

        let early = SectionConfig {
            hide_after: Some(5),
            ..config
        };
        assert!(!early.needs_affordance(8));
        assert!(early.needs_affordance(11));
    }

    #[test]
    fn test_malformed_attributes_fall_back() {
        let mut doc = MemoryDocument::new();
        let list = list_with(
            &mut doc,
            0,
            &[("data-display", "lots"), ("data-margin", "-1"), ("data-duration", "fast")],
        );
        let config = SectionConfig::from_attributes(&doc, &list, &DisclosureDefaults::default());
        assert_eq!(config, SectionConfig::from(&DisclosureDefaults::default()));
    }

    #[test]
    fn test_hide_after_overrides_margin() {
        let mut doc = MemoryDocument::new();
        let list = list_with(&mut doc, 0, &[("data-display", "4"), ("data-hide-after", "6")]);
        let config = SectionConfig::from_attributes(&doc, &list, &DisclosureDefaults::default());
        assert_eq!(config.threshold, 4);
        assert_eq!(config.trigger(), 6);
    }

    #[test]
    fn test_list_collapses_tail() {
        let mut doc = MemoryDocument::new();
        let list = list_with(&mut doc, 15, &[("class", "collapsible")]);

        let disclosure = Disclosure::attach(&mut doc, &list, &PageConfig::default()).unwrap();
        assert_eq!(disclosure.kind(), ContainerKind::List);
        assert_eq!(disclosure.tail().len(), 5);

        let children = doc.children(&list);
        assert_eq!(children.len(), 16);
        assert_eq!(children.last(), Some(disclosure.affordance()));
        assert!(!doc.has_class(&children[9], "hidden"));
        assert!(doc.has_class(&children[10], "hidden"));
        assert_eq!(doc.style(children[10], "transition").as_deref(), Some("none"));
        assert_eq!(doc.text_content(disclosure.affordance()), "More");
    }

    #[test]
    fn test_non_container_ignored() {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let div = doc.append_element(body, "div", &[("class", "collapsible")]);
        for _ in 0..20 {
            doc.append_element(div, "p", &[]);
        }
        assert!(Disclosure::attach(&mut doc, &div, &PageConfig::default()).is_none());
    }
}
