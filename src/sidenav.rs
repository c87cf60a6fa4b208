//! Sidebar navigation generated from section markers
//!
//! Every `.section-title` marker becomes one link in the sidebar list, in
//! document order. Duplicate marker ids are passed through unchanged.

use log::debug;

use crate::config::SidenavDefaults;
use crate::dom::{is_heading, Dom};

pub const TITLE_ATTR: &str = "data-title";
pub const BADGE_TEXT_ATTR: &str = "data-badge-text";
pub const BADGE_CLASS_ATTR: &str = "data-badge-class";
const ENTRY_CLASSES: [&str; 2] = ["list-group-item", "list-group-item-action"];
const BADGE_CLASSES: [&str; 3] = ["badge", "rounded-pill", "ms-1"];

/// Small pill shown after an entry's title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub class: String,
}

/// One sidebar link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub href: String,
    pub title: String,
    pub badge: Option<Badge>,
}

/// Derive one entry per marker, in document order
pub fn collect_entries<D: Dom>(dom: &D, config: &SidenavDefaults) -> Vec<NavEntry> {
    let all = dom.all_elements();
    dom.elements_by_class(&config.marker_class)
        .into_iter()
        .map(|marker| {
            let id = dom.attribute(&marker, "id").unwrap_or_default();
            let title = derive_title(dom, &all, &marker, &config.marker_class).unwrap_or_else(|| id.clone());
            let badge = dom
                .attribute(&marker, BADGE_TEXT_ATTR)
                .filter(|text| !text.trim().is_empty())
                .map(|text| Badge {
                    text,
                    class: dom
                        .attribute(&marker, BADGE_CLASS_ATTR)
                        .filter(|class| !class.trim().is_empty())
                        .unwrap_or_else(|| config.default_badge_class.clone()),
                });
            NavEntry {
                href: format!("#{}", id),
                title,
                badge,
            }
        })
        .collect()
}

/// Title override, else the heading following the marker (before the next
/// marker), else the marker's own text
fn derive_title<D: Dom>(dom: &D, all: &[D::Node], marker: &D::Node, marker_class: &str) -> Option<String> {
    if let Some(title) = dom.attribute(marker, TITLE_ATTR) {
        let title = title.trim();
        if !title.is_empty() {
            return Some(title.to_string());
        }
    }

    let position = all.iter().position(|node| node == marker)?;
    let heading = all[position + 1..]
        .iter()
        .take_while(|node| !dom.has_class(node, marker_class))
        .filter(|node| is_heading(&dom.tag_name(node)))
        .map(|heading| dom.text_content(heading).trim().to_string())
        .find(|text| !text.is_empty());
    if heading.is_some() {
        return heading;
    }

    let own = dom.text_content(marker);
    let own = own.trim();
    (!own.is_empty()).then(|| own.to_string())
}

/// Append entries as links under `list`
pub fn render_entries<D: Dom>(dom: &mut D, list: &D::Node, entries: &[NavEntry]) {
    for entry in entries {
        let link = dom.create_element_with_class("a", &ENTRY_CLASSES);
        dom.set_attribute(&link, "href", &entry.href);
        dom.append_text(&link, &entry.title);
        if let Some(badge) = &entry.badge {
            let pill = dom.create_element_with_class("span", &BADGE_CLASSES);
            for class in badge.class.split_whitespace() {
                dom.add_class(&pill, class);
            }
            dom.append_text(&pill, &badge.text);
            dom.append_child(&link, &pill);
        }
        dom.append_child(list, &link);
    }
}

/// First `ul` inside the sidebar container
pub fn target_list<D: Dom>(dom: &D, config: &SidenavDefaults) -> Option<D::Node> {
    let container = dom.element_by_id(&config.container_id)?;
    dom.descendants_by_tag(&container, "ul").into_iter().next()
}

/// Fill the sidebar; returns the number of entries added
pub fn generate<D: Dom>(dom: &mut D, config: &SidenavDefaults) -> usize {
    let Some(list) = target_list(&*dom, config) else {
        debug!("sidenav: no list under #{}, skipping", config.container_id);
        return 0;
    };
    let entries = collect_entries(&*dom, config);
    render_entries(dom, &list, &entries);
    debug!("sidenav: added {} entries", entries.len());
    entries.len()
}
