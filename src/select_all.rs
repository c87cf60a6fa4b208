//! "Toggle all" checkbox for data tables

use log::{debug, trace};

use crate::config::SelectAllDefaults;
use crate::dom::Dom;

/// The master checkbox and the id fragment that excludes it
#[derive(Debug, Clone)]
pub struct SelectAll<N> {
    master: N,
    master_id: String,
    scope_to_table: bool,
}

impl<N: Clone + PartialEq + std::fmt::Debug> SelectAll<N> {
    /// Find the master checkbox; `None` when the page has none
    pub fn attach<D: Dom<Node = N>>(dom: &D, config: &SelectAllDefaults) -> Option<Self> {
        let Some(master) = dom.element_by_id(&config.master_id) else {
            trace!("select-all: no #{} on page", config.master_id);
            return None;
        };
        debug!("select-all: wired #{}", config.master_id);
        Some(Self {
            master,
            master_id: config.master_id.clone(),
            scope_to_table: config.scope_to_table,
        })
    }

    /// Copy the master's checked state to every other checkbox on the page,
    /// or in the master's table when scoped. Returns how many boxes changed.
    pub fn on_click<D: Dom<Node = N>>(&self, dom: &mut D) -> usize {
        let checked = dom.is_checked(&self.master);
        let inputs: Vec<N> = if self.scope_to_table {
            dom.descendants_by_tag(&enclosing_table(&*dom, &self.master), "input")
        } else {
            dom.all_elements()
                .into_iter()
                .filter(|node| dom.tag_name(node) == "input")
                .collect()
        };
        let boxes: Vec<N> = inputs
            .into_iter()
            .filter(|input| dom.input_type(input) == "checkbox")
            .filter(|input| {
                !dom.attribute(input, "id")
                    .map(|id| id.contains(&self.master_id))
                    .unwrap_or(false)
            })
            .collect();

        let mut changed = 0;
        for checkbox in &boxes {
            if dom.is_checked(checkbox) != checked {
                dom.set_checked(checkbox, checked);
                changed += 1;
            }
        }
        trace!("select-all: set {} of {} boxes to {}", changed, boxes.len(), checked);
        changed
    }

    pub fn master(&self) -> &N {
        &self.master
    }
}

/// Enclosing table of the master box, else the outermost ancestor
fn enclosing_table<D: Dom>(dom: &D, node: &D::Node) -> D::Node {
    let mut current = node.clone();
    while let Some(parent) = dom.parent(&current) {
        if dom.tag_name(&parent) == "table" {
            return parent;
        }
        current = parent;
    }
    current
}
