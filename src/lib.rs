//! redpot-ui - progressive-enhancement behaviors for server-rendered admin pages
//!
//! The server renders plain HTML with a few marker classes and data
//! attributes; this crate wires the interactive bits on top:
//! - Collapsible tables and lists ("More"/"Less" disclosure)
//! - Form fields shown, hidden, enabled or disabled by another field
//! - Sidebar navigation built from section markers
//! - A "toggle all" checkbox for data tables
//! - "Created today" highlighting for list items
//!
//! Behaviors are written against the [`dom::Dom`] trait. Tests and the demo
//! binary use the in-memory [`dom::MemoryDocument`]; the `wasm` feature adds a
//! browser backend.
//!
//! ## Example
//! ```rust
//! use redpot_ui::prelude::*;
//!
//! let mut doc = MemoryDocument::new();
//! let body = doc.body();
//! let table = doc.append_element(body, "table", &[("class", "collapsible")]);
//! for i in 0..14 {
//!     let row = doc.append_element(table, "tr", &[]);
//!     doc.append_text_element(row, "td", &[], &format!("Row {}", i));
//! }
//!
//! let mut page = Page::new(doc, PageConfig::default());
//! let report = page.ready();
//! assert_eq!(report.disclosures, 1);
//!
//! // Expand the table
//! let affordance = *page.disclosures()[0].affordance();
//! page.dispatch(Event::Click(affordance));
//! assert_eq!(page.disclosures()[0].state(), ToggleState::Expanded);
//! ```

pub mod config;
pub mod dependency;
pub mod disclosure;
pub mod dom;
pub mod error;
pub mod page;
pub mod recency;
pub mod select_all;
pub mod sidenav;

// Re-export common types
pub mod prelude {
    pub use crate::config::PageConfig;
    pub use crate::dependency::{DependencyRule, Effect, FieldDependency, Predicate};
    pub use crate::disclosure::{Disclosure, SectionConfig, ToggleState};
    pub use crate::dom::{Dom, MemoryDocument, NodeId};
    pub use crate::error::{UiError, UiResult};
    pub use crate::page::{Event, EventKind, Page, ReadyReport};
    pub use crate::recency::{Clock, FixedClock, SystemClock};
    pub use crate::sidenav::{Badge, NavEntry};
}

#[cfg(feature = "wasm")]
pub mod wasm;
