//! Page runtime - owns the document and every wired behavior
//!
//! `ready()` plays the part of the document-ready handler and `dispatch()`
//! the part of the browser's event delivery. Each matched element gets its own
//! component instance; no state is shared between instances.

use log::{debug, info};
use serde::Serialize;

use crate::config::PageConfig;
use crate::dependency::{scan_rules, DependencyRule, FieldDependency};
use crate::disclosure::Disclosure;
use crate::dom::Dom;
use crate::recency::{highlight_recent, Clock, SystemClock};
use crate::select_all::SelectAll;
use crate::sidenav;

/// DOM event types the page listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventKind {
    Click,
    Change,
}

/// A user event aimed at an element
#[derive(Debug, Clone, PartialEq)]
pub enum Event<N> {
    Click(N),
    Change(N),
}

impl<N> Event<N> {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click(_) => EventKind::Click,
            Self::Change(_) => EventKind::Change,
        }
    }

    pub fn target(&self) -> &N {
        match self {
            Self::Click(node) | Self::Change(node) => node,
        }
    }
}

/// What `ready()` wired
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReadyReport {
    pub disclosures: usize,
    pub dependencies: usize,
    pub nav_entries: usize,
    pub highlighted: usize,
    pub select_all: bool,
}

/// A document plus the behaviors attached to it
pub struct Page<D: Dom, C: Clock = SystemClock> {
    dom: D,
    config: PageConfig,
    clock: C,
    disclosures: Vec<Disclosure<D::Node>>,
    dependencies: Vec<FieldDependency<D::Node>>,
    select_all: Option<SelectAll<D::Node>>,
    report: Option<ReadyReport>,
}

impl<D: Dom> Page<D, SystemClock> {
    /// Create a page using the local wall clock
    pub fn new(dom: D, config: PageConfig) -> Self {
        Self::with_clock(dom, config, SystemClock)
    }
}

impl<D: Dom, C: Clock> Page<D, C> {
    pub fn with_clock(dom: D, config: PageConfig, clock: C) -> Self {
        Self {
            dom,
            config,
            clock,
            disclosures: Vec::new(),
            dependencies: Vec::new(),
            select_all: None,
            report: None,
        }
    }

    /// Scan the document and wire every behavior.
    ///
    /// Runs once; later calls return the first report without touching the
    /// document.
    pub fn ready(&mut self) -> ReadyReport {
        if let Some(report) = self.report {
            debug!("page: ready() already ran");
            return report;
        }

        for container in self.dom.elements_by_class(&self.config.disclosure.marker_class) {
            if let Some(disclosure) = Disclosure::attach(&mut self.dom, &container, &self.config) {
                self.disclosures.push(disclosure);
            }
        }

        for rule in scan_rules(&self.dom) {
            self.add_rule(rule);
        }

        self.select_all = SelectAll::attach(&self.dom, &self.config.select_all);
        let nav_entries = sidenav::generate(&mut self.dom, &self.config.sidenav);
        let highlighted = highlight_recent(&mut self.dom, &self.config.recency, &self.clock);

        let report = ReadyReport {
            disclosures: self.disclosures.len(),
            dependencies: self.dependencies.len(),
            nav_entries,
            highlighted,
            select_all: self.select_all.is_some(),
        };
        info!(
            "page ready: {} disclosures, {} dependency rules, {} nav entries, {} recent items, select-all {}",
            report.disclosures,
            report.dependencies,
            report.nav_entries,
            report.highlighted,
            if report.select_all { "on" } else { "off" }
        );
        self.report = Some(report);
        report
    }

    /// Wire a rule built in code; its initial state is applied immediately
    pub fn add_rule(&mut self, rule: DependencyRule<D::Node>) -> &FieldDependency<D::Node> {
        let dependency = FieldDependency::attach(&mut self.dom, rule, &self.config);
        self.dependencies.push(dependency);
        &self.dependencies[self.dependencies.len() - 1]
    }

    /// Deliver an event, bubbling from the target through its ancestors.
    /// Returns the number of handlers that ran.
    pub fn dispatch(&mut self, event: Event<D::Node>) -> usize {
        let mut path = vec![event.target().clone()];
        while let Some(parent) = path.last().and_then(|node| self.dom.parent(node)) {
            path.push(parent);
        }

        let kind = event.kind();
        path.into_iter()
            .map(|node| match kind {
                EventKind::Click => self.deliver(Event::Click(node)),
                EventKind::Change => self.deliver(Event::Change(node)),
            })
            .sum()
    }

    /// Run the handlers registered on exactly the event's target.
    ///
    /// Live backends call this from per-element listeners, since the browser
    /// already does the bubbling.
    pub fn deliver(&mut self, event: Event<D::Node>) -> usize {
        let mut handled = 0;
        match event {
            Event::Click(node) => {
                for disclosure in self.disclosures.iter_mut().filter(|d| *d.affordance() == node) {
                    disclosure.toggle(&mut self.dom);
                    handled += 1;
                }
                for dependency in self
                    .dependencies
                    .iter_mut()
                    .filter(|d| d.mirrors() && *d.controller() == node)
                {
                    dependency.on_click(&mut self.dom);
                    handled += 1;
                }
                if let Some(select_all) = self.select_all.as_ref().filter(|s| *s.master() == node) {
                    select_all.on_click(&mut self.dom);
                    handled += 1;
                }
            }
            Event::Change(node) => {
                for dependency in self.dependencies.iter_mut().filter(|d| d.reacts_to(&node)) {
                    dependency.on_change(&mut self.dom);
                    handled += 1;
                }
            }
        }
        handled
    }

    /// Elements a live backend must subscribe to, without duplicates
    pub fn listeners(&self) -> Vec<(D::Node, EventKind)> {
        let mut out: Vec<(D::Node, EventKind)> = Vec::new();
        let mut push = |node: &D::Node, kind: EventKind| {
            if !out.iter().any(|(n, k)| n == node && *k == kind) {
                out.push((node.clone(), kind));
            }
        };
        for disclosure in &self.disclosures {
            push(disclosure.affordance(), EventKind::Click);
        }
        for dependency in &self.dependencies {
            for trigger in dependency.triggers() {
                push(trigger, EventKind::Change);
            }
            if dependency.mirrors() {
                push(dependency.controller(), EventKind::Click);
            }
        }
        if let Some(select_all) = &self.select_all {
            push(select_all.master(), EventKind::Click);
        }
        out
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Mutable access for the host, e.g. to change a field before an event
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn into_dom(self) -> D {
        self.dom
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn disclosures(&self) -> &[Disclosure<D::Node>] {
        &self.disclosures
    }

    pub fn dependencies(&self) -> &[FieldDependency<D::Node>] {
        &self.dependencies
    }

    pub fn select_all(&self) -> Option<&SelectAll<D::Node>> {
        self.select_all.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.report.is_some()
    }
}
