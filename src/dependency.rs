//! Field dependency toggler - form fields driven by another field's value
//!
//! Each [`DependencyRule`] pairs one controller input with the fields it
//! governs. A rule is evaluated once when attached, without a transition, so
//! the first paint already matches the controller, and again on every change.

use log::{debug, trace};

use crate::config::{parse_list, transition_value, PageConfig};
use crate::dom::Dom;

/// Attribute naming the controller id on a dependent field
pub const DEPENDS_ON_ATTR: &str = "data-depends-on";
/// Comma separated "on" values for select/text controllers
pub const DEPENDS_VALUE_ATTR: &str = "data-depends-value";
/// `reveal` (default) or `enable`
pub const DEPENDS_EFFECT_ATTR: &str = "data-depends-effect";
/// Present when an enabled field should copy the controller's checked state
pub const DEPENDS_MIRROR_ATTR: &str = "data-depends-mirror";

/// When a controller counts as "on"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Checkbox and radio controllers: the `checked` property
    Checked,
    /// Select and text controllers: the value is one of these
    ValueIn(Vec<String>),
    /// Select and text controllers without explicit values: any value
    NonEmpty,
}

impl Predicate {
    /// The predicate for a controller element: `Checked` for checkboxes and
    /// radios, value membership for everything else
    pub fn for_controller<D: Dom>(dom: &D, controller: &D::Node, values: Option<Vec<String>>) -> Self {
        if is_checkable(dom, controller) {
            return Self::Checked;
        }
        match values {
            Some(values) if !values.is_empty() => Self::ValueIn(values),
            _ => Self::NonEmpty,
        }
    }

    pub fn matches<D: Dom>(&self, dom: &D, controller: &D::Node) -> bool {
        match self {
            Self::Checked => dom.is_checked(controller),
            Self::ValueIn(values) => {
                let value = dom.value(controller);
                values.iter().any(|v| *v == value)
            }
            Self::NonEmpty => !dom.value(controller).trim().is_empty(),
        }
    }
}

/// What a rule does to one dependent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Effect {
    /// Show the dependent's layout group when on, hide it when off
    #[default]
    Reveal,
    /// Enable the dependent control when on, disable it when off.
    /// With `mirror`, a click on the controller also copies its checked
    /// state onto the dependent.
    Enable { mirror: bool },
}

/// Unwired description of a controller and its dependents
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyRule<N> {
    pub controller: N,
    /// `None` picks the predicate from the controller's field type
    pub predicate: Option<Predicate>,
    /// Dependent fields in document order, each with its own effect
    pub dependents: Vec<(N, Effect)>,
    /// Overrides the page-level transition duration
    pub duration_ms: Option<u32>,
}

impl<N: Clone + PartialEq + std::fmt::Debug> DependencyRule<N> {
    pub fn new(controller: N) -> Self {
        Self {
            controller,
            predicate: None,
            dependents: Vec::new(),
            duration_ms: None,
        }
    }

    /// On while the controller is checked
    pub fn when_checked(mut self) -> Self {
        self.predicate = Some(Predicate::Checked);
        self
    }

    /// On while the controller's value is one of `values`
    pub fn when_value_in<S: AsRef<str>>(mut self, values: &[S]) -> Self {
        let values = values.iter().map(|v| v.as_ref().to_string()).collect();
        self.predicate = Some(Predicate::ValueIn(values));
        self
    }

    /// Reveal the group around `field` while on
    pub fn reveal(mut self, field: N) -> Self {
        self.dependents.push((field, Effect::Reveal));
        self
    }

    /// Enable `field` while on
    pub fn enable(mut self, field: N) -> Self {
        self.dependents.push((field, Effect::Enable { mirror: false }));
        self
    }

    /// Copy the controller's checked state on click onto every field
    /// enabled so far. Revealed dependents are unaffected.
    pub fn mirror_checked(mut self) -> Self {
        for (_, effect) in &mut self.dependents {
            if let Effect::Enable { mirror } = effect {
                *mirror = true;
            }
        }
        self
    }

    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

/// A wired dependency rule
#[derive(Debug, Clone)]
pub struct FieldDependency<N> {
    controller: N,
    /// Elements whose `change` re-evaluates the rule: the controller, plus
    /// the rest of its group for radio buttons
    triggers: Vec<N>,
    predicate: Predicate,
    /// Layout groups for `Reveal`, the fields themselves for `Enable`
    targets: Vec<(N, Effect)>,
    duration_ms: u32,
    hidden_class: String,
    on: bool,
}

impl<N: Clone + PartialEq + std::fmt::Debug> FieldDependency<N> {
    /// Resolve targets and apply the controller's current state at once
    pub fn attach<D: Dom<Node = N>>(dom: &mut D, rule: DependencyRule<N>, page: &PageConfig) -> Self {
        let predicate = match rule.predicate {
            Some(predicate) => predicate,
            None => Predicate::for_controller(&*dom, &rule.controller, None),
        };

        let mut targets: Vec<(N, Effect)> = Vec::with_capacity(rule.dependents.len());
        for (field, effect) in &rule.dependents {
            let target = match effect {
                Effect::Reveal => {
                    let group = dom
                        .closest_with_class(field, &page.dependency.group_class)
                        .unwrap_or_else(|| field.clone());
                    dom.add_class(&group, &page.dependency.hideable_class);
                    group
                }
                Effect::Enable { .. } => field.clone(),
            };
            if !targets.iter().any(|(existing, _)| *existing == target) {
                targets.push((target, *effect));
            }
        }

        let mut dependency = Self {
            triggers: radio_group(&*dom, &rule.controller),
            controller: rule.controller,
            predicate,
            targets,
            duration_ms: rule.duration_ms.unwrap_or(page.dependency.duration_ms),
            hidden_class: page.hidden_class.clone(),
            on: false,
        };
        dependency.apply(dom, false);
        debug!(
            "dependency: wired {:?} ({:?}) to {} targets, {} triggers, initially {}",
            dependency.controller,
            dependency.predicate,
            dependency.targets.len(),
            dependency.triggers.len(),
            if dependency.on { "on" } else { "off" }
        );
        dependency
    }

    /// Evaluate the predicate against the controller's current state
    pub fn evaluate<D: Dom<Node = N>>(&self, dom: &D) -> bool {
        self.predicate.matches(dom, &self.controller)
    }

    /// Recompute and write dependent state
    pub fn apply<D: Dom<Node = N>>(&mut self, dom: &mut D, animate: bool) {
        self.on = self.evaluate(&*dom);
        let transition = transition_value(if animate { self.duration_ms } else { 0 });
        for (target, effect) in &self.targets {
            match effect {
                Effect::Reveal => {
                    dom.set_style(target, "transition", &transition);
                    dom.toggle_class(target, &self.hidden_class, !self.on);
                }
                Effect::Enable { .. } => dom.set_disabled(target, !self.on),
            }
        }
    }

    /// `change` on the controller or, for radios, on any button of its group
    pub fn on_change<D: Dom<Node = N>>(&mut self, dom: &mut D) {
        trace!("dependency: change on {:?}", self.controller);
        self.apply(dom, true);
    }

    /// Controller `click` event; only mirroring targets react
    pub fn on_click<D: Dom<Node = N>>(&mut self, dom: &mut D) {
        if !self.mirrors() {
            return;
        }
        let checked = dom.is_checked(&self.controller);
        for (field, effect) in &self.targets {
            if matches!(effect, Effect::Enable { mirror: true }) {
                dom.set_checked(field, checked);
            }
        }
        trace!("dependency: mirrored checked={} from {:?}", checked, self.controller);
        self.apply(dom, true);
    }

    /// Whether any target copies the controller's checked state
    pub fn mirrors(&self) -> bool {
        self.targets
            .iter()
            .any(|(_, effect)| matches!(effect, Effect::Enable { mirror: true }))
    }

    /// Whether a `change` on `node` re-evaluates this rule
    pub fn reacts_to(&self, node: &N) -> bool {
        self.triggers.contains(node)
    }

    pub fn controller(&self) -> &N {
        &self.controller
    }

    pub fn triggers(&self) -> &[N] {
        &self.triggers
    }

    pub fn targets(&self) -> Vec<N> {
        self.targets.iter().map(|(target, _)| target.clone()).collect()
    }

    /// Effect applied to a resolved target
    pub fn effect_on(&self, target: &N) -> Option<Effect> {
        self.targets
            .iter()
            .find(|(existing, _)| existing == target)
            .map(|(_, effect)| *effect)
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Result of the last evaluation
    pub fn is_on(&self) -> bool {
        self.on
    }
}

/// The controller plus every radio sharing its `name` within the same form.
/// Browsers only fire `change` on the newly checked radio.
fn radio_group<D: Dom>(dom: &D, controller: &D::Node) -> Vec<D::Node> {
    let name = match dom.attribute(controller, "name") {
        Some(name) if dom.input_type(controller) == "radio" && !name.is_empty() => name,
        _ => return vec![controller.clone()],
    };
    let form = enclosing_form(dom, controller);

    let mut group = vec![controller.clone()];
    for input in dom.all_elements() {
        if input != *controller
            && dom.input_type(&input) == "radio"
            && dom.attribute(&input, "name").as_deref() == Some(name.as_str())
            && enclosing_form(dom, &input) == form
        {
            group.push(input);
        }
    }
    group
}

fn enclosing_form<D: Dom>(dom: &D, node: &D::Node) -> Option<D::Node> {
    let mut current = dom.parent(node);
    while let Some(parent) = current {
        if dom.tag_name(&parent) == "form" {
            return Some(parent);
        }
        current = dom.parent(&parent);
    }
    None
}

// ========================
// Marker scanning
// ========================

/// Build rules from `data-depends-*` markers, in document order.
///
/// Dependents naming the same controller with the same values share one
/// rule; each keeps its own effect. Dependents whose controller id is missing are skipped.
pub fn scan_rules<D: Dom>(dom: &D) -> Vec<DependencyRule<D::Node>> {
    let mut keys: Vec<(String, Option<Vec<String>>)> = Vec::new();
    let mut rules: Vec<DependencyRule<D::Node>> = Vec::new();

    for field in dom.all_elements() {
        let Some(controller_id) = dom.attribute(&field, DEPENDS_ON_ATTR) else {
            continue;
        };
        let controller_id = controller_id.trim().to_string();
        let Some(controller) = dom.element_by_id(&controller_id) else {
            debug!("dependency: controller #{} not found, skipping {:?}", controller_id, field);
            continue;
        };

        let values = dom
            .attribute(&field, DEPENDS_VALUE_ATTR)
            .map(|raw| parse_list(&raw));
        let effect = match dom.attribute(&field, DEPENDS_EFFECT_ATTR).as_deref().map(str::trim) {
            Some("enable") => Effect::Enable {
                mirror: dom.attribute(&field, DEPENDS_MIRROR_ATTR).is_some(),
            },
            _ => Effect::Reveal,
        };

        let key = (controller_id, values);
        match keys.iter().position(|existing| *existing == key) {
            Some(index) => rules[index].dependents.push((field, effect)),
            None => {
                let predicate = Predicate::for_controller(dom, &controller, key.1.clone());
                rules.push(DependencyRule {
                    controller,
                    predicate: Some(predicate),
                    dependents: vec![(field, effect)],
                    duration_ms: None,
                });
                keys.push(key);
            }
        }
    }
    rules
}

fn is_checkable<D: Dom>(dom: &D, node: &D::Node) -> bool {
    matches!(dom.input_type(node).as_str(), "checkbox" | "radio")
}
