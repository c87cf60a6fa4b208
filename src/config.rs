//! Page configuration and data-attribute parsing

use serde::{Deserialize, Serialize};

use crate::error::{UiError, UiResult};

/// Default number of visible rows/items in a collapsed section
pub const DEFAULT_THRESHOLD: usize = 10;
/// Default extra rows tolerated before an affordance is worth adding
pub const DEFAULT_MARGIN: usize = 3;
/// Default transition duration in milliseconds
pub const DEFAULT_DURATION_MS: u32 = 500;

/// Settings for the disclosure controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisclosureDefaults {
    /// Class marking a collapsible table or list
    pub marker_class: String,
    /// Items left visible while collapsed (`data-display`)
    pub threshold: usize,
    /// Hysteresis above the threshold (`data-margin`)
    pub margin: usize,
    /// Show/hide transition (`data-duration`)
    pub duration_ms: u32,
}

impl Default for DisclosureDefaults {
    fn default() -> Self {
        Self {
            marker_class: "collapsible".to_string(),
            threshold: DEFAULT_THRESHOLD,
            margin: DEFAULT_MARGIN,
            duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

/// Settings for field dependencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyDefaults {
    /// Layout wrapper hidden together with its field
    pub group_class: String,
    /// Class added once to every group a rule may hide
    pub hideable_class: String,
    pub duration_ms: u32,
}

impl Default for DependencyDefaults {
    fn default() -> Self {
        Self {
            group_class: "form-group".to_string(),
            hideable_class: "hideable-input".to_string(),
            duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

/// Settings for the sidebar navigation generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidenavDefaults {
    /// Id of the element holding the target list
    pub container_id: String,
    pub marker_class: String,
    pub default_badge_class: String,
}

impl Default for SidenavDefaults {
    fn default() -> Self {
        Self {
            container_id: "sidenav".to_string(),
            marker_class: "section-title".to_string(),
            default_badge_class: "bg-secondary".to_string(),
        }
    }
}

/// Settings for the select-all helper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectAllDefaults {
    pub master_id: String,
    /// Only touch checkboxes in the master's own table. Off by default:
    /// scrolling datatables render the header in a separate table.
    pub scope_to_table: bool,
}

impl Default for SelectAllDefaults {
    fn default() -> Self {
        Self {
            master_id: "toggle-all".to_string(),
            scope_to_table: false,
        }
    }
}

/// Settings for the "created today" highlighter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecencyDefaults {
    pub item_class: String,
    pub today_class: String,
}

impl Default for RecencyDefaults {
    fn default() -> Self {
        Self {
            item_class: "item".to_string(),
            today_class: "today".to_string(),
        }
    }
}

/// Everything a [`Page`](crate::page::Page) needs to know about the host markup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Class that hides an element
    pub hidden_class: String,
    pub disclosure: DisclosureDefaults,
    pub dependency: DependencyDefaults,
    pub sidenav: SidenavDefaults,
    pub select_all: SelectAllDefaults,
    pub recency: RecencyDefaults,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            hidden_class: "hidden".to_string(),
            disclosure: DisclosureDefaults::default(),
            dependency: DependencyDefaults::default(),
            sidenav: SidenavDefaults::default(),
            select_all: SelectAllDefaults::default(),
            recency: RecencyDefaults::default(),
        }
    }
}

impl PageConfig {
    /// Parse a JSON configuration; missing fields keep their defaults
    pub fn from_json(json: &str) -> UiResult<Self> {
        let config: PageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every behavior meaningless
    pub fn validate(&self) -> UiResult<()> {
        let names = [
            ("hidden_class", &self.hidden_class),
            ("disclosure.marker_class", &self.disclosure.marker_class),
            ("dependency.group_class", &self.dependency.group_class),
            ("sidenav.container_id", &self.sidenav.container_id),
            ("sidenav.marker_class", &self.sidenav.marker_class),
            ("select_all.master_id", &self.select_all.master_id),
            ("recency.item_class", &self.recency.item_class),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(UiError::InvalidConfig(format!("{} must not be empty", field)));
            }
        }
        if self.disclosure.threshold == 0 {
            return Err(UiError::InvalidConfig(
                "disclosure.threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the default visible threshold
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.disclosure.threshold = threshold;
        self
    }

    /// Set the default hysteresis margin
    pub fn with_margin(mut self, margin: usize) -> Self {
        self.disclosure.margin = margin;
        self
    }

    /// Set both transition durations
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.disclosure.duration_ms = duration_ms;
        self.dependency.duration_ms = duration_ms;
        self
    }

    /// Use another class to hide elements
    pub fn with_hidden_class(mut self, class: &str) -> Self {
        self.hidden_class = class.to_string();
        self
    }
}

// ========================
// Attribute parsing
// ========================

/// Parse a strictly positive integer attribute
pub fn parse_positive(raw: Option<&str>) -> Option<usize> {
    parse_count(raw).filter(|&n| n > 0)
}

/// Parse a non-negative integer attribute
pub fn parse_count(raw: Option<&str>) -> Option<usize> {
    raw?.trim().parse::<usize>().ok()
}

/// Parse a millisecond duration attribute
pub fn parse_duration(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse::<u32>().ok()
}

/// Split a comma separated attribute into trimmed, non-empty values
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// CSS `transition` value for a duration; zero means instantaneous
pub fn transition_value(duration_ms: u32) -> String {
    if duration_ms == 0 {
        "none".to_string()
    } else {
        format!("all {}ms ease-in-out", duration_ms)
    }
}
