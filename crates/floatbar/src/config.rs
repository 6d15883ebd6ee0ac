//! Toolbar configuration.
//!
//! [`ToolbarOptions`] can be built in code or loaded from JSON or TOML. Keys
//! use camelCase so the same file works for web and native hosts:
//!
//! ```
//! use floatbar::{ToolbarOptions, ToolbarPlacement};
//!
//! let options = ToolbarOptions::from_json_str(r#"{
//!     "placement": "canvas-overlay",
//!     "items": ["bold", { "name": "italic" }],
//!     "wrap": false
//! }"#)?;
//! assert_eq!(options.placement, Some(ToolbarPlacement::CanvasOverlay));
//! assert_eq!(options.item_names(), Some(vec!["bold".to_string(), "italic".to_string()]));
//! assert!(options.flex && !options.wrap);
//! # Ok::<(), floatbar::Error>(())
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use floatbar_core::logging::targets;
use floatbar_core::{Document, NodeId};
use serde::{Deserialize, Serialize};

use crate::catalog::ItemDef;
use crate::error::{Error, Result};
use crate::format_state::FormatState;

/// Where the host mounts the toolbar. Carried for the host; the toolbar
/// itself does not interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolbarPlacement {
    CanvasBody,
    CanvasOverlay,
    ParentDocument,
    CustomContainer,
    ShadowDom,
}

/// A named group of items, for hosts that lay groups out themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarGroup {
    pub name: String,
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// An entry of the `items` allow-list: a bare name or a descriptor with one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemRef {
    Name(String),
    Descriptor {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl ItemRef {
    /// The referenced item name.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Descriptor { name, .. } => name,
        }
    }
}

impl From<&str> for ItemRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ItemRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Hook run after the built-in rendering, on create and after each applied
/// state update. Receives the toolbar root, the rendered items, and the
/// latest snapshot.
pub type CustomRenderer =
    Arc<dyn Fn(&mut Document, NodeId, &[ItemDef], Option<&FormatState>) + Send + Sync>;

/// Toolbar configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolbarOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<ToolbarPlacement>,
    /// Host container selector or id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    pub flex: bool,
    pub wrap: bool,
    pub responsive: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<ToolbarGroup>,
    /// Allow-list of items; `None` or empty renders the whole catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemRef>>,
    #[serde(skip)]
    pub custom_renderer: Option<CustomRenderer>,
}

impl Default for ToolbarOptions {
    fn default() -> Self {
        Self {
            placement: None,
            container: None,
            flex: true,
            wrap: true,
            responsive: true,
            groups: Vec::new(),
            items: None,
            custom_renderer: None,
        }
    }
}

impl fmt::Debug for ToolbarOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolbarOptions")
            .field("placement", &self.placement)
            .field("container", &self.container)
            .field("flex", &self.flex)
            .field("wrap", &self.wrap)
            .field("responsive", &self.responsive)
            .field("groups", &self.groups)
            .field("items", &self.items)
            .field("custom_renderer", &self.custom_renderer.is_some())
            .finish()
    }
}

impl ToolbarOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse options from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load options from a `.json` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("toml") => Self::from_toml_str,
            _ => return Err(Error::UnsupportedFormat(path.to_path_buf())),
        };

        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let options = parse(&content)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), ?options, "loaded toolbar options");
        Ok(options)
    }

    /// The allow-listed item names, or `None` when every item is rendered.
    pub fn item_names(&self) -> Option<Vec<String>> {
        self.items
            .as_ref()
            .filter(|items| !items.is_empty())
            .map(|items| items.iter().map(|item| item.name().to_string()).collect())
    }

    pub fn with_items<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemRef>,
    {
        self.items = Some(items.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_placement(mut self, placement: ToolbarPlacement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    pub fn with_flex(mut self, flex: bool) -> Self {
        self.flex = flex;
        self
    }

    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    pub fn with_group(mut self, group: ToolbarGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_custom_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&mut Document, NodeId, &[ItemDef], Option<&FormatState>) + Send + Sync + 'static,
    {
        self.custom_renderer = Some(Arc::new(renderer));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ToolbarOptions::default();
        assert!(options.flex && options.wrap && options.responsive);
        assert_eq!(options.item_names(), None);

        let parsed = ToolbarOptions::from_json_str("{}").unwrap();
        assert!(parsed.flex && parsed.wrap && parsed.responsive);
    }

    #[test]
    fn test_empty_items_means_all() {
        let options = ToolbarOptions::new().with_items(Vec::<String>::new());
        assert_eq!(options.item_names(), None);
    }

    #[test]
    fn test_toml_groups_and_placement() {
        let options = ToolbarOptions::from_toml_str(
            r#"
            placement = "shadow-dom"
            responsive = false
            items = ["bold", "italic"]

            [[groups]]
            name = "inline"
            items = ["bold", "italic"]
            label = "Inline"
            "#,
        )
        .unwrap();
        assert_eq!(options.placement, Some(ToolbarPlacement::ShadowDom));
        assert!(!options.responsive);
        assert_eq!(options.groups.len(), 1);
        assert_eq!(options.groups[0].label.as_deref(), Some("Inline"));
    }

    #[test]
    fn test_bad_placement_rejected() {
        let err = ToolbarOptions::from_json_str(r#"{"placement": "floating"}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = ToolbarOptions::load("toolbar.yaml").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_serialize_round_trip_skips_renderer() {
        let options = ToolbarOptions::new()
            .with_items(["bold"])
            .with_custom_renderer(|_, _, _, _| {});
        let json = serde_json::to_string(&options).unwrap();
        assert!(!json.contains("customRenderer"));
        let back = ToolbarOptions::from_json_str(&json).unwrap();
        assert_eq!(back.item_names(), Some(vec!["bold".to_string()]));
        assert!(back.custom_renderer.is_none());
    }
}
