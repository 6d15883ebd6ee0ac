//! The item catalog: the ordered set of controls a toolbar can render.
//!
//! A catalog is plain data. The toolbar resolves it against the configured
//! allow-list once, at create time:
//!
//! ```
//! use floatbar::ItemCatalog;
//!
//! let catalog = ItemCatalog::standard();
//! let names: Vec<&str> = catalog
//!     .resolve(Some(&["link".to_string(), "bold".to_string()]))
//!     .iter()
//!     .map(|item| item.name.as_str())
//!     .collect();
//! assert_eq!(names, ["link", "bold"]);
//! ```

mod item;
mod standard;

pub use item::{ActivePredicate, ItemDef, ItemKind, SelectOption, ValueGetter};
pub use standard::{DEFAULT_COLORS, DEFAULT_FONTS};

use floatbar_core::logging::targets;

/// An ordered, append-only list of item definitions.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<ItemDef>,
}

impl ItemCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in controls in their default order.
    pub fn standard() -> Self {
        Self {
            items: standard::standard_items(),
        }
    }

    /// Append an item. An item whose name is already taken replaces the
    /// earlier definition in place.
    pub fn push(&mut self, item: ItemDef) {
        match self.items.iter_mut().find(|existing| existing.name == item.name) {
            Some(existing) => {
                tracing::debug!(target: targets::TOOLBAR, name = %item.name, "replacing catalog item");
                *existing = item;
            }
            None => self.items.push(item),
        }
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, item: ItemDef) -> Self {
        self.push(item);
        self
    }

    /// Look an item up by name.
    pub fn get(&self, name: &str) -> Option<&ItemDef> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Iterate in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemDef> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The items to instantiate for an allow-list.
    ///
    /// With no allow-list (or an empty one) every item is returned in catalog
    /// order. Otherwise the named items are returned in allow-list order;
    /// unknown names are skipped and repeated names count once.
    pub fn resolve(&self, allow: Option<&[String]>) -> Vec<&ItemDef> {
        let Some(allow) = allow.filter(|names| !names.is_empty()) else {
            return self.items.iter().collect();
        };

        let mut resolved: Vec<&ItemDef> = Vec::with_capacity(allow.len());
        for name in allow {
            if resolved.iter().any(|item| &item.name == name) {
                continue;
            }
            match self.get(name) {
                Some(item) => resolved.push(item),
                None => {
                    tracing::warn!(target: targets::TOOLBAR, %name, "unknown toolbar item, skipping");
                }
            }
        }
        resolved
    }
}

impl<'a> IntoIterator for &'a ItemCatalog {
    type Item = &'a ItemDef;
    type IntoIter = std::slice::Iter<'a, ItemDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
