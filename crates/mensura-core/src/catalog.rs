//! The unit catalog and suggestion filter.

use std::sync::Arc;

use mensura_units::UnitSystem;
use serde::Serialize;
use tracing::info;

use crate::error::CatalogError;
use crate::names::to_display_form;

/// Maximum number of suggestions returned by [`UnitCatalog::suggest`].
pub const MAX_SUGGESTIONS: usize = 10;

/// Display sentinel returned when no unit matches.
pub const NO_UNITS_FOUND: &str = "No units found";

/// Sorted, deduplicated display names of every unit the registry defines.
///
/// Built once at startup and shared read-only; cloning is cheap.
///
/// # Example
///
/// ```
/// use mensura_core::UnitCatalog;
/// use mensura_units::UnitRegistry;
///
/// let registry = UnitRegistry::new().unwrap();
/// let catalog = UnitCatalog::from_system(&registry).unwrap();
///
/// assert!(catalog.contains("nautical mile"));
/// assert!(catalog.suggest(Some("nautical")).names().contains(&"nautical mile"));
/// ```
#[derive(Debug, Clone)]
pub struct UnitCatalog {
    names: Arc<[String]>,
}

impl UnitCatalog {
    /// Lists every unit of `system` in display form.
    ///
    /// Fails when the system defines no units.
    pub fn from_system(system: &dyn UnitSystem) -> Result<Self, CatalogError> {
        Self::from_names(system.unit_names())
    }

    /// Builds a catalog from registry-form names.
    pub fn from_names(names: impl IntoIterator<Item = String>) -> Result<Self, CatalogError> {
        let mut names: Vec<String> = names.into_iter().map(|n| to_display_form(&n)).collect();
        names.sort();
        names.dedup();

        if names.is_empty() {
            return Err(CatalogError::Empty);
        }

        info!(units = names.len(), "Unit catalog built");
        Ok(Self {
            names: names.into(),
        })
    }

    /// Every name, in catalog order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false`: construction rejects empty catalogs.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns `true` when `name` (display form) is in the catalog.
    pub fn contains(&self, name: &str) -> bool {
        self.names.binary_search_by(|n| n.as_str().cmp(name)).is_ok()
    }

    /// Suggests units for a partial name.
    ///
    /// An empty or absent query returns the first [`MAX_SUGGESTIONS`] names.
    /// Otherwise names containing `query` (case-sensitive) are returned in
    /// catalog order, truncated to [`MAX_SUGGESTIONS`].
    pub fn suggest(&self, query: Option<&str>) -> Suggestions<'_> {
        let matches: Vec<&str> = match query.filter(|q| !q.is_empty()) {
            None => self
                .names
                .iter()
                .take(MAX_SUGGESTIONS)
                .map(String::as_str)
                .collect(),
            Some(query) => self
                .names
                .iter()
                .filter(|name| name.contains(query))
                .take(MAX_SUGGESTIONS)
                .map(String::as_str)
                .collect(),
        };

        if matches.is_empty() {
            Suggestions::NoMatches
        } else {
            Suggestions::Matches(matches)
        }
    }
}

/// Result of [`UnitCatalog::suggest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestions<'a> {
    /// Between one and [`MAX_SUGGESTIONS`] names, in catalog order.
    Matches(Vec<&'a str>),
    /// Nothing matched.
    NoMatches,
}

impl<'a> Suggestions<'a> {
    /// The names to display: the matches, or `["No units found"]`.
    pub fn names(&self) -> Vec<&'a str> {
        match self {
            Self::Matches(names) => names.clone(),
            Self::NoMatches => vec![NO_UNITS_FOUND],
        }
    }

    /// Returns `true` when nothing matched.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoMatches)
    }
}

impl Serialize for Suggestions<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.names().serialize(serializer)
    }
}
