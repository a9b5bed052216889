//! Predicate construction for list screens.
//!
//! A [`FilterSpec`] is what a screen holds in its state: the text typed into
//! the search bar and the key of the selected filter chip. [`Predicate`] is the
//! compiled form used while projecting a snapshot.

use std::{borrow::Cow, fmt::Debug, hash::Hash};

use serde::{Deserialize, Serialize};

/// Sentinel chip key that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// A closed set of classification values (statuses, resource categories...).
pub trait CategoryKind: Copy + Eq + Hash + Debug + 'static {
    /// Every value, in chip display order.
    const ALL: &'static [Self];

    /// Stable string key, as stored in records and filter chips.
    fn key(self) -> &'static str;

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }
}

/// Records that take part in free-text search.
pub trait Searchable {
    /// Fields matched against the search text, in no particular order.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;
}

/// Records that carry a classification used by filter chips.
pub trait Categorized {
    type Category: CategoryKind;

    fn category(&self) -> Self::Category;
}

/// User-entered filter state of a list screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub search_text: String,
    pub active_category: String,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            active_category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl FilterSpec {
    pub fn new(search_text: impl Into<String>, active_category: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            active_category: active_category.into(),
        }
    }

    pub fn search(search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            ..Self::default()
        }
    }

    pub fn category(active_category: impl Into<String>) -> Self {
        Self {
            active_category: active_category.into(),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = search_text.into();
        self
    }
}

/// The parsed form of [`FilterSpec::active_category`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveCategory<C> {
    All,
    Only(C),
    /// A key outside the category set. Matches nothing.
    Unknown(String),
}

impl<C: CategoryKind> ActiveCategory<C> {
    pub fn parse(key: &str) -> Self {
        if key == ALL_CATEGORIES {
            return ActiveCategory::All;
        }
        match C::from_key(key) {
            Some(category) => ActiveCategory::Only(category),
            None => ActiveCategory::Unknown(key.to_string()),
        }
    }

    pub fn accepts(&self, category: C) -> bool {
        match self {
            ActiveCategory::All => true,
            ActiveCategory::Only(selected) => *selected == category,
            ActiveCategory::Unknown(_) => false,
        }
    }
}

/// Compiled text + category predicate.
///
/// A record is included iff both halves match.
#[derive(Debug, Clone)]
pub struct Predicate<C> {
    needle: String,
    active: ActiveCategory<C>,
}

impl<C: CategoryKind> Predicate<C> {
    pub fn from_spec(spec: &FilterSpec) -> Self {
        Self {
            needle: spec.search_text.to_lowercase(),
            active: ActiveCategory::parse(&spec.active_category),
        }
    }

    pub fn active_category(&self) -> &ActiveCategory<C> {
        &self.active
    }

    /// Case-insensitive substring match over the record's searchable fields.
    pub fn matches_text<T: Searchable + ?Sized>(&self, record: &T) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }

    pub fn matches_category<T>(&self, record: &T) -> bool
    where
        T: Categorized<Category = C> + ?Sized,
    {
        self.active.accepts(record.category())
    }

    pub fn matches<T>(&self, record: &T) -> bool
    where
        T: Searchable + Categorized<Category = C> + ?Sized,
    {
        self.matches_text(record) && self.matches_category(record)
    }
}
