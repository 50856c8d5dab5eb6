//! Search contract shared by every aggregate repository.
//!
//! A search is a (page, per_page, free-text filter, sort field, direction)
//! query answered with one page of items plus the total number of matches.
//! Filtering, sort resolution and paging rules live here once so every
//! aggregate type and every adapter honors them identically.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use uuid::Uuid;

use super::{DomainError, Timestamp, ValidationError};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchOrder {
    #[default]
    Asc,
    Desc,
}

impl SearchOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SearchOrder::Asc => "ASC",
            SearchOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SearchOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SearchOrder::Asc),
            "desc" => Ok(SearchOrder::Desc),
            other => Err(ValidationError::invalid_format(
                "dir",
                format!("expected 'asc' or 'desc', got '{}'", other),
            )),
        }
    }
}

/// A validated search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchInput {
    page: u32,
    per_page: u32,
    search: String,
    order_by: String,
    order: SearchOrder,
}

impl SearchInput {
    pub const DEFAULT_PER_PAGE: u32 = 15;

    /// Creates a query.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if `page` is 0 or `per_page` is 0
    pub fn new(
        page: u32,
        per_page: u32,
        search: impl Into<String>,
        order_by: impl Into<String>,
        order: SearchOrder,
    ) -> Result<Self, DomainError> {
        if page == 0 {
            return Err(DomainError::validation(
                "Search",
                ValidationError::invalid_format("page", "must be at least 1"),
            ));
        }
        if per_page == 0 {
            return Err(DomainError::validation(
                "Search",
                ValidationError::invalid_format("per_page", "must be greater than 0"),
            ));
        }
        Ok(Self {
            page,
            per_page,
            search: search.into(),
            order_by: order_by.into(),
            order,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn order_by(&self) -> &str {
        &self.order_by
    }

    pub fn order(&self) -> SearchOrder {
        self.order
    }

    /// Number of matching rows skipped before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Resolves the requested sort against what `T` can be sorted by.
    pub fn sort_spec<T: Searchable>(&self) -> SortSpec {
        SortSpec::resolve(&self.order_by, self.order, T::PRIMARY_TEXT_FIELD)
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: Self::DEFAULT_PER_PAGE,
            search: String::new(),
            order_by: String::new(),
            order: SearchOrder::Asc,
        }
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutput<T> {
    pub current_page: u32,
    pub per_page: u32,
    /// Matches before pagination.
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> SearchOutput<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SearchOutput<U> {
        SearchOutput {
            current_page: self.current_page,
            per_page: self.per_page,
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Field a search sorts by once the requested name has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// `name` for most aggregates, `title` for videos.
    PrimaryText,
    Id,
    CreatedAt,
}

/// Resolved sort: field plus direction. Ties always break on id ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SearchOrder,
}

impl SortSpec {
    /// Matches `order_by` case-insensitively. Unknown (or empty) names fall
    /// back to the primary text field ascending instead of failing.
    pub fn resolve(order_by: &str, order: SearchOrder, primary_text_field: &str) -> Self {
        let requested = order_by.trim().to_ascii_lowercase();
        let field = if requested == primary_text_field {
            SortField::PrimaryText
        } else {
            match requested.as_str() {
                "id" => SortField::Id,
                "created_at" | "createdat" => SortField::CreatedAt,
                _ => {
                    return Self {
                        field: SortField::PrimaryText,
                        order: SearchOrder::Asc,
                    }
                }
            }
        };
        Self { field, order }
    }

    fn compare<T: Searchable>(&self, a: &T, b: &T) -> Ordering {
        let primary = match self.field {
            SortField::PrimaryText => a.primary_text().cmp(b.primary_text()),
            SortField::Id => a.sort_id().cmp(&b.sort_id()),
            SortField::CreatedAt => a.created_at_key().cmp(&b.created_at_key()),
        };
        let primary = match self.order {
            SearchOrder::Asc => primary,
            SearchOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| a.sort_id().cmp(&b.sort_id()))
    }
}

/// What the search contract needs to know about an aggregate.
pub trait Searchable {
    /// Name of the filterable, default-sort text field.
    const PRIMARY_TEXT_FIELD: &'static str;

    fn primary_text(&self) -> &str;

    fn sort_id(&self) -> Uuid;

    fn created_at_key(&self) -> Timestamp;

    /// Case-insensitive substring match; an empty term matches everything.
    fn matches(&self, term: &str) -> bool {
        term.is_empty()
            || self
                .primary_text()
                .to_lowercase()
                .contains(&term.to_lowercase())
    }
}

/// Filters, sorts and pages `items` according to `input`.
///
/// Used by the in-memory adapters; the Postgres adapter issues the same
/// resolved [`SortSpec`] as SQL.
pub fn search_in_memory<T>(items: impl IntoIterator<Item = T>, input: &SearchInput) -> SearchOutput<T>
where
    T: Searchable,
{
    let mut matching: Vec<T> = items
        .into_iter()
        .filter(|item| item.matches(input.search()))
        .collect();
    let total = matching.len() as u64;

    let spec = input.sort_spec::<T>();
    matching.sort_by(|a, b| spec.compare(a, b));

    let items = matching
        .into_iter()
        .skip(input.offset() as usize)
        .take(input.per_page() as usize)
        .collect();

    SearchOutput {
        current_page: input.page(),
        per_page: input.per_page(),
        total,
        items,
    }
}
