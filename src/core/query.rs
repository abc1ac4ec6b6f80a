//! Query parameters, filters and pagination utilities

use crate::core::entity::Data;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Anything other than `desc` sorts ascending
    pub fn parse(raw: &str) -> Self {
        if raw == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Storage-agnostic description of a list query
///
/// Equality constraints are applied in order, then `created_since`, then the
/// sort. Newest-first by `createdAt` unless told otherwise.
#[derive(Debug, Clone)]
pub struct Filter {
    pub equals: Vec<(String, String)>,
    pub created_since: Option<DateTime<Utc>>,
    pub sort_by: String,
    pub order: SortOrder,
    pub limit: Option<usize>,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            equals: Vec::new(),
            created_since: None,
            sort_by: "createdAt".to_string(),
            order: SortOrder::Desc,
            limit: None,
        }
    }
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`
    pub fn eq(mut self, field: &str, value: impl Into<String>) -> Self {
        self.equals.push((field.to_string(), value.into()));
        self
    }

    /// Require `field == value` when a value was supplied
    pub fn eq_opt(self, field: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.eq(field, v),
            _ => self,
        }
    }

    /// Only documents created at or after `since`
    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.created_since = Some(since);
        self
    }

    pub fn sorted_by(mut self, field: &str, order: SortOrder) -> Self {
        self.sort_by = field.to_string();
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check a document against the equality and time constraints
    pub fn matches<T: Data>(&self, item: &T) -> bool {
        let equal = self.equals.iter().all(|(field, expected)| {
            item.field_value(field)
                .is_some_and(|value| value.matches(expected))
        });

        equal && self.created_since.is_none_or(|since| item.created_at() >= since)
    }

    /// Order two documents according to the sort settings
    pub fn compare<T: Data>(&self, a: &T, b: &T) -> Ordering {
        let ordering = match (a.field_value(&self.sort_by), b.field_value(&self.sort_by)) {
            (Some(x), Some(y)) => x.compare(&y),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        };

        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Largest page size a client may request
pub const MAX_PAGE_LIMIT: usize = 100;

/// Offset pagination request (1-based page)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: usize,
    pub limit: usize,
}

impl Page {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }

    /// Number of documents to skip, saturating for absurd page numbers
    pub fn skip(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Pagination metadata returned next to a page of results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationMeta {
    /// Total number of matching documents
    pub total: usize,

    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of pages
    pub pages: usize,
}

impl PaginationMeta {
    pub fn new(page: Page, total: usize) -> Self {
        Self {
            total,
            page: page.page,
            limit: page.limit,
            pages: total.div_ceil(page.limit),
        }
    }
}

/// Query string for paginated lists
///
/// ```text
/// GET /property-registrations?page=2&limit=10&status=pending&sortBy=createdAt&sortOrder=asc
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: usize,

    #[serde(default = "default_limit")]
    pub limit: usize,

    pub status: Option<String>,

    pub sort_by: Option<String>,

    pub sort_order: Option<String>,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    10
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            status: None,
            sort_by: None,
            sort_order: None,
        }
    }
}

impl PageQuery {
    pub fn page(&self) -> Page {
        Page::new(self.page, self.limit)
    }

    /// Base filter carrying the status constraint and requested ordering
    pub fn filter(&self) -> Filter {
        let order = self
            .sort_order
            .as_deref()
            .map(SortOrder::parse)
            .unwrap_or_default();
        let sort_by = self.sort_by.as_deref().unwrap_or("createdAt");

        Filter::new()
            .eq_opt("status", self.status.as_deref())
            .sorted_by(sort_by, order)
    }
}

/// Query string for the unpaginated list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

impl ListQuery {
    pub fn filter(&self) -> Filter {
        Filter::new()
            .eq_opt("type", self.kind.as_deref())
            .eq_opt("status", self.status.as_deref())
            .eq_opt("category", self.category.as_deref())
    }
}
