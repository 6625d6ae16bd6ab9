//! Pagination, sorting and date-window helpers shared by the admin listings.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryTrait, Select};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Deserialize;

pub const DEFAULT_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 500;

/// Offset/limit window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// rows to skip
    pub skip: u64,
    /// rows to return
    pub limit: u64,
}

impl Pagination {
    /// Missing limit becomes the default; anything else is clamped to `1..=MAX_LIMIT`.
    pub fn new(skip: Option<u64>, limit: Option<u64>) -> Self {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        Self { skip: skip.unwrap_or(0), limit }
    }
}

impl Default for Pagination {
    fn default() -> Self { Self::new(None, None) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl From<SortOrder> for sea_orm::Order {
    fn from(o: SortOrder) -> Self {
        match o {
            SortOrder::Asc => sea_orm::Order::Asc,
            SortOrder::Desc => sea_orm::Order::Desc,
        }
    }
}

/// Inclusive bounds on a timestamp column.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateRange {
    pub from: Option<DateTimeWithTimeZone>,
    pub to: Option<DateTimeWithTimeZone>,
}

impl DateRange {
    pub fn apply<E, C>(self, query: Select<E>, column: C) -> Select<E>
    where
        E: EntityTrait,
        C: ColumnTrait,
    {
        query
            .apply_if(self.from, |q, from| q.filter(column.gte(from)))
            .apply_if(self.to, |q, to| q.filter(column.lte(to)))
    }
}

/// One page of rows plus the size of the whole filtered set.
#[derive(Clone, Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        let p = Pagination::new(None, None);
        assert_eq!(p, Pagination { skip: 0, limit: DEFAULT_LIMIT });
        assert_eq!(Pagination::default(), p);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(Pagination::new(Some(3), Some(0)).limit, 1);
        assert_eq!(Pagination::new(Some(3), Some(10_000)).limit, MAX_LIMIT);
        assert_eq!(Pagination::new(Some(3), Some(25)), Pagination { skip: 3, limit: 25 });
    }

    #[test]
    fn sort_order_parses_lowercase() {
        let o: SortOrder = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(o, SortOrder::Desc);
        assert!(serde_json::from_str::<SortOrder>("\"sideways\"").is_err());
    }
}
