//! Limit/offset pagination shared by every list endpoint.

use crate::model::api::PaginationDto;

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;
/// Offsets are bound as signed 64-bit integers.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Normalized limit/offset window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

impl Pagination {
    /// Applies the default limit when absent and clamps it to `1..=MAX_LIMIT`. The
    /// offset is capped at `MAX_OFFSET`, which yields an empty page.
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            offset: offset.unwrap_or(0).min(MAX_OFFSET),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of items together with the total number of matching rows.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    /// Converts every item and splits off the pagination metadata for the envelope.
    pub fn into_dto<D>(self, f: impl FnMut(T) -> D) -> (Vec<D>, PaginationDto) {
        (
            self.items.into_iter().map(f).collect(),
            PaginationDto {
                total: self.total,
                limit: self.pagination.limit,
                offset: self.pagination.offset,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_ten_items_from_the_start() {
        let pagination = Pagination::new(None, None);
        assert_eq!(pagination.limit, 10);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn clamps_limit_into_range() {
        assert_eq!(Pagination::new(Some(0), None).limit, 1);
        assert_eq!(Pagination::new(Some(500), None).limit, 100);
        assert_eq!(Pagination::new(Some(25), Some(50)).offset, 50);
    }

    #[test]
    fn caps_offset_at_signed_range() {
        assert_eq!(Pagination::new(None, Some(u64::MAX)).offset, MAX_OFFSET);
        assert_eq!(
            Pagination::new(None, Some(MAX_OFFSET + 1)).offset,
            i64::MAX as u64
        );
    }
}
