//! Pure cache policy: snapshot freshness and page slicing.
//!
//! The cache manager in the server crate drives these; keeping them here
//! means the whole refresh decision is testable without storage or HTTP.

use chrono::{DateTime, Duration, Utc};

use super::CachedEvent;

/// Decides whether a cached snapshot can be served.
///
/// A snapshot is fresh if and only if it is non-empty AND every row's
/// `last_updated` is strictly within `window` of `now`. A single stale row
/// invalidates the whole set: rows only ever enter the cache together in
/// one generation, so mixed ages mean something went wrong and the
/// conservative answer is to refetch.
pub fn snapshot_is_fresh(rows: &[CachedEvent], now: DateTime<Utc>, window: Duration) -> bool {
    !rows.is_empty() && rows.iter().all(|row| now - row.last_updated < window)
}

/// Slices the 1-based `page` of `size` items out of `rows`, in stored order.
///
/// The range `[(page - 1) * size, (page - 1) * size + size)` is clipped to
/// the bounds of `rows`; a page entirely past the end is empty. Arithmetic
/// saturates, so degenerate inputs (page 0, huge pages) cannot panic.
pub fn slice_page<T>(rows: &[T], page: u32, size: u32) -> &[T] {
    let start = (page.saturating_sub(1) as usize).saturating_mul(size as usize);
    let end = start.saturating_add(size as usize);
    let len = rows.len();
    &rows[start.min(len)..end.min(len)]
}

/// Translates a 1-based caller page to the provider's 0-based page index.
pub fn upstream_page_index(page: u32) -> u32 {
    page.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NormalizedEvent;

    fn row(id: &str, age: Duration, now: DateTime<Utc>) -> CachedEvent {
        CachedEvent::from_normalized(NormalizedEvent::new(id), now - age)
    }

    #[test]
    fn test_empty_snapshot_is_never_fresh() {
        let now = Utc::now();
        assert!(!snapshot_is_fresh(&[], now, Duration::hours(1)));
    }

    #[test]
    fn test_all_recent_rows_are_fresh() {
        let now = Utc::now();
        let rows = vec![
            row("a", Duration::minutes(5), now),
            row("b", Duration::minutes(59), now),
        ];
        assert!(snapshot_is_fresh(&rows, now, Duration::hours(1)));
    }

    #[test]
    fn test_one_stale_row_invalidates_the_set() {
        let now = Utc::now();
        let rows = vec![
            row("a", Duration::minutes(5), now),
            row("b", Duration::minutes(61), now),
        ];
        assert!(!snapshot_is_fresh(&rows, now, Duration::hours(1)));
    }

    #[test]
    fn test_age_equal_to_window_is_stale() {
        let now = Utc::now();
        let rows = vec![row("a", Duration::hours(1), now)];
        assert!(!snapshot_is_fresh(&rows, now, Duration::hours(1)));
    }

    #[test]
    fn test_future_stamped_row_counts_as_fresh() {
        // Clock skew between writer and reader should not force a refetch.
        let now = Utc::now();
        let rows = vec![row("a", Duration::minutes(-2), now)];
        assert!(snapshot_is_fresh(&rows, now, Duration::hours(1)));
    }

    #[test]
    fn test_slice_first_page() {
        let rows: Vec<u32> = (0..5).collect();
        assert_eq!(slice_page(&rows, 1, 2), &[0, 1]);
    }

    #[test]
    fn test_slice_middle_page() {
        let rows: Vec<u32> = (0..5).collect();
        assert_eq!(slice_page(&rows, 2, 2), &[2, 3]);
    }

    #[test]
    fn test_slice_clips_partial_last_page() {
        let rows: Vec<u32> = (0..5).collect();
        assert_eq!(slice_page(&rows, 3, 2), &[4]);
    }

    #[test]
    fn test_slice_past_the_end_is_empty() {
        let rows: Vec<u32> = (0..5).collect();
        assert_eq!(slice_page(&rows, 4, 2), &[] as &[u32]);
        assert_eq!(slice_page(&rows, 100, 20), &[] as &[u32]);
    }

    #[test]
    fn test_slice_of_empty_set_is_empty() {
        let rows: Vec<u32> = Vec::new();
        assert_eq!(slice_page(&rows, 1, 20), &[] as &[u32]);
    }

    #[test]
    fn test_slice_page_zero_behaves_as_page_one() {
        let rows: Vec<u32> = (0..5).collect();
        assert_eq!(slice_page(&rows, 0, 2), &[0, 1]);
    }

    #[test]
    fn test_slice_does_not_overflow_on_huge_pages() {
        let rows: Vec<u32> = (0..5).collect();
        assert_eq!(slice_page(&rows, u32::MAX, u32::MAX), &[] as &[u32]);
    }

    #[test]
    fn test_upstream_page_index_is_zero_based() {
        assert_eq!(upstream_page_index(1), 0);
        assert_eq!(upstream_page_index(7), 6);
    }

    #[test]
    fn test_upstream_page_index_saturates_at_zero() {
        assert_eq!(upstream_page_index(0), 0);
    }
}
