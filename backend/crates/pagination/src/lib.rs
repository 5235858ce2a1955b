//! Offset pagination primitives for list endpoints.
//!
//! A [`PageRequest`] is a validated page/size pair; handlers construct one at
//! the boundary and pass it down to repositories, which turn it into an SQL
//! `OFFSET`/`LIMIT`. A [`PageEnvelope`] is the response shape: the page slice
//! plus the total match count and derived page arithmetic.
//!
//! Pages are 1-indexed. Requesting a page past the end is not an error; it
//! yields an empty slice with the correct totals.

use serde::Serialize;

/// Default page size applied when a request omits one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validation failures for page parameters.
///
/// These are boundary errors: the HTTP adapter maps them to a client-error
/// response before any query runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Pages are 1-indexed; zero is rejected rather than clamped.
    #[error("page must be at least 1")]
    PageOutOfRange,
    /// Page size must lie in `1..=MAX_PAGE_SIZE`.
    #[error("page size must be between 1 and {MAX_PAGE_SIZE}")]
    PageSizeOutOfRange,
}

/// A validated, 1-indexed pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `page` is zero or `page_size` is
    /// outside `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::PageOutOfRange);
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(PageRequestError::PageSizeOutOfRange);
        }
        Ok(Self { page, page_size })
    }

    /// The requested 1-indexed page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The requested page size.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of rows to skip before the requested page starts.
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }

    /// Number of rows in a full page.
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

/// A page of results plus the totals needed to render pagination controls.
///
/// `page_size` reports the number of records actually returned, which may be
/// smaller than the requested size on the final page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    /// The page slice, in repository order.
    pub records: Vec<T>,
    /// Total records matching the query across all pages.
    pub total: u64,
    /// Total number of pages at the requested page size.
    pub total_pages: u64,
    /// The 1-indexed page this envelope holds.
    pub current_page: u32,
    /// Number of records in this envelope.
    pub page_size: u32,
}

impl<T> PageEnvelope<T> {
    /// Assemble an envelope from a page slice and the total match count.
    pub fn new(records: Vec<T>, total: u64, request: PageRequest) -> Self {
        let total_pages = total.div_ceil(u64::from(request.page_size()));
        let page_size = u32::try_from(records.len()).unwrap_or(u32::MAX);
        Self {
            records,
            total,
            total_pages,
            current_page: request.page(),
            page_size,
        }
    }

    /// Map the record type while keeping the page arithmetic intact.
    pub fn map<U, F>(self, f: F) -> PageEnvelope<U>
    where
        F: FnMut(T) -> U,
    {
        PageEnvelope {
            records: self.records.into_iter().map(f).collect(),
            total: self.total,
            total_pages: self.total_pages,
            current_page: self.current_page,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Page arithmetic and validation coverage.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::first_page(1, 10, 0)]
    #[case::second_page(2, 10, 10)]
    #[case::large_page(100, 25, 2475)]
    fn offset_follows_one_indexed_pages(#[case] page: u32, #[case] size: u32, #[case] offset: i64) {
        let request = PageRequest::new(page, size).expect("valid request");
        assert_eq!(request.offset(), offset);
        assert_eq!(request.limit(), i64::from(size));
    }

    #[rstest]
    fn zero_page_is_rejected() {
        assert_eq!(
            PageRequest::new(0, 10),
            Err(PageRequestError::PageOutOfRange)
        );
    }

    #[rstest]
    #[case::zero(0)]
    #[case::too_large(MAX_PAGE_SIZE + 1)]
    fn out_of_range_page_size_is_rejected(#[case] size: u32) {
        assert_eq!(
            PageRequest::new(1, size),
            Err(PageRequestError::PageSizeOutOfRange)
        );
    }

    #[rstest]
    fn default_request_is_first_page_of_ten() {
        let request = PageRequest::default();
        assert_eq!(request.page(), 1);
        assert_eq!(request.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[rstest]
    #[case::exact_fit(30, 10, 3)]
    #[case::partial_last_page(25, 10, 3)]
    #[case::single_record(1, 10, 1)]
    #[case::empty(0, 10, 0)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] size: u32, #[case] pages: u64) {
        let request = PageRequest::new(1, size).expect("valid request");
        let envelope = PageEnvelope::<u8>::new(Vec::new(), total, request);
        assert_eq!(envelope.total_pages, pages);
    }

    #[rstest]
    fn page_size_reports_actual_record_count() {
        let request = PageRequest::new(3, 10).expect("valid request");
        let envelope = PageEnvelope::new(vec![1, 2, 3, 4, 5], 25, request);
        assert_eq!(envelope.page_size, 5);
        assert_eq!(envelope.current_page, 3);
        assert_eq!(envelope.total, 25);
    }

    #[rstest]
    fn map_preserves_arithmetic() {
        let request = PageRequest::new(1, 2).expect("valid request");
        let envelope = PageEnvelope::new(vec![1, 2], 5, request).map(|n| n * 10);
        assert_eq!(envelope.records, vec![10, 20]);
        assert_eq!(envelope.total_pages, 3);
        assert_eq!(envelope.page_size, 2);
    }
}
