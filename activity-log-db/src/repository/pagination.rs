/// Largest offset the store accepts (`OFFSET` is a signed 64-bit value)
pub const MAX_OFFSET: usize = i64::MAX as usize;

/// Offset based paging applied to feed queries
/// 
/// # Example
/// ```
/// use activity_log_db::repository::pagination::PageRequest;
/// 
/// let page_request = PageRequest::new(20, 0); // First page with 20 items
/// let next_page = PageRequest::new(20, 20); // Second page
/// assert_eq!(next_page.page_number(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum number of items to return
    pub limit: usize,
    /// Number of items to skip
    pub offset: usize,
}

impl PageRequest {
    /// Default page size of the activity feed
    pub const DEFAULT_LIMIT: usize = 200;

    /// Largest page a caller may request
    pub const MAX_LIMIT: usize = 1000;

    /// Largest offset the store accepts (`OFFSET` is a signed 64-bit value)
    pub const MAX_OFFSET: usize = MAX_OFFSET;

    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Create a page request for a specific page number (1-based)
    ///
    /// Returns `None` when the offset does not fit in [`PageRequest::MAX_OFFSET`].
    /// 
    /// # Example
    /// ```
    /// use activity_log_db::repository::pagination::PageRequest;
    /// 
    /// let page_2 = PageRequest::for_page(20, 2).unwrap(); // offset: 20
    /// assert_eq!(page_2.offset, 20);
    /// assert!(PageRequest::for_page(1000, usize::MAX).is_none());
    /// ```
    pub fn for_page(page_size: usize, page_number: usize) -> Option<Self> {
        let page_number = page_number.max(1);
        let offset = (page_number - 1).checked_mul(page_size)?;
        (offset <= Self::MAX_OFFSET).then_some(Self {
            limit: page_size,
            offset,
        })
    }

    /// Get the page number (1-based) for this request
    pub fn page_number(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            (self.offset / self.limit) + 1
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}
