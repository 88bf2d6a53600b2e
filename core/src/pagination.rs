//! Page cursor for incremental loading.
//!
//! At most one page fetch is outstanding at a time. Every fetch carries the
//! generation it was issued under so a completion from an abandoned cursor is
//! recognisable.

use crate::types::PAGE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
    has_more: bool,
    is_loading: bool,
    generation: u64,
    page_size: u32,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl PageCursor {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 0,
            has_more: true,
            is_loading: false,
            generation: 0,
            page_size,
        }
    }

    /// Next page index to request.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn can_fetch(&self) -> bool {
        !self.is_loading && self.has_more
    }

    /// Claim the next fetch. Returns `(page, generation)`, or `None` while a
    /// fetch is in flight or the listing is exhausted.
    pub fn begin(&mut self) -> Option<(u32, u64)> {
        if !self.can_fetch() {
            return None;
        }
        self.is_loading = true;
        self.generation += 1;
        Some((self.page, self.generation))
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.is_loading && self.generation == generation
    }

    /// Record a successful fetch that returned `returned` books.
    pub fn succeed(&mut self, returned: usize) {
        self.is_loading = false;
        self.page += 1;
        self.has_more = returned == self.page_size as usize;
    }

    /// Release the guard without advancing; the next trigger retries the
    /// same page.
    pub fn fail(&mut self) {
        self.is_loading = false;
    }

    /// Forget any outstanding fetch so its completion is treated as stale.
    pub fn abandon(&mut self) {
        self.is_loading = false;
        self.generation += 1;
    }
}
