#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use tracing::debug;

use crate::arbiter::{CancelReason, InteractionArbiter};
use crate::field::Field;
use crate::store::FieldStore;

/// Cursor over the pages of the template. Only fields on the current page are
/// visible or interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFilter {
    current_page: u32,
}

impl PageFilter {
    #[must_use]
    pub fn new() -> Self {
        Self { current_page: 1 }
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Switch to `page`, force-releasing any in-flight gesture and pending
    /// selection.
    ///
    /// Pages outside `1..=page_count` are ignored and return false. Setting the
    /// current page again still cancels.
    pub fn set_page(&mut self, page: u32, store: &FieldStore, arbiter: &mut InteractionArbiter) -> bool {
        if page == 0 || page > store.page_count() {
            debug!(page, page_count = store.page_count(), "page out of range");
            return false;
        }
        self.current_page = page;
        arbiter.cancel(CancelReason::PageChange);
        true
    }

    /// Fields on the current page, in draw order.
    #[must_use]
    pub fn visible_fields<'a>(&self, store: &'a FieldStore) -> Vec<&'a Field> {
        store.by_page(self.current_page)
    }

    /// Pull the cursor back onto the document after the page count shrinks.
    pub fn clamp_to(&mut self, page_count: u32) {
        self.current_page = self.current_page.min(page_count.max(1));
    }
}

impl Default for PageFilter {
    fn default() -> Self {
        Self::new()
    }
}
