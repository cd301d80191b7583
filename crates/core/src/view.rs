//! Search and pagination over a product collection.
//!
//! [`ProductView`] holds only the user inputs (search term and page). Every
//! derived sequence is recomputed from the collection passed in, so the view
//! can never drift out of sync with the catalog it is applied to.

use core::ops::RangeInclusive;

use crate::product::ProductRecord;

/// Products shown per page.
pub const PAGE_SIZE: usize = 8;

/// Search term and page position over a product collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    /// Term as typed, kept for display.
    search_term: String,
    /// Trimmed, lower-cased term used for matching.
    needle: String,
    current_page: usize,
}

impl Default for ProductView {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            needle: String::new(),
            current_page: 1,
        }
    }
}

impl ProductView {
    /// A view with no search term on page 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The search term as typed.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Whether a non-blank search term is active.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        !self.needle.is_empty()
    }

    /// The current page (1-based, not clamped).
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Replace the search term and go back to page 1.
    pub fn set_search_term(&mut self, term: &str) {
        term.clone_into(&mut self.search_term);
        self.needle = term.trim().to_lowercase();
        self.current_page = 1;
    }

    /// Drop the search term and go back to page 1.
    pub fn clear_search(&mut self) {
        self.set_search_term("");
    }

    /// Jump to page `page`. No bounds check is applied; a page past the end
    /// simply has no items.
    pub const fn set_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Products whose name or category contains the search term, in
    /// collection order. The whole collection when no term is set.
    #[must_use]
    pub fn filtered<'a>(&self, products: &'a [ProductRecord]) -> Vec<&'a ProductRecord> {
        if self.needle.is_empty() {
            return products.iter().collect();
        }
        products.iter().filter(|p| p.matches(&self.needle)).collect()
    }

    /// The slice of [`filtered`](Self::filtered) for the current page.
    #[must_use]
    pub fn page_items<'a>(&self, products: &'a [ProductRecord]) -> Vec<&'a ProductRecord> {
        let Some(start) = self
            .current_page
            .checked_sub(1)
            .and_then(|p| p.checked_mul(PAGE_SIZE))
        else {
            return Vec::new();
        };

        self.filtered(products)
            .into_iter()
            .skip(start)
            .take(PAGE_SIZE)
            .collect()
    }

    /// `ceil(filtered / PAGE_SIZE)`; zero when nothing matches.
    #[must_use]
    pub fn total_pages(&self, products: &[ProductRecord]) -> usize {
        self.filtered(products).len().div_ceil(PAGE_SIZE)
    }

    /// Whether the page selector should be shown (more than one page of
    /// matches).
    #[must_use]
    pub fn shows_paginator(&self, products: &[ProductRecord]) -> bool {
        self.filtered(products).len() > PAGE_SIZE
    }

    /// Page numbers for the page selector.
    #[must_use]
    pub fn page_numbers(&self, products: &[ProductRecord]) -> RangeInclusive<usize> {
        1..=self.total_pages(products)
    }

    /// `(matches, total)` while a search is active.
    #[must_use]
    pub fn match_summary(&self, products: &[ProductRecord]) -> Option<(usize, usize)> {
        self.is_searching()
            .then(|| (self.filtered(products).len(), products.len()))
    }

    /// `(shown, current_page, total_pages)` while anything matches.
    #[must_use]
    pub fn page_summary(&self, products: &[ProductRecord]) -> Option<(usize, usize, usize)> {
        let total_pages = self.total_pages(products);
        (total_pages > 0).then(|| {
            (
                self.page_items(products).len(),
                self.current_page,
                total_pages,
            )
        })
    }
}
