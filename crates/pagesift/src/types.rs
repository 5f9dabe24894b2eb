//! Page identifiers and match results.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// A 1-based page number within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageIndex(NonZeroU32);

impl PageIndex {
    pub const FIRST: PageIndex = PageIndex(NonZeroU32::MIN);

    /// Returns `None` for zero.
    pub fn new(number: u32) -> Option<Self> {
        NonZeroU32::new(number).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Zero-based position, for indexing page vectors.
    pub fn offset(self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// Every page of a document with `total` pages, ascending.
    pub fn range(total: u32) -> impl Iterator<Item = PageIndex> {
        (1..=total).filter_map(PageIndex::new)
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pages whose text satisfied a query, strictly ascending and duplicate-free.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pages: Vec<PageIndex>,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a page. Pages must arrive in ascending order; anything at or
    /// below the last page is ignored and `false` is returned.
    pub fn push(&mut self, page: PageIndex) -> bool {
        if self.pages.last().is_some_and(|last| *last >= page) {
            return false;
        }
        self.pages.push(page);
        true
    }

    pub fn pages(&self) -> &[PageIndex] {
        self.pages.as_slice()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PageIndex> + '_ {
        self.pages.iter().copied()
    }

    /// Plain page numbers, e.g. for display.
    pub fn numbers(&self) -> Vec<u32> {
        self.pages.iter().map(|page| page.get()).collect()
    }
}

impl FromIterator<PageIndex> for MatchResult {
    /// Sorts and deduplicates the input.
    fn from_iter<I: IntoIterator<Item = PageIndex>>(iter: I) -> Self {
        let mut pages: Vec<PageIndex> = iter.into_iter().collect();
        pages.sort_unstable();
        pages.dedup();
        Self { pages }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, page) in self.pages.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{page}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: u32) -> PageIndex {
        PageIndex::new(n).expect("non-zero page")
    }

    #[test]
    fn zero_is_not_a_page() {
        assert!(PageIndex::new(0).is_none());
        assert_eq!(PageIndex::FIRST.get(), 1);
        assert_eq!(page(4).offset(), 3);
    }

    #[test]
    fn range_covers_every_page() {
        let pages: Vec<u32> = PageIndex::range(4).map(PageIndex::get).collect();
        assert_eq!(pages, vec![1, 2, 3, 4]);
        assert_eq!(PageIndex::range(0).count(), 0);
    }

    #[test]
    fn push_rejects_out_of_order_and_duplicates() {
        let mut result = MatchResult::new();
        assert!(result.push(page(2)));
        assert!(result.push(page(5)));
        assert!(!result.push(page(5)));
        assert!(!result.push(page(3)));
        assert_eq!(result.numbers(), vec![2, 5]);
    }

    #[test]
    fn collect_sorts_and_dedups() {
        let result: MatchResult = [7, 2, 5, 2].into_iter().map(page).collect();
        assert_eq!(result.numbers(), vec![2, 5, 7]);
        assert_eq!(result.to_string(), "2, 5, 7");
    }
}
