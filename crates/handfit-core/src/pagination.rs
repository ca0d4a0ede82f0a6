// ABOUTME: Page-based pagination module for measurement listings
// ABOUTME: Normalizes 1-indexed page requests and carries total counts alongside items
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use serde::{Deserialize, Serialize};

use crate::constants::pagination::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// A validated, 1-indexed page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number, starting at 1
    pub page: u32,
    /// Items per page, in `1..=MAX_PAGE_SIZE`
    pub page_size: u32,
}

impl PageRequest {
    /// Build a page request from optional caller input
    ///
    /// A missing or zero page becomes the first page. A page size that is
    /// missing, zero, or above the maximum falls back to the default size
    /// rather than being clamped.
    #[must_use]
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE);
        let page_size = page_size
            .filter(|s| (1..=MAX_PAGE_SIZE).contains(s))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self { page, page_size }
    }

    /// Number of rows to skip
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// Maximum number of rows to return
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus the total across all pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Total matching items across all pages
    pub total: u64,
    /// Page number that was served
    pub page: u32,
    /// Page size that was applied
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Assemble a page from a request, its items, and the overall total
    #[must_use]
    pub const fn new(request: PageRequest, items: Vec<T>, total: u64) -> Self {
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
        }
    }

    /// Whether more items exist after this page
    #[must_use]
    pub fn has_more(&self) -> bool {
        u64::from(self.page) * u64::from(self.page_size) < self.total
    }

    /// Convert each item while keeping the pagination metadata
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
