use serde::Deserialize;

use crate::backend::envelope::Meta;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub total_pages: u32,
}

impl Pagination {
    /// A missing or zero page count is treated as a single page.
    pub fn new(page: u32, total_pages: Option<u32>) -> Self {
        Self {
            page: page.max(1),
            total_pages: total_pages.filter(|t| *t > 0).unwrap_or(1),
        }
    }

    pub fn from_meta(page: u32, meta: Option<&Meta>) -> Self {
        Self::new(page, meta.and_then(|m| m.total_page))
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Target of the "Previous" link, `None` while it is disabled.
    pub fn previous(&self) -> Option<u32> {
        self.has_previous().then(|| self.page - 1)
    }

    /// Target of the "Next" link, `None` while it is disabled.
    pub fn next(&self) -> Option<u32> {
        if self.has_next() {
            self.page.checked_add(1)
        } else {
            None
        }
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<u32>,
    #[serde(default)]
    pub search_term: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Trimmed search text, `None` when blank.
    pub fn search(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
