use crate::api::{RecipeSource, RecipeSummary};
use crate::error::FetchError;

/// Results shown per page
pub const RESULTS_PER_PAGE: usize = 10;

/// Which page buttons apply to a given page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

/// The full result set of one query, paged for display only
#[derive(Debug, Clone)]
pub struct Search {
    pub query: String,
    pub results: Vec<RecipeSummary>,
}

impl Search {
    /// Fetch every result for `query`
    pub async fn fetch(source: &dyn RecipeSource, query: &str) -> Result<Self, FetchError> {
        let results = source.search(query).await?;
        Ok(Search {
            query: query.to_string(),
            results,
        })
    }

    /// The results on 0-based `page`; empty past the last page
    pub fn page(&self, page: usize) -> &[RecipeSummary] {
        let start = page.saturating_mul(RESULTS_PER_PAGE).min(self.results.len());
        let end = start.saturating_add(RESULTS_PER_PAGE).min(self.results.len());
        &self.results[start..end]
    }

    pub fn page_count(&self) -> usize {
        self.results.len().div_ceil(RESULTS_PER_PAGE)
    }

    pub fn pagination(&self, page: usize) -> Pagination {
        Pagination {
            prev: page.checked_sub(1),
            next: (page.saturating_add(1) < self.page_count()).then(|| page + 1),
        }
    }
}
