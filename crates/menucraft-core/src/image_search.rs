//! Stock photo search used by the image picker.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default page size for searches.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Image search errors.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Request(String),
    #[error("Invalid search response: {0}")]
    InvalidResponse(String),
    #[error("Search service not configured")]
    NotConfigured,
}

/// Result type for image search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// A candidate photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: u64,
    /// Small preview for the picker grid.
    pub thumbnail_url: String,
    /// URL placed into the design.
    pub full_url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub photographer: String,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhotoPage {
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
    pub photos: Vec<Photo>,
    pub total_results: u32,
}

impl PhotoPage {
    pub fn empty(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page,
            photos: Vec::new(),
            total_results: 0,
        }
    }

    /// Whether another page is available after this one.
    pub fn has_more(&self) -> bool {
        (self.page as u64) * (self.per_page as u64) < self.total_results as u64
    }
}

/// A photo search backend.
pub trait ImageSearch {
    /// Photos matching a free-text query.
    fn search(&self, query: &str, page: u32, per_page: u32) -> SearchResult<PhotoPage>;

    /// A default, editor-picked selection.
    fn curated(&self, page: u32, per_page: u32) -> SearchResult<PhotoPage>;
}

/// Run a search, degrading to an empty page on failure.
///
/// An empty query falls back to the curated set.
pub fn search_or_empty(
    backend: &dyn ImageSearch,
    query: &str,
    page: u32,
    per_page: u32,
) -> PhotoPage {
    let query = query.trim();
    let result = if query.is_empty() {
        backend.curated(page, per_page)
    } else {
        backend.search(query, page, per_page)
    };
    result.unwrap_or_else(|e| {
        log::error!("Image search for {:?} failed: {}", query, e);
        PhotoPage::empty(page, per_page)
    })
}

/// In-memory photo library.
#[derive(Debug, Clone, Default)]
pub struct StaticImageLibrary {
    photos: Vec<Photo>,
    /// Ids of photos returned by `curated`; all photos when empty.
    curated: Vec<u64>,
}

impl StaticImageLibrary {
    pub fn new(photos: Vec<Photo>) -> Self {
        Self {
            photos,
            curated: Vec::new(),
        }
    }

    pub fn with_curated(mut self, ids: Vec<u64>) -> Self {
        self.curated = ids;
        self
    }

    fn paginate<'a>(
        photos: impl Iterator<Item = &'a Photo>,
        page: u32,
        per_page: u32,
    ) -> SearchResult<PhotoPage> {
        if page == 0 || per_page == 0 {
            return Err(SearchError::Request(format!(
                "page and per_page must be positive (page={}, per_page={})",
                page, per_page
            )));
        }
        let matching: Vec<&Photo> = photos.collect();
        let start = (page as usize - 1).saturating_mul(per_page as usize);
        let photos = matching
            .iter()
            .skip(start)
            .take(per_page as usize)
            .map(|p| (*p).clone())
            .collect();
        Ok(PhotoPage {
            page,
            per_page,
            photos,
            total_results: matching.len() as u32,
        })
    }
}

impl ImageSearch for StaticImageLibrary {
    fn search(&self, query: &str, page: u32, per_page: u32) -> SearchResult<PhotoPage> {
        let terms: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        let matches = self.photos.iter().filter(|p| {
            let alt = p.alt.to_lowercase();
            terms.iter().all(|t| alt.contains(t.as_str()))
        });
        Self::paginate(matches, page, per_page)
    }

    fn curated(&self, page: u32, per_page: u32) -> SearchResult<PhotoPage> {
        if self.curated.is_empty() {
            return Self::paginate(self.photos.iter(), page, per_page);
        }
        let curated = self.photos.iter().filter(|p| self.curated.contains(&p.id));
        Self::paginate(curated, page, per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: u64, alt: &str) -> Photo {
        Photo {
            id,
            thumbnail_url: format!("https://img.example/{}/small.jpg", id),
            full_url: format!("https://img.example/{}/large.jpg", id),
            alt: alt.to_string(),
            photographer: "Test".to_string(),
        }
    }

    fn library() -> StaticImageLibrary {
        StaticImageLibrary::new(vec![
            photo(1, "Fresh pasta with basil"),
            photo(2, "Espresso cup on a table"),
            photo(3, "Pasta carbonara"),
            photo(4, "Chocolate cake"),
        ])
    }

    struct FailingSearch;

    impl ImageSearch for FailingSearch {
        fn search(&self, _: &str, _: u32, _: u32) -> SearchResult<PhotoPage> {
            Err(SearchError::NotConfigured)
        }

        fn curated(&self, _: u32, _: u32) -> SearchResult<PhotoPage> {
            Err(SearchError::Request("offline".to_string()))
        }
    }

    #[test]
    fn test_search_matches_all_terms() {
        let page = library().search("pasta", 1, DEFAULT_PER_PAGE).unwrap();
        assert_eq!(page.photos.len(), 2);
        let page = library().search("pasta basil", 1, DEFAULT_PER_PAGE).unwrap();
        assert_eq!(page.photos.len(), 1);
        assert_eq!(page.photos[0].id, 1);
    }

    #[test]
    fn test_pagination_and_has_more() {
        let page = library().curated(1, 3).unwrap();
        assert_eq!(page.photos.len(), 3);
        assert_eq!(page.total_results, 4);
        assert!(page.has_more());
        let page = library().curated(2, 3).unwrap();
        assert_eq!(page.photos.len(), 1);
        assert!(!page.has_more());
    }

    #[test]
    fn test_curated_subset() {
        let page = library().with_curated(vec![2, 4]).curated(1, 10).unwrap();
        let ids: Vec<u64> = page.photos.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_zero_page_is_an_error() {
        assert!(library().search("pasta", 0, 10).is_err());
    }

    #[test]
    fn test_search_or_empty_degrades() {
        let page = search_or_empty(&FailingSearch, "pasta", 2, 10);
        assert!(page.photos.is_empty());
        assert_eq!(page.page, 2);
        assert!(!page.has_more());

        let page = search_or_empty(&library(), "  ", 1, 10);
        assert_eq!(page.photos.len(), 4);
    }
}
