//! Pagination types shared by every paged endpoint

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::impl_wire_enum_conversions;

/// Sort direction appended to the `sort` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl_wire_enum_conversions!(SortDirection {
    Asc => "ASC",
    Desc => "DESC",
});

/// Page of results as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    /// Zero-based page index
    pub number: u32,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    /// Wrap an unpaged list as a single page
    ///
    /// Several filters are served by endpoints that return plain arrays; the
    /// listing screens still expect a page.
    #[must_use]
    pub fn single(content: Vec<T>) -> Self {
        let len = content.len();
        Self {
            empty: len == 0,
            total_elements: len as u64,
            total_pages: 1,
            size: u32::try_from(len).unwrap_or(u32::MAX),
            number: 0,
            first: true,
            last: true,
            content,
        }
    }

    /// One-based page number, as shown to users
    #[must_use]
    pub const fn display_number(&self) -> u32 {
        self.number + 1
    }
}

/// Page, size and sort sent as query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: String,
    pub direction: SortDirection,
}

impl PageRequest {
    /// Default request sorted by `sort` descending
    pub fn sorted_by(sort: impl Into<String>) -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
            sort: sort.into(),
            direction: SortDirection::Desc,
        }
    }

    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub const fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub const fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Spring-style `sort` value, e.g. `data,DESC`
    #[must_use]
    pub fn sort_param(&self) -> String {
        format!("{},{}", self.sort, self.direction)
    }

    /// Query pairs in the order the backend documents them
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sort", self.sort_param()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults() {
        let request = PageRequest::sorted_by("data");
        assert_eq!(request.page, 0);
        assert_eq!(request.size, 20);
        assert_eq!(request.sort_param(), "data,DESC");
    }

    #[test]
    fn test_page_request_query_pairs() {
        let request = PageRequest::sorted_by("createdAt").page(2).size(50).direction(SortDirection::Asc);
        assert_eq!(
            request.query_pairs(),
            vec![
                ("page", "2".to_string()),
                ("size", "50".to_string()),
                ("sort", "createdAt,ASC".to_string()),
            ]
        );
    }

    #[test]
    fn test_single_page_wraps_list() {
        let page = Page::single(vec!["a", "b"]);
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.total_pages, 1);
        assert!(page.first && page.last && !page.empty);

        let empty: Page<u8> = Page::single(Vec::new());
        assert!(empty.empty);
        assert_eq!(empty.size, 0);
    }

    #[test]
    fn test_page_deserializes_spring_payload() {
        let json = r#"{
            "content": [1, 2, 3],
            "totalElements": 43,
            "totalPages": 3,
            "size": 20,
            "number": 0,
            "first": true,
            "last": false,
            "empty": false
        }"#;

        let page: Page<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.total_elements, 43);
        assert_eq!(page.display_number(), 1);
        assert!(page.first);
    }
}
