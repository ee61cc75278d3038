//! Pagination and name filters for list endpoints
//!
//! List endpoints are either addressed page by page (`page[number]`, `page[size]`,
//! optional name search) or through a direct link returned by a previous call
//! (the `links.next` style URLs). Pages are never walked automatically.

use crate::config::defaults;
use crate::error::{Result, TfcError};

/// Query parameter in request order (key is sent verbatim, value is URL-encoded)
pub type QueryParam = (&'static str, String);

/// Server-side name filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameSearch {
    /// `search[name]`: fuzzy match
    Fuzzy(String),
    /// `search[wildcard-name]`: `*` on prefix, suffix or both
    Wildcard(String),
}

/// Page-based query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page_number: u32,
    pub page_size: u32,
    pub search: Option<NameSearch>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page_number: defaults::PAGE_NUMBER,
            page_size: defaults::PAGE_SIZE,
            search: None,
        }
    }
}

impl PageQuery {
    /// Query parameters in wire order
    pub fn to_query_params(&self) -> Vec<QueryParam> {
        let mut params = vec![
            ("page[number]", self.page_number.to_string()),
            ("page[size]", self.page_size.to_string()),
        ];
        match &self.search {
            Some(NameSearch::Fuzzy(name)) => params.push(("search[name]", name.clone())),
            Some(NameSearch::Wildcard(name)) => {
                params.push(("search[wildcard-name]", name.clone()))
            }
            None => {}
        }
        params
    }
}

/// How a list endpoint is addressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListQuery {
    /// Fully formed URL or path, used verbatim
    DirectLink(String),
    Pages(PageQuery),
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery::Pages(PageQuery::default())
    }
}

impl ListQuery {
    /// Request path and query parameters for a collection
    pub fn target(&self, collection_path: &str) -> (String, Vec<QueryParam>) {
        match self {
            ListQuery::DirectLink(link) => (link.clone(), Vec::new()),
            ListQuery::Pages(query) => (collection_path.to_string(), query.to_query_params()),
        }
    }
}

/// Build a list query from optional inputs
///
/// A direct link cannot be combined with any other field. When both name filters
/// are given the fuzzy one wins.
pub fn build_list_query(
    direct_link: Option<&str>,
    page_number: Option<u32>,
    page_size: Option<u32>,
    search_name: Option<&str>,
    search_wildcard_name: Option<&str>,
) -> Result<ListQuery> {
    if let Some(link) = direct_link {
        let combined: Vec<&str> = [
            ("page_number", page_number.is_some()),
            ("page_size", page_size.is_some()),
            ("search_name", search_name.is_some()),
            ("search_wildcard_name", search_wildcard_name.is_some()),
        ]
        .iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| *name)
        .collect();

        if !combined.is_empty() {
            return Err(TfcError::InvalidParams(format!(
                "direct_link cannot be combined with {}",
                combined.join(", ")
            )));
        }
        return Ok(ListQuery::DirectLink(link.to_string()));
    }

    let page_number = page_number.unwrap_or(defaults::PAGE_NUMBER);
    let page_size = page_size.unwrap_or(defaults::PAGE_SIZE);
    if page_number < 1 || page_size < 1 {
        return Err(TfcError::InvalidParams(format!(
            "page_number and page_size must be >= 1 (got {} and {})",
            page_number, page_size
        )));
    }

    let search = match (search_name, search_wildcard_name) {
        (Some(name), _) => Some(NameSearch::Fuzzy(name.to_string())),
        (None, Some(pattern)) => Some(NameSearch::Wildcard(pattern.to_string())),
        (None, None) => None,
    };

    Ok(ListQuery::Pages(PageQuery {
        page_number,
        page_size,
        search,
    }))
}
