use serde::{Deserialize, Serialize};

/// One page of catalog listings
///
/// Individual products are kept opaque: the front end renders the catalog's own
/// fields (code, name, price, images) and nothing here depends on them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductPage {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_ignores_unknown_fields() {
        let page: ProductPage = serde_json::from_value(json!({
            "results": [{ "code": "0970818001", "name": "Slim Fit Trousers" }],
            "pagination": { "currentPage": 0, "pageSize": 30 },
            "facets": []
        }))
        .unwrap();

        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0]["name"], "Slim Fit Trousers");
        assert!(page.pagination.is_some());
    }

    #[test]
    fn test_page_without_results() {
        let page: ProductPage = serde_json::from_value(json!({})).unwrap();
        assert!(page.results.is_empty());
        assert!(page.pagination.is_none());
    }
}
