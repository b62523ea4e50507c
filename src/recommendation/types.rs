//! Recommendation request and response types.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Query parameters of a recommendation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationParams {
    /// Comma-separated product IDs to leave out.
    pub product_ids: Option<String>,
    /// Accepted for compatibility; does not influence the result.
    pub user_id: Option<String>,
}

impl RecommendationParams {
    /// Build from decoded query pairs.
    ///
    /// A repeated key keeps its last value. Unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "productIds" => params.product_ids = Some(value),
                "user_id" => params.user_id = Some(value),
                _ => {}
            }
        }
        params
    }
}

/// Products the caller does not want recommended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub exclude_ids: HashSet<String>,
}

impl RecommendationRequest {
    /// Split a comma-separated list, trimming each token.
    ///
    /// Tokens are not validated; empty tokens are dropped.
    pub fn from_exclude_list(list: Option<&str>) -> Self {
        let exclude_ids = list
            .into_iter()
            .flat_map(|list| list.split(','))
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
        Self { exclude_ids }
    }
}

impl From<&RecommendationParams> for RecommendationRequest {
    fn from(params: &RecommendationParams) -> Self {
        Self::from_exclude_list(params.product_ids.as_deref())
    }
}

/// Recommended product IDs, in sampling order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    #[serde(rename = "recommendations")]
    pub product_ids: Vec<String>,
    pub count: usize,
}

impl RecommendationResult {
    pub fn new(product_ids: Vec<String>) -> Self {
        let count = product_ids.len();
        Self { product_ids, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(request: &RecommendationRequest) -> Vec<&str> {
        let mut ids: Vec<&str> = request.exclude_ids.iter().map(String::as_str).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_parse_exclude_list() {
        let request = RecommendationRequest::from_exclude_list(Some(" OLJCESPC7Z , 66VCHSJNUP"));
        assert_eq!(ids(&request), vec!["66VCHSJNUP", "OLJCESPC7Z"]);
    }

    #[test]
    fn test_empty_tokens_and_duplicates() {
        let request = RecommendationRequest::from_exclude_list(Some("a,,a, ,b,"));
        assert_eq!(ids(&request), vec!["a", "b"]);

        assert!(RecommendationRequest::from_exclude_list(None).exclude_ids.is_empty());
        assert!(RecommendationRequest::from_exclude_list(Some("")).exclude_ids.is_empty());
    }

    #[test]
    fn test_repeated_query_key_keeps_last_value() {
        let pairs = [
            ("productIds", "OLJCESPC7Z"),
            ("user_id", "u-1"),
            ("productIds", "66VCHSJNUP,L9ECAV7KIM"),
            ("currency", "EUR"),
        ]
        .map(|(k, v)| (k.to_string(), v.to_string()));

        let params = RecommendationParams::from_pairs(pairs);
        assert_eq!(params.product_ids.as_deref(), Some("66VCHSJNUP,L9ECAV7KIM"));
        assert_eq!(params.user_id.as_deref(), Some("u-1"));

        let request = RecommendationRequest::from(&params);
        assert_eq!(ids(&request), vec!["66VCHSJNUP", "L9ECAV7KIM"]);

        assert_eq!(RecommendationParams::from_pairs([]), RecommendationParams::default());
    }

    #[test]
    fn test_result_wire_format() {
        let result = RecommendationResult::new(vec!["A".into(), "B".into()]);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"recommendations": ["A", "B"], "count": 2})
        );
    }
}
