use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A stored item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Assigned by the store on create, never changes afterwards
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "widget")]
    pub name: String,
    #[schema(example = 10)]
    pub value: i32,
}

/// Body of `POST /items/`
///
/// `name` length is counted in characters, not bytes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 100))]
    #[schema(min_length = 1, max_length = 100, example = "widget")]
    pub name: String,

    #[validate(range(min = 0, max = 100))]
    #[schema(minimum = 0, maximum = 100, example = 10)]
    pub value: i32,
}

/// Body of `PUT /items/{item_id}`; replaces both fields.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 100))]
    #[schema(min_length = 1, max_length = 100, example = "widget2")]
    pub name: String,

    #[validate(range(min = 0, max = 100))]
    #[schema(minimum = 0, maximum = 100, example = 20)]
    pub value: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, value: i32) -> CreateItem {
        CreateItem {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(create("a", 0).validate().is_ok());
        assert!(create(&"a".repeat(100), 100).validate().is_ok());
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        assert!(create("", 10).validate().is_err());
        assert!(create(&"a".repeat(101), 10).validate().is_err());
        assert!(create("widget", -1).validate().is_err());
        assert!(create("widget", 101).validate().is_err());
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 100 two-byte characters is 200 bytes but still within the limit
        assert!(create(&"é".repeat(100), 1).validate().is_ok());
        assert!(create(&"é".repeat(101), 1).validate().is_err());
    }

    #[test]
    fn test_update_rules_match_create() {
        let update = UpdateItem {
            name: String::new(),
            value: 101,
        };
        let errors = update.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("value"));
    }

    #[test]
    fn test_item_wire_shape() {
        let item = Item {
            id: 1,
            name: "widget".to_string(),
            value: 10,
        };
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            serde_json::json!({"id": 1, "name": "widget", "value": 10})
        );
    }
}
