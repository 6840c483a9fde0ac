//! Built-in example sessions.
//!
//! The expression and context the playground boots with, plus a small
//! catalog of named examples that can be loaded into the buffers.

/// Expression loaded on first start.
pub const DEFAULT_EXPRESSION: &str = "users|filter('value.active')|map('value.name')|sort()";

/// Context loaded on first start.
pub const DEFAULT_CONTEXT: &str = r#"{
  "users": [
    { "name": "Alice", "age": 28, "active": true, "department": "Engineering" },
    { "name": "Bob", "age": 32, "active": false, "department": "Sales" },
    { "name": "Charlie", "age": 24, "active": true, "department": "Marketing" },
    { "name": "Diana", "age": 30, "active": true, "department": "Engineering" }
  ],
  "products": [
    { "name": "Laptop", "price": 999.99, "category": "Electronics", "inStock": true },
    { "name": "Book", "price": 19.99, "category": "Education", "inStock": false },
    { "name": "Coffee", "price": 4.5, "category": "Food", "inStock": true }
  ],
  "settings": {
    "theme": "dark",
    "language": "en",
    "notifications": true
  }
}"#;

/// A named example expression with its context.
#[derive(Debug, Clone, Copy)]
pub struct Example {
    /// Short title.
    pub title: &'static str,

    /// One-line description of what the expression demonstrates.
    pub description: &'static str,

    /// Expression text.
    pub expression: &'static str,

    /// Context text.
    pub context: &'static str,
}

/// The example catalog, in display order.
pub const EXAMPLES: &[Example] = &[
    Example {
        title: "String Manipulation",
        description: "Transform string to uppercase and replace spaces with dashes",
        expression: "text|uppercase|split(separator)|join(replacement)",
        context: r#"{
  "text": "Hello World",
  "separator": " ",
  "replacement": "-"
}"#,
    },
    Example {
        title: "Array Operations",
        description: "Filter active users and get their names sorted",
        expression: "users|filter('value.active')|map('value.name')|sort()",
        context: r#"{
  "users": [
    { "name": "Alice", "age": 28, "active": true, "department": "Engineering" },
    { "name": "Bob", "age": 32, "active": false, "department": "Sales" },
    { "name": "Charlie", "age": 24, "active": true, "department": "Marketing" },
    { "name": "Diana", "age": 30, "active": true, "department": "Engineering" }
  ]
}"#,
    },
    Example {
        title: "Numeric Aggregations",
        description: "Calculate total price of all products",
        expression: "products|map('value.price')|sum",
        context: r#"{
  "products": [
    { "name": "Laptop", "price": 999.99, "category": "Electronics", "inStock": true },
    { "name": "Book", "price": 19.99, "category": "Education", "inStock": false },
    { "name": "Coffee", "price": 4.5, "category": "Food", "inStock": true }
  ]
}"#,
    },
    Example {
        title: "Complex Filtering",
        description: "Count active users in Engineering department",
        expression: "users|filter('value.department == \"Engineering\" && value.active')|length",
        context: r#"{
  "users": [
    { "name": "Alice", "age": 28, "active": true, "department": "Engineering" },
    { "name": "Bob", "age": 32, "active": false, "department": "Sales" },
    { "name": "Diana", "age": 30, "active": true, "department": "Engineering" }
  ]
}"#,
    },
    Example {
        title: "String Functions",
        description: "Extract text before space and convert to uppercase",
        expression: "\"hello world\"|substringBefore(\" \")|uppercase",
        context: "{}",
    },
    Example {
        title: "Date Operations",
        description: "Add 7 days to current date and format",
        expression: "now()|dateTimeAdd(\"days\", 7)|dateTimeFormat(\"yyyy-MM-dd\")",
        context: "{}",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_valid_json() {
        let parsed: serde_json::Value = serde_json::from_str(DEFAULT_CONTEXT).unwrap();
        assert!(parsed.get("users").is_some());
    }

    #[test]
    fn example_contexts_are_valid_json() {
        for example in EXAMPLES {
            let parsed: Result<serde_json::Value, _> = serde_json::from_str(example.context);
            assert!(parsed.is_ok(), "invalid context in {}", example.title);
        }
    }

    #[test]
    fn examples_have_titles_and_expressions() {
        for example in EXAMPLES {
            assert!(!example.title.is_empty());
            assert!(!example.expression.is_empty());
        }
    }
}
