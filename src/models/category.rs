use serde::{Deserialize, Serialize};

/// One price category to fetch: a display name plus its Eurostat `ppp_cat` code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: String,
    pub code: String,
}

impl CategorySpec {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

impl std::fmt::Display for CategorySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.code)
    }
}

impl std::str::FromStr for CategorySpec {
    type Err = String;

    /// Parse a `name=code` argument, e.g. `food=A010101`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, code)) if !name.is_empty() && !code.is_empty() => {
                Ok(CategorySpec::new(name, code))
            }
            _ => Err(format!("Expected name=code, got: {}", s)),
        }
    }
}

/// The five categories the dashboard ships with, in fetch order.
pub fn default_categories() -> Vec<CategorySpec> {
    vec![
        CategorySpec::new("restaurant_hotel", "A0111"),
        CategorySpec::new("recreation", "A0109"),
        CategorySpec::new("transport", "A0107"),
        CategorySpec::new("alcohol", "A010201"),
        CategorySpec::new("food", "A010101"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_category_spec() {
        let spec = CategorySpec::from_str("food=A010101").unwrap();
        assert_eq!(spec.name, "food");
        assert_eq!(spec.code, "A010101");
    }

    #[test]
    fn test_parse_rejects_malformed_args() {
        assert!(CategorySpec::from_str("food").is_err());
        assert!(CategorySpec::from_str("=A010101").is_err());
        assert!(CategorySpec::from_str("food=").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let spec = CategorySpec::new("transport", "A0107");
        assert_eq!(CategorySpec::from_str(&spec.to_string()).unwrap(), spec);
    }

    #[test]
    fn test_default_categories() {
        let categories = default_categories();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[0], CategorySpec::new("restaurant_hotel", "A0111"));
        assert_eq!(categories[4], CategorySpec::new("food", "A010101"));
    }
}
