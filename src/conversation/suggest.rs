//! Dish suggestions returned alongside a reply

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::intent::Intent;
use crate::catalog::{Catalog, Category, Dish};

/// Keys suggested for menu and recommendation requests
pub const POPULAR_DISHES: [&str; 3] = ["tacacá", "açaí", "pato_no_tucumã"];

/// Price ceiling (inclusive, whole currency units) for budget suggestions
pub const BUDGET_THRESHOLD: i64 = 15;

const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub price: Decimal,
    pub category: Category,
}

impl From<&Dish> for Suggestion {
    fn from(dish: &Dish) -> Self {
        Self {
            name: dish.name.clone(),
            price: dish.price,
            category: dish.category,
        }
    }
}

/// Suggestions for a classified message; empty for most intents
pub fn suggestions(catalog: &Catalog, _message: &str, intent: Intent) -> Vec<Suggestion> {
    match intent {
        Intent::SuggestionRequest | Intent::MenuRequest => POPULAR_DISHES
            .iter()
            .filter_map(|key| catalog.get(key))
            .map(Suggestion::from)
            .collect(),
        Intent::PriceInquiry => catalog
            .at_or_under(Decimal::new(BUDGET_THRESHOLD, 0))
            .take(MAX_SUGGESTIONS)
            .map(Suggestion::from)
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_dishes;

    #[test]
    fn test_popular_for_menu_and_suggestion() {
        let catalog = Catalog::builtin();
        for intent in [Intent::MenuRequest, Intent::SuggestionRequest] {
            let names: Vec<_> = suggestions(&catalog, "", intent)
                .into_iter()
                .map(|s| s.name)
                .collect();
            assert_eq!(names, vec!["Tacacá", "Açaí", "Pato no Tucumã"]);
        }
    }

    #[test]
    fn test_missing_popular_dish_is_skipped() {
        let dishes = builtin_dishes()
            .into_iter()
            .filter(|d| d.key != "açaí")
            .collect();
        let catalog = Catalog::new(dishes).unwrap();
        let result = suggestions(&catalog, "", Intent::SuggestionRequest);
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].name, "Pato no Tucumã");
    }

    #[test]
    fn test_price_suggestions_are_cheap() {
        let result = suggestions(&Catalog::builtin(), "", Intent::PriceInquiry);
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|s| s.price <= Decimal::new(15, 0)));
        assert_eq!(result[0].name, "Açaí");
    }

    #[test]
    fn test_other_intents_have_no_suggestions() {
        let catalog = Catalog::builtin();
        assert!(suggestions(&catalog, "oi", Intent::Greeting).is_empty());
        assert!(suggestions(&catalog, "tacacá", Intent::DishLookup).is_empty());
    }

    #[test]
    fn test_serializes_price_as_number() {
        let json = serde_json::to_value(suggestions(&Catalog::builtin(), "", Intent::MenuRequest)).unwrap();
        assert_eq!(json[0]["price"], serde_json::json!(12.0));
        assert_eq!(json[0]["category"], "prato_principal");
    }
}
