//! Menu catalog
//!
//! The catalog is the restaurant's reference data: every dish with its
//! category, ingredients, price and preparation time. It is built once at
//! startup (from the built-in table or a TOML menu file) and then shared
//! read-only across all request handlers. There is no mutation path.
//!
//! Iteration order is the menu order and matters: name lookups, suggestion
//! lists and the menu reply all take the *first* match.

mod data;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub use data::builtin_dishes;

/// Dish category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "prato_principal")]
    MainCourse,
    #[serde(rename = "sobremesa")]
    Dessert,
    #[serde(rename = "aperitivo")]
    Appetizer,
    #[serde(rename = "acompanhamento")]
    Side,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::MainCourse,
        Category::Dessert,
        Category::Appetizer,
        Category::Side,
    ];

    /// Storage value, as written to the database and the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::MainCourse => "prato_principal",
            Category::Dessert => "sobremesa",
            Category::Appetizer => "aperitivo",
            Category::Side => "acompanhamento",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::MainCourse => "Prato Principal",
            Category::Dessert => "Sobremesa",
            Category::Appetizer => "Aperitivo",
            Category::Side => "Acompanhamento",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "prato_principal" | "prato principal" => Ok(Category::MainCourse),
            "sobremesa" => Ok(Category::Dessert),
            "aperitivo" => Ok(Category::Appetizer),
            "acompanhamento" => Ok(Category::Side),
            other => Err(CatalogError::UnknownCategory(other.to_string())),
        }
    }
}

/// Accepts the storage value or the display label, like `FromStr`
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single dish on the menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    /// Stable identifier (e.g. "pato_no_tucumã")
    pub key: String,

    /// Display name, unique across the menu
    pub name: String,

    pub category: Category,

    #[serde(default)]
    pub ingredients: Vec<String>,

    #[serde(default)]
    pub description: String,

    pub price: Decimal,

    /// Free-text preparation time ("20 minutos", "7 dias")
    #[serde(default)]
    pub prep_time: String,

    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

/// Errors raised while building a catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Duplicate dish {field}: {value}")]
    Duplicate { field: &'static str, value: String },

    #[error("Dish with key '{0}' has an empty name or key")]
    Blank(String),

    #[error("Dish '{name}' has a negative price: {price}")]
    NegativePrice { name: String, price: Decimal },
}

/// Immutable, ordered menu
#[derive(Debug, Clone)]
pub struct Catalog {
    dishes: Vec<Dish>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate names/keys and negative prices
    pub fn new(dishes: Vec<Dish>) -> Result<Self, CatalogError> {
        let mut keys = HashSet::new();
        let mut names = HashSet::new();

        for dish in &dishes {
            if dish.key.trim().is_empty() || dish.name.trim().is_empty() {
                return Err(CatalogError::Blank(dish.key.clone()));
            }
            if dish.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice {
                    name: dish.name.clone(),
                    price: dish.price,
                });
            }
            if !keys.insert(dish.key.clone()) {
                return Err(CatalogError::Duplicate {
                    field: "key",
                    value: dish.key.clone(),
                });
            }
            if !names.insert(dish.name.clone()) {
                return Err(CatalogError::Duplicate {
                    field: "name",
                    value: dish.name.clone(),
                });
            }
        }

        Ok(Self { dishes })
    }

    /// The house menu
    pub fn builtin() -> Self {
        Self {
            dishes: builtin_dishes(),
        }
    }

    pub fn all(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    /// Get a dish by its stable key
    pub fn get(&self, key: &str) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.key == key)
    }

    /// Get a dish by its exact display name
    pub fn by_exact_name(&self, name: &str) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.name == name)
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Dish> {
        self.dishes.iter().filter(move |d| d.category == category)
    }

    /// Dishes priced at or under `max_price`
    pub fn at_or_under(&self, max_price: Decimal) -> impl Iterator<Item = &Dish> {
        self.dishes.iter().filter(move |d| d.price <= max_price)
    }

    /// Dishes priced strictly above `min_price`
    pub fn above(&self, min_price: Decimal) -> impl Iterator<Item = &Dish> {
        self.dishes.iter().filter(move |d| d.price > min_price)
    }

    /// Resolve a user-supplied dish name.
    ///
    /// Matches the first dish whose name contains the query
    /// (case-insensitive) or whose key contains it.
    pub fn find_by_name(&self, query: &str) -> Option<&Dish> {
        let query = query.to_lowercase();
        self.dishes
            .iter()
            .find(|d| {
                d.name.to_lowercase().contains(&query) || d.key.to_lowercase().contains(&query)
            })
    }

    /// Find the first dish mentioned anywhere in a free-text message
    pub fn find_in_message(&self, message: &str) -> Option<&Dish> {
        let message = message.to_lowercase();
        self.dishes
            .iter()
            .find(|d| {
                message.contains(&d.name.to_lowercase()) || message.contains(&d.key.to_lowercase())
            })
    }

    /// Dishes that use an ingredient (case-insensitive contains)
    pub fn by_ingredient(&self, ingredient: &str) -> Vec<&Dish> {
        let ingredient = ingredient.to_lowercase();
        self.dishes
            .iter()
            .filter(|d| {
                d.ingredients
                    .iter()
                    .any(|i| i.to_lowercase().contains(&ingredient))
            })
            .collect()
    }

    /// Structured dish lookup; a missing dish is a result, not an error
    pub fn lookup(&self, name: &str) -> Lookup {
        match self.find_by_name(name) {
            Some(dish) => Lookup {
                found: true,
                dish: Some(dish.clone()),
                message: None,
                status: LookupStatus::Success,
            },
            None => Lookup {
                found: false,
                dish: None,
                message: Some(format!(
                    "Não encontrei o prato '{}' em nosso cardápio.",
                    name
                )),
                status: LookupStatus::NotFound,
            },
        }
    }

    /// Menu listing, optionally restricted to one category
    pub fn listing(&self, category: Option<Category>) -> Listing {
        let dishes: Vec<MenuEntry> = self
            .dishes
            .iter()
            .filter(|d| category.map_or(true, |c| d.category == c))
            .map(MenuEntry::from)
            .collect();

        match category {
            Some(c) if dishes.is_empty() => Listing::EmptyCategory {
                dishes,
                message: format!("Não temos pratos na categoria '{}'.", c.as_str()),
            },
            _ => Listing::Success {
                total: dishes.len(),
                dishes,
                category,
            },
        }
    }

    /// Number of dishes per category, in category order
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        Category::ALL
            .iter()
            .map(|&category| CategoryCount {
                category,
                name: category.label(),
                count: self.by_category(category).count(),
            })
            .collect()
    }
}

/// Result of [`Catalog::lookup`]
#[derive(Debug, Clone, Serialize)]
pub struct Lookup {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dish: Option<Dish>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: LookupStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    Success,
    NotFound,
}

/// Short menu line
#[derive(Debug, Clone, Serialize)]
pub struct MenuEntry {
    pub name: String,
    pub category: Category,
    pub price: Decimal,
    pub description: String,
    pub available: bool,
}

impl From<&Dish> for MenuEntry {
    fn from(dish: &Dish) -> Self {
        Self {
            name: dish.name.clone(),
            category: dish.category,
            price: dish.price,
            description: dish.description.clone(),
            available: dish.available,
        }
    }
}

/// Result of [`Catalog::listing`]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Listing {
    Success {
        dishes: Vec<MenuEntry>,
        total: usize,
        category: Option<Category>,
    },
    EmptyCategory {
        dishes: Vec<MenuEntry>,
        message: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub name: &'static str,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order_and_size() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.all()[0].key, "açaí");
        assert_eq!(catalog.all()[9].key, "farofa_de_banana");
        assert!(Catalog::new(builtin_dishes()).is_ok());
    }

    #[test]
    fn test_lookup_found() {
        let catalog = Catalog::builtin();
        let result = catalog.lookup("tacacá");
        assert!(result.found);
        assert_eq!(result.status, LookupStatus::Success);
        assert_eq!(result.dish.unwrap().price, Decimal::new(1200, 2));
    }

    #[test]
    fn test_lookup_not_found() {
        let catalog = Catalog::builtin();
        let result = catalog.lookup("prato que não existe");
        assert!(!result.found);
        assert_eq!(result.status, LookupStatus::NotFound);
        assert!(result.message.unwrap().contains("prato que não existe"));
    }

    #[test]
    fn test_find_by_name_is_case_insensitive_and_first_wins() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.find_by_name("MANIÇOBA").unwrap().key, "maniçoba");
        // "tucumã" is contained in "Pato no Tucumã", which comes first
        assert_eq!(catalog.find_by_name("tucumã").unwrap().key, "pato_no_tucumã");
        assert_eq!(catalog.find_by_name("cupuaçu").unwrap().name, "Doce de Cupuaçu");
    }

    #[test]
    fn test_find_in_message() {
        let catalog = Catalog::builtin();
        let dish = catalog.find_in_message("Me fala do Pirarucu de Casaca").unwrap();
        assert_eq!(dish.key, "pirarucu_de_casaca");
        assert!(catalog.find_in_message("nada a ver").is_none());
    }

    #[test]
    fn test_price_filters() {
        let catalog = Catalog::builtin();
        let cheap: Vec<_> = catalog.at_or_under(Decimal::new(15, 0)).map(|d| d.key.as_str()).collect();
        assert_eq!(
            cheap,
            vec!["açaí", "tacacá", "cupuaçu", "tucumã", "farofa_de_banana"]
        );
        assert!(catalog.above(Decimal::new(15, 0)).all(|d| d.price > Decimal::new(15, 0)));
    }

    #[test]
    fn test_by_ingredient() {
        let catalog = Catalog::builtin();
        let keys: Vec<_> = catalog
            .by_ingredient("Camarão Seco")
            .iter()
            .map(|d| d.key.as_str())
            .collect();
        assert_eq!(keys, vec!["tacacá", "caruru"]);
    }

    #[test]
    fn test_listing_by_category() {
        let catalog = Catalog::builtin();
        match catalog.listing(Some(Category::Side)) {
            Listing::Success { dishes, total, .. } => {
                assert_eq!(total, 1);
                assert_eq!(dishes[0].name, "Farofa de Banana");
            }
            other => panic!("unexpected listing {:?}", other),
        }
    }

    #[test]
    fn test_listing_empty_category() {
        let catalog = Catalog::new(vec![Catalog::builtin().all()[0].clone()]).unwrap();
        let listing = catalog.listing(Some(Category::Appetizer));
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["status"], "empty_category");
        assert!(json["dishes"].as_array().unwrap().is_empty());
        assert_eq!(json["message"], "Não temos pratos na categoria 'aperitivo'.");
    }

    #[test]
    fn test_mixed_case_key_matches() {
        let mut dish = builtin_dishes()[1].clone();
        dish.key = "Tacaca".into();
        dish.name = "Tacacá Especial".into();
        let catalog = Catalog::new(vec![dish]).unwrap();

        assert_eq!(catalog.find_by_name("tacaca").unwrap().key, "Tacaca");
        assert_eq!(catalog.find_in_message("me fala do tacaca").unwrap().key, "Tacaca");
        assert_eq!(
            crate::conversation::classify(&catalog, "me fala do tacaca"),
            crate::conversation::Intent::DishLookup
        );
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let mut dishes = builtin_dishes();
        let mut copy = dishes[0].clone();
        copy.key = "outro".into();
        dishes.push(copy);
        assert!(matches!(
            Catalog::new(dishes),
            Err(CatalogError::Duplicate { field: "name", .. })
        ));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("prato principal".parse::<Category>().unwrap(), Category::MainCourse);
        assert_eq!("Sobremesa".parse::<Category>().unwrap(), Category::Dessert);
        assert!("bebida".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_deserializes_labels() {
        for raw in ["prato_principal", "Prato Principal", "prato principal"] {
            let category: Category = serde_json::from_value(serde_json::json!(raw)).unwrap();
            assert_eq!(category, Category::MainCourse);
        }
        let side: Category = serde_json::from_value(serde_json::json!("Acompanhamento")).unwrap();
        assert_eq!(side, Category::Side);
        assert!(serde_json::from_value::<Category>(serde_json::json!("bebida")).is_err());
    }

    #[test]
    fn test_category_counts() {
        let counts = Catalog::builtin().category_counts();
        assert_eq!(counts[0].count, 6);
        assert_eq!(counts[1].count, 2);
        assert_eq!(counts[2].count, 1);
        assert_eq!(counts[3].count, 1);
    }
}
