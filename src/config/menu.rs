//! Menu configuration loaded from TOML files
//!
//! A deployment can replace the built-in dishes with its own menu:
//!
//! ```toml
//! [restaurant]
//! name = "Casa do Tacacá"
//!
//! [[dishes]]
//! key = "tacacá"
//! name = "Tacacá"
//! category = "prato_principal"
//! ingredients = ["tucumã", "jambu"]
//! description = "Servido em cuia"
//! price = 12.0
//! prep_time = "20 minutos"
//! ```
//!
//! Dishes keep the order they appear in the file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog::{Catalog, CatalogError, Dish};

/// Root menu file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuFile {
    /// Restaurant information
    #[serde(default)]
    pub restaurant: RestaurantInfo,

    /// Dishes, in menu order
    #[serde(default)]
    pub dishes: Vec<Dish>,
}

impl MenuFile {
    /// Load a menu from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a menu from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let menu: MenuFile = toml::from_str(content)?;
        Ok(menu)
    }

    /// Validate the dishes and freeze them into a catalog
    pub fn into_catalog(self) -> Result<Catalog, ConfigError> {
        let catalog = Catalog::new(self.dishes)?;
        if catalog.is_empty() {
            return Err(ConfigError::Validation("menu has no dishes".into()));
        }
        Ok(catalog)
    }
}

/// Restaurant identification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantInfo {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub city: Option<String>,
}

fn default_name() -> String {
    "Restaurante Paraense".to_string()
}

impl Default for RestaurantInfo {
    fn default() -> Self {
        Self {
            name: default_name(),
            city: None,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid menu: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use rust_decimal::Decimal;

    const SAMPLE_MENU: &str = r#"
[restaurant]
name = "Casa do Tacacá"
city = "Belém"

[[dishes]]
key = "tacacá"
name = "Tacacá"
category = "prato_principal"
ingredients = ["tucumã", "jambu", "camarão seco"]
description = "Servido em cuia"
price = 12.5
prep_time = "20 minutos"

[[dishes]]
key = "cupuaçu"
name = "Doce de Cupuaçu"
category = "sobremesa"
price = 8
available = false
"#;

    #[test]
    fn test_parse_menu() {
        let menu = MenuFile::from_str(SAMPLE_MENU).unwrap();
        assert_eq!(menu.restaurant.name, "Casa do Tacacá");
        assert_eq!(menu.restaurant.city, Some("Belém".to_string()));
        assert_eq!(menu.dishes.len(), 2);

        let catalog = menu.into_catalog().unwrap();
        let tacaca = catalog.get("tacacá").unwrap();
        assert_eq!(tacaca.price, Decimal::new(125, 1));
        assert_eq!(tacaca.category, Category::MainCourse);

        let doce = catalog.get("cupuaçu").unwrap();
        assert!(!doce.available);
        assert!(doce.ingredients.is_empty());
    }

    #[test]
    fn test_empty_menu_rejected() {
        let menu = MenuFile::from_str("[restaurant]\nname = \"Vazio\"\n").unwrap();
        assert!(matches!(menu.into_catalog(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_negative_price_rejected() {
        let toml = r#"
[[dishes]]
key = "x"
name = "X"
category = "aperitivo"
price = -1.0
"#;
        let menu = MenuFile::from_str(toml).unwrap();
        assert!(matches!(menu.into_catalog(), Err(ConfigError::Catalog(_))));
    }
}
