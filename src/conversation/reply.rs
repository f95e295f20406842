//! Reply generation

use rust_decimal::Decimal;
use std::fmt::{self, Write};

use super::intent::Intent;
use super::suggest::BUDGET_THRESHOLD;
use super::templates;
use crate::catalog::{Catalog, Category, Dish};

/// Build the reply text for a classified message.
///
/// Catalog-backed replies read prices and names at call time. Rendering
/// only fails if writing into the buffer fails.
pub fn generate_reply(catalog: &Catalog, message: &str, intent: Intent) -> Result<String, fmt::Error> {
    let reply = match intent {
        Intent::Greeting => templates::GREETING.to_string(),
        Intent::Farewell => templates::FAREWELL.to_string(),
        Intent::SuggestionRequest => templates::SUGGESTION.to_string(),
        Intent::DishInfo => templates::DISH_INFO.to_string(),
        Intent::OrderRequest => templates::ORDER.to_string(),
        Intent::MenuRequest => menu_reply(catalog)?,
        Intent::PriceInquiry => price_reply(catalog)?,
        Intent::DishLookup => match catalog.find_in_message(message) {
            Some(dish) => dish_reply(dish)?,
            // Classifier and generator disagree only if the menu changed in between
            None => templates::CHIT_CHAT.to_string(),
        },
        Intent::ChitChat | Intent::Error => templates::CHIT_CHAT.to_string(),
    };
    Ok(reply)
}

fn menu_line(out: &mut String, dish: &Dish) -> fmt::Result {
    writeln!(out, "• {} - R$ {:.2}", dish.name, dish.price)
}

fn menu_reply(catalog: &Catalog) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write!(out, "{}\n\n", templates::MENU_HEADING)?;

    writeln!(out, "{}", templates::MENU_MAIN_COURSES)?;
    for dish in catalog.by_category(Category::MainCourse).take(4) {
        menu_line(&mut out, dish)?;
    }

    write!(out, "\n{}\n", templates::MENU_DESSERTS)?;
    for dish in catalog.by_category(Category::Dessert).take(2) {
        menu_line(&mut out, dish)?;
    }

    write!(out, "\n{}", templates::MENU_CLOSING)?;
    Ok(out)
}

fn price_reply(catalog: &Catalog) -> Result<String, fmt::Error> {
    let threshold = Decimal::new(BUDGET_THRESHOLD, 0);
    let mut out = String::new();
    write!(out, "{}\n\n", templates::PRICE_HEADING)?;

    writeln!(out, "{}", templates::PRICE_BUDGET)?;
    for dish in catalog.at_or_under(threshold).take(3) {
        menu_line(&mut out, dish)?;
    }

    write!(out, "\n{}\n", templates::PRICE_SPECIAL)?;
    for dish in catalog.above(threshold).take(3) {
        menu_line(&mut out, dish)?;
    }

    Ok(out)
}

fn dish_reply(dish: &Dish) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write!(out, "🍽️ **{}**\n\n", dish.name)?;
    write!(out, "📝 {}\n\n", dish.description)?;
    writeln!(out, "🥘 **Ingredientes:** {}", dish.ingredients.join(", "))?;
    writeln!(out, "💰 **Preço:** R$ {:.2}", dish.price)?;
    write!(out, "⏱️ **Tempo de preparo:** {}\n\n", dish.prep_time)?;
    out.push_str(templates::DISH_CLOSING);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_reply_lists_first_dishes() {
        let reply = generate_reply(&Catalog::builtin(), "menu", Intent::MenuRequest).unwrap();
        assert!(reply.starts_with(templates::MENU_HEADING));
        assert!(reply.contains("• Tacacá - R$ 12.00\n"));
        assert!(reply.contains("• Caruru - R$ 22.00\n"));
        // only the first four main courses
        assert!(!reply.contains("Pirarucu"));
        assert!(reply.contains("• Açaí - R$ 15.00\n"));
        assert!(reply.contains("• Doce de Cupuaçu - R$ 8.00\n"));
        assert!(reply.ends_with(templates::MENU_CLOSING));
    }

    #[test]
    fn test_price_reply_splits_on_threshold() {
        let reply = generate_reply(&Catalog::builtin(), "quanto?", Intent::PriceInquiry).unwrap();
        let (budget, special) = reply.split_once(templates::PRICE_SPECIAL).unwrap();
        assert!(budget.contains("Açaí - R$ 15.00"));
        assert!(budget.contains("Tacacá - R$ 12.00"));
        assert!(budget.contains("Doce de Cupuaçu - R$ 8.00"));
        assert!(!budget.contains("Tucumã - R$ 10.00"));
        assert!(special.contains("Pato no Tucumã - R$ 35.00"));
        assert!(special.contains("Maniçoba - R$ 28.00"));
        assert!(special.contains("Caruru - R$ 22.00"));
    }

    #[test]
    fn test_dish_reply() {
        let reply = generate_reply(&Catalog::builtin(), "e o tacacá?", Intent::DishLookup).unwrap();
        assert!(reply.starts_with("🍽️ **Tacacá**"));
        assert!(reply.contains("**Ingredientes:** tucumã, camarão seco, jambu"));
        assert!(reply.contains("**Preço:** R$ 12.00"));
        assert!(reply.contains("**Tempo de preparo:** 20 minutos"));
        assert!(reply.ends_with(templates::DISH_CLOSING));
    }

    #[test]
    fn test_dish_lookup_without_match_falls_back() {
        let reply = generate_reply(&Catalog::builtin(), "nada", Intent::DishLookup).unwrap();
        assert_eq!(reply, templates::CHIT_CHAT);
    }

    #[test]
    fn test_fixed_replies() {
        let catalog = Catalog::builtin();
        assert_eq!(generate_reply(&catalog, "oi", Intent::Greeting).unwrap(), templates::GREETING);
        assert_eq!(generate_reply(&catalog, "quero", Intent::OrderRequest).unwrap(), templates::ORDER);
    }
}
