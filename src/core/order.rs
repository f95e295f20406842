//! Order pricing
//!
//! Resolves each requested line against the catalog and totals the order.
//! An unknown dish fails the whole calculation; lines resolved before it
//! are discarded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// One requested line, already validated at the HTTP boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineRequest {
    pub name: String,
    pub quantity: u32,
}

impl OrderLineRequest {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// A priced line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotedItem {
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
}

impl QuotedItem {
    pub fn new(name: impl Into<String>, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
            subtotal: line_subtotal(unit_price, quantity),
        }
    }
}

/// Successful calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderQuote {
    pub total: Decimal,
    pub items: Vec<QuotedItem>,
    pub item_count: usize,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Prato '{0}' não encontrado.")]
    DishNotFound(String),
}

/// `unit_price × quantity`
pub fn line_subtotal(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Price an order against the catalog
pub fn calculate_order(catalog: &Catalog, lines: &[OrderLineRequest]) -> Result<OrderQuote, OrderError> {
    let mut total = Decimal::ZERO;
    let mut items = Vec::with_capacity(lines.len());

    for line in lines {
        let dish = catalog
            .find_by_name(&line.name)
            .ok_or_else(|| OrderError::DishNotFound(line.name.clone()))?;

        let item = QuotedItem::new(dish.name.clone(), dish.price, line.quantity);
        total += item.subtotal;
        items.push(item);
    }

    Ok(OrderQuote {
        total,
        item_count: items.len(),
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_two_lines() {
        let catalog = Catalog::builtin();
        let quote = calculate_order(
            &catalog,
            &[
                OrderLineRequest::new("tacacá", 2),
                OrderLineRequest::new("açaí", 1),
            ],
        )
        .unwrap();

        assert_eq!(quote.total, Decimal::new(3900, 2));
        assert_eq!(quote.item_count, 2);
        assert_eq!(quote.items[0].name, "Tacacá");
        assert_eq!(quote.items[0].unit_price, Decimal::new(1200, 2));
        assert_eq!(quote.items[0].subtotal, Decimal::new(2400, 2));
        assert_eq!(quote.items[1].name, "Açaí");
        assert_eq!(quote.items[1].subtotal, Decimal::new(1500, 2));
    }

    #[test]
    fn test_unknown_dish_fails_whole_order() {
        let catalog = Catalog::builtin();
        let err = calculate_order(
            &catalog,
            &[
                OrderLineRequest::new("tacacá", 1),
                OrderLineRequest::new("prato inexistente", 1),
            ],
        )
        .unwrap_err();
        assert_eq!(err, OrderError::DishNotFound("prato inexistente".into()));
        assert_eq!(err.to_string(), "Prato 'prato inexistente' não encontrado.");
    }

    #[test]
    fn test_total_is_order_independent_items_are_not() {
        let catalog = Catalog::builtin();
        let a = [
            OrderLineRequest::new("caruru", 3),
            OrderLineRequest::new("farofa", 2),
        ];
        let b = [a[1].clone(), a[0].clone()];

        let qa = calculate_order(&catalog, &a).unwrap();
        let qb = calculate_order(&catalog, &b).unwrap();
        assert_eq!(qa.total, qb.total);
        assert_eq!(qa.total, Decimal::new(9000, 2));
        assert_eq!(qa.items[0].name, "Caruru");
        assert_eq!(qb.items[0].name, "Farofa de Banana");
    }

    #[test]
    fn test_empty_order_totals_zero() {
        let quote = calculate_order(&Catalog::builtin(), &[]).unwrap();
        assert!(quote.total.is_zero());
        assert!(quote.items.is_empty());
    }

    #[test]
    fn test_partial_name_resolves_to_first_match() {
        let quote = calculate_order(&Catalog::builtin(), &[OrderLineRequest::new("PIRARUCU", 1)]).unwrap();
        assert_eq!(quote.items[0].name, "Pirarucu de Casaca");
        assert_eq!(quote.total, Decimal::new(45, 0));
    }
}
