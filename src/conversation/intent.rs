//! Keyword intent classifier
//!
//! Keyword groups are tested in a fixed priority order against the
//! lower-cased message and the first group with any substring hit wins.
//! The lists and the order are part of the observable behaviour (including
//! the odd matches, e.g. "oi" inside "noite"), so keep them as they are.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Farewell,
    SuggestionRequest,
    DishInfo,
    PriceInquiry,
    OrderRequest,
    MenuRequest,
    DishLookup,
    ChitChat,
    /// Only produced by the degraded reply
    Error,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Farewell => "farewell",
            Intent::SuggestionRequest => "suggestion_request",
            Intent::DishInfo => "dish_info",
            Intent::PriceInquiry => "price_inquiry",
            Intent::OrderRequest => "order_request",
            Intent::MenuRequest => "menu_request",
            Intent::DishLookup => "dish_lookup",
            Intent::ChitChat => "chit_chat",
            Intent::Error => "error",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        let intent = match label {
            "greeting" => Intent::Greeting,
            "farewell" => Intent::Farewell,
            "suggestion_request" => Intent::SuggestionRequest,
            "dish_info" => Intent::DishInfo,
            "price_inquiry" => Intent::PriceInquiry,
            "order_request" => Intent::OrderRequest,
            "menu_request" => Intent::MenuRequest,
            "dish_lookup" => Intent::DishLookup,
            "chit_chat" => Intent::ChitChat,
            "error" => Intent::Error,
            _ => return None,
        };
        Some(intent)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword groups in priority order
const KEYWORD_GROUPS: &[(Intent, &[&str])] = &[
    (
        Intent::Greeting,
        &["oi", "olá", "ola", "bom dia", "boa tarde", "boa noite", "salve"],
    ),
    (
        Intent::Farewell,
        &["tchau", "até", "obrigado", "valeu", "bye"],
    ),
    (
        Intent::SuggestionRequest,
        &["sugerir", "recomendar", "indicar", "o que", "qual"],
    ),
    (
        Intent::DishInfo,
        &["ingrediente", "feito", "como", "receita", "preparo"],
    ),
    (
        Intent::PriceInquiry,
        &["preço", "custa", "valor", "quanto"],
    ),
    (
        Intent::OrderRequest,
        &["pedir", "quero", "comprar", "pedido"],
    ),
    (
        Intent::MenuRequest,
        &["cardápio", "cardapio", "menu", "pratos", "opções", "opcoes"],
    ),
];

/// Classify a free-text message
pub fn classify(catalog: &Catalog, message: &str) -> Intent {
    let lower = message.to_lowercase();

    for (intent, keywords) in KEYWORD_GROUPS {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return *intent;
        }
    }

    if catalog.find_in_message(message).is_some() {
        Intent::DishLookup
    } else {
        Intent::ChitChat
    }
}
