//! API routes

mod bot;
mod error;
mod menu;
mod orders;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// `?session_id=` filter shared by the listing routes
#[derive(Debug, Default, Deserialize)]
pub struct SessionFilter {
    #[serde(default, alias = "sessao_id")]
    pub session_id: Option<String>,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn status(State(state): State<AppState>) -> Json<Value> {
    let menu_source = state
        .config
        .menu_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "builtin".to_string());

    Json(json!({
        "status": "online",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "API do Bot Restaurante Paraense",
        "dishes": state.catalog.len(),
        "menu_source": menu_source,
        "endpoints": {
            "bot_chat": "/api/bot/chat",
            "menu": "/api/menu",
            "search_dish": "/api/dishes/search",
            "categories": "/api/categories",
            "catalog": "/api/catalog",
            "calculate_order": "/api/orders/calculate",
            "orders": "/api/orders",
            "conversations": "/api/conversations",
        }
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/status", get(status))
        .route("/api/bot/chat", post(bot::chat))
        .route("/api/conversations", get(bot::list_conversations))
        .route("/api/menu", get(menu::list_menu))
        .route("/api/menu/:id", get(menu::get_dish))
        .route("/api/dishes/search", get(menu::search_dish))
        .route("/api/categories", get(menu::list_categories))
        .route("/api/catalog", get(menu::catalog_listing))
        .route("/api/catalog/dish", get(menu::catalog_dish))
        .route("/api/catalog/ingredient", get(menu::catalog_by_ingredient))
        .route("/api/orders/calculate", post(orders::calculate))
        .route("/api/orders", post(orders::create_order).get(orders::list_orders))
        .route(
            "/api/orders/:id",
            get(orders::get_order).patch(orders::update_order),
        )
}
