//! Order routes

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{
    calculate_order, OrderError, OrderLineRequest, OrderQuote, OrderRecord, OrderUpdate,
    QuotedItem,
};
use crate::AppState;

use super::error::{ApiError, ApiResult};
use super::SessionFilter;

/// One requested line as it arrives over the wire
#[derive(Debug, Deserialize)]
pub struct OrderItemInput {
    #[serde(default, alias = "nome")]
    pub name: Option<String>,

    /// Integer or numeric string; defaults to 1
    #[serde(default, alias = "quantidade")]
    pub quantity: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    #[serde(alias = "itens")]
    pub items: Vec<OrderItemInput>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default, alias = "sessao_id")]
    pub session_id: Option<String>,

    #[serde(default, alias = "itens")]
    pub items: Vec<OrderItemInput>,

    #[serde(default, alias = "observacoes")]
    pub notes: String,
}

/// Wire shape of a calculation
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Calculation {
    Success {
        total: Decimal,
        items: Vec<QuotedItem>,
        item_count: usize,
    },
    DishNotFound {
        total: Decimal,
        items: Vec<QuotedItem>,
        message: String,
    },
}

impl From<Result<OrderQuote, OrderError>> for Calculation {
    fn from(result: Result<OrderQuote, OrderError>) -> Self {
        match result {
            Ok(quote) => Calculation::Success {
                total: quote.total,
                items: quote.items,
                item_count: quote.item_count,
            },
            Err(e @ OrderError::DishNotFound(_)) => Calculation::DishNotFound {
                total: Decimal::ZERO,
                items: Vec::new(),
                message: e.to_string(),
            },
        }
    }
}

fn invalid_quantity() -> ApiError {
    ApiError::BadRequest("Quantidade deve ser um número inteiro positivo".into())
}

fn parse_quantity(raw: Option<&Value>) -> ApiResult<u32> {
    let quantity = match raw {
        None | Some(Value::Null) => return Ok(1),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(invalid_quantity)?,
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid_quantity())?,
        Some(_) => return Err(invalid_quantity()),
    };

    match u32::try_from(quantity) {
        Ok(q) if q > 0 => Ok(q),
        _ => Err(invalid_quantity()),
    }
}

/// Validate wire items into calculator input
pub fn parse_lines(items: &[OrderItemInput]) -> ApiResult<Vec<OrderLineRequest>> {
    items
        .iter()
        .map(|item| {
            let name = item
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .ok_or_else(|| ApiError::BadRequest("Cada item deve ter um 'nome'".into()))?;

            Ok(OrderLineRequest::new(name, parse_quantity(item.quantity.as_ref())?))
        })
        .collect()
}

/// `POST /api/orders/calculate`: price an order without saving it.
pub async fn calculate(
    State(state): State<AppState>,
    Json(request): Json<CalculateRequest>,
) -> ApiResult<Json<Calculation>> {
    let lines = parse_lines(&request.items)?;
    Ok(Json(calculate_order(&state.catalog, &lines).into()))
}

/// `POST /api/orders`: price and save an order.
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> ApiResult<Response> {
    if request.items.is_empty() {
        return Err(ApiError::BadRequest(
            "Lista de itens não pode estar vazia".into(),
        ));
    }

    let lines = parse_lines(&request.items)?;
    let quote = match calculate_order(&state.catalog, &lines) {
        Ok(quote) => quote,
        Err(e) => {
            tracing::info!(error = %e, "Rejected order");
            let body = Calculation::from(Err(e));
            return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
        }
    };

    let session_id = request
        .session_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let order = state
        .store
        .create_order(&session_id, &quote, &request.notes)
        .await?;

    tracing::info!(order_id = order.id, total = %order.total, "Created order");

    Ok((StatusCode::CREATED, Json(order)).into_response())
}

/// `GET /api/orders`: orders, newest first.
pub async fn list_orders(
    State(state): State<AppState>,
    Query(filter): Query<SessionFilter>,
) -> ApiResult<Json<Vec<OrderRecord>>> {
    let orders = state.store.list_orders(filter.session_id.as_deref()).await?;
    Ok(Json(orders))
}

/// `GET /api/orders/:id`
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<OrderRecord>> {
    state
        .store
        .get_order(id)
        .await?
        .map(Json)
        .ok_or_else(|| order_not_found(id))
}

/// `PATCH /api/orders/:id`: change status and/or notes.
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<OrderUpdate>,
) -> ApiResult<Json<OrderRecord>> {
    let order = state
        .store
        .update_order(id, &update)
        .await?
        .ok_or_else(|| order_not_found(id))?;

    tracing::info!(order_id = id, status = order.status.as_str(), "Updated order");
    Ok(Json(order))
}

fn order_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Pedido {} não encontrado", id))
}
