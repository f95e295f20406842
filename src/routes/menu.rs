//! Menu routes

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Dish, Listing, Lookup, MenuEntry};
use crate::core::DishRecord;
use crate::AppState;

use super::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    #[serde(default, alias = "categoria")]
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default, alias = "nome")]
    pub name: Option<String>,
}

/// Search result: the stored row when the dish was seeded, otherwise the
/// catalog lookup as-is
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Stored { found: bool, dish: DishRecord },
    Catalog(Lookup),
}

#[derive(Debug, Serialize)]
pub struct CategoryEntry {
    pub value: Category,
    pub name: &'static str,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryEntry>,
}

fn parse_category(raw: Option<&str>) -> ApiResult<Option<Category>> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => raw
            .parse::<Category>()
            .map(Some)
            .map_err(|e| ApiError::BadRequest(e.to_string())),
        _ => Ok(None),
    }
}

fn required_name(name: Option<String>) -> ApiResult<String> {
    name.filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Parâmetro nome é obrigatório".into()))
}

/// `GET /api/menu`: available dishes, optionally for one category.
pub async fn list_menu(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> ApiResult<Json<Vec<DishRecord>>> {
    let category = parse_category(query.category.as_deref())?;
    let dishes = state.store.list_dishes(category, true).await?;
    Ok(Json(dishes))
}

/// `GET /api/menu/:id`: one stored dish.
pub async fn get_dish(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DishRecord>> {
    state
        .store
        .get_dish(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Prato {} não encontrado", id)))
}

/// `GET /api/dishes/search?name=`: look a dish up by (partial) name.
pub async fn search_dish(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<SearchResponse>> {
    let name = required_name(query.name)?;

    let lookup = state.catalog.lookup(&name);
    if !lookup.found {
        return Ok(Json(SearchResponse::Catalog(lookup)));
    }

    match state.store.search_dish(&name).await? {
        Some(dish) => Ok(Json(SearchResponse::Stored { found: true, dish })),
        None => Ok(Json(SearchResponse::Catalog(lookup))),
    }
}

/// `GET /api/categories`: the dish categories with their menu counts.
pub async fn list_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let categories = state
        .catalog
        .category_counts()
        .into_iter()
        .map(|c| CategoryEntry {
            value: c.category,
            name: c.name,
            count: c.count,
        })
        .collect();

    Json(CategoriesResponse { categories })
}

/// `GET /api/catalog`: the in-memory catalog, optionally for one category.
pub async fn catalog_listing(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> ApiResult<Json<Listing>> {
    let category = parse_category(query.category.as_deref())?;
    Ok(Json(state.catalog.listing(category)))
}

/// `GET /api/catalog/dish?name=`: exact display-name match.
pub async fn catalog_dish(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Dish>> {
    let name = required_name(query.name)?;
    state
        .catalog
        .by_exact_name(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Prato '{}' não encontrado", name)))
}

/// `GET /api/catalog/ingredient?name=`: dishes made with an ingredient.
pub async fn catalog_by_ingredient(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<MenuEntry>>> {
    let name = required_name(query.name)?;
    let dishes = state
        .catalog
        .by_ingredient(&name)
        .into_iter()
        .map(MenuEntry::from)
        .collect();
    Ok(Json(dishes))
}
