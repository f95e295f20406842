//! Restaurant persistence using SQLite
//!
//! Stores the seeded dishes, every conversation turn and every created
//! order with its lines. Money columns hold decimal text and timestamps
//! RFC 3339 text; an order's item snapshot is stored as JSON.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

use crate::catalog::{Category, Dish};
use crate::conversation::{Intent, Suggestion};

use super::order::{line_subtotal, OrderQuote, QuotedItem};

/// Errors from the store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt row: {0}")]
    Corrupt(String),

    #[error("Order {0} vanished after insert")]
    OrderMissing(i64),
}

/// Order lifecycle. Transitions are driven from outside; any status may
/// be set at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(StoreError::Corrupt(format!("unknown order status '{}'", other))),
        }
    }
}

/// A dish as stored
#[derive(Debug, Clone, Serialize)]
pub struct DishRecord {
    pub id: i64,
    pub key: String,
    pub name: String,
    pub category: Category,
    pub ingredients: Vec<String>,
    pub description: String,
    pub price: Decimal,
    pub prep_time: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of a seeding run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub created: usize,
    pub updated: usize,
    pub total: i64,
}

/// A turn to append
#[derive(Debug, Clone)]
pub struct NewTurn {
    pub session_id: String,
    pub user_message: String,
    pub bot_reply: String,
    pub intent: Intent,
    pub suggestions: Vec<Suggestion>,
}

/// One stored exchange
#[derive(Debug, Clone, Serialize)]
pub struct ConversationTurn {
    pub id: i64,
    pub session_id: String,
    pub user_message: String,
    pub bot_reply: String,
    pub intent: Intent,
    pub suggestions: Vec<Suggestion>,
    pub created_at: DateTime<Utc>,
}

/// A stored order line
#[derive(Debug, Clone, Serialize)]
pub struct OrderLineRecord {
    pub id: i64,
    pub dish_id: i64,
    pub dish_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub notes: String,
}

/// A stored order
#[derive(Debug, Clone, Serialize)]
pub struct OrderRecord {
    pub id: i64,
    pub session_id: String,
    /// Snapshot of the priced lines at creation
    pub items: Vec<QuotedItem>,
    pub lines: Vec<OrderLineRecord>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields an operator may change on an existing order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderUpdate {
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default, alias = "observacoes")]
    pub notes: Option<String>,
}

#[derive(sqlx::FromRow)]
struct DishRow {
    id: i64,
    dish_key: String,
    name: String,
    category: String,
    ingredients: String,
    description: String,
    price: String,
    prep_time: String,
    available: bool,
    created_at: String,
    updated_at: String,
}

#[derive(sqlx::FromRow)]
struct TurnRow {
    id: i64,
    session_id: String,
    user_message: String,
    bot_reply: String,
    intent: String,
    suggestions: String,
    created_at: String,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    session_id: String,
    items: String,
    total: String,
    status: String,
    notes: String,
    created_at: String,
    updated_at: String,
}

#[derive(sqlx::FromRow)]
struct OrderLineRow {
    id: i64,
    dish_id: i64,
    dish_name: String,
    quantity: i64,
    unit_price: String,
    subtotal: String,
    notes: String,
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("bad timestamp '{}': {}", value, e)))
}

fn parse_decimal(value: &str) -> Result<Decimal, StoreError> {
    Decimal::from_str(value)
        .map_err(|e| StoreError::Corrupt(format!("bad amount '{}': {}", value, e)))
}

fn split_ingredients(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect()
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

impl TryFrom<DishRow> for DishRecord {
    type Error = StoreError;

    fn try_from(row: DishRow) -> Result<Self, Self::Error> {
        Ok(DishRecord {
            id: row.id,
            key: row.dish_key,
            name: row.name,
            category: row
                .category
                .parse()
                .map_err(|_| StoreError::Corrupt(format!("unknown category '{}'", row.category)))?,
            ingredients: split_ingredients(&row.ingredients),
            description: row.description,
            price: parse_decimal(&row.price)?,
            prep_time: row.prep_time,
            available: row.available,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

impl TryFrom<TurnRow> for ConversationTurn {
    type Error = StoreError;

    fn try_from(row: TurnRow) -> Result<Self, Self::Error> {
        let intent = Intent::parse(&row.intent)
            .ok_or_else(|| StoreError::Corrupt(format!("unknown intent '{}'", row.intent)))?;
        // Unreadable suggestion payloads read back as no suggestions
        let suggestions = serde_json::from_str(&row.suggestions).unwrap_or_default();

        Ok(ConversationTurn {
            id: row.id,
            session_id: row.session_id,
            user_message: row.user_message,
            bot_reply: row.bot_reply,
            intent,
            suggestions,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

impl TryFrom<OrderLineRow> for OrderLineRecord {
    type Error = StoreError;

    fn try_from(row: OrderLineRow) -> Result<Self, Self::Error> {
        Ok(OrderLineRecord {
            id: row.id,
            dish_id: row.dish_id,
            dish_name: row.dish_name,
            quantity: u32::try_from(row.quantity)
                .map_err(|_| StoreError::Corrupt(format!("bad quantity {}", row.quantity)))?,
            unit_price: parse_decimal(&row.unit_price)?,
            subtotal: parse_decimal(&row.subtotal)?,
            notes: row.notes,
        })
    }
}

const DISH_COLUMNS: &str = "id, dish_key, name, category, ingredients, description, price, prep_time, available, created_at, updated_at";

/// Store for dishes, conversations and orders
pub struct RestaurantStore {
    pool: SqlitePool,
}

impl RestaurantStore {
    /// Open (or create) the SQLite database at the given path
    pub async fn new(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create an in-memory store
    pub async fn new_in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Close the pool; later queries fail
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS dishes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                dish_key TEXT NOT NULL DEFAULT '',
                name TEXT NOT NULL UNIQUE,
                category TEXT NOT NULL,
                ingredients TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                price TEXT NOT NULL,
                prep_time TEXT NOT NULL DEFAULT '',
                available INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS conversations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                user_message TEXT NOT NULL,
                bot_reply TEXT NOT NULL,
                intent TEXT NOT NULL,
                suggestions TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_conversations_session
            ON conversations(session_id, created_at)
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS orders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                items TEXT NOT NULL DEFAULT '[]',
                total TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                notes TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_orders_session
            ON orders(session_id, created_at)
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS order_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                order_id INTEGER NOT NULL,
                dish_id INTEGER NOT NULL,
                quantity INTEGER NOT NULL DEFAULT 1,
                unit_price TEXT NOT NULL,
                subtotal TEXT NOT NULL,
                notes TEXT NOT NULL DEFAULT '',
                FOREIGN KEY (order_id) REFERENCES orders(id) ON DELETE CASCADE,
                FOREIGN KEY (dish_id) REFERENCES dishes(id) ON DELETE CASCADE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ========== Dishes ==========

    /// Upsert dishes by name. Existing rows are updated in place.
    pub async fn seed_dishes(&self, dishes: &[Dish]) -> Result<SeedReport, StoreError> {
        let mut created = 0;
        let mut updated = 0;
        let mut tx = self.pool.begin().await?;

        for dish in dishes {
            let ingredients = dish.ingredients.join(", ");
            let price = dish.price.to_string();
            let timestamp = now();

            let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM dishes WHERE name = ?")
                .bind(&dish.name)
                .fetch_optional(&mut *tx)
                .await?;

            match existing {
                Some((id,)) => {
                    sqlx::query(
                        r#"
                        UPDATE dishes
                        SET dish_key = ?, category = ?, ingredients = ?, description = ?,
                            price = ?, prep_time = ?, available = ?, updated_at = ?
                        WHERE id = ?
                        "#,
                    )
                    .bind(&dish.key)
                    .bind(dish.category.as_str())
                    .bind(&ingredients)
                    .bind(&dish.description)
                    .bind(&price)
                    .bind(&dish.prep_time)
                    .bind(dish.available)
                    .bind(&timestamp)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;

                    updated += 1;
                    tracing::debug!(dish = %dish.name, "Updated dish");
                }
                None => {
                    sqlx::query(
                        r#"
                        INSERT INTO dishes
                            (dish_key, name, category, ingredients, description, price,
                             prep_time, available, created_at, updated_at)
                        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                        "#,
                    )
                    .bind(&dish.key)
                    .bind(&dish.name)
                    .bind(dish.category.as_str())
                    .bind(&ingredients)
                    .bind(&dish.description)
                    .bind(&price)
                    .bind(&dish.prep_time)
                    .bind(dish.available)
                    .bind(&timestamp)
                    .bind(&timestamp)
                    .execute(&mut *tx)
                    .await?;

                    created += 1;
                    tracing::debug!(dish = %dish.name, "Created dish");
                }
            }
        }

        tx.commit().await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM dishes")
            .fetch_one(&self.pool)
            .await?;

        Ok(SeedReport {
            created,
            updated,
            total,
        })
    }

    /// List stored dishes, ordered by category then name
    pub async fn list_dishes(
        &self,
        category: Option<Category>,
        available_only: bool,
    ) -> Result<Vec<DishRecord>, StoreError> {
        let rows: Vec<DishRow> = sqlx::query_as(&format!(
            r#"
            SELECT {DISH_COLUMNS}
            FROM dishes
            WHERE (?1 IS NULL OR category = ?1)
              AND (?2 = 0 OR available = 1)
            ORDER BY category ASC, name ASC
            "#
        ))
        .bind(category.map(|c| c.as_str()))
        .bind(available_only)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DishRecord::try_from).collect()
    }

    pub async fn get_dish(&self, id: i64) -> Result<Option<DishRecord>, StoreError> {
        let row: Option<DishRow> =
            sqlx::query_as(&format!("SELECT {DISH_COLUMNS} FROM dishes WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(DishRecord::try_from).transpose()
    }

    /// First stored dish whose name contains `name`, ignoring case.
    ///
    /// Filtered in Rust: SQLite's LIKE only folds ASCII.
    pub async fn search_dish(&self, name: &str) -> Result<Option<DishRecord>, StoreError> {
        let needle = name.to_lowercase();
        Ok(self
            .list_dishes(None, false)
            .await?
            .into_iter()
            .find(|d| d.name.to_lowercase().contains(&needle)))
    }

    // ========== Conversations ==========

    /// Record one exchange
    pub async fn append_turn(&self, turn: NewTurn) -> Result<ConversationTurn, StoreError> {
        let suggestions = serde_json::to_string(&turn.suggestions)?;
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO conversations
                (session_id, user_message, bot_reply, intent, suggestions, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&turn.session_id)
        .bind(&turn.user_message)
        .bind(&turn.bot_reply)
        .bind(turn.intent.as_str())
        .bind(&suggestions)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(ConversationTurn {
            id: result.last_insert_rowid(),
            session_id: turn.session_id,
            user_message: turn.user_message,
            bot_reply: turn.bot_reply,
            intent: turn.intent,
            suggestions: turn.suggestions,
            created_at,
        })
    }

    /// Most recent turns first, optionally for one session
    pub async fn list_turns(
        &self,
        session_id: Option<&str>,
        limit: usize,
    ) -> Result<Vec<ConversationTurn>, StoreError> {
        let rows: Vec<TurnRow> = sqlx::query_as(
            r#"
            SELECT id, session_id, user_message, bot_reply, intent, suggestions, created_at
            FROM conversations
            WHERE (?1 IS NULL OR session_id = ?1)
            ORDER BY created_at DESC, id DESC
            LIMIT ?2
            "#,
        )
        .bind(session_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ConversationTurn::try_from).collect()
    }

    // ========== Orders ==========

    /// Persist a priced order.
    ///
    /// One line row is written per quoted item whose dish exists in the
    /// `dishes` table; items without a stored dish stay in the snapshot only.
    pub async fn create_order(
        &self,
        session_id: &str,
        quote: &OrderQuote,
        notes: &str,
    ) -> Result<OrderRecord, StoreError> {
        let items = serde_json::to_string(&quote.items)?;
        let timestamp = now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders (session_id, items, total, status, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(session_id)
        .bind(&items)
        .bind(quote.total.to_string())
        .bind(OrderStatus::Pending.as_str())
        .bind(notes)
        .bind(&timestamp)
        .bind(&timestamp)
        .execute(&mut *tx)
        .await?;
        let order_id = result.last_insert_rowid();

        for item in &quote.items {
            let dish: Option<(i64,)> = sqlx::query_as("SELECT id FROM dishes WHERE name = ?")
                .bind(&item.name)
                .fetch_optional(&mut *tx)
                .await?;

            let Some((dish_id,)) = dish else {
                tracing::warn!(order_id, dish = %item.name, "Dish not stored, skipping order line");
                continue;
            };

            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, dish_id, quantity, unit_price, subtotal)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(order_id)
            .bind(dish_id)
            .bind(i64::from(item.quantity))
            .bind(item.unit_price.to_string())
            .bind(line_subtotal(item.unit_price, item.quantity).to_string())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_order(order_id)
            .await?
            .ok_or(StoreError::OrderMissing(order_id))
    }

    pub async fn get_order(&self, id: i64) -> Result<Option<OrderRecord>, StoreError> {
        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, session_id, items, total, status, notes, created_at, updated_at
            FROM orders
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate_order(row).await?)),
            None => Ok(None),
        }
    }

    /// Most recent orders first, optionally for one session
    pub async fn list_orders(&self, session_id: Option<&str>) -> Result<Vec<OrderRecord>, StoreError> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, session_id, items, total, status, notes, created_at, updated_at
            FROM orders
            WHERE (?1 IS NULL OR session_id = ?1)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            orders.push(self.hydrate_order(row).await?);
        }
        Ok(orders)
    }

    /// Apply an update; `None` when the order doesn't exist
    pub async fn update_order(
        &self,
        id: i64,
        update: &OrderUpdate,
    ) -> Result<Option<OrderRecord>, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = COALESCE(?, status),
                notes = COALESCE(?, notes),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(update.status.map(|s| s.as_str()))
        .bind(update.notes.as_deref())
        .bind(now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_order(id).await
    }

    async fn hydrate_order(&self, row: OrderRow) -> Result<OrderRecord, StoreError> {
        let lines: Vec<OrderLineRow> = sqlx::query_as(
            r#"
            SELECT oi.id, oi.dish_id, d.name AS dish_name, oi.quantity,
                   oi.unit_price, oi.subtotal, oi.notes
            FROM order_items oi
            JOIN dishes d ON d.id = oi.dish_id
            WHERE oi.order_id = ?
            ORDER BY oi.id ASC
            "#,
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(OrderRecord {
            id: row.id,
            session_id: row.session_id,
            items: serde_json::from_str(&row.items)?,
            lines: lines
                .into_iter()
                .map(OrderLineRecord::try_from)
                .collect::<Result<_, _>>()?,
            total: parse_decimal(&row.total)?,
            status: row.status.parse()?,
            notes: row.notes,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{builtin_dishes, Catalog};
    use crate::core::order::{calculate_order, OrderLineRequest};

    async fn seeded_store() -> RestaurantStore {
        let store = RestaurantStore::new_in_memory().await.unwrap();
        store.seed_dishes(&builtin_dishes()).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_seed_creates_then_updates() {
        let store = RestaurantStore::new_in_memory().await.unwrap();

        let first = store.seed_dishes(&builtin_dishes()).await.unwrap();
        assert_eq!(first, SeedReport { created: 10, updated: 0, total: 10 });

        let mut dishes = builtin_dishes();
        dishes[1].price = Decimal::new(1350, 2);
        let second = store.seed_dishes(&dishes).await.unwrap();
        assert_eq!(second, SeedReport { created: 0, updated: 10, total: 10 });

        let tacaca = store.search_dish("tacacá").await.unwrap().unwrap();
        assert_eq!(tacaca.price, Decimal::new(1350, 2));
        assert_eq!(tacaca.ingredients.len(), 6);
    }

    #[tokio::test]
    async fn test_list_dishes_filters() {
        let store = RestaurantStore::new_in_memory().await.unwrap();
        let mut dishes = builtin_dishes();
        dishes[0].available = false; // açaí
        store.seed_dishes(&dishes).await.unwrap();

        let desserts = store.list_dishes(Some(Category::Dessert), true).await.unwrap();
        assert_eq!(desserts.len(), 1);
        assert_eq!(desserts[0].name, "Doce de Cupuaçu");

        let everything = store.list_dishes(None, false).await.unwrap();
        assert_eq!(everything.len(), 10);

        let by_id = store.get_dish(everything[0].id).await.unwrap().unwrap();
        assert_eq!(by_id.name, everything[0].name);
        assert!(store.get_dish(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_dish_ignores_case() {
        let store = seeded_store().await;
        let dish = store.search_dish("AÇAÍ").await.unwrap().unwrap();
        assert_eq!(dish.name, "Açaí");
        assert!(store.search_dish("pizza").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_turns_round_trip() {
        let store = RestaurantStore::new_in_memory().await.unwrap();
        let catalog = Catalog::builtin();

        store
            .append_turn(NewTurn {
                session_id: "s1".into(),
                user_message: "menu".into(),
                bot_reply: "aqui".into(),
                intent: Intent::MenuRequest,
                suggestions: crate::conversation::suggestions(&catalog, "menu", Intent::MenuRequest),
            })
            .await
            .unwrap();
        store
            .append_turn(NewTurn {
                session_id: "s2".into(),
                user_message: "oi".into(),
                bot_reply: "olá".into(),
                intent: Intent::Greeting,
                suggestions: vec![],
            })
            .await
            .unwrap();

        let s1 = store.list_turns(Some("s1"), 50).await.unwrap();
        assert_eq!(s1.len(), 1);
        assert_eq!(s1[0].intent, Intent::MenuRequest);
        assert_eq!(s1[0].suggestions.len(), 3);

        let all = store.list_turns(None, 50).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].session_id, "s2");
    }

    #[tokio::test]
    async fn test_unreadable_suggestions_read_back_empty() {
        let store = RestaurantStore::new_in_memory().await.unwrap();
        sqlx::query(
            "INSERT INTO conversations (session_id, user_message, bot_reply, intent, suggestions, created_at) VALUES ('s', 'm', 'r', 'chit_chat', 'not json', ?)",
        )
        .bind(now())
        .execute(&store.pool)
        .await
        .unwrap();

        let turns = store.list_turns(Some("s"), 10).await.unwrap();
        assert!(turns[0].suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_create_order_with_lines() {
        let store = seeded_store().await;
        let quote = calculate_order(
            &Catalog::builtin(),
            &[OrderLineRequest::new("tacacá", 2), OrderLineRequest::new("açaí", 1)],
        )
        .unwrap();

        let order = store.create_order("sess", &quote, "sem pimenta").await.unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, Decimal::new(3900, 2));
        assert_eq!(order.items, quote.items);
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[0].dish_name, "Tacacá");
        assert_eq!(order.lines[0].subtotal, Decimal::new(2400, 2));

        let line_sum: Decimal = order.lines.iter().map(|l| l.subtotal).sum();
        assert_eq!(line_sum, order.total);
    }

    #[tokio::test]
    async fn test_create_order_skips_unstored_dishes() {
        let store = RestaurantStore::new_in_memory().await.unwrap();
        let quote = calculate_order(&Catalog::builtin(), &[OrderLineRequest::new("caruru", 1)]).unwrap();

        let order = store.create_order("sess", &quote, "").await.unwrap();
        assert!(order.lines.is_empty());
        assert_eq!(order.items.len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_list_orders() {
        let store = seeded_store().await;
        let catalog = Catalog::builtin();
        let quote = calculate_order(&catalog, &[OrderLineRequest::new("maniçoba", 1)]).unwrap();

        let a = store.create_order("a", &quote, "").await.unwrap();
        store.create_order("b", &quote, "").await.unwrap();

        let updated = store
            .update_order(
                a.id,
                &OrderUpdate {
                    status: Some(OrderStatus::Preparing),
                    notes: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Preparing);
        assert_eq!(updated.notes, "");

        assert_eq!(store.list_orders(Some("a")).await.unwrap().len(), 1);
        assert_eq!(store.list_orders(None).await.unwrap().len(), 2);
        assert!(store
            .update_order(424242, &OrderUpdate::default())
            .await
            .unwrap()
            .is_none());
    }
}
