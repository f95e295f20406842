//! Core restaurant engine components
//!
//! Message processing, order pricing and persistence.

mod chat;
mod order;
mod store;

pub use chat::{ChatEngine, ChatResponse};
pub use order::{calculate_order, OrderError, OrderLineRequest, OrderQuote, QuotedItem};
pub use store::{
    ConversationTurn, DishRecord, OrderRecord, OrderUpdate, RestaurantStore, StoreError,
};
