//! Conversational assistant: intent detection, replies and suggestions
//!
//! Everything in here is a pure function of the incoming text and the
//! catalog. No dialogue state is kept between messages.

mod intent;
mod reply;
mod suggest;
pub mod templates;

pub use intent::{classify, Intent};
pub use reply::generate_reply;
pub use suggest::{suggestions, Suggestion};
