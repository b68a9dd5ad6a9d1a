//! Domain models for the shop.
//!
//! These types map directly onto rows in the `shop` schema and double as
//! JSON response bodies; the password hash never appears on any of them.

pub mod cart;
pub mod interaction;
pub mod product;
pub mod user;

pub use cart::{Cart, CartLine};
pub use interaction::{HistoryEntry, Interaction, ProductSnapshot};
pub use product::Product;
pub use user::User;
