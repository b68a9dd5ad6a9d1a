//! Service layer: one service per component, each a thin orchestration of
//! repository calls. Services hold no state of their own; they borrow the
//! pool (and token signer where needed) per request.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod interaction;
pub mod recommend;
pub mod token;
