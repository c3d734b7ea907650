//! Core types for Stockroom.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod order;
pub mod phone;
pub mod product;
pub mod visitor;

pub use cart::CartLine;
pub use email::{Email, EmailError};
pub use order::{Order, OrderForm, OrderId};
pub use phone::{Phone, PhoneError};
pub use product::{Product, ProductId};
pub use visitor::VisitorId;
