//! Stockroom Core - Shared domain types.
//!
//! This crate provides the types shared between the storefront server and
//! any tooling built around it:
//!
//! - catalog entries ([`Product`], [`ProductId`])
//! - cart contents ([`CartLine`])
//! - order submission ([`OrderForm`], [`Order`], [`OrderId`])
//! - visitor identity ([`VisitorId`])
//! - validated contact fields ([`Email`], [`Phone`])
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no HTTP,
//! no storage access. This keeps it lightweight and usable anywhere.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
