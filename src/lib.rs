//! Server-side pagination of query results.
//!
//! Request parameters go through the extractors in [`pagination`], a
//! paginator fetches one window from a [`store::Store`] and returns a page
//! carrying its items and the relative URIs of the neighbouring pages.

pub mod api;
pub mod config;
pub mod error;
pub mod pagination;
pub mod state;
pub mod store;
pub mod types;
