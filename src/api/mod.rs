//! API Module
//!
//! HTTP handlers and routing for the read-through service.
//!
//! # Endpoints
//! - `POST /lookup` - Resolve a batch of keys through the cache
//! - `GET /lookup/:key` - Resolve one key through the cache
//! - `PUT /origin/:key` - Write a record to the origin
//! - `GET /keys` - List cached keys with expiry
//! - `DELETE /keys/:key` - Drop one cached key
//! - `DELETE /keys` - Drop every cached key
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
