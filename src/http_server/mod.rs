//! # flatdb HTTP Server Module
//!
//! JSON CRUD over the users and posts collections.
//!
//! # Endpoints
//!
//! - `/users` - GET (list or `?id=`), POST, PUT `?id=`, DELETE `?id=`
//! - `/posts` - same shape; `date` is assigned on create
//! - anything else - route listing

pub mod body;
pub mod config;
pub mod errors;
pub mod observe;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::{App, HttpServer};
pub use state::AppState;
