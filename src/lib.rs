//! flatdb - CRUD over users and posts kept in flat JSON files

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod storage;
