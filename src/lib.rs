//! Button Web - board status page over HTTP
//!
//! Serves a self-refreshing page showing two buttons and the die
//! temperature, and toggles an indicator output on `GET /on` / `GET /off`.

pub mod board;
pub mod config;
pub mod http;
pub mod server;
