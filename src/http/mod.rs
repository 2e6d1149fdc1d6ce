//! HTTP side of the status page responder.
//!
//! This is deliberately not a general HTTP server: every data event on a
//! connection is answered with a freshly rendered status page, whatever it
//! contains. Two request paths double as commands for the indicator output.
//!
//! # Architecture
//!
//! - **`connection`**: per-connection state machine driving data events
//! - **`handler`**: command, sample and render for one request
//! - **`request`**: owned, NUL-terminated copy of a data event's payload
//! - **`parser`**: request-line tokenizer
//! - **`command`**: recognises the `/on` and `/off` commands
//! - **`response`**: bounded status page renderer
//! - **`writer`**: writes and flushes a rendered response
//! - **`stats`**: buffer and connection counters
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌────────────────┐
//!        │  AwaitingData  │ ← data event: copy, command, sample,
//!        └───────┬────────┘   render, write, flush, release
//!                │
//!                │ peer closed, error, or response sent
//!                │ with close-after-response
//!                ▼
//!        ┌────────────────┐
//!        │    Closing     │ ← shut the stream down
//!        └───────┬────────┘
//!                ▼
//!        ┌────────────────┐
//!        │     Closed     │
//!        └────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use button_web::board::{Board, SimulatedBoard};
//! use button_web::http::connection::Connection;
//! use button_web::http::handler::RequestHandler;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let handler = RequestHandler::new(Board::new(SimulatedBoard::default()).into_shared());
//!     let listener = TcpListener::bind("0.0.0.0:80").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let handler = handler.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, handler);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod command;
pub mod connection;
pub mod handler;
pub mod parser;
pub mod request;
pub mod response;
pub mod stats;
pub mod writer;
