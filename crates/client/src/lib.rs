//! Typed HTTP client for the gift catalog API.
//!
//! [`GiftsClient`] mirrors the server's CRUD surface, re-checks ids and
//! prices with the same validators the server uses before sending anything,
//! and computes the reporting aggregates locally from `GET /gifts`.

pub mod client;
pub mod envelope;
pub mod error;

pub use client::GiftsClient;
pub use error::ClientError;
