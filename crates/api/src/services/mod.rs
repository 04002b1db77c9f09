//! Access services sitting between handlers and the database.

pub mod gifts;
