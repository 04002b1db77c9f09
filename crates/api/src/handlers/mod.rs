pub mod gifts;
