pub mod api;
pub mod blockchain;
