pub mod api;
pub mod client;
pub mod config;
pub mod filter;
pub mod logging;
pub mod models;
pub mod shutdown;
pub mod store;
pub mod view;
pub mod worker;
