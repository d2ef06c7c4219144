pub mod database;
pub mod observability;
pub mod tls;
