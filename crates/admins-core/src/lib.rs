pub mod error;
pub mod handle;
pub mod implementation;
pub mod jwt;
pub mod lookup;
pub mod memory;
pub mod models;
pub mod signup;
