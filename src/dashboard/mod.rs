pub mod aggregate;
pub mod service;
