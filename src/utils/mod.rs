pub mod data_cache;
pub mod date_range;
