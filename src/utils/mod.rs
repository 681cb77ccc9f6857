pub mod param_cache;
pub mod sanitize;
