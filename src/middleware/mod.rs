pub mod context;
pub mod logger;
