pub mod logger;
pub mod raw_processing;
