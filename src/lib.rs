pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod input;
pub mod normalize;
pub mod output;
pub mod records;
