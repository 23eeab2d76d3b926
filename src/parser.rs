pub mod common;
pub mod reader;
pub mod tx;
