pub mod fetch;
pub mod mapping;
pub mod output;
pub mod parser;
pub mod stats;
