pub mod config;
pub mod filter;
pub mod record;
pub mod report;
pub mod run;
pub mod source;
pub mod stats;
