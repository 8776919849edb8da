pub mod account;
pub mod cli;
pub mod config;
pub mod error;
