pub mod cli;
pub mod commands;
pub mod errors;
pub mod eurostat;
pub mod filters;
pub mod models;
