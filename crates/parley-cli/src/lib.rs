pub mod app;
pub mod command;
pub mod config;
pub mod logging;
pub mod render;
pub mod repl;
