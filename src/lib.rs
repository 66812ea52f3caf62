pub mod cbs;
pub mod clock;
pub mod commands;
pub mod config;
pub mod console;
pub mod dailyfaceoff;
pub mod discord;
pub mod error;
pub mod format;
pub mod http;
pub mod model;
pub mod page;
pub mod platform;
pub mod reports;
pub mod retry;
pub mod scheduler;
