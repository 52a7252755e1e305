pub mod common;
pub mod config;
pub mod demo;
pub mod epic;
pub mod forecast;
pub mod mapping;
pub mod scenario;
pub mod snapshot;
pub mod team;
