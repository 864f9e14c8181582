pub mod api;
pub mod config;
pub mod db;
pub mod duration;
pub mod error;
pub mod text;
pub mod trends;
pub mod twitch;
pub mod twitter;
pub mod types;
