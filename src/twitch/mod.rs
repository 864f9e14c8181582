pub mod auth;
pub mod client;

pub use auth::TokenProvider;
pub use client::TwitchClient;
