pub mod dedup;
pub mod window;
