pub mod store;

pub use store::TrendStore;
