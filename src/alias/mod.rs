pub mod store;

pub use store::AliasStore;
