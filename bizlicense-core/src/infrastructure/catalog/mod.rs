pub mod store;

pub use store::FileCatalogStore;
