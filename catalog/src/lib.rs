//! Pricewise Catalog
//!
//! Catalog of priced items. Each new item gets a second price derived from
//! the day's middle exchange rate.

pub mod config;
pub mod error;
pub mod item;
pub mod page;
pub mod repository;
pub mod service;

pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult, FieldError};
pub use item::{CatalogItem, NewItem};
pub use page::{Page, PageRequest};
pub use repository::{CatalogRepository, InMemoryCatalogRepository};
pub use service::CatalogService;
