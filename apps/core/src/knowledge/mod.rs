//! # Knowledge Module
//!
//! The static farming data the assistant answers from.
//!
//! ## Components
//! - `schema`: document types (`KnowledgeBase`, `CropProfile`, ...)
//! - `loader`: reads the document from a file or an http(s) URL
//! - `store`: shared load state with reload support

pub mod loader;
pub mod schema;
pub mod store;

pub use loader::DataSource;
pub use schema::{
    CropProfile, CropTable, DiseaseEntry, GrowingConditions, KnowledgeBase, PestEntry,
    SOIL_MANAGEMENT_TOPIC,
};
pub use store::{KnowledgeStore, LoadState};
