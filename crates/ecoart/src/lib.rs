//! `ecoart` - Project catalog for a community recycled-art initiative
//!
//! This library keeps the ordered list of art projects, mirrors it to a
//! named storage slot, filters it by category and derives the collective
//! impact statistics shown alongside it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod project;
pub mod storage;

pub use catalog::{ImpactStats, ProjectCatalog};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use project::{Category, CategoryFilter, ProjectDraft, ProjectRecord};
pub use storage::{SlotStore, Storage, StorageStats};
