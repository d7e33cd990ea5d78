//! Storage module for PrismDB compression planning
//!
//! This module provides:
//! - Read-only table access (`Table`, `ColumnMatrix`, `TableView`)
//! - Compression size estimation and column classification

pub mod compression;
pub mod table;

pub use compression::*;
pub use table::*;
