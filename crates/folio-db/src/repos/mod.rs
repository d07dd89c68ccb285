//! Repository modules implementing CRUD operations for all Folio entities.
//!
//! Each module adds methods to `FolioService` via `impl FolioService` blocks.

pub mod about;
pub mod audit;
pub mod contact;
pub mod portfolio;
pub mod reorder;
pub mod timeline;
pub mod user;
