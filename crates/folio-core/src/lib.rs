//! # folio-core
//!
//! Core types, ID prefixes, and error types for Folio.
//!
//! This crate provides the foundational types shared across all Folio crates:
//! - Entity structs for users, timeline entries, portfolio items, and messages
//! - Category and audit enums, including legacy category spellings
//! - Input payloads for create operations and their validation rules
//! - Reorder batches and the move-up/move-down planning helpers
//! - Cross-cutting error types
//! - Audit detail sub-types

pub mod audit_detail;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod inputs;
pub mod reorder;
pub mod validation;
