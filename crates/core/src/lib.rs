//! Core types for the helpdesk chat agent
//!
//! This crate provides the foundational types shared by all other crates:
//! - Language definitions for the supported reply languages
//! - The persisted conversation record

pub mod conversation;
pub mod language;

pub use conversation::Conversation;
pub use language::Language;
