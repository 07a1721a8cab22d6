//! # MPM Common Library
//!
//! Shared code for the music prompt manager services including:
//! - Prompt quality scoring and content validation
//! - Typed request validation
//! - Domain models (prompts, outputs, pages)
//! - Database initialization and repositories
//! - Configuration loading
//! - User-facing error message tables

pub mod config;
pub mod db;
pub mod error;
pub mod messages;
pub mod models;
pub mod pagination;
pub mod scoring;
pub mod service;
pub mod time;
pub mod validation;

pub use error::{Error, Result};
pub use scoring::{score_prompt, validate_prompt_content, PromptContent, QualityScore, QualityScoreResult};
