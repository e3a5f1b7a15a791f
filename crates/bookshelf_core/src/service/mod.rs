//! Use-case orchestration.
//!
//! # Responsibility
//! - Expose the catalog call surface (`LibraryUseCases`) to front-ends.
//! - Orchestrate repository calls through one unit of work per use case.
//! - Keep front-ends decoupled from storage details.

pub mod error;
pub mod library_service;
pub mod use_cases;
