//! Domain models for requisite compilation.
//!
//! This module contains the core domain types: normalized course identifiers,
//! requirement trees, compiled course records, and ingestion configuration.

/// Course identifier types and recognition.
pub mod course_id;
pub use course_id::{CourseId, Error as CourseIdError};

/// Requirement tree types.
pub mod requirement;
pub use requirement::{Group, Operator, Requirement, Tag, TreeError};

mod record;
pub use record::{CompiledRecord, CreditExclusion, LogicHint};

mod config;
pub use config::Config;
