//! Course Requisite Compilation
//!
//! Compiles free-text course-catalog prerequisite and corequisite prose into
//! normalized AND/OR requirement trees, with credit-exclusion groups and a few
//! advisory flags alongside.

pub mod domain;
pub use domain::{
    CompiledRecord, Config, CourseId, CreditExclusion, Group, LogicHint, Operator, Requirement,
    Tag,
};

/// The text-to-tree compiler.
pub mod compiler;
pub use compiler::compile;

/// Catalog row ingestion and batch extraction.
pub mod ingest;

/// Audit of extracted output.
pub mod audit;
pub use audit::AuditReport;
