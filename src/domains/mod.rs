//! Domains module containing business logic organized by bounded contexts.
//!
//! Each subdomain represents a specific area of functionality within the
//! file manager. There is currently a single domain: the sandboxed
//! filesystem operations.

pub mod fs;
