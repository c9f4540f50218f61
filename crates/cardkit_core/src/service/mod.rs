//! Page-level use-case services.
//!
//! # Responsibility
//! - Drive the render pipeline over whole collections.
//! - Keep callers decoupled from source and target details.

pub mod collection_service;
