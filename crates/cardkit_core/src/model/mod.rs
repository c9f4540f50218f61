//! Input model for the render pipeline.
//!
//! # Responsibility
//! - Define the untrusted `Record` shape produced by upstream sources.
//! - Name the card kinds and the fixed placeholders each kind paints.
//!
//! # Invariants
//! - Nothing in this module produces markup from record data.

pub mod card;
pub mod record;
