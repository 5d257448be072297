//! Council orchestration domain
//!
//! Types describing one council session: the phases it runs through, the
//! per-call results, and the assembled output.

pub mod entities;
pub mod report;
pub mod value_objects;
