//! Progress reporting for council sessions

pub mod reporter;
