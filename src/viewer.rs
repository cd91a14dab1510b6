//! Viewer resolution: host-facing seams and the capability resolver.

pub mod host;
pub mod resolve;
