//! The probe pipeline: lookup-table linkage and time-probe synchronization.

pub mod lut;
pub mod sync;
