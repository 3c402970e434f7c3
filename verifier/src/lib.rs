//! Verification side of the data availability KZG engine: single frame
//! checks against a blob commitment, universal verification of samples
//! spanning many blobs with one pairing ([batch]), and the blob length and
//! commitment equivalence checks.

pub mod batch;
pub mod verify;
