//! Encoding side of the data availability KZG engine.
//!
//! [prover::Prover] is the entry point: it turns a blob into Reed-Solomon
//! frames, each carrying the KZG multi-opening proof of its coset, together
//! with the blob commitment and the length commitment and proof.
//!
//! The proofs of all frames are computed at once ([multiproof]) from SRS
//! sub-tables that depend only on the encoding params ([srs_table]). Those
//! tables can be stored in a cache directory and reused across runs.

pub mod kzg;
pub mod multiproof;
pub mod prover;
pub mod srs_table;
