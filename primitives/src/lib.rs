//! Building blocks shared by the `rust-da-kzg` prover and verifier.
//!
//! The data pipeline goes:
//! > user data -> [blob::Blob] -> field elements -> [rs::Encoder] -> [frame::Frame]s
//!
//! - [fft]: radix-2 FFT over the scalar field and over G1, plus polynomial
//!   recovery from erased evaluations ([recovery]).
//! - [params]: the `(chunk_length, num_chunks)` shape of an encoded blob.
//! - [rs]: systematic Reed-Solomon encoding into cosets of the evaluation
//!   domain, and decoding from any sufficient subset of chunks.
//! - [srs]: loading the structured reference string from gnark-layout point
//!   files.
//! - [config]: settings shared by the prover and the verifier.

pub mod blob;
pub mod config;
pub mod consts;
pub mod errors;
pub mod fft;
pub mod frame;
pub mod helpers;
pub mod params;
pub mod polynomial;
pub mod recovery;
pub mod rs;
pub mod srs;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod traits;
