use ark_bn254::{g1, g2, Fr, G1Affine, G2Affine};
use ark_ec::short_weierstrass::Affine;
use ark_ec::AffineRepr;
use ark_ff::Field;
use ark_serialize::CanonicalDeserialize;

use crate::consts::{
    BYTES_PER_FIELD_ELEMENT, SIZE_OF_G1_AFFINE_UNCOMPRESSED, SIZE_OF_G2_AFFINE_UNCOMPRESSED,
};
use crate::helpers;

#[derive(Debug, thiserror::Error)]
pub enum PointReadError {
    #[error("Invalid point data: {0}")]
    InvalidData(String),

    #[error("Deserialization failed")]
    DeserializationError,
}

pub type Result<T> = core::result::Result<T, PointReadError>;

/// Points that can be decoded from the big endian, uncompressed gnark layout
/// used by SRS files and frame proofs.
pub trait ReadPointFromBytes: AffineRepr {
    /// Width of one serialized point in bytes.
    const SERIALIZED_SIZE: usize;

    fn read_point_from_bytes_be(bytes: &[u8]) -> Result<Self>;
}

pub trait WritePointToBytes: AffineRepr {
    fn write_point_to_bytes_be(&self) -> Vec<u8>;
}

impl ReadPointFromBytes for Affine<g1::Config> {
    const SERIALIZED_SIZE: usize = SIZE_OF_G1_AFFINE_UNCOMPRESSED;

    fn read_point_from_bytes_be(bytes: &[u8]) -> Result<G1Affine> {
        helpers::read_g1_point_from_bytes_be(bytes)
            .map_err(|e| PointReadError::InvalidData(e.to_string()))
    }
}

impl ReadPointFromBytes for Affine<g2::Config> {
    const SERIALIZED_SIZE: usize = SIZE_OF_G2_AFFINE_UNCOMPRESSED;

    fn read_point_from_bytes_be(bytes: &[u8]) -> Result<G2Affine> {
        helpers::read_g2_point_from_bytes_be(bytes)
            .map_err(|e| PointReadError::InvalidData(e.to_string()))
    }
}

impl WritePointToBytes for Affine<g1::Config> {
    fn write_point_to_bytes_be(&self) -> Vec<u8> {
        helpers::g1_point_to_bytes_be(self).to_vec()
    }
}

impl WritePointToBytes for Affine<g2::Config> {
    fn write_point_to_bytes_be(&self) -> Vec<u8> {
        helpers::g2_point_to_bytes_be(self).to_vec()
    }
}

// A new trait for Fr for reading from bytes in big endian format
pub trait ReadFrFromBytes: Field {
    fn deserialize_from_bytes_be(bytes: &[u8]) -> Result<Self>;
}

// Implement ReadFrFromBytes trait for Fr. Non-canonical encodings are rejected.
impl ReadFrFromBytes for Fr {
    fn deserialize_from_bytes_be(bytes: &[u8]) -> Result<Fr> {
        if bytes.len() != BYTES_PER_FIELD_ELEMENT {
            return Err(PointReadError::InvalidData(format!(
                "expected {} bytes, got {}",
                BYTES_PER_FIELD_ELEMENT,
                bytes.len()
            )));
        }
        let mut bytes_le = [0u8; BYTES_PER_FIELD_ELEMENT];
        bytes_le.copy_from_slice(bytes);
        bytes_le.reverse();
        Fr::deserialize_uncompressed(&bytes_le[..])
            .map_err(|_| PointReadError::DeserializationError)
    }
}
