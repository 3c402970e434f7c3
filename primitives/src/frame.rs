use ark_bn254::{Fr, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ff::{BigInteger, PrimeField};
use byteorder::{BigEndian, ByteOrder};

use crate::{
    consts::{BYTES_PER_FIELD_ELEMENT, SIZE_OF_G1_AFFINE_UNCOMPRESSED},
    errors::FrameError,
    traits::{ReadFrFromBytes, ReadPointFromBytes, WritePointToBytes},
};

const LENGTH_PREFIX_SIZE: usize = 4;

/// One erasure coded chunk: the coefficients of the polynomial interpolating
/// the blob over the chunk's coset, and the KZG multi-opening proof for that
/// coset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub proof: G1Affine,
    pub coeffs: Vec<Fr>,
}

impl Frame {
    pub fn new(proof: G1Affine, coeffs: Vec<Fr>) -> Self {
        Self { proof, coeffs }
    }

    /// Number of coefficients, equal to the chunk length it was encoded with.
    pub fn length(&self) -> usize {
        self.coeffs.len()
    }

    pub fn encoded_len(&self) -> usize {
        SIZE_OF_G1_AFFINE_UNCOMPRESSED
            + LENGTH_PREFIX_SIZE
            + self.coeffs.len() * BYTES_PER_FIELD_ELEMENT
    }

    /// Serializes the frame as
    /// `proof (64 bytes) || u32 BE coefficient count || coeffs (32 bytes BE each)`.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.proof.write_point_to_bytes_be());

        let mut len = [0u8; LENGTH_PREFIX_SIZE];
        BigEndian::write_u32(&mut len, self.coeffs.len() as u32);
        out.extend_from_slice(&len);

        for coeff in &self.coeffs {
            out.extend_from_slice(&coeff.into_bigint().to_bytes_be());
        }
        out
    }

    /// Inverse of [Frame::encode]. The whole input must be consumed.
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        let (frame, consumed) = Self::decode_prefix(bytes)?;
        if consumed != bytes.len() {
            return Err(FrameError::TrailingBytes(bytes.len() - consumed));
        }
        Ok(frame)
    }

    // Decodes one frame from the front of `bytes`, returning it with the number of bytes read.
    fn decode_prefix(bytes: &[u8]) -> Result<(Self, usize), FrameError> {
        let header = SIZE_OF_G1_AFFINE_UNCOMPRESSED + LENGTH_PREFIX_SIZE;
        if bytes.len() < header {
            return Err(FrameError::Truncated {
                needed: header,
                got: bytes.len(),
            });
        }

        let proof = G1Affine::read_point_from_bytes_be(&bytes[..SIZE_OF_G1_AFFINE_UNCOMPRESSED])
            .map_err(|e| FrameError::InvalidPoint(e.to_string()))?;
        let num_coeffs =
            BigEndian::read_u32(&bytes[SIZE_OF_G1_AFFINE_UNCOMPRESSED..header]) as usize;

        let total = num_coeffs
            .checked_mul(BYTES_PER_FIELD_ELEMENT)
            .and_then(|n| n.checked_add(header))
            .ok_or(FrameError::Truncated {
                needed: usize::MAX,
                got: bytes.len(),
            })?;
        if bytes.len() < total {
            return Err(FrameError::Truncated {
                needed: total,
                got: bytes.len(),
            });
        }

        let coeffs = bytes[header..total]
            .chunks_exact(BYTES_PER_FIELD_ELEMENT)
            .enumerate()
            .map(|(i, chunk)| {
                Fr::deserialize_from_bytes_be(chunk).map_err(|_| FrameError::InvalidFieldElement(i))
            })
            .collect::<Result<Vec<Fr>, FrameError>>()?;

        Ok((Self { proof, coeffs }, total))
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            proof: G1Affine::identity(),
            coeffs: Vec::new(),
        }
    }
}

/// Serializes a list of frames as `u32 BE count || frame*`. Each frame
/// carries its own length prefix, so frames of different lengths may mix.
pub fn encode_frames(frames: &[Frame]) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        LENGTH_PREFIX_SIZE + frames.iter().map(Frame::encoded_len).sum::<usize>(),
    );
    let mut count = [0u8; LENGTH_PREFIX_SIZE];
    BigEndian::write_u32(&mut count, frames.len() as u32);
    out.extend_from_slice(&count);
    for frame in frames {
        out.extend_from_slice(&frame.encode());
    }
    out
}

pub fn decode_frames(bytes: &[u8]) -> Result<Vec<Frame>, FrameError> {
    if bytes.len() < LENGTH_PREFIX_SIZE {
        return Err(FrameError::Truncated {
            needed: LENGTH_PREFIX_SIZE,
            got: bytes.len(),
        });
    }
    let count = BigEndian::read_u32(&bytes[..LENGTH_PREFIX_SIZE]) as usize;
    let mut offset = LENGTH_PREFIX_SIZE;
    // Cap the preallocation: the count is untrusted input.
    let mut frames = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        let (frame, consumed) = Frame::decode_prefix(&bytes[offset..])?;
        offset += consumed;
        frames.push(frame);
    }
    if offset != bytes.len() {
        return Err(FrameError::TrailingBytes(bytes.len() - offset));
    }
    Ok(frames)
}

/// The unit consumed by universal verification: a chunk together with the
/// commitment of the blob it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub commitment: G1Affine,
    pub chunk: Frame,
    /// Chunk index of the frame within its blob.
    pub assignment_index: u32,
    /// Row of the blob within the batch being verified.
    pub blob_index: usize,
}

/// Commitments published alongside an encoded blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobCommitments {
    pub commitment: G1Affine,
    pub length_commitment: G2Affine,
    pub length_proof: G2Affine,
    /// Length of the committed polynomial in symbols.
    pub length: u32,
}
