use ark_bn254::{Bn254, Fq, Fq2, Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{BigInteger, PrimeField};
use ark_std::{One, Zero};
use core::cmp;
use sha2::{Digest, Sha256};

use crate::{
    consts::{
        BYTES_PER_FIELD_ELEMENT, POINT_FLAG_INFINITY, POINT_FLAG_MASK, POINT_FLAG_UNCOMPRESSED,
        SIZE_OF_G1_AFFINE_UNCOMPRESSED, SIZE_OF_G2_AFFINE_UNCOMPRESSED,
    },
    errors::KzgError,
};

/// Copies the referenced bytes array argument into a Vec, inserting an empty
/// byte at the front of every 31 bytes. The empty byte is padded at the low
/// address, because we use big endian to interpret a field element.
/// This ensures every 32 bytes is within the valid range of a field element for
/// the bn254 curve. If the input data is not a multiple of 31 bytes, the
/// remainder is added to the output by inserting a 0 and the remainder. The
/// output is thus not necessarily a multiple of 32.
pub fn convert_by_padding_empty_byte(data: &[u8]) -> Vec<u8> {
    let data_size = data.len();
    let parse_size = BYTES_PER_FIELD_ELEMENT - 1;
    let put_size = BYTES_PER_FIELD_ELEMENT;

    let data_len = data_size.div_ceil(parse_size);
    let mut valid_data = vec![0u8; data_len * put_size];
    let mut valid_end = valid_data.len();

    for i in 0..data_len {
        let start = i * parse_size;
        let mut end = (i + 1) * parse_size;
        if end > data_size {
            end = data_size;
            valid_end = end - start + 1 + i * put_size;
        }

        // The first byte of each chunk stays 0
        valid_data[i * BYTES_PER_FIELD_ELEMENT + 1..i * BYTES_PER_FIELD_ELEMENT + 1 + end - start]
            .copy_from_slice(&data[start..end]);
    }

    valid_data.truncate(valid_end);
    valid_data
}

/// Removes the first byte from each 32-byte chunk in a byte slice (including the last potentially incomplete one).
///
/// This function is the reverse of `convert_by_padding_empty_byte`. It assumes without
/// checking that the first byte of every chunk is the zero padding byte.
///
/// ```
/// # use rust_da_kzg_primitives::helpers::remove_empty_byte_from_padded_bytes_unchecked;
/// let mut input = vec![1u8; 70]; // Two complete 32-byte element plus 6 bytes
/// input[0] = 0; input[32] = 0;
///
/// let output = remove_empty_byte_from_padded_bytes_unchecked(&input);
///
/// assert_eq!(output, vec![1u8; 67]); // Two complete 31-byte element plus 5 bytes
/// ```
pub fn remove_empty_byte_from_padded_bytes_unchecked(data: &[u8]) -> Vec<u8> {
    let empty_bytes_to_remove = data.len().div_ceil(BYTES_PER_FIELD_ELEMENT);
    let mut output = Vec::with_capacity(data.len() - empty_bytes_to_remove);

    // Separate loop over the complete chunks so the compiler can vectorize it.
    for chunk in data.chunks_exact(BYTES_PER_FIELD_ELEMENT) {
        output.extend_from_slice(&chunk[1..]);
    }
    let remainder = data.chunks_exact(BYTES_PER_FIELD_ELEMENT).remainder();
    if !remainder.is_empty() {
        output.extend_from_slice(&remainder[1..]);
    }
    output
}

/// Pads the input data by prepending a 0x00 to each chunk of 31 bytes, and
/// aligns the output to a multiple of 32 bytes. Every 32-byte chunk of the
/// output is a canonical bn254 scalar.
pub fn pad_payload(input_data: &[u8]) -> Vec<u8> {
    let bytes_per_chunk = BYTES_PER_FIELD_ELEMENT - 1;
    let chunk_count = input_data.len().div_ceil(bytes_per_chunk);
    let output_length = chunk_count * BYTES_PER_FIELD_ELEMENT;

    let mut padded_output = vec![0u8; output_length];

    for chunk_idx in 0..chunk_count {
        let input_start = chunk_idx * bytes_per_chunk;
        let input_end = cmp::min(input_start + bytes_per_chunk, input_data.len());
        let output_start = chunk_idx * BYTES_PER_FIELD_ELEMENT + 1;

        padded_output[output_start..output_start + (input_end - input_start)]
            .copy_from_slice(&input_data[input_start..input_end]);
    }

    padded_output
}

pub fn set_bytes_canonical(data: &[u8]) -> Fr {
    Fr::from_be_bytes_mod_order(data)
}

pub fn get_num_element(data_len: usize, symbol_size: usize) -> usize {
    data_len.div_ceil(symbol_size)
}

/// Interprets `data` as a sequence of 32-byte big endian scalars. A trailing
/// partial chunk is right-padded with zeroes before conversion. Fails with
/// [KzgError::InvalidFieldElement] on the first chunk that is not smaller
/// than the modulus.
pub fn to_fr_array(data: &[u8]) -> Result<Vec<Fr>, KzgError> {
    data.chunks(BYTES_PER_FIELD_ELEMENT)
        .enumerate()
        .map(|(i, chunk)| {
            let mut padded = [0u8; BYTES_PER_FIELD_ELEMENT];
            padded[..chunk.len()].copy_from_slice(chunk);
            fr_from_be_bytes_canonical(&padded).ok_or_else(|| {
                KzgError::InvalidFieldElement(format!(
                    "Field element at position {} is not canonical",
                    i
                ))
            })
        })
        .collect()
}

fn fr_from_be_bytes_canonical(bytes: &[u8; BYTES_PER_FIELD_ELEMENT]) -> Option<Fr> {
    let value = set_bytes_canonical(bytes);
    if value.into_bigint().to_bytes_be() == bytes {
        Some(value)
    } else {
        None
    }
}

/// Converts a slice of field elements to a byte array with size constraints
///
/// # Arguments
/// * `data_fr` - Slice of field elements to convert to bytes
/// * `max_output_size` - Maximum allowed size in bytes for the output buffer
///
/// # Returns
/// * `Vec<u8>` - Byte array containing the encoded field elements, truncated if needed
///
/// # Details
/// - Each field element is converted to BYTES_PER_FIELD_ELEMENT big endian bytes
/// - Output is truncated to max_output_size if total bytes would exceed it
pub fn to_byte_array(data_fr: &[Fr], max_output_size: usize) -> Vec<u8> {
    let n = data_fr.len();
    let data_size = cmp::min(n * BYTES_PER_FIELD_ELEMENT, max_output_size);
    let mut data = vec![0u8; data_size];

    for (i, element) in data_fr.iter().enumerate() {
        let start = i * BYTES_PER_FIELD_ELEMENT;
        if start >= data_size {
            break;
        }
        let v: Vec<u8> = element.into_bigint().to_bytes_be();
        let end = cmp::min(start + BYTES_PER_FIELD_ELEMENT, data_size);
        data[start..end].copy_from_slice(&v[..end - start]);
    }

    data
}

/// Validates that the data consists of canonical big endian bn254 scalars,
/// with the same padding of a trailing partial chunk as [to_fr_array].
pub fn validate_blob_data_as_canonical_field_elements(data: &[u8]) -> Result<(), KzgError> {
    to_fr_array(data).map(|_| ())
}

pub fn is_zeroed(first_byte: u8, buf: &[u8]) -> bool {
    first_byte == 0 && buf.iter().all(|byte| *byte == 0)
}

/// Reads a canonical big endian base field element. Returns `None` when the
/// bytes encode a value larger than or equal to the modulus.
fn fq_from_be_bytes_canonical(bytes: &[u8]) -> Option<Fq> {
    let value = Fq::from_be_bytes_mod_order(bytes);
    if value.into_bigint().to_bytes_be() == bytes {
        Some(value)
    } else {
        None
    }
}

fn fq_to_be_bytes(value: &Fq, out: &mut [u8]) {
    out.copy_from_slice(&value.into_bigint().to_bytes_be());
}

/// Decodes a G1 point stored uncompressed as `X || Y` (32 bytes big endian
/// each). The top two bits of the first byte carry the gnark flags; only the
/// uncompressed and infinity flags are accepted.
pub fn read_g1_point_from_bytes_be(g1_bytes_be: &[u8]) -> Result<G1Affine, &'static str> {
    if g1_bytes_be.len() != SIZE_OF_G1_AFFINE_UNCOMPRESSED {
        return Err("not enough bytes for g1 point");
    }

    let m_data = g1_bytes_be[0] & POINT_FLAG_MASK;

    if m_data == POINT_FLAG_INFINITY {
        if !is_zeroed(g1_bytes_be[0] & !POINT_FLAG_MASK, &g1_bytes_be[1..]) {
            return Err("point at infinity not coded properly for g1");
        }
        return Ok(G1Affine::identity());
    }
    if m_data != POINT_FLAG_UNCOMPRESSED {
        return Err("unexpected compression flag for g1 point");
    }

    let x = fq_from_be_bytes_canonical(&g1_bytes_be[..32]).ok_or("non canonical x coordinate")?;
    let y = fq_from_be_bytes_canonical(&g1_bytes_be[32..]).ok_or("non canonical y coordinate")?;

    let point = G1Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err("point not on curve");
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err("point not in correct subgroup");
    }
    Ok(point)
}

/// Decodes a G2 point stored uncompressed as `X.c1 || X.c0 || Y.c1 || Y.c0`.
pub fn read_g2_point_from_bytes_be(g2_bytes_be: &[u8]) -> Result<G2Affine, &'static str> {
    if g2_bytes_be.len() != SIZE_OF_G2_AFFINE_UNCOMPRESSED {
        return Err("not enough bytes for g2 point");
    }

    let m_data = g2_bytes_be[0] & POINT_FLAG_MASK;

    if m_data == POINT_FLAG_INFINITY {
        if !is_zeroed(g2_bytes_be[0] & !POINT_FLAG_MASK, &g2_bytes_be[1..]) {
            return Err("point at infinity not coded properly for g2");
        }
        return Ok(G2Affine::identity());
    }
    if m_data != POINT_FLAG_UNCOMPRESSED {
        return Err("unexpected compression flag for g2 point");
    }

    let coord = |range: core::ops::Range<usize>| {
        fq_from_be_bytes_canonical(&g2_bytes_be[range]).ok_or("non canonical coordinate")
    };
    let x = Fq2::new(coord(32..64)?, coord(0..32)?);
    let y = Fq2::new(coord(96..128)?, coord(64..96)?);

    let point = G2Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err("point not on curve");
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err("point not in correct subgroup");
    }
    Ok(point)
}

pub fn g1_point_to_bytes_be(point: &G1Affine) -> [u8; SIZE_OF_G1_AFFINE_UNCOMPRESSED] {
    let mut out = [0u8; SIZE_OF_G1_AFFINE_UNCOMPRESSED];
    if point.is_zero() {
        out[0] = POINT_FLAG_INFINITY;
        return out;
    }
    fq_to_be_bytes(&point.x, &mut out[..32]);
    fq_to_be_bytes(&point.y, &mut out[32..]);
    out
}

pub fn g2_point_to_bytes_be(point: &G2Affine) -> [u8; SIZE_OF_G2_AFFINE_UNCOMPRESSED] {
    let mut out = [0u8; SIZE_OF_G2_AFFINE_UNCOMPRESSED];
    if point.is_zero() {
        out[0] = POINT_FLAG_INFINITY;
        return out;
    }
    fq_to_be_bytes(&point.x.c1, &mut out[..32]);
    fq_to_be_bytes(&point.x.c0, &mut out[32..64]);
    fq_to_be_bytes(&point.y.c1, &mut out[64..96]);
    fq_to_be_bytes(&point.y.c0, &mut out[96..]);
    out
}

/// Checks that a G1 point supplied by a caller is on the curve and in the
/// prime order subgroup. The identity is accepted.
pub fn validate_g1_point(point: &G1Affine) -> Result<(), KzgError> {
    if !point.is_on_curve() {
        return Err(KzgError::NotOnCurveError(
            "G1 point not on curve".to_string(),
        ));
    }

    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(KzgError::NotOnCurveError(
            "G1 point not in correct subgroup".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_g2_point(point: &G2Affine) -> Result<(), KzgError> {
    if !point.is_on_curve() {
        return Err(KzgError::NotOnCurveError(
            "G2 point not on curve".to_string(),
        ));
    }

    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(KzgError::NotOnCurveError(
            "G2 point not in correct subgroup".to_string(),
        ));
    }

    Ok(())
}

/// Computes powers of a field element up to a given exponent.
/// Ref: https://github.com/ethereum/consensus-specs/blob/master/specs/deneb/polynomial-commitments.md#compute_powers
///
/// For a given field element x, computes [1, x, x², x³, ..., x^(count-1)]
///
/// # Arguments
/// * `base` - The field element to compute powers of
/// * `count` - The number of powers to compute (0 to count-1)
///
/// # Returns
/// * Vector of field elements containing powers: [x⁰, x¹, x², ..., x^(count-1)]
pub fn compute_powers(base: &Fr, count: usize) -> Vec<Fr> {
    let mut powers = Vec::with_capacity(count);
    let mut current = Fr::one();

    for _ in 0..count {
        powers.push(current);
        current *= base;
    }

    powers
}

/// Computes a linear combination of G1 points weighted by scalar coefficients.
///
/// Given points P₁, P₂, ..., Pₙ and scalars s₁, s₂, ..., sₙ
/// Computes: s₁P₁ + s₂P₂ + ... + sₙPₙ
/// Uses Multi-Scalar Multiplication (MSM) for efficient computation.
///
/// # Arguments
/// * `points` - Array of G1 points in affine form
/// * `scalars` - Array of field elements as scalar weights
///
/// # Returns
/// * The linear combination in affine form, or an MSM error on length mismatch
pub fn g1_lincomb(points: &[G1Affine], scalars: &[Fr]) -> Result<G1Affine, KzgError> {
    let lincomb =
        G1Projective::msm(points, scalars).map_err(|e| KzgError::MsmError(e.to_string()))?;

    Ok(lincomb.into_affine())
}

/// Same as [g1_lincomb], over G2.
pub fn g2_lincomb(points: &[G2Affine], scalars: &[Fr]) -> Result<G2Affine, KzgError> {
    let lincomb =
        G2Projective::msm(points, scalars).map_err(|e| KzgError::MsmError(e.to_string()))?;

    Ok(lincomb.into_affine())
}

pub fn hash_to_field_element(msg: &[u8]) -> Fr {
    let msg_digest = Sha256::digest(msg);
    Fr::from_be_bytes_mod_order(msg_digest.as_slice())
}

/// Checks `e(a1, a2) == e(b1, b2)` with a single multi pairing.
pub fn pairings_verify(a1: G1Affine, a2: G2Affine, b1: G1Affine, b2: G2Affine) -> bool {
    let neg_b1 = -b1;
    let p = [a1, neg_b1];
    let q = [a2, b2];
    let result = Bn254::multi_pairing(p, q);
    result.is_zero()
}

pub fn usize_to_be_bytes(number: usize) -> [u8; 8] {
    (number as u64).to_be_bytes()
}

pub fn is_power_of_two(n: u64) -> bool {
    n != 0 && n & (n - 1) == 0
}

/// Smallest power of two greater than or equal to `n` (1 for 0).
pub fn next_power_of_two(n: u64) -> u64 {
    n.max(1).next_power_of_two()
}

/// log2 of a power of two.
pub fn log2_pow2(n: usize) -> u32 {
    debug_assert!(n.is_power_of_two());
    n.trailing_zeros()
}

/// Reverses the least significant `bits` of the given number `n`.
///
/// Taken and modified from: https://github.com/Plonky3/Plonky3/blob/a374139abead1008f84a439e95bb495e81ea4be5/util/src/lib.rs#L67-L76
pub const fn reverse_bits(n: u64, bits: u32) -> u64 {
    // overflowing_shr covers n == bits == 0, where a plain shift by 64 would overflow.
    n.reverse_bits().overflowing_shr(u64::BITS - bits).0
}

/// In-place bit-reversal permutation of a slice whose length is a power of two.
/// Applying it twice restores the original order.
pub fn reverse_bit_order<T>(a: &mut [T]) {
    if a.is_empty() {
        return;
    }
    let n = a.len();
    let log_n = log2_pow2(n);
    for k in 0..n {
        let rk = reverse_bits(k as u64, log_n) as usize;
        if k < rk {
            a.swap(rk, k);
        }
    }
}
