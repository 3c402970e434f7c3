use ark_bn254::Fr;
use ark_std::Zero;

use crate::{consts::BYTES_PER_FIELD_ELEMENT, helpers};

/// A polynomial given by its coefficients, lowest degree first. This is the
/// form the Reed-Solomon encoder and the committer consume. Evaluations over
/// a domain are computed with [crate::fft::FFTSettings].
#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialCoeffForm {
    /// Coefficients, padded with zeroes to the next power of two.
    coeffs: Vec<Fr>,
    /// Number of bytes of the blob the polynomial was built from, so that
    /// converting back to bytes yields the original length.
    len_underlying_blob_bytes: usize,
}

impl PolynomialCoeffForm {
    /// Creates a new [PolynomialCoeffForm] from the given coefficients. The
    /// vector is padded to the next power of two by appending zeros.
    pub fn new(coeffs: Vec<Fr>) -> Self {
        let len_underlying_blob_bytes = coeffs.len() * BYTES_PER_FIELD_ELEMENT;
        Self {
            coeffs: pad_to_power_of_two(coeffs),
            len_underlying_blob_bytes,
        }
    }

    pub fn coeffs(&self) -> &[Fr] {
        &self.coeffs
    }

    /// Coefficients without the power-of-two padding.
    pub fn unpadded_coeffs(&self) -> &[Fr] {
        &self.coeffs[..self.len_underlying_blob_field_elements()]
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn len_underlying_blob_bytes(&self) -> usize {
        self.len_underlying_blob_bytes
    }

    pub fn len_underlying_blob_field_elements(&self) -> usize {
        self.len_underlying_blob_bytes / BYTES_PER_FIELD_ELEMENT
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn to_bytes_be(&self) -> Vec<u8> {
        helpers::to_byte_array(&self.coeffs, self.len_underlying_blob_bytes)
    }
}

fn pad_to_power_of_two(mut values: Vec<Fr>) -> Vec<Fr> {
    let target = values.len().max(1).next_power_of_two();
    values.resize(target, Fr::zero());
    values
}
