//! Erasure recovery of an evaluation vector from a subset of its samples.
//!
//! The polynomial `Z(x)` vanishing on the missing positions is built by
//! direct multiplication of small leaves and FFT convolution of the leaves.
//! With `E(x)` the evaluations with holes filled by zero, `(E*Z)(x)` equals
//! `(D*Z)(x)` on the whole domain, so `D = (E*Z) / Z` once both sides are
//! moved to a shifted coset where `Z` has no roots.

use ark_bn254::Fr;
use ark_ff::Field;
use ark_std::{One, Zero};

use crate::consts::DOMAIN_SHIFT_FACTOR;
use crate::errors::{FftError, RsError};
use crate::fft::FFTSettings;
use crate::helpers::next_power_of_two;

// A leaf holds 63 roots so that its polynomial (degree 63) fits 64 slots.
const PER_LEAF_POLY: usize = 64;
const PER_LEAF: usize = PER_LEAF_POLY - 1;
const REDUCTION_FACTOR: usize = 4;

/// Multiplies coefficient `i` by `k^i`.
pub fn shift_poly(poly: &mut [Fr], k: Fr) {
    let mut factor_power = Fr::one();
    for coeff in poly.iter_mut() {
        *coeff *= factor_power;
        factor_power *= k;
    }
}

/// Inverse of [shift_poly].
pub fn unshift_poly(poly: &mut [Fr], k: Fr) -> Result<(), FftError> {
    let inv = k
        .inverse()
        .ok_or_else(|| FftError::InvalidInput("shift factor is zero".to_string()))?;
    shift_poly(poly, inv);
    Ok(())
}

/// Evaluates a polynomial in coefficient form with Horner's method.
pub fn eval_poly_at(coeffs: &[Fr], x: &Fr) -> Fr {
    if x.is_zero() {
        return coeffs.first().copied().unwrap_or_else(Fr::zero);
    }
    coeffs
        .iter()
        .rev()
        .fold(Fr::zero(), |acc, coeff| acc * x + coeff)
}

impl FFTSettings {
    /// Coefficients of `prod (x - w^(i*stride))` over `indices`.
    fn make_zero_poly_mul_leaf(&self, indices: &[u64], domain_stride: usize) -> Vec<Fr> {
        let mut dst = vec![Fr::zero(); indices.len() + 1];
        dst[indices.len()] = Fr::one();

        for (i, v) in indices.iter().enumerate() {
            let neg_di = -self.expanded_roots_of_unity[*v as usize * domain_stride];
            dst[i] = neg_di;
            if i > 0 {
                let prev = dst[i - 1];
                dst[i] += prev;
                for j in (1..i).rev() {
                    dst[j] *= neg_di;
                    let prev = dst[j - 1];
                    dst[j] += prev;
                }
                dst[0] *= neg_di;
            }
        }
        dst
    }

    /// Product of the given polynomials via FFT convolution.
    fn reduce_leaves(&self, leaves: &[Vec<Fr>]) -> Result<Vec<Fr>, FftError> {
        let out_degree: usize = leaves.iter().map(|p| p.len() - 1).sum();
        let n = next_power_of_two(out_degree as u64 + 1) as usize;

        let mut product = vec![Fr::one(); n];
        let mut padded = vec![Fr::zero(); n];
        for leaf in leaves {
            if leaf.is_empty() {
                return Err(FftError::InvalidInput("empty leaf polynomial".to_string()));
            }
            padded[..leaf.len()].copy_from_slice(leaf);
            padded[leaf.len()..].iter_mut().for_each(|v| *v = Fr::zero());
            let eval = self.fft(&padded, false)?;
            product
                .iter_mut()
                .zip(eval.iter())
                .for_each(|(acc, e)| *acc *= e);
        }

        let mut coeffs = self.fft(&product, true)?;
        coeffs.truncate(out_degree + 1);
        Ok(coeffs)
    }

    /// Computes the polynomial that is zero on `w^i` for every `i` in
    /// `missing_indices`, as `(evaluations, coefficients)` of size `length`,
    /// where `w` is a primitive `length`-th root of unity.
    pub fn zero_poly_via_multiplication(
        &self,
        missing_indices: &[u64],
        length: usize,
    ) -> Result<(Vec<Fr>, Vec<Fr>), FftError> {
        if missing_indices.is_empty() {
            return Ok((vec![Fr::zero(); length], vec![Fr::zero(); length]));
        }
        if length > self.max_width || !length.is_power_of_two() {
            return Err(FftError::InvalidSize {
                size: length,
                max_width: self.max_width,
            });
        }
        if missing_indices.iter().any(|i| *i as usize >= length) {
            return Err(FftError::InvalidInput(
                "missing index out of the domain".to_string(),
            ));
        }
        let domain_stride = self.max_width / length;

        let mut leaves: Vec<Vec<Fr>> = missing_indices
            .chunks(PER_LEAF)
            .map(|chunk| self.make_zero_poly_mul_leaf(chunk, domain_stride))
            .collect();

        while leaves.len() > 1 {
            leaves = leaves
                .chunks(REDUCTION_FACTOR)
                .map(|group| {
                    if group.len() == 1 {
                        Ok(group[0].clone())
                    } else {
                        self.reduce_leaves(group)
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
        }

        let mut zero_poly = leaves.pop().unwrap_or_default();
        if zero_poly.len() > length {
            return Err(FftError::InvalidInput(
                "zero polynomial larger than the domain".to_string(),
            ));
        }
        zero_poly.resize(length, Fr::zero());

        let zero_eval = self.fft(&zero_poly, false)?;
        Ok((zero_eval, zero_poly))
    }

    /// Reconstructs the full evaluation vector from `samples`, where `None`
    /// marks a missing evaluation. The result agrees with every known sample.
    pub fn recover_poly_from_samples(&self, samples: &[Option<Fr>]) -> Result<Vec<Fr>, RsError> {
        let missing_indices: Vec<u64> = samples
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| i as u64)
            .collect();

        if missing_indices.is_empty() {
            return Ok(samples.iter().map(|s| s.unwrap_or_default()).collect());
        }
        if missing_indices.len() == samples.len() {
            return Err(RsError::RecoveryFailed("all samples are missing".to_string()));
        }

        let (zero_eval, mut zero_poly) =
            self.zero_poly_via_multiplication(&missing_indices, samples.len())?;

        for (i, s) in samples.iter().enumerate() {
            if s.is_none() != zero_eval[i].is_zero() {
                return Err(RsError::RecoveryFailed(format!(
                    "zero polynomial inconsistent with samples at index {}",
                    i
                )));
            }
        }

        let poly_evaluations_with_zero: Vec<Fr> = samples
            .iter()
            .zip(zero_eval.iter())
            .map(|(s, z)| s.map(|s| s * z).unwrap_or_default())
            .collect();

        let mut poly_with_zero = self.fft(&poly_evaluations_with_zero, true)?;

        let k = Fr::from(DOMAIN_SHIFT_FACTOR);
        shift_poly(&mut poly_with_zero, k);
        shift_poly(&mut zero_poly, k);

        let eval_shifted_poly_with_zero = self.fft(&poly_with_zero, false)?;
        let eval_shifted_zero_poly = self.fft(&zero_poly, false)?;

        let eval_shifted_reconstructed = eval_shifted_poly_with_zero
            .iter()
            .zip(eval_shifted_zero_poly.iter())
            .map(|(num, den)| {
                den.inverse()
                    .map(|inv| *num * inv)
                    .ok_or_else(|| RsError::RecoveryFailed("zero denominator".to_string()))
            })
            .collect::<Result<Vec<Fr>, RsError>>()?;

        let mut reconstructed_poly = self.fft(&eval_shifted_reconstructed, true)?;
        unshift_poly(&mut reconstructed_poly, k)?;

        let reconstructed_data = self.fft(&reconstructed_poly, false)?;

        for (i, s) in samples.iter().enumerate() {
            if let Some(s) = s {
                if reconstructed_data[i] != *s {
                    return Err(RsError::RecoveryFailed(format!(
                        "failed to reconstruct data correctly, changed value at index {}",
                        i
                    )));
                }
            }
        }

        Ok(reconstructed_data)
    }
}
