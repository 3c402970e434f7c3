//! Radix-2 FFT over the bn254 scalar field and over G1.
//!
//! The transform is written once, generic over [FFTElement], and used for
//! both scalars (Reed-Solomon extension, erasure recovery) and G1 points
//! (the amortized multi-proof). All domains are sub-domains of the
//! `max_width` roots of unity held by [FFTSettings]: a transform of size `n`
//! walks the precomputed roots with stride `max_width / n`.

use core::ops::{Add, Mul, Sub};

use ark_bn254::{Fr, G1Projective};
use ark_ff::{FftField, Field};
use ark_std::{One, Zero};

use crate::consts::MAX_FFT_SCALE;
use crate::errors::FftError;

/// Values a FFT can run over: anything forming a module over [Fr].
pub trait FFTElement:
    Sized + Send + Sync + Copy + Add<Output = Self> + Sub<Output = Self> + Mul<Fr, Output = Self>
{
    fn zero() -> Self;
}

impl FFTElement for Fr {
    fn zero() -> Self {
        <Fr as Zero>::zero()
    }
}

impl FFTElement for G1Projective {
    fn zero() -> Self {
        <G1Projective as Zero>::zero()
    }
}

// Below this output size the O(n^2) transform beats the recursion overhead.
const SIMPLE_FT_THRESHOLD: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct FFTSettings {
    pub max_width: usize,
    /// Primitive `max_width`-th root of unity.
    pub root_of_unity: Fr,
    /// `[w^0, w^1, ..., w^max_width]`, the last entry wraps back to 1.
    pub expanded_roots_of_unity: Vec<Fr>,
    /// `expanded_roots_of_unity` reversed, i.e. powers of `w^-1`.
    pub reverse_roots_of_unity: Vec<Fr>,
}

impl FFTSettings {
    /// Builds the settings for domains of size up to `2^max_scale`.
    pub fn new(max_scale: u8) -> Result<Self, FftError> {
        if max_scale > MAX_FFT_SCALE {
            return Err(FftError::ScaleTooLarge(max_scale));
        }
        let max_width = 1usize << max_scale;
        let root_of_unity = Fr::get_root_of_unity(max_width as u64)
            .ok_or(FftError::ScaleTooLarge(max_scale))?;

        let expanded_roots_of_unity = expand_root_of_unity(&root_of_unity, max_width);
        let mut reverse_roots_of_unity = expanded_roots_of_unity.clone();
        reverse_roots_of_unity.reverse();

        Ok(Self {
            max_width,
            root_of_unity,
            expanded_roots_of_unity,
            reverse_roots_of_unity,
        })
    }

    /// Settings whose maximum width is exactly `width`, which must be a power of two.
    pub fn with_width(width: u64) -> Result<Self, FftError> {
        if !crate::helpers::is_power_of_two(width) {
            return Err(FftError::InvalidSize {
                size: width as usize,
                max_width: 1 << MAX_FFT_SCALE,
            });
        }
        Self::new(width.trailing_zeros() as u8)
    }

    /// Forward (`inverse = false`) or inverse transform of `vals`. The
    /// inverse is scaled by `1/n`.
    pub fn fft<T: FFTElement>(&self, vals: &[T], inverse: bool) -> Result<Vec<T>, FftError> {
        let n = vals.len();
        if n == 0 || n > self.max_width || !n.is_power_of_two() {
            return Err(FftError::InvalidSize {
                size: n,
                max_width: self.max_width,
            });
        }

        let stride = self.max_width / n;
        let mut out = vec![T::zero(); n];
        let max_splits = max_splits();

        if inverse {
            let inv_len = Fr::from(n as u64)
                .inverse()
                .ok_or_else(|| FftError::InvalidInput("domain size not invertible".to_string()))?;
            fft_rec(
                vals,
                0,
                1,
                &self.reverse_roots_of_unity,
                stride,
                &mut out,
                0,
                max_splits,
            );
            for v in out.iter_mut() {
                *v = *v * inv_len;
            }
        } else {
            fft_rec(
                vals,
                0,
                1,
                &self.expanded_roots_of_unity,
                stride,
                &mut out,
                0,
                max_splits,
            );
        }

        Ok(out)
    }

    pub fn fft_fr(&self, vals: &[Fr], inverse: bool) -> Result<Vec<Fr>, FftError> {
        self.fft(vals, inverse)
    }

    pub fn fft_g1(
        &self,
        vals: &[G1Projective],
        inverse: bool,
    ) -> Result<Vec<G1Projective>, FftError> {
        self.fft(vals, inverse)
    }

    /// Transforms `vals` in place, used where the caller owns a scratch
    /// buffer it wants to reuse.
    pub fn fft_fr_in_place(&self, vals: &mut [Fr], inverse: bool) -> Result<(), FftError> {
        let out = self.fft(vals, inverse)?;
        vals.copy_from_slice(&out);
        Ok(())
    }
}

fn expand_root_of_unity(root: &Fr, max_width: usize) -> Vec<Fr> {
    let mut roots = Vec::with_capacity(max_width + 1);
    roots.push(Fr::one());
    let mut current = *root;
    roots.push(current);
    while !current.is_one() {
        current *= root;
        roots.push(current);
    }
    roots
}

// Number of recursion levels allowed to fork, log2 of the threads in the current pool.
fn max_splits() -> usize {
    let threads = rayon::current_num_threads().max(1);
    (usize::BITS - 1 - threads.leading_zeros()) as usize
}

#[allow(clippy::too_many_arguments)]
fn fft_rec<T: FFTElement>(
    vals: &[T],
    vals_offset: usize,
    vals_stride: usize,
    roots: &[Fr],
    roots_stride: usize,
    out: &mut [T],
    depth: usize,
    max_splits: usize,
) {
    if out.len() <= SIMPLE_FT_THRESHOLD {
        simple_ft(vals, vals_offset, vals_stride, roots, roots_stride, out);
        return;
    }

    let half = out.len() >> 1;
    let (left, right) = out.split_at_mut(half);

    if depth < max_splits {
        rayon::join(
            || {
                fft_rec(
                    vals,
                    vals_offset,
                    vals_stride << 1,
                    roots,
                    roots_stride << 1,
                    left,
                    depth + 1,
                    max_splits,
                )
            },
            || {
                fft_rec(
                    vals,
                    vals_offset + vals_stride,
                    vals_stride << 1,
                    roots,
                    roots_stride << 1,
                    right,
                    depth + 1,
                    max_splits,
                )
            },
        );
    } else {
        fft_rec(
            vals,
            vals_offset,
            vals_stride << 1,
            roots,
            roots_stride << 1,
            left,
            depth + 1,
            max_splits,
        );
        fft_rec(
            vals,
            vals_offset + vals_stride,
            vals_stride << 1,
            roots,
            roots_stride << 1,
            right,
            depth + 1,
            max_splits,
        );
    }

    for i in 0..half {
        let x = left[i];
        let y_times_root = right[i] * roots[i * roots_stride];
        left[i] = x + y_times_root;
        right[i] = x - y_times_root;
    }
}

fn simple_ft<T: FFTElement>(
    vals: &[T],
    vals_offset: usize,
    vals_stride: usize,
    roots: &[Fr],
    roots_stride: usize,
    out: &mut [T],
) {
    let l = out.len();
    for (i, o) in out.iter_mut().enumerate() {
        let mut acc = T::zero();
        for j in 0..l {
            let root = roots[((i * j) % l) * roots_stride];
            acc = acc + vals[vals_offset + j * vals_stride] * root;
        }
        *o = acc;
    }
}
