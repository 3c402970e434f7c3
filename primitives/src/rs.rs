//! Reed-Solomon erasure coding over the bn254 scalar field.
//!
//! A blob of at most `num_evaluations` symbols is read as polynomial
//! coefficients and evaluated over all `num_evaluations` roots of unity. The
//! bit-reversed evaluation vector is cut into `num_chunks` consecutive runs of
//! `chunk_length`; run `i` holds the evaluations over the coset
//! `w^j * <w^num_chunks>` with `j = reverse_bits(i)`. Each frame stores the
//! polynomial interpolating its coset rather than the raw evaluations, which
//! is what the KZG multi-proof opens.

use std::collections::HashSet;

use ark_bn254::{Fr, G1Affine};
use rayon::prelude::*;
use tracing::debug;

use crate::{
    errors::{KzgError, RsError},
    fft::FFTSettings,
    frame::Frame,
    helpers::{self, reverse_bit_order},
    params::{get_leading_coset_index, get_num_sys, EncodingParams},
    recovery::shift_poly,
};

#[derive(Debug, Clone)]
pub struct Encoder {
    params: EncodingParams,
    fft_settings: FFTSettings,
}

impl Encoder {
    pub fn new(params: EncodingParams) -> Result<Self, RsError> {
        params.validate()?;
        let fft_settings = FFTSettings::with_width(params.num_evaluations())?;
        Ok(Self {
            params,
            fft_settings,
        })
    }

    pub fn params(&self) -> EncodingParams {
        self.params
    }

    pub fn fft_settings(&self) -> &FFTSettings {
        &self.fft_settings
    }

    /// Pads `coeffs` to `num_evaluations`, evaluates them over the full
    /// domain and returns the evaluations in bit-reversed order.
    pub fn extend_poly(&self, coeffs: &[Fr]) -> Result<Vec<Fr>, RsError> {
        let n = self.params.num_evaluations() as usize;
        if coeffs.len() > n {
            return Err(RsError::InputTooLarge {
                input: coeffs.len() as u64,
                num_evaluations: n as u64,
            });
        }
        let mut padded = coeffs.to_vec();
        padded.resize(n, Fr::default());

        let mut evals = self.fft_settings.fft(&padded, false)?;
        reverse_bit_order(&mut evals);
        Ok(evals)
    }

    /// Erasure codes `coeffs` into `num_chunks` frames. Frames carry no proof
    /// (the identity); the returned indices are the leading coset index of
    /// each frame.
    pub fn encode(&self, coeffs: &[Fr]) -> Result<(Vec<Frame>, Vec<u32>), RsError> {
        let evals = self.extend_poly(coeffs)?;
        let chunk_length = self.params.chunk_length as usize;
        let num_chunks = self.params.num_chunks;

        let frames = (0..num_chunks as usize)
            .into_par_iter()
            .map(|i| {
                let j = get_leading_coset_index(i as u64, num_chunks)?;
                let mut ys = evals[chunk_length * i..chunk_length * (i + 1)].to_vec();
                reverse_bit_order(&mut ys);
                let coeffs = self.get_interpolation_poly_coeff(&ys, j)?;
                Ok((Frame::new(G1Affine::identity(), coeffs), j as u32))
            })
            .collect::<Result<Vec<(Frame, u32)>, RsError>>()?;

        Ok(frames.into_iter().unzip())
    }

    /// Converts bytes to symbols (see [helpers::to_fr_array]) and encodes them.
    /// Every 32-byte chunk must be a canonical scalar.
    pub fn encode_bytes(&self, data: &[u8]) -> Result<(Vec<Frame>, Vec<u32>), KzgError> {
        let coeffs = helpers::to_fr_array(data)?;
        Ok(self.encode(&coeffs)?)
    }

    // Coefficients of the polynomial taking values `ys` over the coset w^j * <u>,
    // where u is the primitive chunk_length-th root of unity.
    fn get_interpolation_poly_coeff(&self, ys: &[Fr], j: u64) -> Result<Vec<Fr>, RsError> {
        let mut coeffs = self.fft_settings.fft(ys, true)?;
        let inv_coset_root = self.fft_settings.reverse_roots_of_unity[j as usize];
        shift_poly(&mut coeffs, inv_coset_root);
        Ok(coeffs)
    }

    // Values of the frame's interpolation polynomial over its coset w^j * <u>.
    fn get_interpolation_poly_eval(&self, coeffs: &[Fr], j: u64) -> Result<Vec<Fr>, RsError> {
        let mut shifted = coeffs.to_vec();
        shift_poly(&mut shifted, self.fft_settings.expanded_roots_of_unity[j as usize]);
        Ok(self.fft_settings.fft(&shifted, false)?)
    }

    /// Recovers the blob polynomial coefficients from a subset of frames.
    /// `indices[k]` is the chunk index of `frames[k]`. Nothing is decoded when
    /// `max_input_size` is 0.
    pub fn decode_to_coeffs(
        &self,
        frames: &[Frame],
        indices: &[u64],
        max_input_size: u64,
    ) -> Result<Vec<Fr>, RsError> {
        if frames.len() != indices.len() {
            return Err(RsError::MismatchedInputs {
                frames: frames.len(),
                indices: indices.len(),
            });
        }

        if max_input_size == 0 {
            return Ok(Vec::new());
        }

        let chunk_length = self.params.chunk_length;
        let num_chunks = self.params.num_chunks;
        let num_sys = get_num_sys(max_input_size, chunk_length);

        let distinct: HashSet<u64> = indices.iter().copied().collect();
        if (distinct.len() as u64) < num_sys {
            return Err(RsError::InsufficientChunks {
                required: num_sys,
                received: distinct.len() as u64,
            });
        }

        let n = self.params.num_evaluations() as usize;
        let mut samples: Vec<Option<Fr>> = vec![None; n];

        for (frame, index) in frames.iter().zip(indices.iter()) {
            if frame.length() as u64 != chunk_length {
                return Err(RsError::InvalidFrameLength {
                    expected: chunk_length,
                    actual: frame.length() as u64,
                });
            }
            let e = get_leading_coset_index(*index, num_chunks)?;
            let evals = self.get_interpolation_poly_eval(&frame.coeffs, e)?;
            for (s, eval) in evals.into_iter().enumerate() {
                samples[s * num_chunks as usize + e as usize] = Some(eval);
            }
        }

        let missing = samples.iter().filter(|s| s.is_none()).count();
        debug!(
            frames = frames.len(),
            missing_samples = missing,
            "decoding rs frames"
        );

        let reconstructed = if missing > 0 {
            self.fft_settings.recover_poly_from_samples(&samples)?
        } else {
            samples.into_iter().flatten().collect()
        };

        Ok(self.fft_settings.fft(&reconstructed, true)?)
    }

    /// Recovers the original bytes, truncated to `max_input_size`.
    pub fn decode(
        &self,
        frames: &[Frame],
        indices: &[u64],
        max_input_size: u64,
    ) -> Result<Vec<u8>, RsError> {
        let coeffs = self.decode_to_coeffs(frames, indices, max_input_size)?;
        Ok(helpers::to_byte_array(&coeffs, max_input_size as usize))
    }
}
