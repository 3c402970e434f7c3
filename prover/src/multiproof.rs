//! Amortized computation of all chunk opening proofs of a polynomial.
//!
//! For `n = chunk_length * num_chunks` and the quotient of `f` by
//! `X^l - z^l` (`l = chunk_length`), the opening proof of coset `z * <u>` is
//! `sum_t (z^l)^(t-1) * H_t` with `H_t = sum_(k >= t*l) f_k [tau^(k - t*l)]_1`.
//! The `H_t` are one Toeplitz matrix-vector product per residue class of the
//! coefficient index, which is computed with circulant embeddings of size
//! `2 * num_chunks`. A final FFT of size `num_chunks` evaluates the proofs for
//! every coset at once.

use std::{sync::Arc, time::Instant};

use ark_bn254::{Fr, G1Affine, G1Projective};
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::Field;
use ark_std::Zero;
use rayon::{prelude::*, ThreadPool};
use rust_da_kzg_primitives::{
    errors::{KzgError, RsError},
    fft::FFTSettings,
    frame::{BlobCommitments, Frame},
    params::EncodingParams,
    rs::Encoder,
};
use tracing::{debug, info, info_span};

use crate::{kzg::KZG, srs_table::SrsTable};

/// Encoder and multi-proof prover for one pair of encoding params. Building
/// it computes (or loads) the SRS sub-tables, so instances are cached by
/// [crate::prover::Prover].
#[derive(Debug)]
pub struct ParametrizedProver {
    params: EncodingParams,
    encoder: Encoder,
    kzg: KZG,
    sub_fft_settings: FFTSettings,
    // fft_points_t[i][j] is entry i of the transformed SRS column j.
    fft_points_t: Vec<Vec<G1Affine>>,
    pool: Arc<ThreadPool>,
    verbose: bool,
}

impl ParametrizedProver {
    pub fn new(
        params: EncodingParams,
        kzg: KZG,
        table: &SrsTable<'_>,
        pool: Arc<ThreadPool>,
        verbose: bool,
    ) -> Result<Self, KzgError> {
        params.validate_against_srs(kzg.srs().order)?;
        let encoder = Encoder::new(params)?;
        let sub_fft_settings = FFTSettings::with_width(2 * params.num_chunks)?;

        let sub_tables =
            pool.install(|| table.get_sub_tables(params.num_chunks, params.chunk_length))?;
        let fft_points_t = transpose(&sub_tables);

        Ok(Self {
            params,
            encoder,
            kzg,
            sub_fft_settings,
            fft_points_t,
            pool,
            verbose,
        })
    }

    pub fn params(&self) -> EncodingParams {
        self.params
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }

    pub fn kzg(&self) -> &KZG {
        &self.kzg
    }

    /// One proof per coset, in natural order: proof `j` opens the coset
    /// `w^j * <w^num_chunks>` where `w` is the primitive `n`-th root of unity.
    pub fn compute_multi_frame_proofs(&self, coeffs: &[Fr]) -> Result<Vec<G1Affine>, KzgError> {
        let n = self.params.num_evaluations() as usize;
        if coeffs.len() > n {
            return Err(RsError::InputTooLarge {
                input: coeffs.len() as u64,
                num_evaluations: n as u64,
            }
            .into());
        }
        let _span = info_span!("multi_frame_proofs", n, num_chunks = self.params.num_chunks)
            .entered();

        let mut padded = coeffs.to_vec();
        padded.resize(n, Fr::zero());

        let l = self.params.chunk_length as usize;
        let dim_e = self.params.num_chunks as usize;

        self.pool.install(|| -> Result<Vec<G1Affine>, KzgError> {
            let start = Instant::now();
            // Column j: the circulant embedding of the Toeplitz vector built
            // from the coefficients of index m - j - i*l, in the FFT domain.
            let columns = (0..l)
                .into_par_iter()
                .map(|j| -> Result<Vec<Fr>, KzgError> {
                    let toeplitz = self.toeplitz_column(&padded, j);
                    Ok(self.sub_fft_settings.fft_fr(&toeplitz, false)?)
                })
                .collect::<Result<Vec<Vec<Fr>>, KzgError>>()?;
            let coeff_store = transpose(&columns);
            let coeff_elapsed = start.elapsed();

            let start = Instant::now();
            let sums = self
                .fft_points_t
                .par_iter()
                .zip(coeff_store.par_iter())
                .map(|(points, scalars)| {
                    G1Projective::msm(points, scalars)
                        .map_err(|e| KzgError::MsmError(format!("length mismatch at {}", e)))
                })
                .collect::<Result<Vec<G1Projective>, KzgError>>()?;
            let msm_elapsed = start.elapsed();

            let start = Instant::now();
            let mut h = self.sub_fft_settings.fft_g1(&sums, true)?;
            // h[t] = H_(t+1); the upper half only holds wrap-around terms.
            h.truncate(dim_e);
            let proofs = self.sub_fft_settings.fft_g1(&h, false)?;
            let fft_elapsed = start.elapsed();

            debug!(
                coeff_ms = coeff_elapsed.as_millis() as u64,
                msm_ms = msm_elapsed.as_millis() as u64,
                fft_ms = fft_elapsed.as_millis() as u64,
                "computed multi frame proofs"
            );
            Ok(G1Projective::normalize_batch(&proofs))
        })
    }

    // Length 2 * num_chunks: a[i] = f[m - j - i*l] for i < num_chunks - 1,
    // stored at position 0 for i = 0 and 2 * num_chunks - i otherwise.
    fn toeplitz_column(&self, coeffs: &[Fr], j: usize) -> Vec<Fr> {
        let l = self.params.chunk_length as usize;
        let dim_e = self.params.num_chunks as usize;
        let m = coeffs.len() - 1;
        let mut column = vec![Fr::zero(); 2 * dim_e];
        for i in 0..dim_e.saturating_sub(1) {
            let value = coeffs[m - j - i * l];
            let pos = if i == 0 { 0 } else { 2 * dim_e - i };
            column[pos] = value;
        }
        column
    }

    /// RS frames of `coeffs` carrying their opening proofs, with the leading
    /// coset index of each frame.
    pub fn get_frames(&self, coeffs: &[Fr]) -> Result<(Vec<Frame>, Vec<u32>), KzgError> {
        let start = Instant::now();
        let (mut frames, indices) = self.pool.install(|| self.encoder.encode(coeffs))?;
        let rs_elapsed = start.elapsed();

        let start = Instant::now();
        let proofs = self.compute_multi_frame_proofs(coeffs)?;
        let proof_elapsed = start.elapsed();

        for (frame, index) in frames.iter_mut().zip(indices.iter()) {
            frame.proof = proofs[*index as usize];
        }

        if self.verbose {
            info!(
                input_size = coeffs.len(),
                num_chunks = self.params.num_chunks,
                chunk_length = self.params.chunk_length,
                rs_encode_ms = rs_elapsed.as_millis() as u64,
                multi_proof_ms = proof_elapsed.as_millis() as u64,
                "frame process details"
            );
        }
        Ok((frames, indices))
    }

    /// Commitments, frames and frame indices of a polynomial of
    /// `coeffs.len()` symbols.
    pub fn encode(
        &self,
        coeffs: &[Fr],
    ) -> Result<(BlobCommitments, Vec<Frame>, Vec<u32>), KzgError> {
        let _span = info_span!("encode", input_size = coeffs.len()).entered();
        if coeffs.len() > self.kzg.srs().g1.len() {
            return Err(KzgError::InsufficientSrs {
                requested: coeffs.len() as u64,
                loaded: self.kzg.srs().g1.len() as u64,
            });
        }

        let start = Instant::now();
        let commitments = self
            .pool
            .install(|| self.kzg.get_commitments(coeffs, coeffs.len() as u64))?;
        let commit_elapsed = start.elapsed();

        let (frames, indices) = self.get_frames(coeffs)?;
        debug!(
            commit_ms = commit_elapsed.as_millis() as u64,
            frames = frames.len(),
            "encoded blob"
        );
        Ok((commitments, frames, indices))
    }
}

/// Naive single coset opening, `[q(tau)]_1` for the quotient of `coeffs` by
/// `X^chunk_length - x^chunk_length`. Quadratic; kept for cross checks.
pub fn compute_coset_proof(
    kzg: &KZG,
    coeffs: &[Fr],
    chunk_length: usize,
    x: Fr,
) -> Result<G1Affine, KzgError> {
    if chunk_length == 0 {
        return Err(KzgError::InvalidInputLength);
    }
    let z = x.pow([chunk_length as u64]);
    // Synthetic division by X^l - z, from the top coefficient down.
    let mut remainder = coeffs.to_vec();
    let mut quotient = vec![Fr::zero(); coeffs.len().saturating_sub(chunk_length)];
    for k in (chunk_length..coeffs.len()).rev() {
        let c = remainder[k];
        quotient[k - chunk_length] = c;
        remainder[k - chunk_length] += c * z;
    }
    if quotient.is_empty() {
        return Ok(G1Affine::identity());
    }
    kzg.commit(&quotient)
}

fn transpose<T: Copy + Send + Sync>(rows: &[Vec<T>]) -> Vec<Vec<T>> {
    let width = rows.first().map_or(0, Vec::len);
    (0..width)
        .into_par_iter()
        .map(|i| rows.iter().map(|row| row[i]).collect())
        .collect()
}
