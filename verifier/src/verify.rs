use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use ark_bn254::{Fr, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{FftField, Field};
use rust_da_kzg_primitives::{
    config::KzgConfig,
    errors::{FftError, KzgError, RsError},
    fft::FFTSettings,
    frame::{BlobCommitments, Frame},
    helpers::{self, compute_powers, g1_point_to_bytes_be, g2_point_to_bytes_be},
    params::{get_leading_coset_index, EncodingParams},
    srs::{read_g1_point, SRS},
};
use tracing::debug;

/// Checks frames, blob lengths and commitments against a loaded SRS.
///
/// The verifier only needs the first `chunk_length` G1 points, `[tau^d]_2`
/// for the chunk lengths in use (from the leading G2 points or the power of 2
/// table), and `[tau^(order - length)]_1` for length proofs, which is read
/// from the G1 file when it is outside the loaded section.
#[derive(Debug)]
pub struct Verifier {
    srs: Arc<SRS>,
    g1_path: Option<PathBuf>,
    fft_settings: Mutex<HashMap<EncodingParams, Arc<FFTSettings>>>,
}

impl Verifier {
    pub fn new(config: &KzgConfig) -> Result<Self, KzgError> {
        let srs = SRS::new(config)?;
        Ok(Self {
            srs: Arc::new(srs),
            g1_path: Some(config.g1_path.clone()),
            fft_settings: Mutex::new(HashMap::new()),
        })
    }

    pub fn from_srs(srs: Arc<SRS>) -> Self {
        Self {
            srs,
            g1_path: None,
            fft_settings: Mutex::new(HashMap::new()),
        }
    }

    pub fn srs(&self) -> &SRS {
        &self.srs
    }

    /// FFT settings over the `num_evaluations` roots of unity of `params`,
    /// built once per params.
    pub fn fft_settings(&self, params: EncodingParams) -> Result<Arc<FFTSettings>, KzgError> {
        let mut cache = self
            .fft_settings
            .lock()
            .map_err(|_| KzgError::GenericError("fft settings cache poisoned".to_string()))?;
        if let Some(fs) = cache.get(&params) {
            return Ok(fs.clone());
        }
        params.validate()?;
        let fs = Arc::new(FFTSettings::with_width(params.num_evaluations())?);
        cache.insert(params, fs.clone());
        Ok(fs)
    }

    /// Verifies every frame against the blob commitment. `indices[k]` is the
    /// chunk index of `frames[k]`. Fails with [KzgError::ProofInvalid] naming
    /// the first frame that does not verify.
    pub fn verify_frames(
        &self,
        frames: &[Frame],
        indices: &[u32],
        commitments: &BlobCommitments,
        params: EncodingParams,
    ) -> Result<(), KzgError> {
        if frames.len() != indices.len() {
            return Err(RsError::MismatchedInputs {
                frames: frames.len(),
                indices: indices.len(),
            }
            .into());
        }
        let fs = self.fft_settings(params)?;
        for (frame, index) in frames.iter().zip(indices.iter()) {
            let j = get_leading_coset_index(*index as u64, params.num_chunks)?;
            let x = fs.expanded_roots_of_unity[j as usize];
            if !verify_frame_at(&commitments.commitment, frame, x, params.chunk_length, &self.srs)? {
                return Err(KzgError::ProofInvalid(format!(
                    "frame {} failed verification",
                    index
                )));
            }
        }
        debug!(frames = frames.len(), %params, "verified frames");
        Ok(())
    }

    /// Checks `e([tau^(order - length)]_1, length_commitment) == e([1]_1, length_proof)`,
    /// which holds only if the committed polynomial has fewer than `length`
    /// coefficients.
    pub fn verify_length_proof(
        &self,
        length_commitment: &G2Affine,
        length_proof: &G2Affine,
        length: u64,
    ) -> Result<bool, KzgError> {
        let order = self.srs.order;
        if length == 0 || length > order {
            return Err(KzgError::InconsistentParameters(format!(
                "length {} must be in [1, {}]",
                length, order
            )));
        }
        helpers::validate_g2_point(length_commitment)?;
        helpers::validate_g2_point(length_proof)?;

        let shift = self.g1_point(order - length)?;
        Ok(helpers::pairings_verify(
            shift,
            *length_commitment,
            G1Affine::generator(),
            *length_proof,
        ))
    }

    /// [Verifier::verify_length_proof] for the commitments of one blob.
    pub fn verify_blob_length(&self, commitments: &BlobCommitments) -> Result<bool, KzgError> {
        self.verify_length_proof(
            &commitments.length_commitment,
            &commitments.length_proof,
            commitments.length as u64,
        )
    }

    /// Checks that the G1 commitment and the G2 length commitment commit to
    /// the same polynomial: `e(commitment, [1]_2) == e([1]_1, length_commitment)`.
    pub fn verify_commit_equivalence(
        &self,
        commitment: &G1Affine,
        length_commitment: &G2Affine,
    ) -> Result<bool, KzgError> {
        helpers::validate_g1_point(commitment)?;
        helpers::validate_g2_point(length_commitment)?;
        Ok(helpers::pairings_verify(
            *commitment,
            G2Affine::generator(),
            G1Affine::generator(),
            *length_commitment,
        ))
    }

    /// [Verifier::verify_commit_equivalence] for many blobs with one pairing,
    /// combining the commitments with powers of a challenge derived from all of
    /// them.
    pub fn verify_commit_equivalence_batch(
        &self,
        commitments: &[BlobCommitments],
    ) -> Result<bool, KzgError> {
        if commitments.is_empty() {
            return Err(KzgError::EmptyBatch);
        }
        let mut transcript = Vec::with_capacity(commitments.len() * 192);
        for c in commitments {
            helpers::validate_g1_point(&c.commitment)?;
            helpers::validate_g2_point(&c.length_commitment)?;
            transcript.extend_from_slice(&g1_point_to_bytes_be(&c.commitment));
            transcript.extend_from_slice(&g2_point_to_bytes_be(&c.length_commitment));
        }
        let r = helpers::hash_to_field_element(&transcript);
        let r_powers = compute_powers(&r, commitments.len());

        let g1s: Vec<G1Affine> = commitments.iter().map(|c| c.commitment).collect();
        let g2s: Vec<G2Affine> = commitments.iter().map(|c| c.length_commitment).collect();
        let lhs = helpers::g1_lincomb(&g1s, &r_powers)?;
        let rhs = helpers::g2_lincomb(&g2s, &r_powers)?;
        Ok(helpers::pairings_verify(
            lhs,
            G2Affine::generator(),
            G1Affine::generator(),
            rhs,
        ))
    }

    fn g1_point(&self, index: u64) -> Result<G1Affine, KzgError> {
        if let Some(p) = self.srs.g1_at(index) {
            return Ok(p);
        }
        match &self.g1_path {
            Some(path) => Ok(read_g1_point(path, index)?),
            None => Err(KzgError::InsufficientSrs {
                requested: index + 1,
                loaded: self.srs.g1.len() as u64,
            }),
        }
    }
}

/// Verifies one frame against `commitment`. `index` is the chunk index of
/// the frame; it selects the coset `x * <u>` the frame interpolates, with
/// `x = w^j` for the leading coset index `j` and `w` the primitive
/// `num_evaluations`-th root of unity. The check is
/// `e(commitment - [I(tau)]_1, [1]_2) == e(proof, [tau^d - x^d]_2)` with
/// `I` the frame polynomial and `d = chunk_length`.
pub fn verify_frame_impl(
    commitment: &G1Affine,
    frame: &Frame,
    index: u64,
    params: EncodingParams,
    srs: &SRS,
) -> Result<bool, KzgError> {
    params.validate()?;
    let j = get_leading_coset_index(index, params.num_chunks)?;
    let n = params.num_evaluations();
    let w = Fr::get_root_of_unity(n).ok_or(FftError::InvalidSize {
        size: n as usize,
        max_width: 1 << rust_da_kzg_primitives::consts::MAX_FFT_SCALE,
    })?;
    verify_frame_at(commitment, frame, w.pow([j]), params.chunk_length, srs)
}

pub(crate) fn verify_frame_at(
    commitment: &G1Affine,
    frame: &Frame,
    x: Fr,
    chunk_length: u64,
    srs: &SRS,
) -> Result<bool, KzgError> {
    if frame.length() as u64 != chunk_length {
        return Err(RsError::InvalidFrameLength {
            expected: chunk_length,
            actual: frame.length() as u64,
        }
        .into());
    }
    helpers::validate_g1_point(commitment)?;
    helpers::validate_g1_point(&frame.proof)?;

    let s_pow_d = g2_power(srs, chunk_length)?;
    let x_pow_d = x.pow([chunk_length]);
    let xn_minus_yn = (s_pow_d.into_group() - G2Affine::generator() * x_pow_d).into_affine();

    let interp = commit_interpolation(srs, &frame.coeffs)?;
    let commit_minus_interp = (*commitment - interp).into_affine();

    Ok(helpers::pairings_verify(
        commit_minus_interp,
        G2Affine::generator(),
        frame.proof,
        xn_minus_yn,
    ))
}

// [tau^d]_2
pub(crate) fn g2_power(srs: &SRS, d: u64) -> Result<G2Affine, KzgError> {
    srs.g2_at(d).ok_or(KzgError::InsufficientSrs {
        requested: d + 1,
        loaded: srs.g2.len() as u64,
    })
}

pub(crate) fn commit_interpolation(srs: &SRS, coeffs: &[Fr]) -> Result<G1Affine, KzgError> {
    if coeffs.len() > srs.g1.len() {
        return Err(KzgError::InsufficientSrs {
            requested: coeffs.len() as u64,
            loaded: srs.g1.len() as u64,
        });
    }
    helpers::g1_lincomb(&srs.g1[..coeffs.len()], coeffs)
}
