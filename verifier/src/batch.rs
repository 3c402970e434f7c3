use ark_bn254::{Fr, G1Affine, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInteger, Field, PrimeField};
use ark_std::Zero;
use rust_da_kzg_primitives::{
    consts::RANDOM_CHALLENGE_KZG_BATCH_DOMAIN,
    errors::KzgError,
    frame::Sample,
    helpers::{self, g1_point_to_bytes_be},
    params::{get_leading_coset_index, EncodingParams},
};
use tracing::debug;

use crate::verify::{g2_power, Verifier};

/// Ref: https://github.com/ethereum/consensus-specs/blob/master/specs/deneb/polynomial-commitments.md#verify_kzg_proof_batch
/// Powers `[1, r, r^2, ...]` of a challenge `r` hashed from every input of
/// the batch, so that a prover cannot choose the combination:
///
/// `domain (24) || chunk_length (8) || num_chunks (8) || n (8)` followed by
/// `commitment (64) || proof (64) || assignment_index (4) || blob_index (8) || coeffs (32 each)`
/// for each sample, integers big endian.
pub fn compute_sample_randomness(
    params: EncodingParams,
    samples: &[Sample],
) -> Result<Vec<Fr>, KzgError> {
    let n = samples.len();
    let header_len = RANDOM_CHALLENGE_KZG_BATCH_DOMAIN.len() + 24;
    let per_sample: usize = samples
        .iter()
        .map(|s| 64 + 64 + 4 + 8 + 32 * s.chunk.coeffs.len())
        .sum();

    let mut data_to_be_hashed: Vec<u8> = Vec::with_capacity(header_len + per_sample);
    data_to_be_hashed.extend_from_slice(RANDOM_CHALLENGE_KZG_BATCH_DOMAIN);
    data_to_be_hashed.extend_from_slice(&params.chunk_length.to_be_bytes());
    data_to_be_hashed.extend_from_slice(&params.num_chunks.to_be_bytes());
    data_to_be_hashed.extend_from_slice(&helpers::usize_to_be_bytes(n));

    for sample in samples {
        data_to_be_hashed.extend_from_slice(&g1_point_to_bytes_be(&sample.commitment));
        data_to_be_hashed.extend_from_slice(&g1_point_to_bytes_be(&sample.chunk.proof));
        data_to_be_hashed.extend_from_slice(&sample.assignment_index.to_be_bytes());
        data_to_be_hashed.extend_from_slice(&helpers::usize_to_be_bytes(sample.blob_index));
        for coeff in &sample.chunk.coeffs {
            data_to_be_hashed.extend_from_slice(&coeff.into_bigint().to_bytes_be());
        }
    }

    // Verify we filled the entire buffer
    if data_to_be_hashed.len() != header_len + per_sample {
        return Err(KzgError::InvalidInputLength);
    }

    let r = helpers::hash_to_field_element(&data_to_be_hashed);
    Ok(helpers::compute_powers(&r, n))
}

impl Verifier {
    /// Verifies samples of up to `num_blobs` blobs, all encoded with `params`,
    /// with a single pairing check.
    ///
    /// With `r_k` the randomness of sample `k`, `pi_k` its proof, `I_k` its
    /// frame polynomial and `x_k` its coset leader, every sample satisfies
    /// `C_k - [I_k(tau)] = (tau^d - x_k^d) pi_k`. Summing with weights `r_k`:
    ///
    /// `e(sum r_k pi_k, [tau^d]_2) == e(sum r_k C_k - [sum r_k I_k(tau)] + sum r_k x_k^d pi_k, [1]_2)`
    ///
    /// The commitment term is aggregated per blob row, and the interpolation
    /// term is one MSM over the first `d` SRS points.
    pub fn universal_verify_sub_batch(
        &self,
        params: EncodingParams,
        samples: &[Sample],
        num_blobs: usize,
    ) -> Result<(), KzgError> {
        params.validate()?;
        if samples.is_empty() {
            return Err(KzgError::EmptyBatch);
        }
        let d = params.chunk_length;
        let srs = self.srs();
        if d > srs.g1.len() as u64 {
            return Err(KzgError::InsufficientSrs {
                requested: d,
                loaded: srs.g1.len() as u64,
            });
        }

        let mut row_commitments: Vec<Option<G1Affine>> = vec![None; num_blobs];
        for sample in samples {
            let row = sample.blob_index;
            if row >= num_blobs {
                return Err(KzgError::RowIndexOutOfRange { row, num_blobs });
            }
            if sample.chunk.length() as u64 != d {
                return Err(KzgError::InconsistentParameters(format!(
                    "sample of blob {} has {} coefficients, chunk length is {}",
                    row,
                    sample.chunk.length(),
                    d
                )));
            }
            helpers::validate_g1_point(&sample.commitment)?;
            helpers::validate_g1_point(&sample.chunk.proof)?;
            match row_commitments[row] {
                Some(c) if c != sample.commitment => {
                    return Err(KzgError::CommitmentMismatch { row })
                },
                Some(_) => {},
                None => row_commitments[row] = Some(sample.commitment),
            }
        }

        let fs = self.fft_settings(params)?;
        let randoms = compute_sample_randomness(params, samples)?;

        // sum r_k pi_k
        let proofs: Vec<G1Affine> = samples.iter().map(|s| s.chunk.proof).collect();
        let proofs_lc = helpers::g1_lincomb(&proofs, &randoms)?;

        // sum r_k C_k, grouped by row
        let mut row_weights = vec![Fr::zero(); num_blobs];
        for (sample, r) in samples.iter().zip(randoms.iter()) {
            row_weights[sample.blob_index] += r;
        }
        let (commits, weights): (Vec<G1Affine>, Vec<Fr>) = row_commitments
            .iter()
            .zip(row_weights.iter())
            .filter_map(|(c, w)| c.map(|c| (c, *w)))
            .unzip();
        let commits_lc = helpers::g1_lincomb(&commits, &weights)?;

        // [sum r_k I_k(tau)]_1
        let mut agg_poly = vec![Fr::zero(); d as usize];
        for (sample, r) in samples.iter().zip(randoms.iter()) {
            for (acc, c) in agg_poly.iter_mut().zip(sample.chunk.coeffs.iter()) {
                *acc += *r * c;
            }
        }
        let agg_poly_commit = helpers::g1_lincomb(&srs.g1[..d as usize], &agg_poly)?;

        // sum r_k x_k^d pi_k
        let offset_scalars = samples
            .iter()
            .zip(randoms.iter())
            .map(|(sample, r)| {
                let j = get_leading_coset_index(sample.assignment_index as u64, params.num_chunks)?;
                let x = fs.expanded_roots_of_unity[j as usize];
                Ok(*r * x.pow([d]))
            })
            .collect::<Result<Vec<Fr>, KzgError>>()?;
        let offset_lc = helpers::g1_lincomb(&proofs, &offset_scalars)?;

        let rhs = (commits_lc.into_group() - agg_poly_commit + offset_lc).into_affine();
        let s_pow_d: G2Affine = g2_power(srs, d)?;

        debug!(
            samples = samples.len(),
            num_blobs,
            %params,
            "universal batch verification"
        );
        if helpers::pairings_verify(proofs_lc, s_pow_d, rhs, G2Affine::generator()) {
            Ok(())
        } else {
            Err(KzgError::ProofInvalid(
                "universal batch verification failed".to_string(),
            ))
        }
    }
}
