use std::sync::Arc;

use ark_bn254::{Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::{CurveGroup, VariableBaseMSM};
use rust_da_kzg_primitives::{
    blob::Blob, errors::KzgError, frame::BlobCommitments, helpers, srs::SRS,
};

/// Computes commitments to polynomials in coefficient form against the loaded
/// SRS: the G1 commitment, the G2 length commitment, and the length proof that
/// bounds the polynomial degree.
#[derive(Debug, Clone)]
pub struct KZG {
    srs: Arc<SRS>,
}

impl KZG {
    pub fn new(srs: Arc<SRS>) -> Self {
        Self { srs }
    }

    pub fn srs(&self) -> &SRS {
        &self.srs
    }

    /// Commit the polynomial with coefficients `coeffs`, i.e. `sum coeffs[i] * [tau^i]_1`.
    pub fn commit(&self, coeffs: &[Fr]) -> Result<G1Affine, KzgError> {
        if coeffs.len() > self.srs.g1.len() {
            return Err(KzgError::InsufficientSrs {
                requested: coeffs.len() as u64,
                loaded: self.srs.g1.len() as u64,
            });
        }
        // When the polynomial is in coefficient form, use the srs points in monomial form.
        G1Projective::msm(&self.srs.g1[..coeffs.len()], coeffs)
            .map(|res| res.into_affine())
            .map_err(|err| KzgError::CommitError(err.to_string()))
    }

    /// Commit to a [Blob], reading its field elements as coefficients.
    pub fn commit_blob(&self, blob: &Blob) -> Result<G1Affine, KzgError> {
        let polynomial = blob.to_polynomial_coeff_form()?;
        self.commit(polynomial.unpadded_coeffs())
    }

    /// The same commitment as [KZG::commit], taken in G2.
    pub fn length_commitment(&self, coeffs: &[Fr]) -> Result<G2Affine, KzgError> {
        if coeffs.len() > self.srs.g2.len() {
            return Err(KzgError::InsufficientSrs {
                requested: coeffs.len() as u64,
                loaded: self.srs.g2.len() as u64,
            });
        }
        helpers::g2_lincomb(&self.srs.g2[..coeffs.len()], coeffs)
    }

    /// Commitment to `X^(order - length) * f(X)` in G2. It only exists if
    /// `deg f < length`, so pairing it against the length commitment proves
    /// the bound.
    pub fn length_proof(&self, coeffs: &[Fr], length: u64) -> Result<G2Affine, KzgError> {
        let order = self.srs.order;
        if (coeffs.len() as u64) > length || length > order {
            return Err(KzgError::InconsistentParameters(format!(
                "length proof needs coefficients {} <= length {} <= srs order {}",
                coeffs.len(),
                length,
                order
            )));
        }
        let shifted = self.g2_window(order - length, coeffs.len())?;
        G2Projective::msm(shifted, coeffs)
            .map(|res| res.into_affine())
            .map_err(|err| KzgError::MsmError(err.to_string()))
    }

    /// All commitments published for a blob of `length` symbols.
    pub fn get_commitments(&self, coeffs: &[Fr], length: u64) -> Result<BlobCommitments, KzgError> {
        let length_u32 = u32::try_from(length).map_err(|_| KzgError::InvalidInputLength)?;
        Ok(BlobCommitments {
            commitment: self.commit(coeffs)?,
            length_commitment: self.length_commitment(coeffs)?,
            length_proof: self.length_proof(coeffs, length)?,
            length: length_u32,
        })
    }

    // Contiguous G2 points [tau^start]_2 .. [tau^(start + count - 1)]_2, served
    // from the leading G2 points or from the trailing section.
    fn g2_window(&self, start: u64, count: usize) -> Result<&[G2Affine], KzgError> {
        let end = start + count as u64;
        if end <= self.srs.g2.len() as u64 {
            return Ok(&self.srs.g2[start as usize..end as usize]);
        }
        let trailing_len = self.srs.g2_trailing.len() as u64;
        let trailing_start = self.srs.order.saturating_sub(trailing_len);
        if start >= trailing_start && end <= self.srs.order {
            let from = (start - trailing_start) as usize;
            return Ok(&self.srs.g2_trailing[from..from + count]);
        }
        Err(KzgError::InsufficientSrs {
            requested: end,
            loaded: self.srs.g2.len().max(self.srs.g2_trailing.len()) as u64,
        })
    }
}
