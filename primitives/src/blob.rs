use crate::{errors::KzgError, helpers, polynomial::PolynomialCoeffForm};
use serde::{Deserialize, Serialize};

/// A blob of bn254 field elements, 32 big endian bytes each. The final
/// element may be shorter than 32 bytes and is read right-padded with zeroes.
/// Every element is canonical, whichever way the blob was built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Blob {
    /// The binary data contained within the blob.
    blob_data: Vec<u8>,
}

impl Blob {
    /// Creates a new `Blob` from the given blob_data.
    /// blob_data should already be padded, meaning that every 32 byte chunk
    /// is a canonical bn254 field element. Returns an error if any chunk,
    /// including a short trailing one, exceeds the field modulus.
    pub fn new(blob_data: &[u8]) -> Result<Self, KzgError> {
        helpers::validate_blob_data_as_canonical_field_elements(blob_data)?;
        Ok(Blob {
            blob_data: blob_data.to_vec(),
        })
    }

    /// Creates a new `Blob` from arbitrary bytes by inserting a zero byte in
    /// front of every 31 bytes. If the data is already padded, use
    /// [`Blob::new`] instead.
    pub fn from_raw_data(raw_data: &[u8]) -> Self {
        let blob_data = helpers::convert_by_padding_empty_byte(raw_data);
        Blob { blob_data }
    }

    /// Returns the raw data of the blob, removing any padding added by
    /// [`Blob::from_raw_data`].
    pub fn to_raw_data(&self) -> Vec<u8> {
        helpers::remove_empty_byte_from_padded_bytes_unchecked(&self.blob_data)
    }

    /// Returns the blob data
    pub fn data(&self) -> &[u8] {
        &self.blob_data
    }

    /// Length of the blob data in bytes, padding included.
    pub fn len(&self) -> usize {
        self.blob_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blob_data.is_empty()
    }

    /// Number of field elements (symbols) in the blob.
    pub fn len_symbols(&self) -> usize {
        helpers::get_num_element(self.blob_data.len(), crate::consts::BYTES_PER_FIELD_ELEMENT)
    }

    /// Convert the blob data to a [PolynomialCoeffForm].
    pub fn to_polynomial_coeff_form(&self) -> Result<PolynomialCoeffForm, KzgError> {
        let coeffs = helpers::to_fr_array(&self.blob_data)?;
        Ok(PolynomialCoeffForm::new(coeffs))
    }
}

impl TryFrom<Vec<u8>> for Blob {
    type Error = KzgError;

    fn try_from(blob_data: Vec<u8>) -> Result<Self, Self::Error> {
        helpers::validate_blob_data_as_canonical_field_elements(&blob_data)?;
        Ok(Blob { blob_data })
    }
}

impl From<Blob> for Vec<u8> {
    fn from(blob: Blob) -> Self {
        blob.blob_data
    }
}
