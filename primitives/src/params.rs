use serde::{Deserialize, Serialize};

use crate::{
    consts::BYTES_PER_FIELD_ELEMENT,
    errors::ParamsError,
    helpers::{is_power_of_two, next_power_of_two, reverse_bits},
};

/// Shape of an encoded blob: `num_chunks` frames of `chunk_length` symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EncodingParams {
    /// Number of symbols per chunk.
    pub chunk_length: u64,
    /// Number of chunks, systematic and parity together.
    pub num_chunks: u64,
}

impl EncodingParams {
    pub fn new(chunk_length: u64, num_chunks: u64) -> Self {
        Self {
            chunk_length,
            num_chunks,
        }
    }

    /// Builds the params needed to spread `data_size` bytes over `num_sys`
    /// systematic chunks, with `num_par` extra parity chunks. Both outputs are
    /// rounded up to powers of two.
    pub fn from_sys_par(num_sys: u64, num_par: u64, data_size: u64) -> Self {
        let num_nodes = num_sys + num_par;
        let data_len = data_size.div_ceil(BYTES_PER_FIELD_ELEMENT as u64);
        let chunk_length = data_len.div_ceil(num_sys.max(1));
        Self::new(next_power_of_two(chunk_length), next_power_of_two(num_nodes))
    }

    /// Smallest power-of-two params at least as large as the given minimums.
    pub fn from_mins(min_chunk_length: u64, min_num_chunks: u64) -> Self {
        Self::new(
            next_power_of_two(min_chunk_length),
            next_power_of_two(min_num_chunks),
        )
    }

    /// Total number of evaluations, `chunk_length * num_chunks`. Callers must
    /// have validated the params so the product does not overflow.
    pub fn num_evaluations(&self) -> u64 {
        self.chunk_length * self.num_chunks
    }

    /// Checks that both dimensions are non-zero powers of two and that their
    /// product fits in a u64.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.chunk_length == 0 || self.num_chunks == 0 {
            return Err(ParamsError::ZeroDimension {
                chunk_length: self.chunk_length,
                num_chunks: self.num_chunks,
            });
        }
        if !is_power_of_two(self.chunk_length) || !is_power_of_two(self.num_chunks) {
            return Err(ParamsError::NotPowerOfTwo {
                chunk_length: self.chunk_length,
                num_chunks: self.num_chunks,
            });
        }
        if self.chunk_length.checked_mul(self.num_chunks).is_none() {
            return Err(ParamsError::Overflow {
                chunk_length: self.chunk_length,
                num_chunks: self.num_chunks,
            });
        }
        Ok(())
    }

    /// [EncodingParams::validate], plus the product must not exceed the SRS order.
    pub fn validate_against_srs(&self, srs_order: u64) -> Result<(), ParamsError> {
        self.validate()?;
        if self.num_evaluations() > srs_order {
            return Err(ParamsError::ExceedsSrsOrder {
                num_evaluations: self.num_evaluations(),
                srs_order,
            });
        }
        Ok(())
    }

    /// Checks that a blob of `blob_length` symbols fits into the evaluations.
    pub fn validate_blob_length(&self, blob_length: u64) -> Result<(), ParamsError> {
        self.validate()?;
        if blob_length > self.num_evaluations() {
            return Err(ParamsError::BlobTooLarge {
                blob_length,
                num_evaluations: self.num_evaluations(),
            });
        }
        Ok(())
    }
}

impl core::fmt::Display for EncodingParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "chunk_length: {}, num_chunks: {}",
            self.chunk_length, self.num_chunks
        )
    }
}

/// Minimum number of distinct chunks needed to decode `max_input_size` bytes.
pub fn get_num_sys(max_input_size: u64, chunk_length: u64) -> u64 {
    let num_symbols = max_input_size.div_ceil(BYTES_PER_FIELD_ELEMENT as u64);
    num_symbols.div_ceil(chunk_length.max(1))
}

/// Index `j` of the root `w^j` that leads the coset evaluated by chunk
/// `chunk_index`: the bit-reversal of the chunk index over `log2(num_chunks)` bits.
pub fn get_leading_coset_index(chunk_index: u64, num_chunks: u64) -> Result<u64, ParamsError> {
    if !is_power_of_two(num_chunks) {
        return Err(ParamsError::NotPowerOfTwo {
            chunk_length: 0,
            num_chunks,
        });
    }
    if chunk_index >= num_chunks {
        return Err(ParamsError::InvalidChunkIndex {
            index: chunk_index,
            num_chunks,
        });
    }
    Ok(reverse_bits(chunk_index, num_chunks.trailing_zeros()))
}
