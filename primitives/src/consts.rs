pub const BYTES_PER_FIELD_ELEMENT: usize = 32;
pub const SIZE_OF_G1_AFFINE_UNCOMPRESSED: usize = 64; // in bytes
pub const SIZE_OF_G2_AFFINE_UNCOMPRESSED: usize = 128; // in bytes

/// Number of points in the full (mainnet) trusted setup, 2^28.
pub const SRS_ORDER: u64 = 1 << 28;

/// 2-adicity of the bn254 scalar field: the largest power-of-two FFT domain.
pub const MAX_FFT_SCALE: u8 = 28;

/// Multiplicative generator of the scalar field, used as the coset shift
/// during erasure recovery.
pub const DOMAIN_SHIFT_FACTOR: u64 = 5;

// Flags stored in the two most significant bits of a serialized point (gnark layout).
pub const POINT_FLAG_MASK: u8 = 0b11 << 6;
pub const POINT_FLAG_UNCOMPRESSED: u8 = 0b00 << 6;
pub const POINT_FLAG_INFINITY: u8 = 0b01 << 6;

pub const RANDOM_CHALLENGE_KZG_BATCH_DOMAIN: &[u8] = b"EIGENDA_RCKZGBATCH___V1_"; // Adapted from 4844

// SRS table cache files are named `dimE{num_chunks}.coset{chunk_length}`.
pub const SRS_TABLE_DIM_PREFIX: &str = "dimE";
pub const SRS_TABLE_COSET_PREFIX: &str = "coset";
