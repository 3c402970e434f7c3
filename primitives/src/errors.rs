use thiserror::Error;

/// Errors raised by the FFT engine and the zero polynomial routines built on it.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FftError {
    /// The input length is zero, not a power of two, or larger than the
    /// precomputed maximum width.
    #[error("invalid FFT size {size}: must be a power of two no larger than {max_width}")]
    InvalidSize { size: usize, max_width: usize },

    /// The requested scale exceeds the 2-adicity of the scalar field.
    #[error("FFT scale {0} exceeds the maximum supported scale")]
    ScaleTooLarge(u8),

    #[error("invalid FFT input: {0}")]
    InvalidInput(String),
}

/// Errors raised while validating [crate::params::EncodingParams].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParamsError {
    #[error("encoding params must be powers of 2: chunk_length {chunk_length}, num_chunks {num_chunks}")]
    NotPowerOfTwo { chunk_length: u64, num_chunks: u64 },

    #[error("encoding params must be non-zero: chunk_length {chunk_length}, num_chunks {num_chunks}")]
    ZeroDimension { chunk_length: u64, num_chunks: u64 },

    #[error("multiplication overflow: chunk_length {chunk_length}, num_chunks {num_chunks}")]
    Overflow { chunk_length: u64, num_chunks: u64 },

    /// `chunk_length * num_chunks` is larger than the SRS order.
    #[error("number of evaluations {num_evaluations} exceeds SRS order {srs_order}")]
    ExceedsSrsOrder { num_evaluations: u64, srs_order: u64 },

    /// The blob does not fit into `chunk_length * num_chunks` evaluations.
    #[error("blob of {blob_length} symbols does not fit into {num_evaluations} evaluations")]
    BlobTooLarge {
        blob_length: u64,
        num_evaluations: u64,
    },

    #[error("chunk index {index} out of range for {num_chunks} chunks")]
    InvalidChunkIndex { index: u64, num_chunks: u64 },
}

/// Errors raised while reading a structured reference string from disk.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SrsError {
    /// The file is shorter than the requested number of points.
    #[error("insufficient SRS points: requested {requested}, available {available}")]
    InsufficientPoints { requested: u64, available: u64 },

    /// Underlying io failure, stored as a string so the error stays `Clone`.
    #[error("SRS io error: {0}")]
    Io(String),

    /// A serialized point failed decoding or validation.
    #[error("invalid SRS point at index {index}: {reason}")]
    InvalidPoint { index: u64, reason: String },

    #[error("invalid SRS range: {0}")]
    InvalidRange(String),

    /// A parsing worker exited without reporting a result.
    #[error("SRS worker failed: {0}")]
    WorkerFailed(String),
}

impl From<std::io::Error> for SrsError {
    fn from(err: std::io::Error) -> Self {
        SrsError::Io(err.to_string())
    }
}

/// Errors raised by the Reed-Solomon encoder and decoder.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RsError {
    /// Fewer distinct chunks than systematic chunks were supplied to decode.
    #[error("insufficient chunks to decode: required {required}, received {received}")]
    InsufficientChunks { required: u64, received: u64 },

    #[error("number of frames {frames} does not match number of indices {indices}")]
    MismatchedInputs { frames: usize, indices: usize },

    /// A frame carries a number of coefficients different from the chunk length.
    #[error("frame length {actual} does not match chunk length {expected}")]
    InvalidFrameLength { expected: u64, actual: u64 },

    #[error("input of {input} symbols exceeds {num_evaluations} evaluations")]
    InputTooLarge { input: u64, num_evaluations: u64 },

    /// The erasure recovery produced data inconsistent with the known samples.
    #[error("recovery failed: {0}")]
    RecoveryFailed(String),

    #[error("FFT error: {0}")]
    Fft(#[from] FftError),

    #[error("params error: {0}")]
    Params(#[from] ParamsError),
}

/// Errors raised when decoding frames from their wire format.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FrameError {
    #[error("truncated frame data: needed {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },

    #[error("{0} trailing bytes after frame data")]
    TrailingBytes(usize),

    #[error("invalid proof point: {0}")]
    InvalidPoint(String),

    #[error("invalid coefficient at position {0}")]
    InvalidFieldElement(usize),
}

/// Errors related to KZG operations.
///
/// The `KzgError` enum encapsulates all possible errors that can occur during
/// KZG-related operations, including those from the lower level enums above.
/// It also includes additional errors specific to KZG operations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum KzgError {
    #[error("FFT error: {0}")]
    FftError(#[from] FftError),

    #[error("params error: {0}")]
    ParamsError(#[from] ParamsError),

    #[error("SRS error: {0}")]
    SrsError(#[from] SrsError),

    #[error("reed-solomon error: {0}")]
    RsError(#[from] RsError),

    #[error("frame error: {0}")]
    FrameError(#[from] FrameError),

    #[error("MSM error: {0}")]
    MsmError(String),

    /// Error related to serialization with a descriptive message.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// The operation needs more SRS points than were loaded.
    #[error("insufficient SRS: requested {requested} points, loaded {loaded}")]
    InsufficientSrs { requested: u64, loaded: u64 },

    /// Error related to commitment processes with a descriptive message.
    #[error("not on curve error: {0}")]
    NotOnCurveError(String),

    /// Error indicating an invalid commit operation with a descriptive message.
    #[error("commit error: {0}")]
    CommitError(String),

    /// A pairing check failed.
    #[error("proof invalid: {0}")]
    ProofInvalid(String),

    /// Samples of one batch were produced with different encoding params.
    #[error("inconsistent parameters: {0}")]
    InconsistentParameters(String),

    #[error("the number of samples must not be zero")]
    EmptyBatch,

    #[error("sample row index {row} is out of range for {num_blobs} blobs")]
    RowIndexOutOfRange { row: usize, num_blobs: usize },

    #[error("samples of row {row} have different commitments")]
    CommitmentMismatch { row: usize },

    /// Invalid engine configuration.
    #[error("config error: {0}")]
    ConfigError(String),

    /// A generic error with a descriptive message.
    #[error("generic error: {0}")]
    GenericError(String),

    /// Error indicating an invalid input length scenario, typically in data processing.
    #[error("invalid input length")]
    InvalidInputLength,

    /// Error indicating invalid field element bytes that exceed the field modulus.
    #[error("invalid field element: {0}")]
    InvalidFieldElement(String),
}
