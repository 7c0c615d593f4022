use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Failed to initialize LibRaw session")]
    Initialization,

    #[error("Failed to open RAW file: {0}")]
    Open(String),

    #[error("Failed to unpack RAW data: {0}")]
    Unpack(String),

    #[error("Failed to process RAW data: {0}")]
    Process(String),

    #[error("Failed to create memory image: {0}")]
    Materialize(String),

    #[error("Unexpected image buffer size: got {got}, want {want}")]
    SizeMismatch { got: usize, want: usize },

    #[error("Unsupported output bit depth: {0}")]
    UnsupportedBitDepth(u16),

    #[error("Path cannot be passed to LibRaw: {0}")]
    InvalidPath(String),

    #[error("Failed to extract thumbnail: {0}")]
    Thumbnail(String),

    #[error("Invalid processor options: {0}")]
    Config(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProcessorError>;
