pub mod buffer;
pub mod channel_tint;
pub mod codec;

pub use buffer::{Image, PROBE, sample_at};
pub use channel_tint::{ChannelTintConfig, Narrowing, parse_coefficient, transform};
pub use codec::{decode, encode};

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid coefficient `{input}`: {source}")]
    Parse {
        input: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("expected at least 3 channels, found {0}")]
    Shape(usize),
}

impl Error {
    /// Name of the processing stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::Parse { .. } => "argument parsing",
            Error::Decode { .. } => "decode",
            Error::Shape(_) => "transform",
            Error::Encode { .. } => "encode",
        }
    }
}

pub trait Effect {
    fn apply(&self, image: &mut Image) -> Result<()>;
}
