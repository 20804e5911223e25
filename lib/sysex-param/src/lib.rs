//! # sysex-param - synthesizer parameter decoders
//!
//! Turns raw parameter bytes pulled out of a sysex dump into values a person
//! can read.
//!
//! ## Modules
//!
//! - `frequency`: filter cutoff index (0..=255) to Hz via repeated fixed-point decay
//! - `gain`: linear gain/morph index to a signed `±D.D dB` string
//! - `filter`: filter type catalogue, picks the cutoff curve and Q rendering per type

pub mod filter;
pub mod frequency;
pub mod gain;

pub use filter::{FILTER_TYPES, FilterCategory, FilterType};
pub use frequency::{FrequencyDecoder, decode_frequency, format_frequency};
pub use gain::{Gain, format_gain, gain_tenths};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(
        "Frequency overflow: index={index}, max_frequency={max_frequency}, decay_multiplier={decay_multiplier}"
    )]
    Overflow {
        index: i32,
        max_frequency: i32,
        decay_multiplier: i32,
    },
}
