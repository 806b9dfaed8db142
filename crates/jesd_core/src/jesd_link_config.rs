use thiserror::Error;

use crate::jesd_rate_codes::{InvalidRateCode, RateCode};

pub const ALLOWED_CONVERTER_COUNTS: [usize; 4] = [2, 4, 8, 16];
pub const ALLOWED_NIBBLE_GROUP_BITS: [u32; 5] = [12, 16, 24, 32, 48];

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JesdConfigError {
    #[error("lane count must be positive")]
    LaneCount,
    #[error("converter count {0} not in 2, 4, 8, 16")]
    ConverterCount(usize),
    #[error("nibble group width {0} not in 12, 16, 24, 32, 48")]
    NibbleGroupWidth(u32),
    #[error(transparent)]
    RateCode(#[from] InvalidRateCode),
}

/// Link-level configuration of the transmitter: lane count, real converter
/// count, nibble group width and input rate.
///
/// Every field is checked against its allowed domain at construction; an
/// out-of-domain value is an error, never silently ignored. Downstream
/// mapping always works on the phase-expanded converter count, so the raw
/// count stays private and `effective_converters` is the public view.
#[derive(Debug, Clone, Copy)]
pub struct JesdLinkConfig {
    lanes: usize,
    converters: usize,
    nibble_group_bits: u32,
    rate: RateCode,
}

impl JesdLinkConfig {
    pub fn new(
        lanes: usize,
        converters: usize,
        nibble_group_bits: u32,
        rate_code: u32,
    ) -> Result<Self, JesdConfigError> {
        if lanes == 0 {
            return Err(JesdConfigError::LaneCount);
        }
        if !ALLOWED_CONVERTER_COUNTS.contains(&converters) {
            return Err(JesdConfigError::ConverterCount(converters));
        }
        if !ALLOWED_NIBBLE_GROUP_BITS.contains(&nibble_group_bits) {
            return Err(JesdConfigError::NibbleGroupWidth(nibble_group_bits));
        }
        let rate = RateCode::from_code(rate_code)?;

        Ok(Self {
            lanes,
            converters,
            nibble_group_bits,
            rate,
        })
    }

    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// Converter count including the phase multiplier. This is the row
    /// count of every converter-side table.
    pub fn effective_converters(&self) -> usize {
        self.converters * self.rate.phase_multiplier()
    }

    pub fn nibble_group_bits(&self) -> u32 {
        self.nibble_group_bits
    }

    pub fn rate(&self) -> RateCode {
        self.rate
    }
}
