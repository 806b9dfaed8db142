use jesd_core::jesd_link_config::JesdLinkConfig;
use lane_map::frame_table::FrameTable;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Precision of the raw converter samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterPrecision {
    Bits12,
    Bits16,
}

impl ConverterPrecision {
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            12 => Some(Self::Bits12),
            16 => Some(Self::Bits16),
            _ => None,
        }
    }

    /// 12-bit samples ride MSB-aligned in their 16-bit cells, low nibble
    /// zero.
    fn sample_mask(self) -> u16 {
        match self {
            Self::Bits12 => 0xfff0,
            Self::Bits16 => 0xffff,
        }
    }
}

/// Random converter input for one run: samples on the rate's strobe
/// pattern, zeros in the dead slots.
///
/// The strobe pattern is applied as-is; combinations whose rate would
/// oversubscribe the lanes are rejected when the transport geometry is
/// built, before any stimulus exists.
pub struct ConverterStimulus {
    pub raw_conv_data: FrameTable<u16>,
    pub valid: FrameTable<bool>,
}

pub fn generate_converter_stimulus(
    link: &JesdLinkConfig,
    num_columns: usize,
    precision: ConverterPrecision,
    seed: u64,
) -> ConverterStimulus {
    let rows = link.effective_converters();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut raw_conv_data = FrameTable::<u16>::new(rows, num_columns);
    let mut valid = FrameTable::<bool>::new(rows, num_columns);

    for column in 0..num_columns {
        if !link.rate().is_valid_column(column) {
            continue;
        }
        for row in 0..rows {
            raw_conv_data.set(row, column, rng.gen::<u16>() & precision.sample_mask());
            valid.set(row, column, true);
        }
    }

    ConverterStimulus {
        raw_conv_data,
        valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_land_on_the_strobe_pattern() {
        let link = JesdLinkConfig::new(2, 2, 16, 2).unwrap();
        let stimulus = generate_converter_stimulus(&link, 8, ConverterPrecision::Bits16, 7);
        for column in 0..8 {
            let expected = column % 2 == 0;
            for row in 0..2 {
                assert_eq!(stimulus.valid.get(row, column), expected);
                if !expected {
                    assert_eq!(stimulus.raw_conv_data.get(row, column), 0);
                }
            }
        }
    }

    #[test]
    fn twelve_bit_samples_keep_the_low_nibble_clear() {
        let link = JesdLinkConfig::new(2, 2, 12, 4).unwrap();
        let stimulus = generate_converter_stimulus(&link, 16, ConverterPrecision::Bits12, 7);
        for column in 0..16 {
            for row in 0..2 {
                assert_eq!(stimulus.raw_conv_data.get(row, column) & 0x000f, 0);
            }
        }
    }

    #[test]
    fn dual_phase_rates_double_the_rows() {
        let link = JesdLinkConfig::new(2, 2, 16, 8).unwrap();
        let stimulus = generate_converter_stimulus(&link, 4, ConverterPrecision::Bits16, 7);
        assert_eq!(stimulus.raw_conv_data.rows(), 4);
        assert_eq!(stimulus.valid.rows(), 4);
    }
}
