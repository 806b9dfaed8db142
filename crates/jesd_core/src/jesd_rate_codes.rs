use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid rate code {0}, expected one of 1, 2, 3, 4, 6, 8")]
pub struct InvalidRateCode(pub u32);

/// Input rate of the converters, as a multiple of the 122.88 MSps base rate.
///
/// The transport logic itself runs at a fixed 491.52 MHz cycle clock; rates
/// below the clock leave strobe gaps between samples, rates above it double
/// the converter phases instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateCode {
    R1,
    R2,
    R3,
    R4,
    R6,
    R8,
}

impl RateCode {
    pub fn from_code(code: u32) -> Result<Self, InvalidRateCode> {
        match code {
            1 => Ok(Self::R1),
            2 => Ok(Self::R2),
            3 => Ok(Self::R3),
            4 => Ok(Self::R4),
            6 => Ok(Self::R6),
            8 => Ok(Self::R8),
            other => Err(InvalidRateCode(other)),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Self::R1 => 1,
            Self::R2 => 2,
            Self::R3 => 3,
            Self::R4 => 4,
            Self::R6 => 6,
            Self::R8 => 8,
        }
    }

    /// Converter phases carried per row of the nominal converter count.
    /// Rates above 491.52 MSps run dual phase.
    pub fn phase_multiplier(self) -> usize {
        match self {
            Self::R6 | Self::R8 => 2,
            _ => 1,
        }
    }

    pub fn sample_rate_msps(self) -> f64 {
        match self {
            Self::R1 => 122.88,
            Self::R2 => 245.76,
            Self::R3 => 368.64,
            Self::R4 => 491.52,
            Self::R6 => 737.28,
            Self::R8 => 983.04,
        }
    }

    /// Whether a sample column carries data at this rate.
    ///
    /// Strobe patterns repeat on a 4-cycle ring of the 491.52 MHz clock:
    /// 122.88 MSps fills one slot in four, 245.76 every other slot,
    /// 368.64 (and its dual-phase twin 737.28) three slots in four, and the
    /// full rates every slot.
    pub fn is_valid_column(self, column: usize) -> bool {
        match self {
            Self::R1 => column % 4 == 0,
            Self::R2 => column % 2 == 0,
            Self::R3 | Self::R6 => column % 4 != 3,
            Self::R4 | Self::R8 => true,
        }
    }

    /// Data-carrying columns per 4-cycle strobe ring, the dual of
    /// `is_valid_column`. This bounds the sustained input bandwidth a rate
    /// delivers to the transport layer.
    pub fn valid_columns_per_ring(self) -> usize {
        match self {
            Self::R1 => 1,
            Self::R2 => 2,
            Self::R3 | Self::R6 => 3,
            Self::R4 | Self::R8 => 4,
        }
    }

    /// Number of sample columns needed to carry `nominal_samples` per
    /// converter at this rate, invalid strobe slots included.
    ///
    /// For rates 3 and 6 every four clock slots carry three samples, so the
    /// count is floor(4n/3).
    pub fn effective_column_count(self, nominal_samples: usize) -> usize {
        match self {
            Self::R1 => 4 * nominal_samples,
            Self::R2 => 2 * nominal_samples,
            Self::R3 | Self::R6 => 4 * nominal_samples / 3,
            Self::R4 | Self::R8 => nominal_samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in [1, 2, 3, 4, 6, 8] {
            assert_eq!(RateCode::from_code(code).unwrap().code(), code);
        }
    }

    #[test]
    fn rejects_unknown_codes() {
        assert_eq!(RateCode::from_code(5), Err(InvalidRateCode(5)));
        assert_eq!(RateCode::from_code(0), Err(InvalidRateCode(0)));
    }

    #[test]
    fn dual_phase_above_rate_four() {
        assert_eq!(RateCode::R4.phase_multiplier(), 1);
        assert_eq!(RateCode::R6.phase_multiplier(), 2);
        assert_eq!(RateCode::R8.phase_multiplier(), 2);
    }

    #[test]
    fn strobe_patterns_repeat_every_four_columns() {
        let pattern = |rate: RateCode| -> Vec<bool> {
            (0..8).map(|s| rate.is_valid_column(s)).collect()
        };
        assert_eq!(pattern(RateCode::R1), [true, false, false, false, true, false, false, false]);
        assert_eq!(pattern(RateCode::R2), [true, false, true, false, true, false, true, false]);
        assert_eq!(pattern(RateCode::R3), [true, true, true, false, true, true, true, false]);
        assert_eq!(pattern(RateCode::R8), [true; 8]);
    }

    #[test]
    fn ring_duty_matches_the_strobe_pattern() {
        for rate in [RateCode::R1, RateCode::R2, RateCode::R3, RateCode::R4, RateCode::R6, RateCode::R8] {
            let strobed = (0..4).filter(|&s| rate.is_valid_column(s)).count();
            assert_eq!(rate.valid_columns_per_ring(), strobed);
        }
    }

    #[test]
    fn column_counts_scale_with_rate() {
        assert_eq!(RateCode::R1.effective_column_count(12), 48);
        assert_eq!(RateCode::R2.effective_column_count(12), 24);
        assert_eq!(RateCode::R3.effective_column_count(12), 16);
        assert_eq!(RateCode::R6.effective_column_count(10), 13);
        assert_eq!(RateCode::R4.effective_column_count(12), 12);
        assert_eq!(RateCode::R8.effective_column_count(12), 12);
    }
}
