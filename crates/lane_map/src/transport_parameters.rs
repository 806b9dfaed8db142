use thiserror::Error;

/// The block bit widths a lane can receive per valid cycle.
/// Widths above 64 need the two-page packer buffer to avoid losing bits.
pub const LEGAL_BLOCK_BIT_WIDTHS: [u32; 7] = [16, 24, 32, 48, 64, 96, 128];

/// Width of one nibble group in bits.
///
/// A nibble group is the transport-layer data unit a raw converter sample is
/// expanded into before lane mapping. Only five widths exist on the wire, so
/// the per-cell expansion is an exhaustive match on this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NibbleGroupWidth {
    W12,
    W16,
    W24,
    W32,
    W48,
}

impl NibbleGroupWidth {
    pub fn from_bits(bits: u32) -> Result<Self, GeometryError> {
        match bits {
            12 => Ok(Self::W12),
            16 => Ok(Self::W16),
            24 => Ok(Self::W24),
            32 => Ok(Self::W32),
            48 => Ok(Self::W48),
            other => Err(GeometryError::UnsupportedNibbleGroupWidth(other)),
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            Self::W12 => 12,
            Self::W16 => 16,
            Self::W24 => 24,
            Self::W32 => 32,
            Self::W48 => 48,
        }
    }

    /// Aligns a raw 16-bit converter sample into the low `bits()` bits of a
    /// 64-bit cell.
    ///
    /// DOC: JESD204C Figure 38. The most significant sample bit lands at the
    /// top of the nibble group field. 12-bit samples arrive MSB-aligned in
    /// their 16-bit cells (low 4 bits zero), so they are shifted back down.
    pub fn align_sample(self, sample: u16) -> u64 {
        let x = sample as u64;
        match self {
            Self::W12 => x >> 4,
            Self::W16 => x,
            Self::W24 => x << 8,
            Self::W32 => x << 16,
            Self::W48 => x << 32,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("unsupported nibble group width {0}, expected one of 12, 16, 24, 32, 48")]
    UnsupportedNibbleGroupWidth(u32),
    #[error("lane count must be positive")]
    NoLanes,
    #[error("{rows} converter phases cannot be split evenly over {lanes} lanes")]
    RowsNotDivisible { rows: usize, lanes: usize },
    #[error("block bit width {0} is not one of 16, 24, 32, 48, 64, 96, 128")]
    IllegalBlockBitWidth(u32),
}

/// Describes the fixed geometry of one transport-layer mapping run.
///
/// All quantities are per cycle: `rows` converter-phase samples arrive in
/// parallel, each lane owns a contiguous block of `block_size` of them, and
/// the block contributes `block_bit_width` bits to that lane on a valid
/// cycle.
#[derive(Debug, Clone, Copy)]
pub struct TransportParameters {
    /// Number of serial output lanes.
    pub lanes: usize,
    /// Number of converter-phase rows (converters times phases).
    pub rows: usize,
    /// Number of sample columns in every table of the run.
    pub num_columns: usize,
    /// Width of one nibble group.
    pub nibble_group_width: NibbleGroupWidth,
    /// Converter-phase rows feeding one lane each cycle.
    pub block_size: usize,
    /// Bits arriving at one lane per valid cycle.
    pub block_bit_width: u32,
}

impl TransportParameters {
    /// Creates the derived mapping geometry from the required subset and
    /// rejects combinations the transport layer cannot carry.
    pub fn new(
        lanes: usize,
        rows: usize,
        nibble_group_bits: u32,
        num_columns: usize,
    ) -> Result<Self, GeometryError> {
        let nibble_group_width = NibbleGroupWidth::from_bits(nibble_group_bits)?;
        if lanes == 0 {
            return Err(GeometryError::NoLanes);
        }
        if rows % lanes != 0 {
            return Err(GeometryError::RowsNotDivisible { rows, lanes });
        }

        let block_size = rows / lanes;
        let block_bit_width = block_size as u32 * nibble_group_width.bits();
        if !LEGAL_BLOCK_BIT_WIDTHS.contains(&block_bit_width) {
            return Err(GeometryError::IllegalBlockBitWidth(block_bit_width));
        }

        log::debug!(
            "transport geometry: {lanes} lanes x {num_columns} columns, \
             {rows} rows, block {block_size} x {nibble_group_bits} = {block_bit_width} bits"
        );

        Ok(Self {
            lanes,
            rows,
            num_columns,
            nibble_group_width,
            block_size,
            block_bit_width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_block_geometry() {
        let params = TransportParameters::new(2, 2, 16, 4).unwrap();
        assert_eq!(params.block_size, 1);
        assert_eq!(params.block_bit_width, 16);

        let params = TransportParameters::new(2, 16, 16, 8).unwrap();
        assert_eq!(params.block_size, 8);
        assert_eq!(params.block_bit_width, 128);

        let params = TransportParameters::new(2, 4, 48, 8).unwrap();
        assert_eq!(params.block_size, 2);
        assert_eq!(params.block_bit_width, 96);
    }

    #[test]
    fn rejects_unsupported_nibble_group_width() {
        let err = TransportParameters::new(2, 2, 20, 4).unwrap_err();
        assert_eq!(err, GeometryError::UnsupportedNibbleGroupWidth(20));
    }

    #[test]
    fn rejects_rows_not_divisible_by_lanes() {
        let err = TransportParameters::new(3, 4, 16, 4).unwrap_err();
        assert_eq!(err, GeometryError::RowsNotDivisible { rows: 4, lanes: 3 });
    }

    #[test]
    fn rejects_zero_lanes() {
        let err = TransportParameters::new(0, 4, 16, 4).unwrap_err();
        assert_eq!(err, GeometryError::NoLanes);
    }

    #[test]
    fn rejects_illegal_block_bit_width() {
        // 16 rows over 2 lanes at 24 bits gives 192 bits per cycle, which no
        // lane word sequence can carry.
        let err = TransportParameters::new(2, 16, 24, 48).unwrap_err();
        assert_eq!(err, GeometryError::IllegalBlockBitWidth(192));
    }

    #[test]
    fn aligns_samples_per_width() {
        assert_eq!(NibbleGroupWidth::W12.align_sample(0xabc0), 0x0abc);
        assert_eq!(NibbleGroupWidth::W16.align_sample(0xabcd), 0xabcd);
        assert_eq!(NibbleGroupWidth::W24.align_sample(0xabcd), 0x00ab_cd00);
        assert_eq!(NibbleGroupWidth::W32.align_sample(0xabcd), 0xabcd_0000);
        assert_eq!(NibbleGroupWidth::W48.align_sample(0xabcd), 0x0000_abcd_0000_0000);
    }
}
