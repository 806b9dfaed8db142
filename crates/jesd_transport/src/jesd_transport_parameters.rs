use jesd_core::jesd_link_config::JesdLinkConfig;
use lane_map::transport_parameters::{GeometryError, TransportParameters};
use thiserror::Error;

/// Bits one lane can serialize over a 4-cycle strobe ring.
const LANE_BITS_PER_RING: u32 = 4 * 64;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JesdTransportError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(
        "rate {rate_code} delivers {bits_per_ring} bits to a lane every four cycles, \
         more than the 256 a lane can serialize"
    )]
    RateOversubscribesLanes { rate_code: u32, bits_per_ring: u32 },
}

/// The transport mapping geometry for a link configuration and a nominal
/// per-converter sample count.
///
/// The row count is the phase-expanded converter count and the column count
/// is the rate-adjusted sample count, invalid strobe slots included. A
/// legal link configuration can still be rejected here, two ways: the block
/// bit width may fall outside the carryable set, and a block bit width
/// above 64 is only sustainable when the rate's strobe pattern leaves
/// enough dead cycles to drain the second packer page.
pub fn get_jesd_transport_parameters(
    link: &JesdLinkConfig,
    nominal_samples: usize,
) -> Result<TransportParameters, JesdTransportError> {
    let params = TransportParameters::new(
        link.lanes(),
        link.effective_converters(),
        link.nibble_group_bits(),
        link.rate().effective_column_count(nominal_samples),
    )?;

    let bits_per_ring = params.block_bit_width * link.rate().valid_columns_per_ring() as u32;
    if bits_per_ring > LANE_BITS_PER_RING {
        return Err(JesdTransportError::RateOversubscribesLanes {
            rate_code: link.rate().code(),
            bits_per_ring,
        });
    }

    Ok(params)
}
