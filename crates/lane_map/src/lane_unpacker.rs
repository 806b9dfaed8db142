use crate::frame_table::FrameTable;
use crate::transport_parameters::NibbleGroupWidth;

/// Recovers the nibble-group stream one lane carried.
///
/// The valid lane words are concatenated low-to-high into a bitstream and
/// re-sliced into Np-bit groups, undoing the packer's accumulation. Only
/// fully emitted groups are returned; bits of a group whose remainder still
/// sits in the packer at the end of the run are dropped.
pub fn unpack_lane(
    lane_out: &FrameTable<u64>,
    lane_valid: &FrameTable<bool>,
    lane: usize,
    width: NibbleGroupWidth,
) -> Vec<u64> {
    let group_bits = width.bits();
    let group_mask = (1u64 << group_bits) - 1;

    let mut groups = Vec::new();
    let mut window: u128 = 0;
    let mut window_bits: u32 = 0;
    for column in 0..lane_out.columns() {
        if !lane_valid.get(lane, column) {
            continue;
        }
        window |= (lane_out.get(lane, column) as u128) << window_bits;
        window_bits += 64;
        while window_bits >= group_bits {
            groups.push(window as u64 & group_mask);
            window >>= group_bits;
            window_bits -= group_bits;
        }
    }
    groups
}
