use itertools::izip;

use crate::frame_table::FrameTable;
use crate::transport_parameters::TransportParameters;

/// Expands raw converter words into nibble groups, cell by cell.
///
/// Every 16-bit sample is aligned into the low Np bits of its 64-bit cell
/// (see `NibbleGroupWidth::align_sample`); validity is copied verbatim.
/// Invalid cells are expanded like any other, they simply contribute no
/// bits to the lane mapping downstream.
pub fn expand_converter_words(
    params: &TransportParameters,
    raw_conv_data: &FrameTable<u16>,
    valid: &FrameTable<bool>,
    ng_data: &mut FrameTable<u64>,
    ng_valid: &mut FrameTable<bool>,
) {
    assert!(
        raw_conv_data.rows() == params.rows && raw_conv_data.columns() == params.num_columns,
        "raw converter table is {}x{} but the geometry needs {}x{}",
        raw_conv_data.rows(),
        raw_conv_data.columns(),
        params.rows,
        params.num_columns
    );
    assert!(
        valid.rows() == params.rows && valid.columns() == params.num_columns,
        "validity table shape does not match the raw converter table"
    );

    let width = params.nibble_group_width;
    for row in 0..params.rows {
        for (group, group_valid, &sample, &sample_valid) in izip!(
            ng_data.row_mut(row),
            ng_valid.row_mut(row),
            raw_conv_data.row(row),
            valid.row(row),
        ) {
            *group = width.align_sample(sample);
            *group_valid = sample_valid;
        }
    }
}
