use crate::frame_table::FrameTable;
use crate::lane_packer::{LaneInput, LanePacker};
use crate::nibble_expander::expand_converter_words;
use crate::transport_parameters::TransportParameters;

/// The transport-layer model: converter words in, lane words out.
///
/// Owns the intermediate nibble-group tables and the lane output tables,
/// all allocated zeroed at construction and fixed in shape for the life of
/// the instance. A run is cycle-serial: every sample column is mapped to
/// completion across all lanes before the next column starts.
pub struct TransportModel {
    pub params: TransportParameters,
    ng_data: FrameTable<u64>,
    ng_valid: FrameTable<bool>,
    lane_out: FrameTable<u64>,
    lane_valid: FrameTable<bool>,
}

impl TransportModel {
    pub fn new(params: TransportParameters) -> Self {
        log::debug!(
            "transport model: {} rows -> {} lanes over {} columns",
            params.rows,
            params.lanes,
            params.num_columns
        );
        Self {
            params,
            ng_data: FrameTable::new(params.rows, params.num_columns),
            ng_valid: FrameTable::new(params.rows, params.num_columns),
            lane_out: FrameTable::new(params.lanes, params.num_columns),
            lane_valid: FrameTable::new(params.lanes, params.num_columns),
        }
    }

    /// Runs both mapping stages over the full sample range.
    pub fn process(&mut self, raw_conv_data: &FrameTable<u16>, valid: &FrameTable<bool>) {
        self.map_converter_words(raw_conv_data, valid);
        self.map_nibble_groups_to_lanes();
    }

    /// First stage: expand every converter word into its nibble group.
    pub fn map_converter_words(
        &mut self,
        raw_conv_data: &FrameTable<u16>,
        valid: &FrameTable<bool>,
    ) {
        expand_converter_words(
            &self.params,
            raw_conv_data,
            valid,
            &mut self.ng_data,
            &mut self.ng_valid,
        );
    }

    /// Second stage: pack nibble groups into 64-bit lane words, column by
    /// column. Per-lane accumulator state lives only for the duration of
    /// this call.
    pub fn map_nibble_groups_to_lanes(&mut self) {
        let group_bits = self.params.nibble_group_width.bits();
        let block_size = self.params.block_size;
        let mut packers: Vec<LanePacker> =
            (0..self.params.lanes).map(|_| LanePacker::new()).collect();

        for column in 0..self.params.num_columns {
            for (lane, packer) in packers.iter_mut().enumerate() {
                let base_row = lane * block_size;

                // All rows of a block share validity; the first row is
                // canonical for the cycle.
                if self.ng_valid.get(base_row, column) {
                    let mut input = LaneInput::new();
                    let mut in_bit_count = 0u32;
                    for row in base_row..base_row + block_size {
                        if self.ng_valid.get(row, column) {
                            input.insert(self.ng_data.get(row, column), in_bit_count, group_bits);
                            in_bit_count += group_bits;
                        }
                    }

                    let word = packer.push(&input, self.params.block_bit_width);
                    self.lane_out.set(lane, column, word.data);
                    self.lane_valid.set(lane, column, word.valid);
                } else {
                    match packer.drain() {
                        Some(data) => {
                            self.lane_out.set(lane, column, data);
                            self.lane_valid.set(lane, column, true);
                        }
                        None => {
                            // Hold the previous word on the bus through an
                            // idle cycle with nothing to drain.
                            let held = if column > 0 {
                                self.lane_out.get(lane, column - 1)
                            } else {
                                0
                            };
                            self.lane_out.set(lane, column, held);
                            self.lane_valid.set(lane, column, false);
                        }
                    }
                }
            }
        }
    }

    /// The valid nibble groups addressed to one lane, in cycle-then-row
    /// order. This is the stream the lane's emitted words must reproduce.
    pub fn nibble_group_stream(&self, lane: usize) -> Vec<u64> {
        let base_row = lane * self.params.block_size;
        let mut stream = Vec::new();
        for column in 0..self.params.num_columns {
            for row in base_row..base_row + self.params.block_size {
                if self.ng_valid.get(row, column) {
                    stream.push(self.ng_data.get(row, column));
                }
            }
        }
        stream
    }

    pub fn ng_data(&self) -> &FrameTable<u64> {
        &self.ng_data
    }

    pub fn ng_valid(&self) -> &FrameTable<bool> {
        &self.ng_valid
    }

    pub fn lane_out(&self) -> &FrameTable<u64> {
        &self.lane_out
    }

    pub fn lane_valid(&self) -> &FrameTable<bool> {
        &self.lane_valid
    }
}
