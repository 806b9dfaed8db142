use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use lane_map::frame_table::FrameTable;

/// Renders the raw converter input, one row per converter phase. Dead
/// strobe slots print as `x`, matching the waveform-style dumps the model
/// is checked against.
pub fn format_sample_table(raw_conv_data: &FrameTable<u16>, valid: &FrameTable<bool>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header_row("phase", raw_conv_data.columns()));
    for row in 0..raw_conv_data.rows() {
        let mut cells = vec![format!("m{row}")];
        for column in 0..raw_conv_data.columns() {
            cells.push(if valid.get(row, column) {
                format!("{:#06x}", raw_conv_data.get(row, column))
            } else {
                "x".to_string()
            });
        }
        table.add_row(cells);
    }
    table
}

/// Renders the nibble-group table, one row per converter phase.
pub fn format_nibble_group_table(ng_data: &FrameTable<u64>, ng_valid: &FrameTable<bool>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header_row("phase", ng_data.columns()));
    for row in 0..ng_data.rows() {
        let mut cells = vec![format!("m{row}")];
        for column in 0..ng_data.columns() {
            cells.push(if ng_valid.get(row, column) {
                format!("{:#014x}", ng_data.get(row, column))
            } else {
                "x".to_string()
            });
        }
        table.add_row(cells);
    }
    table
}

/// Renders the lane output, one row per lane, 64-bit words in hex and `x`
/// for cycles that carried no complete word.
pub fn format_lane_table(lane_out: &FrameTable<u64>, lane_valid: &FrameTable<bool>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(header_row("lane", lane_out.columns()));
    for lane in 0..lane_out.rows() {
        let mut cells = vec![format!("lane{lane}")];
        for column in 0..lane_out.columns() {
            cells.push(if lane_valid.get(lane, column) {
                format!("{:#018x}", lane_out.get(lane, column))
            } else {
                "x".to_string()
            });
        }
        table.add_row(cells);
    }
    table
}

fn header_row(label: &str, columns: usize) -> Vec<String> {
    let mut header = vec![label.to_string()];
    header.extend((0..columns).map(|s| format!("s{s}")));
    header
}
