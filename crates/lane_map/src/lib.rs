pub mod frame_table;
pub mod lane_packer;
pub mod lane_unpacker;
pub mod nibble_expander;
pub mod transport_model;
pub mod transport_parameters;
