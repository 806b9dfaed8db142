pub mod color_logger;
pub mod lane_dump;
pub mod stimulus;
