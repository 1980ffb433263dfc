//! 습공기 물성 계산 모듈 모음.

pub mod humid_air;
pub mod rasmussen;

pub use humid_air::*;
pub use rasmussen::{KELVIN_OFFSET, MOLE_FRACTION_CO2};
