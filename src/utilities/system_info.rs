use core::num::NonZeroU32;
use std::sync::OnceLock;

static NUM_CORES: OnceLock<NonZeroU32> = OnceLock::new();

/// Retrieves the number of cores that the system has.
///
/// Without the `detect_num_cores` feature this is always 1.
pub fn get_num_cores() -> NonZeroU32 {
    *NUM_CORES.get_or_init(detect_num_cores)
}

#[cfg(feature = "detect_num_cores")]
fn detect_num_cores() -> NonZeroU32 {
    NonZeroU32::new(num_cpus::get_physical() as u32).unwrap_or(NonZeroU32::MIN)
}

#[cfg(not(feature = "detect_num_cores"))]
fn detect_num_cores() -> NonZeroU32 {
    NonZeroU32::MIN
}
