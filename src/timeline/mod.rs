//! Time windows and the scrub cursor that walks across them.
mod preset;
mod range;

#[cfg(test)]
mod tests;

pub use preset::{
    DEFAULT_PRESET_HOURS, RangePreset, day_range, format_cutoff_label, format_range_label,
};
pub use range::{SCRUB_MAX, ScrubPosition, TimeRange, scrub_to_instant};
