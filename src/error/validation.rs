use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Time range start {since} is after its end {until}.")]
    RangeStartAfterEnd { since: String, until: String },
    #[error("Scrub position {value} is outside 0..={max}.")]
    ScrubOutOfRange { value: u64, max: u16 },
    #[error("Invalid scrub position '{value}': {source}")]
    InvalidScrubNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Preset hours must be >= 1.")]
    PresetHoursZero,
    #[error("Time range overflows the supported calendar.")]
    RangeOverflow,
    #[error("Invalid date '{value}'. Expected YYYY-MM-DD.")]
    InvalidDate { value: String },
    #[error("Date {value} has no unambiguous local midnight.")]
    AmbiguousLocalDate { value: String },
    #[error("Invalid timestamp '{value}'. Expected RFC 3339.")]
    InvalidTimestamp { value: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Vehicle '{vehicle_id}' is not reporting a live position.")]
    UnknownVehicle { vehicle_id: String },
    #[error("{message}")]
    Message { message: String },
}

impl From<String> for ValidationError {
    fn from(message: String) -> Self {
        ValidationError::Message { message }
    }
}

impl From<&'static str> for ValidationError {
    fn from(message: &'static str) -> Self {
        ValidationError::Message {
            message: message.to_owned(),
        }
    }
}
