use thiserror::Error;

/// Why a raw track was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrackError {
    #[error("{coordinates} coordinates but {timestamps} timestamps")]
    LengthMismatch {
        coordinates: usize,
        timestamps: usize,
    },
    #[error("timestamp {index} precedes its predecessor")]
    TimestampsDecrease { index: usize },
}
