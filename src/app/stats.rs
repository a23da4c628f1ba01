use crate::error::AppResult;
use crate::fetch::{HttpTrackSource, TrackSourcePort};

use super::output::write_document;

pub(super) async fn run_stats(source: &HttpTrackSource) -> AppResult<()> {
    let stats = source.stats().await?;
    write_document(&serde_json::to_value(&stats)?, None)
}
