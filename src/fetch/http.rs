use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::FetchError;
use crate::timeline::TimeRange;
use crate::tracks::wire::{CoverageResponse, HistoryResponse, VehiclesResponse};
use crate::tracks::{CoverageDataset, HistoryPoint, SourceStats, VehicleStatus};

use super::port::{HistoryWindow, TrackSourcePort};

/// `TrackSourcePort` backed by the data source's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpTrackSource {
    client: Client,
    base_url: Url,
}

impl HttpTrackSource {
    /// # Errors
    ///
    /// Returns an error when the base URL is invalid or the client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut parsed = Url::parse(base_url).map_err(|err| FetchError::InvalidBaseUrl {
            url: base_url.to_owned(),
            source: err,
        })?;
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| FetchError::BuildClient { source: err })?;
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path)
            .map_err(|err| FetchError::JoinUrl {
                path: path.to_owned(),
                source: err,
            })
    }

    async fn get_json<T>(&self, url: Url) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let target = url.to_string();
        debug!(url = %target, "Fetching");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Request {
                url: target.clone(),
                source: err,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: target,
                status: status.as_u16(),
            });
        }
        response.json::<T>().await.map_err(|err| FetchError::Decode {
            url: target,
            source: err,
        })
    }
}

/// Query-string form of an instant, e.g. `2026-02-10T08:00:00.000Z`.
pub(crate) fn query_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn with_range(mut url: Url, range: &TimeRange) -> Url {
    url.query_pairs_mut()
        .append_pair("since", &query_timestamp(range.since()))
        .append_pair("until", &query_timestamp(range.until()));
    url
}

#[async_trait(?Send)]
impl TrackSourcePort for HttpTrackSource {
    async fn vehicles(&self) -> Result<Vec<VehicleStatus>, FetchError> {
        let url = self.endpoint("vehicles")?;
        let response: VehiclesResponse = self.get_json(url).await?;
        Ok(response.into_vehicles())
    }

    async fn history(
        &self,
        vehicle_id: &str,
        window: &HistoryWindow,
    ) -> Result<Vec<HistoryPoint>, FetchError> {
        let mut url = self.endpoint("vehicles/")?;
        url.path_segments_mut()
            .map_err(|()| FetchError::from("Data source URL cannot carry a path"))?
            .pop_if_empty()
            .push(vehicle_id)
            .push("history");
        let mut url = with_range(url, &window.range);
        url.query_pairs_mut()
            .append_pair("limit", &window.limit.to_string());
        let response: HistoryResponse = self.get_json(url).await?;
        Ok(response.into_history())
    }

    async fn coverage(&self, range: &TimeRange) -> Result<CoverageDataset, FetchError> {
        let url = with_range(self.endpoint("coverage")?, range);
        let response: CoverageResponse = self.get_json(url).await?;
        Ok(response.into_dataset())
    }

    async fn stats(&self) -> Result<SourceStats, FetchError> {
        let url = self.endpoint("stats")?;
        self.get_json(url).await
    }
}
