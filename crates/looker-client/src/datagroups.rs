//! Datagroup maintenance on top of the session client.

use chrono::Utc;
use reqwest::Method;
use tracing::info;

use looker_core::{DatagroupStalenessRequest, Error, API_PREFIX};

use crate::client::{require_ok, ApiResponse, LookerClient};

/// Moves a datagroup's `stale_before` watermark: the datagroup counts as
/// stale if it was last refreshed before that instant.
///
/// The watermark defaults to the construction instant (epoch seconds). The
/// datagroup id is optional at construction because it arrives from external
/// scheduler configuration; running without one fails before any network
/// call.
#[derive(Debug, Clone)]
pub struct StalenessUpdate {
    datagroup_id: Option<u64>,
    stale_before: i64,
}

impl StalenessUpdate {
    pub fn new(datagroup_id: Option<u64>) -> Self {
        Self {
            datagroup_id,
            stale_before: Utc::now().timestamp(),
        }
    }

    #[must_use]
    pub fn stale_before(mut self, stale_before: i64) -> Self {
        self.stale_before = stale_before;
        self
    }

    /// PATCH `api/3.0/datagroups/{id}` with the watermark. Any status above
    /// 200 is a failure, even when dispatch accepted it.
    pub async fn run(&self, client: &LookerClient) -> Result<ApiResponse, Error> {
        let datagroup_id = self.datagroup_id.ok_or_else(|| Error::missing("datagroup_id"))?;

        let endpoint = format!("{API_PREFIX}/datagroups/{datagroup_id}");
        let payload = DatagroupStalenessRequest {
            stale_before: self.stale_before,
        };
        info!(endpoint = %endpoint, stale_before = self.stale_before, "updating datagroup staleness");

        let body = serde_json::to_value(&payload)
            .map_err(|err| Error::configuration(format!("unencodable staleness payload: {err}")))?;
        let response = client
            .call(Method::PATCH, &endpoint, Some(body), None)
            .await?;
        require_ok(&response)?;
        Ok(response)
    }
}
