//! Look helpers on top of the session client.

use reqwest::Method;

use looker_core::{Error, API_PREFIX};

use crate::client::{require_ok, LookerClient};

/// Fetch the SQL a look would run, as text.
///
/// The look id is optional because it arrives from external scheduler
/// configuration; a missing id fails before any network call. Any status
/// above 200 is a failure, even when dispatch accepted it.
pub async fn fetch_look_sql(
    client: &LookerClient,
    look_id: Option<u64>,
) -> Result<String, Error> {
    let look_id = look_id.ok_or_else(|| Error::missing("look_id"))?;
    let endpoint = format!("{API_PREFIX}/looks/{look_id}/run/sql");
    let response = client.call(Method::GET, &endpoint, None, None).await?;
    require_ok(&response)?;
    Ok(response.body)
}
