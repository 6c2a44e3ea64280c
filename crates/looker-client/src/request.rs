//! Per-method payload encoding.

use reqwest::{Method, Url};
use serde_json::Value;

use looker_core::Error;

/// How a request payload is attached, keyed by HTTP method. GET carries its
/// data as query parameters, HEAD never carries data, and every other method
/// serializes the payload into a JSON text body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Query,
    NoBody,
    JsonBody,
}

impl Encoding {
    pub fn for_method(method: &Method) -> Self {
        match *method {
            Method::GET => Self::Query,
            Method::HEAD => Self::NoBody,
            _ => Self::JsonBody,
        }
    }

    /// Attach `data` to the outgoing request. Query parameters mutate the
    /// URL in place; a JSON body is returned as text. `NoBody` discards any
    /// payload argument without complaint.
    pub fn apply(self, url: &mut Url, data: Option<&Value>) -> Result<Option<String>, Error> {
        match self {
            Self::Query => {
                append_query(url, data)?;
                Ok(None)
            }
            Self::NoBody => Ok(None),
            Self::JsonBody => Ok(Some(json_body(data))),
        }
    }
}

fn append_query(url: &mut Url, data: Option<&Value>) -> Result<(), Error> {
    let Some(value) = data else {
        return Ok(());
    };
    let Value::Object(map) = value else {
        return Err(Error::configuration(
            "query parameters must be a JSON object",
        ));
    };
    if map.is_empty() {
        return Ok(());
    }
    let mut pairs = url.query_pairs_mut();
    for (key, value) in map {
        match value {
            Value::String(text) => pairs.append_pair(key, text),
            other => pairs.append_pair(key, &other.to_string()),
        };
    }
    Ok(())
}

// `None` still encodes: the body becomes the literal JSON `null`. Callers
// that need a truly empty body pass an empty map instead.
fn json_body(data: Option<&Value>) -> String {
    match data {
        Some(value) => value.to_string(),
        None => Value::Null.to_string(),
    }
}
