//! Buffering of `{"t": ..., "c": ...}` nodes.

use serde::Deserialize;
use serde::de::{Deserializer, Error as _};
use serde_json::Value;

/// Read one node into memory and return its tag alongside it.
///
/// The buffered value is decoded a second time once the tag is known to
/// name a supported kind.
pub(crate) fn buffer<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<(String, Value), D::Error> {
    let value = Value::deserialize(deserializer)?;
    let tag = value
        .get("t")
        .and_then(Value::as_str)
        .ok_or_else(|| D::Error::custom("node without a string `t` tag"))?
        .to_owned();
    Ok((tag, value))
}
