//! Wire formats for the anthropometric data API
//!
//! Decoding happens here, at the collaborator boundary: the rest of the
//! application only ever sees the shaped [`Column`] catalog and the
//! [`RowStore`]. Absent and `null` row values become NaN so the
//! materializer's missing-value policy (exclude, never coerce) applies
//! uniformly.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::data::RowStore;
use crate::error::{AnthroError, Result};
use crate::state::{Column, ColumnCatalog};

/// `[visible, label, unit, scale, description]` header tuple
pub type ColumnDto = (u8, String, String, f64, String);

/// `mode=headers` response
#[derive(Debug, Deserialize)]
pub struct HeadersResponse {
    pub time: f64,
    pub data: BTreeMap<String, ColumnDto>,
}

/// `mode=rollup` response; each datum maps the requested column ids to
/// numeric values
#[derive(Debug, Deserialize)]
pub struct RowsResponse {
    pub time: f64,
    pub data: Vec<BTreeMap<String, Option<f64>>>,
}

/// Shape the header map into the column catalog. The wire `scale` field is
/// not part of the catalog model and is dropped here.
pub fn decode_catalog(response: HeadersResponse) -> Result<ColumnCatalog> {
    if response.data.is_empty() {
        return Err(AnthroError::Decode("empty header map".to_string()));
    }
    log::debug!(
        "decoded {} columns (server time {})",
        response.data.len(),
        response.time
    );
    let columns = response
        .data
        .into_iter()
        .map(|(id, (visible, label, unit, _scale, description))| Column {
            id,
            label,
            unit,
            description,
            visible: visible == 1,
        })
        .collect();
    Ok(ColumnCatalog::new(columns))
}

/// Shape a row response into a store holding exactly the requested columns
pub fn decode_rows(requested: &[String], response: RowsResponse) -> Result<RowStore> {
    let fetched_at = server_time(response.time);
    let columns = requested
        .iter()
        .map(|id| {
            let values = response
                .data
                .iter()
                .map(|row| row.get(id).copied().flatten().unwrap_or(f64::NAN))
                .collect();
            (id.clone(), values)
        })
        .collect();
    RowStore::from_columns(columns, fetched_at)
}

/// The response `time` is opaque to the engine; it only feeds the status
/// line, as whole seconds since the epoch
fn server_time(epoch_secs: f64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(epoch_secs as i64, 0)
}
