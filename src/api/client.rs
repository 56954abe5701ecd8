//! Background fetch worker for the data API
//!
//! Keeps the UI thread free of blocking I/O: requests go to one worker
//! thread over a channel, results come back through a non-blocking `poll`
//! each frame. Row results carry the cache ticket they were fetched for,
//! so [`crate::state::DataCache::resolve`] can reject responses whose
//! inputs have since changed.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::dto::{self, HeadersResponse, RowsResponse};
use crate::constants::api::{ENDPOINT, REQUEST_TIMEOUT_SECS};
use crate::data::RowStore;
use crate::error::Result;
use crate::state::{ColumnCatalog, FetchTicket};

/// Requests that can be sent to the fetch worker
pub enum ApiRequest {
    /// Load the column catalog (once per session)
    FetchCatalog,
    /// Load rows for the given column set
    FetchRows {
        ticket: FetchTicket,
        columns: Vec<String>,
    },
    /// Shutdown the worker
    Shutdown,
}

/// Results returned from the fetch worker
pub enum ApiResult {
    Catalog(Result<ColumnCatalog>),
    Rows {
        ticket: FetchTicket,
        result: Result<RowStore>,
    },
}

/// Handle to the worker thread
pub struct ApiClient {
    tx: Sender<ApiRequest>,
    rx: Receiver<ApiResult>,
    handle: Option<JoinHandle<()>>,
}

impl ApiClient {
    /// Spawn the fetch worker against an API host
    pub fn spawn(host: String) -> Self {
        let (req_tx, req_rx) = channel::<ApiRequest>();
        let (res_tx, res_rx) = channel::<ApiResult>();

        let handle = thread::spawn(move || {
            Self::worker_loop(host, req_rx, res_tx);
        });

        Self {
            tx: req_tx,
            rx: res_rx,
            handle: Some(handle),
        }
    }

    fn worker_loop(host: String, rx: Receiver<ApiRequest>, tx: Sender<ApiResult>) {
        while let Ok(request) = rx.recv() {
            let result = match request {
                ApiRequest::FetchCatalog => ApiResult::Catalog(Self::fetch_catalog(&host)),
                ApiRequest::FetchRows { ticket, columns } => ApiResult::Rows {
                    ticket,
                    result: Self::fetch_rows(&host, &columns),
                },
                ApiRequest::Shutdown => break,
            };

            if tx.send(result).is_err() {
                break;
            }
        }
    }

    fn get(url: &str) -> Result<String> {
        let body = ureq::get(url)
            .set("Accept", "application/json")
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .call()?
            .into_string()?;
        Ok(body)
    }

    fn fetch_catalog(host: &str) -> Result<ColumnCatalog> {
        let url = headers_url(host);
        log::info!("fetching column catalog from {url}");
        let response: HeadersResponse = serde_json::from_str(&Self::get(&url)?)?;
        dto::decode_catalog(response)
    }

    fn fetch_rows(host: &str, columns: &[String]) -> Result<RowStore> {
        let url = rows_url(host, columns);
        log::info!("fetching rows for [{}]", columns.join(", "));
        let response: RowsResponse = serde_json::from_str(&Self::get(&url)?)?;
        dto::decode_rows(columns, response)
    }

    /// Send a request to the worker (non-blocking)
    pub fn request(&self, req: ApiRequest) {
        let _ = self.tx.send(req);
    }

    /// Poll for completed work (non-blocking)
    pub fn poll(&self) -> Option<ApiResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => None,
        }
    }
}

impl Drop for ApiClient {
    fn drop(&mut self) {
        let _ = self.tx.send(ApiRequest::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn headers_url(host: &str) -> String {
    format!("{}/{}?mode=headers", host.trim_end_matches('/'), ENDPOINT)
}

fn rows_url(host: &str, columns: &[String]) -> String {
    format!(
        "{}/{}?mode=rollup&columns={}",
        host.trim_end_matches('/'),
        ENDPOINT,
        columns.join(",")
    )
}
