//! Blocking HTTP implementation of [`ScanApi`] for MobSF-style services.
//!
//! Every request is a form POST carrying the scan `hash`, except the
//! upload (multipart field `file`) and the scan listing (GET with `page`).

use crate::config::{EndpointConfig, ServiceConfig};
use crate::error::{MobscanError, Result, TransportErrorKind};
use crate::lifecycle::{
    parse_duration, CrucialSummary, SavedReport, ScanApi, ScanListing, ScanLogs, UploadResponse,
};
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Read buffer for uploads.
const CHUNK_SIZE: usize = 64 * 1024;

/// HTTP client for the scanning service.
pub struct HttpScanApi {
    client: Client,
    base_url: String,
    api_key: Option<(String, String)>,
    endpoints: EndpointConfig,
}

fn network_error(context: &str, err: reqwest::Error) -> MobscanError {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout(err.to_string())
    } else {
        TransportErrorKind::Network(err.to_string())
    };
    MobscanError::transport(context, kind)
}

fn invalid_response(context: &str, message: impl Into<String>) -> MobscanError {
    MobscanError::transport(context, TransportErrorKind::InvalidResponse(message.into()))
}

impl HttpScanApi {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let timeout = parse_duration(&config.timeout)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| network_error("creating HTTP client", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config
                .api_key
                .clone()
                .map(|key| (config.api_key_header.clone(), key)),
            endpoints: config.endpoints.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some((header, key)) => request.header(header.as_str(), key.as_str()),
            None => request,
        }
    }

    fn post_hash(&self, path: &str, hash: &str) -> Result<Response> {
        let context = format!("POST {path}");
        let request = self.client.post(self.url(path)).form(&[("hash", hash)]);
        let response = self
            .authorize(request)
            .send()
            .map_err(|e| network_error(&context, e))?;
        check_status(&context, response)
    }

    fn post_hash_json(&self, path: &str, hash: &str) -> Result<Value> {
        let context = format!("POST {path}");
        let response = self.post_hash(path, hash)?;
        response
            .json::<Value>()
            .map_err(|e| invalid_response(&context, e.to_string()))
    }

    fn optional_endpoint<'a>(&self, endpoint: &'a Option<String>, name: &str) -> Result<&'a str> {
        endpoint.as_deref().ok_or_else(|| {
            MobscanError::transport(
                name,
                TransportErrorKind::EndpointUnavailable(format!(
                    "set service.endpoints.{name} to enable it"
                )),
            )
        })
    }
}

impl ScanApi for HttpScanApi {
    fn upload(&self, path: &Path, progress: &mut dyn FnMut(u8)) -> Result<UploadResponse> {
        let context = format!("uploading {}", path.display());
        progress(0);
        let bytes = read_with_progress(path, progress)?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload.apk".to_string(), |n| n.to_string_lossy().into_owned());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(|e| network_error(&context, e))?;
        let form = multipart::Form::new().part("file", part);
        let request = self.client.post(self.url(&self.endpoints.upload)).multipart(form);
        let response = self
            .authorize(request)
            .send()
            .map_err(|e| network_error(&context, e))?;
        let response = check_status(&context, response)?;
        let raw: Value = response
            .json()
            .map_err(|e| invalid_response(&context, e.to_string()))?;
        let upload = UploadResponse::from_raw(raw)?;
        progress(100);
        Ok(upload)
    }

    fn trigger_scan(&self, hash: &str) -> Result<Value> {
        self.post_hash_json(&self.endpoints.scan, hash)
    }

    fn scan_logs(&self, hash: &str) -> Result<ScanLogs> {
        let raw = self.post_hash_json(&self.endpoints.scan_logs, hash)?;
        Ok(ScanLogs::from_value(&raw))
    }

    fn report_json(&self, hash: &str) -> Result<Value> {
        self.post_hash_json(&self.endpoints.report_json, hash)
    }

    fn save_report_json(&self, hash: &str) -> Result<SavedReport> {
        let path = self.optional_endpoint(&self.endpoints.save_report_json, "save_report_json")?;
        let raw = self.post_hash_json(path, hash)?;
        Ok(SavedReport::from_raw(raw, hash))
    }

    fn report_document(&self, hash: &str) -> Result<Vec<u8>> {
        let context = format!("POST {}", self.endpoints.download_pdf);
        let response = self.post_hash(&self.endpoints.download_pdf, hash)?;
        let bytes = response
            .bytes()
            .map_err(|e| network_error(&context, e))?;
        if bytes.is_empty() {
            return Err(invalid_response(&context, "empty PDF body"));
        }
        Ok(bytes.to_vec())
    }

    fn crucial_summary(&self, hash: &str) -> Result<CrucialSummary> {
        let path = self.optional_endpoint(&self.endpoints.crucial, "crucial")?;
        let raw = self.post_hash_json(path, hash)?;
        Ok(CrucialSummary::from_value(&raw))
    }

    fn recent_scans(&self, page: u32) -> Result<Vec<ScanListing>> {
        let context = format!("GET {}", self.endpoints.scans);
        let request = self
            .client
            .get(self.url(&self.endpoints.scans))
            .query(&[("page", page)]);
        let response = self
            .authorize(request)
            .send()
            .map_err(|e| network_error(&context, e))?;
        let raw: Value = check_status(&context, response)?
            .json()
            .map_err(|e| invalid_response(&context, e.to_string()))?;
        Ok(ScanListing::list_from_value(&raw))
    }
}

/// Read the whole file, reporting progress up to 90%.
fn read_with_progress(path: &Path, progress: &mut dyn FnMut(u8)) -> Result<Vec<u8>> {
    let mut file = std::fs::File::open(path).map_err(|e| MobscanError::io(path, e))?;
    let total = file
        .metadata()
        .map(|m| m.len())
        .map_err(|e| MobscanError::io(path, e))?;
    let mut bytes = Vec::with_capacity(usize::try_from(total).unwrap_or(0));
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        let read = file.read(&mut chunk).map_err(|e| MobscanError::io(path, e))?;
        if read == 0 {
            break;
        }
        bytes.extend_from_slice(&chunk[..read]);
        progress(read_percent(bytes.len() as u64, total));
    }
    Ok(bytes)
}

fn read_percent(read: u64, total: u64) -> u8 {
    if total == 0 {
        return 90;
    }
    u8::try_from(read.min(total) * 90 / total).unwrap_or(90)
}

fn check_status(context: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    let detail = error_detail(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    tracing::debug!("{context} returned {}: {detail}", status.as_u16());
    Err(MobscanError::transport(
        context,
        TransportErrorKind::Status {
            status: status.as_u16(),
            detail,
        },
    ))
}

/// Best-effort server detail from an error body.
///
/// A JSON `error` string is used as is; an `error` object yields its
/// `report` field, else its compact JSON. Other bodies are used verbatim.
#[must_use]
pub fn error_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    let parsed = serde_json::from_str::<Value>(body).ok();
    let error = parsed.as_ref().and_then(|json| json.get("error"));
    match error {
        Some(Value::String(message)) if !message.is_empty() => Some(message.clone()),
        Some(error @ Value::Object(object)) => Some(match object.get("report") {
            Some(Value::String(report)) if !report.is_empty() => report.clone(),
            _ => error.to_string(),
        }),
        _ => Some(body.to_string()),
    }
}
