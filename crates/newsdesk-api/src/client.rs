//! HTTP client for the newsroom REST backend.
//!
//! Wraps [`reqwest::Client`] with the base URL and the bearer token, and
//! classifies every response through [`decode_response`].

use std::time::Duration;

use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use newsdesk_core::prelude::*;
use newsdesk_core::Upload;

use crate::download::{filename_from_disposition, Download};
use crate::response::decode_response;

/// Connection settings for [`ApiClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout: Duration::from_secs(30),
            token: None,
        }
    }
}

/// REST client. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let parsed = Url::parse(&config.base_url)
            .map_err(|e| Error::config(format!("invalid API URL '{}': {e}", config.base_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "API URL must be http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("newsdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await.map_err(request_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(request_error)?;
        if status >= 400 {
            warn!("Request failed with status {}", status);
        }
        decode_response(status, &body)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(self.request(Method::GET, path)).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.execute(self.request(Method::GET, path).query(query))
            .await
    }

    pub(crate) async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(self.request(method, path).json(body)).await
    }

    /// Send `payload` as multipart form data with `upload` attached as `image`.
    pub(crate) async fn send_multipart<T, B>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
        upload: &Upload,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut form = Form::new();
        for (name, value) in form_fields(&serde_json::to_value(payload)?) {
            form = form.text(name, value);
        }
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.filename.clone())
            .mime_str(&upload.mime)
            .map_err(|e| Error::request(e.to_string()))?;
        form = form.part("image", part);

        self.execute(self.request(method, path).multipart(form))
            .await
    }

    /// JSON when there is no file, multipart when there is.
    pub(crate) async fn send_payload<T, B>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
        upload: Option<&Upload>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        match upload {
            Some(upload) => self.send_multipart(method, path, payload, upload).await,
            None => self.send_json(method, path, payload).await,
        }
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(self.request(Method::DELETE, path)).await
    }

    /// Fetch a file, naming it from `Content-Disposition`.
    pub(crate) async fn download(&self, path: &str, default_name: &str) -> Result<Download> {
        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(request_error)?;
        let status = response.status().as_u16();
        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(request_error)?;

        if !(200..300).contains(&status) {
            // Reuse the JSON error classification
            decode_response::<Value>(status, &body)?;
        }

        let filename = filename_from_disposition(disposition.as_deref(), default_name);
        Ok(Download::new(filename, body.to_vec()))
    }
}

fn request_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::request("request timed out")
    } else if e.is_decode() {
        Error::decode(e.to_string())
    } else {
        Error::request(e.to_string())
    }
}

/// Flatten a JSON object into multipart text fields.
///
/// `null` values are skipped, strings are sent verbatim and anything else is
/// sent as its JSON text.
pub fn form_fields(payload: &Value) -> Vec<(String, String)> {
    let Value::Object(map) = payload else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key.clone(), s.clone())),
            other => Some((key.clone(), other.to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_invalid_base_url() {
        let config = ClientConfig {
            base_url: "not a url".into(),
            ..Default::default()
        };
        assert!(matches!(ApiClient::new(config), Err(Error::Config { .. })));

        let config = ClientConfig {
            base_url: "ftp://example.com".into(),
            ..Default::default()
        };
        assert!(ApiClient::new(config).is_err());
    }

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new(ClientConfig {
            base_url: "http://localhost:8080/api/".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.url("/sections"), "http://localhost:8080/api/sections");
        assert_eq!(client.url("ads/3"), "http://localhost:8080/api/ads/3");
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let client = ApiClient::new(ClientConfig {
            token: Some("  ".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(!client.has_token());
    }

    #[test]
    fn test_form_fields_flatten() {
        let fields = form_fields(&json!({
            "name": "Spring",
            "active": true,
            "format": null,
            "width": 300
        }));
        assert_eq!(
            fields,
            vec![
                ("active".to_string(), "true".to_string()),
                ("name".to_string(), "Spring".to_string()),
                ("width".to_string(), "300".to_string()),
            ]
        );
    }
}
