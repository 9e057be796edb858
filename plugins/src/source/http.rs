use async_trait::async_trait;
use evdump_core::api::{
    EndpointKind, EventPage, ExportSource, FetchPageRequest, ListPageRequest, ObjectPage,
    TransportError, TransportErrorKind,
};
use reqwest::Url;
use serde::de::DeserializeOwned;

fn from_reqwest(err: reqwest::Error, url: &str) -> TransportError {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_connect() {
        TransportErrorKind::Connect
    } else if err.is_request() {
        TransportErrorKind::Request
    } else if err.is_body() {
        TransportErrorKind::Body
    } else if err.is_decode() {
        TransportErrorKind::Decode
    } else {
        TransportErrorKind::Unknown
    };
    let status = err.status().map(|s| s.as_u16());
    TransportError::new(kind, status, url, err.to_string())
}

async fn parse_json_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, TransportError> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp.text().await.map_err(|err| from_reqwest(err, &url))?;

    if !status.is_success() {
        return Err(TransportError::status_error(status.as_u16(), url, &body));
    }

    serde_json::from_str::<T>(&body)
        .map_err(|err| TransportError::decode_error(Some(status.as_u16()), url, err, &body))
}

/// Talks to the remote REST API with a bearer token.
#[derive(Clone)]
pub struct HttpSource {
    api_key: String,
    http: reqwest::Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base_url: &str, api_key: String, timeout_ms: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        let base = Url::parse(base_url.trim())
            .map_err(|e| anyhow::anyhow!("invalid api base url '{}': {}", base_url, e))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("invalid api base url '{}': not a hierarchical url", base_url);
        }
        Ok(Self {
            api_key,
            http,
            base,
        })
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.trim().is_empty() {
            req
        } else {
            req.bearer_auth(&self.api_key)
        }
    }

    /// `<base>/v1/<segments...>`, each segment percent-encoded.
    fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("v1").extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, TransportError> {
        let url_str = url.to_string();
        let req = self.http.get(url).query(query);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| from_reqwest(err, &url_str))?;
        parse_json_response(resp).await
    }

    pub fn list_url(&self, endpoint: EndpointKind) -> Url {
        self.endpoint_url(&[endpoint.as_str()])
    }

    pub fn fetch_url(&self, endpoint: EndpointKind, object_id: &str) -> Url {
        self.endpoint_url(&[endpoint.as_str(), object_id, "fetch"])
    }
}

#[async_trait]
impl ExportSource for HttpSource {
    async fn list_page(&self, req: ListPageRequest<'_>) -> Result<ObjectPage, TransportError> {
        let url = self.list_url(req.endpoint);
        let limit = req.limit.to_string();
        let mut query: Vec<(&str, &str)> = vec![("limit", limit.as_str())];
        if let Some(after) = req.starting_after {
            query.push(("starting_after", after));
        }
        if let Some(filter) = req.filter {
            query.push(filter.query_pair());
        }

        tracing::debug!(
            target: "evdump.http",
            stage = "http.list.in",
            url = %url,
            limit = req.limit,
            starting_after = req.starting_after.unwrap_or("")
        );
        let page: ObjectPage = self.get_json(url, &query).await?;
        tracing::debug!(
            target: "evdump.http",
            stage = "http.list.out",
            objects = page.objects.len()
        );
        Ok(page)
    }

    async fn fetch_page(&self, req: FetchPageRequest<'_>) -> Result<EventPage, TransportError> {
        let url = self.fetch_url(req.endpoint, req.object_id);
        let limit = req.limit.to_string();
        let mut query: Vec<(&str, &str)> = vec![("limit", limit.as_str())];
        if let Some(cursor) = req.cursor {
            query.push(("cursor", cursor));
        }

        tracing::debug!(
            target: "evdump.http",
            stage = "http.fetch.in",
            url = %url,
            limit = req.limit,
            has_cursor = req.cursor.is_some()
        );
        let page: EventPage = self.get_json(url, &query).await?;
        tracing::debug!(
            target: "evdump.http",
            stage = "http.fetch.out",
            events = page.events.len(),
            has_more = page.next_cursor().is_some()
        );
        Ok(page)
    }
}
