//! GitHub star-graph client.
//!
//! All traffic goes through the [`HttpTransport`] seam so unit tests run
//! against an in-memory transport. The client walks pagination internally
//! (Link header first, short-page heuristic as fallback), records the
//! upstream budget on every response, and refuses to issue page requests
//! while the shared budget is exhausted.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use backon::Retryable;
use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{HttpError, HttpHeaders, HttpRequest, HttpResponse, HttpTransport, header_get};
use crate::platform::{
    self, ApiRateLimiter, PlatformError, RateLimitGuard, RateLimitInfo, StarGraphClient,
};
use crate::retry::transient_backoff;

use super::error::GitHubError;
use super::pagination::parse_link_header;
use super::types::{RateLimitResponse, Stargazer, StarredRepo};

/// Default GitHub API base URL.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Items requested per page. One fixed value is used for every paginated
/// call a client instance makes.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// GitHub API client implementing the [`StarGraphClient`] trait.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    api_base: String,
    token: String,
    page_size: u32,
    /// Reactive budget guard, shared by clones.
    guard: RateLimitGuard,
    /// Optional proactive pacer for spacing outgoing requests.
    pacer: Option<ApiRateLimiter>,
}

impl GitHubClient {
    /// Create a client from an authentication token.
    pub fn new(token: &str, pacer: Option<ApiRateLimiter>) -> Result<Self, GitHubError> {
        let transport = ReqwestTransport::with_timeout(Duration::from_secs(30))
            .map_err(|e| GitHubError::Http(e.to_string()))?;
        Ok(Self::with_transport(
            GITHUB_API_BASE,
            token,
            pacer,
            Arc::new(transport),
        ))
    }

    /// Create a client over an explicit transport and API base.
    pub fn with_transport(
        api_base: &str,
        token: &str,
        pacer: Option<ApiRateLimiter>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            transport,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            guard: RateLimitGuard::new(),
            pacer,
        }
    }

    /// Override the page size used for paginated calls.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn headers(&self) -> HttpHeaders {
        vec![
            ("Accept".to_string(), "application/vnd.github+json".to_string()),
            ("User-Agent".to_string(), "starneighbours".to_string()),
            ("Authorization".to_string(), format!("Bearer {}", self.token)),
        ]
    }

    /// Extract rate limit info from response headers.
    fn parse_rate_limit_headers(headers: &HttpHeaders) -> Option<RateLimitInfo> {
        let limit = header_get(headers, "x-ratelimit-limit")?.parse::<usize>().ok()?;
        let remaining = header_get(headers, "x-ratelimit-remaining")?
            .parse::<usize>()
            .ok()?;
        let reset_epoch = header_get(headers, "x-ratelimit-reset")?.parse::<i64>().ok()?;
        let reset_at = chrono::DateTime::from_timestamp(reset_epoch, 0)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);
        Some(RateLimitInfo {
            limit,
            remaining,
            reset_at,
        })
    }

    /// Issue a GET, retrying transient transport failures, and feed the
    /// observed budget into the guard.
    async fn send(&self, path: &str) -> Result<HttpResponse, GitHubError> {
        if let Some(ref pacer) = self.pacer {
            pacer.wait().await;
        }

        let request = HttpRequest {
            url: format!("{}{}", self.api_base, path),
            headers: self.headers(),
        };

        let get = || async { self.transport.get(request.clone()).await };
        let response = get
            .retry(transient_backoff())
            .when(|e: &HttpError| matches!(e, HttpError::Transport(_)))
            .notify(|err, dur| {
                tracing::debug!(error = %err, "transient transport failure, retrying in {dur:?}");
            })
            .await
            .map_err(|e| GitHubError::Http(e.to_string()))?;

        if let Some(info) = Self::parse_rate_limit_headers(&response.headers) {
            self.guard.record(&info);
        }

        Ok(response)
    }

    /// Map non-success statuses to typed failures.
    fn check_status(response: &HttpResponse, resource: &str) -> Result<(), GitHubError> {
        match response.status {
            s if (200..300).contains(&s) => Ok(()),
            401 => Err(GitHubError::AuthRequired),
            403 | 429 => {
                // Primary-limit exhaustion surfaces as 403/429 with the
                // budget headers zeroed out; a plain 403 is a credential
                // problem.
                let exhausted = Self::parse_rate_limit_headers(&response.headers)
                    .filter(|info| info.remaining == 0)
                    .map(|info| info.reset_at);
                match exhausted {
                    Some(reset_at) => Err(GitHubError::RateLimited { reset_at }),
                    None if response.status == 429 => {
                        let reset_at = header_get(&response.headers, "retry-after")
                            .and_then(|v| v.parse::<i64>().ok())
                            .map(|secs| Utc::now() + chrono::Duration::seconds(secs))
                            .unwrap_or_else(Utc::now);
                        Err(GitHubError::RateLimited { reset_at })
                    }
                    None => Err(GitHubError::AuthRequired),
                }
            }
            404 => Err(GitHubError::NotFound(resource.to_string())),
            s => Err(GitHubError::Api {
                status: s,
                message: String::from_utf8_lossy(&response.body).to_string(),
            }),
        }
    }

    /// Walk every page of a paginated route and concatenate the items.
    ///
    /// The guard is consulted before each page request so an exhausted
    /// budget fails fast instead of burning a doomed request.
    async fn get_paged<T: DeserializeOwned>(
        &self,
        route: impl Fn(u32) -> String,
        resource: &str,
    ) -> Result<Vec<T>, GitHubError> {
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            if let Some(reset_at) = self.guard.blocked_until() {
                return Err(GitHubError::RateLimited { reset_at });
            }

            let response = self.send(&route(page)).await?;
            Self::check_status(&response, resource)?;

            let link_header = response.header("link").map(parse_link_header);
            let page_items: Vec<T> = serde_json::from_slice(&response.body)?;
            let count = page_items.len();
            items.extend(page_items);

            tracing::debug!(
                resource,
                page,
                count,
                total = items.len(),
                expected_pages = link_header.and_then(|l| l.last_page),
                "fetched page"
            );

            match link_header.and_then(|l| l.next_page) {
                Some(next) => page = next,
                // No Link header at all: fall back to the short-page
                // heuristic. A Link header without rel="next" is a
                // definitive end.
                None if link_header.is_none() && count >= self.page_size as usize => page += 1,
                None => break,
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl StarGraphClient for GitHubClient {
    async fn fetch_stargazers(&self, owner: &str, repo: &str) -> platform::Result<Vec<String>> {
        let resource = format!("{owner}/{repo}");
        let per_page = self.page_size;
        let users: Vec<Stargazer> = self
            .get_paged(
                |page| format!("/repos/{owner}/{repo}/stargazers?per_page={per_page}&page={page}"),
                &resource,
            )
            .await?;
        Ok(users.into_iter().map(|u| u.login).collect())
    }

    async fn fetch_starred_repos(&self, user: &str) -> platform::Result<Vec<String>> {
        let per_page = self.page_size;
        let repos: Vec<StarredRepo> = self
            .get_paged(
                |page| format!("/users/{user}/starred?per_page={per_page}&page={page}"),
                user,
            )
            .await?;
        Ok(repos.into_iter().map(|r| r.full_name).collect())
    }

    async fn check_connectivity(&self) -> platform::Result<RateLimitInfo> {
        let info = self.rate_limit().await?;
        if info.remaining == 0 {
            return Err(PlatformError::RateLimited {
                reset_at: info.reset_at,
            });
        }
        Ok(info)
    }

    async fn rate_limit(&self) -> platform::Result<RateLimitInfo> {
        // The status endpoint does not draw on the budget, so it is never
        // guard-checked; it is how an exhausted process learns about the
        // reset.
        let response = self.send("/rate_limit").await.map_err(PlatformError::from)?;
        Self::check_status(&response, "rate_limit").map_err(PlatformError::from)?;

        let parsed: RateLimitResponse = serde_json::from_slice(&response.body)
            .map_err(|e| PlatformError::internal(e.to_string()))?;
        let info = parsed.resources.core.to_info();
        self.guard.record(&info);
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::http::MockTransport;

    const BASE: &str = "https://api.test";

    fn client(mock: &MockTransport) -> GitHubClient {
        GitHubClient::with_transport(BASE, "token-1", None, Arc::new(mock.clone()))
            .with_page_size(2)
    }

    fn response(status: u16, headers: &[(&str, &str)], body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.as_bytes().to_vec(),
        }
    }

    fn budget_headers(remaining: usize, reset: i64) -> Vec<(String, String)> {
        vec![
            ("x-ratelimit-limit".to_string(), "5000".to_string()),
            ("x-ratelimit-remaining".to_string(), remaining.to_string()),
            ("x-ratelimit-reset".to_string(), reset.to_string()),
        ]
    }

    #[tokio::test]
    async fn stargazers_walks_all_pages_via_link_header() {
        let mock = MockTransport::new();
        let page1 = format!("{BASE}/repos/A/x/stargazers?per_page=2&page=1");
        let page2 = format!("{BASE}/repos/A/x/stargazers?per_page=2&page=2");

        let link = format!(r#"<{page2}>; rel="next", <{page2}>; rel="last""#);
        mock.push_response(
            &page1,
            response(
                200,
                &[("link", link.as_str())],
                r#"[{"login":"u1"},{"login":"u2"}]"#,
            ),
        );
        mock.push_response(&page2, response(200, &[], r#"[{"login":"u3"}]"#));

        let users = client(&mock).fetch_stargazers("A", "x").await.unwrap();
        assert_eq!(users, vec!["u1", "u2", "u3"]);
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn full_page_without_link_header_continues_until_short_page() {
        let mock = MockTransport::new();
        let page1 = format!("{BASE}/users/u1/starred?per_page=2&page=1");
        let page2 = format!("{BASE}/users/u1/starred?per_page=2&page=2");

        mock.push_response(
            &page1,
            response(200, &[], r#"[{"full_name":"A/x"},{"full_name":"B/y"}]"#),
        );
        mock.push_response(&page2, response(200, &[], r#"[]"#));

        let repos = client(&mock).fetch_starred_repos("u1").await.unwrap();
        assert_eq!(repos, vec!["A/x", "B/y"]);
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn aggregated_pages_match_single_page_result() {
        // Same items, one page vs. two pages: the caller sees no difference.
        let single = MockTransport::new();
        single.push_response(
            format!("{BASE}/users/u1/starred?per_page=4&page=1"),
            response(200, &[], r#"[{"full_name":"A/x"},{"full_name":"B/y"},{"full_name":"C/z"}]"#),
        );
        let client_single = GitHubClient::with_transport(BASE, "t", None, Arc::new(single.clone()))
            .with_page_size(4);
        let one = client_single.fetch_starred_repos("u1").await.unwrap();

        let split = MockTransport::new();
        split.push_response(
            format!("{BASE}/users/u1/starred?per_page=2&page=1"),
            response(200, &[], r#"[{"full_name":"A/x"},{"full_name":"B/y"}]"#),
        );
        split.push_response(
            format!("{BASE}/users/u1/starred?per_page=2&page=2"),
            response(200, &[], r#"[{"full_name":"C/z"}]"#),
        );
        let client_split = GitHubClient::with_transport(BASE, "t", None, Arc::new(split.clone()))
            .with_page_size(2);
        let two = client_split.fetch_starred_repos("u1").await.unwrap();

        assert_eq!(one, two);
    }

    #[tokio::test]
    async fn missing_repo_maps_to_not_found() {
        let mock = MockTransport::new();
        mock.push_response(
            format!("{BASE}/repos/A/gone/stargazers?per_page=2&page=1"),
            response(404, &[], r#"{"message":"Not Found"}"#),
        );

        let err = client(&mock).fetch_stargazers("A", "gone").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_required() {
        let mock = MockTransport::new();
        mock.push_response(
            format!("{BASE}/repos/A/x/stargazers?per_page=2&page=1"),
            response(401, &[], r#"{"message":"Bad credentials"}"#),
        );

        let err = client(&mock).fetch_stargazers("A", "x").await.unwrap_err();
        assert!(matches!(err, PlatformError::AuthRequired));
    }

    #[tokio::test]
    async fn exhausted_budget_response_maps_to_rate_limited() {
        let mock = MockTransport::new();
        let reset = (Utc::now() + chrono::Duration::hours(1)).timestamp();
        let headers = budget_headers(0, reset);
        let headers: Vec<(&str, &str)> = headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        mock.push_response(
            format!("{BASE}/repos/A/x/stargazers?per_page=2&page=1"),
            response(403, &headers, r#"{"message":"API rate limit exceeded"}"#),
        );

        let err = client(&mock).fetch_stargazers("A", "x").await.unwrap_err();
        assert!(err.is_rate_limited());
    }

    #[tokio::test]
    async fn exhausted_guard_fails_fast_without_issuing_requests() {
        let mock = MockTransport::new();
        let c = client(&mock);

        // Exhaust the budget through an observed response.
        let reset = (Utc::now() + chrono::Duration::hours(1)).timestamp();
        let headers = budget_headers(0, reset);
        let headers: Vec<(&str, &str)> = headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        mock.push_response(
            format!("{BASE}/repos/A/x/stargazers?per_page=2&page=1"),
            response(403, &headers, "{}"),
        );
        assert!(c.fetch_stargazers("A", "x").await.is_err());
        let issued = mock.requests().len();

        // The next paginated call must be refused before any request goes out.
        let err = c.fetch_starred_repos("u1").await.unwrap_err();
        assert!(err.is_rate_limited());
        assert_eq!(mock.requests().len(), issued);
    }

    #[tokio::test]
    async fn rate_limit_endpoint_parses_and_records_budget() {
        let mock = MockTransport::new();
        let reset = (Utc::now() + chrono::Duration::hours(1)).timestamp();
        mock.push_response(
            format!("{BASE}/rate_limit"),
            response(
                200,
                &[],
                &format!(
                    r#"{{"resources":{{"core":{{"limit":5000,"remaining":0,"reset":{reset}}}}}}}"#
                ),
            ),
        );

        let c = client(&mock);
        let info = c.rate_limit().await.unwrap();
        assert_eq!(info.remaining, 0);

        // The zero budget observed via /rate_limit blocks paginated calls.
        let err = c.fetch_stargazers("A", "x").await.unwrap_err();
        assert!(err.is_rate_limited());
    }

    #[tokio::test]
    async fn connectivity_check_fails_on_exhausted_budget() {
        let mock = MockTransport::new();
        let reset = (Utc::now() + chrono::Duration::hours(1)).timestamp();
        mock.push_response(
            format!("{BASE}/rate_limit"),
            response(
                200,
                &[],
                &format!(
                    r#"{{"resources":{{"core":{{"limit":5000,"remaining":0,"reset":{reset}}}}}}}"#
                ),
            ),
        );

        let err = client(&mock).check_connectivity().await.unwrap_err();
        assert!(err.is_rate_limited());
    }

    #[tokio::test]
    async fn connectivity_check_succeeds_with_budget() {
        let mock = MockTransport::new();
        mock.push_response(
            format!("{BASE}/rate_limit"),
            response(
                200,
                &[],
                r#"{"resources":{"core":{"limit":5000,"remaining":4999,"reset":1700000000}}}"#,
            ),
        );

        let info = client(&mock).check_connectivity().await.unwrap();
        assert_eq!(info.remaining, 4999);
    }

    #[tokio::test]
    async fn requests_carry_auth_and_accept_headers() {
        let mock = MockTransport::new();
        mock.push_response(
            format!("{BASE}/users/u1/starred?per_page=2&page=1"),
            response(200, &[], "[]"),
        );

        client(&mock).fetch_starred_repos("u1").await.unwrap();

        let requests = mock.requests();
        let headers = &requests[0].headers;
        assert_eq!(header_get(headers, "authorization"), Some("Bearer token-1"));
        assert_eq!(
            header_get(headers, "accept"),
            Some("application/vnd.github+json")
        );
    }
}
