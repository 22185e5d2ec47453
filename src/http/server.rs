//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve plugin-list overrides to the platform
//! - Forward requests to the upstream platform
//! - Turn upstream 404s into redirects when a site rule matches

use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, InvalidUri, InvalidUriParts, PathAndQuery, Scheme},
        HeaderMap, Request, StatusCode, Uri, Version,
    },
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{GatewayConfig, RequestConfig};
use crate::hooks::RequestContext;
use crate::http::request::{raw_request_uri, request_host, request_id, MakeRequestUuidV4};
use crate::http::response::{plugin_list_response, redirect_response};
use crate::observability::metrics;
use crate::plugins::PluginScope;
use crate::sites::{SiteContext, SiteRegistry, SiteResolver};

/// Path of the site plugin-list endpoint.
pub const PLUGINS_PATH: &str = "/_site-config/plugins";

/// Path of the sitewide plugin-list endpoint.
pub const SITEWIDE_PLUGINS_PATH: &str = "/_site-config/sitewide-plugins";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub sites: Arc<SiteRegistry>,
    pub resolver: Arc<SiteResolver>,
    pub client: Client<HttpConnector, Body>,
    pub upstream: Authority,
    pub request_config: Arc<RequestConfig>,
}

impl AppState {
    /// The site a request belongs to, loading it on first use.
    async fn site(&self, host: Option<&str>, request_id: &str) -> Option<Arc<SiteContext>> {
        let site_id = self.resolver.resolve(host)?;
        match self.sites.get_or_load(site_id).await {
            Ok(site) => Some(site),
            Err(e) => {
                tracing::error!(request_id = %request_id, site_id, error = %e, "Failed to load site configuration");
                None
            }
        }
    }
}

/// HTTP server for the site gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, InvalidUri> {
        let upstream = Authority::from_str(&config.upstream.address)?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        let state = AppState {
            sites: Arc::new(SiteRegistry::new(&config.sites)),
            resolver: Arc::new(SiteResolver::from_config(&config.sites)),
            client,
            upstream,
            request_config: Arc::new(config.request.clone()),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route(PLUGINS_PATH, get(site_plugins_handler))
            .route(SITEWIDE_PLUGINS_PATH, get(sitewide_plugins_handler))
            .fallback(proxy_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn site_plugins_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    plugin_list(&state, &headers, &uri, PluginScope::Site).await
}

async fn sitewide_plugins_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    plugin_list(&state, &headers, &uri, PluginScope::Sitewide).await
}

async fn plugin_list(
    state: &AppState,
    headers: &HeaderMap,
    uri: &Uri,
    scope: PluginScope,
) -> Response {
    let host = request_host(headers, uri);
    let plugins = state
        .site(host.as_deref(), request_id(headers))
        .await
        .and_then(|site| site.hooks.plugin_list(scope));

    tracing::debug!(
        request_id = %request_id(headers),
        host = ?host,
        scope = %scope,
        overridden = plugins.is_some(),
        "Plugin list requested"
    );
    plugin_list_response(plugins)
}

/// Main proxy handler.
/// Forwards the request upstream and applies the site's redirects to 404s.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request_id(request.headers()).to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let raw_uri = raw_request_uri(request.uri());
    let headers = request.headers().clone();
    let host = request_host(&headers, request.uri());

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        uri = %raw_uri,
        "Proxying request"
    );

    let site = state.site(host.as_deref(), &request_id).await;

    let upstream_request = match upstream_request(request, &state.upstream) {
        Ok(req) => req,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to build upstream URI");
            metrics::record_request(502);
            return (StatusCode::BAD_GATEWAY, "Invalid upstream request").into_response();
        }
    };

    let start = Instant::now();
    let response = match state.client.request(upstream_request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            metrics::record_request(502);
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }
    };
    metrics::record_upstream(start);

    if response.status() == StatusCode::NOT_FOUND {
        if let Some(site) = site {
            let context =
                RequestContext::classify(&state.request_config, &method, &path, &headers, true);
            if let Some(redirect) = not_found(&site, &context, &raw_uri, &request_id) {
                return redirect;
            }
        }
    }

    metrics::record_request(response.status().as_u16());
    into_axum(response)
}

/// Run the site's not-found handler. `Some` is the terminal redirect.
fn not_found(
    site: &SiteContext,
    context: &RequestContext,
    raw_uri: &str,
    request_id: &str,
) -> Option<Response> {
    if !context.should_redirect() || !site.hooks.has_not_found_handler() {
        return None;
    }
    metrics::record_not_found(site.site_id);

    let action = site.hooks.handle_not_found(raw_uri)?;
    match redirect_response(&action) {
        Some(response) => {
            tracing::info!(
                request_id = %request_id,
                site_id = site.site_id,
                from = %raw_uri,
                to = %action.url,
                status = action.status_code,
                "Redirecting"
            );
            metrics::record_redirect(site.site_id);
            metrics::record_request(action.status_code);
            Some(response)
        }
        None => {
            tracing::warn!(
                request_id = %request_id,
                site_id = site.site_id,
                from = %raw_uri,
                location = %action.url,
                "Redirect target unusable, serving upstream 404"
            );
            None
        }
    }
}

/// Point the request at the upstream, keeping path, query and headers.
fn upstream_request(
    request: Request<Body>,
    upstream: &Authority,
) -> Result<Request<Body>, InvalidUriParts> {
    let (mut parts, body) = request.into_parts();

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(upstream.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = Uri::from_parts(uri_parts)?;
    parts.version = Version::HTTP_11;

    Ok(Request::from_parts(parts, body))
}

fn into_axum(response: Response<Incoming>) -> Response {
    let (parts, body) = response.into_parts();
    Response::from_parts(parts, Body::new(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_request_rewrites_authority() {
        let request = Request::builder()
            .uri("/old-page?x=1")
            .header("host", "blog.example")
            .body(Body::empty())
            .unwrap();
        let upstream = Authority::from_static("127.0.0.1:8000");

        let rewritten = upstream_request(request, &upstream).unwrap();
        assert_eq!(rewritten.uri().to_string(), "http://127.0.0.1:8000/old-page?x=1");
        assert_eq!(rewritten.headers()["host"], "blog.example");
    }

    #[test]
    fn test_invalid_upstream_address() {
        let mut config = GatewayConfig::default();
        config.upstream.address = "not a host".into();
        assert!(HttpServer::new(config).is_err());
    }
}
