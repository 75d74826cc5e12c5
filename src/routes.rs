use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::config::Config;
use crate::handlers;

/// Builds the application router.
///
/// `/health` bypasses rate limiting. The analyze route is capped at
/// `max_upload_bytes` and, when configured, rate limited per client IP.
pub fn build_router(config: &Config) -> anyhow::Result<Router> {
    let mut analyze_routes = Router::new()
        .route("/api/analyze", post(handlers::analyze))
        // The limit layer below replaces axum's built-in 2MB default
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes));

    if let Some(period_secs) = config.rate_limit_period_secs {
        let governor_conf = Arc::new(
            GovernorConfigBuilder::default()
                .per_second(period_secs)
                .burst_size(config.rate_limit_burst)
                .key_extractor(SmartIpKeyExtractor)
                .finish()
                .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?,
        );
        analyze_routes = analyze_routes.layer(GovernorLayer {
            config: governor_conf,
        });
    }

    Ok(Router::new()
        .route("/health", get(handlers::health))
        .merge(analyze_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()))
}
