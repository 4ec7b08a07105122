use std::sync::Arc;
use std::time::Duration;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::middleware::NoOpMiddleware;
use shared::rate_limit::RateLimitType;
use tower_governor::{
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::{KeyExtractor, SmartIpKeyExtractor},
    GovernorError, GovernorLayer,
};
use uuid::Uuid;
use crate::auth::middleware::UserId;
use crate::config::ConfigError;
use crate::error::Error;

/// Keys player routes on the authenticated user; runs inside `require_auth`
#[derive(Clone, Copy, Debug)]
pub struct UserKeyExtractor;

impl KeyExtractor for UserKeyExtractor {
    type Key = Uuid;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        req.extensions()
            .get::<UserId>()
            .map(|user| user.0)
            .ok_or(GovernorError::UnableToExtractKey)
    }
}

pub type UserGovernorConfig = GovernorConfig<UserKeyExtractor, NoOpMiddleware>;
pub type IpGovernorConfig = GovernorConfig<SmartIpKeyExtractor, NoOpMiddleware>;

/// Spreads a bucket's attempts evenly over its window, bursting up to the max
fn quota(limit_type: RateLimitType) -> (Duration, u32) {
    let max = limit_type.get_max_attempts().max(1);
    (limit_type.get_window() / max, max)
}

fn user_config(limit_type: RateLimitType) -> Result<Arc<UserGovernorConfig>, ConfigError> {
    let (period, burst) = quota(limit_type);
    GovernorConfigBuilder::default()
        .period(period)
        .burst_size(burst)
        .key_extractor(UserKeyExtractor)
        .finish()
        .map(Arc::new)
        .ok_or_else(|| ConfigError::Invalid("rate limit", format!("{:?}", limit_type)))
}

fn ip_config(limit_type: RateLimitType) -> Result<Arc<IpGovernorConfig>, ConfigError> {
    let (period, burst) = quota(limit_type);
    GovernorConfigBuilder::default()
        .period(period)
        .burst_size(burst)
        .key_extractor(SmartIpKeyExtractor)
        .finish()
        .map(Arc::new)
        .ok_or_else(|| ConfigError::Invalid("rate limit", format!("{:?}", limit_type)))
}

/// One governor per bucket, shared by every router built from the same state
pub struct RateLimits {
    api: Arc<UserGovernorConfig>,
    roll: Arc<UserGovernorConfig>,
    link_init: Arc<UserGovernorConfig>,
    server: Arc<IpGovernorConfig>,
}

impl RateLimits {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            api: user_config(RateLimitType::Api)?,
            roll: user_config(RateLimitType::Roll)?,
            link_init: user_config(RateLimitType::LinkInit)?,
            server: ip_config(RateLimitType::Api)?,
        })
    }

    pub fn player(&self, limit_type: RateLimitType) -> GovernorLayer<UserKeyExtractor, NoOpMiddleware> {
        let config = match limit_type {
            RateLimitType::Api => &self.api,
            RateLimitType::Roll => &self.roll,
            RateLimitType::LinkInit => &self.link_init,
        };
        GovernorLayer { config: Arc::clone(config) }
    }

    /// Plugin calls carry no user, so they are keyed on the client address
    pub fn server(&self) -> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware> {
        GovernorLayer { config: Arc::clone(&self.server) }
    }

    /// Drops keys whose bucket has refilled; returns how many remain
    pub fn retain_recent(&self) -> usize {
        let mut tracked = 0;
        for config in [&self.api, &self.roll, &self.link_init] {
            config.limiter().retain_recent();
            config.limiter().shrink_to_fit();
            tracked += config.limiter().len();
        }
        self.server.limiter().retain_recent();
        self.server.limiter().shrink_to_fit();
        tracked + self.server.limiter().len()
    }

    pub fn spawn_cleanup(self: &Arc<Self>, every: Duration) {
        let limits = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let tracked = limits.retain_recent();
                tracing::debug!("rate limiter tracking {} keys", tracked);
            }
        });
    }
}

/// Rewrites governor rejections into the JSON error body with the bucket's message
pub async fn rate_limit_message(request: Request<Body>, next: Next) -> Response {
    let limit_type = RateLimitType::for_path(request.uri().path());
    let response = next.run(request).await;
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return response;
    }

    tracing::warn!("rate limited on {:?}", limit_type);
    let retry_after = response.headers().get(header::RETRY_AFTER).cloned();
    let mut rejected = Error::RateLimited(limit_type.get_error_message()).into_response();
    if let Some(value) = retry_after {
        rejected.headers_mut().insert(header::RETRY_AFTER, value);
    }
    rejected
}
