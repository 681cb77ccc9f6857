use crate::{
    api::{self, attendance, parameter},
    config::Config,
    error::AppError,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use anyhow::Context;
use std::sync::Arc;

type LimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Limiter state shared by every worker.
#[derive(Clone)]
pub struct RateLimits {
    public: Arc<LimiterConfig>,
    protected: Arc<LimiterConfig>,
}

impl RateLimits {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            public: Arc::new(build_limiter(config.rate_rfid_per_min)?),
            protected: Arc::new(build_limiter(config.rate_protected_per_min)?),
        })
    }
}

fn build_limiter(requests_per_min: u32) -> anyhow::Result<LimiterConfig> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / requests_per_min as u64).max(1);

    GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .with_context(|| format!("invalid rate limit: {requests_per_min}/min"))
}

/// Malformed JSON bodies answer with the standard envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Validation(format!("Invalid request body: {err}")).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limits: &RateLimits) {
    // Public routes
    cfg.service(
        web::scope(&config.public_prefix)
            .wrap(Governor::new(&limits.public))
            .configure(public_routes),
    );

    // Routes that need caller metadata
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(&limits.protected))
            .configure(protected_routes),
    );
}

pub fn public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ping").route(web::get().to(api::ping)))
        .service(
            web::resource("/checkinout-rfid").route(web::post().to(attendance::check_in_out_rfid)),
        );
}

pub fn protected_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/attendance")
            // /attendance
            .service(
                web::resource("")
                    .route(web::get().to(attendance::get_today_attendance))
                    .route(web::post().to(attendance::list_attendances)),
            )
            .service(web::resource("/checkin").route(web::post().to(attendance::check_in)))
            .service(web::resource("/checkout").route(web::post().to(attendance::check_out))),
    )
    .service(
        web::scope("/param")
            // /param
            .service(
                web::resource("")
                    .route(web::get().to(parameter::list_params))
                    .route(web::post().to(parameter::create_param))
                    .route(web::put().to(parameter::update_param)),
            )
            // /param/{key}
            .service(
                web::resource("/{key}")
                    .route(web::get().to(parameter::get_param))
                    .route(web::delete().to(parameter::delete_param)),
            ),
    );
}
