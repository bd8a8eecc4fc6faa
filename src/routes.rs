use crate::{
    api::{attendance, employee, files, media, notify},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

type Limiter = Governor<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiters, built once so every worker shares the same buckets.
#[derive(Clone)]
pub struct RateLimits {
    api: Arc<Limiter>,
    upload: Arc<Limiter>,
    notify: Arc<Limiter>,
}

impl RateLimits {
    pub fn from_config(config: &Config) -> Self {
        // Helper to build per-route limiter
        fn build_limiter(requests_per_min: u32) -> Limiter {
            let burst = requests_per_min.max(1);
            let per_ms = (60_000 / burst as u64).max(1);
            let cfg = GovernorConfigBuilder::default()
                .per_millisecond(per_ms)
                .burst_size(burst)
                .key_extractor(PeerIpKeyExtractor)
                .finish()
                .unwrap_or_default();
            Governor::new(&cfg)
        }

        Self {
            api: Arc::new(build_limiter(config.rate_api_per_min)),
            upload: Arc::new(build_limiter(config.rate_upload_per_min)),
            notify: Arc::new(build_limiter(config.rate_notify_per_min)),
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limits: RateLimits) {
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(limits.api) // rate limiting
            // /employees
            .service(web::resource("/employees").route(web::get().to(employee::list_employees)))
            // attendance views
            .service(web::resource("/summary").route(web::get().to(attendance::summary)))
            .service(web::resource("/daily").route(web::get().to(attendance::daily)))
            .service(web::resource("/details").route(web::get().to(attendance::details)))
            .service(web::resource("/report").route(web::get().to(attendance::report)))
            // /files
            .service(
                web::resource("/files")
                    .wrap(limits.upload.clone())
                    .route(web::post().to(files::upload_file))
                    .route(web::get().to(files::list_files)),
            )
            // /files/{id}
            .service(web::resource("/files/{id}").route(web::delete().to(files::delete_file)))
            // /media
            .service(
                web::resource("/media")
                    .wrap(limits.upload)
                    .route(web::post().to(media::upload_media)),
            )
            // /media/{id}
            .service(web::resource("/media/{id}").route(web::get().to(media::get_media)))
            // /notify
            .service(
                web::resource("/notify")
                    .wrap(limits.notify)
                    .route(web::post().to(notify::notify)),
            ),
    );
}
