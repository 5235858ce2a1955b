//! Server construction and middleware wiring.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use guardpost_backend::ApiDoc;
use guardpost_backend::Trace;
use guardpost_backend::config::AppSettings;
use guardpost_backend::domain::{CameraMap, ImageService, PatrolService, ReportService};
use guardpost_backend::inbound::http::health::{HealthState, live, ready};
use guardpost_backend::inbound::http::patrol::{
    create_patrol_record, get_patrol_image, get_patrol_record, list_patrol_records,
};
use guardpost_backend::inbound::http::reports::get_patrol_summary;
use guardpost_backend::inbound::http::state::HttpState;
use guardpost_backend::outbound::camera::HttpSnapshotSource;
use guardpost_backend::outbound::persistence::{DbPool, DieselPatrolRecordRepository};
use guardpost_backend::outbound::storage::FsImageStore;

/// Wire concrete adapters into the handler state bundle.
fn build_http_state(
    settings: &AppSettings,
    pool: DbPool,
    cameras: CameraMap,
) -> std::io::Result<HttpState> {
    let store = FsImageStore::new(settings.image_storage_dir())
        .map_err(|err| std::io::Error::other(format!("image store init failed: {err}")))?;
    let camera = HttpSnapshotSource::new(settings.camera_fetch_timeout())
        .map_err(|err| std::io::Error::other(format!("camera client init failed: {err}")))?;

    let images = Arc::new(ImageService::new(
        Arc::new(store),
        Arc::new(camera),
        cameras,
    ));
    let records = Arc::new(DieselPatrolRecordRepository::new(pool));
    let patrol = Arc::new(PatrolService::new(records.clone(), images));
    let reports = Arc::new(ReportService::new(records));

    Ok(HttpState::new(
        patrol.clone(),
        patrol.clone(),
        patrol,
        reports,
    ))
}

/// Build and run the HTTP server until shutdown.
pub async fn run(settings: AppSettings, pool: DbPool, cameras: CameraMap) -> std::io::Result<()> {
    let http_state = web::Data::new(build_http_state(&settings, pool, cameras)?);
    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .service(create_patrol_record)
            .service(list_patrol_records)
            .service(get_patrol_record)
            .service(get_patrol_image)
            .service(get_patrol_summary);

        let app = App::new()
            .app_data(server_health_state.clone())
            .app_data(http_state.clone())
            .wrap(Trace)
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(settings.bind_addr())?;

    health_state.mark_ready();
    server.run().await
}
