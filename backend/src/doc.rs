//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] aggregator generating the OpenAPI specification
//! for the REST API: the patrol record endpoints, the report summary, and
//! the health probes. The generated document backs Swagger UI in debug
//! builds and is exported via `cargo run --bin openapi-dump` for tooling.

use utoipa::OpenApi;

use crate::inbound::http::patrol::{
    CreatePatrolRecordRequestBody, PatrolRecordPageBody, PatrolRecordResponseBody,
};
use crate::inbound::http::reports::{
    CheckpointActivityBody, GuardActivityBody, PatrolSummaryBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::validation::TimestampValue;

/// OpenAPI document for the REST API.
///
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Guardpost backend API",
        description = "HTTP interface for patrol scan ingestion, history queries, and image retrieval.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::patrol::create_patrol_record,
        crate::inbound::http::patrol::list_patrol_records,
        crate::inbound::http::patrol::get_patrol_record,
        crate::inbound::http::patrol::get_patrol_image,
        crate::inbound::http::reports::get_patrol_summary,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreatePatrolRecordRequestBody,
        PatrolRecordResponseBody,
        PatrolRecordPageBody,
        PatrolSummaryBody,
        CheckpointActivityBody,
        GuardActivityBody,
        TimestampValue,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "patrol-records", description = "Scan ingestion and history"),
        (name = "reports", description = "Activity aggregation"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Document generation sanity checks.

    use super::*;

    #[test]
    fn document_contains_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/v1/patrol-records",
            "/api/v1/patrol-records/{id}",
            "/api/v1/patrol-images/{image_id}",
            "/api/v1/reports/summary",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                paths.iter().any(|path| path.as_str() == expected),
                "missing path {expected}"
            );
        }
    }

    #[test]
    fn document_serialises_to_yaml() {
        let yaml = ApiDoc::openapi().to_yaml().expect("document serialises");
        assert!(yaml.contains("Guardpost backend API"));
    }
}
