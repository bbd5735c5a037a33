//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, tasks};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Darkroom API",
        version = "0.2.0",
        description = "Photography Department Inventory Server REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Internal tasks
        tasks::weekly_expirations,
    ),
    components(
        schemas(
            // Health
            health::HealthResponse,
            // Tasks
            crate::services::notifications::WeeklyRunSummary,
            crate::services::notifications::DispatchOutcome,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "tasks", description = "Internal scheduled task triggers")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
