use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Swagger UI at `/swagger-ui`, backed by `/api-docs/openapi.json`
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health::health_check,
        crate::api::handlers::measurements::toggle_flag,
    ),
    components(
        schemas(
            crate::entities::common::ErrorResponse,
            crate::entities::measurement::FlagResponse,
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "measurements", description = "Blood pressure and heart rate measurements")
    ),
    info(
        title = "HealthLog API",
        version = "0.1.0",
        description = "JSON endpoints of the HealthLog measurement tracker",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
