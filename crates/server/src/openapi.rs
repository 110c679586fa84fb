use axum::Json;
use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::dto::{CreateConfigInput, UpdateConfigInput};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Body returned by list, get, create and search.
#[derive(ToSchema)]
pub struct ConfigRecordDoc {
    pub name: String,
    /// Arbitrary nested JSON object.
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
}

#[derive(ToSchema)]
pub struct ErrorBodyDoc {
    pub error: String,
    pub detail: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::healthz,
        crate::routes::health::readyz,
        crate::routes::configs::list,
        crate::routes::configs::create,
        crate::routes::configs::get,
        crate::routes::configs::update,
        crate::routes::configs::patch,
        crate::routes::configs::delete,
        crate::routes::configs::search,
    ),
    components(
        schemas(
            HealthResponse,
            ConfigRecordDoc,
            ErrorBodyDoc,
            CreateConfigInput,
            UpdateConfigInput,
        )
    ),
    tags(
        (name = "health"),
        (name = "configs")
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
