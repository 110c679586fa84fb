//! Request bodies for the config endpoints and the JSON extractor that reads them.

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use models::errors::ModelError;
use models::{ConfigRecord, Metadata};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::errors::JsonApiError;

/// Body of `POST /configs`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateConfigInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
}

impl CreateConfigInput {
    /// Missing metadata becomes an empty object.
    pub fn into_record(self) -> Result<ConfigRecord, ModelError> {
        let metadata = match self.metadata {
            Some(v) => Metadata::try_from(v)?,
            None => Metadata::new(),
        };
        ConfigRecord::new(self.name, metadata)
    }
}

/// Body of `PUT|PATCH /configs/:name`. The path names the record; `name` here is ignored.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateConfigInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
}

impl UpdateConfigInput {
    pub fn into_metadata(self) -> Result<Metadata, ModelError> {
        let value = self
            .metadata
            .ok_or_else(|| ModelError::Validation("metadata is required".into()))?;
        Metadata::try_from(value)
    }
}

/// `Json<T>` whose rejections are reported as 400 with a JSON error body.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(JsonApiError::bad_request(rejection.body_text())),
        }
    }
}
