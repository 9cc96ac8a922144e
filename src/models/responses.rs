use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Returned by update and delete; `affected` is the number of rows the
/// statement touched (0 when the id did not exist).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MutationResponse {
    pub message: String,
    pub affected: u64,
}

/// Shape of every error body produced by [`crate::errors::ApiError`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
}
