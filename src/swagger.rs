use axum::{extract::State, response::Json, routing::get, Router};
use std::sync::Arc;
use utoipa::openapi::{self, server::Server};
use utoipa::OpenApi;

use crate::{
    models::{CreateStudent, ErrorResponse, MessageResponse, MutationResponse, Student, UpdateStudent},
    AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::students::create_student,
        crate::routes::students::list_students,
        crate::routes::students::get_student,
        crate::routes::students::update_student,
        crate::routes::students::delete_student,
    ),
    components(
        schemas(
            Student, CreateStudent, UpdateStudent,
            MessageResponse, MutationResponse, ErrorResponse
        )
    ),
    tags(
        (name = "students", description = "Student record management"),
    ),
    info(
        title = "Estudiantes API",
        version = "0.1.0",
        description = "Create, read, update and delete student records identified by RUT"
    )
)]
pub struct ApiDoc;

pub fn create_openapi_router() -> Router<Arc<AppState>> {
    Router::new().route("/api-docs/openapi.json", get(openapi_document))
}

/// Student paths are relative; the configured route prefix is advertised as
/// the server base so clients resolve them correctly.
pub fn openapi_with_prefix(prefix: &str) -> openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let base = if prefix.is_empty() { "/" } else { prefix };
    doc.servers = Some(vec![Server::new(base)]);
    doc
}

async fn openapi_document(State(state): State<Arc<AppState>>) -> Json<openapi::OpenApi> {
    Json(openapi_with_prefix(&state.config.route_prefix))
}
