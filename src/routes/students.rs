use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    errors::ApiError,
    models::{
        CreateStudent, ErrorResponse, MessageResponse, MutationResponse, Student, UpdateStudent,
        MAX_STUDENT_ID,
    },
    utils::table::render_students,
    AppState,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/nuevo", post(create_student))
        .route("/consulta", get(list_students))
        .route("/rut/{id}", get(get_student))
        .route("/editar/{id}", put(update_student))
        .route("/eliminar/{id}", delete(delete_student))
}

/// Parse a path id into the `NUMERIC(10,0)` domain: 1 to 10 ASCII digits.
pub fn parse_student_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || raw.len() > 10 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<i64>().ok().filter(|id| *id <= MAX_STUDENT_ID)
}

fn path_id(
    state: &AppState,
    path: Result<Path<String>, PathRejection>,
) -> Result<i64, ApiError> {
    let invalid = || ApiError::bad_request(state.messages.invalid_student_id.clone());
    let Path(raw) = path.map_err(|rejection| {
        warn!("Rejected path segment: {}", rejection.body_text());
        invalid()
    })?;
    parse_student_id(&raw).ok_or_else(|| {
        warn!(raw_id = %raw, "Rejected invalid student id");
        invalid()
    })
}

/// A body that is not JSON is a 400. One without a JSON content type reads as
/// empty. Any other rejection fails the operation as a store error would.
fn json_body<T: Default>(
    state: &AppState,
    payload: Result<Json<T>, JsonRejection>,
    failure_message: &str,
) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::JsonSyntaxError(rejection)) => {
            warn!("Rejected request body: {}", rejection.body_text());
            Err(ApiError::bad_request(state.messages.invalid_request_body.clone()))
        }
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => {
            error!(error = %rejection.body_text(), "{}", failure_message);
            Err(internal_error(state))
        }
    }
}

fn internal_error(state: &AppState) -> ApiError {
    ApiError::internal_server_error(state.messages.internal_server_error.clone())
}

#[utoipa::path(
    post,
    path = "/nuevo",
    tag = "students",
    request_body = CreateStudent,
    responses(
        (status = 201, description = "Student created", body = MessageResponse),
        (status = 400, description = "Body is not valid JSON", body = ErrorResponse),
        (status = 500, description = "Store failure, including a duplicate id or a missing field", body = ErrorResponse)
    )
)]
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateStudent>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let body = json_body(&state, payload, &state.messages.create_student_failed)?;
    let student = Student::try_from(body).map_err(|e| {
        error!(error = %e, "{}", state.messages.create_student_failed);
        internal_error(&state)
    })?;

    if let Err(e) = state.store.insert_student(&student).await {
        if e.is_unique_violation() {
            warn!(student_id = student.id, "{}: duplicate id", state.messages.create_student_failed);
        } else {
            error!(student_id = student.id, error = %e, "{}", state.messages.create_student_failed);
        }
        return Err(internal_error(&state));
    }

    info!(student_id = student.id, "{}", state.messages.student_created);
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: state.messages.student_created.clone(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/consulta",
    tag = "students",
    responses(
        (status = 200, description = "Every stored student", body = Vec<Student>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state.store.list_students().await.map_err(|e| {
        error!(error = %e, "{}", state.messages.fetch_students_failed);
        internal_error(&state)
    })?;

    info!(count = students.len(), "{}\n{}", state.messages.students_fetched, render_students(&students));
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/rut/{id}",
    tag = "students",
    params(
        ("id" = i64, Path, description = "Student RUT, up to 10 digits")
    ),
    responses(
        (status = 200, description = "The student", body = Student),
        (status = 400, description = "Id is not a number of up to 10 digits", body = ErrorResponse),
        (status = 404, description = "No student with that id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_student(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Student>, ApiError> {
    let id = path_id(&state, path)?;

    let student = state
        .store
        .get_student(id)
        .await
        .map_err(|e| {
            error!(student_id = id, error = %e, "{}", state.messages.fetch_student_failed);
            internal_error(&state)
        })?
        .ok_or_else(|| ApiError::not_found(state.messages.student_not_found.clone()))?;

    info!(student_id = id, "{}\n{}", state.messages.student_found, render_students(std::slice::from_ref(&student)));
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/editar/{id}",
    tag = "students",
    params(
        ("id" = i64, Path, description = "Student RUT, up to 10 digits")
    ),
    request_body = UpdateStudent,
    responses(
        (status = 200, description = "Update executed; `affected` is 0 when the id does not exist", body = MutationResponse),
        (status = 400, description = "Invalid id or a body that is not valid JSON", body = ErrorResponse),
        (status = 404, description = "No student with that id (strict mutations only)", body = ErrorResponse),
        (status = 500, description = "Store failure, including a missing field", body = ErrorResponse)
    )
)]
pub async fn update_student(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateStudent>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let id = path_id(&state, path)?;
    let body = json_body(&state, payload, &state.messages.update_student_failed)?;
    let student = Student::with_update(id, body).map_err(|e| {
        error!(student_id = id, error = %e, "{}", state.messages.update_student_failed);
        internal_error(&state)
    })?;

    let affected = state.store.update_student(&student).await.map_err(|e| {
        error!(student_id = id, error = %e, "{}", state.messages.update_student_failed);
        internal_error(&state)
    })?;

    mutation_response(&state, id, affected, &state.messages.student_updated)
}

#[utoipa::path(
    delete,
    path = "/eliminar/{id}",
    tag = "students",
    params(
        ("id" = i64, Path, description = "Student RUT, up to 10 digits")
    ),
    responses(
        (status = 200, description = "Delete executed; `affected` is 0 when the id does not exist", body = MutationResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "No student with that id (strict mutations only)", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let id = path_id(&state, path)?;

    let affected = state.store.delete_student(id).await.map_err(|e| {
        error!(student_id = id, error = %e, "{}", state.messages.delete_student_failed);
        internal_error(&state)
    })?;

    mutation_response(&state, id, affected, &state.messages.student_deleted)
}

fn mutation_response(
    state: &AppState,
    id: i64,
    affected: u64,
    success_message: &str,
) -> Result<Json<MutationResponse>, ApiError> {
    if affected == 0 {
        if state.config.strict_mutations {
            return Err(ApiError::not_found(state.messages.student_not_found.clone()));
        }
        warn!(student_id = id, "No student matched, nothing changed");
    } else {
        info!(student_id = id, affected, "{}", success_message);
    }

    Ok(Json(MutationResponse {
        message: success_message.to_string(),
        affected,
    }))
}
