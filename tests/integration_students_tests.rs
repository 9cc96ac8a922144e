//! Student endpoints against a real PostgreSQL (`TEST_DATABASE_URL` or a
//! testcontainers instance). Run with `cargo test -- --ignored`.

use axum::http::StatusCode;
use estudiantes::db::StudentStore;
use estudiantes::models::Student;
use estudiantes::test_utils::{send_json, TestContext};
use serde_json::json;

#[tokio::test]
#[ignore = "requires docker or TEST_DATABASE_URL"]
async fn test_student_lifecycle_against_postgres() {
    let ctx = TestContext::new().await;
    let id = ctx.fresh_id();
    assert!(!ctx.db.get_pool_health().is_closed);

    let body = json!({"id": id, "name": "Ana", "group": "1A", "level": "Basica"});
    let (status, _) = send_json(&ctx.app, "POST", "/api/students/nuevo", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) =
        send_json(&ctx.app, "GET", &format!("/api/students/rut/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": id, "name": "Ana", "group": "1A", "level": "Basica"}));

    let update = json!({"name": "Ana Maria", "group": "1A", "level": "Basica"});
    let (status, body) =
        send_json(&ctx.app, "PUT", &format!("/api/students/editar/{}", id), Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected"], 1);

    let (_, body) = send_json(&ctx.app, "GET", &format!("/api/students/rut/{}", id), None).await;
    assert_eq!(body["name"], "Ana Maria");

    let (status, body) =
        send_json(&ctx.app, "DELETE", &format!("/api/students/eliminar/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected"], 1);

    let (status, _) = send_json(&ctx.app, "GET", &format!("/api/students/rut/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) =
        send_json(&ctx.app, "DELETE", &format!("/api/students/eliminar/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected"], 0);

    ctx.cleanup_and_close().await;
}

#[tokio::test]
#[ignore = "requires docker or TEST_DATABASE_URL"]
async fn test_duplicate_id_is_rejected_by_primary_key() {
    let ctx = TestContext::new().await;
    let id = ctx.fresh_id();

    let original = Student {
        id,
        name: "Ana".to_string(),
        group: "1A".to_string(),
        level: "Basica".to_string(),
    };
    ctx.db.insert_student(&original).await.unwrap();

    let err = ctx
        .db
        .insert_student(&Student {
            name: "Otra".to_string(),
            ..original.clone()
        })
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());

    let body = json!({"id": id, "name": "Otra", "group": "4C", "level": "Media"});
    let (status, _) = send_json(&ctx.app, "POST", "/api/students/nuevo", Some(body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(ctx.db.get_student(id).await.unwrap(), Some(original));

    ctx.cleanup_and_close().await;
}

#[tokio::test]
#[ignore = "requires docker or TEST_DATABASE_URL"]
async fn test_list_contains_created_student_once() {
    let ctx = TestContext::new().await;
    let id = ctx.fresh_id();

    let body = json!({"id": id, "name": "Luis", "group": "2B", "level": "Media"});
    send_json(&ctx.app, "POST", "/api/students/nuevo", Some(body)).await;

    let (status, body) = send_json(&ctx.app, "GET", "/api/students/consulta", None).await;
    assert_eq!(status, StatusCode::OK);
    let students: Vec<Student> = serde_json::from_value(body).unwrap();
    assert_eq!(students.iter().filter(|s| s.id == id).count(), 1);

    ctx.cleanup_and_close().await;
}

#[tokio::test]
#[ignore = "requires docker or TEST_DATABASE_URL"]
async fn test_mutations_on_missing_ids() {
    let ctx = TestContext::new().await;
    let id = ctx.fresh_id();

    let update = json!({"name": "Nadie", "group": "1A", "level": "Basica"});
    let (status, body) =
        send_json(&ctx.app, "PUT", &format!("/api/students/editar/{}", id), Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["affected"], 0);
    assert_eq!(ctx.db.get_student(id).await.unwrap(), None);

    ctx.cleanup_and_close().await;

    let strict = TestContext::with_config(|config| config.strict_mutations = true).await;
    let (status, _) = send_json(
        &strict.app,
        "DELETE",
        &format!("/api/students/eliminar/{}", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    strict.cleanup_and_close().await;
}

#[tokio::test]
#[ignore = "requires docker or TEST_DATABASE_URL"]
async fn test_id_overflowing_numeric_column_fails() {
    let ctx = TestContext::new().await;

    let body = json!({"id": 12345678901i64, "name": "Ana", "group": "1A", "level": "Basica"});
    let (status, body) = send_json(&ctx.app, "POST", "/api/students/nuevo", Some(body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");

    let body = json!({"id": -5, "name": "Ana", "group": "1A", "level": "Basica"});
    let (status, _) = send_json(&ctx.app, "POST", "/api/students/nuevo", Some(body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    ctx.cleanup_and_close().await;
}

#[tokio::test]
#[ignore = "requires docker or TEST_DATABASE_URL"]
async fn test_numeric_string_id_is_stored() {
    let ctx = TestContext::new().await;
    let id = ctx.fresh_id();

    let body = json!({"rut": id.to_string(), "nombre": "Ana", "curso": "1A", "nivel": "Basica"});
    let (status, _) = send_json(&ctx.app, "POST", "/api/students/nuevo", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ctx.db.get_student(id).await.unwrap().map(|s| s.id), Some(id));

    ctx.cleanup_and_close().await;
}
