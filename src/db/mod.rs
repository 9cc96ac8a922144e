use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;

use crate::models::Student;

pub mod students;

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabasePoolHealth {
    pub size: u32,
    pub num_idle: usize,
    pub is_closed: bool,
}

/// Failure of a single store statement. The wrapped cause is for logs only.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// True when the statement was rejected by the primary key.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StoreError::Database(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            _ => false,
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence seam for student records. Every method issues exactly one
/// statement; update and delete report the number of rows they touched.
#[async_trait]
pub trait StudentStore: Send + Sync + 'static {
    async fn insert_student(&self, student: &Student) -> StoreResult<()>;

    async fn list_students(&self) -> StoreResult<Vec<Student>>;

    async fn get_student(&self, id: i64) -> StoreResult<Option<Student>>;

    async fn update_student(&self, student: &Student) -> StoreResult<u64>;

    async fn delete_student(&self, id: i64) -> StoreResult<u64>;
}

#[derive(Clone)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new_with_pool_config(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_seconds: u64,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_seconds))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get database connection pool health information
    pub fn get_pool_health(&self) -> DatabasePoolHealth {
        DatabasePoolHealth {
            size: self.pool.size(),
            num_idle: self.pool.num_idle(),
            is_closed: self.pool.is_closed(),
        }
    }

    /// Create the students table if it does not exist yet. The database itself
    /// must already exist.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS students (
                id NUMERIC(10,0) PRIMARY KEY NOT NULL CHECK (id >= 0),
                name TEXT NOT NULL,
                "group" TEXT NOT NULL,
                level TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
