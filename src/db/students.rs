use async_trait::async_trait;

use super::{Database, StoreResult, StudentStore};
use crate::models::Student;

// `id` is NUMERIC(10,0); it is cast to BIGINT on the way out so it decodes
// as i64 without a decimal crate.
const SELECT_COLUMNS: &str = r#"id::BIGINT AS id, name, "group", level"#;

#[async_trait]
impl StudentStore for Database {
    async fn insert_student(&self, student: &Student) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO students (id, name, "group", level)
            VALUES ($1::BIGINT, $2, $3, $4)
            "#,
        )
        .bind(student.id)
        .bind(&student.name)
        .bind(&student.group)
        .bind(&student.level)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_students(&self) -> StoreResult<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM students ORDER BY id",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    async fn get_student(&self, id: i64) -> StoreResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM students WHERE id = $1::BIGINT",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    async fn update_student(&self, student: &Student) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE students
            SET name = $2, "group" = $3, level = $4
            WHERE id = $1::BIGINT
            "#,
        )
        .bind(student.id)
        .bind(&student.name)
        .bind(&student.group)
        .bind(&student.level)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_student(&self, id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1::BIGINT")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
