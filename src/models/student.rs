use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;

/// Largest id that fits the `NUMERIC(10,0)` primary key.
pub const MAX_STUDENT_ID: i64 = 9_999_999_999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    /// National ID number (RUT) without check digit
    #[schema(example = 1111111)]
    pub id: i64,
    pub name: String,
    /// Class or section label ("curso")
    pub group: String,
    /// Grade or level label ("nivel")
    pub level: String,
}

/// A request body that cannot become a row. Reported like the column
/// constraint the database would have raised.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvalidStudent {
    #[error("null value in column \"{0}\" violates not-null constraint")]
    MissingField(&'static str),

    #[error("invalid input syntax for type numeric: \"{0}\"")]
    InvalidId(String),
}

/// JSON strings and numbers are both accepted as column text, the way the
/// database coerces them. `null` counts as absent.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Text(text) => text,
        Scalar::Number(number) => number.to_string(),
    }))
}

fn required(value: Option<String>, column: &'static str) -> Result<String, InvalidStudent> {
    value.ok_or(InvalidStudent::MissingField(column))
}

/// Body of `POST /nuevo`. The original Spanish field names are accepted as
/// aliases; `id` may be a number or a numeric string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateStudent {
    #[serde(alias = "rut", default, deserialize_with = "scalar_text")]
    #[schema(value_type = i64, example = 1111111)]
    pub id: Option<String>,
    #[serde(alias = "nombre", default, deserialize_with = "scalar_text")]
    #[schema(value_type = String)]
    pub name: Option<String>,
    #[serde(alias = "curso", default, deserialize_with = "scalar_text")]
    #[schema(value_type = String)]
    pub group: Option<String>,
    #[serde(alias = "nivel", default, deserialize_with = "scalar_text")]
    #[schema(value_type = String)]
    pub level: Option<String>,
}

/// Body of `PUT /editar/{id}`. Every column is overwritten, so a missing field
/// fails like a NOT NULL violation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateStudent {
    #[serde(alias = "nombre", default, deserialize_with = "scalar_text")]
    #[schema(value_type = String)]
    pub name: Option<String>,
    #[serde(alias = "curso", default, deserialize_with = "scalar_text")]
    #[schema(value_type = String)]
    pub group: Option<String>,
    #[serde(alias = "nivel", default, deserialize_with = "scalar_text")]
    #[schema(value_type = String)]
    pub level: Option<String>,
}

impl TryFrom<CreateStudent> for Student {
    type Error = InvalidStudent;

    fn try_from(value: CreateStudent) -> Result<Self, Self::Error> {
        let raw_id = required(value.id, "id")?;
        let id = raw_id
            .trim()
            .parse::<i64>()
            .map_err(|_| InvalidStudent::InvalidId(raw_id.clone()))?;

        Ok(Student {
            id,
            name: required(value.name, "name")?,
            group: required(value.group, "group")?,
            level: required(value.level, "level")?,
        })
    }
}

impl Student {
    pub fn with_update(id: i64, update: UpdateStudent) -> Result<Self, InvalidStudent> {
        Ok(Student {
            id,
            name: required(update.name, "name")?,
            group: required(update.group, "group")?,
            level: required(update.level, "level")?,
        })
    }
}
