use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::recognition::{Encoding, encoding_from_bytes};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "S-1001",
        "name": "Jane Doe",
        "class_name": "7B",
        "facial_data": [-0.0912, 0.1184, 0.0473]
    })
)]
pub struct Student {
    #[schema(example = "S-1001")]
    pub id: String,

    #[schema(example = "Jane Doe")]
    pub name: String,

    #[schema(example = "7B")]
    pub class_name: String,

    /// Face encoding computed by the client at enrolment time
    #[schema(value_type = Vec<f64>)]
    pub facial_data: Encoding,
}

#[derive(sqlx::FromRow)]
pub struct StudentRow {
    pub id: String,
    pub name: String,
    pub class_name: String,
    pub facial_data: Vec<u8>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            class_name: row.class_name,
            facial_data: encoding_from_bytes(&row.facial_data),
        }
    }
}
