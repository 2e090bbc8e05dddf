use sqlx::AnyPool;

use crate::model::student::{Student, StudentRow};
use crate::recognition::encoding_to_bytes;

pub async fn insert_student(pool: &AnyPool, student: &Student) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO students (seq, id, name, class_name, facial_data)
        SELECT COALESCE(MAX(seq), 0) + 1, ?, ?, ?, ? FROM students
        "#,
    )
    .bind(&student.id)
    .bind(&student.name)
    .bind(&student.class_name)
    .bind(encoding_to_bytes(&student.facial_data))
    .execute(pool)
    .await?;

    Ok(())
}

/// Full registry scan in registration order.
pub async fn list_all(pool: &AnyPool) -> Result<Vec<Student>, sqlx::Error> {
    let rows = sqlx::query_as::<_, StudentRow>(
        "SELECT id, name, class_name, facial_data FROM students ORDER BY seq",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Student::from).collect())
}
