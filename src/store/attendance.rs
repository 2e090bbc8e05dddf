use chrono::NaiveDate;
use sqlx::AnyPool;

use crate::model::attendance::{AttendanceRecord, AttendanceRow, DATE_FORMAT, TIMESTAMP_FORMAT};

/// Inserts the whole batch or nothing. Returns the number of rows written.
pub async fn append(pool: &AnyPool, records: &[AttendanceRecord]) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for record in records {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (date, student_id, status, recorded_at, method)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.date.format(DATE_FORMAT).to_string())
        .bind(&record.student_id)
        .bind(&record.status)
        .bind(record.timestamp.format(TIMESTAMP_FORMAT).to_string())
        .bind(&record.method)
        .execute(&mut *tx)
        .await?;

        inserted += result.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

#[derive(Debug, Default, Clone)]
pub struct AttendanceFilter {
    pub class_name: Option<String>,
    pub student_id: Option<String>,
}

/// Records dated within `start..=end` that satisfy every filter given.
pub async fn query(
    pool: &AnyPool,
    start: NaiveDate,
    end: NaiveDate,
    filter: &AttendanceFilter,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    let mut conditions = vec!["date >= ?", "date <= ?"];
    let mut bindings = vec![
        start.format(DATE_FORMAT).to_string(),
        end.format(DATE_FORMAT).to_string(),
    ];

    // records carry no class; resolve it through the registry
    if let Some(class_name) = &filter.class_name {
        conditions.push("student_id IN (SELECT id FROM students WHERE class_name = ?)");
        bindings.push(class_name.clone());
    }

    if let Some(student_id) = &filter.student_id {
        conditions.push("student_id = ?");
        bindings.push(student_id.clone());
    }

    let sql = format!(
        "SELECT date, student_id, status, recorded_at, method FROM attendance WHERE {}",
        conditions.join(" AND ")
    );

    let mut q = sqlx::query_as::<_, AttendanceRow>(&sql);
    for value in bindings {
        q = q.bind(value);
    }

    q.fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| AttendanceRecord::try_from(row).map_err(|e| sqlx::Error::Decode(Box::new(e))))
        .collect()
}
