//! Discovered postings.

use crate::error::{DatabaseError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use jobscout_core::Posting;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Store a posting unless its url is already known.
///
/// Timestamps are written with fixed precision so `date_found` sorts as text.
///
/// Returns the stored posting when a row was inserted, `None` when the url
/// already existed.
pub async fn upsert_posting(pool: &SqlitePool, posting: &Posting) -> Result<Option<Posting>> {
    let result = sqlx::query(
        r"
        INSERT INTO jobs (id, title, company, url, date_found, is_new)
        VALUES (?, ?, ?, ?, ?, 1)
        ON CONFLICT(url) DO NOTHING
        ",
    )
    .bind(uuid::Uuid::new_v4().to_string())
    .bind(&posting.title)
    .bind(&posting.company_name)
    .bind(&posting.url)
    .bind(posting.discovered_at.to_rfc3339_opts(SecondsFormat::Micros, true))
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    Ok(Some(Posting {
        is_new: true,
        ..posting.clone()
    }))
}

/// Most recently found postings first.
pub async fn list_postings(pool: &SqlitePool, limit: u32) -> Result<Vec<Posting>> {
    let rows = sqlx::query(
        r"
        SELECT title, company, url, date_found, is_new
        FROM jobs
        ORDER BY date_found DESC, rowid DESC
        LIMIT ?
        ",
    )
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;
    rows.iter().map(posting_from_row).collect()
}

fn posting_from_row(row: &SqliteRow) -> Result<Posting> {
    let date_found: String = row.try_get("date_found")?;
    let discovered_at = DateTime::parse_from_rfc3339(&date_found)
        .map_err(|e| DatabaseError::Decode(format!("date_found '{date_found}': {e}")))?
        .with_timezone(&Utc);

    Ok(Posting {
        title: row.try_get("title")?,
        company_name: row.try_get("company")?,
        url: row.try_get("url")?,
        discovered_at,
        is_new: row.try_get("is_new")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use chrono::Duration;

    fn posting(title: &str, url: &str, at: DateTime<Utc>) -> Posting {
        Posting::new(title, "Acme", url, at)
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent_by_url() {
        let db = Database::in_memory().await.unwrap();
        let now = Utc::now();

        let first = upsert_posting(db.pool(), &posting("Engineer", "https://acme.example/1", now))
            .await
            .unwrap();
        let second = upsert_posting(
            db.pool(),
            &posting("Engineer (renamed)", "https://acme.example/1", now),
        )
        .await
        .unwrap();

        assert_eq!(first.map(|p| p.title).as_deref(), Some("Engineer"));
        assert!(second.is_none());
        assert_eq!(list_postings(db.pool(), 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_newest_first_with_limit() {
        let db = Database::in_memory().await.unwrap();
        let now = Utc::now();
        for (i, age) in [3, 1, 2].into_iter().enumerate() {
            let p = posting(
                &format!("Job {i}"),
                &format!("https://acme.example/{i}"),
                now - Duration::hours(age),
            );
            upsert_posting(db.pool(), &p).await.unwrap();
        }

        let titles: Vec<_> = list_postings(db.pool(), 2)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["Job 1", "Job 2"]);
    }
}
