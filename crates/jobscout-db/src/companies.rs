//! Monitored career pages.

use crate::error::{DatabaseError, Result};
use jobscout_core::Target;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Add an active company after checking its careers URL.
pub async fn add_company(pool: &SqlitePool, name: &str, url: &str, kind: &str) -> Result<Target> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DatabaseError::Invalid("company name must not be empty".into()));
    }
    let target = Target::new(uuid::Uuid::new_v4().to_string(), name, url.trim())
        .map_err(|e| DatabaseError::Invalid(e.to_string()))?
        .with_kind(kind);

    sqlx::query("INSERT INTO companies (id, name, url, kind, active) VALUES (?, ?, ?, ?, 1)")
        .bind(&target.id)
        .bind(&target.name)
        .bind(&target.url)
        .bind(&target.kind)
        .execute(pool)
        .await?;

    tracing::debug!(company = %target, "Company added");
    Ok(target)
}

/// All companies ordered by name.
pub async fn list_companies(pool: &SqlitePool) -> Result<Vec<Target>> {
    let rows = sqlx::query("SELECT id, name, url, kind, active FROM companies ORDER BY name, id")
        .fetch_all(pool)
        .await?;
    rows.iter().map(company_from_row).collect()
}

pub async fn find_company_by_url(pool: &SqlitePool, url: &str) -> Result<Option<Target>> {
    let row = sqlx::query("SELECT id, name, url, kind, active FROM companies WHERE url = ?")
        .bind(url)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(company_from_row).transpose()
}

pub async fn set_company_active(pool: &SqlitePool, id: &str, active: bool) -> Result<()> {
    let result = sqlx::query("UPDATE companies SET active = ? WHERE id = ?")
        .bind(active)
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(format!("company {id} not found")));
    }
    Ok(())
}

pub async fn delete_company(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM companies WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(format!("company {id} not found")));
    }
    Ok(())
}

fn company_from_row(row: &SqliteRow) -> Result<Target> {
    Ok(Target {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        url: row.try_get("url")?,
        kind: row.try_get("kind")?,
        active: row.try_get("active")?,
    })
}
