//! Role keywords.

use crate::error::{DatabaseError, Result};
use jobscout_core::RoleFilter;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Add an active role keyword. Keywords are unique.
pub async fn add_role(pool: &SqlitePool, keyword: &str) -> Result<RoleFilter> {
    let role = RoleFilter::new(uuid::Uuid::new_v4().to_string(), keyword.trim())
        .map_err(|e| DatabaseError::Invalid(e.to_string()))?;

    sqlx::query("INSERT INTO roles (id, keyword, active) VALUES (?, ?, 1)")
        .bind(&role.id)
        .bind(&role.keyword)
        .execute(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                DatabaseError::Duplicate(format!("role '{}'", role.keyword))
            }
            other => other.into(),
        })?;

    Ok(role)
}

/// All role keywords ordered by keyword.
pub async fn list_roles(pool: &SqlitePool) -> Result<Vec<RoleFilter>> {
    let rows = sqlx::query("SELECT id, keyword, active FROM roles ORDER BY keyword, id")
        .fetch_all(pool)
        .await?;
    rows.iter().map(role_from_row).collect()
}

pub async fn set_role_active(pool: &SqlitePool, id: &str, active: bool) -> Result<()> {
    let result = sqlx::query("UPDATE roles SET active = ? WHERE id = ?")
        .bind(active)
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(format!("role {id} not found")));
    }
    Ok(())
}

pub async fn delete_role(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM roles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(format!("role {id} not found")));
    }
    Ok(())
}

fn role_from_row(row: &SqliteRow) -> Result<RoleFilter> {
    Ok(RoleFilter {
        id: row.try_get("id")?,
        keyword: row.try_get("keyword")?,
        active: row.try_get("active")?,
    })
}
