//! JobScout Database Layer
//!
//! Provides `SQLite` storage for monitored companies, role keywords and
//! discovered postings. Uses `SQLx` with embedded migrations.
//!
//! # Example
//!
//! ```ignore
//! use jobscout_db::Database;
//!
//! let db = Database::new("jobscout.db").await?;
//! db.run_migrations().await?;
//! let companies = jobscout_db::companies::list_companies(db.pool()).await?;
//! ```
//!
//! # Design Principles
//!
//! - A posting's `url` is its identity; `jobs.url` is `UNIQUE`
//! - Inserts of known urls are no-ops, reported as `None`
//! - Migrations run before the store is handed to the scanner

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod companies;
pub mod connection;
pub mod error;
#[allow(missing_docs)]
pub mod jobs;
pub mod migrations;
#[allow(missing_docs)]
pub mod roles;

// Re-export commonly used types
pub use error::{DatabaseError, Result};

use async_trait::async_trait;
use jobscout_core::{JobStore, Posting, RoleFilter, SeedConfig, Target};
use sqlx::SqlitePool;
use std::path::Path;

/// Rows inserted by [`Database::seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Companies added
    pub companies: usize,
    /// Role keywords added
    pub roles: usize,
}

/// High-level database handle.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database file at `path`, creating it if missing.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let pool = connection::open_pool(path).await?;
        Ok(Self { pool })
    }

    /// Open a migrated in-memory database.
    pub async fn in_memory() -> Result<Self> {
        let db = Self {
            pool: connection::open_memory_pool().await?,
        };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Run all pending database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Version of the newest applied migration.
    pub async fn get_schema_version(&self) -> Result<i64> {
        migrations::get_schema_version(&self.pool).await
    }

    /// Get a reference to the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the connection pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }

    /// Insert configured companies and roles that are not stored yet.
    ///
    /// Companies are matched by url and roles by keyword, so seeding on every
    /// start is safe.
    pub async fn seed(&self, seed: &SeedConfig) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        for company in &seed.companies {
            if companies::find_company_by_url(&self.pool, company.url.trim())
                .await?
                .is_some()
            {
                continue;
            }
            companies::add_company(&self.pool, &company.name, &company.url, &company.kind).await?;
            report.companies += 1;
        }

        for keyword in &seed.roles {
            match roles::add_role(&self.pool, keyword).await {
                Ok(_) => report.roles += 1,
                Err(DatabaseError::Duplicate(_)) => {}
                Err(e) => return Err(e),
            }
        }

        if report != SeedReport::default() {
            tracing::info!(
                companies = report.companies,
                roles = report.roles,
                "Seeded database from config"
            );
        }
        Ok(report)
    }
}

#[async_trait]
impl JobStore for Database {
    async fn list_targets(&self) -> jobscout_core::Result<Vec<Target>> {
        Ok(companies::list_companies(&self.pool).await?)
    }

    async fn list_role_filters(&self) -> jobscout_core::Result<Vec<RoleFilter>> {
        Ok(roles::list_roles(&self.pool).await?)
    }

    async fn upsert_posting(&self, posting: &Posting) -> jobscout_core::Result<Option<Posting>> {
        Ok(jobs::upsert_posting(&self.pool, posting).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobscout_core::SeedCompany;

    #[tokio::test]
    async fn test_database_file_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("jobscout.db")).await.unwrap();
        db.run_migrations().await.unwrap();
        assert!(db.get_schema_version().await.unwrap() > 0);
        db.close().await;
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        let seed = SeedConfig {
            companies: vec![SeedCompany {
                name: "Globex".into(),
                url: "https://boards.greenhouse.io/globex".into(),
                kind: "greenhouse".into(),
            }],
            roles: vec!["Engineer".into(), "Designer".into()],
        };

        let first = db.seed(&seed).await.unwrap();
        let second = db.seed(&seed).await.unwrap();

        assert_eq!(first, SeedReport { companies: 1, roles: 2 });
        assert_eq!(second, SeedReport::default());
        assert_eq!(db.list_targets().await.unwrap().len(), 1);
        assert_eq!(db.list_role_filters().await.unwrap().len(), 2);
    }
}
