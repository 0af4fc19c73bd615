//! Job repository

use async_trait::async_trait;
use jobly_common::{Error, RepositoryError, Result};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{not_found, JobStore};
use crate::domain::entities::{Job, JobUpdate, JobWithCompany, NewJob};
use crate::domain::search::JobFilters;

const JOB_WITH_COMPANY_SELECT: &str = r#"
    SELECT j.id, j.title, j.salary, j.equity, j.company_handle, c.name AS company_name
    FROM jobs j
    JOIN companies c ON c.handle = j.company_handle
"#;

#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Build the search query for `filters`
pub(crate) fn search_query(filters: &JobFilters) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(JOB_WITH_COMPANY_SELECT);

    if !filters.is_empty() {
        query.push(" WHERE ");
        let mut conditions = query.separated(" AND ");

        if let Some(min_salary) = filters.min_salary {
            conditions.push("j.salary >= ");
            conditions.push_bind_unseparated(min_salary);
        }
        if filters.has_equity {
            conditions.push("j.equity > 0");
        }
        if let Some(title) = &filters.title {
            conditions.push("j.title ILIKE ");
            conditions.push_bind_unseparated(like_pattern(title));
        }
    }

    query.push(" ORDER BY j.title, j.id");
    query
}

/// Build the partial update for job `id`; `None` when nothing would change
pub(crate) fn update_query(id: i32, data: &JobUpdate) -> Option<QueryBuilder<'static, Postgres>> {
    if data.is_empty() {
        return None;
    }

    let mut query = QueryBuilder::new("UPDATE jobs SET ");
    let mut assignments = query.separated(", ");

    if let Some(title) = &data.title {
        assignments.push("title = ");
        assignments.push_bind_unseparated(title.clone());
    }
    if let Some(salary) = data.salary {
        assignments.push("salary = ");
        assignments.push_bind_unseparated(salary);
    }
    if let Some(equity) = data.equity {
        assignments.push("equity = ");
        assignments.push_bind_unseparated(equity);
    }

    query.push(" WHERE id = ");
    query.push_bind(id);
    query.push(" RETURNING id, title, salary, equity, company_handle");
    Some(query)
}

/// Wrap `title` for a substring `ILIKE`, escaping LIKE metacharacters
pub(crate) fn like_pattern(title: &str) -> String {
    let mut pattern = String::with_capacity(title.len() + 2);
    pattern.push('%');
    for c in title.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl JobStore for JobRepository {
    async fn create(&self, data: NewJob) -> Result<Job> {
        let row = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (title, salary, equity, company_handle)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, salary, equity, company_handle
            "#,
        )
        .bind(&data.title)
        .bind(data.salary)
        .bind(data.equity)
        .bind(&data.company_handle)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            RepositoryError::classify(e, || format!("No company: {}", data.company_handle))
        })?;
        Ok(row)
    }

    async fn find_all(&self, filters: &JobFilters) -> Result<Vec<JobWithCompany>> {
        let rows = search_query(filters)
            .build_query_as::<JobWithCompany>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<JobWithCompany> {
        let row = sqlx::query_as::<_, JobWithCompany>(&format!(
            "{} WHERE j.id = $1",
            JOB_WITH_COMPANY_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: JobUpdate) -> Result<Job> {
        let mut query = update_query(id, &data).ok_or_else(|| Error::bad_request("No data"))?;
        let row = query
            .build_query_as::<Job>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(row)
    }

    async fn remove(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id).into());
        }
        Ok(())
    }
}
