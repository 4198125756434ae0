//! PostgreSQL registration repository
//!
//! Registrations live as JSONB documents. The duplicate query is pushed down
//! to the database so only candidate matches cross the wire.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::registration::{
    DuplicateQuery, RegistrationId, TeamRegistration, TeamRegistrationRepository,
};
use crate::domain::storage::Storage;
use crate::domain::DomainError;
use crate::infrastructure::storage::{decode_row, PostgresStorage};

#[derive(Debug)]
pub struct PostgresTeamRegistrationRepository {
    storage: Arc<PostgresStorage<TeamRegistration>>,
}

impl PostgresTeamRegistrationRepository {
    pub fn new(storage: Arc<PostgresStorage<TeamRegistration>>) -> Self {
        Self { storage }
    }
}

/// `$1` team name, `$2` candidate emails, `$3` candidate SRNs
pub(crate) fn matching_sql(table_name: &str) -> String {
    format!(
        r#"
        SELECT data FROM {table}
        WHERE data->>'teamName' = $1
           OR data->'captain'->>'email' = ANY($2)
           OR data->'captain'->>'srn' = ANY($3)
           OR EXISTS (
               SELECT 1
               FROM jsonb_array_elements(COALESCE(data->'members', '[]'::jsonb)) AS m
               WHERE m->>'email' = ANY($2) OR m->>'srn' = ANY($3)
           )
        ORDER BY created_at
        "#,
        table = table_name
    )
}

#[async_trait]
impl TeamRegistrationRepository for PostgresTeamRegistrationRepository {
    async fn find_matching(
        &self,
        query: &DuplicateQuery,
    ) -> Result<Vec<TeamRegistration>, DomainError> {
        let sql = matching_sql(self.storage.table_name());
        let emails: Vec<String> = query.emails().iter().cloned().collect();
        let srns: Vec<String> = query.srns().iter().cloned().collect();

        let rows = sqlx::query(&sql)
            .bind(query.team_name())
            .bind(&emails)
            .bind(&srns)
            .fetch_all(self.storage.pool())
            .await
            .map_err(|e| DomainError::storage(format!("Failed to query registrations: {}", e)))?;

        rows.iter().map(decode_row::<TeamRegistration>).collect()
    }

    async fn create(
        &self,
        registration: TeamRegistration,
    ) -> Result<TeamRegistration, DomainError> {
        self.storage.create(registration).await
    }

    async fn get(&self, id: &RegistrationId) -> Result<Option<TeamRegistration>, DomainError> {
        self.storage.get(id).await
    }

    async fn list(&self) -> Result<Vec<TeamRegistration>, DomainError> {
        self.storage.list().await
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }
}
