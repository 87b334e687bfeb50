use sea_orm::DatabaseConnection;

use crate::common::{DatabaseError, DatabaseResult};

/// Check that the database answers a round-trip ping.
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    db.ping()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}
