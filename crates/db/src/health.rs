//! Database metrics reported by the health endpoint.

use serde::Serialize;

use crate::DbPool;

/// Postgres status block of the health payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PgHealth {
    pub status: &'static str,
    pub version: String,
    pub max_connections: i64,
    pub current_connections: i64,
}

impl PgHealth {
    /// Zero-valued block reported when the metrics query fails.
    pub fn down() -> Self {
        Self {
            status: "down",
            version: "unknown".to_string(),
            max_connections: 0,
            current_connections: 0,
        }
    }

    pub fn is_up(&self) -> bool {
        self.status == "up"
    }
}

/// Query connection limits, active connections on `database_name`, and the
/// server version.
///
/// Callers decide what a failure means; the health route degrades to
/// [`PgHealth::down`] instead of propagating it.
pub async fn pg_health(pool: &DbPool, database_name: &str) -> Result<PgHealth, sqlx::Error> {
    let (max_connections, current_connections, version): (i64, i64, String) = sqlx::query_as(
        "SELECT \
             (SELECT setting FROM pg_settings WHERE name = 'max_connections')::BIGINT, \
             (SELECT COUNT(*) FROM pg_stat_activity \
                 WHERE datname = $1 AND state = 'active'), \
             version()",
    )
    .bind(database_name)
    .fetch_one(pool)
    .await?;

    Ok(PgHealth {
        status: "up",
        version: short_version(&version),
        max_connections,
        current_connections,
    })
}

/// `"PostgreSQL 16.0 on x86_64-pc-linux-gnu, ..."` -> `"16.0"`.
fn short_version(full: &str) -> String {
    full.split_whitespace()
        .nth(1)
        .map(|v| v.trim_end_matches(',').to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_version_takes_second_token() {
        assert_eq!(
            short_version("PostgreSQL 16.0 on x86_64-pc-linux-gnu, compiled by gcc"),
            "16.0"
        );
        assert_eq!(short_version("PostgreSQL 15.4, compiled by Visual C++"), "15.4");
        assert_eq!(short_version("garbage"), "unknown");
    }

    #[test]
    fn down_block_is_zeroed() {
        let down = PgHealth::down();
        assert!(!down.is_up());
        assert_eq!(down.version, "unknown");
        assert_eq!(down.max_connections, 0);
        assert_eq!(down.current_connections, 0);
    }
}
