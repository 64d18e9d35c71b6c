use {
    crate::api::RestError,
    serde::Deserialize,
    sqlx::{
        Pool,
        Postgres,
    },
    std::{
        future::Future,
        time::Duration,
    },
    tracing::Instrument,
};

pub type DB = Pool<Postgres>;

/// Upper bounds for a single storage call. Calls are never retried.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Deadlines {
    #[serde(with = "humantime_serde", default = "Deadlines::default_read")]
    pub read:  Duration,
    #[serde(with = "humantime_serde", default = "Deadlines::default_write")]
    pub write: Duration,
}

impl Deadlines {
    fn default_read() -> Duration {
        Duration::from_secs(5)
    }

    fn default_write() -> Duration {
        Duration::from_secs(10)
    }
}

impl Default for Deadlines {
    fn default() -> Self {
        Self {
            read:  Self::default_read(),
            write: Self::default_write(),
        }
    }
}

/// Runs one storage call under `deadline` inside a `db_queries` metrics span.
///
/// The span reports `result = "error"` when the call fails in the driver or runs out of time.
pub async fn with_deadline<T, F>(
    deadline: Duration,
    operation: &'static str,
    future: F,
) -> Result<T, RestError>
where
    F: Future<Output = Result<T, RestError>>,
{
    let span = tracing::info_span!(
        target: "metrics",
        "db_query",
        category = "db_queries",
        name = operation,
        result = "success",
        tracing_enabled = true
    );
    match tokio::time::timeout(deadline, future)
        .instrument(span.clone())
        .await
    {
        Ok(result) => result,
        Err(_) => {
            span.record("result", "error");
            tracing::error!(
                operation,
                deadline = ?deadline,
                "Storage call did not complete within the deadline"
            );
            Err(RestError::DeadlineExceeded)
        }
    }
}

/// Maps a failed query to the storage error taxonomy and marks the current metrics span as failed.
///
/// Unique constraint violations are reported as conflicts with the given message.
pub fn query_error(e: sqlx::Error, conflict_message: impl FnOnce() -> String) -> RestError {
    tracing::Span::current().record("result", "error");
    let is_unique_violation = e
        .as_database_error()
        .map(|db_error| db_error.is_unique_violation())
        .unwrap_or(false);
    if is_unique_violation {
        return RestError::Conflict(conflict_message());
    }
    tracing::error!(error = e.to_string(), "DB: query failed");
    RestError::StorageError
}
