//! Concurrent polling of several servers.

use crate::network::{query_server, QueryError};
use log::{debug, error};
use shared::{QueryTarget, ServerStatus};
use std::time::Duration;

/// Outcome of querying one named target.
#[derive(Debug)]
pub struct PollResult {
    pub name: String,
    pub target: QueryTarget,
    pub result: Result<ServerStatus, QueryError>,
}

/// Queries every target on its own task, each with its own `deadline`.
///
/// Results come back in input order once every query has finished or
/// timed out.
pub async fn poll_all(targets: Vec<(String, QueryTarget)>, deadline: Duration) -> Vec<PollResult> {
    debug!("Polling {} servers", targets.len());

    let handles: Vec<_> = targets
        .into_iter()
        .map(|(name, target)| {
            tokio::spawn(async move {
                let result = query_server(&target, deadline).await;
                PollResult {
                    name,
                    target,
                    result,
                }
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(result) => results.push(result),
            Err(e) => error!("Poll task panicked: {}", e),
        }
    }

    results
}
