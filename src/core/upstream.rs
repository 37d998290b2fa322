//! Production [`ServerQuery`] backend over the `mc-query` crate.
//!
//! The status and query wire protocols are collaborators owned by `mc-query`;
//! this module only maps its payloads and I/O failures into the probe's
//! types. The probe applies its own hard timeout around every call, so the
//! backend performs plain, unbounded protocol calls.

use crate::core::probe::{ProbeError, ServerQuery, StatusPayload};
use std::io::ErrorKind;

/// Stateless backend delegating to `mc_query::status` and
/// `mc_query::query::stat_full`.
#[derive(Debug, Default, Clone, Copy)]
pub struct McQueryBackend;

#[async_trait::async_trait]
impl ServerQuery for McQueryBackend {
    async fn status(&self, host: &str, port: u16) -> Result<StatusPayload, ProbeError> {
        let response = mc_query::status(host, port).await.map_err(map_status_error)?;
        let sample = response
            .players
            .sample
            .unwrap_or_default()
            .into_iter()
            .map(|player| player.name)
            .collect();
        #[allow(clippy::cast_possible_truncation, clippy::unnecessary_cast)]
        let players_online = Some(response.players.online as u32);
        Ok(StatusPayload { players_online, sample })
    }

    async fn full_query(&self, host: &str, port: u16) -> Result<Vec<String>, ProbeError> {
        let stat = mc_query::query::stat_full(host, port)
            .await
            .map_err(map_query_error)?;
        Ok(stat.players)
    }
}

fn map_status_error(err: std::io::Error) -> ProbeError {
    match err.kind() {
        ErrorKind::TimedOut | ErrorKind::WouldBlock => ProbeError::Timeout(err.to_string()),
        ErrorKind::InvalidData | ErrorKind::UnexpectedEof => ProbeError::Malformed(err.to_string()),
        _ => ProbeError::Connection(err.to_string()),
    }
}

fn map_query_error(err: std::io::Error) -> ProbeError {
    // A refused UDP port almost always means enable-query is off remotely.
    if err.kind() == ErrorKind::ConnectionRefused {
        ProbeError::ProtocolDisabled(err.to_string())
    } else {
        map_status_error(err)
    }
}
