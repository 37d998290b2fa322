//! Remote server probe: status, player list, and IP geolocation.
//!
//! This is the one piece of real retrieval policy in the bot. Every operation
//! is a single linear attempt with a hard timeout, no retries, and no state
//! shared between calls. Failures never escape as panics or unhandled faults;
//! each operation returns an explicit `Result` whose error renders as a
//! human-readable cause for the operator log.
//!
//! The player list uses a strict two-phase fallback:
//!
//! 1. The UDP query protocol (authoritative names, but feature-gated and
//!    frequently firewalled on the remote side).
//! 2. Only if phase 1 failed: the TCP status query, harvesting the
//!    opportunistic name sample its payload may carry.
//!
//! A phase-1 success with an empty name list is still an overall success
//! (zero players online); a phase-2 success with an empty sample is an
//! overall failure. That asymmetry is deliberate and load-bearing - see the
//! tests at the bottom of this module.

use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Default bound applied to each network attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Substituted for any geolocation field the endpoint omits.
const UNKNOWN_FIELD: &str = "Unknown";

/// Base URL of the public geolocation endpoint.
const GEO_ENDPOINT: &str = "https://ipinfo.io";

/// Failure taxonomy for everything the probe touches.
///
/// Rendering via `Display` produces the operator-facing cause; end users only
/// ever see the short messages the command layer writes itself.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Unreachable, refused, or resolved-but-unresponsive remote.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The hard timeout bound elapsed before the upstream answered.
    #[error("timed out: {0}")]
    Timeout(String),

    /// The query feature is not enabled remotely (or its UDP port is blocked).
    #[error("query protocol unavailable: {0}")]
    ProtocolDisabled(String),

    /// The upstream answered with an unexpected payload shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Phase 1 failed and the status payload carried no name sample.
    #[error("query failed ({query}); no sample names in status")]
    NoSampleNames {
        /// Why the query phase failed
        query: Box<ProbeError>,
    },

    /// Phase 1 failed and the status fallback itself failed too.
    #[error("query failed ({query}); status fallback failed ({status})")]
    FallbackFailed {
        /// Why the query phase failed
        query: Box<ProbeError>,
        /// Why the status phase failed
        status: Box<ProbeError>,
    },
}

/// Typed status payload from the upstream status query.
///
/// Optional upstream fields stay optional here; defaults are applied exactly
/// once, at the mapping boundary in [`ServerProbe::status`].
#[derive(Debug, Clone, Default)]
pub struct StatusPayload {
    /// Online player count, if the upstream reported one
    pub players_online: Option<u32>,
    /// Opportunistic, possibly-truncated player name sample
    pub sample: Vec<String>,
}

/// Seam over the two upstream game-server protocol operations.
///
/// The wire protocols themselves are collaborators, not reimplemented here;
/// production uses [`crate::core::upstream::McQueryBackend`], tests substitute
/// scripted fakes.
#[async_trait::async_trait]
pub trait ServerQuery: Send + Sync {
    /// TCP status query: reachability plus coarse metadata.
    async fn status(&self, host: &str, port: u16) -> Result<StatusPayload, ProbeError>;

    /// UDP full query: authoritative list of connected player names.
    /// Requires the query feature enabled remotely and the port reachable.
    async fn full_query(&self, host: &str, port: u16) -> Result<Vec<String>, ProbeError>;
}

/// Which mechanism produced a player roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterSource {
    /// The authoritative UDP query protocol
    Query,
    /// The name sample carried by the TCP status payload
    StatusSample,
}

impl std::fmt::Display for RosterSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::StatusSample => write!(f, "status_sample"),
        }
    }
}

/// Normalized outcome of a successful status probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Reported online player count (0 when the upstream omitted it)
    pub players_online: u32,
}

/// Normalized outcome of a successful player-list probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRoster {
    /// Player names in the order the upstream returned them (possibly empty)
    pub players: Vec<String>,
    /// Which phase produced the names
    pub source: RosterSource,
}

/// Normalized outcome of a successful geolocation lookup.
/// Every field is populated; omitted upstream fields become `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoInfo {
    /// City name
    pub city: String,
    /// Region or state
    pub region: String,
    /// Country code
    pub country: String,
    /// Owning organization / AS description
    pub organization: String,
}

/// Raw geolocation response body; all fields optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoPayload {
    /// City, if known
    pub city: Option<String>,
    /// Region, if known
    pub region: Option<String>,
    /// Country, if known
    pub country: Option<String>,
    /// Organization, if known
    pub org: Option<String>,
}

impl From<GeoPayload> for GeoInfo {
    fn from(payload: GeoPayload) -> Self {
        let or_unknown = |field: Option<String>| field.unwrap_or_else(|| UNKNOWN_FIELD.to_string());
        Self {
            city: or_unknown(payload.city),
            region: or_unknown(payload.region),
            country: or_unknown(payload.country),
            organization: or_unknown(payload.org),
        }
    }
}

/// Per-operation timeout bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTimeouts {
    /// Bound for the TCP status query
    pub status: Duration,
    /// Bound for the UDP full query
    pub query: Duration,
    /// Bound for the geolocation HTTP request
    pub geo: Duration,
}

impl Default for ProbeTimeouts {
    fn default() -> Self {
        Self {
            status: DEFAULT_TIMEOUT,
            query: DEFAULT_TIMEOUT,
            geo: DEFAULT_TIMEOUT,
        }
    }
}

/// Stateless probe over a remote game server and the geolocation endpoint.
///
/// Cheap to clone; every call opens and closes its own connection and no
/// state is retained between invocations.
#[derive(Clone)]
pub struct ServerProbe {
    query: Arc<dyn ServerQuery>,
    http: reqwest::Client,
    timeouts: ProbeTimeouts,
}

impl ServerProbe {
    /// Creates a probe over the given upstream backend and HTTP client.
    pub fn new(query: Arc<dyn ServerQuery>, http: reqwest::Client, timeouts: ProbeTimeouts) -> Self {
        Self { query, http, timeouts }
    }

    /// Applies the configured bound as a hard upper limit on an attempt,
    /// rather than trusting the upstream library's own default.
    async fn bounded<T, F>(limit: Duration, attempt: F) -> Result<T, ProbeError>
    where
        F: Future<Output = Result<T, ProbeError>>,
    {
        tokio::time::timeout(limit, attempt)
            .await
            .map_err(|_| ProbeError::Timeout(format!("no response within {limit:?}")))?
    }

    /// Queries basic server status: reachability and online player count.
    ///
    /// A missing player count in the upstream payload defaults to 0 here,
    /// once, so callers never deal with the optional field.
    pub async fn status(&self, host: &str, port: u16) -> Result<StatusSnapshot, ProbeError> {
        let payload = Self::bounded(self.timeouts.status, self.query.status(host, port)).await?;
        Ok(StatusSnapshot {
            players_online: payload.players_online.unwrap_or(0),
        })
    }

    /// Fetches the live player list via the two-phase fallback.
    ///
    /// Phase 1 targets `query_port` when provided, else `game_port`. Phase 2
    /// only runs after phase 1 has definitively failed - never in parallel,
    /// never as a retry of phase 1.
    pub async fn player_list(
        &self,
        host: &str,
        game_port: u16,
        query_port: Option<u16>,
    ) -> Result<PlayerRoster, ProbeError> {
        let port = query_port.unwrap_or(game_port);
        let query_err =
            match Self::bounded(self.timeouts.query, self.query.full_query(host, port)).await {
                // Success is defined purely by the call not failing: an empty
                // name list from the query protocol means zero players online.
                Ok(players) => {
                    return Ok(PlayerRoster {
                        players,
                        source: RosterSource::Query,
                    });
                }
                Err(err) => err,
            };

        match Self::bounded(self.timeouts.status, self.query.status(host, game_port)).await {
            Ok(payload) if !payload.sample.is_empty() => Ok(PlayerRoster {
                players: payload.sample,
                source: RosterSource::StatusSample,
            }),
            // An empty sample is a failure, unlike an empty query result:
            // the sample is best-effort, so "no names" proves nothing.
            Ok(_) => Err(ProbeError::NoSampleNames {
                query: Box::new(query_err),
            }),
            Err(status_err) => Err(ProbeError::FallbackFailed {
                query: Box::new(query_err),
                status: Box::new(status_err),
            }),
        }
    }

    /// Looks up geolocation info for an IP address via the public endpoint.
    pub async fn geo_lookup(&self, ip: &str) -> Result<GeoInfo, ProbeError> {
        let url = format!("{GEO_ENDPOINT}/{ip}/json");
        let response = self
            .http
            .get(&url)
            .timeout(self.timeouts.geo)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ProbeError::Timeout(format!("no response within {:?}", self.timeouts.geo))
                } else {
                    ProbeError::Connection(err.to_string())
                }
            })?;

        let payload: GeoPayload = response
            .json()
            .await
            .map_err(|err| ProbeError::Malformed(err.to_string()))?;

        Ok(GeoInfo::from(payload))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted [`ServerQuery`] fake with per-operation call counters.
    struct ScriptedQuery {
        query_outcome: QueryScript,
        status_outcome: StatusScript,
        query_calls: AtomicUsize,
        status_calls: AtomicUsize,
    }

    enum QueryScript {
        Names(Vec<&'static str>),
        Fail(&'static str),
        Hang,
    }

    enum StatusScript {
        Payload(StatusPayload),
        Fail(&'static str),
    }

    impl ScriptedQuery {
        fn new(query_outcome: QueryScript, status_outcome: StatusScript) -> Self {
            Self {
                query_outcome,
                status_outcome,
                query_calls: AtomicUsize::new(0),
                status_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl ServerQuery for ScriptedQuery {
        async fn status(&self, _host: &str, _port: u16) -> Result<StatusPayload, ProbeError> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            match &self.status_outcome {
                StatusScript::Payload(payload) => Ok(payload.clone()),
                StatusScript::Fail(cause) => Err(ProbeError::Connection((*cause).to_string())),
            }
        }

        async fn full_query(&self, _host: &str, _port: u16) -> Result<Vec<String>, ProbeError> {
            self.query_calls.fetch_add(1, Ordering::SeqCst);
            match &self.query_outcome {
                QueryScript::Names(names) => {
                    Ok(names.iter().map(|name| (*name).to_string()).collect())
                }
                QueryScript::Fail(cause) => {
                    Err(ProbeError::ProtocolDisabled((*cause).to_string()))
                }
                QueryScript::Hang => std::future::pending().await,
            }
        }
    }

    fn probe_over(fake: Arc<ScriptedQuery>, timeouts: ProbeTimeouts) -> ServerProbe {
        ServerProbe::new(fake, reqwest::Client::new(), timeouts)
    }

    #[tokio::test]
    async fn test_query_success_preserves_order_and_skips_fallback() {
        let fake = Arc::new(ScriptedQuery::new(
            QueryScript::Names(vec!["alice", "bob", "carol"]),
            // The status phase would also succeed - it must never be asked.
            StatusScript::Payload(StatusPayload {
                players_online: Some(3),
                sample: vec!["zeta".to_string()],
            }),
        ));
        let probe = probe_over(Arc::clone(&fake), ProbeTimeouts::default());

        let roster = probe.player_list("example.net", 25565, None).await.unwrap();

        assert_eq!(roster.source, RosterSource::Query);
        assert_eq!(roster.players, vec!["alice", "bob", "carol"]);
        assert_eq!(fake.query_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fake.status_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_query_success_is_success_with_zero_names() {
        let fake = Arc::new(ScriptedQuery::new(
            QueryScript::Names(vec![]),
            StatusScript::Payload(StatusPayload {
                players_online: Some(0),
                sample: vec!["ghost".to_string()],
            }),
        ));
        let probe = probe_over(Arc::clone(&fake), ProbeTimeouts::default());

        let roster = probe.player_list("example.net", 25565, None).await.unwrap();

        assert_eq!(roster.source, RosterSource::Query);
        assert!(roster.players.is_empty());
        assert_eq!(fake.status_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fallback_uses_status_sample_when_query_fails() {
        let fake = Arc::new(ScriptedQuery::new(
            QueryScript::Fail("udp port closed"),
            StatusScript::Payload(StatusPayload {
                players_online: Some(2),
                sample: vec!["dave".to_string(), "erin".to_string()],
            }),
        ));
        let probe = probe_over(Arc::clone(&fake), ProbeTimeouts::default());

        let roster = probe.player_list("example.net", 25565, Some(25566)).await.unwrap();

        assert_eq!(roster.source, RosterSource::StatusSample);
        assert_eq!(roster.players, vec!["dave", "erin"]);
        assert_eq!(fake.query_calls.load(Ordering::SeqCst), 1);
        assert_eq!(fake.status_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_sample_is_failure_mentioning_query_cause() {
        let fake = Arc::new(ScriptedQuery::new(
            QueryScript::Fail("udp port closed"),
            StatusScript::Payload(StatusPayload {
                players_online: Some(5),
                sample: vec![],
            }),
        ));
        let probe = probe_over(fake, ProbeTimeouts::default());

        let err = probe.player_list("example.net", 25565, None).await.unwrap_err();

        let message = err.to_string();
        assert!(message.contains("udp port closed"), "got: {message}");
        assert!(message.contains("no sample names"), "got: {message}");
    }

    #[tokio::test]
    async fn test_both_phases_failing_concatenates_causes() {
        let fake = Arc::new(ScriptedQuery::new(
            QueryScript::Fail("udp port closed"),
            StatusScript::Fail("connection refused"),
        ));
        let probe = probe_over(fake, ProbeTimeouts::default());

        let err = probe.player_list("example.net", 25565, None).await.unwrap_err();

        let message = err.to_string();
        assert!(message.contains("udp port closed"), "got: {message}");
        assert!(message.contains("connection refused"), "got: {message}");
    }

    #[tokio::test]
    async fn test_status_defaults_missing_player_count_to_zero() {
        let fake = Arc::new(ScriptedQuery::new(
            QueryScript::Names(vec![]),
            StatusScript::Payload(StatusPayload {
                players_online: None,
                sample: vec![],
            }),
        ));
        let probe = probe_over(fake, ProbeTimeouts::default());

        let snapshot = probe.status("example.net", 25565).await.unwrap();
        assert_eq!(snapshot.players_online, 0);
    }

    #[tokio::test]
    async fn test_status_failure_is_a_value_not_a_fault() {
        let fake = Arc::new(ScriptedQuery::new(
            QueryScript::Names(vec![]),
            StatusScript::Fail("host unreachable"),
        ));
        let probe = probe_over(fake, ProbeTimeouts::default());

        let err = probe.status("example.net", 25565).await.unwrap_err();
        assert!(err.to_string().contains("host unreachable"));
    }

    #[tokio::test]
    async fn test_hard_timeout_bounds_a_hanging_query() {
        let fake = Arc::new(ScriptedQuery::new(
            QueryScript::Hang,
            StatusScript::Fail("also down"),
        ));
        let timeouts = ProbeTimeouts {
            query: Duration::from_millis(20),
            status: Duration::from_millis(20),
            geo: DEFAULT_TIMEOUT,
        };
        let probe = probe_over(fake, timeouts);

        let err = probe.player_list("example.net", 25565, None).await.unwrap_err();
        assert!(err.to_string().contains("timed out"), "got: {err}");
    }

    #[test]
    fn test_geo_payload_missing_fields_become_unknown() {
        let payload: GeoPayload =
            serde_json::from_str(r#"{"city": "Ashburn", "region": "Virginia", "country": "US"}"#)
                .unwrap();
        let info = GeoInfo::from(payload);

        assert_eq!(info.city, "Ashburn");
        assert_eq!(info.region, "Virginia");
        assert_eq!(info.country, "US");
        assert_eq!(info.organization, "Unknown");
    }

    #[test]
    fn test_geo_payload_ignores_extra_fields() {
        let payload: GeoPayload = serde_json::from_str(
            r#"{"ip": "1.2.3.4", "city": "Reykjavik", "org": "AS1 Example", "loc": "64.1,-21.9"}"#,
        )
        .unwrap();
        let info = GeoInfo::from(payload);

        assert_eq!(info.city, "Reykjavik");
        assert_eq!(info.organization, "AS1 Example");
        assert_eq!(info.region, "Unknown");
        assert_eq!(info.country, "Unknown");
    }
}
