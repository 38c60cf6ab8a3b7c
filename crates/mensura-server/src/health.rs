//! Liveness and readiness probes.
//!
//! `/health` answers as long as the process serves requests and reports the
//! size of the unit catalog. `/ready` turns `503` once shutdown begins or a
//! registered check fails.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Body of the `/health` response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthStatus {
    /// Always `"healthy"`: an answer at all means the process is alive.
    pub status: &'static str,
    /// Service name from the telemetry settings.
    pub service: String,
    /// Crate version.
    pub version: String,
    /// Units in the catalog.
    pub units: usize,
    /// Start time, RFC 3339 in UTC.
    pub started_at: String,
    /// Whole seconds since start.
    pub uptime_seconds: u64,
}

/// Liveness probe.
///
/// ```
/// use mensura_server::HealthCheck;
///
/// let status = HealthCheck::new("mensura", "0.1.0").units(42).status();
/// assert_eq!(status.status, "healthy");
/// assert_eq!(status.units, 42);
/// ```
#[derive(Debug, Clone)]
pub struct HealthCheck {
    service: String,
    version: String,
    units: usize,
    clock: Instant,
    started_at: DateTime<Utc>,
}

impl HealthCheck {
    /// Starts the uptime clock.
    #[must_use]
    pub fn new(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
            units: 0,
            clock: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Sets the catalog size reported with every status.
    #[must_use]
    pub fn units(mut self, units: usize) -> Self {
        self.units = units;
        self
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy",
            service: self.service.clone(),
            version: self.version.clone(),
            units: self.units,
            started_at: self.started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            uptime_seconds: self.clock.elapsed().as_secs(),
        }
    }
}

/// Body of the `/ready` response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReadinessStatus {
    /// Accepting traffic and every check passed.
    pub ready: bool,
    /// Cleared once shutdown begins.
    pub accepting: bool,
    /// Result of each named check.
    pub checks: BTreeMap<String, bool>,
}

impl ReadinessStatus {
    /// Whether traffic should be routed here.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

#[derive(Clone)]
struct NamedCheck {
    name: String,
    run: Arc<dyn Fn() -> bool + Send + Sync>,
}

/// Readiness probe: an accepting flag plus named checks.
///
/// Clones share the flag, so the server can withdraw readiness from the copy
/// the handlers answer with.
#[derive(Clone)]
pub struct ReadinessCheck {
    accepting: Arc<AtomicBool>,
    checks: Vec<NamedCheck>,
}

impl fmt::Debug for ReadinessCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.checks.iter().map(|c| c.name.as_str()).collect();
        f.debug_struct("ReadinessCheck")
            .field("accepting", &self.accepting.load(Ordering::Acquire))
            .field("checks", &names)
            .finish()
    }
}

impl ReadinessCheck {
    /// Accepting, with no checks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accepting: Arc::new(AtomicBool::new(true)),
            checks: Vec::new(),
        }
    }

    /// Adds a named check, run on every probe.
    ///
    /// ```
    /// use mensura_server::ReadinessCheck;
    ///
    /// let status = ReadinessCheck::new()
    ///     .add_check("unit_catalog", || true)
    ///     .add_check("assets", || false)
    ///     .status();
    /// assert!(!status.is_ready());
    /// assert!(status.checks["unit_catalog"]);
    /// ```
    #[must_use]
    pub fn add_check<F>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.checks.push(NamedCheck {
            name: name.into(),
            run: Arc::new(check),
        });
        self
    }

    /// Whether the flag is set and every check passes.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status().ready
    }

    /// Runs every check.
    #[must_use]
    pub fn status(&self) -> ReadinessStatus {
        let accepting = self.accepting.load(Ordering::Acquire);
        let checks: BTreeMap<String, bool> = self
            .checks
            .iter()
            .map(|c| (c.name.clone(), (c.run)()))
            .collect();
        let ready = accepting && checks.values().all(|&passed| passed);

        ReadinessStatus {
            ready,
            accepting,
            checks,
        }
    }

    /// Sets the accepting flag; the server clears it when shutdown begins.
    pub fn set_ready(&self, accepting: bool) {
        self.accepting.store(accepting, Ordering::Release);
    }
}

impl Default for ReadinessCheck {
    fn default() -> Self {
        Self::new()
    }
}
