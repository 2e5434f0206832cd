// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the Faros controller.
//!
//! This module provides metrics collection with the namespace prefix
//! `faros_pusher_com_` (prometheus-safe version of "faros.pusher.com").
//!
//! # Metrics Categories
//!
//! - **Status Metrics** - Track status writes issued and skipped
//! - **Dry-Run Metrics** - Track capability probes, the tier that answered, and failures
//!
//! # Example
//!
//! ```rust,no_run
//! use faros::metrics::{gather_metrics, record_status_updated};
//!
//! record_status_updated();
//! let text = gather_metrics().unwrap();
//! ```

use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::sync::LazyLock;
use std::time::Duration;

// ============================================================================
// Metric Name Constants
// ============================================================================

/// Namespace prefix for all Faros metrics (prometheus-safe)
const METRICS_NAMESPACE: &str = "faros_pusher_com";

// ============================================================================
// Global Metrics Registry
// ============================================================================

/// Global Prometheus metrics registry
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// ============================================================================
// Status Metrics
// ============================================================================

/// Total number of status reconciliations by outcome
///
/// Labels:
/// - `result`: Outcome (`updated`, `unchanged`, `error`)
pub static STATUS_UPDATES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_status_updates_total"),
        "Total number of GitTrackObject status reconciliations by outcome",
    );
    let counter = CounterVec::new(opts, &["result"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Dry-Run Metrics
// ============================================================================

/// Total number of dry-run capability probes that reached a decision
///
/// Labels:
/// - `source`: Tier that decided (`explicit_match`, `namespace_heuristic`, `crd_lookup`)
/// - `outcome`: Decision (`supported`, `unsupported`)
pub static DRY_RUN_PROBES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_dry_run_probes_total"),
        "Total number of dry-run capability probes by deciding tier and outcome",
    );
    let counter = CounterVec::new(opts, &["source", "outcome"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Total number of dry-run capability probes that failed
///
/// Labels:
/// - `error_type`: Category of error (`schema_fetch`, `crd_lookup`)
pub static DRY_RUN_ERRORS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_dry_run_errors_total"),
        "Total number of failed dry-run capability probes by error category",
    );
    let counter = CounterVec::new(opts, &["error_type"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of dry-run capability probes in seconds
///
/// Labels:
/// - `source`: Tier that decided, or `error`
pub static DRY_RUN_PROBE_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_dry_run_probe_duration_seconds"),
        "Duration of dry-run capability probes in seconds",
    )
    .buckets(vec![0.001, 0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]);
    let histogram = HistogramVec::new(opts, &["source"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

// ============================================================================
// Helper Functions
// ============================================================================

/// Record a status write
pub fn record_status_updated() {
    STATUS_UPDATES_TOTAL.with_label_values(&["updated"]).inc();
}

/// Record a skipped status write
pub fn record_status_unchanged() {
    STATUS_UPDATES_TOTAL.with_label_values(&["unchanged"]).inc();
}

/// Record a failed status write
pub fn record_status_error() {
    STATUS_UPDATES_TOTAL.with_label_values(&["error"]).inc();
}

/// Record a dry-run probe decision
///
/// # Arguments
/// * `source` - Tier that decided
/// * `supported` - The decision
/// * `duration` - Time spent probing
pub fn record_dry_run_decision(source: &str, supported: bool, duration: Duration) {
    let outcome = if supported { "supported" } else { "unsupported" };
    DRY_RUN_PROBES_TOTAL
        .with_label_values(&[source, outcome])
        .inc();
    DRY_RUN_PROBE_DURATION_SECONDS
        .with_label_values(&[source])
        .observe(duration.as_secs_f64());
}

/// Record a failed dry-run probe
///
/// # Arguments
/// * `error_type` - Category of error
/// * `duration` - Time spent probing
pub fn record_dry_run_error(error_type: &str, duration: Duration) {
    DRY_RUN_ERRORS_TOTAL.with_label_values(&[error_type]).inc();
    DRY_RUN_PROBE_DURATION_SECONDS
        .with_label_values(&["error"])
        .observe(duration.as_secs_f64());
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Errors
/// Returns error if encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_status_outcomes() {
        let updated = STATUS_UPDATES_TOTAL.with_label_values(&["updated"]).get();
        let unchanged = STATUS_UPDATES_TOTAL.with_label_values(&["unchanged"]).get();

        record_status_updated();
        record_status_unchanged();

        assert!(STATUS_UPDATES_TOTAL.with_label_values(&["updated"]).get() > updated);
        assert!(STATUS_UPDATES_TOTAL.with_label_values(&["unchanged"]).get() > unchanged);
    }

    #[test]
    fn test_record_dry_run_decision() {
        record_dry_run_decision("crd_lookup", true, Duration::from_millis(20));

        let counter = DRY_RUN_PROBES_TOTAL.with_label_values(&["crd_lookup", "supported"]);
        assert!(counter.get() > 0.0);

        let histogram = DRY_RUN_PROBE_DURATION_SECONDS.with_label_values(&["crd_lookup"]);
        assert!(histogram.get_sample_count() > 0);
    }

    #[test]
    fn test_record_dry_run_error() {
        record_dry_run_error("schema_fetch", Duration::from_millis(5));

        let counter = DRY_RUN_ERRORS_TOTAL.with_label_values(&["schema_fetch"]);
        assert!(counter.get() > 0.0);
    }

    #[test]
    fn test_gather_metrics() {
        record_status_error();

        let metrics_text = gather_metrics().unwrap();
        assert!(
            metrics_text.contains("faros_pusher_com"),
            "Metrics should contain namespace prefix"
        );
        assert!(
            metrics_text.contains("status_updates_total"),
            "Metrics should contain status counter"
        );
    }
}
