//! Routing decision observer.
//!
//! The edge reports every decision to a [`RoutingObserver`]. The default
//! observer is silent; [`TracingObserver`] writes one structured debug
//! event per request.

use std::sync::Arc;

use crate::routing::RouteOutcome;

/// Structured view of one routing decision.
#[derive(Debug, Clone, Copy)]
pub struct RoutingEvent<'a> {
    pub request_id: &'a str,
    pub host: &'a str,
    pub path: &'a str,
    pub root_domain: &'a str,
    pub outcome: &'a RouteOutcome,
}

/// Receives routing decisions.
pub trait RoutingObserver: Send + Sync {
    fn on_decision(&self, event: &RoutingEvent<'_>);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RoutingObserver for NoopObserver {
    fn on_decision(&self, _event: &RoutingEvent<'_>) {}
}

/// Logs every decision through `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RoutingObserver for TracingObserver {
    fn on_decision(&self, event: &RoutingEvent<'_>) {
        let outcome = event.outcome;
        let rule = outcome
            .classification
            .as_ref()
            .map(|c| c.rule.as_str())
            .unwrap_or("excluded");

        tracing::debug!(
            request_id = %event.request_id,
            host = %event.host,
            path = %event.path,
            subdomain = ?outcome.subdomain(),
            rule = rule,
            decision = ?outcome.decision,
            root_domain = %event.root_domain,
            "Routing decision"
        );
    }
}

/// Observer selected by the `log_decisions` switch.
pub fn observer_for(log_decisions: bool) -> Arc<dyn RoutingObserver> {
    if log_decisions {
        Arc::new(TracingObserver)
    } else {
        Arc::new(NoopObserver)
    }
}
