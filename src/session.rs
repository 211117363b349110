//! Probe session state and lifecycle
//!
//! Holds the result-or-error outcome consumed by the presentation layer. The
//! state is reset wholesale at the start of each invocation and settled when
//! the probe resolves; at most one of result/error is set afterwards. The
//! in-flight flag is advisory: it gates the trigger, it is not a lock.

use crate::{
    error::ProbeError,
    models::{ProbePhase, ProbeRequest, ProbeResult},
    probe::LatencyProbe,
};

/// Per-session probe state, single-writer, overwritten wholesale by each run
#[derive(Debug, Default)]
pub struct ProbeSession {
    result: Option<ProbeResult>,
    error: Option<ProbeError>,
    in_flight: bool,
    phase: Option<ProbePhase>,
}

impl ProbeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successful result, if the previous run succeeded
    pub fn result(&self) -> Option<&ProbeResult> {
        self.result.as_ref()
    }

    /// Last error, if the previous run failed
    pub fn error(&self) -> Option<&ProbeError> {
        self.error.as_ref()
    }

    /// True only while a run is executing
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Lifecycle phase of the most recent invocation
    pub fn phase(&self) -> ProbePhase {
        self.phase.unwrap_or(ProbePhase::Idle)
    }

    /// Run one probe through this session.
    ///
    /// Clears any prior result and error before the attempt begins, then
    /// settles into exactly one of them. The in-flight flag is cleared on
    /// every exit path, success or failure.
    pub async fn run<P: LatencyProbe + ?Sized>(
        &mut self,
        probe: &P,
        request: &ProbeRequest,
    ) -> std::result::Result<ProbeResult, ProbeError> {
        self.result = None;
        self.error = None;
        self.in_flight = true;
        self.phase = Some(ProbePhase::Running);

        let outcome = probe.measure(request).await;

        match &outcome {
            Ok(result) => {
                self.result = Some(result.clone());
                self.phase = Some(ProbePhase::Succeeded);
            }
            Err(error) => {
                self.error = Some(error.clone());
                self.phase = Some(ProbePhase::Failed);
            }
        }
        self.in_flight = false;

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProbeMode;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Fake probe that replays scripted outcomes in order
    struct ScriptedProbe {
        outcomes: Mutex<VecDeque<Result<ProbeResult, ProbeError>>>,
    }

    impl ScriptedProbe {
        fn new(outcomes: Vec<Result<ProbeResult, ProbeError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
            }
        }
    }

    #[async_trait]
    impl LatencyProbe for ScriptedProbe {
        async fn measure(
            &self,
            _request: &ProbeRequest,
        ) -> Result<ProbeResult, ProbeError> {
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .expect("scripted probe ran out of outcomes")
        }
    }

    fn request() -> ProbeRequest {
        ProbeRequest::new("https://example.com", ProbeMode::Basic)
    }

    #[test]
    fn test_fresh_session_is_idle() {
        let session = ProbeSession::new();
        assert_eq!(session.phase(), ProbePhase::Idle);
        assert!(session.result().is_none());
        assert!(session.error().is_none());
        assert!(!session.in_flight());
    }

    #[test]
    fn test_success_settles_result_only() {
        let probe = ScriptedProbe::new(vec![Ok(ProbeResult::connection_only(12.5))]);
        let mut session = ProbeSession::new();

        let outcome = tokio_test::block_on(session.run(&probe, &request()));
        assert!(outcome.is_ok());
        assert_eq!(session.phase(), ProbePhase::Succeeded);
        assert_eq!(session.result().unwrap().connection_time_ms, 12.5);
        assert!(session.error().is_none());
        assert!(!session.in_flight());
    }

    #[tokio::test]
    async fn test_failure_settles_error_only() {
        let probe = ScriptedProbe::new(vec![Err(ProbeError::timeout(10))]);
        let mut session = ProbeSession::new();

        let outcome = session.run(&probe, &request()).await;
        assert!(outcome.is_err());
        assert_eq!(session.phase(), ProbePhase::Failed);
        assert!(session.result().is_none());
        assert!(session.error().unwrap().is_timeout());
        assert!(!session.in_flight());
    }

    #[tokio::test]
    async fn test_new_run_clears_previous_result_before_error() {
        let probe = ScriptedProbe::new(vec![
            Ok(ProbeResult::connection_only(8.0)),
            Err(ProbeError::network("connection refused")),
        ]);
        let mut session = ProbeSession::new();

        session.run(&probe, &request()).await.unwrap();
        assert!(session.result().is_some());

        session.run(&probe, &request()).await.unwrap_err();
        // Prior result must be gone, not merged with the new error
        assert!(session.result().is_none());
        assert!(session.error().is_some());
    }

    #[tokio::test]
    async fn test_in_flight_false_after_every_settled_invocation() {
        let probe = ScriptedProbe::new(vec![
            Ok(ProbeResult::connection_only(1.0)),
            Err(ProbeError::timeout(10)),
            Ok(ProbeResult::connection_only(2.0)),
            Err(ProbeError::network("dns failure")),
        ]);
        let mut session = ProbeSession::new();

        for _ in 0..4 {
            let _ = session.run(&probe, &request()).await;
            assert!(!session.in_flight());
            // Mutually exclusive after settling
            assert!(session.result().is_some() != session.error().is_some());
        }
    }
}
