use super::state::{ViewEvent, ViewState};
use crate::catalog::ComparisonResult;
use crate::error::{HubError, ViewError};
use crate::services::ComparisonService;
use std::sync::Arc;
use tokio::sync::watch;

/// Outcome of the comparison step. The infographic step cannot fail from
/// the controller's point of view, so it has no counterpart.
enum ComparisonStep {
    Ready(ComparisonResult),
    Failed(HubError),
}

impl From<crate::error::Result<ComparisonResult>> for ComparisonStep {
    fn from(result: crate::error::Result<ComparisonResult>) -> Self {
        match result {
            Ok(result) => Self::Ready(result),
            Err(e) => Self::Failed(e),
        }
    }
}

/// Owns the view state and runs the triggered-search sequence.
///
/// Cloning is cheap; all clones share one state. Watchers get every
/// transition through [`SearchController::subscribe`].
#[derive(Clone)]
pub struct SearchController {
    service: Arc<dyn ComparisonService>,
    state: Arc<watch::Sender<ViewState>>,
    error_message: Arc<str>,
}

impl SearchController {
    /// `error_message` is the fixed text shown when the comparison fails.
    pub fn new(service: Arc<dyn ComparisonService>, error_message: impl Into<String>) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            service,
            state: Arc::new(state),
            error_message: Arc::from(error_message.into()),
        }
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    fn transition(&self, event: ViewEvent) -> Result<(), ViewError> {
        let mut outcome = Ok(());
        self.state.send_if_modified(|state| {
            outcome = state.apply(event);
            outcome.is_ok()
        });
        outcome
    }

    /// Enter `Loading`, clearing the previous result, image and error.
    ///
    /// Fails with [`ViewError::SearchInProgress`] while a search is running.
    pub fn begin(&self) -> Result<(), ViewError> {
        self.transition(ViewEvent::SearchStarted)?;
        tracing::info!("search started");
        Ok(())
    }

    /// Run the two calls of a search already started with [`Self::begin`]
    /// and return the final state.
    ///
    /// Without a preceding `begin` nothing is requested and the current
    /// state is returned as is.
    pub async fn run(&self) -> ViewState {
        let started = matches!(*self.state.borrow(), ViewState::Loading { result: None });
        if !started {
            let state = self.snapshot();
            tracing::warn!(phase = %state.phase(), "run called without a started search");
            return state;
        }

        match ComparisonStep::from(self.service.request_comparison().await) {
            ComparisonStep::Failed(e) => {
                tracing::error!("comparison request failed: {e}");
                self.apply_or_log(ViewEvent::ComparisonFailed {
                    message: self.error_message.to_string(),
                });
            }
            ComparisonStep::Ready(result) => {
                let shoes = result.shoes.clone();
                self.apply_or_log(ViewEvent::ComparisonLoaded(result));

                let image = self.service.request_infographic(&shoes).await;
                self.apply_or_log(ViewEvent::InfographicResolved(image));
            }
        }

        let state = self.snapshot();
        tracing::info!(phase = %state.phase(), "search finished");
        state
    }

    /// [`Self::begin`] followed by [`Self::run`].
    pub async fn search(&self) -> Result<ViewState, ViewError> {
        self.begin()?;
        Ok(self.run().await)
    }

    fn apply_or_log(&self, event: ViewEvent) {
        if let Err(e) = self.transition(event) {
            tracing::warn!("view transition rejected: {e}");
        }
    }
}
