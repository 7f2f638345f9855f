use crate::catalog::{ComparisonResult, InfographicImage};
use crate::error::ViewError;
use serde::Serialize;
use strum::Display;

/// The single view state. Each variant carries exactly the data renderable in
/// that phase, so an error can never coexist with a result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Idle,
    /// `result` is filled once the comparison arrives; the infographic is
    /// still being generated at that point.
    Loading { result: Option<ComparisonResult> },
    Loaded {
        result: ComparisonResult,
        image: Option<InfographicImage>,
    },
    Errored { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ViewPhase {
    Idle,
    Loading,
    Loaded,
    Errored,
}

#[derive(Debug)]
pub enum ViewEvent {
    SearchStarted,
    ComparisonLoaded(ComparisonResult),
    ComparisonFailed { message: String },
    InfographicResolved(Option<InfographicImage>),
}

/// What the infographic panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot<'a> {
    /// No result yet, so no panel at all.
    Hidden,
    Image(&'a InfographicImage),
    /// Placeholder while the image request is in flight.
    Generating,
    /// Placeholder once the search finished without an image.
    Unavailable,
}

/// JSON-friendly view of the state without the image payload.
#[derive(Debug, Serialize)]
pub struct StateSummary<'a> {
    pub phase: ViewPhase,
    pub trigger_enabled: bool,
    pub result: Option<&'a ComparisonResult>,
    pub has_image: bool,
    pub error: Option<&'a str>,
}

impl ViewState {
    pub fn phase(&self) -> ViewPhase {
        match self {
            Self::Idle => ViewPhase::Idle,
            Self::Loading { .. } => ViewPhase::Loading,
            Self::Loaded { .. } => ViewPhase::Loaded,
            Self::Errored { .. } => ViewPhase::Errored,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// The search trigger is disabled exactly while loading.
    pub fn trigger_enabled(&self) -> bool {
        !self.is_loading()
    }

    pub fn result(&self) -> Option<&ComparisonResult> {
        match self {
            Self::Loading { result } => result.as_ref(),
            Self::Loaded { result, .. } => Some(result),
            Self::Idle | Self::Errored { .. } => None,
        }
    }

    pub fn image(&self) -> Option<&InfographicImage> {
        match self {
            Self::Loaded { image, .. } => image.as_ref(),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Errored { message } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn image_slot(&self) -> ImageSlot<'_> {
        match self {
            Self::Loading { result: Some(_) } => ImageSlot::Generating,
            Self::Loaded { image: Some(image), .. } => ImageSlot::Image(image),
            Self::Loaded { image: None, .. } => ImageSlot::Unavailable,
            Self::Idle | Self::Loading { result: None } | Self::Errored { .. } => {
                ImageSlot::Hidden
            }
        }
    }

    pub fn summary(&self) -> StateSummary<'_> {
        StateSummary {
            phase: self.phase(),
            trigger_enabled: self.trigger_enabled(),
            result: self.result(),
            has_image: self.image().is_some(),
            error: self.error_message(),
        }
    }

    /// Apply one transition in place.
    ///
    /// Starting a search clears any previous result, image or error. Events
    /// that do not belong to the current phase leave the state untouched.
    pub fn apply(&mut self, event: ViewEvent) -> Result<(), ViewError> {
        if self.is_loading() && matches!(event, ViewEvent::SearchStarted) {
            return Err(ViewError::SearchInProgress);
        }

        *self = match (std::mem::take(self), event) {
            (_, ViewEvent::SearchStarted) => Self::Loading { result: None },
            (Self::Loading { result: None }, ViewEvent::ComparisonLoaded(result)) => {
                Self::Loading {
                    result: Some(result),
                }
            }
            (Self::Loading { result: None }, ViewEvent::ComparisonFailed { message }) => {
                Self::Errored { message }
            }
            (Self::Loading { result: Some(result) }, ViewEvent::InfographicResolved(image)) => {
                Self::Loaded { result, image }
            }
            (state, event) => {
                tracing::warn!(phase = %state.phase(), ?event, "ignoring out-of-phase view event");
                state
            }
        };
        Ok(())
    }
}
