//! The search view: one state machine, a controller that drives it, and two
//! renderers over a shared page model.

pub mod controller;
pub mod html;
pub mod model;
pub mod state;
pub mod terminal;

pub use controller::SearchController;
pub use html::HtmlRenderer;
pub use model::{PageModel, ViewContext};
pub use state::{ImageSlot, StateSummary, ViewEvent, ViewPhase, ViewState};
