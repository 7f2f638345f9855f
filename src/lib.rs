#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "en");

pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod prompt;
pub mod providers;
pub mod services;
pub mod ui;
pub mod view;

pub use config::Config;
pub use error::{HubError, Result};
