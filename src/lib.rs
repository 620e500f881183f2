//! seo_advisor
//!
//! A lightweight Rust library for submitting a page to an on-page SEO analysis
//! service and presenting the findings. Pairs with the `seo-advisor` CLI.
//!
//! ### Features
//! - Resolve free-form country names ("Germany", " united kingdom ", "IE") to two-letter codes
//! - Classify metrics against benchmarks (good / neutral / bad)
//! - Format metrics for display (percentages, seconds, grouped counts)
//! - One-request lifecycle with a 30s deadline and a busy guard
//!
//! ### Example
//! ```no_run
//! use seo_advisor::{FormInput, Lifecycle, Settings, SubmitOutcome};
//! use seo_advisor::render::{AnalysisView, RenderSurface, render_text};
//!
//! struct Stdout;
//! impl RenderSurface for Stdout {
//!     fn set_busy(&mut self, _busy: bool) {}
//!     fn show_results(&mut self, view: &AnalysisView) { print!("{}", render_text(view)); }
//!     fn hide_results(&mut self) {}
//!     fn show_error(&mut self, message: &str) { eprintln!("{}", message); }
//! }
//!
//! # async fn run() {
//! let lifecycle = Lifecycle::new(Settings::default());
//! let form = FormInput::new("https://example.com", "running shoes", "United Kingdom");
//! let outcome = lifecycle.submit(&form, &mut Stdout).await;
//! assert!(!matches!(outcome, SubmitOutcome::Busy));
//! # }
//! ```

pub mod api;
pub mod config;
pub mod country;
pub mod error;
pub mod lifecycle;
pub mod metrics;
pub mod models;
pub mod render;

pub use api::Client;
pub use config::Settings;
pub use error::AnalysisError;
pub use lifecycle::{FormInput, Lifecycle, LifecycleState, SubmitOutcome};
pub use metrics::{Direction, FormatKind, MetricStatus};
