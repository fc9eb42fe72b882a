// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive per-residue validation panel for iteratively refined
//! macromolecular models.
//!
//! The panel compares residue-level quality metrics across model versions.
//! It summarizes each continuous metric's distribution as a boxplot, maps
//! percentiles into the drawn report's pixel space and keeps a chain /
//! residue / version selection in sync with the report's SVG elements.
//!
//! # Key entry points
//!
//! - [`engine::Panel`] - owns the data and selection, executes commands
//! - [`engine::PanelCommand`] - the interactive vocabulary
//! - [`render::RenderTarget`] - the seam to the drawn report
//! - [`options::PanelOptions`] - runtime configuration (rings, badges, bars,
//!   label placement, startup version)
//!
//! # Architecture
//!
//! Construction validates the model data, resolves the metric layout,
//! summarizes every bar metric for every version and calibrates the
//! coordinate mapper from the report geometry. After that each command is
//! one atomic selection transition followed by an infallible redraw that
//! cascades version → chain → residue.
//!
//! With the `web` feature, `render::dom::DomTarget` drives the live SVG
//! document and `engine::web::WebPanel` exposes the panel to JavaScript.

pub mod coords;
pub mod engine;
pub mod error;
pub mod model;
pub mod options;
pub mod render;
pub mod selection;
pub mod summary;
pub mod util;

pub use engine::{Panel, PanelCommand};
pub use error::IrisError;
