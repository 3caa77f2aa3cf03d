//! # templater-render
//!
//! Tera-based template engine that renders template source text against a
//! process-wide [`RenderingContext`] (host, user, config values).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use templater_render::{ContextOverrides, RenderingContext, TemplateEngine};
//!
//! fn render_one(source: &str) {
//!     let ctx = RenderingContext::resolve(&ContextOverrides::default(), Default::default())
//!         .expect("context");
//!     if let Ok(engine) = TemplateEngine::new(&ctx) {
//!         match engine.render(source) {
//!             Ok(output) => println!("{output}"),
//!             Err(e) => eprintln!("{e}"),
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::{ContextOverrides, RenderingContext};
pub use engine::TemplateEngine;
pub use error::RenderError;
