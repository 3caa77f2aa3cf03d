//! Tera rendering engine — one-off evaluation of template source text.

use tera::Tera;

use crate::context::RenderingContext;
use crate::error::RenderError;

/// Tera-based engine bound to a resolved [`RenderingContext`].
///
/// The tera context is converted once at construction and reused for every
/// template in a run. Create once with [`TemplateEngine::new`] and reuse.
pub struct TemplateEngine {
    tera_ctx: tera::Context,
}

impl TemplateEngine {
    /// Construct a new [`TemplateEngine`] from a resolved context.
    pub fn new(ctx: &RenderingContext) -> Result<Self, RenderError> {
        Ok(TemplateEngine { tera_ctx: ctx.to_tera_context()? })
    }

    /// Render `source` against the engine's context.
    ///
    /// Autoescaping is disabled; outputs are config files, not HTML. Parse
    /// and evaluation failures surface as [`RenderError`] — callers running
    /// a scan must treat them as per-file failures and continue.
    pub fn render(&self, source: &str) -> Result<String, RenderError> {
        Tera::one_off(source, &self.tera_ctx, false).map_err(RenderError::from)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
