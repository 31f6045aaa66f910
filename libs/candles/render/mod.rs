//! Rendering
//!
//! A poll cycle turns records into a [`RenderPlan`] with a pure function and
//! then hands the plan to a [`RenderTarget`], which replaces whatever it was
//! showing. Targets never patch their contents incrementally.

mod board;
mod html;
mod plan;

pub use board::MemoryBoard;
pub use html::{escape_text, render_container, HtmlFileTarget, HtmlPage, DEFAULT_TEMPLATE};
pub use plan::{build_render_plan, MarketTable, RenderPlan, TableRow, COLUMN_HEADERS};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Container element '{0}' not found in page template")]
    ContainerMissing(String),

    #[error("Container element '{0}' is never closed in page template")]
    ContainerUnclosed(String),

    #[error("Failed to write rendered page: {0}")]
    WriteFailed(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Something that can display a render plan
pub trait RenderTarget: Send + Sync {
    /// Clear the current contents and show `plan` instead
    fn replace_contents(&self, plan: &RenderPlan) -> Result<()>;
}
