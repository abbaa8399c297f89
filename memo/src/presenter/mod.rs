//! Presentation collaborators: confirmations, notices and list rendering.

mod render;
mod terminal;

use async_trait::async_trait;

use crate::controller::{ConfirmPrompt, ListView, Notice};

pub use render::{format_detail, format_list, format_row};
pub use terminal::{TerminalInput, TerminalPresenter};

#[async_trait]
pub trait Presenter: Send + Sync {
    /// Ask the user to confirm a transition. `false` cancels it.
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool;

    fn notify(&self, notice: &Notice);

    /// Called whenever the derived list changes.
    fn render(&self, _view: &ListView) {}
}
