use std::io::{BufRead, Write};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use super::{render::format_list, Presenter};
use crate::controller::{ConfirmPrompt, ListView, Notice, NoticeStyle};

/// Lines read from stdin on a dedicated thread.
///
/// Both the interactive loop and confirmation prompts pull from the same
/// channel so no input is lost between them.
pub struct TerminalInput {
    lines: Mutex<mpsc::UnboundedReceiver<String>>,
}

impl TerminalInput {
    pub fn spawn() -> Arc<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read from stdin: {}", e);
                        break;
                    }
                }
            }
        });
        Arc::new(Self::from_receiver(rx))
    }

    pub fn from_receiver(rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            lines: Mutex::new(rx),
        }
    }

    /// Next input line, `None` once stdin is closed.
    pub async fn next_line(&self) -> Option<String> {
        self.lines.lock().await.recv().await
    }
}

pub struct TerminalPresenter {
    input: Option<Arc<TerminalInput>>,
    assume_yes: bool,
    render_updates: bool,
}

impl TerminalPresenter {
    /// A presenter that never reads input: confirmations are answered with
    /// `assume_yes`.
    pub fn non_interactive(assume_yes: bool) -> Self {
        Self {
            input: None,
            assume_yes,
            render_updates: false,
        }
    }

    pub fn interactive(input: Arc<TerminalInput>, assume_yes: bool) -> Self {
        Self {
            input: Some(input),
            assume_yes,
            render_updates: true,
        }
    }
}

#[async_trait]
impl Presenter for TerminalPresenter {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        if self.assume_yes {
            return true;
        }
        let Some(input) = &self.input else {
            return false;
        };

        let marker = if prompt.destructive { " (destructive)" } else { "" };
        eprint!("{} {}{} [y/N] ", prompt.title, prompt.action, marker);
        let _ = std::io::stderr().flush();

        match input.next_line().await {
            Some(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            None => false,
        }
    }

    fn notify(&self, notice: &Notice) {
        let prefix = match notice.style {
            NoticeStyle::Animated => "…",
            NoticeStyle::Success => "✓",
            NoticeStyle::Failure => "✗",
        };
        eprintln!("{prefix} {}", notice.title);
    }

    fn render(&self, view: &ListView) {
        if self.render_updates {
            print!("{}", format_list(view));
            let _ = std::io::stdout().flush();
        }
    }
}
