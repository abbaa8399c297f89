use std::sync::Arc;

use anyhow::Result;

use memo::controller::TransitionKind;
use memo::models::StatusFilter;
use memo::presenter::{format_detail, format_list, TerminalInput};
use memo::session::{MemoSession, TransitionOutcome};

const HELP: &str = "\
Type text to search the loaded memos. Commands:
  :status <all|normal|archived>   switch the listed row status
  :more                           load the next page
  :refresh                        reload from the first page
  :show N                         show memo N with its metadata
  :url N                          print the website URL of memo N
  :archive N | :restore N | :delete N
  :help                           show this help
  :quit                           leave";

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Status(StatusFilter),
    More,
    Refresh,
    Show(usize),
    Url(usize),
    Transition(TransitionKind, usize),
    Help,
    Quit,
    Invalid(String),
}

impl BrowseCommand {
    pub fn parse(line: &str) -> Self {
        let Some(rest) = line.strip_prefix(':') else {
            return Self::Search(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or("").to_lowercase();
        let arg = parts.next();

        let index = |arg: Option<&str>| -> Option<usize> {
            arg.and_then(|a| a.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .map(|n| n - 1)
        };

        let with_index = |build: fn(usize) -> Self| match index(arg) {
            Some(i) => build(i),
            None => Self::Invalid(format!(":{name} needs a memo number")),
        };

        match name.as_str() {
            "status" => match arg.map(str::parse::<StatusFilter>) {
                Some(Ok(filter)) => Self::Status(filter),
                Some(Err(e)) => Self::Invalid(e),
                None => Self::Invalid(":status needs all, normal or archived".to_string()),
            },
            "more" | "m" => Self::More,
            "refresh" | "r" => Self::Refresh,
            "show" => with_index(Self::Show),
            "url" => with_index(Self::Url),
            "archive" => with_index(|i| Self::Transition(TransitionKind::Archive, i)),
            "restore" => with_index(|i| Self::Transition(TransitionKind::Restore, i)),
            "delete" => with_index(|i| Self::Transition(TransitionKind::Delete, i)),
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => Self::Invalid(format!("Unknown command :{other}")),
        }
    }
}

/// Drive a session from stdin until `:quit`, end of input or Ctrl+C.
pub async fn run_browse(mut session: MemoSession, input: Arc<TerminalInput>) -> Result<()> {
    eprintln!("{HELP}");
    session.start().await;

    loop {
        tokio::select! {
            line = input.next_line() => {
                let Some(line) = line else { break };
                if !handle_line(&mut session, &line).await {
                    break;
                }
            }
            event = session.next_event() => {
                match event {
                    Some(event) => session.dispatch(event),
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    Ok(())
}

/// Returns `false` when the loop should stop.
async fn handle_line(session: &mut MemoSession, line: &str) -> bool {
    match BrowseCommand::parse(line) {
        BrowseCommand::Search(text) => session.set_query_text(text),
        BrowseCommand::Status(filter) => session.set_status_filter(filter),
        BrowseCommand::More => {
            if session.controller().has_more() {
                session.load_next_page();
            } else {
                eprintln!("No more memos to load");
            }
        }
        BrowseCommand::Refresh => session.revalidate(),
        BrowseCommand::Show(index) => match session.view().items.get(index) {
            Some(item) => println!("{}", format_detail(item)),
            None => eprintln!("No memo number {}", index + 1),
        },
        BrowseCommand::Url(index) => match session.view().items.get(index) {
            Some(item) => println!("{}", session.memo_url(&item.memo)),
            None => eprintln!("No memo number {}", index + 1),
        },
        BrowseCommand::Transition(kind, index) => {
            let Some(item) = session.view().items.get(index).cloned() else {
                eprintln!("No memo number {}", index + 1);
                return true;
            };
            match session.transition(&item.memo, kind).await {
                TransitionOutcome::NotOffered => {
                    eprintln!("{} is not available for memo {}", kind, index + 1)
                }
                TransitionOutcome::Declined => eprintln!("Cancelled"),
                TransitionOutcome::Succeeded | TransitionOutcome::Failed => {}
            }
        }
        BrowseCommand::Help => {
            eprintln!("{HELP}");
            print!("{}", format_list(&session.view()));
        }
        BrowseCommand::Quit => return false,
        BrowseCommand::Invalid(message) => eprintln!("{message}"),
    }
    true
}
