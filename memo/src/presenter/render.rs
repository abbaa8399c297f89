use chrono::{DateTime, Local, Utc};

use crate::controller::{ListView, MemoView};

const TITLE_WIDTH: usize = 72;

fn title_of(content: &str) -> String {
    let line = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("(empty)");

    if line.chars().count() > TITLE_WIDTH {
        let truncated: String = line.chars().take(TITLE_WIDTH - 1).collect();
        format!("{truncated}…")
    } else {
        line.to_string()
    }
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| {
        t.with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    })
    .unwrap_or_else(|| "-".to_string())
}

/// One list line: 1-based index, first content line, status markers.
pub fn format_row(index: usize, view: &MemoView) -> String {
    let mut row = format!("{:>3}. {}", index + 1, title_of(&view.memo.content));
    if view.memo.pinned {
        row.push_str(" [pinned]");
    }
    if view.memo.is_archived() {
        row.push_str(" [archived]");
    }
    row
}

pub fn format_list(view: &ListView) -> String {
    let mut out = String::new();

    let mut header = format!("{} memos", view.status_filter);
    if !view.query.is_empty() {
        header.push_str(&format!(" matching \"{}\"", view.query));
    }
    out.push_str(&header);
    out.push('\n');

    if view.items.is_empty() {
        out.push_str(if view.is_loading {
            "  Loading memos...\n"
        } else {
            "  No memos found\n"
        });
    }

    for (index, item) in view.items.iter().enumerate() {
        out.push_str(&format_row(index, item));
        out.push('\n');
    }

    if view.has_more {
        out.push_str("  … more memos available\n");
    }
    out
}

/// Full memo: rendered markdown followed by its metadata.
pub fn format_detail(view: &MemoView) -> String {
    let memo = &view.memo;
    let pinned = if memo.pinned { "True" } else { "False" };
    let tags = if memo.property.tags.is_empty() {
        "-".to_string()
    } else {
        memo.property.tags.join(", ")
    };

    format!(
        "{}\n\nPin: {}\nVisibility: {}\nTags: {}\n---\nCreate Time: {}\nUpdate Time: {}\n",
        view.markdown,
        pinned,
        memo.visibility.to_uppercase(),
        tags,
        format_time(memo.create_time),
        format_time(memo.update_time),
    )
}
