use colored::Colorize;
use tokio::sync::watch;

use crate::profile::ProfileSummary;

const LOGIN_WIDTH: usize = 20;
const NAME_WIDTH: usize = 24;
const COUNT_WIDTH: usize = 12;

/// Terminal table of favorites, redrawn when the store reports a change
pub struct TableRenderer {
    changes: watch::Receiver<u64>,
}

impl TableRenderer {
    /// Builds a renderer from a store subscription
    pub fn new(changes: watch::Receiver<u64>) -> Self {
        TableRenderer { changes }
    }

    /// Redraws only if the store changed since the last draw
    pub fn refresh_if_changed(&mut self, entries: &[ProfileSummary]) -> bool {
        if !self.changes.has_changed().unwrap_or(false) {
            return false;
        }
        self.render(entries);
        true
    }

    /// Draws the table unconditionally
    pub fn render(&mut self, entries: &[ProfileSummary]) {
        self.changes.borrow_and_update();
        print!("{}", render_table(entries));
    }
}

/// Formats favorites as table rows, newest first
pub fn render_table(entries: &[ProfileSummary]) -> String {
    if entries.is_empty() {
        return format!("{}\n", "no favorites yet".yellow());
    }

    let mut table = String::new();
    let header: String = format!(
        "{:<LOGIN_WIDTH$} {:<NAME_WIDTH$} {:>COUNT_WIDTH$} {:>COUNT_WIDTH$}  {}",
        "login", "name", "repositories", "followers", "profile"
    );
    table.push_str(&format!("{}\n", header.blue().bold()));

    for entry in entries {
        table.push_str(&format!(
            "{} {:<NAME_WIDTH$} {:>COUNT_WIDTH$} {:>COUNT_WIDTH$}  {}\n",
            format!("{:<LOGIN_WIDTH$}", truncate(&entry.login, LOGIN_WIDTH)).bold(),
            truncate(entry.shown_name(), NAME_WIDTH),
            entry.public_repo_count,
            entry.follower_count,
            entry.html_url().dimmed(),
        ));
    }
    table
}

/// Formats one favorite with every stored field
pub fn render_detail(entry: &ProfileSummary) -> String {
    format!(
        "{} {}\n{} {}\n{} {}\n{} {}\n{} {}\n{} {}\n",
        "login:".blue(),
        entry.login,
        "name:".blue(),
        entry.display_name.as_deref().unwrap_or("-"),
        "repositories:".blue(),
        entry.public_repo_count,
        "followers:".blue(),
        entry.follower_count,
        "profile:".blue(),
        entry.html_url(),
        "avatar:".blue(),
        entry.avatar_url(),
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    fn octocat() -> ProfileSummary {
        ProfileSummary {
            login: "octocat".to_string(),
            display_name: Some("The Octocat".to_string()),
            public_repo_count: 8,
            follower_count: 9000,
        }
    }

    #[test]
    fn empty_table_has_placeholder() {
        colored::control::set_override(false);
        assert_eq!(render_table(&[]), "no favorites yet\n");
    }

    #[test]
    fn rows_follow_entry_order() {
        colored::control::set_override(false);
        let ghost = ProfileSummary {
            login: "ghost".to_string(),
            display_name: None,
            public_repo_count: 0,
            follower_count: 1,
        };
        let table = render_table(&[ghost, octocat()]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(table.ends_with("https://github.com/octocat\n"));
        assert!(lines[0].starts_with("login"));
        assert!(lines[1].starts_with("ghost"));
        assert!(lines[1].ends_with("https://github.com/ghost"));
        assert!(lines[2].contains("The Octocat"));
        assert!(lines[2].contains("9000"));
    }

    #[test]
    fn detail_lists_avatar() {
        colored::control::set_override(false);
        let detail = render_detail(&octocat());
        assert!(detail.contains("avatar: https://github.com/octocat.png"));
    }

    #[test]
    fn refresh_only_after_change() {
        let (tx, rx) = watch::channel(0u64);
        let mut renderer = TableRenderer::new(rx);

        assert!(!renderer.refresh_if_changed(&[]));
        tx.send_modify(|revision| *revision += 1);
        assert!(renderer.refresh_if_changed(&[]));
        assert!(!renderer.refresh_if_changed(&[]));
    }

    #[test]
    fn long_names_are_cut() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
