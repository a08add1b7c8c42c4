//! Table formatting utilities for CLI output.

use beatfetch_core::PaginationState;

const TITLE_WIDTH: usize = 36;
const ARTIST_WIDTH: usize = 24;
const CREATOR_WIDTH: usize = 16;

/// Truncates a string to a maximum number of characters, adding "..." if
/// needed.
///
/// # Examples
///
/// ```rust
/// use beatfetch_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Print a result page as a table followed by its status line.
pub fn print_results(state: &PaginationState) {
    if state.results.is_empty() {
        println!("{}", state.status);
        return;
    }

    let width = 10 + TITLE_WIDTH + ARTIST_WIDTH + CREATOR_WIDTH + 3;
    println!(
        "{:<10}{:<title$} {:<artist$} {:<creator$}",
        "ID",
        "Title",
        "Artist",
        "Mapper",
        title = TITLE_WIDTH,
        artist = ARTIST_WIDTH,
        creator = CREATOR_WIDTH,
    );
    print_separator(width);
    for result in state.results.iter() {
        println!(
            "{:<10}{:<title$} {:<artist$} {:<creator$}",
            result.id,
            truncate_string(&result.title, TITLE_WIDTH),
            truncate_string(&result.artist, ARTIST_WIDTH),
            truncate_string(&result.creator, CREATOR_WIDTH),
            title = TITLE_WIDTH,
            artist = ARTIST_WIDTH,
            creator = CREATOR_WIDTH,
        );
    }
    print_separator(width);
    println!(
        "Page {} - {} ({} of {} shown so far)",
        state.page, state.status, state.results_seen, state.total_results
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate_string("ブルーゼニス", 10), "ブルーゼニス");
        assert_eq!(truncate_string("ブルーゼニスです", 6), "ブルー...");
    }

    #[test]
    fn test_truncate_tiny_width() {
        assert_eq!(truncate_string("abcdef", 2), "...");
    }
}
