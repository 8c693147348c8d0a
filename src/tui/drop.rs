//! File drop support
//!
//! Dropping files onto a terminal pastes their paths, space separated and
//! shell-quoted (or as `file://` URIs, depending on the terminal).

use std::path::PathBuf;

/// Split pasted text into paths, honouring quotes and backslash escapes
pub fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(ch);
                in_token = true;
            }
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    in_token = true;
                }
            }
            (None, c) if c.is_whitespace() => {
                if in_token {
                    paths.push(to_path(&current));
                    current.clear();
                    in_token = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        paths.push(to_path(&current));
    }

    paths
}

/// A paste counts as a drop only if every token names an existing file
pub fn as_file_drop(text: &str) -> Option<Vec<PathBuf>> {
    let paths = parse_dropped_paths(text);
    if !paths.is_empty() && paths.iter().all(|p| p.is_file()) {
        Some(paths)
    } else {
        None
    }
}

fn to_path(token: &str) -> PathBuf {
    if token.starts_with("file://") {
        if let Some(path) = url::Url::parse(token).ok().and_then(|u| u.to_file_path().ok()) {
            return path;
        }
    }
    PathBuf::from(token)
}
