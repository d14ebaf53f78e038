//! Path shape helpers relative to the user's home directory.

use std::path::Path;

/// The user's home prefix and the home-relative locations excluded from results.
#[derive(Debug, Clone, Default)]
pub struct HomeLayout {
    /// Home directory with a trailing `/`, or empty when unknown.
    home_prefix: String,
    excluded_prefixes: Vec<String>,
}

impl HomeLayout {
    pub fn new(home: Option<&Path>, excluded_subdirs: &[String]) -> Self {
        let Some(home) = home else {
            log::warn!("home directory unknown, ranking ignores home membership");
            return Self::default();
        };

        let mut home_prefix = home.to_string_lossy().to_string();
        if !home_prefix.ends_with('/') {
            home_prefix.push('/');
        }
        let excluded_prefixes = excluded_subdirs
            .iter()
            .map(|subdir| {
                let mut prefix = format!("{home_prefix}{}", subdir.trim_start_matches('/'));
                if !prefix.ends_with('/') {
                    prefix.push('/');
                }
                prefix
            })
            .collect();

        Self {
            home_prefix,
            excluded_prefixes,
        }
    }

    pub fn is_in_home(&self, path: &str) -> bool {
        !self.home_prefix.is_empty() && path.starts_with(self.home_prefix.as_str())
    }

    /// Trash and recent-documents entries are never results.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Containing directory for display, with the home prefix shortened to `~`.
    pub fn display_dir<'a>(&self, path: &'a str) -> std::borrow::Cow<'a, str> {
        let (dir, _) = split_dir_base(path);
        if self.is_in_home(path) {
            // The last separator is at or after the one ending the home prefix.
            let rest = &path[self.home_prefix.len() - 1..dir.len()];
            std::borrow::Cow::Owned(format!("~{rest}"))
        } else {
            std::borrow::Cow::Borrowed(dir)
        }
    }
}

/// True when any path component starts with a `.`.
pub fn is_hidden(path: &str) -> bool {
    path.contains("/.")
}

/// Splits at the last `/`: `("/home/u", "a.txt")`. A path without a separator
/// is all base name.
pub fn split_dir_base(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(separator) => (&path[..separator], &path[separator + 1..]),
        None => ("", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> HomeLayout {
        HomeLayout::new(
            Some(Path::new("/home/u")),
            &[
                ".local/share/Trash/".to_string(),
                ".local/share/RecentDocuments".to_string(),
            ],
        )
    }

    #[test]
    fn home_membership_needs_a_separator() {
        let layout = layout();
        assert!(layout.is_in_home("/home/u/a.txt"));
        assert!(!layout.is_in_home("/home/user/a.txt"));
        assert!(!layout.is_in_home("/home/u"));
    }

    #[test]
    fn excluded_locations() {
        let layout = layout();
        assert!(layout.is_excluded("/home/u/.local/share/Trash/files/a.txt"));
        assert!(layout.is_excluded("/home/u/.local/share/RecentDocuments/a.desktop"));
        assert!(!layout.is_excluded("/home/u/.local/share/Trashcan"));
        assert!(!layout.is_excluded("/tmp/.local/share/Trash/a"));
    }

    #[test]
    fn unknown_home_matches_nothing() {
        let layout = HomeLayout::new(None, &[".local/share/Trash/".to_string()]);
        assert!(!layout.is_in_home("/home/u/a"));
        assert!(!layout.is_excluded("/home/u/.local/share/Trash/a"));
    }

    #[test]
    fn display_dir_abbreviates_home() {
        let layout = layout();
        assert_eq!(layout.display_dir("/home/u/docs/a.txt"), "~/docs");
        assert_eq!(layout.display_dir("/home/u/a.txt"), "~");
        assert_eq!(layout.display_dir("/tmp/c.txt"), "/tmp");
        assert_eq!(layout.display_dir("/c.txt"), "");
    }

    #[test]
    fn hidden_and_split() {
        assert!(is_hidden("/home/u/.hidden/b.txt"));
        assert!(is_hidden("/home/u/.bashrc"));
        assert!(!is_hidden("/home/u/a.b/c"));
        assert_eq!(split_dir_base("/home/u/a.txt"), ("/home/u", "a.txt"));
        assert_eq!(split_dir_base("a.txt"), ("", "a.txt"));
        assert_eq!(split_dir_base("/a"), ("", "a"));
    }
}
