//! Path mapping for the Zellij plugin sandbox.

use std::path::PathBuf;

const HOST_ROOT: &str = "/host";

/// Directory holding the trace file.
///
/// `/host` is the cwd of the last focused terminal (usually `$HOME`), so this
/// normally resolves to `~/.local/share/zellij/vibio`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/vibio")
}

/// Maps `~` and `~/...` onto the sandbox host mount; other paths pass through.
///
/// ```
/// use vibio::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dusk.toml"), "/host/themes/dusk.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/vibio.toml"), "/etc/vibio.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_lives_under_host_share() {
        assert_eq!(
            get_data_dir(),
            PathBuf::from("/host/.local/share/zellij/vibio")
        );
    }

    #[test]
    fn only_leading_home_tilde_expands() {
        assert_eq!(expand_tilde("~user/theme.toml"), "~user/theme.toml");
        assert_eq!(expand_tilde("themes/~/x.toml"), "themes/~/x.toml");
        assert_eq!(expand_tilde("~/a"), "/host/a");
    }
}
