//! Path helpers

use std::path::{Path, PathBuf};

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the input unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    let expanded = PathBuf::from(expand_env_vars(&path.to_string_lossy()));
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_unknown_variable_when_expanding_then_input_unchanged() {
        assert_eq!(
            expand_env_vars("$DSB_SURELY_UNSET_VARIABLE/x"),
            "$DSB_SURELY_UNSET_VARIABLE/x"
        );
    }

    #[test]
    fn given_relative_path_when_resolving_then_joined_to_base() {
        let base = Path::new("/data");
        assert_eq!(resolve_against(base, Path::new("lp21.xml")), PathBuf::from("/data/lp21.xml"));
        assert_eq!(resolve_against(base, Path::new("/tmp/x.json")), PathBuf::from("/tmp/x.json"));
    }
}
