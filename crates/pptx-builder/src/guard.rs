//! Overwrite decisions for output files

use std::path::Path;

/// Interactive collaborator asked before an existing file is replaced
pub trait ConfirmOverwrite {
    /// `true` only on an explicit affirmative answer
    fn confirm_overwrite(&mut self, path: &Path) -> bool;
}

impl<F> ConfirmOverwrite for F
where
    F: FnMut(&Path) -> bool,
{
    fn confirm_overwrite(&mut self, path: &Path) -> bool {
        self(path)
    }
}

/// Write policy chosen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverwritePolicy {
    /// Never prompt; existing files are replaced
    pub quiet: bool,
    /// Replace existing files without asking
    pub force: bool,
}

impl OverwritePolicy {
    pub fn new(quiet: bool, force: bool) -> Self {
        Self { quiet, force }
    }

    /// Whether `path` may be written under this policy
    pub fn may_write(&self, path: &Path, confirm: &mut impl ConfirmOverwrite) -> bool {
        may_write(path, self.quiet, self.force, confirm)
    }
}

/// Decide whether a write to `path` may proceed.
///
/// A missing path, `force` or `quiet` allow the write without asking.
/// Otherwise the answer is exactly what `confirm` returns.
pub fn may_write(
    path: &Path,
    quiet: bool,
    force: bool,
    confirm: &mut impl ConfirmOverwrite,
) -> bool {
    if !path.exists() || force || quiet {
        return true;
    }
    let allowed = confirm.confirm_overwrite(path);
    if !allowed {
        log::debug!("Overwrite of {} declined", path.display());
    }
    allowed
}

/// Interpret a free-form prompt reply; only `y`/`yes` count as consent
pub fn is_affirmative(reply: &str) -> bool {
    matches!(reply.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
