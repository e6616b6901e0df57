//! Trusted key material for signature checks.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// A GNUPGHOME-style directory holding the keys a caller trusts.
///
/// Content from any mirror must verify against this same keyring; nothing
/// is ever added to it implicitly.
#[derive(Debug, Clone)]
pub struct Keyring {
    home: PathBuf,
}

impl Keyring {
    /// Wrap an existing keyring directory.
    pub fn at(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Default keyring location under the user state directory.
    ///
    /// # Returns
    /// - Unix: `$XDG_STATE_HOME/grip/gnupg` or `~/.local/state/grip/gnupg`
    /// - Windows: `%LOCALAPPDATA%\grip\gnupg`
    pub fn default_home() -> Option<PathBuf> {
        let base = if cfg!(unix) {
            dirs::state_dir().or_else(dirs::data_local_dir)
        } else {
            dirs::data_local_dir()
        };
        base.map(|dir| dir.join("grip").join("gnupg"))
    }

    /// Build a keyring at `home` by importing armored public key files.
    pub fn import(home: impl Into<PathBuf>, keys: &[PathBuf]) -> Result<Self> {
        let home = home.into();
        fs::create_dir_all(&home)?;
        // gpg refuses group/world-accessible home directories.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&home, fs::Permissions::from_mode(0o700))?;
        }
        for key in keys {
            let output = Command::new("gpg")
                .arg("--homedir")
                .arg(&home)
                .args(["--batch", "--quiet", "--import"])
                .arg(key)
                .output()?;
            if !output.status.success() {
                return Err(Error::KeyImport {
                    path: key.clone(),
                    detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }
        }
        Ok(Self { home })
    }

    /// The keyring directory, suitable for `GNUPGHOME`.
    pub fn home(&self) -> &Path {
        &self.home
    }
}
