//! Output directory and collision-free artifact naming.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::error::{Error, Result};

/// `strftime` pattern embedded in artifact file names.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

const MAX_SUFFIX: u32 = 1000;

/// Directory receiving scripts and audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Wrap a directory path. Nothing is created until a file is written.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Create the directory (and parents) if absent.
    pub fn ensure(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| Error::filesystem(&self.root, e))
    }

    /// Create a new file named `<prefix>-<timestamp>.<extension>`.
    ///
    /// An existing file is never reused: on collision `-1`, `-2`, ... is
    /// appended to the stem.
    pub fn create_unique(
        &self,
        prefix: &str,
        extension: &str,
        at: DateTime<Local>,
    ) -> Result<(PathBuf, File)> {
        self.ensure()?;

        let stamp = at.format(FILE_TIMESTAMP_FORMAT);
        for n in 0..MAX_SUFFIX {
            let name = if n == 0 {
                format!("{prefix}-{stamp}.{extension}")
            } else {
                format!("{prefix}-{stamp}-{n}.{extension}")
            };
            let path = self.root.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    debug!(path = %path.display(), "created artifact file");
                    return Ok((path, file));
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
                Err(e) => return Err(Error::filesystem(path, e)),
            }
        }

        Err(Error::filesystem(
            &self.root,
            std::io::Error::new(
                ErrorKind::AlreadyExists,
                format!("too many {prefix} files for {stamp}"),
            ),
        ))
    }

    /// Verify the directory can be created and written to.
    pub fn check_writable(&self) -> Result<()> {
        self.ensure()?;
        let probe = self.root.join(".edcast-write-probe");
        File::create(&probe).map_err(|e| Error::filesystem(&probe, e))?;
        std::fs::remove_file(&probe).map_err(|e| Error::filesystem(&probe, e))
    }
}
