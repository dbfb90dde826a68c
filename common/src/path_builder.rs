//! Chainable directory builder.
//!
//! Every [`PathBuilder`] designates a directory that exists on disk: it is created, with all its
//! missing parents, when the builder is. Descending (`/`) creates the sub directory and yields a
//! new builder, naming a file (`+`) only joins the name and never touches the file system.
//!
//! ```no_run
//! use cinante::path_builder::PathBuilder;
//!
//! # fn main() -> Result<(), cinante::error::Error> {
//! let root = PathBuilder::create(["/tmp", "cinante"])?;
//! let init = (&root / "src")? + "lib.rs";
//! assert_eq!(init, std::path::PathBuf::from("/tmp/cinante/src/lib.rs"));
//! # Ok(())
//! # }
//! ```

use crate::error::Error;
use crate::file_utils::{mkdirs, path_concat2};
use std::fmt::{Display, Formatter};
use std::ops::{Add, Div};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PathBuilder {
    inner: PathBuf,
}

impl AsRef<Path> for PathBuilder {
    fn as_ref(&self) -> &Path {
        self.inner.as_path()
    }
}

impl Display for PathBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner.display())
    }
}

impl PathBuilder {
    /// Joins `segments` and creates the resulting directory. No segment means the current
    /// directory.
    pub fn create<I, P>(segments: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut segments = segments.into_iter().peekable();
        if segments.peek().is_none() {
            return Self::current();
        }
        let mut inner = PathBuf::new();
        for segment in segments {
            inner.push(segment);
        }
        Self::from_path(inner)
    }

    pub fn current() -> Result<Self, Error> {
        Self::from_path(".")
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Ok(Self {
            inner: mkdirs(path)?,
        })
    }

    /// New builder for the `segment` sub directory, which gets created. `self` is left untouched.
    pub fn descend<P: AsRef<Path>>(&self, segment: P) -> Result<PathBuilder, Error> {
        Self::from_path(path_concat2(&self.inner, segment))
    }

    /// Path of the `basename` file inside this directory. Nothing is created.
    pub fn with_file<P: AsRef<Path>>(&self, basename: P) -> PathBuf {
        path_concat2(&self.inner, basename)
    }

    pub fn path(&self) -> &Path {
        &self.inner
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.inner
    }
}

impl<P: AsRef<Path>> Div<P> for &PathBuilder {
    type Output = Result<PathBuilder, Error>;

    fn div(self, segment: P) -> Self::Output {
        self.descend(segment)
    }
}

impl<P: AsRef<Path>> Div<P> for PathBuilder {
    type Output = Result<PathBuilder, Error>;

    fn div(self, segment: P) -> Self::Output {
        self.descend(segment)
    }
}

impl<P: AsRef<Path>> Add<P> for &PathBuilder {
    type Output = PathBuf;

    fn add(self, basename: P) -> Self::Output {
        self.with_file(basename)
    }
}

impl<P: AsRef<Path>> Add<P> for PathBuilder {
    type Output = PathBuf;

    fn add(self, basename: P) -> Self::Output {
        self.with_file(basename)
    }
}
