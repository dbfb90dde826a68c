use crate::error::Error;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

fn display<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().into()
}

pub fn path_concat2<T: AsRef<Path>, U: AsRef<Path>>(p1: T, p2: U) -> PathBuf {
    p1.as_ref().join(p2)
}

pub fn open_file<P: AsRef<Path>>(path: P) -> Result<File, Error> {
    File::open(path.as_ref()).map_err(|source| Error::Open {
        path: display(&path),
        source,
    })
}

/// Creates or truncates `path`.
pub fn create_file<P: AsRef<Path>>(path: P) -> Result<File, Error> {
    File::create(path.as_ref()).map_err(|source| Error::Create {
        path: display(&path),
        source,
    })
}

pub fn read<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, Error> {
    std::fs::read(path.as_ref()).map_err(|source| Error::Read {
        path: display(&path),
        source,
    })
}

pub fn write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, content: C) -> Result<(), Error> {
    std::fs::write(path.as_ref(), content).map_err(|source| Error::Write {
        path: display(&path),
        source,
    })
}

/// Recursively creates `dir`. Succeeds silently if it already exists as a directory.
pub fn mkdirs<P: AsRef<Path>>(dir: P) -> Result<PathBuf, Error> {
    let dir = dir.as_ref();
    if dir.as_os_str().is_empty() {
        return Err(Error::CreateDir {
            path: display(dir),
            source: std::io::Error::new(ErrorKind::NotFound, "empty directory path"),
        });
    }
    if dir.is_dir() {
        trace!("{} already exists", dir.display());
        return Ok(dir.to_path_buf());
    }
    if let Err(e) = std::fs::create_dir_all(dir) {
        match e.kind() {
            ErrorKind::AlreadyExists => {
                // dir or file exists
                // let check the path is really a directory
                let meta = std::fs::metadata(dir).map_err(|source| Error::CreateDir {
                    path: display(dir),
                    source,
                })?;
                if !meta.is_dir() {
                    return Err(Error::NotADirectory(display(dir)));
                }
            }
            _ => {
                return Err(Error::CreateDir {
                    path: display(dir),
                    source: e,
                })
            }
        }
    }
    debug!("Created directory {}", dir.display());
    Ok(dir.to_path_buf())
}
