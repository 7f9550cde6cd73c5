//! Filesystem collaborator: the host operations a digest run needs.
//!
//! Errors are plain `io::Error`s straight from the OS so callers see the
//! original failure.

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::trace;

pub trait Filesystem {
    /// Absolute working directory that relative paths resolve against.
    fn cwd(&self) -> io::Result<PathBuf>;

    /// Children of `dir`, sorted by path.
    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Reads `file` from beginning to end.
    fn source(&self, file: &Path) -> io::Result<Box<dyn Read>>;

    /// Writes `file` from the beginning, replacing any existing content.
    fn sink(&self, file: &Path) -> io::Result<Box<dyn Write>>;

    fn is_dir(&self, path: &Path) -> bool;
}

/// The host filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemFilesystem;

impl Filesystem for SystemFilesystem {
    fn cwd(&self) -> io::Result<PathBuf> {
        env::current_dir()
    }

    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        trace!(dir = %dir.display(), "listing directory");
        let mut children = Vec::new();
        for entry in fs::read_dir(dir)? {
            children.push(entry?.path());
        }
        children.sort();
        Ok(children)
    }

    fn source(&self, file: &Path) -> io::Result<Box<dyn Read>> {
        trace!(file = %file.display(), "opening source");
        let handle = fs::File::open(file)?;
        if handle.metadata()?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} is a directory", file.display()),
            ));
        }
        Ok(Box::new(handle))
    }

    fn sink(&self, file: &Path) -> io::Result<Box<dyn Write>> {
        trace!(file = %file.display(), "opening sink");
        Ok(Box::new(fs::File::create(file)?))
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Every file below `dir`, depth first, in sorted order.
pub fn walk(fs: &dyn Filesystem, dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for path in fs.list(dir)? {
        if fs.is_dir(&path) {
            walk(fs, &path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cwd_is_absolute() {
        assert!(SystemFilesystem.cwd().unwrap().is_absolute());
    }

    #[test]
    fn list_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "c.txt", "a.txt"] {
            fs::write(dir.path().join(name), name).unwrap();
        }
        let names: Vec<_> = SystemFilesystem
            .list(dir.path())
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn list_fails_for_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, b"x").unwrap();
        assert!(SystemFilesystem.list(&file).is_err());
    }

    #[test]
    fn sink_replaces_and_source_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out.txt");
        fs::write(&file, b"old contents that are longer").unwrap();

        SystemFilesystem.sink(&file).unwrap().write_all(b"new").unwrap();

        let mut back = String::new();
        SystemFilesystem
            .source(&file)
            .unwrap()
            .read_to_string(&mut back)
            .unwrap();
        assert_eq!(back, "new");
    }

    #[test]
    fn source_of_missing_file_keeps_os_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = match SystemFilesystem.source(&dir.path().join("missing")) {
            Err(err) => err,
            Ok(_) => panic!("missing file opened"),
        };
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn walk_descends_depth_first() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a"), b"").unwrap();
        fs::write(dir.path().join("sub").join("b"), b"").unwrap();
        fs::write(dir.path().join("z"), b"").unwrap();

        let mut files = Vec::new();
        walk(&SystemFilesystem, dir.path(), &mut files).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![PathBuf::from("a"), Path::new("sub").join("b"), PathBuf::from("z")]
        );
    }
}
