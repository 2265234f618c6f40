//! Filesystem access
//!
//! The session engine only ever stats, lists and opens paths. `FileSystem`
//! names those three capabilities so handlers can run against the local disk
//! or against an in-memory tree in tests.

use std::future::Future;
use std::io;
use std::path::Path;

use tokio::io::AsyncRead;

/// What `stat` reports about an existing path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub is_dir: bool,
}

/// Read-only filesystem capability consumed by the command handlers.
///
/// `stat` fails when the path does not exist. `list_dir` returns entry names
/// in the order the backend enumerates them.
pub trait FileSystem: Send + Sync {
    type Reader: AsyncRead + Unpin + Send;

    fn stat(&self, path: &Path) -> impl Future<Output = io::Result<FileStat>> + Send;

    fn list_dir(&self, path: &Path) -> impl Future<Output = io::Result<Vec<String>>> + Send;

    fn open(&self, path: &Path) -> impl Future<Output = io::Result<Self::Reader>> + Send;
}

/// `FileSystem` backed by the host filesystem through `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    type Reader = tokio::fs::File;

    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = tokio::fs::metadata(path).await?;
        Ok(FileStat {
            is_dir: metadata.is_dir(),
        })
    }

    async fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        Ok(names)
    }

    async fn open(&self, path: &Path) -> io::Result<Self::Reader> {
        tokio::fs::File::open(path).await
    }
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory `FileSystem` used by handler tests.

    use super::*;
    use std::collections::BTreeMap;
    use std::io::Cursor;
    use std::path::PathBuf;

    enum Node {
        Dir(Vec<String>),
        File(Vec<u8>),
    }

    /// Directories keep their entries in insertion order, which stands in for
    /// the backend's enumeration order.
    #[derive(Default)]
    pub struct MemoryFileSystem {
        nodes: BTreeMap<PathBuf, Node>,
    }

    impl MemoryFileSystem {
        pub fn new(root: &Path) -> Self {
            let mut fs = Self::default();
            fs.nodes.insert(root.to_path_buf(), Node::Dir(Vec::new()));
            fs
        }

        pub fn add_dir(&mut self, path: &Path) {
            self.link(path);
            self.nodes.insert(path.to_path_buf(), Node::Dir(Vec::new()));
        }

        pub fn add_file(&mut self, path: &Path, contents: &[u8]) {
            self.link(path);
            self.nodes
                .insert(path.to_path_buf(), Node::File(contents.to_vec()));
        }

        fn link(&mut self, path: &Path) {
            let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if let Some(Node::Dir(entries)) = self.nodes.get_mut(&parent) {
                entries.push(name);
            }
        }

        fn not_found(path: &Path) -> io::Error {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: no such file or directory", path.display()),
            )
        }
    }

    impl FileSystem for MemoryFileSystem {
        type Reader = Cursor<Vec<u8>>;

        async fn stat(&self, path: &Path) -> io::Result<FileStat> {
            match self.nodes.get(path) {
                Some(Node::Dir(_)) => Ok(FileStat { is_dir: true }),
                Some(Node::File(_)) => Ok(FileStat { is_dir: false }),
                None => Err(Self::not_found(path)),
            }
        }

        async fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
            match self.nodes.get(path) {
                Some(Node::Dir(entries)) => Ok(entries.clone()),
                Some(Node::File(_)) => Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("{}: not a directory", path.display()),
                )),
                None => Err(Self::not_found(path)),
            }
        }

        async fn open(&self, path: &Path) -> io::Result<Self::Reader> {
            match self.nodes.get(path) {
                Some(Node::File(contents)) => Ok(Cursor::new(contents.clone())),
                Some(Node::Dir(_)) => Ok(Cursor::new(Vec::new())),
                None => Err(Self::not_found(path)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_local_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("a.txt"), b"hello").unwrap();

        let fs = LocalFileSystem;
        assert!(fs.stat(dir.path()).await.unwrap().is_dir);
        assert!(!fs.stat(&dir.path().join("a.txt")).await.unwrap().is_dir);
        assert!(fs.stat(&dir.path().join("missing")).await.is_err());

        let mut names = fs.list_dir(dir.path()).await.unwrap();
        names.sort();
        assert_eq!(names, vec!["a.txt".to_string(), "sub".to_string()]);
        assert!(fs.list_dir(&dir.path().join("a.txt")).await.is_err());

        let mut contents = String::new();
        fs.open(&dir.path().join("a.txt"))
            .await
            .unwrap()
            .read_to_string(&mut contents)
            .await
            .unwrap();
        assert_eq!(contents, "hello");
    }
}
