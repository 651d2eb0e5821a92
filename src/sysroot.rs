use std::{
    env, fs,
    path::{Path, PathBuf},
};

use tracing::{debug, trace};

use crate::error::SysrootError;
use crate::header::HEADERS;

/// Explicit override for the sysroot directory.
pub const SYSROOT_DIR_ENV: &str = "WASM_SYSROOT_DIR";

/// Set by Cargo for build scripts of crates depending on `wasm-sysroot-sys`.
pub const DEP_PATH_ENV: &str = "DEP_WASM_SYSROOT_PATH";

/// A directory holding the stub headers, ahead of any system header in the
/// include search of a cross-compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sysroot {
    root: PathBuf,
}

impl Sysroot {
    /// The directory shipped inside `wasm-sysroot-sys`.
    pub fn bundled() -> Self {
        Self {
            root: PathBuf::from(wasm_sysroot_sys::SYSROOT_PATH),
        }
    }

    /// An existing sysroot directory.
    pub fn at(root: impl Into<PathBuf>) -> Result<Self, SysrootError> {
        let sysroot = Self { root: root.into() };
        sysroot.verify()?;
        Ok(sysroot)
    }

    /// Looks the sysroot up from `WASM_SYSROOT_DIR`, then
    /// `DEP_WASM_SYSROOT_PATH`, and falls back to the bundled directory.
    pub fn from_env() -> Result<Self, SysrootError> {
        for key in [SYSROOT_DIR_ENV, DEP_PATH_ENV] {
            match env::var_os(key) {
                Some(dir) if !dir.is_empty() => {
                    debug!("Using sysroot from {}: {:?}", key, dir);
                    return Self::at(dir);
                }
                _ => trace!("{} is not set", key),
            }
        }
        let sysroot = Self::bundled();
        debug!("Using bundled sysroot at {}", sysroot.root.display());
        sysroot.verify()?;
        Ok(sysroot)
    }

    /// Builds a sysroot in `dir`, creating it if needed. Headers that are
    /// already up to date are left untouched; stale ones are rewritten.
    pub fn assemble(dir: impl AsRef<Path>) -> Result<Self, SysrootError> {
        let root = dir.as_ref().to_path_buf();
        debug!("Assembling sysroot at {}", root.display());

        let mut files: Vec<(PathBuf, String)> = HEADERS
            .iter()
            .map(|header| (root.join(header.file_name()), header.render()))
            .collect();
        files.push((
            root.join("src").join("stdio.c"),
            wasm_sysroot_sys::STDIO_C.to_owned(),
        ));

        for (path, contents) in files {
            if fs::read_to_string(&path).is_ok_and(|current| current == contents) {
                trace!("{} is up to date", path.display());
                continue;
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| SysrootError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            fs::write(&path, contents).map_err(|source| SysrootError::Io {
                path: path.clone(),
                source,
            })?;
            trace!("Wrote {}", path.display());
        }

        Self::at(root)
    }

    /// Checks that the directory exists and holds every stub header.
    pub fn verify(&self) -> Result<(), SysrootError> {
        if !self.root.is_dir() {
            return Err(SysrootError::MissingRoot(self.root.clone()));
        }
        for header in HEADERS {
            if !self.header(header.file_name()).is_file() {
                return Err(SysrootError::MissingHeader {
                    root: self.root.clone(),
                    header: header.file_name(),
                });
            }
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The headers live at the top of the sysroot.
    pub fn include_dir(&self) -> &Path {
        &self.root
    }

    pub fn header(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Compiler flags that hide the host headers and put the stubs first.
    pub fn clang_args(&self) -> Result<Vec<String>, SysrootError> {
        let include = self
            .include_dir()
            .to_str()
            .ok_or_else(|| SysrootError::NotUtf8(self.root.clone()))?;
        Ok(vec![
            "-nostdinc".to_owned(),
            "-isystem".to_owned(),
            include.to_owned(),
        ])
    }
}
