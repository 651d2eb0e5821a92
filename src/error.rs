use std::path::PathBuf;
use thiserror::Error;

/// Errors from locating, checking or assembling a sysroot.
#[derive(Error, Debug)]
pub enum SysrootError {
    #[error("sysroot directory {0} does not exist")]
    MissingRoot(PathBuf),
    #[error("sysroot {root} has no {header}")]
    MissingHeader { root: PathBuf, header: &'static str },
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sysroot path {0} is not valid UTF-8")]
    NotUtf8(PathBuf),
}

/// Errors from expanding a macro invocation against a stub header.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    #[error("malformed macro invocation: {0:?}")]
    Malformed(String),
    #[error("`{0}` is not declared by this header")]
    UnknownMacro(String),
    #[error("`{0}` is a real declaration, not a substituted macro")]
    NotAStub(String),
    #[error("macro `{name}` expects {expected} arguments, got {found}")]
    Arity {
        name: String,
        expected: Arity,
        found: usize,
    },
}

/// Number of arguments a function-like macro accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}
