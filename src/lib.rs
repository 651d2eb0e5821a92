#![cfg_attr(not(feature = "std"), no_std)]
//! An inert standard I/O surface for freestanding wasm targets, and the stub
//! sysroot that presents it to a C cross-compiler.

pub mod stdio;

#[cfg(feature = "std")]
pub mod error;
#[cfg(feature = "std")]
pub mod header;
#[cfg(feature = "std")]
pub mod sysroot;

#[cfg(feature = "std")]
pub use error::{ExpandError, SysrootError};
#[cfg(feature = "std")]
pub use header::StubHeader;
#[cfg(feature = "std")]
pub use sysroot::Sysroot;
