// command-buffer-context/src/lib.rs
//
//! An offscreen GLES2 test context backed by the command buffer.
//!
//! The command buffer is a GLES2 implementation shipped as a shared library exporting EGL entry
//! points. This crate loads that library on first use, creates a 1×1 pbuffer context on it and
//! hands the context's GL function table to tests. Because the command buffer's
//! `eglGetCurrent*` functions always report nothing, the current binding of each thread is
//! tracked here instead; see the [`current`] module.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

pub mod egl;

pub mod error;
pub use crate::error::Error;

pub mod config;
pub use crate::config::{ConfigRequest, ContextRequest, PbufferRequest};
pub use crate::config::{RenderableTypeFlags, SurfaceTypeFlags};

pub mod loader;
pub use crate::loader::{command_buffer_loader, DriverLoader, DynamicLibrary, EglFunctions};

pub mod current;
pub use crate::current::{CurrentBinding, CurrentContextGuard, RestoreToken};

mod interface;
pub use crate::interface::GlInterface;

mod test_context;
pub use crate::test_context::{GlTestContextBase, TestContext};

mod context;
pub use crate::context::{CommandBufferContext, ContextState};
