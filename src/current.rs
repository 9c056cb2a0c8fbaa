// command-buffer-context/src/current.rs
//
//! Per-thread tracking of the current EGL binding.
//!
//! The command buffer doesn't implement `eglGetCurrentDisplay`, `eglGetCurrentSurface` or
//! `eglGetCurrentContext`; they always return the `EGL_NO_*` value. Instead, every
//! `eglMakeCurrent` goes through [`make_current`], which records the binding in thread-local
//! storage once the driver accepts it. The `current_*` functions read that record and never call
//! into the driver.

use crate::egl::{self, EGLContext, EGLDisplay, EGLSurface};
use crate::loader::DriverLoader;

use std::cell::Cell;
use std::fmt;

/// The display, surfaces and context bound on a thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurrentBinding {
    pub display: EGLDisplay,
    pub draw_surface: EGLSurface,
    pub read_surface: EGLSurface,
    pub context: EGLContext,
}

impl CurrentBinding {
    /// Nothing bound.
    pub const NONE: CurrentBinding = CurrentBinding {
        display: egl::NO_DISPLAY,
        draw_surface: egl::NO_SURFACE,
        read_surface: egl::NO_SURFACE,
        context: egl::NO_CONTEXT,
    };

    /// Binds `context` with `surface` as both the draw and the read surface.
    #[inline]
    pub fn new(display: EGLDisplay, surface: EGLSurface, context: EGLContext) -> CurrentBinding {
        CurrentBinding { display, draw_surface: surface, read_surface: surface, context }
    }

    /// Releases whatever is current on `display`.
    #[inline]
    pub fn released(display: EGLDisplay) -> CurrentBinding {
        CurrentBinding { display, ..CurrentBinding::NONE }
    }
}

impl Default for CurrentBinding {
    fn default() -> CurrentBinding {
        CurrentBinding::NONE
    }
}

thread_local! {
    static CURRENT_BINDING: Cell<CurrentBinding> = const { Cell::new(CurrentBinding::NONE) };
}

/// Calls `eglMakeCurrent` and, only if it succeeds, records the new binding for this thread.
///
/// Returns false without touching the driver if `loader` failed to load.
pub fn make_current(loader: &DriverLoader, binding: CurrentBinding) -> bool {
    let egl = match loader.functions() {
        Some(egl) => egl,
        None => return false,
    };
    let result = unsafe {
        (egl.MakeCurrent)(binding.display,
                          binding.draw_surface,
                          binding.read_surface,
                          binding.context)
    };
    if result != egl::TRUE {
        return false;
    }
    CURRENT_BINDING.with(|current| current.set(binding));
    true
}

#[inline]
pub fn current_binding() -> CurrentBinding {
    CURRENT_BINDING.with(Cell::get)
}

#[inline]
pub fn current_display() -> EGLDisplay {
    current_binding().display
}

#[inline]
pub fn current_draw_surface() -> EGLSurface {
    current_binding().draw_surface
}

#[inline]
pub fn current_read_surface() -> EGLSurface {
    current_binding().read_surface
}

#[inline]
pub fn current_context() -> EGLContext {
    current_binding().context
}

/// A snapshot of this thread's binding that can be made current again later.
#[derive(Clone, Copy)]
pub struct RestoreToken {
    loader: &'static DriverLoader,
    binding: CurrentBinding,
}

impl RestoreToken {
    /// Snapshots the current binding. `None` if `loader` failed to load.
    pub fn capture(loader: &'static DriverLoader) -> Option<RestoreToken> {
        if !loader.ensure_loaded() {
            return None;
        }
        Some(RestoreToken { loader, binding: current_binding() })
    }

    #[inline]
    pub fn binding(&self) -> CurrentBinding {
        self.binding
    }

    /// Makes the snapshotted binding current again.
    pub fn restore(self) -> bool {
        make_current(self.loader, self.binding)
    }
}

/// Restores `token` if there is one.
pub fn invoke_restore_token(token: Option<RestoreToken>) {
    if let Some(token) = token {
        if !token.restore() {
            debug!("Command buffer: couldn't restore the previous binding {:?}", token.binding);
        }
    }
}

impl fmt::Debug for RestoreToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestoreToken").field("binding", &self.binding).finish()
    }
}

/// Restores a previously current binding when dropped.
#[must_use]
#[derive(Debug)]
pub struct CurrentContextGuard {
    token: Option<RestoreToken>,
}

impl CurrentContextGuard {
    /// Captures this thread's binding, to be restored when the guard drops.
    pub fn new(loader: &'static DriverLoader) -> CurrentContextGuard {
        CurrentContextGuard { token: RestoreToken::capture(loader) }
    }

    /// A guard that does nothing when dropped.
    #[inline]
    pub fn empty() -> CurrentContextGuard {
        CurrentContextGuard { token: None }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.token.is_none()
    }

    /// Drops the snapshot without restoring it.
    #[inline]
    pub fn disarm(mut self) {
        self.token = None;
    }
}

impl Drop for CurrentContextGuard {
    fn drop(&mut self) {
        invoke_restore_token(self.token.take());
    }
}
