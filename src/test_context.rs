// command-buffer-context/src/test_context.rs
//
//! The interface test harnesses drive GL test contexts through.

use crate::current::CurrentContextGuard;
use crate::interface::GlInterface;

use std::ffi::CStr;
use std::os::raw::c_void;

/// A GL context that tests render into.
pub trait TestContext {
    /// The context's GL interface, or `None` if the context failed to initialize.
    fn gl(&self) -> Option<&GlInterface>;

    #[inline]
    fn is_valid(&self) -> bool {
        self.gl().is_some()
    }

    fn platform_make_current(&self);

    /// Returns a guard that restores the binding that is current now, or an empty guard if this
    /// context is the current one already.
    fn platform_ambient_restorer(&self) -> CurrentContextGuard;

    fn platform_swap_buffers(&self);

    fn platform_get_proc_address(&self, name: &CStr) -> *const c_void;

    /// Makes this context current until the returned guard is dropped.
    fn make_current_and_auto_restore(&self) -> CurrentContextGuard {
        let guard = self.platform_ambient_restorer();
        self.platform_make_current();
        guard
    }

    #[inline]
    fn swap_buffers(&self) {
        self.platform_swap_buffers()
    }
}

/// The state every test context owns: its GL interface once initialized.
#[derive(Debug, Default)]
pub struct GlTestContextBase {
    interface: Option<GlInterface>,
}

impl GlTestContextBase {
    pub fn new() -> GlTestContextBase {
        GlTestContextBase { interface: None }
    }

    /// Adopts `interface`. The context must not already be initialized.
    pub fn init(&mut self, interface: GlInterface) {
        debug_assert!(self.interface.is_none());
        self.interface = Some(interface);
    }

    /// Releases the GL interface.
    pub fn teardown(&mut self) {
        self.interface = None;
    }

    #[inline]
    pub fn gl(&self) -> Option<&GlInterface> {
        self.interface.as_ref()
    }
}
