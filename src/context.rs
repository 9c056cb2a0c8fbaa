// command-buffer-context/src/context.rs
//
//! An offscreen GLES2 test context running on the command buffer.

use crate::config::{ConfigRequest, ContextRequest, PbufferRequest};
use crate::current::{self, CurrentBinding, CurrentContextGuard};
use crate::egl::{self, EGLConfig, EGLContext, EGLDisplay, EGLSurface, EGLint};
use crate::interface::GlInterface;
use crate::loader::{self, DriverLoader, EglFunctions};
use crate::test_context::{GlTestContextBase, TestContext};
use crate::Error;

use std::ffi::CStr;
use std::os::raw::c_void;
use std::ptr;

/// Where a context is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// Construction failed. No driver resources are held.
    Failed,
    /// Construction succeeded and the GL interface is validated.
    Ready,
    /// The context was explicitly torn down.
    TornDown,
}

/// A 1×1 pbuffer-backed GLES2 context for tests.
///
/// Construction never fails outright: check [`TestContext::is_valid`] (or [`state`]) before
/// using the context. All driver calls go through the loader passed at construction, and every
/// `eglMakeCurrent` goes through [`current::make_current`] so the thread's current binding stays
/// known.
///
/// [`state`]: CommandBufferContext::state
pub struct CommandBufferContext {
    loader: &'static DriverLoader,
    base: GlTestContextBase,
    state: ContextState,
    egl_context: EGLContext,
    egl_display: EGLDisplay,
    egl_surface: EGLSurface,
    egl_config: EGLConfig,
}

impl CommandBufferContext {
    /// Creates a context on the process-wide command buffer library, optionally sharing
    /// textures and other objects with `share_context`.
    pub fn new(share_context: Option<&CommandBufferContext>) -> CommandBufferContext {
        CommandBufferContext::with_loader(loader::command_buffer_loader(), share_context)
    }

    /// Like [`CommandBufferContext::new`], with the driver entry points coming from `loader`.
    pub fn with_loader(loader: &'static DriverLoader,
                       share_context: Option<&CommandBufferContext>)
                       -> CommandBufferContext {
        let mut context = CommandBufferContext {
            loader,
            base: GlTestContextBase::new(),
            state: ContextState::Failed,
            egl_context: egl::NO_CONTEXT,
            egl_display: egl::NO_DISPLAY,
            egl_surface: egl::NO_SURFACE,
            egl_config: egl::NO_CONFIG,
        };

        let share_egl_context = share_context.map_or(egl::NO_CONTEXT, |share| share.egl_context);
        match context.create(share_egl_context) {
            Ok(interface) => {
                context.base.init(interface);
                context.state = ContextState::Ready;
            }
            // The loader already reported why the library is unusable.
            Err(Error::NoGLLibraryFound) => {}
            Err(err) => {
                error!("Command buffer: couldn't create the test context: {:?}", err);
                context.destroy_gl_context();
            }
        }
        context
    }

    fn create(&mut self, share_egl_context: EGLContext) -> Result<GlInterface, Error> {
        let loader = self.loader;
        let egl = loader.functions().ok_or(Error::NoGLLibraryFound)?;

        unsafe {
            self.egl_display = (egl.GetDisplay)(egl::DEFAULT_DISPLAY);
            if self.egl_display == egl::NO_DISPLAY {
                return Err(Error::DisplayCreationFailed);
            }
            let result = (egl.Initialize)(self.egl_display, ptr::null_mut(), ptr::null_mut());
            if result == egl::FALSE {
                return Err(Error::DisplayInitializationFailed);
            }

            self.egl_config = choose_config(egl, self.egl_display, &ConfigRequest::default())?;

            let pbuffer_attributes = PbufferRequest::default().to_attrib_list();
            self.egl_surface = (egl.CreatePbufferSurface)(self.egl_display,
                                                          self.egl_config,
                                                          pbuffer_attributes.as_ptr());
            if self.egl_surface == egl::NO_SURFACE {
                return Err(Error::SurfaceCreationFailed);
            }

            let context_attributes = ContextRequest::default().to_attrib_list();
            self.egl_context = (egl.CreateContext)(self.egl_display,
                                                   self.egl_config,
                                                   share_egl_context,
                                                   context_attributes.as_ptr());
            if self.egl_context == egl::NO_CONTEXT {
                return Err(Error::ContextCreationFailed);
            }
        }

        // Put back whatever was current before on every path out of here.
        let _guard = CurrentContextGuard::new(loader);
        if !current::make_current(loader, self.binding()) {
            return Err(Error::MakeCurrentFailed);
        }

        let interface = unsafe { GlInterface::assemble(|name| loader.resolve_function(name))? };
        if !interface.validate() {
            return Err(Error::InterfaceValidationFailed);
        }
        Ok(interface)
    }

    /// Releases the context and surface. Safe to call more than once and on a context that
    /// failed to construct.
    pub fn teardown(&mut self) {
        self.base.teardown();
        self.destroy_gl_context();
        if self.state == ContextState::Ready {
            self.state = ContextState::TornDown;
        }
    }

    fn destroy_gl_context(&mut self) {
        let loader = self.loader;
        let egl = match loader.functions() {
            Some(egl) => egl,
            None => return,
        };
        if self.egl_display == egl::NO_DISPLAY {
            return;
        }

        let mut was_current = false;
        if self.egl_context != egl::NO_CONTEXT {
            was_current = current::current_context() == self.egl_context;
            unsafe {
                if (egl.DestroyContext)(self.egl_display, self.egl_context) == egl::FALSE {
                    debug!("Command buffer: eglDestroyContext failed");
                }
            }
            self.egl_context = egl::NO_CONTEXT;
        }
        if was_current {
            // Release the context only after destroying it. The command buffer then knows the
            // context is unused once it stops being current, so it doesn't have to abandon it
            // first and prints no client-side errors.
            if !current::make_current(loader, CurrentBinding::released(self.egl_display)) {
                debug!("Command buffer: couldn't release the destroyed context");
            }
        }

        if self.egl_surface != egl::NO_SURFACE {
            unsafe {
                if (egl.DestroySurface)(self.egl_display, self.egl_surface) == egl::FALSE {
                    debug!("Command buffer: eglDestroySurface failed");
                }
            }
            self.egl_surface = egl::NO_SURFACE;
        }
        self.egl_config = egl::NO_CONFIG;
        self.egl_display = egl::NO_DISPLAY;
    }

    #[inline]
    fn binding(&self) -> CurrentBinding {
        CurrentBinding::new(self.egl_display, self.egl_surface, self.egl_context)
    }

    /// Makes this context current on the calling thread.
    pub fn make_current(&self) -> bool {
        if !self.loader.ensure_loaded() || self.egl_context == egl::NO_CONTEXT {
            return false;
        }
        if !current::make_current(self.loader, self.binding()) {
            warn!("Command buffer: couldn't make the EGL context current");
            return false;
        }
        true
    }

    /// Returns a guard restoring the binding that is current now, unless that is this context.
    pub fn ambient_restorer(&self) -> CurrentContextGuard {
        if !self.loader.ensure_loaded() || current::current_context() == self.egl_context {
            return CurrentContextGuard::empty();
        }
        CurrentContextGuard::new(self.loader)
    }

    /// Presents the pbuffer. A failure is logged and otherwise ignored.
    pub fn swap_buffers(&self) -> bool {
        let egl = match self.loader.functions() {
            Some(egl) => egl,
            None => return false,
        };
        unsafe {
            if (egl.SwapBuffers)(self.egl_display, self.egl_surface) == egl::FALSE {
                warn!("Command buffer: eglSwapBuffers failed");
                return false;
            }
        }
        true
    }

    /// Flushes pending GL work, then swaps.
    pub fn present(&self) {
        if let Some(gl) = self.base.gl() {
            gl.flush();
        }
        self.swap_buffers();
    }

    pub fn get_proc_address(&self, name: &str) -> *const c_void {
        self.loader.resolve_function(name)
    }

    /// Reads one integer attribute of this context's config. Zero if the query fails.
    pub fn config_attribute(&self, attribute: EGLint) -> EGLint {
        let egl = match self.loader.functions() {
            Some(egl) => egl,
            None => return 0,
        };
        if self.egl_config == egl::NO_CONFIG {
            return 0;
        }
        let mut value = 0;
        unsafe {
            if (egl.GetConfigAttrib)(self.egl_display, self.egl_config, attribute, &mut value) ==
                    egl::FALSE {
                return 0;
            }
        }
        value
    }

    #[inline]
    pub fn stencil_bits(&self) -> i32 {
        self.config_attribute(egl::STENCIL_SIZE)
    }

    #[inline]
    pub fn sample_count(&self) -> i32 {
        self.config_attribute(egl::SAMPLES)
    }

    #[inline]
    pub fn state(&self) -> ContextState {
        self.state
    }

    #[inline]
    pub fn egl_display(&self) -> EGLDisplay {
        self.egl_display
    }

    #[inline]
    pub fn egl_surface(&self) -> EGLSurface {
        self.egl_surface
    }

    #[inline]
    pub fn egl_context(&self) -> EGLContext {
        self.egl_context
    }
}

impl TestContext for CommandBufferContext {
    #[inline]
    fn gl(&self) -> Option<&GlInterface> {
        self.base.gl()
    }

    fn platform_make_current(&self) {
        self.make_current();
    }

    fn platform_ambient_restorer(&self) -> CurrentContextGuard {
        self.ambient_restorer()
    }

    fn platform_swap_buffers(&self) {
        self.swap_buffers();
    }

    fn platform_get_proc_address(&self, name: &CStr) -> *const c_void {
        match name.to_str() {
            Ok(name) => self.get_proc_address(name),
            Err(_) => ptr::null(),
        }
    }
}

impl Drop for CommandBufferContext {
    fn drop(&mut self) {
        self.base.teardown();
        self.destroy_gl_context();
    }
}

/// Chooses the single config matching `request`. Zero matches, or more than one, is an error.
unsafe fn choose_config(egl: &EglFunctions, egl_display: EGLDisplay, request: &ConfigRequest)
                        -> Result<EGLConfig, Error> {
    let config_attributes = request.to_attrib_list();

    // See how many applicable configs there are.
    let mut config_count = 0;
    let result = (egl.ChooseConfig)(egl_display,
                                    config_attributes.as_ptr(),
                                    ptr::null_mut(),
                                    0,
                                    &mut config_count);
    if result == egl::FALSE {
        return Err(Error::PixelFormatSelectionFailed);
    }
    match config_count {
        0 => return Err(Error::NoPixelFormatFound),
        1 => {}
        count => return Err(Error::AmbiguousPixelFormat(count)),
    }

    let (mut config, mut real_config_count) = (egl::NO_CONFIG, 0);
    let result = (egl.ChooseConfig)(egl_display,
                                    config_attributes.as_ptr(),
                                    &mut config,
                                    1,
                                    &mut real_config_count);
    if result == egl::FALSE {
        return Err(Error::PixelFormatSelectionFailed);
    }
    if real_config_count != 1 || config == egl::NO_CONFIG {
        return Err(Error::NoPixelFormatFound);
    }
    Ok(config)
}
