// command-buffer-context/src/loader.rs
//
//! Lazy, once-only loading of the command buffer driver's EGL entry points.

use crate::egl::{ChooseConfigFn, CreateContextFn, CreatePbufferSurfaceFn, CreateWindowSurfaceFn};
use crate::egl::{DestroyContextFn, DestroySurfaceFn, GetConfigAttribFn, GetDisplayFn};
use crate::egl::{GetProcAddressFn, InitializeFn, MakeCurrentFn, SwapBuffersFn, TerminateFn};

use libloading::Library;
use std::ffi::{CStr, CString};
use std::mem;
use std::os::raw::c_void;
use std::ptr;
use std::sync::OnceLock;

#[cfg(windows)]
pub const COMMAND_BUFFER_LIBRARY_NAME: &str = "command_buffer_gles2.dll";
#[cfg(macos)]
pub const COMMAND_BUFFER_LIBRARY_NAME: &str = "libcommand_buffer_gles2.dylib";
#[cfg(not(any(windows, macos)))]
pub const COMMAND_BUFFER_LIBRARY_NAME: &str = "libcommand_buffer_gles2.so";

static COMMAND_BUFFER: DriverLoader = DriverLoader::new(open_command_buffer_library);

/// A shared library that symbols can be looked up in.
pub trait DynamicLibrary: Send + Sync {
    /// Returns the address of the exported symbol `name`, or null if there is none.
    ///
    /// # Safety
    ///
    /// The returned address is only valid while the library stays loaded.
    unsafe fn symbol(&self, name: &CStr) -> *const c_void;
}

impl DynamicLibrary for Library {
    unsafe fn symbol(&self, name: &CStr) -> *const c_void {
        match self.get::<unsafe extern "system" fn()>(name.to_bytes_with_nul()) {
            Ok(symbol) => *symbol as *const c_void,
            Err(_) => ptr::null(),
        }
    }
}

/// Opens the driver library. Returns `None` if it can't be found.
pub type LibraryOpener = fn() -> Option<Box<dyn DynamicLibrary>>;

/// Opens the command buffer library by its platform-specific file name.
pub fn open_command_buffer_library() -> Option<Box<dyn DynamicLibrary>> {
    match unsafe { Library::new(COMMAND_BUFFER_LIBRARY_NAME) } {
        Ok(library) => Some(Box::new(library)),
        Err(err) => {
            debug!("Command buffer: dlopen of {} failed: {}", COMMAND_BUFFER_LIBRARY_NAME, err);
            None
        }
    }
}

/// The process-wide loader for the command buffer library.
#[inline]
pub fn command_buffer_loader() -> &'static DriverLoader {
    &COMMAND_BUFFER
}

/// The driver entry points. Only ever constructed with every pointer resolved.
#[allow(non_snake_case)]
pub struct EglFunctions {
    pub GetDisplay: GetDisplayFn,
    pub Initialize: InitializeFn,
    pub Terminate: TerminateFn,
    pub ChooseConfig: ChooseConfigFn,
    pub GetConfigAttrib: GetConfigAttribFn,
    pub CreateWindowSurface: CreateWindowSurfaceFn,
    pub CreatePbufferSurface: CreatePbufferSurfaceFn,
    pub DestroySurface: DestroySurfaceFn,
    pub CreateContext: CreateContextFn,
    pub DestroyContext: DestroyContextFn,
    pub MakeCurrent: MakeCurrentFn,
    pub SwapBuffers: SwapBuffersFn,
    pub GetProcAddress: GetProcAddressFn,
}

impl EglFunctions {
    /// Resolves every entry point, stopping at the first one that is missing.
    unsafe fn load(library: &dyn DynamicLibrary) -> Result<EglFunctions, &'static CStr> {
        Ok(EglFunctions {
            GetDisplay: lookup(library, c"eglGetDisplay")?,
            Initialize: lookup(library, c"eglInitialize")?,
            Terminate: lookup(library, c"eglTerminate")?,
            ChooseConfig: lookup(library, c"eglChooseConfig")?,
            GetConfigAttrib: lookup(library, c"eglGetConfigAttrib")?,
            CreateWindowSurface: lookup(library, c"eglCreateWindowSurface")?,
            CreatePbufferSurface: lookup(library, c"eglCreatePbufferSurface")?,
            DestroySurface: lookup(library, c"eglDestroySurface")?,
            CreateContext: lookup(library, c"eglCreateContext")?,
            DestroyContext: lookup(library, c"eglDestroyContext")?,
            MakeCurrent: lookup(library, c"eglMakeCurrent")?,
            SwapBuffers: lookup(library, c"eglSwapBuffers")?,
            GetProcAddress: lookup(library, c"eglGetProcAddress")?,
        })
    }
}

unsafe fn lookup<F: Copy>(library: &dyn DynamicLibrary, name: &'static CStr)
                          -> Result<F, &'static CStr> {
    debug_assert_eq!(mem::size_of::<F>(), mem::size_of::<*const c_void>());
    let address = library.symbol(name);
    if address.is_null() {
        return Err(name);
    }
    Ok(mem::transmute_copy::<*const c_void, F>(&address))
}

struct DriverBindings {
    // Keeps the entry points below alive.
    _library: Option<Box<dyn DynamicLibrary>>,
    functions: Option<EglFunctions>,
}

impl DriverBindings {
    fn load(opener: LibraryOpener) -> DriverBindings {
        let library = match opener() {
            Some(library) => library,
            None => {
                error!("Command buffer: couldn't open the driver library");
                return DriverBindings { _library: None, functions: None };
            }
        };

        let functions = match unsafe { EglFunctions::load(&*library) } {
            Ok(functions) => Some(functions),
            Err(name) => {
                error!("Command buffer: library is missing {:?}", name);
                None
            }
        };
        DriverBindings { _library: Some(library), functions }
    }
}

/// Loads the driver on first use and hands out its entry points.
///
/// The first caller opens the library and resolves every symbol; concurrent callers block until
/// that finishes. The outcome is final: a failed load is never retried.
pub struct DriverLoader {
    opener: LibraryOpener,
    bindings: OnceLock<DriverBindings>,
}

impl DriverLoader {
    pub const fn new(opener: LibraryOpener) -> DriverLoader {
        DriverLoader { opener, bindings: OnceLock::new() }
    }

    /// Returns true if the library opened and every entry point resolved.
    #[inline]
    pub fn ensure_loaded(&self) -> bool {
        self.functions().is_some()
    }

    #[inline]
    pub fn functions(&self) -> Option<&EglFunctions> {
        self.bindings.get_or_init(|| DriverBindings::load(self.opener)).functions.as_ref()
    }

    /// Looks up a GL entry point through `eglGetProcAddress`. Null if the driver isn't loaded.
    pub fn resolve_function(&self, name: &str) -> *const c_void {
        let functions = match self.functions() {
            Some(functions) => functions,
            None => return ptr::null(),
        };
        let name = match CString::new(name) {
            Ok(name) => name,
            Err(_) => return ptr::null(),
        };
        unsafe { (functions.GetProcAddress)(name.as_ptr()) }
    }
}
