// command-buffer-context/src/interface.rs
//
//! The GL entry-point table handed to test contexts.

use crate::Error;

use glow::HasContext;
use std::ffi::CStr;
use std::fmt;
use std::mem;
use std::os::raw::{c_char, c_void};

const GL_VERSION: u32 = 0x1f02;
const GL_EXTENSIONS: u32 = 0x1f03;

type GetStringFn = unsafe extern "system" fn(name: u32) -> *const u8;

// The entry points every GLES2 implementation exports and the test harness relies on.
static REQUIRED_FUNCTIONS: [&str; 10] = [
    "glGetString",
    "glGetIntegerv",
    "glGetError",
    "glFlush",
    "glFinish",
    "glClear",
    "glClearColor",
    "glViewport",
    "glReadPixels",
    "glBindFramebuffer",
];

/// A GL function table loaded for the context that was current when it was assembled.
pub struct GlInterface {
    gl: glow::Context,
    missing_functions: Vec<&'static str>,
}

impl GlInterface {
    /// Assembles an interface from `get_proc_address`.
    ///
    /// # Safety
    ///
    /// A context must be current on this thread, and every pointer `get_proc_address` returns
    /// must either be null or point at the GL function of that name.
    pub unsafe fn assemble<F>(mut get_proc_address: F) -> Result<GlInterface, Error>
                              where F: FnMut(&str) -> *const c_void {
        // glow panics on a null or unparseable `GL_VERSION` and on null ES extensions, so
        // check both before handing over.
        let get_string = get_proc_address("glGetString");
        if get_string.is_null() {
            return Err(Error::GLFunctionNotFound("glGetString"));
        }
        let get_string: GetStringFn = mem::transmute(get_string);
        let version = get_string(GL_VERSION);
        if version.is_null() {
            return Err(Error::NoCurrentContext);
        }
        let version = CStr::from_ptr(version as *const c_char);
        debug!("Command buffer: GL_VERSION is {:?}", version);
        match parse_embedded_version(version) {
            Some((major, _)) if major >= 2 => {}
            _ => {
                warn!("Command buffer: unsupported GL version {:?}", version);
                return Err(Error::InterfaceValidationFailed);
            }
        }
        if get_string(GL_EXTENSIONS).is_null() {
            warn!("Command buffer: GL_EXTENSIONS is null");
            return Err(Error::InterfaceValidationFailed);
        }

        let missing_functions = REQUIRED_FUNCTIONS.iter()
                                                  .copied()
                                                  .filter(|name| get_proc_address(name).is_null())
                                                  .collect();
        let gl = glow::Context::from_loader_function(get_proc_address);
        Ok(GlInterface { gl, missing_functions })
    }

    /// Checks that every required function resolved and that this is OpenGL ES 2.0 or later.
    pub fn validate(&self) -> bool {
        if let Some(name) = self.missing_functions.first() {
            warn!("Command buffer: GL interface is missing {}", name);
            return false;
        }
        let version = self.gl.version();
        if !version.is_embedded || version.major < 2 {
            warn!("Command buffer: unexpected GL version {:?}", version);
            return false;
        }
        true
    }

    #[inline]
    pub fn flush(&self) {
        unsafe { self.gl.flush() }
    }

    #[inline]
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }
}

/// Reads the major and minor version out of an `OpenGL ES <major>.<minor>[ <vendor info>]`
/// string. Desktop GL and ES 1.x profile strings (`OpenGL ES-CM 1.1`) yield `None`.
fn parse_embedded_version(version: &CStr) -> Option<(u32, u32)> {
    let version = version.to_str().ok()?.strip_prefix("OpenGL ES ")?;
    let number = version.split_whitespace().next()?;
    let (major, minor) = number.split_once('.')?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}

impl fmt::Debug for GlInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlInterface")
         .field("version", self.gl.version())
         .field("missing_functions", &self.missing_functions)
         .finish()
    }
}
