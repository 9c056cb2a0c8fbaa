// command-buffer-context/src/error.rs
//
//! Various errors that building a test context can produce.

/// Various errors that building a test context can produce.
///
/// These never leave the crate's public operations as `Err` values; a context
/// that hits one is left in the `Failed` state and the error is logged.
#[derive(Debug)]
pub enum Error {
    /// The command buffer library couldn't be opened, or one of its entry points is missing.
    NoGLLibraryFound,
    /// `eglGetDisplay` returned no display.
    DisplayCreationFailed,
    /// `eglInitialize` failed on the display.
    DisplayInitializationFailed,
    /// `eglChooseConfig` itself failed.
    PixelFormatSelectionFailed,
    /// No config matched the request.
    NoPixelFormatFound,
    /// More than one config matched the request. Only a unique match is accepted.
    AmbiguousPixelFormat(i32),
    /// The system couldn't create the pbuffer surface.
    SurfaceCreationFailed,
    /// The system couldn't create the context.
    ContextCreationFailed,
    /// The context couldn't be made current or not current.
    MakeCurrentFailed,
    /// `glGetString(GL_VERSION)` returned nothing, so there is no usable current context.
    NoCurrentContext,
    /// Looking up a required GL function address failed.
    GLFunctionNotFound(&'static str),
    /// The assembled GL interface failed validation.
    InterfaceValidationFailed,
}
