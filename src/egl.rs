// command-buffer-context/src/egl.rs
//
//! The slice of the EGL ABI that the command buffer driver exports.

#![allow(non_camel_case_types)]

use std::os::raw::{c_char, c_void};
use std::ptr;

pub type EGLint = i32;
pub type EGLBoolean = u32;
pub type EGLDisplay = *mut c_void;
pub type EGLConfig = *mut c_void;
pub type EGLSurface = *mut c_void;
pub type EGLContext = *mut c_void;
pub type EGLNativeDisplayType = *mut c_void;
pub type EGLNativeWindowType = *mut c_void;

pub const FALSE: EGLBoolean = 0;
pub const TRUE: EGLBoolean = 1;

pub const NO_DISPLAY: EGLDisplay = ptr::null_mut();
pub const NO_CONFIG: EGLConfig = ptr::null_mut();
pub const NO_SURFACE: EGLSurface = ptr::null_mut();
pub const NO_CONTEXT: EGLContext = ptr::null_mut();
pub const DEFAULT_DISPLAY: EGLNativeDisplayType = ptr::null_mut();

pub const PBUFFER_BIT: EGLint = 0x0001;
pub const WINDOW_BIT: EGLint = 0x0004;
pub const OPENGL_ES2_BIT: EGLint = 0x0004;

pub const ALPHA_SIZE: EGLint = 0x3021;
pub const BLUE_SIZE: EGLint = 0x3022;
pub const GREEN_SIZE: EGLint = 0x3023;
pub const RED_SIZE: EGLint = 0x3024;
pub const STENCIL_SIZE: EGLint = 0x3026;
pub const SAMPLES: EGLint = 0x3031;
pub const SURFACE_TYPE: EGLint = 0x3033;
pub const NONE: EGLint = 0x3038;
pub const RENDERABLE_TYPE: EGLint = 0x3040;
pub const HEIGHT: EGLint = 0x3056;
pub const WIDTH: EGLint = 0x3057;
pub const CONTEXT_CLIENT_VERSION: EGLint = 0x3098;

pub type GetDisplayFn = unsafe extern "system" fn(display_id: EGLNativeDisplayType) -> EGLDisplay;
pub type InitializeFn = unsafe extern "system" fn(dpy: EGLDisplay,
                                                  major: *mut EGLint,
                                                  minor: *mut EGLint)
                                                  -> EGLBoolean;
pub type TerminateFn = unsafe extern "system" fn(dpy: EGLDisplay) -> EGLBoolean;
pub type ChooseConfigFn = unsafe extern "system" fn(dpy: EGLDisplay,
                                                    attrib_list: *const EGLint,
                                                    configs: *mut EGLConfig,
                                                    config_size: EGLint,
                                                    num_config: *mut EGLint)
                                                    -> EGLBoolean;
pub type GetConfigAttribFn = unsafe extern "system" fn(dpy: EGLDisplay,
                                                       config: EGLConfig,
                                                       attribute: EGLint,
                                                       value: *mut EGLint)
                                                       -> EGLBoolean;
pub type CreateWindowSurfaceFn = unsafe extern "system" fn(dpy: EGLDisplay,
                                                           config: EGLConfig,
                                                           win: EGLNativeWindowType,
                                                           attrib_list: *const EGLint)
                                                           -> EGLSurface;
pub type CreatePbufferSurfaceFn = unsafe extern "system" fn(dpy: EGLDisplay,
                                                            config: EGLConfig,
                                                            attrib_list: *const EGLint)
                                                            -> EGLSurface;
pub type DestroySurfaceFn = unsafe extern "system" fn(dpy: EGLDisplay,
                                                      surface: EGLSurface)
                                                      -> EGLBoolean;
pub type CreateContextFn = unsafe extern "system" fn(dpy: EGLDisplay,
                                                     config: EGLConfig,
                                                     share_context: EGLContext,
                                                     attrib_list: *const EGLint)
                                                     -> EGLContext;
pub type DestroyContextFn = unsafe extern "system" fn(dpy: EGLDisplay,
                                                      ctx: EGLContext)
                                                      -> EGLBoolean;
pub type MakeCurrentFn = unsafe extern "system" fn(dpy: EGLDisplay,
                                                   draw: EGLSurface,
                                                   read: EGLSurface,
                                                   ctx: EGLContext)
                                                   -> EGLBoolean;
pub type SwapBuffersFn = unsafe extern "system" fn(dpy: EGLDisplay,
                                                   surface: EGLSurface)
                                                   -> EGLBoolean;
pub type GetProcAddressFn = unsafe extern "system" fn(procname: *const c_char) -> *const c_void;
