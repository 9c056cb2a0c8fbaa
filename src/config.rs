// command-buffer-context/src/config.rs
//
//! The fixed attribute requests used to build a test context.

use crate::egl::{self, EGLint};

use euclid::default::Size2D;

const RGBA_CHANNEL_BIT_DEPTH: EGLint = 8;
const PBUFFER_SIZE: i32 = 1;
const CLIENT_API_VERSION: EGLint = 2;

bitflags! {
    /// The kinds of surface a config must be able to back.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SurfaceTypeFlags: EGLint {
        const PBUFFER = egl::PBUFFER_BIT;
        const WINDOW  = egl::WINDOW_BIT;
    }
}

bitflags! {
    /// The client APIs a config must be renderable by.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RenderableTypeFlags: EGLint {
        const OPENGL_ES2 = egl::OPENGL_ES2_BIT;
    }
}

/// Describes the frame buffer configuration passed to `eglChooseConfig`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigRequest {
    pub surface_type: SurfaceTypeFlags,
    pub renderable_type: RenderableTypeFlags,
    pub red_size: EGLint,
    pub green_size: EGLint,
    pub blue_size: EGLint,
    pub alpha_size: EGLint,
}

impl Default for ConfigRequest {
    /// An ES2-renderable, pbuffer-capable RGBA8888 config.
    fn default() -> ConfigRequest {
        ConfigRequest {
            surface_type: SurfaceTypeFlags::PBUFFER,
            renderable_type: RenderableTypeFlags::OPENGL_ES2,
            red_size: RGBA_CHANNEL_BIT_DEPTH,
            green_size: RGBA_CHANNEL_BIT_DEPTH,
            blue_size: RGBA_CHANNEL_BIT_DEPTH,
            alpha_size: RGBA_CHANNEL_BIT_DEPTH,
        }
    }
}

impl ConfigRequest {
    pub fn to_attrib_list(&self) -> Vec<EGLint> {
        vec![
            egl::SURFACE_TYPE,      self.surface_type.bits(),
            egl::RENDERABLE_TYPE,   self.renderable_type.bits(),
            egl::RED_SIZE,          self.red_size,
            egl::GREEN_SIZE,        self.green_size,
            egl::BLUE_SIZE,         self.blue_size,
            egl::ALPHA_SIZE,        self.alpha_size,
            egl::NONE,
        ]
    }
}

/// The size of the offscreen pbuffer surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PbufferRequest {
    pub size: Size2D<i32>,
}

impl Default for PbufferRequest {
    fn default() -> PbufferRequest {
        PbufferRequest { size: Size2D::new(PBUFFER_SIZE, PBUFFER_SIZE) }
    }
}

impl PbufferRequest {
    pub fn to_attrib_list(&self) -> Vec<EGLint> {
        vec![
            egl::WIDTH,     self.size.width,
            egl::HEIGHT,    self.size.height,
            egl::NONE,
        ]
    }
}

/// Attributes passed to `eglCreateContext`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContextRequest {
    pub client_version: EGLint,
}

impl Default for ContextRequest {
    fn default() -> ContextRequest {
        ContextRequest { client_version: CLIENT_API_VERSION }
    }
}

impl ContextRequest {
    pub fn to_attrib_list(&self) -> Vec<EGLint> {
        vec![egl::CONTEXT_CLIENT_VERSION, self.client_version, egl::NONE]
    }
}
