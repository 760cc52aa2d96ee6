//! Window and OpenGL context bootstrap.
//!
//! [`GlWindow::create`] opens a fixed-size window centered on the primary
//! monitor and requests a double-buffered core-profile context. It then loads
//! the GL function table and verifies the driver version. Every step is
//! fatal on failure. Objects created by earlier steps are released as the
//! error propagates.

use std::{ffi::CStr, sync::Arc};

use glow::HasContext;
use glutin::{
    config::{Config, ConfigTemplateBuilder},
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::GetGlDisplay,
    prelude::*,
    surface::{Surface, SurfaceAttributesBuilder, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use log::{debug, info};
use raw_window_handle::HasWindowHandle;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event_loop::ActiveEventLoop,
    window::Window,
};

use crate::{
    config::WindowConfig,
    error::{Error, Result},
};

/// Top-left corner that centers a `window` sized rectangle on a monitor at
/// `monitor_origin` with `monitor_size`.
///
/// Windows larger than the monitor are pinned to its origin.
#[must_use]
pub fn centered_position(
    monitor_origin: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    window: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let offset =
        |screen: u32, win: u32| i32::try_from(screen.saturating_sub(win) / 2).unwrap_or(0);
    PhysicalPosition::new(
        monitor_origin.x + offset(monitor_size.width, window.width),
        monitor_origin.y + offset(monitor_size.height, window.height),
    )
}

/// Whether a driver reporting `major.minor` satisfies `required`.
#[must_use]
pub fn version_satisfies(major: u32, minor: u32, required: (u8, u8)) -> bool {
    (major, minor) >= (u32::from(required.0), u32::from(required.1))
}

/// Prefer the config with the most samples, like the glutin examples do.
///
/// `find_configs` fails with `BadConfig` instead of yielding an empty
/// iterator, so the picker always sees at least one config.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, config| {
            if config.num_samples() > best.num_samples() {
                config
            } else {
                best
            }
        })
        .expect("glutin yields at least one config that matches the template")
}

/// A window with a current OpenGL context and loaded function table.
///
/// Field order is drop order: the context is released before the surface,
/// and both before the window.
pub struct GlWindow {
    gl: Arc<glow::Context>,
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    window: Window,
}

impl GlWindow {
    /// Open the window and make a context of `config.gl_version` current on
    /// it.
    ///
    /// # Errors
    ///
    /// - [`Error::Window`] if no window or matching GL config is available.
    /// - [`Error::WindowHandle`] if the window has no usable native handle.
    /// - [`Error::Context`], [`Error::Surface`], or [`Error::MakeCurrent`] if
    ///   the driver rejects a step.
    /// - [`Error::UnsupportedVersion`] if the loaded GL is older than
    ///   requested.
    pub fn create(event_loop: &ActiveEventLoop, config: &WindowConfig) -> Result<Self> {
        let size = PhysicalSize::new(config.width, config.height);
        let mut attributes = Window::default_attributes()
            .with_title(config.title.as_str())
            .with_inner_size(size)
            .with_resizable(false)
            .with_visible(config.visible);
        if let Some(monitor) = event_loop.primary_monitor() {
            attributes =
                attributes.with_position(centered_position(monitor.position(), monitor.size(), size));
        }

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_single_buffering(false);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, pick_config)
            .map_err(|e| Error::Window(e.to_string()))?;
        let window = window.ok_or_else(|| Error::Window("no window was created".into()))?;
        debug!("created window {:?}", window.id());

        let raw_window_handle = window
            .window_handle()
            .map_err(Error::WindowHandle)?
            .as_raw();

        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(Error::Context)?;

        let surface_attributes = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .map_err(Error::WindowHandle)?;
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(Error::Surface)?;

        let context = not_current.make_current(&surface).map_err(Error::MakeCurrent)?;

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|s: &CStr| gl_display.get_proc_address(s))
        };

        let version = gl.version();
        if !version_satisfies(version.major, version.minor, config.gl_version) {
            return Err(Error::UnsupportedVersion {
                major: version.major,
                minor: version.minor,
                required_major: u32::from(major),
                required_minor: u32::from(minor),
            });
        }
        info!(
            "OpenGL {}.{} ({})",
            version.major,
            version.minor,
            unsafe { gl.get_parameter_string(glow::RENDERER) }
        );

        Ok(Self {
            gl: Arc::new(gl),
            context,
            surface,
            window,
        })
    }

    /// The loaded function table, shared with renderers.
    #[must_use]
    pub fn gl(&self) -> &Arc<glow::Context> {
        &self.gl
    }

    /// Drawable size in physical pixels, never zero.
    #[must_use]
    pub fn size(&self) -> [u32; 2] {
        let size = self.window.inner_size();
        [size.width.max(1), size.height.max(1)]
    }

    /// Schedule a `RedrawRequested` event.
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    /// Swap the back buffer to the screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Surface`] if the swap fails.
    pub fn present(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(Error::Surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_on_monitor() {
        let pos = centered_position(
            PhysicalPosition::new(0, 0),
            PhysicalSize::new(1920, 1080),
            PhysicalSize::new(800, 600),
        );
        assert_eq!(pos, PhysicalPosition::new(560, 240));
    }

    #[test]
    fn centers_on_offset_monitor() {
        let pos = centered_position(
            PhysicalPosition::new(1920, -200),
            PhysicalSize::new(1280, 1024),
            PhysicalSize::new(800, 600),
        );
        assert_eq!(pos, PhysicalPosition::new(1920 + 240, -200 + 212));
    }

    #[test]
    fn oversized_window_pins_to_origin() {
        let pos = centered_position(
            PhysicalPosition::new(10, 20),
            PhysicalSize::new(640, 480),
            PhysicalSize::new(800, 600),
        );
        assert_eq!(pos, PhysicalPosition::new(10, 20));
    }

    #[test]
    fn version_check_accepts_newer_drivers() {
        assert!(version_satisfies(3, 1, (3, 1)));
        assert!(version_satisfies(3, 3, (3, 1)));
        assert!(version_satisfies(4, 0, (3, 1)));
    }

    #[test]
    fn version_check_rejects_older_drivers() {
        assert!(!version_satisfies(3, 0, (3, 1)));
        assert!(!version_satisfies(2, 1, (3, 1)));
    }
}
