//! Entry orchestration: decode the logo, open the window, build the draw
//! state, and pump frames until the window is closed.

use log::{debug, info};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::WindowId,
};

use crate::{
    config::ViewerConfig,
    context::GlWindow,
    error::{Error, Result},
    frame_loop::FrameLoop,
    pixels::PixelBuffer,
    render::QuadRenderer,
    shaders,
    texture::SamplerSettings,
};

/// Open the viewer and block until its window is closed.
///
/// The logo is decoded before any window exists. The window, context,
/// shaders, geometry, and texture are then created in that order once the
/// platform reports the application as resumed. Everything is torn down in
/// reverse order before this returns, on success and on failure alike.
///
/// # Errors
///
/// Returns the first error from image decoding, window/context creation,
/// shader compilation, resource upload, or buffer presentation.
pub fn run(config: ViewerConfig) -> Result<()> {
    info!("Initializing...");
    let (width, height) = config.logo_size;
    let logo = PixelBuffer::open(&config.assets.logo)?.expect_size(width, height)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut viewer = Viewer::new(config, logo);
    event_loop.run_app(&mut viewer)?;
    viewer.finish()
}

/// Everything that lives exactly as long as the window.
///
/// The renderer is declared first so its GL objects are deleted while the
/// context is still alive.
struct Session {
    renderer: QuadRenderer,
    window: GlWindow,
}

impl Session {
    fn start(
        event_loop: &ActiveEventLoop,
        config: &ViewerConfig,
        logo: &PixelBuffer,
    ) -> Result<Self> {
        let window = GlWindow::create(event_loop, &config.window)?;
        let vertex_src = shaders::load_source(&config.assets.vertex_shader)?;
        let fragment_src = shaders::load_source(&config.assets.fragment_shader)?;
        let renderer = unsafe {
            QuadRenderer::new(
                window.gl().clone(),
                &vertex_src,
                &fragment_src,
                logo,
                SamplerSettings::LOGO,
            )
        }?;
        Ok(Self { renderer, window })
    }

    fn render(&self, clear_color: [f32; 4]) -> Result<()> {
        unsafe { self.renderer.draw(clear_color, self.window.size()) };
        self.window.present()
    }
}

/// The winit application driving the render loop.
pub struct Viewer {
    config: ViewerConfig,
    /// Pending upload; `None` once a session has been started.
    logo: Option<PixelBuffer>,
    session: Option<Session>,
    frame_loop: FrameLoop,
    error: Option<Error>,
}

impl Viewer {
    /// A viewer that will upload `logo` when the window opens.
    #[must_use]
    pub fn new(config: ViewerConfig, logo: PixelBuffer) -> Self {
        Self {
            config,
            logo: Some(logo),
            session: None,
            frame_loop: FrameLoop::new(),
            error: None,
        }
    }

    /// Frames presented so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frame_loop.frames()
    }

    /// Release the session and report the error that stopped the loop, if
    /// any.
    ///
    /// # Errors
    ///
    /// Returns the error recorded while the event loop was running.
    pub fn finish(mut self) -> Result<()> {
        self.session = None;
        info!("Exiting...");
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        self.frame_loop.terminate();
        self.error.get_or_insert(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(logo) = self.logo.take() else {
            return;
        };

        match Session::start(event_loop, &self.config, &logo) {
            Ok(session) => {
                info!("Running...");
                session.window.request_redraw();
                self.session = Some(session);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.frame_loop.observe(&event);

        if !matches!(event, WindowEvent::RedrawRequested) {
            return;
        }
        let Some(session) = &self.session else {
            return;
        };

        let clear_color = self.config.clear_color;
        let result = self.frame_loop.frame(|| session.render(clear_color));
        if let Err(err) = result {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.frame_loop.is_running() {
            event_loop.exit();
            return;
        }
        if let Some(session) = &self.session {
            session.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.session.take().is_some() {
            debug!("session closed after {} frames", self.frame_loop.frames());
        }
    }
}
