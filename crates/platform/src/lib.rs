use gfx::{Renderer, RendererError};
use std::sync::Arc;
use std::{thread, time::Duration};
use winit::{
    application::ApplicationHandler,
    error::{EventLoopError, OsError},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

mod demo;
mod highlight;

pub use demo::Demo;
pub use highlight::{highlight_expression, plain};

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("event loop: {0}")]
    EventLoop(#[from] EventLoopError),
    #[error("failed to create window: {0}")]
    CreateWindow(#[from] OsError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
}

enum UserEvent {
    Tick,
}

/// Open the demo window and run until it is closed.
pub fn run() -> Result<(), PlatformError> {
    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    let proxy = event_loop.create_proxy();

    let mut app = PlatformApp {
        window: None,
        renderer: None,
        demo: None,
        proxy: Some(proxy),
        ticker_started: false,
        error: None,
    };
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct PlatformApp {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    demo: Option<Demo>,
    proxy: Option<EventLoopProxy<UserEvent>>,
    ticker_started: bool,
    /// First fatal error; the loop exits once it is set.
    error: Option<PlatformError>,
}

impl PlatformApp {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let window = match &self.window {
            Some(window) => Arc::clone(window),
            None => {
                let attributes = Window::default_attributes()
                    .with_title("Styled Input")
                    .with_inner_size(winit::dpi::LogicalSize::new(480.0, 360.0));
                let window = Arc::new(event_loop.create_window(attributes)?);
                self.window = Some(Arc::clone(&window));
                window
            }
        };

        if self.renderer.is_none() {
            let renderer = Renderer::new(window)?;
            if self.demo.is_none() {
                self.demo = Some(Demo::new(renderer.context()));
            }
            self.renderer = Some(renderer);
        }
        Ok(())
    }

    fn start_ticker(&mut self) {
        if self.ticker_started {
            return;
        }
        self.ticker_started = true;

        if let Some(proxy) = self.proxy.clone() {
            thread::spawn(move || {
                let frame = Duration::from_millis(16); // ~60Hz
                while proxy.send_event(UserEvent::Tick).is_ok() {
                    thread::sleep(frame);
                }
            });
        }
    }
}

impl ApplicationHandler<UserEvent> for PlatformApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(err) = self.init(event_loop) {
            log::error!(target: "platform", "startup failed: {err}");
            self.error = Some(err);
            event_loop.exit();
            return;
        }
        self.start_ticker();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Tick => {
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_mut()) else {
            return;
        };
        renderer.on_window_event(window, &event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!(target: "platform", "close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => renderer.resize(new_size),
            WindowEvent::RedrawRequested => {
                if let Some(demo) = self.demo.as_mut() {
                    renderer.render(window, |ctx| demo.ui(ctx));
                }
            }
            _ => {}
        }
    }
}
