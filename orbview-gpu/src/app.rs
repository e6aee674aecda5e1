//! winit event adapter and the GPU-backed viewer it drives.

use std::sync::Arc;

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key as WinitKey, NamedKey};
use winit::window::{Window, WindowBuilder};

use orbview_core::{Control, Key, Viewer, ViewerConfig, ViewerHandler, ESCAPE_CODE};

use crate::context::GpuContext;
use crate::error::RenderError;
use crate::pipeline::SpherePipeline;
use crate::resources::{self, ShaderSources};
use crate::uniforms::ShaderUniforms;

/// Viewer state plus the GPU resources that present it
pub struct GpuViewer {
    viewer: Viewer,
    ctx: GpuContext,
    pipeline: SpherePipeline,
    failure: Option<RenderError>,
}

impl GpuViewer {
    pub async fn new(
        window: Arc<Window>,
        config: &ViewerConfig,
        shaders: &ShaderSources,
    ) -> Result<Self, RenderError> {
        let mut viewer = Viewer::new(config)?;
        let ctx = GpuContext::new(window.clone()).await?;
        let pipeline = SpherePipeline::new(&ctx, viewer.mesh(), shaders).await?;

        let size = window.inner_size();
        viewer.on_resize(size.width, size.height);

        Ok(Self {
            viewer,
            ctx,
            pipeline,
            failure: None,
        })
    }

    /// Fatal error hit while the event loop was running
    pub fn take_failure(&mut self) -> Option<RenderError> {
        self.failure.take()
    }
}

impl ViewerHandler for GpuViewer {
    fn on_resize(&mut self, width: u32, height: u32) -> Control {
        self.ctx.resize(width, height);
        self.viewer.on_resize(width, height)
    }

    fn on_redraw(&mut self) -> Control {
        self.viewer.on_redraw();
        let uniforms = ShaderUniforms::new(self.viewer.transforms(), self.viewer.material());

        match self.pipeline.render(&self.ctx, &uniforms) {
            Ok(()) => Control::Continue,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost, reconfiguring");
                self.ctx.reconfigure();
                Control::Redraw
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("surface timeout, skipping frame");
                Control::Continue
            }
            Err(e) => {
                tracing::error!("render failed: {e}");
                self.failure = Some(e.into());
                Control::Exit
            }
        }
    }

    fn on_key(&mut self, key: Key) -> Control {
        self.viewer.on_key(key)
    }
}

/// Translate a winit logical key into a viewer key
pub fn map_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(NamedKey::Escape) => Key::from_code(ESCAPE_CODE),
        WinitKey::Character(text) => text.chars().next().map_or(Key::Other, Key::from),
        _ => Key::Other,
    }
}

/// Open the window, set up the GPU and run until escape or close.
pub fn run(config: ViewerConfig) -> Result<(), RenderError> {
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_position(PhysicalPosition::new(0, 0))
            .build(&event_loop)?,
    );

    let shaders = ShaderSources::load(&resources::resource_dir())?;
    let mut app = pollster::block_on(GpuViewer::new(window.clone(), &config, &shaders))?;

    tracing::info!("Entering event loop");
    run_event_loop(event_loop, &window, &mut app)?;

    match app.take_failure() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Dispatch window events to `handler` until it asks to exit.
pub fn run_event_loop<H: ViewerHandler>(
    event_loop: EventLoop<()>,
    window: &Window,
    handler: &mut H,
) -> Result<(), RenderError> {
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run(|event, elwt| {
        let Event::WindowEvent { window_id, event } = event else {
            return;
        };
        if window_id != window.id() {
            return;
        }

        let control = match event {
            WindowEvent::CloseRequested => Control::Exit,
            WindowEvent::Resized(size) => handler.on_resize(size.width, size.height),
            WindowEvent::RedrawRequested => handler.on_redraw(),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                handler.on_key(map_key(&event.logical_key))
            }
            _ => Control::Continue,
        };

        match control {
            Control::Continue => {}
            Control::Redraw => window.request_redraw(),
            Control::Exit => {
                tracing::info!("Exit requested");
                elwt.exit();
            }
        }
    })?;
    Ok(())
}
