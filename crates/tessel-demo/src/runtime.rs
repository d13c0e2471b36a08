use anyhow::{Context, Result};
use ouroboros::self_referencing;
use std::rc::Rc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use tessel_engine::camera::{self, Camera, TILE_SIZE};
use tessel_engine::coords::{Vec2, Viewport};
use tessel_engine::device::{Gpu, GpuInit, SurfaceErrorAction};
use tessel_engine::input::DragTracker;
use tessel_engine::map::TileGrid;
use tessel_engine::render::{
    AtlasImage, AtlasTexture, RenderCtx, RenderTarget, StrategyKind, TileRenderer, create_renderer,
};
use tessel_engine::time::FrameClock;

const WINDOW_SIZE: LogicalSize<f64> = LogicalSize::new(1366.0, 768.0);

/// Dim gray backdrop (sRGB 105/255, here in linear space).
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.141,
    g: 0.141,
    b: 0.141,
    a: 1.0,
};

/// Frames between window-title FPS refreshes.
const TITLE_REFRESH_FRAMES: u64 = 30;

/// Creates the event loop and drives the demo until the window closes.
pub fn run(kind: StrategyKind, grid: TileGrid, atlas_image: AtlasImage) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut app = DemoApp::new(kind, grid, atlas_image);

    event_loop
        .run_app(&mut app)
        .context("winit event loop terminated with error")?;

    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// What a frame attempt concluded; drives loop control outside the
/// `ouroboros` closure.
#[derive(Copy, Clone, Eq, PartialEq)]
enum FrameOutcome {
    Drawn,
    Skipped,
    Fatal,
}

struct DemoApp {
    kind: StrategyKind,
    grid: Rc<TileGrid>,
    atlas_image: AtlasImage,

    entry: Option<WindowEntry>,
    atlas: Option<AtlasTexture>,
    renderer: Option<Box<dyn TileRenderer>>,

    camera: Camera,
    drag: DragTracker,
    pointer: Vec2,
    clock: FrameClock,

    fatal: Option<anyhow::Error>,
}

impl DemoApp {
    fn new(kind: StrategyKind, grid: TileGrid, atlas_image: AtlasImage) -> Self {
        // Start looking at the middle of the map.
        let camera = Camera {
            center: Vec2::new(grid.width() as f32 / 2.0, grid.height() as f32 / 2.0),
        };

        Self {
            kind,
            grid: Rc::new(grid),
            atlas_image,
            entry: None,
            atlas: None,
            renderer: None,
            camera,
            drag: DragTracker::new(),
            pointer: Vec2::zero(),
            clock: FrameClock::new(),
            fatal: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn setup(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(format!("tessel — {}", self.kind.name()))
            .with_inner_size(WINDOW_SIZE);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, GpuInit::default())),
        }
        .try_build()?;

        entry.with_gpu(|gpu| -> Result<()> {
            let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format());
            let atlas = AtlasTexture::upload(ctx.device, ctx.queue, &self.atlas_image);

            let mut renderer = create_renderer(self.kind);
            renderer.initialize(&ctx, Rc::clone(&self.grid), &atlas)?;

            self.atlas = Some(atlas);
            self.renderer = Some(renderer);
            Ok(())
        })?;

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        self.clock.reset();
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(entry), Some(renderer)) = (self.entry.as_mut(), self.renderer.as_mut()) else {
            return;
        };

        let ft = self.clock.tick();
        let center = self.camera.center;
        let kind = self.kind;

        let outcome = entry.with_mut(|fields| {
            if ft.frame_index % TITLE_REFRESH_FRAMES == 0 {
                let fps = 1.0 / ft.dt;
                fields
                    .window
                    .set_title(&format!("tessel — {} — {fps:.0} fps", kind.name()));
            }

            let gpu = fields.gpu;

            let size = gpu.size();
            let viewport = Viewport::new(size.width as f32, size.height as f32);
            let Some(view_proj) = camera::view_projection(center, viewport, TILE_SIZE) else {
                // Minimized or degenerate surface; nothing to draw.
                return FrameOutcome::Skipped;
            };

            let mut frame = match gpu.begin_frame() {
                Ok(frame) => frame,
                Err(err) => {
                    log::warn!("surface error: {err}");
                    return match gpu.handle_surface_error(err) {
                        SurfaceErrorAction::Fatal => FrameOutcome::Fatal,
                        SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                            FrameOutcome::Skipped
                        }
                    };
                }
            };

            // Clear first; the strategy pass loads what is already there.
            {
                let _clear = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("tessel clear pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &frame.view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                    multiview_mask: None,
                });
            }

            let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format());
            {
                let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
                if let Err(err) = renderer.render(&ctx, &mut target, view_proj) {
                    log::error!("render failed: {err:#}");
                    return FrameOutcome::Fatal;
                }
            }

            fields.window.pre_present_notify();
            gpu.submit(frame);
            FrameOutcome::Drawn
        });

        if outcome == FrameOutcome::Fatal {
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }
        if let Err(err) = self.setup(event_loop) {
            self.fail(event_loop, err.context("startup failed"));
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; the FPS title doubles as the perf readout.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let pos = Vec2::new(position.x as f32, position.y as f32);
                self.pointer = pos;
                if let Some(delta) = self.drag.on_pointer_moved(pos) {
                    self.camera.pan(delta);
                }
            }

            WindowEvent::MouseInput { state, .. } => match state {
                ElementState::Pressed => self.drag.on_button_pressed(self.pointer),
                ElementState::Released => self.drag.on_button_released(),
            },

            WindowEvent::CursorLeft { .. } => self.drag.on_pointer_left(),

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.release();
            log::info!("{} strategy released", renderer.name());
        }
        self.atlas = None;
        self.entry = None;
    }
}
