use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use collabrx_scene::cli::Cli;
use collabrx_scene::config::SceneConfig;
use collabrx_scene::core::{AnimationClock, Frame, FpsCounter, FrameLoop, Throttled, Viewport};
use collabrx_scene::render::{Camera, Projector, SurfacePresenter};
use collabrx_scene::reveal::{IntersectionObserver, Rect, Visibility, VisibilityObserver};
use collabrx_scene::scene::{MountedScene, SceneComposer};
use collabrx_scene::snapshot::{default_output_dir, SnapshotRunner};

// === Constants ===

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const ERROR_LOG_INTERVAL: f32 = 2.0;

/// Observed regions of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Hero,
}

struct App {
    cli: Cli,
    config: SceneConfig,
    window: Option<Arc<Window>>,
    presenter: Option<SurfacePresenter>,
    frame_loop: FrameLoop,
    scene: Option<MountedScene>,
    projector: Projector,
    clock: AnimationClock,
    frame_number: u64,
    fps: FpsCounter,
    error_log: Throttled,
    visibility: IntersectionObserver<Region>,
    occluded: bool,
    hidden: bool,
    user_paused: bool,
}

impl App {
    fn new(cli: Cli, config: SceneConfig) -> Self {
        Self {
            cli,
            config,
            window: None,
            presenter: None,
            frame_loop: FrameLoop::new(),
            scene: None,
            projector: Projector::default(),
            clock: AnimationClock::new(),
            frame_number: 0,
            fps: FpsCounter::new(FPS_UPDATE_INTERVAL),
            error_log: Throttled::new(ERROR_LOG_INTERVAL),
            visibility: IntersectionObserver::default(),
            occluded: false,
            hidden: false,
            user_paused: false,
        }
    }

    fn viewport(&self) -> Option<Viewport> {
        let window = self.window.as_ref()?;
        let size = window.inner_size();
        Some(Viewport::from_physical(size.width, size.height, window.scale_factor()))
    }

    /// Re-test the hero region and pause the clock while it cannot be seen
    fn refresh_visibility(&mut self) {
        let Some(viewport) = self.viewport() else {
            return;
        };

        let page = Rect::new(0.0, 0.0, viewport.width as f32, viewport.height as f32);
        self.visibility.observe(Region::Hero, page);
        let root = if self.occluded || viewport.is_empty() {
            Rect::new(0.0, 0.0, 0.0, 0.0)
        } else {
            page
        };

        for change in self.visibility.evaluate(root) {
            log::debug!("{:?} is now {:?}", change.target, change.visibility);
            self.hidden = change.visibility == Visibility::Hidden;
        }
        self.sync_clock();
    }

    fn sync_clock(&mut self) {
        let should_pause = self.user_paused || self.hidden;
        if should_pause != self.clock.is_paused() {
            self.clock.toggle();
            log::info!(
                "animation {} at t = {:.2}s",
                if should_pause { "paused" } else { "resumed" },
                self.clock.elapsed()
            );
        }
    }

    fn redraw(&mut self) {
        let delta = self.clock.tick();
        if !self.clock.is_paused() {
            self.frame_number += 1;
            let frame = Frame::new(self.frame_number, self.clock.elapsed(), delta);
            self.frame_loop.dispatch(&frame);

            if let Some(fps) = self.fps.record(delta) {
                if !self.cli.no_ui {
                    log::info!("FPS: {fps:.1}");
                }
            }
        }

        if let Err(e) = self.present() {
            if self.error_log.try_tick(delta) {
                log::warn!("render error: {e:#}");
            }
        }
    }

    fn present(&mut self) -> Result<()> {
        let Some(viewport) = self.viewport() else {
            return Ok(());
        };
        let (Some(scene), Some(presenter)) = (&self.scene, &mut self.presenter) else {
            return Ok(());
        };
        if viewport.is_empty() {
            return Ok(());
        }

        let camera = Camera::for_viewport(scene.scene().environment().camera, &viewport);
        let canvas = self.projector.render(&scene.scene(), &camera);
        let (width, height) = canvas.dimensions();
        presenter.present(canvas.pixels(), width, height)
    }

    fn shutdown(&mut self) {
        if let Some(scene) = self.scene.take() {
            let remaining = scene.unmount(&mut self.frame_loop);
            log::info!("{remaining} frame callbacks remain after unmount");
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("CollabRx - Cloud & Blockchain for Precision Medicine")
                .with_inner_size(winit::dpi::LogicalSize::new(self.cli.width, self.cli.height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let presenter = match SurfacePresenter::new(window.clone()) {
            Ok(p) => p,
            Err(e) => {
                log::error!("failed to initialize presenter: {e:#}");
                event_loop.exit();
                return;
            }
        };

        let composer = SceneComposer::new(&self.config);
        self.scene = Some(composer.mount(&mut self.frame_loop));
        self.window = Some(window);
        self.presenter = Some(presenter);
        self.clock.reset();
        self.refresh_visibility();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.shutdown();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Space),
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.user_paused = !self.user_paused;
                self.sync_clock();
            }
            WindowEvent::Resized(size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(size.width, size.height);
                }
                self.refresh_visibility();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::Occluded(occluded) => {
                self.occluded = occluded;
                self.refresh_visibility();
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.clock.is_paused() {
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

fn run_headless(cli: &Cli, config: &SceneConfig) -> Result<()> {
    let output = cli.output.clone().unwrap_or_else(default_output_dir);
    let runner = SnapshotRunner::new(cli.viewport(), cli.frames, cli.fps, output)
        .with_scene_dump(cli.dump_scene);

    let report = runner
        .run(SceneComposer::new(config))
        .context("headless render failed")?;

    log::info!(
        "wrote {} frames, {} callbacks remain after unmount",
        report.frames.len(),
        report.callbacks_remaining
    );
    if let Some(path) = report.scene_json {
        log::info!("scene dumped to {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.scene_config().context("failed to load scene config")?;

    if cli.headless {
        return run_headless(&cli, &config);
    }

    let event_loop = EventLoop::new()?;
    if !cli.no_ui {
        println!("CollabRx hero scene - Space to pause, Escape to quit");
    }

    let mut app = App::new(cli, config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
