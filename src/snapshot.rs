use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{Frame, FrameLoop, Viewport};
use crate::error::{Result, SceneError};
use crate::render::{Camera, Canvas, Projector};
use crate::scene::{SceneComposer, SceneSnapshot};

/// Timestamped directory under `snapshots/`
pub fn default_output_dir() -> PathBuf {
    PathBuf::from("snapshots").join(chrono::Local::now().format("%Y%m%d-%H%M%S").to_string())
}

fn output_error(path: &Path, message: impl ToString) -> SceneError {
    SceneError::Output {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

pub fn write_png(canvas: &Canvas, path: &Path) -> Result<()> {
    let (width, height) = canvas.dimensions();
    let expected = width as usize * height as usize * 4;
    let image = image::RgbaImage::from_raw(width, height, canvas.pixels().to_vec()).ok_or(
        SceneError::FrameSize {
            expected,
            actual: canvas.pixels().len(),
        },
    )?;

    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| output_error(path, e))
}

pub fn write_scene_json(snapshot: &SceneSnapshot, path: &Path) -> Result<()> {
    let json = snapshot.to_json().map_err(|e| output_error(path, e))?;
    fs::write(path, json).map_err(|e| output_error(path, e))
}

/// Headless rendering of a fixed-rate frame sequence
#[derive(Debug, Clone)]
pub struct SnapshotRunner {
    pub viewport: Viewport,
    pub frames: u32,
    pub fps: f32,
    pub output: PathBuf,
    pub dump_scene: bool,
    pub projector: Projector,
}

/// What a headless run produced
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceReport {
    pub frames: Vec<PathBuf>,
    pub scene_json: Option<PathBuf>,
    /// Frame callbacks left registered after unmount
    pub callbacks_remaining: usize,
}

impl SnapshotRunner {
    pub fn new(viewport: Viewport, frames: u32, fps: f32, output: PathBuf) -> Self {
        Self {
            viewport,
            frames,
            fps,
            output,
            dump_scene: false,
            projector: Projector::default(),
        }
    }

    pub fn with_scene_dump(mut self, dump: bool) -> Self {
        self.dump_scene = dump;
        self
    }

    /// Mount `composer`, render every frame to PNG, then unmount
    pub fn run(&self, composer: SceneComposer) -> Result<SequenceReport> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(SceneError::InvalidConfig(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }
        if self.viewport.is_empty() {
            return Err(SceneError::InvalidConfig("viewport is empty".into()));
        }

        fs::create_dir_all(&self.output).map_err(|e| output_error(&self.output, e))?;
        log::info!(
            "rendering {} frames at {} fps into {}",
            self.frames,
            self.fps,
            self.output.display()
        );

        let camera = Camera::for_viewport(composer.environment().camera, &self.viewport);
        let mut frame_loop = FrameLoop::new();
        let mounted = composer.mount(&mut frame_loop);
        let mut frames = Vec::with_capacity(self.frames as usize);

        for number in 0..self.frames {
            let frame = Frame::fixed_step(number as u64, self.fps);
            frame_loop.dispatch(&frame);

            let canvas = self.projector.render(&mounted.scene(), &camera);
            let path = self.output.join(format!("frame_{number:04}.png"));
            write_png(&canvas, &path)?;
            log::debug!("wrote {} (t = {:.3})", path.display(), frame.time);
            frames.push(path);
        }

        let scene_json = if self.dump_scene {
            let path = self.output.join("scene.json");
            write_scene_json(&mounted.scene().snapshot(), &path)?;
            Some(path)
        } else {
            None
        };

        let callbacks_remaining = mounted.unmount(&mut frame_loop);

        Ok(SequenceReport {
            frames,
            scene_json,
            callbacks_remaining,
        })
    }
}
