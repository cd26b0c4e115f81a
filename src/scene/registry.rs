use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    foundation::{
        core::{Canvas, FrameClock, FrameIndex, FrameRange, Fps},
        error::{GearersError, GearersResult},
    },
    scene::tree::VisualTree,
    scenes::{
        alphabet::{AlphabetConfig, AlphabetScene},
        intro::{IntroConfig, IntroScene},
        logo::{LogoConfig, LogoScene},
        promo::{PromoConfig, PromoScene},
    },
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// What a host needs to know to drive a composition.
pub struct CompositionMeta {
    /// Registry id.
    pub id: String,
    /// Number of frames; valid indices are `0..duration_in_frames`.
    pub duration_in_frames: u64,
    /// Timeline rate.
    pub fps: Fps,
    /// Default output size.
    pub canvas: Canvas,
}

impl CompositionMeta {
    /// Every valid frame.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.duration_in_frames),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Output format shared by every scene config.
pub struct Format {
    /// Integer frame rate.
    pub fps: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Length in seconds; rounded to whole frames.
    pub duration_secs: f64,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            fps: 30,
            width: 1920,
            height: 1080,
            duration_secs: 6.0,
        }
    }
}

impl Format {
    /// Format with another duration.
    pub fn lasting(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Validate and derive composition metadata.
    pub fn meta(&self, id: &str) -> GearersResult<CompositionMeta> {
        let fps = Fps::new(self.fps, 1)?;
        if self.width == 0 || self.height == 0 {
            return Err(GearersError::validation(format!(
                "composition '{id}' canvas must be non-empty"
            )));
        }
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return Err(GearersError::validation(format!(
                "composition '{id}' duration must be > 0"
            )));
        }
        let frames = fps.secs_to_frames(self.duration_secs).round().max(1.0) as u64;
        Ok(CompositionMeta {
            id: id.to_owned(),
            duration_in_frames: frames,
            fps,
            canvas: Canvas {
                width: self.width,
                height: self.height,
            },
        })
    }
}

/// A composition: a pure function from a frame clock to a visual tree.
pub trait Scene: Send + Sync {
    /// Identity, length, rate and default size.
    fn meta(&self) -> &CompositionMeta;

    /// Compute the tree for one instant. Must not depend on earlier calls.
    fn render(&self, clock: FrameClock, canvas: Canvas) -> GearersResult<VisualTree>;
}

/// Render one frame at the scene's own rate and size, rejecting out-of-range frames.
pub fn render_frame(scene: &dyn Scene, frame: FrameIndex) -> GearersResult<VisualTree> {
    let meta = scene.meta();
    if frame.0 >= meta.duration_in_frames {
        return Err(GearersError::evaluation(format!(
            "frame {} is out of bounds for '{}' ({} frames)",
            frame.0, meta.id, meta.duration_in_frames
        )));
    }
    scene.render(FrameClock::new(frame, meta.fps), meta.canvas)
}

#[derive(Clone, Debug, Default)]
/// How [`render_range`] spreads work.
pub struct RenderThreading {
    /// Render frames on a dedicated rayon pool.
    pub parallel: bool,
    /// Pool size; `None` lets rayon decide.
    pub threads: Option<usize>,
}

/// Render `range` (start inclusive, end exclusive), returning trees in frame order.
#[tracing::instrument(skip(scene, threading), fields(id = %scene.meta().id))]
pub fn render_range(
    scene: &dyn Scene,
    range: FrameRange,
    threading: &RenderThreading,
) -> GearersResult<Vec<VisualTree>> {
    check_range(scene, range)?;

    if !threading.parallel {
        return range.frames().map(|f| render_frame(scene, f)).collect();
    }

    let pool = build_thread_pool(threading.threads)?;
    let frames: Vec<FrameIndex> = range.frames().collect();
    pool.install(|| {
        frames
            .into_par_iter()
            .map(|f| render_frame(scene, f))
            .collect()
    })
}

/// Render `range` and hand each tree to `sink` as soon as it is computed.
///
/// In parallel mode `sink` runs on the same pool as the render, so frames arrive in no
/// particular order. The first error from either side stops the run.
#[tracing::instrument(skip(scene, threading, sink), fields(id = %scene.meta().id))]
pub fn render_range_with<F>(
    scene: &dyn Scene,
    range: FrameRange,
    threading: &RenderThreading,
    sink: F,
) -> GearersResult<()>
where
    F: Fn(VisualTree) -> GearersResult<()> + Sync,
{
    check_range(scene, range)?;
    let render_one = |f: FrameIndex| sink(render_frame(scene, f)?);

    if !threading.parallel {
        return range.frames().try_for_each(render_one);
    }

    let pool = build_thread_pool(threading.threads)?;
    let frames: Vec<FrameIndex> = range.frames().collect();
    pool.install(|| frames.into_par_iter().try_for_each(render_one))
}

fn check_range(scene: &dyn Scene, range: FrameRange) -> GearersResult<()> {
    if range.is_empty() {
        return Err(GearersError::validation("render range must be non-empty"));
    }
    let meta = scene.meta();
    if range.end.0 > meta.duration_in_frames {
        return Err(GearersError::evaluation(format!(
            "render range end {} exceeds '{}' duration {}",
            range.end.0, meta.id, meta.duration_in_frames
        )));
    }
    tracing::debug!(frames = range.len_frames(), "render range accepted");
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> GearersResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(GearersError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| GearersError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

/// Read `<dir>/<id>.json` into `T`, or `T::default()` when the file does not exist.
pub fn load_config<T: DeserializeOwned + Default>(dir: &Path, id: &str) -> GearersResult<T> {
    let path = dir.join(format!("{id}.json"));
    if !path.exists() {
        tracing::debug!(id, path = %path.display(), "no config file, using defaults");
        return Ok(T::default());
    }
    let text = std::fs::read_to_string(&path).map_err(|e| {
        GearersError::Other(anyhow::Error::new(e).context(path.display().to_string()))
    })?;
    let cfg = serde_json::from_str(&text)
        .map_err(|e| GearersError::serde(format!("{}: {e}", path.display())))?;
    tracing::debug!(id, path = %path.display(), "loaded scene config");
    Ok(cfg)
}

/// The set of compositions a host can render.
pub struct Registry {
    scenes: Vec<Box<dyn Scene>>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self { scenes: Vec::new() }
    }

    /// Built-in compositions with default configs.
    pub fn builtin() -> GearersResult<Self> {
        Self::from_configs(
            AlphabetConfig::default(),
            IntroConfig::default(),
            PromoConfig::default(),
            LogoConfig::default(),
        )
    }

    /// Built-in compositions, each overridden by `<dir>/<id>.json` when present.
    pub fn with_configs(dir: &Path) -> GearersResult<Self> {
        Self::from_configs(
            load_config(dir, AlphabetScene::ID)?,
            load_config(dir, IntroScene::ID)?,
            load_config(dir, PromoScene::ID)?,
            load_config(dir, LogoScene::ID)?,
        )
    }

    fn from_configs(
        alphabet: AlphabetConfig,
        intro: IntroConfig,
        promo: PromoConfig,
        logo: LogoConfig,
    ) -> GearersResult<Self> {
        let mut reg = Self::new();
        reg.register(Box::new(AlphabetScene::new(alphabet)?))?;
        reg.register(Box::new(IntroScene::new(intro)?))?;
        reg.register(Box::new(PromoScene::new(promo)?))?;
        reg.register(Box::new(LogoScene::new(logo)?))?;
        Ok(reg)
    }

    /// Add a scene; ids must be unique.
    pub fn register(&mut self, scene: Box<dyn Scene>) -> GearersResult<()> {
        let id = &scene.meta().id;
        if self.scenes.iter().any(|s| &s.meta().id == id) {
            return Err(GearersError::validation(format!(
                "composition '{id}' is already registered"
            )));
        }
        self.scenes.push(scene);
        Ok(())
    }

    /// Metadata of every composition, in registration order.
    pub fn list(&self) -> impl Iterator<Item = &CompositionMeta> {
        self.scenes.iter().map(|s| s.meta())
    }

    /// Look up a composition by id.
    pub fn get(&self, id: &str) -> GearersResult<&dyn Scene> {
        self.scenes
            .iter()
            .find(|s| s.meta().id == id)
            .map(|s| s.as_ref())
            .ok_or_else(|| GearersError::evaluation(format!("unknown composition '{id}'")))
    }

    /// Render one frame of `id`.
    pub fn render(&self, id: &str, frame: FrameIndex) -> GearersResult<VisualTree> {
        render_frame(self.get(id)?, frame)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/registry.rs"]
mod tests;
