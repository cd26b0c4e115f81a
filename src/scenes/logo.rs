use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        color::Color,
        core::{Canvas, FrameClock},
        error::GearersResult,
    },
    scene::{
        registry::{CompositionMeta, Format, Scene},
        tree::{VisualNode, VisualTree},
    },
    shapes::logo::LogoSpec,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Single-frame still of the brand logo.
pub struct LogoConfig {
    /// Rate, size and length (one frame by default).
    pub format: Format,
    /// Frame background.
    pub background: Color,
    /// Logo geometry.
    pub logo: LogoSpec,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            format: Format {
                fps: 30,
                width: 800,
                height: 800,
                duration_secs: 1.0 / 30.0,
            },
            background: Color::WHITE,
            logo: LogoSpec::default(),
        }
    }
}

/// Composition `logo`.
pub struct LogoScene {
    meta: CompositionMeta,
    config: LogoConfig,
}

impl LogoScene {
    /// Registry id.
    pub const ID: &'static str = "logo";

    /// Validate `config` and build the scene.
    pub fn new(config: LogoConfig) -> GearersResult<Self> {
        let meta = config.format.meta(Self::ID)?;
        // Surface bad logo geometry at construction rather than on the first frame.
        config.logo.to_node("logo", meta.canvas.center())?;
        Ok(Self { meta, config })
    }
}

impl Scene for LogoScene {
    fn meta(&self) -> &CompositionMeta {
        &self.meta
    }

    #[tracing::instrument(name = "logo", skip(self))]
    fn render(&self, clock: FrameClock, canvas: Canvas) -> GearersResult<VisualTree> {
        let root = VisualNode::group("still")
            .child(self.config.logo.to_node("logo", canvas.center())?);
        Ok(VisualTree {
            composition: Self::ID.to_owned(),
            frame: clock.frame,
            canvas,
            background: self.config.background,
            root,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/logo.rs"]
mod tests;
