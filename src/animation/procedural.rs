//! Cyclic motion generated from a single posed frame (walk, run, idle) and keyframe tweening.

use std::f64::consts::{PI, TAU};
use std::str::FromStr;

use crate::animation::frames::{AnimationFrame, FrameContent, RenderedPart};
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::SpriteError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Which motion to synthesize from a base frame.
pub enum AnimationKind {
    /// No motion: the base frame alone.
    #[default]
    Static,
    Walk,
    Run,
    Idle,
}

impl AnimationKind {
    pub fn default_frame_count(self) -> usize {
        match self {
            Self::Static => 1,
            Self::Walk => 8,
            Self::Run => 6,
            Self::Idle => 4,
        }
    }

    fn id_prefix(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Walk => "walk",
            Self::Run => "run",
            Self::Idle => "idle",
        }
    }

    fn motions(self) -> &'static [Motion] {
        match self {
            Self::Static => &[],
            Self::Walk => WALK,
            Self::Run => RUN,
            Self::Idle => IDLE,
        }
    }
}

impl FromStr for AnimationKind {
    type Err = SpriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" | "none" => Ok(Self::Static),
            "walk" => Ok(Self::Walk),
            "run" => Ok(Self::Run),
            "idle" => Ok(Self::Idle),
            other => Err(SpriteError::validation(format!(
                "unknown animation kind \"{other}\" (expected walk, run, idle or static)"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Channel {
    /// Added to the base y position.
    OffsetY,
    /// Replaces the rotation.
    RotationDeg,
}

/// `value = amp * sin(freq * angle + phase)` applied to one part channel.
#[derive(Clone, Copy, Debug)]
struct Motion {
    part: &'static str,
    channel: Channel,
    amp: f64,
    freq: f64,
    phase: f64,
}

const fn m(part: &'static str, channel: Channel, amp: f64, freq: f64, phase: f64) -> Motion {
    Motion {
        part,
        channel,
        amp,
        freq,
        phase,
    }
}

use Channel::{OffsetY, RotationDeg};

const WALK: &[Motion] = &[
    m("leftLeg", OffsetY, 5.0, 1.0, 0.0),
    m("leftLeg", RotationDeg, 15.0, 1.0, 0.0),
    m("rightLeg", OffsetY, 5.0, 1.0, PI),
    m("rightLeg", RotationDeg, 15.0, 1.0, PI),
    m("leftArm", RotationDeg, 20.0, 1.0, PI),
    m("rightArm", RotationDeg, 20.0, 1.0, 0.0),
    m("body", OffsetY, 2.0, 2.0, 0.0),
];

const RUN: &[Motion] = &[
    m("leftLeg", OffsetY, 8.0, 1.0, 0.0),
    m("leftLeg", RotationDeg, 30.0, 1.0, 0.0),
    m("rightLeg", OffsetY, 8.0, 1.0, PI),
    m("rightLeg", RotationDeg, 30.0, 1.0, PI),
    m("leftArm", RotationDeg, 45.0, 1.0, PI),
    m("rightArm", RotationDeg, 45.0, 1.0, 0.0),
    m("body", OffsetY, 4.0, 2.0, 0.0),
    m("body", RotationDeg, 3.0, 1.0, 0.0),
];

const IDLE: &[Motion] = &[
    m("body", OffsetY, 2.0, 1.0, 0.0),
    m("leftArm", OffsetY, 1.0, 1.0, 0.0),
    m("rightArm", OffsetY, 1.0, 1.0, 0.0),
    m("head", RotationDeg, 2.0, 1.0, 0.0),
];

/// Eight-frame walk cycle: legs swing in opposition, arms counter-swing, body bobs twice.
pub fn walk(base: &AnimationFrame, frame_count: usize) -> Vec<AnimationFrame> {
    cycle(base, AnimationKind::Walk, frame_count)
}

/// Six-frame run cycle with larger swings and a slight body lean.
pub fn run(base: &AnimationFrame, frame_count: usize) -> Vec<AnimationFrame> {
    cycle(base, AnimationKind::Run, frame_count)
}

/// Four-frame breathing loop.
pub fn idle(base: &AnimationFrame, frame_count: usize) -> Vec<AnimationFrame> {
    cycle(base, AnimationKind::Idle, frame_count)
}

/// `kind` at its default frame count. [`AnimationKind::Static`] yields the base frame alone.
pub fn generate(base: &AnimationFrame, kind: AnimationKind) -> Vec<AnimationFrame> {
    match kind {
        AnimationKind::Static => vec![base.clone()],
        _ => cycle(base, kind, kind.default_frame_count()),
    }
}

fn cycle(base: &AnimationFrame, kind: AnimationKind, frame_count: usize) -> Vec<AnimationFrame> {
    (0..frame_count)
        .map(|i| {
            let angle = TAU * i as f64 / frame_count as f64;
            let content = match &base.content {
                FrameContent::Parts(parts) => FrameContent::Parts(
                    parts
                        .iter()
                        .map(|(name, part)| (name.clone(), animate(name, part, kind, angle)))
                        .collect(),
                ),
                FrameContent::Flattened(img) => FrameContent::Flattened(img.clone()),
            };
            AnimationFrame {
                id: format!("{}_{i}", kind.id_prefix()),
                duration_ms: base.duration_ms,
                content,
            }
        })
        .collect()
}

fn animate(name: &str, base: &RenderedPart, kind: AnimationKind, angle: f64) -> RenderedPart {
    let mut out = base.clone();
    for motion in kind.motions().iter().filter(|mo| mo.part == name) {
        let v = motion.amp * (motion.freq * angle + motion.phase).sin();
        match motion.channel {
            OffsetY => out.position.y = base.position.y + v,
            RotationDeg => out.rotation_deg = v,
        }
    }
    out
}

/// `frame_count` in-between frames strictly between `start` and `end` (`t = i / (n + 1)`).
///
/// Only parts present in both keyframes are tweened; images come from `start`.
pub fn interpolate(
    start: &AnimationFrame,
    end: &AnimationFrame,
    frame_count: usize,
) -> Vec<AnimationFrame> {
    (1..=frame_count)
        .map(|i| {
            let t = i as f64 / (frame_count + 1) as f64;
            let parts = start
                .parts()
                .iter()
                .filter_map(|(name, a)| {
                    let b = end.part(name)?;
                    Some((
                        name.clone(),
                        RenderedPart {
                            image: a.image.clone(),
                            position: Point::new(
                                lerp(a.position.x, b.position.x, t),
                                lerp(a.position.y, b.position.y, t),
                            ),
                            rotation_deg: lerp(a.rotation_deg, b.rotation_deg, t),
                            scale: Vec2::new(
                                lerp(a.scale.x, b.scale.x, t),
                                lerp(a.scale.y, b.scale.y, t),
                            ),
                            pivot: a.pivot,
                        },
                    ))
                })
                .collect();
            AnimationFrame {
                id: format!("interpolated_{}_{}_{i}", start.id, end.id),
                duration_ms: start.duration_ms,
                content: FrameContent::Parts(parts),
            }
        })
        .collect()
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/animation/procedural.rs"]
mod tests;
