use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::foundation::core::{Affine, Point, Rect, Size, Vec2};
use crate::foundation::error::{SpriteError, SpriteResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Static reference pose data: named body-part rectangles per animation frame.
///
/// Templates are immutable once loaded; the editor only reads them.
pub struct Template {
    /// Lookup name (matches `<name>.json`).
    pub name: String,
    /// Human-facing label. Falls back to `name` when absent.
    #[serde(default)]
    pub display_name: String,
    /// Pose frames in playback order. The first frame is the drawing reference.
    pub frames: Vec<TemplateFrame>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// One pose: part name to placement, in document order.
pub struct TemplateFrame {
    #[serde(deserialize_with = "deserialize_frame_id")]
    pub id: u64,
    /// Per-frame duration in milliseconds. Generated frames use 100 ms when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub parts: PartMap,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
/// Placement of one named part, in template units.
pub struct TemplatePart {
    pub position: Point,
    pub size: Size,
    /// Degrees, clockwise in canvas space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Rotation pivot relative to `position`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec2>,
}

impl TemplatePart {
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    pub fn rotation_deg(&self) -> f64 {
        self.rotation.unwrap_or(0.0)
    }

    pub fn scale_or_identity(&self) -> Vec2 {
        self.scale.unwrap_or(Vec2::new(1.0, 1.0))
    }
}

/// Part placements keyed by name, keeping the order in which the document declares them.
///
/// Declared order is the compositing order, so this is a list of pairs rather than a hash map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartMap(Vec<(String, TemplatePart)>);

impl PartMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; a replaced entry keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, part: TemplatePart) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = part,
            None => self.0.push((name, part)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TemplatePart> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TemplatePart)> {
        self.0.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, TemplatePart)> for PartMap {
    fn from_iter<I: IntoIterator<Item = (String, TemplatePart)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (name, part) in iter {
            out.insert(name, part);
        }
        out
    }
}

impl Serialize for PartMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, part) in &self.0 {
            map.serialize_entry(name, part)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PartMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PartMapVisitor;

        impl<'de> Visitor<'de> for PartMapVisitor {
            type Value = PartMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of part name to part placement")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut out = PartMap(Vec::with_capacity(access.size_hint().unwrap_or(0)));
                while let Some((name, part)) = access.next_entry::<String, TemplatePart>()? {
                    out.insert(name, part);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(PartMapVisitor)
    }
}

fn deserialize_frame_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(u64),
        Str(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Num(n) => Ok(n),
        Repr::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("frame id \"{s}\" is not a number"))),
    }
}

impl Template {
    pub fn from_json_slice(bytes: &[u8]) -> SpriteResult<Self> {
        let mut t: Self =
            serde_json::from_slice(bytes).map_err(|e| SpriteError::serde(e.to_string()))?;
        if t.display_name.is_empty() {
            t.display_name = t.name.clone();
        }
        t.validate()?;
        Ok(t)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SpriteResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read template \"{}\"", path.display()))?;
        Self::from_json_slice(&bytes)
    }

    pub fn to_json_pretty(&self) -> SpriteResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SpriteError::serde(e.to_string()))
    }

    /// At least one frame; every number finite; sizes and scales non-negative.
    pub fn validate(&self) -> SpriteResult<()> {
        if self.frames.is_empty() {
            return Err(SpriteError::validation(format!(
                "template \"{}\" has no frames",
                self.name
            )));
        }
        for frame in &self.frames {
            for (name, part) in frame.parts.iter() {
                let nums = [
                    part.position.x,
                    part.position.y,
                    part.size.width,
                    part.size.height,
                    part.rotation_deg(),
                    part.pivot.map_or(0.0, |p| p.x),
                    part.pivot.map_or(0.0, |p| p.y),
                    part.scale_or_identity().x,
                    part.scale_or_identity().y,
                ];
                if nums.iter().any(|v| !v.is_finite()) {
                    return Err(SpriteError::validation(format!(
                        "frame {} part \"{name}\" has a non-finite value",
                        frame.id
                    )));
                }
                if part.size.width < 0.0 || part.size.height < 0.0 {
                    return Err(SpriteError::validation(format!(
                        "frame {} part \"{name}\" has a negative size",
                        frame.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Pose reference for drawing guides and sprite capture.
    pub fn first_frame(&self) -> Option<&TemplateFrame> {
        self.frames.first()
    }
}

impl TemplateFrame {
    /// Bounding box over every part, or `None` when the frame has no parts.
    ///
    /// The maximum corner starts at the origin, so parts at negative coordinates still
    /// produce a box that reaches at least to `(0, 0)`.
    pub fn bounds(&self) -> Option<Rect> {
        if self.parts.is_empty() {
            return None;
        }
        let (mut x0, mut y0) = (f64::INFINITY, f64::INFINITY);
        let (mut x1, mut y1) = (0.0_f64, 0.0_f64);
        for (_, part) in self.parts.iter() {
            x0 = x0.min(part.position.x);
            y0 = y0.min(part.position.y);
            x1 = x1.max(part.position.x + part.size.width);
            y1 = y1.max(part.position.y + part.size.height);
        }
        Some(Rect::new(x0, y0, x1, y1))
    }
}

/// Local transform for a part image: translate to `position`, rotate about `pivot`, then scale.
pub fn part_transform(position: Point, rotation_deg: f64, pivot: Point, scale: Vec2) -> Affine {
    let mut xf = Affine::translate(position.to_vec2());
    if rotation_deg != 0.0 {
        xf = xf
            * Affine::translate(pivot.to_vec2())
            * Affine::rotate(rotation_deg.to_radians())
            * Affine::translate(-pivot.to_vec2());
    }
    xf * Affine::scale_non_uniform(scale.x, scale.y)
}

#[cfg(test)]
#[path = "../../tests/unit/template/model.rs"]
mod tests;
