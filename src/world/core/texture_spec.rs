//! Block texture specifications
//!
//! A registry stores each block's texture as a compact `EntityTextureSpec`:
//! nothing, one name, a shorthand list of 1-6 names, or an explicit record of
//! named faces. `FaceLayout` is the validated form of that descriptor and
//! `expand` turns it into one texture name per face in canonical order.
//!
//! Shorthand lists are written in legacy face order
//! (back, front, top, bottom, left, right). Expansion fills that order first
//! and then relabels it into canonical order exactly once.

use super::block::BlockId;
use crate::constants::FACE_COUNT;
use crate::error::{StitchError, StitchResult};
use serde::{Deserialize, Serialize};

/// One optional texture name per face, canonical order
pub type FaceNames = [Option<String>; FACE_COUNT];

/// Explicit per-face texture names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedFaces {
    pub top: Option<String>,
    pub bottom: Option<String>,
    pub front: Option<String>,
    pub back: Option<String>,
    pub left: Option<String>,
    pub right: Option<String>,
}

/// Texture descriptor as stored by the registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityTextureSpec {
    #[default]
    Absent,
    Single(String),
    List(Vec<String>),
    Named(NamedFaces),
}

impl From<&str> for EntityTextureSpec {
    fn from(name: &str) -> Self {
        EntityTextureSpec::Single(name.to_string())
    }
}

/// Validated face layout, one variant per shorthand shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaceLayout {
    Empty,
    Uniform(String),
    /// Two names: top/bottom, then the four sides
    EndsSides { ends: String, sides: String },
    /// Three names: top, bottom, sides
    TopBottomSides {
        top: String,
        bottom: String,
        sides: String,
    },
    /// Four names: top, bottom, front/back, left/right
    TopBottomFrontBackSides {
        top: String,
        bottom: String,
        front_back: String,
        left_right: String,
    },
    /// Five names: top, bottom, front, back, left/right
    TopBottomFrontBack {
        top: String,
        bottom: String,
        front: String,
        back: String,
        left_right: String,
    },
    /// Six names in legacy order: back, front, top, bottom, left, right
    AllSix([String; FACE_COUNT]),
    Named(NamedFaces),
}

impl FaceLayout {
    /// Validate a registry descriptor
    pub fn from_spec(spec: &EntityTextureSpec, block: BlockId) -> StitchResult<FaceLayout> {
        match spec {
            EntityTextureSpec::Absent => Ok(FaceLayout::Empty),
            EntityTextureSpec::Single(name) => Ok(FaceLayout::Uniform(name.clone())),
            EntityTextureSpec::Named(named) => Ok(FaceLayout::Named(named.clone())),
            EntityTextureSpec::List(names) => Self::from_list(names, block),
        }
    }

    fn from_list(names: &[String], block: BlockId) -> StitchResult<FaceLayout> {
        let n = |i: usize| names[i].clone();
        let layout = match names.len() {
            0 => FaceLayout::Empty,
            1 => FaceLayout::Uniform(n(0)),
            2 => FaceLayout::EndsSides {
                ends: n(0),
                sides: n(1),
            },
            3 => FaceLayout::TopBottomSides {
                top: n(0),
                bottom: n(1),
                sides: n(2),
            },
            4 => FaceLayout::TopBottomFrontBackSides {
                top: n(0),
                bottom: n(1),
                front_back: n(2),
                left_right: n(3),
            },
            5 => FaceLayout::TopBottomFrontBack {
                top: n(0),
                bottom: n(1),
                front: n(2),
                back: n(3),
                left_right: n(4),
            },
            6 => FaceLayout::AllSix([n(0), n(1), n(2), n(3), n(4), n(5)]),
            len => {
                return Err(StitchError::InvalidSpec {
                    block: block.0,
                    reason: format!("expected 0 to 6 face names, got {}", len),
                })
            }
        };
        Ok(layout)
    }

    /// Per-face names in canonical order
    pub fn faces(&self) -> FaceNames {
        let s = |name: &String| Some(name.clone());
        match self {
            FaceLayout::Empty => Default::default(),
            FaceLayout::Uniform(name) => std::array::from_fn(|_| s(name)),
            FaceLayout::Named(named) => to_canonical([
                named.back.clone(),
                named.front.clone(),
                named.top.clone(),
                named.bottom.clone(),
                named.left.clone(),
                named.right.clone(),
            ]),
            FaceLayout::EndsSides { ends, sides } => {
                to_canonical([s(sides), s(sides), s(ends), s(ends), s(sides), s(sides)])
            }
            FaceLayout::TopBottomSides { top, bottom, sides } => {
                to_canonical([s(sides), s(sides), s(top), s(bottom), s(sides), s(sides)])
            }
            FaceLayout::TopBottomFrontBackSides {
                top,
                bottom,
                front_back,
                left_right,
            } => to_canonical([
                s(front_back),
                s(front_back),
                s(top),
                s(bottom),
                s(left_right),
                s(left_right),
            ]),
            FaceLayout::TopBottomFrontBack {
                top,
                bottom,
                front,
                back,
                left_right,
            } => to_canonical([
                s(back),
                s(front),
                s(top),
                s(bottom),
                s(left_right),
                s(left_right),
            ]),
            FaceLayout::AllSix(names) => to_canonical(names.clone().map(Some)),
        }
    }
}

/// Relabel legacy face order into canonical order.
///
/// Swaps back/right, front/top and bottom/left.
pub fn to_canonical<T>(legacy: [T; FACE_COUNT]) -> [T; FACE_COUNT] {
    let [back, front, top, bottom, left, right] = legacy;
    [right, top, front, left, bottom, back]
}

/// Expand a registry descriptor into six canonical face names
pub fn expand(spec: &EntityTextureSpec, block: BlockId) -> StitchResult<FaceNames> {
    Ok(FaceLayout::from_spec(spec, block)?.faces())
}
