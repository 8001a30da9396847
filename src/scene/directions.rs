//! Camera-relative direction frame on the ground plane

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{Quat, Result, Vec3};
use crate::math::plane::{normal_aligned_axis, plane_relative_axis};

/// Largest out-of-plane component tolerated on a planar direction.
pub const PLANAR_TOLERANCE: f32 = 1e-6;

/// One of the six named directions of a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Behind,
    Front,
    Left,
    Right,
    Above,
    Below,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Behind,
        Direction::Front,
        Direction::Left,
        Direction::Right,
        Direction::Above,
        Direction::Below,
    ];

    /// Directions lying in the ground plane, in constraint-check order.
    pub const PLANAR: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Front,
        Direction::Behind,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Direction::Behind => "behind",
            Direction::Front => "front",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Above => "above",
            Direction::Below => "below",
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Behind => Direction::Front,
            Direction::Front => Direction::Behind,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Above => Direction::Below,
            Direction::Below => Direction::Above,
        }
    }

    pub fn is_planar(self) -> bool {
        !matches!(self, Direction::Above | Direction::Below)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Six unit vectors fixed for the lifetime of a scene.
///
/// `front`, `left` and `above` are always the exact negations of `behind`,
/// `right` and `below`.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionFrame {
    vectors: [Vec3; 6],
    normal: Vec3,
}

impl DirectionFrame {
    /// Derive the frame from a camera orientation and the ground plane normal.
    ///
    /// Camera "behind" and "left" are flattened into the plane; camera "up"
    /// is reduced to its normal-aligned part.
    pub fn from_camera(rotation: Quat, plane_normal: Vec3) -> Result<Self> {
        let cam_behind = rotation * Vec3::NEG_Z;
        let cam_left = rotation * Vec3::NEG_X;
        let cam_up = rotation * Vec3::Y;

        let behind = plane_relative_axis(cam_behind, plane_normal)?;
        let left = plane_relative_axis(cam_left, plane_normal)?;
        let above = normal_aligned_axis(cam_up, plane_normal)?;

        Ok(Self::from_axes(behind, left, above, plane_normal.normalize()))
    }

    /// Build a frame from three axes; the opposite directions are negations.
    pub fn from_axes(behind: Vec3, left: Vec3, above: Vec3, normal: Vec3) -> Self {
        let mut vectors = [Vec3::ZERO; 6];
        vectors[Direction::Behind.index()] = behind;
        vectors[Direction::Front.index()] = -behind;
        vectors[Direction::Left.index()] = left;
        vectors[Direction::Right.index()] = -left;
        vectors[Direction::Above.index()] = above;
        vectors[Direction::Below.index()] = -above;
        Self { vectors, normal }
    }

    pub fn get(&self, direction: Direction) -> Vec3 {
        self.vectors[direction.index()]
    }

    /// Ground plane normal the frame was built against.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, Vec3)> + '_ {
        Direction::ALL.iter().map(move |&d| (d, self.get(d)))
    }

    /// Fail unless every planar direction has no vertical component.
    ///
    /// Placement works on ground-plane (x, y) coordinates, so a frame that
    /// leaves the plane would silently mislabel margins.
    pub fn check_planar(&self) -> Result<()> {
        for direction in Direction::PLANAR {
            let v = self.get(direction);
            if v.z.abs() > PLANAR_TOLERANCE {
                return Err(Error::DegenerateGeometry(format!(
                    "direction '{}' has vertical component {}", direction, v.z
                )));
            }
        }
        Ok(())
    }

    /// Name to vector map for annotations.
    pub fn to_map(&self) -> BTreeMap<Direction, [f32; 3]> {
        self.iter().map(|(d, v)| (d, v.to_array())).collect()
    }
}
