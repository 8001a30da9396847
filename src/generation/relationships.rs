//! Pairwise directional relationships between placed objects

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::scene::{Direction, DirectionFrame, Scene};

/// Default minimum projected offset for a relationship.
pub const DEFAULT_EPSILON: f32 = 0.2;

/// For each planar direction and object `i`, the objects lying that way from `i`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipTable(BTreeMap<Direction, Vec<BTreeSet<usize>>>);

impl RelationshipTable {
    /// Per-object related sets for one direction.
    pub fn get(&self, direction: Direction) -> Option<&[BTreeSet<usize>]> {
        self.0.get(&direction).map(Vec::as_slice)
    }

    /// Objects lying in `direction` from object `i`.
    pub fn related(&self, direction: Direction, i: usize) -> Option<&BTreeSet<usize>> {
        self.get(direction).and_then(|sets| sets.get(i))
    }

    /// Whether object `j` lies in `direction` from object `i`.
    pub fn contains(&self, direction: Direction, i: usize, j: usize) -> bool {
        self.related(direction, i).is_some_and(|set| set.contains(&j))
    }

    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.0.keys().copied()
    }
}

/// Relationships between the objects of a scene.
pub fn compute_relationships(scene: &Scene, epsilon: f32) -> RelationshipTable {
    let coords: Vec<Vec3> = scene.objects().iter().map(|o| o.coords).collect();
    compute_relationships_for(&scene.directions, &coords, epsilon)
}

/// Relationships between arbitrary world points.
///
/// Object `j` lies in direction `d` from `i` when the displacement from `i`
/// to `j`, dotted with `d`, exceeds `epsilon`. Each direction is evaluated on
/// its own; opposite directions are not derived from each other.
pub fn compute_relationships_for(frame: &DirectionFrame, coords: &[Vec3], epsilon: f32) -> RelationshipTable {
    let mut table = BTreeMap::new();

    for (direction, vector) in frame.iter() {
        if !direction.is_planar() {
            continue;
        }

        let per_object = coords.iter().enumerate().map(|(i, from)| {
            coords.iter().enumerate()
                .filter(|&(j, to)| j != i && (*to - *from).dot(vector) > epsilon)
                .map(|(j, _)| j)
                .collect::<BTreeSet<usize>>()
        }).collect();

        table.insert(direction, per_object);
    }

    RelationshipTable(table)
}
