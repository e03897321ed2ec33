// Room module
// Room categories from the backend and the positional room axis of the grid

use serde::{Deserialize, Serialize};

/// Which pool a room belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomCategory {
    Lecture,
    Lab,
}

/// Rooms grouped by category, as returned by the rooms endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomCategories {
    #[serde(default)]
    pub lecture: Vec<String>,
    #[serde(default)]
    pub lab: Vec<String>,
}

impl RoomCategories {
    pub fn is_empty(&self) -> bool {
        self.lecture.is_empty() && self.lab.is_empty()
    }
}

/// Ordered room axis: lecture rooms followed by lab rooms.
///
/// Grid cells address rooms by position, so the axis must not be reordered
/// while a grid built from it is in use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomAxis {
    rooms: Vec<(String, RoomCategory)>,
}

impl RoomAxis {
    pub fn from_categories(categories: &RoomCategories) -> Self {
        let lecture = categories
            .lecture
            .iter()
            .map(|name| (name.clone(), RoomCategory::Lecture));
        let lab = categories
            .lab
            .iter()
            .map(|name| (name.clone(), RoomCategory::Lab));

        Self {
            rooms: lecture.chain(lab).collect(),
        }
    }

    /// First position of `name` on the axis.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.rooms.iter().position(|(room, _)| room == name)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.rooms.get(index).map(|(name, _)| name.as_str())
    }

    pub fn category(&self, index: usize) -> Option<RoomCategory> {
        self.rooms.get(index).map(|(_, category)| *category)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rooms.iter().map(|(name, _)| name.as_str())
    }
}
