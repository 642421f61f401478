//! Screen placement of a scene object.
//!
//! The engine never does layout; it only needs bounds for drop hit-testing
//! and the stacking value to order the render model.

use serde::{Deserialize, Serialize};

/// Rectangle in scene coordinates plus optional stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Higher values are drawn above lower ones. Absent means 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

impl Position {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            z_index: None,
        }
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn stacking(&self) -> i32 {
        self.z_index.unwrap_or(0)
    }

    /// Strict containment: a drop exactly on the edge misses.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x > self.x && x < self.x + self.width && y > self.y && y < self.y + self.height
    }
}
