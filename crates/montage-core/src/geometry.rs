//! Spatial transform attached to every clip.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

/// Placement of a clip's frame on the canvas.
///
/// Position and anchor are normalized (0-1) canvas coordinates, rotation is in
/// degrees. Values are not range checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    /// Horizontal canvas position of the anchor
    pub position_x: f64,
    /// Vertical canvas position of the anchor
    pub position_y: f64,
    /// Uniform scale factor (1.0 = fit canvas)
    pub scale: f64,
    /// Clockwise rotation in degrees
    pub rotation: f64,
    /// Horizontal pivot inside the frame
    pub anchor_x: f64,
    /// Vertical pivot inside the frame
    pub anchor_y: f64,
    /// Mirror left to right
    pub flip_horizontal: bool,
    /// Mirror top to bottom
    pub flip_vertical: bool,
}

impl Transform {
    /// Identity transform: centered, unscaled, unrotated.
    pub const IDENTITY: Self = Self {
        position_x: 0.5,
        position_y: 0.5,
        scale: 1.0,
        rotation: 0.0,
        anchor_x: 0.5,
        anchor_y: 0.5,
        flip_horizontal: false,
        flip_vertical: false,
    };

    /// Check whether this transform leaves a frame untouched.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Build the affine matrix mapping frame pixels onto a canvas of the given
    /// size: move the anchor to the origin, scale and flip, rotate, then move
    /// to the target position.
    pub fn to_affine(&self, canvas_width: u32, canvas_height: u32) -> Affine2 {
        let size = Vec2::new(canvas_width as f32, canvas_height as f32);
        let anchor = Vec2::new(self.anchor_x as f32, self.anchor_y as f32) * size;
        let position = Vec2::new(self.position_x as f32, self.position_y as f32) * size;

        let flip = Vec2::new(
            if self.flip_horizontal { -1.0 } else { 1.0 },
            if self.flip_vertical { -1.0 } else { 1.0 },
        );
        let scale = flip * self.scale as f32;

        Affine2::from_translation(position)
            * Affine2::from_angle((self.rotation as f32).to_radians())
            * Affine2::from_scale(scale)
            * Affine2::from_translation(-anchor)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
