//! Box layout for the panel canvas.
//!
//! One box per plant, stacked top to bottom with a fixed gap, followed by
//! one box for the environment summary:
//!
//! ```text
//!   offset
//!   ┌────────────┐   plant 0   (offset, offset)
//!   └────────────┘
//!   ┌────────────┐   plant 1   (offset, offset + 1·(h + offset))
//!   └────────────┘
//!        ...
//!   ┌────────────┐   environment
//!   └────────────┘
//! ```
//!
//! Computed once from configuration; a geometry that does not fit the
//! canvas is rejected before the loop starts.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::config::{DisplayGeometry, MAX_PLANTS};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    canvas: Size,
    plant_boxes: heapless::Vec<Rectangle, MAX_PLANTS>,
    environment_box: Rectangle,
}

impl Layout {
    pub fn compute(geometry: &DisplayGeometry, plant_count: usize) -> Result<Self, ConfigError> {
        let DisplayGeometry {
            canvas_width,
            canvas_height,
            box_width,
            box_height,
            box_offset,
        } = *geometry;

        if canvas_width == 0 || canvas_height == 0 || box_width == 0 || box_height == 0 {
            return Err(ConfigError::LayoutOverflow);
        }
        if plant_count > MAX_PLANTS {
            return Err(ConfigError::TooManyPlants(plant_count));
        }

        let pitch = box_height
            .checked_add(box_offset)
            .ok_or(ConfigError::LayoutOverflow)?;
        let slot = |index: u32| -> Result<Rectangle, ConfigError> {
            let y = index
                .checked_mul(pitch)
                .and_then(|v| v.checked_add(box_offset))
                .ok_or(ConfigError::LayoutOverflow)?;
            let right = box_offset
                .checked_add(box_width)
                .ok_or(ConfigError::LayoutOverflow)?;
            let bottom = y.checked_add(box_height).ok_or(ConfigError::LayoutOverflow)?;
            if right > canvas_width || bottom > canvas_height {
                return Err(ConfigError::LayoutOverflow);
            }
            let top_left = Point::new(
                i32::try_from(box_offset).map_err(|_| ConfigError::LayoutOverflow)?,
                i32::try_from(y).map_err(|_| ConfigError::LayoutOverflow)?,
            );
            Ok(Rectangle::new(top_left, Size::new(box_width, box_height)))
        };

        let mut plant_boxes = heapless::Vec::new();
        for index in 0..plant_count as u32 {
            // Bounded by the MAX_PLANTS check above.
            let _ = plant_boxes.push(slot(index)?);
        }
        let environment_box = slot(plant_count as u32)?;

        Ok(Self {
            canvas: Size::new(canvas_width, canvas_height),
            plant_boxes,
            environment_box,
        })
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Box for the plant at `index` in table order.
    pub fn plant_box(&self, index: usize) -> Option<&Rectangle> {
        self.plant_boxes.get(index)
    }

    pub fn plant_boxes(&self) -> &[Rectangle] {
        &self.plant_boxes
    }

    pub fn environment_box(&self) -> &Rectangle {
        &self.environment_box
    }
}
