//! Frame → pixels.
//!
//! Draws one frame onto any 1-bit [`DrawTarget`] using the precomputed
//! [`Layout`].  `BinaryColor::On` is ink (black), `Off` is paper.
//!
//! Each plant box carries its name, the moisture percentage (or `n/a`), a
//! horizontal fill bar and a `WATER` marker when the plant is thirsty.
//! Thirsty boxes get a heavier outline so they stand out at a glance.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use super::layout::Layout;
use crate::readings::{Frame, PlantRow, PlantStatus};

const PADDING: i32 = 4;
const BAR_HEIGHT: u32 = 8;

const VALUE_NA: &str = "n/a";
const ENVIRONMENT_NA: &str = "environment n/a";

/// Clear the target and draw every box of `frame`.
pub fn draw_frame<T>(target: &mut T, layout: &Layout, frame: &Frame) -> Result<(), T::Error>
where
    T: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;

    for (row, bounds) in frame.rows.iter().zip(layout.plant_boxes()) {
        draw_plant_box(target, bounds, row)?;
    }
    draw_environment_box(target, layout.environment_box(), frame)
}

/// Strokes stay inside the rectangle so boxes never bleed into the gap.
fn outline(width: u32) -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyleBuilder::new()
        .stroke_color(BinaryColor::On)
        .stroke_width(width)
        .stroke_alignment(StrokeAlignment::Inside)
        .build()
}

fn draw_plant_box<T>(target: &mut T, bounds: &Rectangle, row: &PlantRow) -> Result<(), T::Error>
where
    T: DrawTarget<Color = BinaryColor>,
{
    let reading = row.status.reading();
    let thirsty = reading.is_some_and(|r| r.needs_water);
    bounds
        .into_styled(outline(if thirsty { 3 } else { 1 }))
        .draw(target)?;

    let ink = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let inner = bounds.top_left + Point::new(PADDING, PADDING);
    Text::with_baseline(&row.name, inner, ink, Baseline::Top).draw(target)?;

    let mut value: heapless::String<8> = heapless::String::new();
    let written = match row.status {
        PlantStatus::Measured { reading, .. } => write!(value, "{:.0}%", reading.moisture_pct),
        PlantStatus::Unavailable(_) => Err(core::fmt::Error),
    };
    if written.is_err() {
        value.clear();
        let _ = value.push_str(VALUE_NA);
    }
    let right = TextStyleBuilder::new()
        .alignment(Alignment::Right)
        .baseline(Baseline::Top)
        .build();
    let value_at = Point::new(bounds.top_left.x + bounds.size.width as i32 - PADDING, inner.y);
    Text::with_text_style(&value, value_at, ink, right).draw(target)?;

    if let Some(reading) = reading {
        let bar_width = bounds.size.width.saturating_sub(2 * PADDING as u32);
        let bar_top = bounds.top_left.y + bounds.size.height as i32 - PADDING - BAR_HEIGHT as i32;
        let bar = Rectangle::new(
            Point::new(inner.x, bar_top),
            Size::new(bar_width, BAR_HEIGHT),
        );
        bar.into_styled(outline(1)).draw(target)?;

        let filled = ((bar_width as f32 * reading.moisture_pct / 100.0) as u32).min(bar_width);
        if filled > 0 {
            Rectangle::new(bar.top_left, Size::new(filled, BAR_HEIGHT))
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(target)?;
        }

        if thirsty {
            let centre = Point::new(bounds.center().x, inner.y);
            let style = TextStyleBuilder::new()
                .alignment(Alignment::Center)
                .baseline(Baseline::Top)
                .build();
            Text::with_text_style("WATER", centre, ink, style).draw(target)?;
        }
    }

    Ok(())
}

fn draw_environment_box<T>(target: &mut T, bounds: &Rectangle, frame: &Frame) -> Result<(), T::Error>
where
    T: DrawTarget<Color = BinaryColor>,
{
    bounds.into_styled(outline(1)).draw(target)?;

    let mut summary: heapless::String<32> = heapless::String::new();
    let written = match frame.environment {
        Ok(env) => write!(
            summary,
            "{:.1}C  {:.0}%RH",
            env.temperature_c, env.humidity_pct
        ),
        Err(_) => Err(core::fmt::Error),
    };
    if written.is_err() {
        summary.clear();
        let _ = summary.push_str(ENVIRONMENT_NA);
    }

    let ink = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let at = bounds.top_left + Point::new(PADDING, PADDING);
    Text::with_baseline(&summary, at, ink, Baseline::Top).draw(target)?;
    Ok(())
}
