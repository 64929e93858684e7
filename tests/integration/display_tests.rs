//! Display orchestration against a panel that really rasterises each
//! frame into a host-side framebuffer.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::{PointsIter, Rectangle};
use soilwatch::app::ports::PanelPort;
use soilwatch::classifier::classify;
use soilwatch::config::{Calibration, CycleConfig, PlantConfig, RunMode};
use soilwatch::display::DisplayOrchestrator;
use soilwatch::display::canvas;
use soilwatch::display::layout::Layout;
use soilwatch::drivers::epaper::Framebuffer;
use soilwatch::error::{DisplayError, SensorError};
use soilwatch::fsm::DisplayState;
use soilwatch::readings::{EnvironmentReading, Frame, PlantRow, PlantStatus};

use crate::mock_hw::*;

// ── Rasterising panel ─────────────────────────────────────────

struct RasterPanel {
    powered: bool,
    buffer: Framebuffer,
    paints: u32,
}

impl RasterPanel {
    fn new(size: Size) -> Self {
        Self {
            powered: false,
            buffer: Framebuffer::new(size),
            paints: 0,
        }
    }
}

impl PanelPort for RasterPanel {
    fn power_up(&mut self) -> Result<(), DisplayError> {
        self.powered = true;
        Ok(())
    }

    fn power_down(&mut self) -> Result<(), DisplayError> {
        self.powered = false;
        Ok(())
    }

    fn paint(&mut self, layout: &Layout, frame: &Frame) -> Result<(), DisplayError> {
        if !self.powered {
            return Err(DisplayError::PaintRejected);
        }
        let Ok(()) = canvas::draw_frame(&mut self.buffer, layout, frame);
        self.paints += 1;
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────

fn config() -> CycleConfig {
    CycleConfig::new(
        &[
            PlantConfig::new("Shorkle", Some(0)).unwrap(),
            PlantConfig::new("Atlas", Some(1)).unwrap(),
        ],
        900_000,
    )
    .unwrap()
}

fn frame(config: &CycleConfig, raws: &[Result<i32, SensorError>]) -> Frame {
    let mut frame = Frame::new(
        1,
        Ok(EnvironmentReading {
            temperature_c: 19.0,
            humidity_pct: 55.0,
        }),
    );
    for (plant, raw) in config.plants.iter().zip(raws) {
        let status = match *raw {
            Ok(raw) => PlantStatus::Measured {
                raw,
                reading: classify(raw, Calibration::default(), 15.0),
            },
            Err(e) => PlantStatus::Unavailable(e),
        };
        frame
            .rows
            .push(PlantRow {
                name: plant.name.clone(),
                status,
            })
            .unwrap();
    }
    frame
}

fn ink_in(buffer: &Framebuffer, area: &Rectangle) -> usize {
    area.points().filter(|p| buffer.is_ink(*p)).count()
}

fn canvas_size(config: &CycleConfig) -> Size {
    Size::new(config.geometry.canvas_width, config.geometry.canvas_height)
}

// ── Tests ─────────────────────────────────────────────────────

#[test]
fn full_render_rasterises_every_box_and_nothing_else() {
    let config = config();
    let journal = Journal::default();
    let mut display = DisplayOrchestrator::new(
        &config,
        RasterPanel::new(canvas_size(&config)),
        MockConsole::new(&journal),
        MockDelay::new(&journal),
    )
    .unwrap();

    let f = frame(&config, &[Ok(900), Ok(400)]);
    assert_eq!(display.render(&f), Ok(()));

    let buffer = &display.panel().buffer;
    let layout = display.layout();
    for area in layout.plant_boxes() {
        assert!(ink_in(buffer, area) > 0);
    }
    assert!(ink_in(buffer, layout.environment_box()) > 0);

    // A strip above the first box is margin only.
    let margin = Rectangle::new(Point::zero(), Size::new(layout.canvas().width, 10));
    assert_eq!(ink_in(buffer, &margin), 0);

    assert_eq!(display.panel().paints, 1);
    assert!(!display.panel().powered);
    assert_eq!(display.state(), DisplayState::Idle);
}

#[test]
fn thirsty_box_gets_the_heavy_outline() {
    let config = config();
    let journal = Journal::default();
    let mut display = DisplayOrchestrator::new(
        &config,
        RasterPanel::new(canvas_size(&config)),
        MockConsole::new(&journal),
        MockDelay::new(&journal),
    )
    .unwrap();

    display.render(&frame(&config, &[Ok(1000), Ok(300)])).unwrap();

    // Third row from the top: solid on a heavy outline, edges only on a thin one.
    let buffer = &display.panel().buffer;
    let boxes = display.layout().plant_boxes();
    let row = |r: &Rectangle| Rectangle::new(r.top_left + Point::new(0, 2), Size::new(r.size.width, 1));
    let (thick, thin) = (row(&boxes[0]), row(&boxes[1]));
    assert_eq!(ink_in(buffer, &thick), boxes[0].size.width as usize);
    assert_eq!(ink_in(buffer, &thin), 2);
}

#[test]
fn unavailable_plant_still_gets_its_box() {
    let config = config();
    let journal = Journal::default();
    let mut display = DisplayOrchestrator::new(
        &config,
        RasterPanel::new(canvas_size(&config)),
        MockConsole::new(&journal),
        MockDelay::new(&journal),
    )
    .unwrap();

    let f = frame(&config, &[Err(SensorError::NotConnected), Ok(500)]);
    assert_eq!(display.render(&f), Ok(()));
    let buffer = &display.panel().buffer;
    assert!(ink_in(buffer, &display.layout().plant_boxes()[0]) > 0);
}

#[test]
fn repeated_renders_redraw_from_a_clean_canvas() {
    let config = config();
    let journal = Journal::default();
    let mut display = DisplayOrchestrator::new(
        &config,
        RasterPanel::new(canvas_size(&config)),
        MockConsole::new(&journal),
        MockDelay::new(&journal),
    )
    .unwrap();

    display.render(&frame(&config, &[Ok(1000), Ok(1000)])).unwrap();
    display.render(&frame(&config, &[Ok(300), Ok(300)])).unwrap();
    let wet_after_dry = display.panel().buffer.bytes().to_vec();

    let mut fresh = DisplayOrchestrator::new(
        &config,
        RasterPanel::new(canvas_size(&config)),
        MockConsole::new(&journal),
        MockDelay::new(&journal),
    )
    .unwrap();
    fresh.render(&frame(&config, &[Ok(300), Ok(300)])).unwrap();

    assert_eq!(wet_after_dry, fresh.panel().buffer.bytes());
}

#[test]
fn calibrate_orchestrator_writes_console_only() {
    let mut config = config();
    config.run_mode = RunMode::Calibrate;
    let journal = Journal::default();
    let mut display = DisplayOrchestrator::new(
        &config,
        RasterPanel::new(canvas_size(&config)),
        MockConsole::new(&journal),
        MockDelay::new(&journal),
    )
    .unwrap();

    display.render(&frame(&config, &[Ok(275), Ok(1023)])).unwrap();

    assert_eq!(display.panel().paints, 0);
    assert_eq!(display.mode(), RunMode::Calibrate);
    assert_eq!(
        journal.lines(),
        vec![
            "--- cycle 1 ---".to_string(),
            "Shorkle: raw=275 moisture=100.0% OK".to_string(),
            "Atlas: raw=1023 moisture=0.0% NEEDS WATER".to_string(),
            "environment: 19.0C 55.0%RH".to_string(),
        ]
    );
}
