// Route visualization: ASCII rendering for terminals and PNG rendering with plotters

use plotters::prelude::*;
use std::error::Error;
use std::fmt;
use std::path::Path;

use crate::models::{CellKind, Coordinate, Grid, RoutePlan, StoreMap};

// Pixel size of one grid cell in the PNG output
const CELL_PIXELS: u32 = 48;

fn kind_symbol(kind: CellKind) -> char {
    match kind {
        CellKind::Entrance => 'E',
        CellKind::Shelf => 'S',
        CellKind::Fridge => 'F',
        CellKind::Checkout => 'C',
        CellKind::Obstacle => '#',
        CellKind::Empty => 'x',
    }
}

/// Store floor with a planned route drawn over it.
///
/// Map items keep their letters (`E`, `S`, `F`, `C`, `#`, `x`), route cells are
/// drawn as `*` and the access point of the n-th stop as the digit n.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRoute {
    rows: Vec<Vec<char>>,
}

impl RenderedRoute {
    pub fn new(map: &StoreMap, grid: &Grid, plan: &RoutePlan) -> Self {
        let mut rows = vec![vec!['.'; grid.width() as usize]; grid.height() as usize];
        let mut put = |at: Coordinate, symbol: char| {
            if grid.contains(at) {
                rows[at.y as usize][at.x as usize] = symbol;
            }
        };

        for cell in plan.cells() {
            put(*cell, '*');
        }
        for (number, segment) in plan.segments.iter().enumerate() {
            if let Some(&stop) = segment.path.last() {
                let symbol = char::from_digit(number as u32 + 1, 10).unwrap_or('+');
                put(stop, symbol);
            }
        }
        for item in &map.items {
            put(item.coordinate(), kind_symbol(item.kind));
        }

        Self { rows }
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|row| row.iter().collect())
    }
}

impl fmt::Display for RenderedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

fn cell_color(kind: CellKind) -> RGBColor {
    match kind {
        CellKind::Entrance => RGBColor(0, 100, 0),
        CellKind::Shelf => RGBColor(139, 90, 43),
        CellKind::Fridge => RGBColor(70, 130, 180),
        CellKind::Checkout => RGBColor(128, 128, 0),
        CellKind::Obstacle => RGBColor(60, 60, 60),
        CellKind::Empty => RGBColor(220, 220, 220),
    }
}

/// Draw the store floor and the planned route as a PNG image
pub fn draw_route(
    map: &StoreMap,
    grid: &Grid,
    plan: &RoutePlan,
    output_path: impl AsRef<Path>,
) -> Result<(), Box<dyn Error>> {
    let width = grid.width() as u32;
    let height = grid.height() as u32;
    let root = BitMapBackend::new(
        output_path.as_ref(),
        (width * CELL_PIXELS, height * CELL_PIXELS),
    )
    .into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(4)
        .build_cartesian_2d(0f64..f64::from(grid.width()), 0f64..f64::from(grid.height()))?;

    // rows grow downwards on the floor but upwards in the chart
    let flip = |y: i32| f64::from(grid.height() - y);
    let center = |c: &Coordinate| (f64::from(c.x) + 0.5, flip(c.y) - 0.5);

    // Blocked cells without a map item are drawn as obstacles
    let mut blocked = Vec::new();
    for index in 0..grid.len() {
        let at = grid.coordinate(index);
        if !grid.is_walkable_at(at) {
            blocked.push((at, CellKind::Obstacle));
        }
    }
    blocked.extend(map.items.iter().map(|item| (item.coordinate(), item.kind)));

    chart.draw_series(blocked.iter().filter(|(at, _)| grid.contains(*at)).map(|(at, kind)| {
        Rectangle::new(
            [
                (f64::from(at.x), flip(at.y)),
                (f64::from(at.x + 1), flip(at.y + 1)),
            ],
            cell_color(*kind).filled(),
        )
    }))?;

    let colors = [
        RGBColor(255, 165, 0),  // Orange
        RGBColor(128, 0, 128),  // Purple
        RGBColor(0, 128, 128),  // Teal
        RGBColor(220, 20, 60),  // Crimson
        RGBColor(70, 130, 180), // Steel blue
    ];

    for (i, segment) in plan.segments.iter().enumerate() {
        let color = colors[i % colors.len()];
        chart.draw_series(LineSeries::new(
            segment.path.iter().map(center),
            color.mix(0.8).stroke_width(3),
        ))?;
        if let Some(stop) = segment.path.last() {
            chart.draw_series(std::iter::once(Circle::new(
                center(stop),
                CELL_PIXELS / 4,
                color.filled(),
            )))?;
        }
    }

    if let Some(return_leg) = &plan.return_leg {
        chart.draw_series(LineSeries::new(
            return_leg.iter().map(center),
            RGBColor(150, 150, 150).stroke_width(2),
        ))?;
    }

    root.present()?;
    Ok(())
}
