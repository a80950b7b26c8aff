use svg::{
    node::{
        self,
        element::{Line, Rectangle, Text},
    },
    Document,
};

use crate::cli::chart::SpendChart;

/// Draws a `SpendChart` as an SVG bar chart
pub struct Plotter<'d> {
    chart: &'d SpendChart,
}

const BAR_WIDTH: f64 = 40.0;
const SLOT_WIDTH: f64 = 60.0;
/// height of a 100% bar
const FULL_HEIGHT: f64 = 300.0;
const LABEL_HEIGHT: f64 = 30.0;
const MARGIN: f64 = 20.0;
const STROKE_WIDTH: f64 = 2.0;

impl<'d> Plotter<'d> {
    pub fn from(chart: &'d SpendChart) -> Self {
        Self { chart }
    }

    pub fn render(&self, file: &str) -> std::io::Result<()> {
        log::info!("writing spending plot to '{}'", file);
        svg::save(file, &self.document())
    }

    pub fn document(&self) -> Document {
        let bars = self.chart.bars();
        let fwidth = SLOT_WIDTH * bars.len().max(1) as f64;
        let resize_y = |percent: u8| FULL_HEIGHT - f64::from(percent) / 100.0 * FULL_HEIGHT;
        let mut document = Document::new().set(
            "viewBox",
            (
                -MARGIN,
                -MARGIN,
                fwidth + 2.0 * MARGIN,
                FULL_HEIGHT + LABEL_HEIGHT + 2.0 * MARGIN,
            ),
        );
        // light guides every 10%
        for percent in (10..=100).step_by(10) {
            document = document.add(
                Line::new()
                    .set("x1", 0.0)
                    .set("x2", fwidth)
                    .set("y1", resize_y(percent))
                    .set("y2", resize_y(percent))
                    .set("stroke", "lightgray")
                    .set("stroke-width", STROKE_WIDTH / 2.0),
            );
        }
        for (i, bar) in bars.iter().enumerate() {
            let x = SLOT_WIDTH * i as f64 + (SLOT_WIDTH - BAR_WIDTH) / 2.0;
            let top = resize_y(bar.percent);
            document = document
                .add(
                    Rectangle::new()
                        .set("x", x)
                        .set("y", top)
                        .set("width", BAR_WIDTH)
                        .set("height", FULL_HEIGHT - top)
                        .set("fill", COLORS[i % COLORS.len()]),
                )
                .add(
                    Text::new()
                        .set("x", x + BAR_WIDTH / 2.0)
                        .set("y", FULL_HEIGHT + LABEL_HEIGHT / 2.0)
                        .set("text-anchor", "middle")
                        .set("font-size", 12)
                        .add(node::Text::new(bar.name.clone())),
                );
        }
        let yaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", 0.0)
            .set("y1", 0.0)
            .set("y2", FULL_HEIGHT)
            .set("stroke", "black")
            .set("stroke-width", STROKE_WIDTH);
        let xaxis = Line::new()
            .set("x1", 0.0)
            .set("x2", fwidth)
            .set("y1", FULL_HEIGHT)
            .set("y2", FULL_HEIGHT)
            .set("stroke", "black")
            .set("stroke-width", STROKE_WIDTH);
        let title = Text::new()
            .set("x", 0.0)
            .set("y", -MARGIN / 2.0)
            .set("font-size", 12)
            .add(node::Text::new(format!("Spent: {}", self.chart.total())));
        document.add(yaxis).add(xaxis).add(title)
    }
}

const COLORS: &[&str] = &[
    "red",
    "green",
    "blue",
    "yellow",
    "orange",
    "purple",
    "cyan",
];
