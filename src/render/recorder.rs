//! In-memory drawing surface that records every operation.
//!
//! The recorder is the headless backend: the CLI dumps its commands as
//! JSON, and tests assert on the resolved shapes it reports.

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::surface::{approx_text_width, DrawSurface, TextAlign, TextBaseline};

/// One recorded drawing operation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    ClearRect { x: f64, y: f64, w: f64, h: f64 },
    SetFillStyle { color: String },
    SetStrokeStyle { color: String },
    SetLineWidth { width: f64 },
    SetFont { font: String },
    SetTextAlign { align: TextAlign },
    SetTextBaseline { baseline: TextBaseline },
    FillRect { x: f64, y: f64, w: f64, h: f64 },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Arc { x: f64, y: f64, radius: f64, start: f64, end: f64 },
    ClosePath,
    Fill,
    Stroke,
    FillText { text: String, x: f64, y: f64 },
}

/// A filled rectangle with the fill color active when it was drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub color: String,
}

/// A text draw with the state active when it was drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedText {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub font: String,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// A painted path: its vertices, arcs, and how it was painted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedPath {
    /// `move_to`/`line_to` vertices in order
    pub points: Vec<(f64, f64)>,
    /// `(start, end)` angles of every arc in the path
    pub arcs: Vec<(f64, f64)>,
    pub closed: bool,
    /// Fill color if the path was filled
    pub fill: Option<String>,
    /// Stroke color and line width if the path was stroked
    pub stroke: Option<(String, f64)>,
}

/// Drawing surface that records commands instead of rasterizing.
#[derive(Debug, Clone)]
pub struct CommandRecorder {
    width: f64,
    height: f64,
    font: String,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            font: "10px sans-serif".to_string(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Every `fill_rect`, with its fill color.
    pub fn rects(&self) -> Vec<RecordedRect> {
        let mut out = Vec::new();
        let mut fill = String::new();
        for command in &self.commands {
            match command {
                DrawCommand::SetFillStyle { color } => fill.clone_from(color),
                DrawCommand::FillRect { x, y, w, h } => out.push(RecordedRect {
                    x: *x,
                    y: *y,
                    w: *w,
                    h: *h,
                    color: fill.clone(),
                }),
                _ => {}
            }
        }
        out
    }

    /// Every `fill_text`, with the text state active at the time.
    pub fn texts(&self) -> Vec<RecordedText> {
        let mut out = Vec::new();
        let mut fill = String::new();
        let mut font = String::new();
        let mut align = TextAlign::default();
        let mut baseline = TextBaseline::default();
        for command in &self.commands {
            match command {
                DrawCommand::SetFillStyle { color } => fill.clone_from(color),
                DrawCommand::SetFont { font: f } => font.clone_from(f),
                DrawCommand::SetTextAlign { align: a } => align = *a,
                DrawCommand::SetTextBaseline { baseline: b } => baseline = *b,
                DrawCommand::FillText { text, x, y } => out.push(RecordedText {
                    text: text.clone(),
                    x: *x,
                    y: *y,
                    color: fill.clone(),
                    font: font.clone(),
                    align,
                    baseline,
                }),
                _ => {}
            }
        }
        out
    }

    /// Every path that was filled or stroked at least once.
    ///
    /// A path filled and then stroked without an intervening `begin_path`
    /// is reported once with both paints.
    pub fn paths(&self) -> Vec<RecordedPath> {
        let mut out: Vec<RecordedPath> = Vec::new();
        let mut current = RecordedPath::default();
        let mut painted = false;
        let mut fill = String::new();
        let mut stroke = String::new();
        let mut line_width = 1.0;
        for command in &self.commands {
            match command {
                DrawCommand::SetFillStyle { color } => fill.clone_from(color),
                DrawCommand::SetStrokeStyle { color } => stroke.clone_from(color),
                DrawCommand::SetLineWidth { width } => line_width = *width,
                DrawCommand::BeginPath => {
                    let finished = std::mem::take(&mut current);
                    if painted {
                        out.push(finished);
                    }
                    painted = false;
                }
                DrawCommand::MoveTo { x, y } | DrawCommand::LineTo { x, y } => {
                    current.points.push((*x, *y));
                }
                DrawCommand::Arc { start, end, .. } => current.arcs.push((*start, *end)),
                DrawCommand::ClosePath => current.closed = true,
                DrawCommand::Fill => {
                    current.fill = Some(fill.clone());
                    painted = true;
                }
                DrawCommand::Stroke => {
                    current.stroke = Some((stroke.clone(), line_width));
                    painted = true;
                }
                _ => {}
            }
        }
        if painted {
            out.push(current);
        }
        out
    }

    /// Serialize the command list as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.commands)?)
    }
}

impl DrawSurface for CommandRecorder {
    /// Clearing the whole surface starts a new frame, so earlier commands
    /// are discarded.
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if x <= 0.0 && y <= 0.0 && x + w >= self.width && y + h >= self.height {
            self.commands.clear();
        }
        self.push(DrawCommand::ClearRect { x, y, w, h });
    }

    fn set_fill_style(&mut self, color: &str) {
        self.push(DrawCommand::SetFillStyle {
            color: color.to_string(),
        });
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.push(DrawCommand::SetStrokeStyle {
            color: color.to_string(),
        });
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawCommand::SetLineWidth { width });
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
        self.push(DrawCommand::SetFont {
            font: font.to_string(),
        });
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.push(DrawCommand::SetTextAlign { align });
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.push(DrawCommand::SetTextBaseline { baseline });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.push(DrawCommand::FillRect { x, y, w, h });
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::LineTo { x, y });
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<()> {
        self.push(DrawCommand::Arc {
            x,
            y,
            radius,
            start,
            end,
        });
        Ok(())
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        self.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        });
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> Result<f64> {
        Ok(approx_text_width(&self.font, text))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_full_clear_starts_new_frame() {
        let mut rec = CommandRecorder::new(100.0, 50.0);
        rec.fill_rect(0.0, 0.0, 10.0, 10.0);
        rec.clear_rect(0.0, 0.0, 100.0, 50.0);
        assert_eq!(
            rec.commands(),
            &[DrawCommand::ClearRect {
                x: 0.0,
                y: 0.0,
                w: 100.0,
                h: 50.0
            }]
        );
    }

    #[test]
    fn test_partial_clear_keeps_history() {
        let mut rec = CommandRecorder::new(100.0, 50.0);
        rec.fill_rect(0.0, 0.0, 10.0, 10.0);
        rec.clear_rect(0.0, 0.0, 10.0, 10.0);
        assert_eq!(rec.commands().len(), 2);
    }

    #[test]
    fn test_rects_carry_fill_color() {
        let mut rec = CommandRecorder::new(100.0, 50.0);
        rec.set_fill_style("#FF0000");
        rec.fill_rect(1.0, 2.0, 3.0, 4.0);
        rec.set_fill_style("#00FF00");
        rec.fill_rect(5.0, 6.0, 7.0, 8.0);
        let rects = rec.rects();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].color, "#FF0000");
        assert_eq!(rects[1].color, "#00FF00");
    }

    #[test]
    fn test_paths_merge_fill_and_stroke() {
        let mut rec = CommandRecorder::new(100.0, 50.0);
        rec.set_fill_style("#111111");
        rec.set_stroke_style("#222222");
        rec.set_line_width(2.0);
        rec.begin_path();
        rec.move_to(0.0, 0.0);
        rec.line_to(10.0, 10.0);
        rec.fill();
        rec.stroke();
        rec.begin_path();
        rec.move_to(5.0, 5.0);
        let paths = rec.paths();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].points, vec![(0.0, 0.0), (10.0, 10.0)]);
        assert_eq!(paths[0].fill.as_deref(), Some("#111111"));
        assert_eq!(paths[0].stroke, Some(("#222222".to_string(), 2.0)));
    }

    #[test]
    fn test_commands_serialize_with_op_tag() {
        let mut rec = CommandRecorder::new(10.0, 10.0);
        rec.begin_path();
        let json = rec.to_json().unwrap();
        assert!(json.contains("\"op\": \"beginPath\""));
    }
}
