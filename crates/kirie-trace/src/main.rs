//! kirie-trace: CLI tool for replaying editing scripts against the engine.
//!
//! Reads a JSON array of editing operations, drives them through the
//! same session and gesture code the web app uses, and prints the
//! resulting state. Useful for:
//!
//! - Reproducing editing bugs headlessly from a recorded script
//! - Checking how a sequence of edits lands without a browser
//! - Diffing engine behavior between revisions via `--json` output
//!
//! # Usage
//!
//! ```text
//! cargo run --bin kirie-trace -- [OPTIONS] <SCRIPT_PATH>
//! ```
//!
//! A script is a JSON array of tagged operations, e.g.:
//!
//! ```json
//! [
//!   {"op": "load_image", "width": 1600, "height": 900},
//!   {"op": "zoom_in"},
//!   {"op": "pointer_down", "x": 500.0, "y": 400.0},
//!   {"op": "pointer_move", "x": 460.0, "y": 400.0},
//!   {"op": "pointer_up"},
//!   {"op": "undo"}
//! ]
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use kirie_engine::{
    EditorSession, GestureController, Point, ResizeDirection, StencilShape,
};
use serde::{Deserialize, Serialize};

/// Editing script replay and state inspection for kirie.
///
/// Replays a JSON script of editing operations through the engine and
/// prints the final state, optionally tracing after every operation.
#[derive(Parser)]
#[command(name = "kirie-trace", version)]
struct Cli {
    /// Path to the JSON script, or `-` to read from stdin.
    script_path: PathBuf,

    /// Output state as JSON instead of a human-readable report.
    #[arg(long)]
    json: bool,

    /// Print the state after every operation, not just at the end.
    #[arg(long)]
    trace: bool,
}

/// One scripted editing operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Op {
    /// Load an image with the given source dimensions.
    LoadImage { width: u32, height: u32 },
    /// Switch the stencil to a different shape.
    SelectShape { shape: StencilShape },
    /// One zoom-in click.
    ZoomIn,
    /// One zoom-out click.
    ZoomOut,
    /// Set the absolute zoom.
    SetZoom { scale: f64 },
    /// Grow the stencil by one step.
    GrowStencil,
    /// Shrink the stencil by one step.
    ShrinkStencil,
    /// Press the pointer at canvas coordinates.
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    /// Move the pointer.
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    /// Release the pointer.
    PointerUp,
    /// Step back one edit.
    Undo,
    /// Step forward one edit.
    Redo,
    /// Return to the initial post-load state.
    Reset,
}

/// Replay state: the session plus the gesture controller the web app
/// would be driving.
#[derive(Default)]
struct Replay {
    session: EditorSession,
    gestures: GestureController,
}

impl Replay {
    fn apply(&mut self, op: Op) {
        match op {
            Op::LoadImage { width, height } => {
                self.gestures.cancel();
                self.session.load_image(width, height);
            }
            Op::SelectShape { shape } => self.session.select_shape(shape),
            Op::ZoomIn => self.session.zoom_in(),
            Op::ZoomOut => self.session.zoom_out(),
            Op::SetZoom { scale } => self.session.set_zoom(scale),
            Op::GrowStencil => self.session.resize_stencil_step(ResizeDirection::Grow),
            Op::ShrinkStencil => self.session.resize_stencil_step(ResizeDirection::Shrink),
            Op::PointerDown { x, y, shift } => {
                self.gestures.set_modifier(shift);
                self.gestures.pointer_down(&self.session, Point::new(x, y));
            }
            Op::PointerMove { x, y, shift } => {
                self.gestures.set_modifier(shift);
                self.gestures.pointer_move(&mut self.session, Point::new(x, y));
            }
            Op::PointerUp => {
                self.gestures.pointer_up(&mut self.session);
            }
            Op::Undo => self.session.undo(),
            Op::Redo => self.session.redo(),
            Op::Reset => self.session.reset_to_initial(),
        }
    }

    fn report(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let stencil = self.session.stencil();
        let _ = writeln!(
            out,
            "stencil: {} {}x{} at ({}, {})",
            stencil.shape.label(),
            stencil.width,
            stencil.height,
            stencil.x,
            stencil.y,
        );
        if let Some(transform) = self.session.transform() {
            let _ = writeln!(
                out,
                "image: {}x{} source, scale {:.4} ({}%), at ({:.2}, {:.2})",
                transform.source_width,
                transform.source_height,
                transform.scale,
                self.session.zoom_percent(),
                transform.x,
                transform.y,
            );
        } else {
            let _ = writeln!(out, "image: none loaded");
        }
        let (past, future) = self.session.history_depths();
        let _ = writeln!(
            out,
            "history: {past} past, {future} future, dragging: {}",
            self.gestures.is_dragging(),
        );
        out
    }
}

/// Read the script from a file or stdin.
fn read_script(path: &Path) -> Result<Vec<Op>, String> {
    let text = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).map_err(|e| format!("Error reading stdin: {e}"))?
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading {}: {e}", path.display()))?
    };
    serde_json::from_str(&text).map_err(|e| format!("Error parsing script: {e}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let ops = match read_script(&cli.script_path) {
        Ok(ops) => ops,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let mut replay = Replay::default();

    for (index, op) in ops.iter().enumerate() {
        replay.apply(*op);
        if cli.trace {
            println!("--- after op {index}: {op:?}");
            print!("{}", replay.report());
        }
    }

    if cli.json {
        match serde_json::to_string_pretty(&replay.session) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing state: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", replay.report());
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn script_round_trips_through_serde() {
        let script = r#"[
            {"op": "load_image", "width": 1600, "height": 900},
            {"op": "select_shape", "shape": {"kind": "circle"}},
            {"op": "zoom_in"},
            {"op": "pointer_down", "x": 500.0, "y": 400.0, "shift": true},
            {"op": "pointer_move", "x": 540.0, "y": 420.0},
            {"op": "pointer_up"},
            {"op": "undo"}
        ]"#;
        let ops: Vec<Op> = serde_json::from_str(script).unwrap();
        assert_eq!(ops.len(), 7);

        let mut replay = Replay::default();
        for op in ops {
            replay.apply(op);
        }
        assert!(replay.session.has_image());
        assert!(replay.session.can_redo());
        assert!(!replay.gestures.is_dragging());
    }

    #[test]
    fn replay_matches_direct_session_calls() {
        let ops = [
            Op::LoadImage {
                width: 800,
                height: 400,
            },
            Op::ZoomIn,
            Op::GrowStencil,
            Op::Reset,
        ];
        let mut replay = Replay::default();
        for op in ops {
            replay.apply(op);
        }

        let mut expected = EditorSession::new();
        expected.load_image(800, 400);
        expected.zoom_in();
        expected.resize_stencil_step(ResizeDirection::Grow);
        expected.reset_to_initial();

        assert_eq!(replay.session, expected);
    }
}
