//! # Hotwire CAM Tools
//!
//! Turns positioned airfoil ribs into a four-axis hot-wire program.
//!
//! ## Components
//!
//! - **Panel**: ribs (profile, chord, rotation, offset, stock) and the panel between them
//! - **Machine**: tower geometry, kerf and heights; projects rib points onto the towers
//! - **Cutting Strategy**: lock-step traversal of both ribs with lead-in/out, stock and spar cuts
//! - **G-code**: command sink, normalization and output formatters

pub mod cutting_strategy;
pub mod error;
pub mod gcode;
pub mod machine;
pub mod panel;

// Re-export commonly used items
pub use cutting_strategy::{CuttingStrategy, StandardCuttingStrategy};
pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use gcode::{
    Axes, CommandSink, DebugGcodeFormatter, FormatterKind, Gcode, GcodeFormatter,
    GenericGcodeFormatter, MachinePosition, MotionCommand, MoveFlags,
};
pub use machine::{Machine, MachineParameters};
pub use panel::{Panel, Rib};
