//! Controller source code generation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::info;
use serde::Deserialize;
use std::fmt::Write;
use std::path::Path;

use super::ExportError;
use crate::path::{fmt_num, PathModel};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Names used in the generated source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportParams {
    /// Package the generated class is placed in.
    pub package: String,

    /// Name of the generated class.
    pub class_name: String,

    /// Class the generated class extends, which provides `turn` and `driveToPosition`.
    pub base_class: String,
}

impl Default for ExportParams {
    fn default() -> Self {
        Self {
            package: String::from("org.firstinspires.ftc.teamcode"),
            class_name: String::from("AutonPath"),
            base_class: String::from("PositionBasedAuton3"),
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Generate the autonomous op mode source for a path.
///
/// Each segment becomes a `driveToPosition` call to its end waypoint. If the segment's start
/// waypoint has a turn a `turn` call is placed immediately before it, and the drive carries the
/// heading after that turn.
pub fn export_commands(model: &PathModel, params: &ExportParams) -> Result<String, ExportError> {
    let waypoints = model.waypoints();

    if waypoints.len() < 2 {
        return Err(ExportError::EmptyPath(waypoints.len()));
    }

    let mut s = String::new();

    // Writing into a String cannot fail
    let _ = write!(
        s,
        "package {};\n\n\
         import com.qualcomm.robotcore.eventloop.opmode.Autonomous;\n\n\
         @Autonomous\n\
         public class {} extends {} {{\n",
        params.package, params.class_name, params.base_class
    );

    let _ = write!(
        s,
        "public void setStartPos(){{\n\
         startX = {}; startY = {};\n\
         startOrientation = {};\n\
         }}\n\n",
        fmt_num(waypoints[0].x),
        fmt_num(waypoints[0].y),
        fmt_num(model.start_heading_deg())
    );

    s.push_str("public void drive(){\n");

    for i in 1..waypoints.len() {
        if let Some(t) = model.turn_at(i - 1) {
            let _ = writeln!(s, "turn({},TURN_SPEED,positioning);", fmt_num(t.angle_deg));
        }

        let _ = writeln!(
            s,
            "driveToPosition({},{},DRIVE_SPEED,{},0,0,positioning,sensing);",
            fmt_num(waypoints[i].x),
            fmt_num(waypoints[i].y),
            fmt_num(model.heading_leaving(i - 1))
        );
    }

    s.push_str("}}\n");

    Ok(s)
}

/// Generate the source for a path and write it to a file.
pub fn export_to_file<P: AsRef<Path>>(
    model: &PathModel,
    params: &ExportParams,
    path: P,
) -> Result<(), ExportError> {
    let source = export_commands(model, params)?;

    std::fs::write(path.as_ref(), source)?;

    info!("Exported {} to {:?}", params.class_name, path.as_ref());

    Ok(())
}
