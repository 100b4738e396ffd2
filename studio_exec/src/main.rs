//! Main studio executable entry point.
//!
//! # Usage
//!
//! ```text
//! studio_exec [--params <file>] [--log-level <lvl>] <SUBCOMMAND>
//!
//!     describe <save>                         List the segments and turns of a saved path
//!     simulate <save> [--unpaced] [--archive] Play a saved path back
//!     export <save> [-o <out.java>]           Generate the op mode source for a saved path
//!     edit <script> [--base <save>] -o <out>  Apply an edit script and save the result
//! ```
//!
//! Parameters are read from `--params` if given, otherwise from `params/studio.toml` under the
//! software root. If neither is available the built in defaults are used.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{info, warn};
use std::path::{Path, PathBuf};
use structopt::StructOpt;

// Internal
use studio_lib::{
    edit_processor,
    export,
    kinematics::RobotBody,
    params::StudioParams,
    path::PathModel,
    sim::{Pacing, PoseArchiver, SimPlayer},
};
use util::{
    archive::Archived,
    logger::{logger_init, LevelFilter},
    params::LoadError,
    script_interpreter::ScriptInterpreter,
    session::{Session, SessionError},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const EXEC_NAME: &str = "studio_exec";

const SESSIONS_DIR: &str = "sessions";

const PARAMS_FILE: &str = "studio.toml";

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "studio_exec", about = "Author, simulate and export autonomous paths")]
struct Opts {
    /// Parameter file to use instead of params/studio.toml
    #[structopt(long, parse(from_os_str))]
    params: Option<PathBuf>,

    /// Minimum log level, at least as verbose as "info"
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,

    #[structopt(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, StructOpt)]
enum Cmd {
    /// List the segments and turns of a saved path
    #[structopt(name = "describe")]
    Describe {
        #[structopt(parse(from_os_str))]
        save: PathBuf,
    },

    /// Play a saved path back
    #[structopt(name = "simulate")]
    Simulate {
        #[structopt(parse(from_os_str))]
        save: PathBuf,

        /// Produce frames as fast as possible instead of in real time
        #[structopt(long)]
        unpaced: bool,

        /// Archive every pose to arch/sim/poses.csv in the session directory
        #[structopt(long)]
        archive: bool,
    },

    /// Generate the op mode source for a saved path
    #[structopt(name = "export")]
    Export {
        #[structopt(parse(from_os_str))]
        save: PathBuf,

        /// Output file, defaults to <class_name>.java
        #[structopt(short = "o", long, parse(from_os_str))]
        output: Option<PathBuf>,
    },

    /// Apply an edit script and save the resulting path
    #[structopt(name = "edit")]
    Edit {
        #[structopt(parse(from_os_str))]
        script: PathBuf,

        /// Save file to start from, otherwise the script starts from an empty field
        #[structopt(long, parse(from_os_str))]
        base: Option<PathBuf>,

        /// Save file to write
        #[structopt(short = "o", long, parse(from_os_str))]
        output: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session, falling back to the working directory if there's no software root
    let session = match Session::new(EXEC_NAME, SESSIONS_DIR) {
        Ok(s) => s,
        Err(SessionError::SwRootNotSet) => Session::in_dir(EXEC_NAME, SESSIONS_DIR)
            .wrap_err("Failed to create the session in the working directory")?,
        Err(e) => return Err(e).wrap_err("Failed to create the session"),
    };

    // Initialise logger
    logger_init(opts.log_level, &session).wrap_err("Failed to initialise logging")?;

    info!("Auton Studio Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params = load_params(&opts)?;
    info!("Exec parameters loaded");

    // ---- RUN COMMAND ----

    let result = match opts.cmd {
        Cmd::Describe { ref save } => describe(&params, save),
        Cmd::Simulate {
            ref save,
            unpaced,
            archive,
        } => simulate(&params, &session, save, unpaced, archive),
        Cmd::Export {
            ref save,
            ref output,
        } => export_source(&params, save, output.as_deref()),
        Cmd::Edit {
            ref script,
            ref base,
            ref output,
        } => edit(&params, &session, script, base.as_deref(), output),
    };

    session.exit();

    result
}

fn load_params(opts: &Opts) -> Result<StudioParams, Report> {
    if let Some(ref path) = opts.params {
        info!("Loading parameters from {:?}", path);
        return util::params::load_path(path).wrap_err("Could not load studio params");
    }

    match util::params::load::<StudioParams>(PARAMS_FILE) {
        Ok(p) => Ok(p),
        Err(LoadError::SwRootNotSet) => {
            warn!("Software root not set, using default parameters");
            Ok(StudioParams::default())
        }
        Err(e) => Err(e).wrap_err("Could not load studio params"),
    }
}

fn load_save(params: &StudioParams, save: &Path) -> Result<PathModel, Report> {
    let model = export::load_from_file(save, params.sim.default_velocity_ips)
        .wrap_err_with(|| format!("Could not load the save file {:?}", save))?;

    info!(
        "Loaded {} waypoints and {} turns",
        model.waypoint_count(),
        model.turn_count()
    );

    Ok(model)
}

fn describe(params: &StudioParams, save: &Path) -> Result<(), Report> {
    let model = load_save(params, save)?;

    for s in model
        .describe_all_paths()
        .wrap_err("Could not describe the paths")?
    {
        println!("{}", s);
    }

    for s in model
        .describe_all_turns()
        .wrap_err("Could not describe the turns")?
    {
        println!("{}", s);
    }

    Ok(())
}

fn simulate(
    params: &StudioParams,
    session: &Session,
    save: &Path,
    unpaced: bool,
    archive: bool,
) -> Result<(), Report> {
    let model = load_save(params, save)?;

    let body = RobotBody::new(params.robot, params.field.pixels_per_inch)
        .wrap_err("Invalid robot parameters")?;

    let mut player = SimPlayer::new(model, params.field, params.sim, body)
        .wrap_err("Could not start the simulation")?;

    info!("Playing back {} frames", player.total_frames());

    let mut archiver = if archive {
        let a = PoseArchiver::new(session)
            .map_err(|e| eyre!("Could not create the pose archive: {}", e))?;
        Some(a)
    }
    else {
        None
    };

    let pacing = if unpaced {
        Pacing::Unpaced
    }
    else {
        Pacing::RealTime
    };

    let report = player.run(
        |pose| {
            if let Some(ref mut a) = archiver {
                a.record(pose);
                if let Err(e) = a.write() {
                    warn!("Could not archive frame {}: {}", pose.frame, e);
                }
            }
        },
        || false,
        pacing,
    );

    info!(
        "Simulation finished: {} frames, {} overruns",
        report.frames, report.overruns
    );

    session.save("sim/report.json", report);

    Ok(())
}

fn export_source(
    params: &StudioParams,
    save: &Path,
    output: Option<&Path>,
) -> Result<(), Report> {
    let model = load_save(params, save)?;

    let output = match output {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(format!("{}.java", params.export.class_name)),
    };

    export::export_to_file(&model, &params.export, &output)
        .wrap_err_with(|| format!("Could not export to {:?}", output))?;

    println!("Exported to {}", output.display());

    Ok(())
}

fn edit(
    params: &StudioParams,
    session: &Session,
    script: &Path,
    base: Option<&Path>,
    output: &Path,
) -> Result<(), Report> {
    let mut model = match base {
        Some(b) => load_save(params, b)?,
        None => PathModel::new(params.sim.default_velocity_ips),
    };

    let interp = ScriptInterpreter::new(script).wrap_err("Failed to load script")?;

    info!("Loaded script containing {} edits", interp.get_num_cmds());

    let cmds: Vec<_> = interp.collect();

    let num_applied = edit_processor::exec_all(&mut model, &cmds).map_err(|(i, e)| {
        eyre!("Edit {} ({}) was rejected: {}", i + 1, cmds[i].to_json(), e)
    })?;

    info!("Applied {} edits", num_applied);

    export::save_to_file(&model, output)
        .wrap_err_with(|| format!("Could not save to {:?}", output))?;

    // Keep a copy of the edited path with the session
    session.save("edit/model.json", model);

    println!("Saved to {}", output.display());

    Ok(())
}
