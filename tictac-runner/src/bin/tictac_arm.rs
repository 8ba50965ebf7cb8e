use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::time::Duration;
use tictac_controller::{
    arm_config::{ArmConfig, Limb},
    cancel::CancelHandle,
    cell_geometry::BoardGeometry,
    motion_sequencer::{MotionError, MotionSequencer},
    simulator::{SimSettings, SimulatedRig},
};
use tictac_runner::logging;

#[derive(Parser)]
#[command(author, version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Sets the level of verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log as json lines
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Play one turn per cell on the simulated rig
    Play(PlayArgs),
    /// Print the placement pose of a board cell
    Cell(CellArgs),
    /// Validate a config and write it back out
    Config(ConfigArgs),
}

#[derive(clap::Args)]
struct PlayArgs {
    /// Cells to place tokens on, in order
    #[arg(required = true)]
    cells: Vec<usize>,

    /// Config of the playing arm, the included one when not set
    #[arg(long)]
    left_config: Option<String>,

    /// Config of the arm parked out of the camera view
    #[arg(long)]
    right_config: Option<String>,

    /// Simulated travel time of a single move
    #[arg(long, default_value_t = 500)]
    travel_ms: u64,

    /// Simulate an empty token stack
    #[arg(long)]
    no_tokens: bool,
}

#[derive(clap::Args)]
struct CellArgs {
    index: usize,

    #[arg(long, default_value_t = 0.65)]
    center_x: f64,

    #[arg(long, default_value_t = 0.0)]
    center_y: f64,

    #[arg(long, default_value_t = 0.08)]
    cell_side: f64,

    /// Cells per board side
    #[arg(long, default_value_t = 3)]
    grid: usize,
}

#[derive(clap::Args)]
struct ConfigArgs {
    /// json or yaml config, picked by extension
    #[arg(short, long)]
    input: Option<String>,

    #[arg(short, long)]
    output: Option<String>,

    /// Included config to dump when no input is given
    #[arg(long, value_enum, default_value_t = LimbArg::Left)]
    limb: LimbArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum LimbArg {
    Left,
    Right,
}

impl From<LimbArg> for Limb {
    fn from(limb: LimbArg) -> Self {
        match limb {
            LimbArg::Left => Limb::Left,
            LimbArg::Right => Limb::Right,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::setup_tracing(args.verbose, args.json);

    match args.command {
        Command::Play(args) => play(args).await?,
        Command::Cell(args) => cell(args)?,
        Command::Config(args) => config(args)?,
    }
    Ok(())
}

fn load_or_included(path: Option<&str>, limb: Limb) -> Result<ArmConfig> {
    let config = match path {
        Some(path) => {
            ArmConfig::load(path).with_context(|| format!("Failed to load config {}", path))?
        }
        None => ArmConfig::included(limb),
    };
    config.validate()?;
    Ok(config)
}

async fn play(args: PlayArgs) -> Result<()> {
    let left_config = load_or_included(args.left_config.as_deref(), Limb::Left)?;
    let right_config = load_or_included(args.right_config.as_deref(), Limb::Right)?;
    let settings = SimSettings {
        travel_time: Duration::from_millis(args.travel_ms),
        token_present: !args.no_tokens,
        ..Default::default()
    };

    let cancel = CancelHandle::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to wait for Ctrl+c");
            tracing::info!("Detected Ctrl+c");
            cancel.cancel();
        }
    });

    let right_rig = SimulatedRig::new(&right_config, settings.clone());
    let mut right_arm = right_rig.sequencer(cancel.clone())?;
    right_arm.move_to_rest().await?;
    tracing::info!("Right arm out of camera view");

    let left_rig = SimulatedRig::new(&left_config, settings);
    let mut left_arm = left_rig.sequencer(cancel.clone())?;
    left_arm.move_to_standby().await?;

    for cell in args.cells {
        if cancel.is_cancelled() {
            break;
        }
        if let Err(error) = take_turn(&mut left_arm, cell).await {
            tracing::error!(cell, %error, "Turn failed");
            if !cancel.is_cancelled() {
                tracing::info!("Moving to standby");
                left_arm.move_to_standby().await?;
            }
            return Err(error.into());
        }
        tracing::info!(cell, "Token placed");
    }
    Ok(())
}

async fn take_turn(arm: &mut MotionSequencer, cell: usize) -> Result<(), MotionError> {
    arm.pick_up_token(None).await?;
    arm.place_token(cell).await?;
    arm.move_to_standby().await
}

fn cell(args: CellArgs) -> Result<()> {
    let board = BoardGeometry::new(args.center_x, args.center_y, args.cell_side)
        .with_grid_dimension(args.grid);
    board.check_grid()?;
    let pose = board.pose_for_cell(args.index)?;
    println!("{}", serde_json::to_string_pretty(&pose)?);
    Ok(())
}

fn config(args: ConfigArgs) -> Result<()> {
    let config = match &args.input {
        Some(path) => ArmConfig::load(path)?,
        None => ArmConfig::included(args.limb.into()),
    };
    config.validate()?;
    match &args.output {
        Some(path) => {
            config.save(path)?;
            tracing::info!("Config written to {}", path);
        }
        None => println!("{}", config.serialize_to_json()?),
    }
    Ok(())
}
