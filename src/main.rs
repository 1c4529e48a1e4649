use clap::Parser;
use std::io;
use std::process;

use pose_collector::camera::Webcam;
use pose_collector::catalog;
use pose_collector::cli::{self, Args, Command};
use pose_collector::config::Config;
use pose_collector::error::CollectorError;
use pose_collector::pose::MoveNet;
use pose_collector::session::{CaptureSession, SessionContext, SessionPlan};
use pose_collector::terminal::TerminalDisplay;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = match Config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    args.apply_to(&mut config);

    let result = match &args.command {
        Some(Command::ListPoses) => cli::list_poses(&config),
        Some(Command::ListCameras) => cli::list_cameras(),
        Some(Command::Config { action }) => {
            cli::handle_config_action(action.clone(), &config, args.config.as_deref())
        }
        None => run_collection(&args, &config),
    };

    match result {
        Ok(()) => {}
        Err(CollectorError::Aborted) => println!("Aborted, no examples were recorded."),
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_validation() {
                eprintln!("Nothing was recorded and no files were created.");
            }
            process::exit(1);
        }
    }
}

/// Warnings only by default; `--verbose` adds progress. `RUST_LOG` wins.
fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn run_collection(args: &Args, config: &Config) -> Result<(), CollectorError> {
    let paths = &config.paths;

    let (pose, count) = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();

        let pose = match args.pose {
            Some(n) => catalog::select(n)?,
            None => cli::prompt_pose(&mut input, &mut output, &paths.data_dir)?,
        };
        pose.require_reference(&paths.poses_dir)?;
        println!("You selected {}.", pose);

        let count = match args.count {
            Some(n) => n,
            None => cli::prompt_count(&mut input, &mut output)?,
        };
        (pose, count)
    };

    let plan = SessionPlan::for_pose(
        pose,
        count,
        &paths.poses_dir,
        &paths.data_dir,
        config.timing(),
    )?;
    println!("Recording {} examples of {}.", plan.count, pose);

    // Only after every input is valid; the writer needs the pose directory
    catalog::ensure_data_dirs(&paths.data_dir)?;

    let mut estimator = MoveNet::load(config.movenet())?;
    let source = Webcam::open(config.camera_settings())?;
    let display = TerminalDisplay::new(config.ascii_style())?;

    // Devices are released before anything is printed
    let mut ctx = SessionContext::new(source, display);
    let report = CaptureSession::new(&plan, &mut ctx).run(&mut estimator);
    drop(ctx);
    let report = report?;

    let missed = report.examples.iter().filter(|e| !e.detected).count();
    println!(
        "Wrote {} examples of {} to {}.",
        report.examples.len(),
        report.pose,
        plan.pose_dir.display()
    );
    if missed > 0 {
        println!("{} of them had no detected pose; results.json is null.", missed);
    }
    Ok(())
}
