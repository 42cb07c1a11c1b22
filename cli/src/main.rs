mod script;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::{Parser, Subcommand};
use dotgrid_core::{
    create_lattice, Dot, MatchRule, PuzzleConfig, PuzzleController, Segment, Style, Surface,
    TargetShape, VirtualScheduler, DEFAULT_SHAPE_SLUG, SHAPE_CATALOG,
};

use crate::script::parse_drag_script;

#[derive(Parser)]
#[command(name = "dotgrid-cli", version, about = "Headless tools for the dotgrid puzzle")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ConfigArgs {
    /// JSON file with puzzle settings; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    spacing: Option<f64>,
    /// exact or unordered
    #[arg(long = "match")]
    match_rule: Option<MatchRule>,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed a drag script through the controller on a virtual clock.
    Replay {
        #[command(flatten)]
        config: ConfigArgs,
        #[arg(long, default_value = DEFAULT_SHAPE_SLUG)]
        shape: String,
        /// Points as "x,y", strokes separated by "|".
        #[arg(long)]
        path: String,
        /// Virtual time between input events.
        #[arg(long, default_value_t = 16)]
        step_ms: u64,
    },
    /// List the built-in target shapes.
    Shapes,
    /// Print the dot lattice for the given settings.
    Lattice {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Default)]
struct LogSurface {
    segments: usize,
}

impl Surface for LogSurface {
    fn draw_dot(&mut self, _dot: &Dot, _radius: f64, _style: &Style) {}

    fn draw_segment(&mut self, segment: &Segment, _style: &Style) {
        self.segments += 1;
        println!(
            "  {}. {} -> {}",
            self.segments,
            fmt_point(segment.start.x, segment.start.y),
            fmt_point(segment.end.x, segment.end.y)
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            config,
            shape,
            path,
            step_ms,
        } => {
            let config = load_config(&config)?;
            let target = TargetShape::from_slug(&shape)?;
            let actions = parse_drag_script(&path)?;
            replay(config, target, &actions, step_ms)?;
        }
        Commands::Shapes => {
            for entry in SHAPE_CATALOG {
                println!(
                    "{:<8} {:<8} {} segments",
                    entry.slug,
                    entry.label,
                    entry.segments.len()
                );
            }
        }
        Commands::Lattice { config } => {
            let config = load_config(&config)?;
            let dots = create_lattice(config.grid_spacing, config.canvas_size)?;
            println!("{} dots", dots.len());
            for dot in dots {
                println!("  {:>3} {}", dot.index, fmt_point(dot.center.x, dot.center.y));
            }
        }
    }

    Ok(())
}

fn replay(
    config: PuzzleConfig,
    target: TargetShape,
    actions: &[dotgrid_core::DragAction],
    step_ms: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let clock = VirtualScheduler::new();
    let notified = Rc::new(RefCell::new(Vec::new()));
    let notified_hook = notified.clone();
    let clock_hook = clock.clone();
    let win_delay_ms = u64::from(config.win_delay_ms);
    println!(
        "shape: {} ({} segments), match: {}",
        target.slug(),
        target.len(),
        config.match_rule
    );
    println!("segments:");
    let mut ctrl = PuzzleController::new(
        config,
        target,
        LogSurface::default(),
        clock.clone(),
        Rc::new(move |message: &str| {
            notified_hook
                .borrow_mut()
                .push((clock_hook.now_ms(), message.to_string()));
        }),
    )?;
    let mut solved_at = None;
    for action in actions {
        let outcome = ctrl.dispatch(*action);
        if let dotgrid_core::DragOutcome::SegmentDrawn {
            solved_now: true, ..
        } = outcome
        {
            solved_at = Some(clock.now_ms());
        }
        clock.advance(step_ms);
    }
    if ctrl.drawn_segments().is_empty() {
        println!("  (none)");
    }
    clock.advance(win_delay_ms);

    println!("solved: {}", ctrl.is_solved());
    if let Some(at) = solved_at {
        println!("matched_at_ms: {at}");
    }
    match notified.borrow().first() {
        Some((at, message)) => println!("notified_at_ms: {at} ({message})"),
        None => println!("notified: no"),
    }
    Ok(())
}

fn load_config(args: &ConfigArgs) -> Result<PuzzleConfig, Box<dyn std::error::Error>> {
    let mut config = match args.config.as_deref() {
        Some(path) => read_config_file(path)?,
        None => PuzzleConfig::default(),
    };
    if let Some(spacing) = args.spacing {
        config.grid_spacing = spacing;
    }
    if let Some(rule) = args.match_rule {
        config.match_rule = rule;
    }
    config.validate()?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<PuzzleConfig, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    let config = serde_json::from_str(&raw)
        .map_err(|err| format!("failed to parse {}: {err}", path.display()))?;
    Ok(config)
}

fn fmt_point(x: f64, y: f64) -> String {
    format!("({x}, {y})")
}
