use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ifsforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a fractal and rasterize it as a PNG.
    Render(RenderArgs),
    /// Solve the convex hulls of every definition and print them.
    Hulls(SourceArgs),
    /// Print a built-in recipe as JSON, or list the built-in names.
    Preset(PresetArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Input recipe JSON.
    #[arg(long = "in", conflicts_with = "preset", required_unless_present = "preset")]
    in_path: Option<PathBuf>,

    /// Use a built-in recipe instead of a file.
    #[arg(long)]
    preset: Option<String>,

    /// Override the recipe seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Edge of the square output image, in pixels.
    #[arg(long, default_value_t = 1000)]
    size: u32,

    /// Transparent background instead of white.
    #[arg(long)]
    transparent: bool,

    /// Also write the recorded drawing as JSON.
    #[arg(long)]
    drawing: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PresetArgs {
    /// Built-in recipe name; lists the names when omitted.
    name: Option<String>,

    /// Write the JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Hulls(args) => cmd_hulls(args),
        Command::Preset(args) => cmd_preset(args),
    }
}

fn read_recipe_json(path: &Path) -> anyhow::Result<ifsforge::Recipe> {
    let f = File::open(path).with_context(|| format!("open recipe '{}'", path.display()))?;
    let r = BufReader::new(f);
    let recipe: ifsforge::Recipe = serde_json::from_reader(r).with_context(|| "parse recipe JSON")?;
    Ok(recipe)
}

fn load_recipe(source: &SourceArgs) -> anyhow::Result<ifsforge::Recipe> {
    let mut recipe = match (&source.in_path, &source.preset) {
        (Some(path), _) => read_recipe_json(path)?,
        (None, Some(name)) => ifsforge::recipe::presets::by_name(name).with_context(|| {
            format!(
                "unknown preset '{name}' (known: {})",
                ifsforge::recipe::presets::NAMES.join(", ")
            )
        })?,
        (None, None) => anyhow::bail!("pass --in <recipe.json> or --preset <name>"),
    };
    if let Some(seed) = source.seed {
        recipe.seed = seed;
    }
    recipe.validate()?;
    Ok(recipe)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let recipe = load_recipe(&args.source)?;
    let generated = recipe.generate()?;
    let report = &generated.iterations;
    tracing::info!(
        rounds = report.rounds,
        pieces = report.final_pieces,
        dropped = report.dropped,
        budget_exhausted = report.budget_exhausted,
        strokes = generated.drawing.len(),
        "generated"
    );
    if report.round_cap_hit {
        tracing::warn!(max_rounds = recipe.max_rounds, "stopped at the round cap");
    }

    if let Some(path) = &args.drawing {
        std::fs::write(path, generated.drawing.to_json()?)
            .with_context(|| format!("write drawing '{}'", path.display()))?;
    }

    let mut opts = ifsforge::RasterOpts::square(args.size);
    if args.transparent {
        opts.background = None;
    }
    let frame = ifsforge::rasterize(&generated.drawing, &opts)?;
    ifsforge::save_png(&frame, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_hulls(args: SourceArgs) -> anyhow::Result<()> {
    let recipe = load_recipe(&args)?;
    let mut system = recipe.build()?;
    let opts = recipe.hulls.clone().unwrap_or_default();
    let report = system.calculate_hulls(&opts)?;

    println!(
        "rounds={} degenerate={} skipped_children={}",
        report.rounds, report.degenerate_events, report.skipped_children
    );
    for defn in system.defns() {
        let fid = defn.fid();
        let hull = defn.hull().unwrap_or_default();
        let points: Vec<String> = hull
            .iter()
            .map(|p| format!("({:.4}, {:.4})", p.x, p.y))
            .collect();
        println!(
            "{fid}: diameter={:.4} points={} [{}]",
            defn.relative_diameter(),
            hull.len(),
            points.join(", ")
        );
    }
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let Some(name) = args.name else {
        for name in ifsforge::recipe::presets::NAMES {
            println!("{name}");
        }
        return Ok(());
    };
    let recipe = ifsforge::recipe::presets::by_name(&name)
        .with_context(|| format!("unknown preset '{name}'"))?;
    let json = recipe.to_json()?;
    match args.out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("write recipe '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
