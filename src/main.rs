use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::fs;
use std::path::PathBuf;

use topogen::config::Config;
use topogen::orchestrator::{generate_plan, RunOptions};
use topogen::render;
use topogen::topology::Mode;

/// Static topology generator for virtual network labs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of router nodes to generate
    #[arg(value_parser = clap::value_parser!(u64).range(1..=1000))]
    nodes: Option<u64>,

    /// Path to the generator configuration YAML file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Write the default configuration to the config file and exit
    #[arg(short, long)]
    write_config: bool,

    /// Topology generation strategy
    #[arg(short, long, default_value_t = Mode::Simple)]
    mode: Mode,

    /// Node distance in canvas units
    #[arg(short, long, default_value_t = 200)]
    distance: i64,

    /// Lab name to create
    #[arg(short = 'L', long, default_value = "topogen lab")]
    labname: String,

    /// Template name to use for router configurations
    #[arg(short = 'T', long, default_value = "iosv")]
    template: String,

    /// List all available templates
    #[arg(long)]
    list_templates: bool,

    /// Seed for the nx strategy's random generator
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Output directory for rendered configurations and the lab plan
    #[arg(short, long, default_value = "lab_output")]
    output: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if args.write_config {
        let cfg = Config::default();
        cfg.save(&args.config)?;
        info!("Default configuration written to {}", args.config.display());
        return Ok(());
    }

    if args.list_templates {
        println!("Available templates: {}", render::template_names().join(", "));
        return Ok(());
    }

    let nodes = args.nodes.ok_or_else(|| eyre!("need to provide number of nodes!"))?;

    let config = Config::load(&args.config)?;

    let opts = RunOptions {
        node_count: nodes as usize,
        mode: args.mode,
        distance: args.distance,
        seed: args.seed,
        template: args.template.clone(),
        lab_name: args.labname.clone(),
    };
    let plan = generate_plan(&config, &opts)?;

    fs::create_dir_all(&args.output).wrap_err_with(|| {
        format!("failed to create output directory '{}'", args.output.display())
    })?;
    for node in &plan.nodes {
        if node.configuration.is_empty() {
            continue;
        }
        let path = args.output.join(format!("{}.cfg", node.hostname));
        fs::write(&path, &node.configuration)
            .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    }
    let plan_path = args.output.join("plan.json");
    let raw = serde_json::to_string_pretty(&plan).wrap_err("failed to serialize lab plan")?;
    fs::write(&plan_path, raw)
        .wrap_err_with(|| format!("failed to write '{}'", plan_path.display()))?;

    info!("Lab plan written to {}", plan_path.display());
    Ok(())
}
