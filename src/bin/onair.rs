use std::{
    cell::RefCell,
    io::Read as _,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "onair", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a playout script against a headless template and print the final snapshot.
    Run(RunArgs),
    /// List the remote triggers and the operations they map to.
    Keys,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Template descriptor JSON.
    #[arg(long)]
    template: PathBuf,

    /// Controller config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Script file. Read from stdin when omitted.
    #[arg(long)]
    script: Option<PathBuf>,

    /// External data JSON object, standing in for the query string.
    #[arg(long)]
    data: Option<PathBuf>,

    /// How the headless graphic answers initial-play requests.
    #[arg(long, value_enum, default_value_t = GateChoice::None)]
    gate: GateChoice,

    /// Production playout (overrides the config file).
    #[arg(long)]
    production: bool,

    /// Preview right after attach (overrides the config file).
    #[arg(long)]
    auto_preview: bool,

    /// Controller name used in logs (overrides the config file).
    #[arg(long)]
    name: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GateChoice {
    None,
    Immediate,
    Hold,
}

#[derive(serde::Serialize)]
struct RunReport<'a> {
    template: &'a str,
    snapshot: &'a onair::ControllerSnapshot,
    transitions: Vec<onair::PlaybackState>,
    timeline: Vec<onair::TimelineEvent>,
    script: onair::ScriptReport,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Keys => cmd_keys(),
    }
}

fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {what} '{}'", path.display()))
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let template = onair::TemplateDescriptor::from_json_str(&read_text(&args.template, "template")?)
        .with_context(|| format!("parse template '{}'", args.template.display()))?;

    let mut config = match &args.config {
        Some(path) => onair::ControllerConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => onair::ControllerConfig::default(),
    };
    config.production |= args.production;
    config.auto_preview |= args.auto_preview;
    if let Some(name) = args.name {
        config.name = Some(name);
    }

    let external = match &args.data {
        Some(path) => onair::HostData::from_json_str(&read_text(path, "data")?)
            .with_context(|| format!("parse data '{}'", path.display()))?,
        None => onair::HostData::empty(),
    };

    let script_src = match &args.script {
        Some(path) => read_text(path, "script")?,
        None => {
            let mut s = String::new();
            std::io::stdin()
                .read_to_string(&mut s)
                .context("read script from stdin")?;
            s
        }
    };
    let steps = onair::parse_script(&script_src)?;

    let gate = match args.gate {
        GateChoice::None => onair::GateMode::None,
        GateChoice::Immediate => onair::GateMode::Immediate,
        GateChoice::Hold => onair::GateMode::Hold,
    };
    let hand = onair::Stagehand::new(gate);
    let log = onair::TimelineLog::new();
    let transitions = Rc::new(RefCell::new(Vec::new()));

    let mut controller = onair::Controller::builder(template)
        .config(config)
        .graphics(hand.clone())
        .timelines(log.clone())
        .resolver(onair::StaticData(external.as_map().clone()))
        .observer({
            let transitions = Rc::clone(&transitions);
            move |state: onair::PlaybackState| transitions.borrow_mut().push(state)
        })
        .hooks(onair::DirectHooks)
        .build()?;

    controller.attach();
    let script = onair::run_script(&mut controller, &hand, &steps)?;

    let report = RunReport {
        template: &controller.template().name,
        snapshot: controller.snapshot(),
        transitions: transitions.borrow().clone(),
        timeline: log.events(),
        script,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    controller.dispose();
    Ok(())
}

fn cmd_keys() -> anyhow::Result<()> {
    for key in onair::RemoteKey::ALL {
        println!("{:<4} {:<12} {}", key.key_code(), key.command_name(), key);
    }
    Ok(())
}
