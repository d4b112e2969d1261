use anyhow::{anyhow, Context};
use clap::Parser;
use defout::model::Design;
use defout::{DefOut, DefVersion, WriterOptions};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    eprintln!("input file: {:?}", &args.input);
    match args.out {
        Some(ref out) => eprintln!("output: {:?}", out),
        None => eprintln!("output: stdout"),
    }
    defwrite(args)?;
    eprintln!("DEF writing complete.");

    Ok(())
}

/// Arguments to [`defwrite`].
#[derive(Parser)]
#[command(
    version,
    about,
    long_about = "Write a design dump (JSON) as a DEF file, or as placement only"
)]
pub struct Args {
    /// The design to write, as JSON.
    input: PathBuf,
    /// The path where the output should be saved.
    ///
    /// The file and its parent directories will be created if necessary.
    /// If unspecified, the output will be written to stdout.
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// A TOML file of writer options. Flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// The DEF version to write.
    #[arg(long)]
    def_version: Option<DefVersion>,
    /// Write layer aliases instead of layer names.
    #[arg(long)]
    layer_alias: bool,
    /// Refer to nets and instances by numeric id.
    #[arg(long)]
    net_inst_ids: bool,
    /// Refer to masters by numeric id.
    #[arg(long)]
    master_ids: bool,
    /// Write only pin and component locations.
    #[arg(long)]
    placement: bool,
    /// Write only the named nets and the instances they connect.
    #[arg(long = "net")]
    nets: Vec<String>,
    /// Write only the named instances.
    #[arg(long = "inst")]
    insts: Vec<String>,
}

/// Writes the design named by `args` as DEF.
pub fn defwrite(args: Args) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {:?}.", args.input))?;
    let design: Design =
        serde_json::from_str(&text).with_context(|| "Failed to parse input design.")?;
    design
        .validate()
        .with_context(|| format!("Invalid design in {:?}.", args.input))?;

    let mut options = match args.config {
        Some(ref path) => WriterOptions::from_toml_file(path)
            .with_context(|| format!("Failed to load writer options from {:?}.", path))?,
        None => WriterOptions::default(),
    };
    if let Some(version) = args.def_version {
        options.version = version;
    }
    options.use_layer_alias |= args.layer_alias;
    options.use_net_inst_ids |= args.net_inst_ids;
    options.use_master_ids |= args.master_ids;

    let mut writer = DefOut::new(options);
    for name in args.nets.iter() {
        let id = design
            .nets
            .iter()
            .position(|net| net.name == name.as_str())
            .ok_or_else(|| anyhow!("No net named `{name}`."))?;
        writer.select_net(defout::model::NetId::new(id));
    }
    for name in args.insts.iter() {
        let id = design
            .insts
            .iter()
            .position(|inst| inst.name == name.as_str())
            .ok_or_else(|| anyhow!("No instance named `{name}`."))?;
        writer.select_inst(defout::model::InstId::new(id));
    }

    let issues = match (args.out, args.placement) {
        (Some(path), false) => writer
            .write_block(&design, &path)
            .with_context(|| format!("Failed to write DEF to {:?}.", path))?,
        (Some(path), true) => writer
            .write_placement(&design, &path)
            .with_context(|| format!("Failed to write placement to {:?}.", path))?,
        (None, placement) => {
            let mut stdout = io::stdout().lock();
            if placement {
                writer.write_placement_to(&design, &mut stdout)
            } else {
                writer.write_block_to(&design, &mut stdout)
            }
            .with_context(|| "Failed to write to stdout.")?
        }
    };

    if issues.has_warning() {
        eprintln!("{} warning(s):\n{}", issues.num_warnings(), issues);
    }

    Ok(())
}
