use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use stepgen::config::Config;
use stepgen::generate::{extract, run_pass, PassSettings, StepOutcome};
use stepgen::index::ManifestIndex;
use stepgen::logging;
use stepgen::manifest::load_manifest_dir;
use stepgen::writer::FsArtifactWriter;

#[derive(Parser)]
#[command(name = "stepgen")]
#[command(about = "Step descriptor generator for plugin host runtimes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate step descriptors and the registry index
    Generate {
        /// Manifests directory (overrides config)
        #[arg(short, long)]
        manifests: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate manifests and report duplicate step names, writing nothing
    Check {
        /// Manifests directory (overrides config)
        #[arg(short, long)]
        manifests: Option<PathBuf>,
    },

    /// List discovered steps and their arguments
    List {
        /// Manifests directory (overrides config)
        #[arg(short, long)]
        manifests: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let _logging = logging::init_logging(&config, cli.debug)?;

    // Running without a subcommand generates with configured paths
    let command = cli.command.unwrap_or(Commands::Generate {
        manifests: None,
        output: None,
    });

    match command {
        Commands::Generate { manifests, output } => cmd_generate(&config, manifests, output),
        Commands::Check { manifests } => cmd_check(&config, manifests),
        Commands::List { manifests } => cmd_list(&config, manifests),
    }
}

fn load_index(config: &Config, manifests: Option<PathBuf>) -> Result<ManifestIndex> {
    let dir = manifests.unwrap_or_else(|| config.manifests_path());
    tracing::debug!(manifests = %dir.display(), "Loading declaration manifests");
    let loaded = load_manifest_dir(&dir)?;
    Ok(ManifestIndex::from_manifests(loaded))
}

fn cmd_generate(
    config: &Config,
    manifests: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let index = load_index(config, manifests)?;
    let output_root = output.unwrap_or_else(|| config.output_path());

    let mut writer = FsArtifactWriter::new(&output_root);
    let settings = PassSettings {
        namespace: config.generator.namespace.clone(),
        root_type: config.generator.root_type.clone(),
    };
    let report = run_pass(&index, &settings, &mut writer);

    println!(
        "Generated {} step descriptor(s) under {}",
        report.written(),
        output_root.display()
    );
    for (step, outcome) in &report.outcomes {
        if let StepOutcome::WriteFailed { artifact, error } = outcome {
            println!("  failed: {} ({}): {}", step, artifact, error);
        }
    }
    match &report.registry {
        Some(StepOutcome::Written { artifact }) => println!("Registry: {}", artifact),
        Some(StepOutcome::WriteFailed { artifact, error }) => {
            println!("  failed: registry ({}): {}", artifact, error);
        }
        None => println!("No steps discovered; registry skipped"),
    }

    Ok(())
}

fn cmd_check(config: &Config, manifests: Option<PathBuf>) -> Result<()> {
    let index = load_index(config, manifests)?;

    // Recompute published names the way generate would, then group by name
    // to surface the collisions generate resolves silently
    let mut names: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for decl in index.steps() {
        names
            .entry(extract::step_name(decl))
            .or_default()
            .push(decl.qualified_name.clone());
    }

    let step_count: usize = names.values().map(Vec::len).sum();
    println!(
        "{} type declaration(s), {} step(s)",
        index.len(),
        step_count
    );

    let mut duplicates = 0;
    for (name, types) in &names {
        if types.len() > 1 {
            duplicates += 1;
            println!("  duplicate step name '{}': {}", name, types.join(", "));
        }
    }
    if duplicates > 0 {
        anyhow::bail!(
            "{} duplicate step name(s); later declarations overwrite earlier ones",
            duplicates
        );
    }

    println!("OK");
    Ok(())
}

fn cmd_list(config: &Config, manifests: Option<PathBuf>) -> Result<()> {
    let index = load_index(config, manifests)?;

    for decl in index.steps() {
        let descriptor = extract::extract(&index, decl, &config.generator.root_type);
        println!("{} ({})", descriptor.name, descriptor.type_name);
        for arg in &descriptor.arguments {
            let type_name = arg.type_name.as_deref().unwrap_or("?");
            match &arg.description {
                Some(description) => {
                    println!("  {}: {} - {}", arg.name, type_name, description);
                }
                None => println!("  {}: {}", arg.name, type_name),
            }
        }
    }

    Ok(())
}
