//! # Resource Synth CLI
//!
//! Runs one module generator against a request file and prints the generation
//! response as JSON. Stands in for the plugin host during development and CI.
//!
//! ## Usage
//!
//! ```bash
//! # Generate the resources of a PostgreSQL module instance
//! resource-synth generate postgres --request request.yaml --region cn-hangzhou
//!
//! # Check a manifest module config without reading any manifest
//! resource-synth validate k8s-manifest --request request.yaml
//!
//! # Print the JSON schema of a module config
//! resource-synth schema postgres
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use resource_synth::config::GeneratorConfig;
use resource_synth::generator::manifest::{ManifestConfig, ManifestGenerator};
use resource_synth::generator::postgres::{PostgresConfig, PostgresGenerator};
use resource_synth::generator::{
    generate_supervised, merge_config, CancellationToken, Generator, GeneratorRequest,
};
use resource_synth::observability::init_logging;
use std::path::{Path, PathBuf};
use tracing::{error, info};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_HASH"),
    ", built ",
    env!("BUILD_DATETIME"),
    ")"
);

/// Declarative infrastructure-resource synthesis
#[derive(Debug, Parser)]
#[command(name = "resource-synth")]
#[command(about = "Generate infrastructure resources for a module instance", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate resources and print the response as JSON
    Generate {
        /// Module to generate
        module: Module,
        /// Generation request (JSON or YAML)
        #[arg(short, long)]
        request: PathBuf,
        /// Default Alicloud region, overrides ALICLOUD_REGION
        #[arg(long)]
        region: Option<String>,
        /// Write the response to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Merge and validate the module config of a request
    Validate {
        /// Module whose config is validated
        module: Module,
        /// Generation request (JSON or YAML)
        #[arg(short, long)]
        request: PathBuf,
    },
    /// Print the JSON schema of a module config
    Schema {
        /// Module whose config schema is printed
        module: Module,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Module {
    Postgres,
    K8sManifest,
}

fn main() -> Result<()> {
    let config = GeneratorConfig::from_env();
    init_logging(&config)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            module,
            request,
            region,
            output,
        } => {
            let default_region = region.or(config.default_region);
            generate_command(module, &request, default_region, output.as_deref())
        }
        Commands::Validate { module, request } => validate_command(module, &request),
        Commands::Schema { module } => schema_command(module),
    }
}

fn read_request(path: &Path) -> Result<GeneratorRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file: {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse request file: {}", path.display()))
}

fn generate_command(
    module: Module,
    request_path: &Path,
    default_region: Option<String>,
    output: Option<&Path>,
) -> Result<()> {
    let request = read_request(request_path)?;
    let generator: Box<dyn Generator> = match module {
        Module::Postgres => {
            Box::new(PostgresGenerator::new().with_default_region(default_region))
        }
        Module::K8sManifest => Box::new(ManifestGenerator),
    };

    let response = generate_supervised(generator.as_ref(), &request, &CancellationToken::new())
        .inspect_err(|e| error!(remediation = %e.remediation(), "Generation failed: {e}"))
        .with_context(|| format!("Failed to generate {} resources", generator.name()))?;

    let json = serde_json::to_string_pretty(&response).context("Failed to serialize response")?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("Failed to write response to {}", path.display()))?;
            info!(
                "Wrote {} resource(s) to {}",
                response.resources.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn validate_command(module: Module, request_path: &Path) -> Result<()> {
    let request = read_request(request_path)?;
    let dev = request.dev_config.as_ref();
    let platform = request.platform_config.as_ref();

    match module {
        Module::Postgres => {
            let postgres = merge_config::<PostgresConfig>(dev, platform)?.complete(&request.app);
            postgres.validate()?;
            println!(
                "postgres config is valid (database '{}', serverless: {})",
                postgres.database_name,
                postgres.is_serverless()
            );
        }
        Module::K8sManifest => {
            let manifest = merge_config::<ManifestConfig>(dev, platform)?;
            manifest.validate()?;
            println!(
                "k8s-manifest config is valid ({} path(s))",
                manifest.paths.len()
            );
        }
    }
    Ok(())
}

fn schema_command(module: Module) -> Result<()> {
    let schema = match module {
        Module::Postgres => schemars::schema_for!(PostgresConfig),
        Module::K8sManifest => schemars::schema_for!(ManifestConfig),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?
    );
    Ok(())
}
