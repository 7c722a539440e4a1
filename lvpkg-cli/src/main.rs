use anyhow::Result;
use clap::{Parser, Subcommand};
use lvpkg_core::Recipe;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lvpkg")]
#[command(version)]
#[command(about = "Build and package LabVIEW projects", long_about = None)]
struct Cli {
    /// Project directory containing the .lvproj file
    #[arg(short = 'C', long, global = true, default_value = ".", value_name = "DIR")]
    project: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the derived package name
    Name,

    /// Print the derived package version
    Version,

    /// Print the binary package id
    Id,

    /// Clone the configured repository and check out the resolved branch
    Source {
        /// Destination directory for the clone
        #[arg(value_name = "DEST")]
        dest: PathBuf,
    },

    /// Compile the project through the LabVIEW build bridge
    Build {
        /// Force a debug build even on the primary branch
        #[arg(long)]
        debug: bool,
    },

    /// Copy build output into a package layout
    Package {
        /// Package directory to populate
        #[arg(value_name = "PACKAGE_DIR")]
        package_dir: PathBuf,
    },

    /// Copy packaged binaries into the project's install folder
    Import {
        /// Package directory to import from
        #[arg(value_name = "PACKAGE_DIR")]
        package_dir: PathBuf,

        /// Override the configured install folder
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let recipe = Recipe::resolve(&cli.project)?;

    match cli.command {
        Commands::Name => {
            println!("{}", recipe.name());
        }
        Commands::Version => {
            println!("{}", recipe.version());
        }
        Commands::Id => {
            println!("{}", recipe.package_id());
        }
        Commands::Source { dest } => {
            log::info!("fetching source into {:?}", dest);
            recipe.fetch_source(&dest)?;
        }
        Commands::Build { debug } => {
            recipe.build(debug)?;
        }
        Commands::Package { package_dir } => {
            recipe.package(&package_dir)?;
        }
        Commands::Import { package_dir, dest } => {
            recipe.import(&package_dir, dest.as_deref())?;
        }
    }

    Ok(())
}
