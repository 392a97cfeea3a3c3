//! Edit, inspect or merge HDF5 demonstration datasets.
use std::io;
use std::path::PathBuf;

#[macro_use]
extern crate anyhow;

use clap::{Parser, ValueEnum};

use h5demo::env_args::{modify_env_args, EnvConfig};
use h5demo::merge::{merge_datasets, MergeOptions};
use h5demo::reader::read_dataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Operation {
    /// Overwrite the `env_args` attribute of --dataset
    Modify,
    /// Print every episode array of --dataset
    Read,
    /// Merge --src_datasets into --dest_dataset
    Merge,
}

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Operation to execute on the dataset files
    #[arg(long, value_enum)]
    option: Operation,

    /// Dataset to read or modify
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Source datasets to merge from
    #[arg(long = "src_datasets", num_args = 1..)]
    src_datasets: Vec<PathBuf>,

    /// Destination dataset to merge into
    #[arg(long = "dest_dataset")]
    dest_dataset: Option<PathBuf>,

    /// Robot to use
    #[arg(long, default_value = "Panda")]
    robot: String,

    /// Gripper type to use
    #[arg(long = "gripper_types", default_value = "PandaGripper")]
    gripper_types: String,

    /// Environment to use
    #[arg(long, default_value = "Coffee_D0")]
    env: String,

    /// Replace --dest_dataset if it already exists
    #[arg(long)]
    overwrite: bool,

    /// Print a header with name, type and shape before each array
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn dataset(&self) -> Result<&PathBuf, anyhow::Error> {
        self.dataset
            .as_ref()
            .ok_or_else(|| {
                anyhow!(
                    "--dataset is required for --option {}",
                    format!("{:?}", self.option).to_lowercase()
                )
            })
    }

    fn env_config(&self) -> EnvConfig {
        EnvConfig {
            robot: self.robot.clone(),
            gripper_types: self.gripper_types.clone(),
            env: self.env.clone(),
        }
    }
}

fn run(args: &Args) -> Result<(), anyhow::Error> {
    match args.option {
        Operation::Modify => {
            let value = modify_env_args(args.dataset()?, &args.env_config())?;
            println!("{value}");
        }

        Operation::Read => {
            read_dataset(args.dataset()?, io::stdout().lock(), args.verbose)?;
        }

        Operation::Merge => {
            ensure!(
                !args.src_datasets.is_empty(),
                "--src_datasets is required for --option merge"
            );
            let dest = args
                .dest_dataset
                .as_ref()
                .ok_or_else(|| anyhow!("--dest_dataset is required for --option merge"))?;

            let opts = MergeOptions {
                overwrite: args.overwrite,
            };
            let n = merge_datasets(args.src_datasets.as_slice(), dest, &opts)?;

            println!(
                "Merged and renumbered {} demonstrations into {}",
                n,
                dest.display()
            );
        }
    }

    Ok(())
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run(&args)
}
