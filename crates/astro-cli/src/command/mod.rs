use clap::{Parser, Subcommand};

use self::{evaluate::EvaluateArg, show_config::ShowConfigArg, train::TrainArg};

mod evaluate;
mod show_config;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve ship controllers with the genetic algorithm
    Train(#[clap(flatten)] TrainArg),
    /// Run headless episodes with a trained model
    Evaluate(#[clap(flatten)] EvaluateArg),
    /// Print the default training configuration as JSON
    ShowConfig(#[clap(flatten)] ShowConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
        Mode::ShowConfig(arg) => show_config::run(&arg)?,
    }
    Ok(())
}
