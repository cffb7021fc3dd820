use crate::commands::{encode::EncodeArgs, train::TrainArgs};

pub mod encode;
pub mod train;

/// Subcommands for bytepair-cli
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Learn a merge-rule vocabulary from a text corpus.
    Train(TrainArgs),

    /// Apply a trained vocabulary to encode text into token IDs.
    Encode(EncodeArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Train(cmd) => cmd.run(),
            Commands::Encode(cmd) => cmd.run(),
        }
    }
}
