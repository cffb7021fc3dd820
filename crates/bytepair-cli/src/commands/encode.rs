use std::io::{Read, Write};

use bytepair::encoding::{Encoder, MergeTable};
use bytepair::io::read_merge_rules;
use bytepair::vocab::build_span_table;

use crate::{input_output::InputArgs, input_output::OutputArgs, logging::LogArgs};

/// Args for the encode command.
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    /// Path to a merge-rule model file, as written by `bytepair train`.
    model: String,

    #[clap(flatten)]
    pub logging: LogArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl EncodeArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let merge_rules = read_merge_rules(std::fs::File::open(&self.model)?)?;
        log::info!("loaded {} merge rules", merge_rules.len());

        let spans = build_span_table(&merge_rules);
        let mut encoder = Encoder::new(MergeTable::from_merge_rules(&merge_rules));

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        for token in encoder.encode(&text) {
            let span = spans.get(&token).map(|b| String::from_utf8_lossy(b)).unwrap_or_default();
            writeln!(writer, "{span} {token}")?;
        }

        Ok(())
    }
}
