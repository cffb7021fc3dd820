use std::io::BufRead;

use bytepair::io::write_merge_rules;
use bytepair::text::Segmenter;
use bytepair::training::Trainer;

use crate::{input_output::OutputArgs, logging::LogArgs};

/// Args for the train command.
#[derive(clap::Args, Debug)]
pub struct TrainArgs {
    /// Input corpus files, one word-sample per line.
    ///
    /// A single file is memory-mapped and pre-tokenized in parallel;
    /// multiple files are read and pooled line by line.
    files: Vec<String>,

    #[clap(flatten)]
    pub logging: LogArgs,

    /// Target vocabulary size (byte alphabet plus learned merges); must be >= 256.
    #[arg(long, default_value = "2048")]
    vocab_size: usize,

    /// Word-span regex, overriding the default GPT-2-style pattern.
    #[arg(long, default_value = None)]
    pattern: Option<String>,

    #[command(flatten)]
    output: OutputArgs,
}

impl TrainArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let trainer = match &self.pattern {
            Some(pattern) => Trainer::with_segmenter(self.vocab_size, Segmenter::with_pattern(pattern)?)?,
            None => Trainer::new(self.vocab_size)?,
        };

        log::info!("reading corpus: {:?}", self.files);
        let model = match self.files.as_slice() {
            [] => trainer.train_from_samples(std::io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?),
            [path] => trainer.train_from_path(path)?,
            paths => {
                let mut samples = Vec::new();
                for path in paths {
                    let reader = std::io::BufReader::new(std::fs::File::open(path)?);
                    for line in reader.lines() {
                        samples.push(line?);
                    }
                }
                trainer.train_from_samples(samples)
            }
        };

        log::info!(
            "trained {} merges, vocab size {}",
            model.merge_rules.len(),
            model.vocab_size()
        );

        let mut writer = self.output.open_writer()?;
        write_merge_rules(&model.merge_rules, &mut writer)?;

        Ok(())
    }
}
