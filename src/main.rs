//! Replay a JSON-lines action log and print the resulting state.
//!
//! Usage: `hanab-state <metadata.json> <actions.jsonl> [variants.json]`

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use hanab_state::{
    init_logging, replay_from_log, ActionLog, BasicNarrator, GameMetadata, ReduceContext,
    VariantRegistry,
};
use log::error;

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let [metadata_path, log_path, rest @ ..] = args else {
        return Err("usage: hanab-state <metadata.json> <actions.jsonl> [variants.json]".into());
    };

    let metadata: GameMetadata = serde_json::from_reader(BufReader::new(File::open(metadata_path)?))?;
    let variants = match rest.first() {
        Some(path) => VariantRegistry::from_json(&std::fs::read_to_string(path)?)?,
        None => VariantRegistry::with_canonical(),
    };
    let log = ActionLog::load_from_reader(BufReader::new(File::open(log_path)?))?;

    let ctx = ReduceContext::new(&metadata, &variants, &BasicNarrator);
    let state = replay_from_log(&log, &ctx)?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
