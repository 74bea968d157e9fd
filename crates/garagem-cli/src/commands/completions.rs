use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::CliError;

pub fn run_completions(shell: Shell, output: Option<&Path>) -> Result<(), CliError> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();

    match output {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            generate(shell, &mut command, bin_name, &mut file);
        }
        None => {
            generate(shell, &mut command, bin_name, &mut io::stdout());
        }
    }

    Ok(())
}
