use std::path::PathBuf;
use std::process::ExitCode;

use loxide::lox;

use clap::error::ErrorKind;
use clap::Parser as ClapParser;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Script to execute; starts an interactive prompt when omitted
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Cli = match Cli::try_parse() {
        Ok(args) => args,

        Err(e) => {
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = e.print();
                    ExitCode::SUCCESS
                }

                _ => {
                    eprintln!("Usage: loxide [script]");
                    ExitCode::from(64)
                }
            };
        }
    };

    match args.script {
        Some(path) => match lox::run_file(&path) {
            Ok(status) => ExitCode::from(status.code()),

            Err(e) => {
                eprintln!("{:#}", e);
                ExitCode::from(65)
            }
        },

        None => match lox::run_prompt() {
            Ok(()) => ExitCode::SUCCESS,

            Err(e) => {
                eprintln!("{:#}", e);
                ExitCode::from(65)
            }
        },
    }
}
