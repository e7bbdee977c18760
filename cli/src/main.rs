//Copyright 2024 Felix Engl
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

mod args;
mod commands;
mod error;
mod output;

use clap::Parser;

use args::{Cli, Command};
use error::CliError;

fn main() {
    asapcat_toolkit::logging::init_logging();
    let cli = Cli::parse();
    if let Err(err) = dispatch(cli) {
        log::error!("{err}");
        std::process::exit(err.exit_code());
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Wordcount(args) => commands::wordcount::run(&args),
        Command::Tfidf(args) => commands::tfidf::run(&args),
        Command::Kmeans(args) => commands::kmeans::run(&args),
    }
}
