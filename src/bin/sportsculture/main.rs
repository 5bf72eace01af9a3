#![allow(clippy::collapsible_else_if)]

mod args;
mod build;
mod debug;
mod error;
mod init;
#[cfg(feature = "serve")]
mod serve;

use clap::Parser;

/// Static site generator for the Sports Culture website
#[derive(Clone, Debug, Parser)]
#[command(name = "sportsculture", version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    #[command(flatten)]
    color: colorchoice_clap::Color,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
enum Command {
    Init(init::InitArgs),
    Build(build::BuildArgs),
    Clean(build::CleanArgs),
    #[cfg(feature = "serve")]
    Serve(serve::ServeArgs),
    #[command(subcommand)]
    Debug(debug::DebugCommands),
}

impl Command {
    fn run(&self) -> error::Result<()> {
        match self {
            Self::Init(cmd) => cmd.run(),
            Self::Build(cmd) => cmd.run(),
            Self::Clean(cmd) => cmd.run(),
            #[cfg(feature = "serve")]
            Self::Serve(cmd) => cmd.run(),
            Self::Debug(cmd) => cmd.run(),
        }
    }
}

fn main() {
    human_panic::setup_panic!();
    let result = run();
    proc_exit::exit(result);
}

fn run() -> proc_exit::ExitResult {
    let cli = Cli::parse();

    cli.color.write_global();
    let colored_stderr = !matches!(
        anstream::AutoStream::choice(&std::io::stderr()),
        anstream::ColorChoice::Never
    );
    args::init_logging(cli.verbose.log_level(), colored_stderr);

    cli.command.run().map_err(|err| {
        log::error!("{err:#}");
        proc_exit::Code::FAILURE.as_exit()
    })?;

    Ok(())
}

#[test]
fn verify_app() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
