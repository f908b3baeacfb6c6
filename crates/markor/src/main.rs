use clap::Parser;
use cli::{Args, RunCmd};

#[derive(Parser, Debug)]
pub enum Cmd {
    /// Display the current version.
    #[clap(name = "version")]
    Version,

    /// Run the markor.
    #[clap(flatten)]
    Run(Box<RunCmd>),
}

#[derive(Parser, Debug)]
#[clap(name = "markor", disable_version_flag = true)]
pub struct Markor {
    #[clap(flatten)]
    pub args: Args,

    #[clap(subcommand)]
    pub cmd: Cmd,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let markor = Markor::parse();

    match markor.cmd {
        Cmd::Version => {
            println!(
                "version {}, built for {}.",
                env!("CARGO_PKG_VERSION"),
                std::env::consts::ARCH
            );
        }
        Cmd::Run(run_cmd) => {
            if let Err(e) = run_cmd.run(markor.args).await {
                eprintln!("error: {e:?}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
