use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tempolist::{config, error, server, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the web app
    Serve(ServeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS
    #[clap(long)]
    pub address: Option<String>,

    /// Open the home page in the default browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => serve(opt).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

async fn serve(opt: ServeOptions) {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let mut config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Cannot load configuration. Err: {}", e),
    };
    if let Some(address) = opt.address {
        config = config.with_server_address(address);
    }

    if opt.open {
        let home_url = format!("http://{}/", config.server_address);
        if webbrowser::open(&home_url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                home_url
            )
        }
    }

    if let Err(e) = server::start_api_server(config).await {
        error!("Server stopped. Err: {}", e);
    }
}
