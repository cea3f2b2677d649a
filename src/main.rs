use anyhow::Result;
use scorepack::cli::{self, Commands};
use scorepack::config::resolve_config;

fn main() -> Result<()> {
    let cli = cli::parse_args();
    cli::init_logging(cli.verbosity);

    let formatting = cli::create_formatting_config(cli.plain);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init { force } => cli::handle_init_command(force),
        command @ Commands::Pack { .. } => {
            let config = resolve_config(config_path)?;
            cli::handle_pack_command(command, &config, formatting)
        }
        command @ Commands::Unpack { .. } => {
            let config = resolve_config(config_path)?;
            cli::handle_unpack_command(command, &config, formatting)
        }
    }
}
