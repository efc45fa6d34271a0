use anyhow::Result;
use std::io;
use std::time::Instant;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use xiv_data_to_sqlite::{
    cli::{Cli, Commands},
    schema::DependencyResolver,
    source::JsonlSheets,
    writer::Database,
    App, ShellCommand,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse_args();

    match cli.command.clone().unwrap_or(Commands::Shell) {
        Commands::ListTables => {
            println!("Tables in creation order:\n");
            for table in DependencyResolver::new()
                .creation_order()
                .map_err(anyhow::Error::msg)?
            {
                println!("  {}", table.name);
            }
        }

        Commands::Shell => {
            let app = open_app(&cli)?;
            app.run_shell(BufReader::new(tokio::io::stdin()), io::stdout())
                .await?;
        }

        command => {
            let app = open_app(&cli)?;
            let start = Instant::now();
            app.execute(ShellCommand::try_from(&command)?).await?;
            println!("\nDone in {:.1}s", start.elapsed().as_secs_f64());
        }
    }

    Ok(())
}

fn open_app(cli: &Cli) -> Result<App<JsonlSheets>> {
    let db_path = cli.database_path()?;
    println!("Using database {:?}", db_path);

    let db = Database::open(&db_path, cli.max_connections)?;
    Ok(App::new(JsonlSheets::new(cli.data_dir.clone()), db))
}
