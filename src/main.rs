use clap::Parser;
use table_reader::application::init::init;
use table_reader::application::manage_config::CONFIG_KEYS;
use table_reader::application::{BuildDocsService, ConfigService, RenderPageService};
use table_reader::cli::{format_build_report, format_config, format_reader_list, Cli, Commands};
use table_reader::domain::ReaderRegistry;
use table_reader::error::TableReaderError;
use table_reader::infrastructure::Project;

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(cli) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), TableReaderError> {
    match cli.command {
        Commands::Init { path } => {
            init(&path)?;
            println!("Initialized table-reader project at {}", path.display());
            Ok(())
        }
        Commands::Render { page, output } => {
            let project = Project::discover()?;
            let service = RenderPageService::new(project, ReaderRegistry::with_builtin_readers());
            let rendered = service.execute(&page, output.as_deref())?;
            if output.is_none() {
                print!("{}", rendered);
            }
            Ok(())
        }
        Commands::Build { out } => {
            let project = Project::discover()?;
            let service = BuildDocsService::new(project, ReaderRegistry::with_builtin_readers());
            let report = service.execute(out)?;
            println!("{}", format_build_report(&report));
            Ok(())
        }
        Commands::Config { key, value, list } => {
            // Editing requires a real config file, not discovery defaults
            let project = Project::load(Project::discover()?.root())?;
            let mut service = ConfigService::new(project);

            if list {
                print!("{}", format_config(service.list()));
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: table-reader config [--list | <key> [<value>]]");
                println!("Valid keys: {}", CONFIG_KEYS.join(", "));
            }
            Ok(())
        }
        Commands::Readers => {
            print!("{}", format_reader_list(&ReaderRegistry::with_builtin_readers()));
            Ok(())
        }
    }
}
