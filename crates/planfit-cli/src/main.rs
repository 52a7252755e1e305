use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "planfit-cli", version, about = "Planfit CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Team profile management
    Team {
        #[command(subcommand)]
        action: commands::team::TeamAction,
    },
    /// T-shirt size mapping management
    Mapping {
        #[command(subcommand)]
        action: commands::mapping::MappingAction,
    },
    /// Epic backlog management
    Epic {
        #[command(subcommand)]
        action: commands::epic::EpicAction,
    },
    /// Capacity forecast
    Forecast(commands::forecast::ForecastArgs),
    /// What-if capacity scenarios
    Scenario(commands::scenario::ScenarioArgs),
    /// Planning snapshots
    Snapshot {
        #[command(subcommand)]
        action: commands::snapshot::SnapshotAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Demo data
    Demo {
        #[command(subcommand)]
        action: commands::demo::DemoAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Team { action } => commands::team::run(action),
        Commands::Mapping { action } => commands::mapping::run(action),
        Commands::Epic { action } => commands::epic::run(action),
        Commands::Forecast(args) => commands::forecast::run(args),
        Commands::Scenario(args) => commands::scenario::run(args),
        Commands::Snapshot { action } => commands::snapshot::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Demo { action } => commands::demo::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
