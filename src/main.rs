use anyhow::Context;
use beer_pricing::config::Command;
use beer_pricing::utils::logger;
use beer_pricing::{build_service, AppConfig, BoxRequest, CatalogService, Cli, NewItem, PricingError};
use clap::Parser;
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("cannot load configuration from {}", path.display()))?,
        None => {
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config
        }
    };
    if let Some(url) = &cli.database_url {
        config.database.url = url.clone();
    }

    if cli.json_logs || config.logger.json {
        logger::init_json_logger(&config.logger.level);
    } else {
        logger::init_cli_logger(cli.verbose, &config.logger.level);
    }
    tracing::debug!("CLI: {:?}", cli);

    let service = match build_service(&config).await {
        Ok(service) => service,
        Err(e) => exit_with(e),
    };

    if let Err(e) = run(&service, &cli.command).await {
        exit_with(e);
    }
    Ok(())
}

async fn run(service: &CatalogService, command: &Command) -> Result<(), PricingError> {
    match command {
        Command::List => print_json(&service.list().await?),
        Command::Create {
            name,
            brewery,
            country,
            price,
            currency,
        } => {
            let draft = NewItem {
                name: name.clone(),
                producer: brewery.clone(),
                origin: country.clone(),
                price: *price,
                currency: currency.clone(),
            };
            print_json(&service.create(draft).await?)
        }
        Command::Get { id } => print_json(&service.get(*id).await?),
        Command::BoxPrice {
            id,
            currency,
            quantity,
        } => {
            let request = BoxRequest::new(currency.as_deref(), quantity.as_deref());
            print_json(&service.box_price(*id, request).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), PricingError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{}", rendered);
    Ok(())
}

fn exit_with(e: PricingError) -> ! {
    tracing::error!("❌ {} (status {})", e, e.status_code());
    eprintln!("❌ {}", e);
    std::process::exit(e.exit_code());
}
