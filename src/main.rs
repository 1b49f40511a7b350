use anyhow::Context;
use clap::Parser;
use postcode_address_book::config::cli::Command;
use postcode_address_book::core::transform::transform_all;
use postcode_address_book::core::AddressLookup;
use postcode_address_book::utils::logger;
use postcode_address_book::{
    CliConfig, FormController, HttpAddressLookup, InMemoryAddressBook, Session,
};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::debug!("Effective settings: {:?}", settings);

    let lookup = HttpAddressLookup::new(&settings).context("failed to build HTTP client")?;
    tracing::info!("Using address lookup at {}", lookup.endpoint());

    match cli.command() {
        Command::Lookup {
            postcode,
            house_number,
        } => {
            let raws = match lookup.find_addresses(&postcode, &house_number).await {
                Ok(raws) => raws,
                Err(e) => {
                    tracing::error!(error = %e, category = ?e.category(), "lookup failed");
                    eprintln!("❌ {}", e.user_message());
                    std::process::exit(2);
                }
            };
            let addresses = transform_all(&raws, &house_number).map_err(|e| {
                tracing::error!(error = %e, "lookup returned unusable data");
                anyhow::anyhow!(e.user_message())
            })?;
            println!("{}", serde_json::to_string_pretty(&addresses)?);
        }
        Command::Session => {
            let controller = FormController::new(lookup, InMemoryAddressBook::new());
            let mut session = Session::new(controller, std::io::stdout());
            println!("🏠 Create your own address book! Type `help` for commands.");
            session
                .run(BufReader::new(tokio::io::stdin()))
                .await
                .context("session ended with an error")?;
        }
    }

    Ok(())
}
