use chinook_loader::generator::{self, VersionedTrackGenerator};
use chinook_loader::loader;
use chinook_loader::settings::{self, Mode, Settings};
use chinook_loader::shutdown::{self, Shutdown};
use chinook_loader::store::sql::Naming;
use chinook_loader::workload::{self, Pacing};
use chinook_loader::Result;

use clap::{arg, ArgAction};
use tokio::sync::broadcast;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // command line
    let matches = settings::command(
        "auto-load",
        "Reset the Chinook catalog tables to a fixed dataset, then optionally keep adding tracks",
    )
    .arg(
        arg!(-c --continuous "Start continuous generation without prompting")
            .action(ArgAction::SetTrue)
            .required(false),
    )
    .get_matches();

    // config file, environment, then command line
    let file = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("Settings.toml");
    let mut config = settings::init_config(file, Mode::AutoLoader)?;
    settings::apply_env(&mut config, |var| std::env::var(var).ok())?;
    settings::apply_args(&mut config, &matches)?;
    if let Some(true) = matches.get_one::<bool>("continuous").copied() {
        config.set("continuous", true)?;
    }
    let settings = Settings::from_config(&config)?;

    // logging
    let guard = settings::set_log_level(&settings);

    println!("Chinook Auto Data Loader");
    println!("{}", "=".repeat(45));

    let naming = Naming::from_quoted(settings.quote_identifiers);
    let mut rng = settings.rng();
    let catalog = generator::generate_catalog(&mut rng);

    // seed phase
    let counts = match loader::connect(&settings.database, naming).await {
        Some(mut store) => {
            let counts = loader::auto_populate(&mut store, &catalog, settings.reset_sequences).await;
            let _ = store.close().await;
            counts
        }
        None => None,
    };

    if counts.is_none() {
        drop(guard);
        std::process::exit(1);
    }

    println!("\nReady for testing!");

    let continuous = settings.continuous || {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        workload::ask_continuous(&mut input, &mut std::io::stdout())?
    };

    if !continuous {
        println!("\nInitial data loaded. You can run this loader again anytime!");
        println!("To generate continuous data later, run: auto-load --continuous");
        return Ok(());
    }

    // continuous generation
    println!("\nStarting continuous data generation...");
    println!(
        "   (This will add new tracks every {}-{} ms)",
        settings.pause_min_ms, settings.pause_max_ms
    );
    println!("   Press Ctrl+C to stop\n");

    let mut store = match loader::connect(&settings.database, naming).await {
        Some(store) => store,
        None => return Ok(()),
    };

    let (min, max) = settings.pause();
    let mut pacing = Pacing::new(min, max, &mut rng);
    let mut generator = VersionedTrackGenerator::new(catalog.albums.len() as i32, rng)?;

    let (notify, _) = broadcast::channel(1);
    let mut shutdown = Shutdown::new(notify.subscribe());
    shutdown::listen_for_ctrl_c(notify);

    let result = workload::run_continuous_generation(
        &mut store,
        &mut generator,
        &mut pacing,
        &mut shutdown,
        settings.iterations,
        &mut std::io::stdout(),
    )
    .await;

    match result {
        Ok(generated) => println!("\nStopped after generating {} tracks", generated),
        Err(e) => println!("\nError: {}", e),
    }
    let _ = store.close().await;

    Ok(())
}
