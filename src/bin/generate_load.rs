use chinook_loader::generator::{self, SampledTrackGenerator};
use chinook_loader::settings::{self, Mode, Settings};
use chinook_loader::shutdown::{self, Shutdown};
use chinook_loader::store::postgres::PgStore;
use chinook_loader::store::sql::Naming;
use chinook_loader::workload::{self, Pacing};
use chinook_loader::Result;

use clap::arg;
use tokio::sync::broadcast;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // command line
    let matches = settings::command(
        "generate-load",
        "Insert random tracks into the Chinook Track table until interrupted",
    )
    .arg(arg!(-f --trackfile <FILE> "CSV file with Name and Composer columns").required(false))
    .get_matches();

    // config file, environment, then command line
    let file = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("Settings.toml");
    let mut config = settings::init_config(file, Mode::TrackInserter)?;
    settings::apply_env(&mut config, |var| std::env::var(var).ok())?;
    settings::apply_args(&mut config, &matches)?;
    if let Some(f) = matches.get_one::<String>("trackfile") {
        config.set("track_file", f.clone())?;
    }
    let settings = Settings::from_config(&config)?;

    // logging
    let _guard = settings::set_log_level(&settings);

    let sources = generator::load_track_sources(&settings.track_file)?;
    let mut rng = settings.rng();
    let (min, max) = settings.pause();
    let mut pacing = Pacing::new(min, max, &mut rng);
    let mut generator = SampledTrackGenerator::new(sources, rng)?;

    println!("connecting to DB");
    let naming = Naming::from_quoted(settings.quote_identifiers);
    let mut store = PgStore::connect(&settings.database, naming).await?;

    let (notify, _) = broadcast::channel(1);
    let mut shutdown = Shutdown::new(notify.subscribe());
    shutdown::listen_for_ctrl_c(notify);

    let inserted = workload::run_track_inserter(
        &mut store,
        &mut generator,
        &mut pacing,
        &mut shutdown,
        settings.iterations,
        &mut std::io::stdout(),
    )
    .await?;

    println!();
    info!("Inserted {} tracks", inserted);
    store.close().await?;

    Ok(())
}
