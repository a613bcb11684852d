//! Runs against a live Chinook database configured through `DB_*` variables.
//! The catalog tables are wiped, so these are ignored by default:
//! `cargo test --test postgres -- --ignored`.

use chinook_loader::generator::{self, VersionedTrackGenerator};
use chinook_loader::loader;
use chinook_loader::settings::{self, Mode, Settings};
use chinook_loader::shutdown::Shutdown;
use chinook_loader::store::postgres::PgStore;
use chinook_loader::store::sql::Naming;
use chinook_loader::store::CatalogStore;
use chinook_loader::workload::{self, Pacing};

use test_env_log::test;
use tokio::sync::broadcast;

fn live_settings() -> Settings {
    let mut config = settings::init_config("./tests/Test-loader.toml", Mode::AutoLoader).unwrap();
    settings::apply_env(&mut config, |var| std::env::var(var).ok()).unwrap();
    Settings::from_config(&config).unwrap()
}

#[test(tokio::test)]
#[ignore]
async fn postgres_seed_and_generate_test() {
    let settings = live_settings();
    let naming = Naming::from_quoted(settings.quote_identifiers);
    let mut rng = settings.rng();
    let catalog = generator::generate_catalog(&mut rng);

    let mut store = PgStore::connect(&settings.database, naming).await.unwrap();
    let counts = loader::populate(&mut store, &catalog, settings.reset_sequences)
        .await
        .unwrap();
    assert_eq!((counts.artists, counts.albums, counts.tracks), (12, 12, 29));
    assert_eq!(store.max_track_id().await.unwrap(), 29);

    let mut gen = VersionedTrackGenerator::new(12, rng).unwrap();
    let (notify, _) = broadcast::channel(1);
    let mut shutdown = Shutdown::new(notify.subscribe());
    let generated = workload::run_continuous_generation(
        &mut store,
        &mut gen,
        &mut Pacing::none(),
        &mut shutdown,
        Some(3),
        &mut Vec::new(),
    )
    .await
    .unwrap();

    assert_eq!(generated, 3);
    assert_eq!(store.counts().await.unwrap().tracks, 32);
    store.close().await.unwrap();
}

#[test(tokio::test)]
#[ignore]
async fn postgres_rollback_test() {
    let settings = live_settings();
    let naming = Naming::from_quoted(settings.quote_identifiers);
    let mut catalog = generator::generate_catalog(&mut settings.rng());

    let mut store = PgStore::connect(&settings.database, naming).await.unwrap();
    loader::populate(&mut store, &catalog, settings.reset_sequences)
        .await
        .unwrap();

    // Duplicate primary key in the middle of the batch.
    catalog.tracks[20].track_id = catalog.tracks[10].track_id;
    let counts = loader::auto_populate(&mut store, &catalog, settings.reset_sequences).await;

    assert_eq!(counts, None);
    assert_eq!(store.counts().await.unwrap().tracks, 29);
    store.close().await.unwrap();
}
