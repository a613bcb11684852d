//! Unbounded insert loops.
//!
//! Both loops stop when the `Shutdown` signal fires, checked between iterations and while
//! pausing, or when the optional iteration limit is reached. They return the number of
//! tracks inserted.

use crate::generator::Generator;
use crate::shutdown::Shutdown;
use crate::store::CatalogStore;
use crate::Result;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{BufRead, Write};
use std::time::Duration;
use tracing::{debug, info};

/// Random pause between inserts.
pub struct Pacing {
    min: Duration,
    max: Duration,
    rng: StdRng,
}

impl Pacing {
    /// Pause uniformly in `[min, max]`, drawing a seed for its own generator from `rng`.
    pub fn new(min: Duration, max: Duration, rng: &mut StdRng) -> Pacing {
        Pacing {
            min,
            max,
            rng: StdRng::seed_from_u64(rng.gen()),
        }
    }

    /// No pause at all.
    pub fn none() -> Pacing {
        Pacing {
            min: Duration::from_millis(0),
            max: Duration::from_millis(0),
            rng: StdRng::seed_from_u64(0),
        }
    }

    pub fn next_pause(&mut self) -> Duration {
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        Duration::from_millis(self.rng.gen_range(min..=max))
    }
}

fn limit_reached(limit: Option<u64>, inserted: u64) -> bool {
    limit.map_or(false, |n| inserted >= n)
}

/// Sleep for the next pause, waking early on shutdown.
async fn pause(pacing: &mut Pacing, shutdown: &mut Shutdown) {
    let duration = pacing.next_pause();
    if duration == Duration::from_millis(0) {
        return;
    }

    tokio::select! {
        _ = tokio::time::sleep(duration) => {}
        _ = shutdown.recv() => {}
    }
}

/// Track inserter: continue from the current maximum id, inserting generated tracks and
/// printing a `.` after each one.
///
/// Errors are returned as soon as they occur; nothing is retried.
pub async fn run_track_inserter<S, G, W>(
    store: &mut S,
    generator: &mut G,
    pacing: &mut Pacing,
    shutdown: &mut Shutdown,
    limit: Option<u64>,
    out: &mut W,
) -> Result<u64>
where
    S: CatalogStore + ?Sized,
    G: Generator,
    W: Write,
{
    let mut track_id = store.max_track_id().await?;
    info!("Largest track id is {}", track_id);

    let mut inserted = 0;
    while !shutdown.is_shutdown() && !limit_reached(limit, inserted) {
        track_id += 1;
        let track = generator.generate(track_id);
        store.insert_track(&track).await?;
        inserted += 1;

        write!(out, ".")?;
        out.flush()?;

        if limit_reached(limit, inserted) {
            break;
        }
        pause(pacing, shutdown).await;
    }

    info!("Track inserter stopped after {} inserts", inserted);
    Ok(inserted)
}

/// Continuous generation: each iteration reads the next free id, inserts one track and
/// commits it, then reports it on `out`.
pub async fn run_continuous_generation<S, G, W>(
    store: &mut S,
    generator: &mut G,
    pacing: &mut Pacing,
    shutdown: &mut Shutdown,
    limit: Option<u64>,
    out: &mut W,
) -> Result<u64>
where
    S: CatalogStore + ?Sized,
    G: Generator,
    W: Write,
{
    let mut counter = 0;
    while !shutdown.is_shutdown() && !limit_reached(limit, counter) {
        let next_id = store.max_track_id().await? + 1;
        let track = generator.generate(next_id);
        store.insert_track(&track).await?;
        counter += 1;

        debug!("{}", track);
        writeln!(
            out,
            "  [{:3}] Added track {}: {}",
            counter, track.track_id, track.name
        )?;

        if limit_reached(limit, counter) {
            break;
        }
        pause(pacing, shutdown).await;
    }

    info!("Continuous generation stopped after {} tracks", counter);
    Ok(counter)
}

/// True for an affirmative answer: `y` or `yes`, ignoring case and surrounding whitespace.
pub fn confirms(response: &str) -> bool {
    matches!(response.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Ask whether to start continuous generation; anything but yes declines.
pub fn ask_continuous<R, W>(input: &mut R, out: &mut W) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(out, "\nGenerate continuous data? (y/N): ")?;
    out.flush()?;

    let mut response = String::new();
    input.read_line(&mut response)?;
    Ok(confirms(&response))
}
