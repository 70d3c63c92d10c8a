//! Staggered bring-up of a batch of tiles.

use std::rc::Rc;
use std::time::Duration;

use crate::config::LaunchConfig;
use crate::error::TileError;
use crate::host::Host;
use crate::registry::Registry;
use crate::tile::PlaybackTile;

/// Tiles created by [`launch`], plus the timers that will init them.
pub struct Launch<H: Host> {
    tiles: Vec<PlaybackTile<H>>,
    pending: Vec<H::TaskHandle>,
    host: Rc<H>,
}

impl<H: Host> Launch<H> {
    pub fn tiles(&self) -> &[PlaybackTile<H>] {
        &self.tiles
    }

    /// Cancels inits that have not started yet. Tiles already initialized
    /// stay up.
    pub fn cancel_pending(&mut self) {
        for handle in self.pending.drain(..) {
            self.host.cancel(handle);
        }
    }

    pub fn into_tiles(self) -> Vec<PlaybackTile<H>> {
        self.tiles
    }
}

/// Creates one tile per source, in order, and schedules `init` of tile `i`
/// after `i * config.stagger`.
///
/// Init failures inside the timers are logged and leave that tile
/// unregistered. The timers hold the tiles weakly: once every handle from the
/// returned [`Launch`] is dropped, pending inits do nothing.
pub fn launch<H, S>(
    host: &Rc<H>,
    registry: &Registry<H>,
    sources: &[S],
    config: &LaunchConfig,
) -> Result<Launch<H>, TileError>
where
    H: Host,
    S: AsRef<str>,
{
    // Validate every delay before anything is scheduled.
    let delays = (0..sources.len())
        .map(|index| stagger_delay(config.stagger, index))
        .collect::<Result<Vec<_>, _>>()?;

    let mut tiles = Vec::with_capacity(sources.len());
    let mut pending = Vec::with_capacity(sources.len());

    for (source, delay) in sources.iter().zip(delays) {
        let tile = PlaybackTile::new(
            source.as_ref(),
            Rc::clone(host),
            registry,
            config.tile.clone(),
        );
        let scheduled = tile.downgrade();
        let handle = host.schedule(
            delay,
            Box::new(move || {
                let Some(scheduled) = scheduled.upgrade() else {
                    tracing::debug!("tile dropped before its init ran");
                    return;
                };
                if let Err(e) = scheduled.init() {
                    tracing::error!(
                        id = %scheduled.id(),
                        url = %scheduled.source_url(),
                        error = %e,
                        "tile init failed"
                    );
                }
            }),
        )?;
        tracing::debug!(id = %tile.id(), ?delay, "tile init scheduled");
        tiles.push(tile);
        pending.push(handle);
    }

    tracing::info!(count = tiles.len(), stagger = ?config.stagger, "launched tiles");
    Ok(Launch {
        tiles,
        pending,
        host: Rc::clone(host),
    })
}

/// `stagger * index`, or an error if it does not fit in a `Duration`.
fn stagger_delay(stagger: Duration, index: usize) -> Result<Duration, TileError> {
    u32::try_from(index)
        .ok()
        .and_then(|index| stagger.checked_mul(index))
        .ok_or_else(|| {
            TileError::Schedule(format!(
                "init delay overflows: {stagger:?} * {index}"
            ))
        })
}
