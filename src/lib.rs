//! Converts binary edge lists into compact binary adjacency files.
//!
//! The pipeline loads `(src, dst[, weight])` records into per-node neighbor
//! lists, compacts node ids to a dense range, collapses duplicate links, and
//! writes node count, cumulative degrees, neighbor ids, and optional weights.

mod clean;
pub mod config;
pub mod endian;
pub mod error;
pub mod graph;
pub mod graphmap;
pub mod record;
pub mod renumber;
pub mod typedrw;
mod writer;

use time::OffsetDateTime;
use tracing::info;

pub use config::{Config, Mode};
pub use endian::Endian;
pub use error::{Error, Result};
pub use graph::{Graph, Link};
pub use graphmap::GraphMMap;
pub use record::{Edge, EdgeReader, EdgeWriter, RecordError};
pub use renumber::Renumbering;

/// Seconds elapsed since `start`.
pub fn seconds_since(start: OffsetDateTime) -> f64 {
    (OffsetDateTime::now_utc() - start).as_seconds_f64()
}

/// Runs load, renumber (if enabled), clean, and save for one configuration.
///
/// Returns the cleaned graph so callers can inspect or dump it.
pub fn convert(config: &Config) -> Result<Graph> {
    let start = OffsetDateTime::now_utc();

    let mut graph = Graph::load(&config.input, config.mode, config.endian)?;
    info!(seconds = seconds_since(start), "load finished");

    if config.renumber {
        let stage = OffsetDateTime::now_utc();
        graph.renumber();
        info!(seconds = seconds_since(stage), "renumber finished");
    }

    let stage = OffsetDateTime::now_utc();
    graph.clean();
    info!(seconds = seconds_since(stage), "clean finished");

    let stage = OffsetDateTime::now_utc();
    graph.save(&config.output, config.weights_path(), config.endian)?;
    info!(seconds = seconds_since(stage), total = seconds_since(start), "save finished");

    Ok(graph)
}
