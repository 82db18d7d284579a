use std::io;

use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::OffsetDateTime;
use tracing::info;

use graphconvert::{seconds_since, Edge, Endian, Graph, Mode};

// times each conversion stage on a seeded random graph, writing to a sink.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).with_target(false).init();

    let mut args = std::env::args().skip(1);
    let (node_cnt, edge_cnt) = match (args.next(), args.next()) {
        (Some(nodes), Some(edges)) => (
            nodes.parse::<u32>().context("invalid node count")?,
            edges.parse::<usize>().context("invalid edge count")?,
        ),
        _ => bail!("usage: profile <nodes> <edges> [weighted] [seed]"),
    };
    let mode = match args.next().as_deref() {
        Some("weighted") => Mode::Weighted,
        _ => Mode::Unweighted,
    };
    let seed = match args.next() {
        Some(seed) => seed.parse::<u64>().context("invalid seed")?,
        None => 0x5eed,
    };
    if node_cnt == 0 {
        bail!("need at least one node");
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let edges: Vec<Edge> = (0..edge_cnt)
        .map(|_| {
            let src = rng.gen_range(0..node_cnt);
            let dst = rng.gen_range(0..node_cnt);
            let weight = if mode.is_weighted() { rng.gen_range(0.5..2.0) } else { 1.0 };
            Edge::weighted(src, dst, weight)
        })
        .collect();

    let start = OffsetDateTime::now_utc();
    let mut graph = Graph::from_edges(edges, mode);
    info!(
        seconds = seconds_since(start),
        nodes = graph.nodes(),
        links = graph.total_degree(),
        "load"
    );

    let stage = OffsetDateTime::now_utc();
    let renumbering = graph.renumber();
    info!(seconds = seconds_since(stage), kept = renumbering.len(), "renumber");

    let stage = OffsetDateTime::now_utc();
    graph.clean();
    info!(seconds = seconds_since(stage), links = graph.total_degree(), "clean");

    let stage = OffsetDateTime::now_utc();
    graph.write_links(&mut io::sink(), Endian::Native)?;
    if mode.is_weighted() {
        graph.write_weights(&mut io::sink(), Endian::Native)?;
    }
    info!(seconds = seconds_since(stage), "write");

    info!(elapsed = seconds_since(start), "profile finished");
    Ok(())
}
