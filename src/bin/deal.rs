//! Auto-play a full roster draft.
//!
//! Usage:
//!   cargo run --bin deal -- --local --seed 7 --deal-at 4
//!   cargo run --bin deal -- --url http://localhost:8000 --switch
//!   cargo run --bin deal -- --local --search jalen

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use deal_draft::core::{CaseNumber, GameConfig, Tier};
use deal_draft::driver::{RandomPlayer, Strategy, Table, Threshold};
use deal_draft::game::{GameMachine, Roster, Session};
use deal_draft::services::{
    demo_catalog, ClientConfig, HttpBackend, LocalBackend, OfferGenerator, PlayerSearch,
    PoolGenerator,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Draft a five-man roster one briefcase at a time")]
struct Args {
    /// Backend base URL.
    #[arg(short, long, env = "DEAL_BACKEND_URL", default_value = "http://127.0.0.1:8000")]
    url: String,

    /// Backend request timeout in milliseconds.
    #[arg(long, env = "DEAL_TIMEOUT_MS", default_value = "10000")]
    timeout_ms: u64,

    /// Use the bundled demo catalog instead of the backend.
    #[arg(long)]
    local: bool,

    /// Seed for case pools.
    #[arg(short, long, default_value = "1")]
    seed: u64,

    /// Case to reserve in every play-through.
    #[arg(long, default_value = "1")]
    reserve: u8,

    /// Take any offer at this tier or better.
    #[arg(long)]
    deal_at: Option<u8>,

    /// Switch cases at the final choice.
    #[arg(long)]
    switch: bool,

    /// Play with seeded random decisions instead.
    #[arg(long)]
    random: Option<u64>,

    /// Search players by name and exit.
    #[arg(long)]
    search: Option<String>,

    #[arg(long, default_value = "10")]
    limit: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if args.local {
        run(LocalBackend::new(demo_catalog()), &args).await
    } else {
        let config =
            ClientConfig::new(&args.url).with_timeout(Duration::from_millis(args.timeout_ms));
        let backend = HttpBackend::new(config).context("failed to build HTTP client")?;
        if !backend.health().await.context("backend health check failed")? {
            bail!("backend at {} is not healthy", backend.base_url());
        }
        run(backend, &args).await
    }
}

async fn run<B>(backend: B, args: &Args) -> Result<()>
where
    B: PoolGenerator + OfferGenerator + PlayerSearch,
{
    if let Some(query) = &args.search {
        let players = backend.search(query, args.limit).await?;
        for player in &players {
            println!("{:>10}  {}", player.id.raw(), player);
        }
        info!(count = players.len(), "search complete");
        return Ok(());
    }

    let machine = GameMachine::new(Session::new(GameConfig::default(), args.seed))?;
    let table = Table::new(machine, backend);

    let roster = match args.random {
        Some(seed) => draft(table, RandomPlayer::new(seed)).await?,
        None => {
            let mut strategy = Threshold::default()
                .with_reserve(CaseNumber::new(args.reserve))
                .with_switch(args.switch);
            if let Some(tier) = args.deal_at {
                strategy = strategy.with_deal_at(Tier::new(tier));
            }
            draft(table, strategy).await?
        }
    };

    for (slot, prize) in roster.iter() {
        match prize {
            Some(prize) => println!("{:<3} {prize}", slot.code()),
            None => println!("{:<3} -", slot.code()),
        }
    }
    Ok(())
}

async fn draft<B, S>(mut table: Table<B>, mut strategy: S) -> Result<Roster>
where
    B: PoolGenerator + OfferGenerator,
    S: Strategy,
{
    let roster = table.draft_roster(&mut strategy).await?;
    Ok(roster)
}
