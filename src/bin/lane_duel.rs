//! Headless duel runner.
//!
//! Hosts one match on a tokio task and plays it out with two greedy bots that
//! only see what a real client sees: their `ClientLink` and a `Mirror`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --features cli --bin lane_duel -- --seed 7
//! cargo run --features cli --bin lane_duel -- --config match.ron --max-rounds 40 -v
//! ```
//!
//! The action log and the result go to stdout, diagnostics to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lane_ccg::cards::{load_deck, CardCatalog, StaticDeckSource};
use lane_ccg::core::{MatchConfig, Phase, Side};
use lane_ccg::effects::{AbilityRegistry, SpellTarget};
use lane_ccg::session::{spawn_match, ClientLink, Command, Event, MatchSession, Mirror};

#[derive(Parser)]
#[command(name = "lane_duel")]
#[command(about = "Play a bot-vs-bot match against the authoritative core")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr (`RUST_LOG` takes precedence)
    #[arg(short, long)]
    verbose: bool,

    /// RON match configuration; defaults are used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Shuffle seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many rounds without a winner
    #[arg(long, default_value = "30")]
    max_rounds: u32,
}

/// Deck id both bots register with the local deck source.
const STARTER_DECK: u64 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = match &cli.config {
        Some(path) => MatchConfig::from_ron(&std::fs::read_to_string(path)?)?,
        None => MatchConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let catalog = CardCatalog::starter();
    let cards: Vec<_> = catalog
        .iter_sorted()
        .flat_map(|card| [card.clone(), card.clone()])
        .collect();
    let source = StaticDeckSource::new().with_cards(STARTER_DECK, &cards)?;

    let registry = Arc::new(AbilityRegistry::standard());
    let session = MatchSession::with_registry(config.clone(), registry.clone());
    let (host, links) = spawn_match(session);
    tracing::info!(seed = config.seed, max_rounds = cli.max_rounds, "duel starting");

    let mut bots = Vec::new();
    for (_, link) in links {
        let deck = load_deck(&source, STARTER_DECK, "local")?;
        link.send(Command::Connect)?;
        link.send(Command::SubmitDeck { cards: deck })?;
        let bot = Bot::new(link, registry.clone(), config.log_capacity, cli.max_rounds);
        bots.push(tokio::spawn(bot.run()));
    }

    for bot in bots {
        bot.await?;
    }
    let session = host.await?;

    for line in session.log().iter() {
        println!("{line}");
    }
    match session.result() {
        Some(result) => println!("{}", result.describe()),
        None => println!(
            "No winner after {} rounds (HP {} / {}).",
            cli.max_rounds,
            session.state().hp[Side::A],
            session.state().hp[Side::B]
        ),
    }
    Ok(())
}

/// Greedy client: plays whatever it can afford, left to right, then ends
/// its turn.
struct Bot {
    link: ClientLink,
    mirror: Mirror,
    registry: Arc<AbilityRegistry>,
    max_rounds: u32,
    acted_in: Option<u32>,
}

impl Bot {
    fn new(link: ClientLink, registry: Arc<AbilityRegistry>, log_capacity: usize, max_rounds: u32) -> Self {
        Self {
            mirror: Mirror::new(link.side(), log_capacity),
            link,
            registry,
            max_rounds,
            acted_in: None,
        }
    }

    async fn run(mut self) {
        while let Some(event) = self.link.recv().await {
            // The host enqueues a command's events in one go; take the batch.
            let game_over = std::iter::once(event)
                .chain(self.link.drain())
                .fold(false, |over, event| {
                    self.mirror.apply(&event);
                    over || matches!(event, Event::GameOver { .. })
                });

            let view = self.mirror.view();
            if game_over || view.phase == Phase::GameOver || view.round > self.max_rounds {
                break;
            }
            if self.mirror.is_my_turn() && self.acted_in != Some(view.round) {
                self.acted_in = Some(view.round);
                if self.take_turn().is_err() {
                    break;
                }
            }
        }
        tracing::debug!(side = ?self.mirror.side(), "bot finished");
    }

    fn take_turn(&self) -> Result<(), lane_ccg::HostError> {
        let side = self.mirror.side();
        let view = self.mirror.view();
        let mut mana = view.mana[side].current;
        let mut free: Vec<bool> = view.board[side].iter().map(Option::is_none).collect();
        let enemy_lanes: Vec<usize> = view.board[side.opponent()]
            .iter()
            .enumerate()
            .filter_map(|(lane, slot)| slot.as_ref().map(|_| lane))
            .collect();
        let own_lanes: Vec<usize> = view.board[side]
            .iter()
            .enumerate()
            .filter_map(|(lane, slot)| slot.as_ref().map(|_| lane))
            .collect();

        let mut plays = Vec::new();
        for (index, card) in self.mirror.hand().iter().enumerate() {
            if card.cost > mana {
                continue;
            }
            let play = if card.card_type.occupies_lane() {
                free.iter().position(|&f| f).map(|lane| {
                    free[lane] = false;
                    Command::play(side, index, lane)
                })
            } else {
                match self.registry.spell(card.uid.as_str()).map(|spell| spell.target) {
                    Some(SpellTarget::Single(row)) => {
                        let target_side = row.side_for(side);
                        let lanes = if target_side == side { &own_lanes } else { &enemy_lanes };
                        lanes
                            .first()
                            .map(|&lane| Command::play_at(side, index, lane, target_side))
                    }
                    Some(SpellTarget::Row(row)) => {
                        Some(Command::play_at(side, index, 0, row.side_for(side)))
                    }
                    Some(SpellTarget::None) => Some(Command::play(side, index, 0)),
                    None => None,
                }
            };
            if let Some(play) = play {
                mana -= card.cost;
                plays.push(play);
            }
        }

        // Highest hand index first so earlier indices stay valid.
        for play in plays.into_iter().rev() {
            self.link.send(play)?;
        }
        self.link.send(Command::EndTurn)
    }
}
