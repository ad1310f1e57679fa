//! Card system: definitions, instances, catalog, and deck loading.
//!
//! ## Key Types
//!
//! - `CardUid`: Stable identifier; abilities are keyed by it
//! - `CardDefinition`: Static card data shared behind `Arc`
//! - `CardInstance`: Runtime card state in a lane (health, frost)
//! - `CardCatalog`: Definition lookup and the bundled starter set
//! - `DeckSource`: External deck provider consumed at match assembly

pub mod definition;
pub mod instance;
pub mod loader;
pub mod registry;

pub use definition::{CardDefinition, CardType, CardUid};
pub use instance::CardInstance;
pub use loader::{load_deck, parse_deck_response, DeckCardDto, DeckCardsResponse, DeckSource, StaticDeckSource};
pub use registry::{forest_wolf, CardCatalog, FOREST_WOLF};
