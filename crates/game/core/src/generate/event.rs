//! Map event offers.
use crate::action::RunEffect;
use crate::content::{events, require_event};
use crate::ids::{EnemyId, EventId, RelicId};
use crate::rng::SeededRng;
use crate::rng::seed::event_seed;
use crate::state::Card;

/// Player state an event may inspect while rolling its options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventContext {
    pub seed: u64,
    pub floor: u32,
    pub row: u32,
    pub node_id: String,
    pub player_max_hp: i32,
    pub player_current_hp: i32,
    pub gold: i32,
    pub deck: Vec<Card>,
    pub relic_ids: Vec<RelicId>,
}

/// Second step required after picking an option.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventFollowUp {
    /// Pick one of these deck indices to upgrade.
    ChooseUpgradeableCard { indices: Vec<usize> },
    /// Fight a single elite enemy right away.
    StartEliteBattle { enemy_id: EnemyId },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventOption {
    pub label: String,
    /// Short outcome text shown before choosing.
    pub preview: Option<String>,
    pub effects: Vec<RunEffect>,
    pub follow_up: Option<EventFollowUp>,
}

impl EventOption {
    pub fn new(label: impl Into<String>, effects: Vec<RunEffect>) -> Self {
        Self {
            label: label.into(),
            preview: None,
            effects,
            follow_up: None,
        }
    }

    #[must_use]
    pub fn preview(mut self, text: impl Into<String>) -> Self {
        self.preview = Some(text.into());
        self
    }

    #[must_use]
    pub fn follow_up(mut self, follow_up: EventFollowUp) -> Self {
        self.follow_up = Some(follow_up);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventOffer {
    pub event_id: EventId,
    pub name: String,
    pub description: String,
    pub options: Vec<EventOption>,
}

/// Picks an event for the node and rolls its options from the same stream.
pub fn generate_event(ctx: &EventContext) -> Option<EventOffer> {
    let mut rng = SeededRng::new(event_seed(ctx.seed, ctx.floor, ctx.row, &ctx.node_id));
    let ids: Vec<EventId> = events().ids().cloned().collect();
    let picked = rng.shuffled(&ids).into_iter().next()?;
    Some(require_event(picked.as_str()).generate(ctx, &mut rng))
}
