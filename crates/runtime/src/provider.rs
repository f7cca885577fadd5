//! Action providers: something that decides the next [`SessionAction`].
//!
//! Interactive frontends answer with player input; headless tooling uses the
//! [`GreedyProvider`] to play whole runs without a human.

use game_core::PendingInput;
use game_core::content::upgradeable_indices;

use crate::error::Result;
use crate::session::{Room, RunSession, SessionAction};

pub trait ActionProvider {
    fn name(&self) -> &str;

    /// The next decision for `session`, or `None` when there is nothing to decide.
    fn next_action(&mut self, session: &RunSession) -> Option<SessionAction>;
}

/// Plays the first affordable card, keeps the top foreseen card, always takes
/// the first reward and otherwise picks the first option available.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyProvider;

impl ActionProvider for GreedyProvider {
    fn name(&self) -> &str {
        "greedy"
    }

    fn next_action(&mut self, session: &RunSession) -> Option<SessionAction> {
        let run = session.run();
        let action = match session.room() {
            Room::Map => {
                let node = run.accessible_nodes().into_iter().next()?;
                SessionAction::SelectNode {
                    node_id: node.id.clone(),
                }
            }
            Room::Battle { engine, .. } => match engine.pending_input() {
                Some(PendingInput::Foresight { .. }) => SessionAction::ChooseForesight { option: 0 },
                None => match engine.playable_cards().first() {
                    Some(&hand_index) => SessionAction::PlayCard {
                        hand_index,
                        target: None,
                    },
                    None => SessionAction::EndTurn,
                },
            },
            Room::CardReward(offer) if !offer.choices.is_empty() => {
                SessionAction::ChooseCard { index: 0 }
            }
            Room::CardReward(_) => SessionAction::SkipReward,
            Room::Rest => {
                let wounded = run.player.current_hp * 2 < run.player.max_hp;
                match upgradeable_indices(&run.deck).first() {
                    Some(&deck_index) if !wounded => SessionAction::Upgrade { deck_index },
                    _ => SessionAction::Rest,
                }
            }
            Room::Shop(shop) => match shop
                .cards
                .iter()
                .position(|offer| !offer.sold && offer.price <= run.gold)
            {
                Some(index) => SessionAction::BuyCard { index },
                None => SessionAction::Leave,
            },
            Room::Event(_) => SessionAction::ChooseOption { index: 0 },
            Room::UpgradeChoice(_) => SessionAction::ChooseUpgrade { index: 0 },
            Room::Finished => return None,
        };
        Some(action)
    }
}

/// Feeds provider decisions into `session` until the run ends, the provider
/// runs out of decisions or `max_steps` actions were applied. Returns the
/// number of actions applied.
pub fn drive(
    session: &mut RunSession,
    provider: &mut dyn ActionProvider,
    max_steps: usize,
) -> Result<usize> {
    let mut steps = 0;
    while steps < max_steps && !session.is_over() {
        let Some(action) = provider.next_action(session) else {
            break;
        };
        session.apply(action)?;
        steps += 1;
    }
    tracing::debug!(provider = provider.name(), steps, over = session.is_over(), "drive finished");
    Ok(steps)
}
