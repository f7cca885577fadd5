//! Run sessions: one [`RunState`] plus the room the player is currently in.
//!
//! A session is the single entry point for player decisions. It routes each
//! [`SessionAction`] to the battle engine, a generator or a run operation,
//! appends everything observable to its [`SessionEvent`] log and saves the
//! run whenever a node is completed.
//!
//! ```text
//! Map --select--> Battle --won--> CardReward --choose/skip--> Map
//!               \-> Rest | Shop | Event --------------------/
//! ```

mod action;
mod event;
mod persistence;
mod replay;

pub use action::SessionAction;
pub use event::SessionEvent;
pub use persistence::Persistence;
pub use replay::{Recording, digest, replay, verify};

use game_core::generate::{
    EventFollowUp, RelicDropSource, generate_card_reward, generate_event, generate_gold_reward,
    generate_relic_drop, generate_shop,
};
use game_core::{
    BattleEngine, CardRewardOffer, EventOffer, GameConfig, PlayerAction, RoomType, RunError,
    RunSnapshot, RunState, ShopInventory,
};

use crate::error::{Result, SessionError};
use crate::repository::BattleRecord;
use persistence::unix_now;

/// Where the player currently is within the run.
pub enum Room {
    /// Between nodes, choosing where to go.
    Map,
    Battle {
        engine: Box<BattleEngine>,
        /// Relic drop granted on victory.
        drop: Option<RelicDropSource>,
    },
    CardReward(CardRewardOffer),
    Rest,
    Shop(ShopInventory),
    Event(EventOffer),
    /// An event asked to upgrade one of these deck indices.
    UpgradeChoice(Vec<usize>),
    /// The run is over.
    Finished,
}

impl Room {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Map => "the map",
            Self::Battle { .. } => "a battle",
            Self::CardReward(_) => "a card reward",
            Self::Rest => "a rest site",
            Self::Shop(_) => "a shop",
            Self::Event(_) => "an event",
            Self::UpgradeChoice(_) => "an upgrade choice",
            Self::Finished => "a finished run",
        }
    }
}

pub struct RunSession {
    run: RunState,
    room: Room,
    log: Vec<SessionEvent>,
    actions: Vec<SessionAction>,
    persistence: Persistence,
}

impl RunSession {
    /// Starts a new run and saves it.
    pub fn new(seed: u64, config: &GameConfig, persistence: Persistence) -> Self {
        let run = RunState::new(seed, config);
        tracing::info!(seed, max_floor = run.max_floor, "starting run");

        let mut session = Self {
            run,
            room: Room::Map,
            log: Vec::new(),
            actions: Vec::new(),
            persistence,
        };
        session.emit(SessionEvent::RunStarted {
            seed,
            floor: session.run.floor,
        });
        session.persistence.save(&session.run.snapshot());
        session
    }

    /// Continues a saved run. Saves are only written between nodes, so the
    /// player always resumes on the map.
    pub fn resume(snapshot: &RunSnapshot, persistence: Persistence) -> Result<Self> {
        let run = RunState::restore(snapshot)?;
        tracing::info!(seed = run.seed, floor = run.floor, "resuming run");

        let room = if run.is_over { Room::Finished } else { Room::Map };
        let mut session = Self {
            run,
            room,
            log: Vec::new(),
            actions: Vec::new(),
            persistence,
        };
        session.emit(SessionEvent::RunResumed {
            seed: session.run.seed,
            floor: session.run.floor,
        });
        Ok(session)
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn battle(&self) -> Option<&BattleEngine> {
        match &self.room {
            Room::Battle { engine, .. } => Some(engine.as_ref()),
            _ => None,
        }
    }

    pub fn log(&self) -> &[SessionEvent] {
        &self.log
    }

    /// Actions accepted so far, in order.
    pub fn actions(&self) -> &[SessionAction] {
        &self.actions
    }

    pub fn is_over(&self) -> bool {
        self.run.is_over
    }

    /// SHA-256 of the event log so far.
    pub fn digest(&self) -> Result<String> {
        digest(&self.log)
    }

    /// Applies one decision. A rejected decision returns an error, changes
    /// nothing and is not recorded.
    ///
    /// Battle input the engine rejects (bad target, not enough energy) is not
    /// an error here: it is recorded together with the engine's rejection event.
    pub fn apply(&mut self, action: SessionAction) -> Result<()> {
        if self.run.is_over {
            return Err(RunError::RunOver.into());
        }
        tracing::trace!(action = action.label(), room = self.room.name(), "applying action");

        match &action {
            SessionAction::SelectNode { node_id } => self.select_node(node_id)?,
            SessionAction::PlayCard { hand_index, target } => {
                self.battle_action(
                    "play card",
                    PlayerAction::PlayCard {
                        hand_index: *hand_index,
                        target: *target,
                    },
                )?;
            }
            SessionAction::UseConsumable { slot, target } => {
                if matches!(self.room, Room::Battle { .. }) {
                    self.battle_action(
                        "use consumable",
                        PlayerAction::UseConsumable {
                            slot: *slot,
                            target: *target,
                        },
                    )?;
                } else {
                    self.use_consumable_outside(*slot)?;
                }
            }
            SessionAction::EndTurn => self.battle_action("end turn", PlayerAction::EndTurn)?,
            SessionAction::ChooseForesight { option } => self.battle_action(
                "choose foresight",
                PlayerAction::ChooseForesight { option: *option },
            )?,
            SessionAction::ChooseCard { index } => self.choose_card(Some(*index))?,
            SessionAction::SkipReward => self.choose_card(None)?,
            SessionAction::ChooseOption { index } => self.choose_option(*index)?,
            SessionAction::ChooseUpgrade { index } => self.choose_upgrade(*index)?,
            SessionAction::BuyCard { index } => self.buy_card(*index)?,
            SessionAction::BuyRelic { index } => self.buy_relic(*index)?,
            SessionAction::BuyConsumable { index } => self.buy_consumable(*index)?,
            SessionAction::RemoveCard { deck_index } => self.remove_card(*deck_index)?,
            SessionAction::Rest => self.rest()?,
            SessionAction::Upgrade { deck_index } => self.rest_upgrade(*deck_index)?,
            SessionAction::Leave => self.leave()?,
        }

        self.actions.push(action);
        Ok(())
    }

    // ========================================================================
    // Map
    // ========================================================================

    fn select_node(&mut self, node_id: &str) -> Result<()> {
        self.require_map("select node")?;
        let room_type = self.run.enter_node(node_id)?.room_type;
        self.emit(SessionEvent::NodeEntered {
            node_id: node_id.to_owned(),
            room_type,
        });

        match room_type {
            RoomType::Start => self.complete_node()?,
            RoomType::Battle | RoomType::Elite | RoomType::Boss => {
                let drop = match room_type {
                    RoomType::Elite => Some(RelicDropSource::Elite),
                    RoomType::Boss => Some(RelicDropSource::Boss),
                    _ => None,
                };
                let engine = self.run.start_battle()?;
                self.begin_battle(engine, drop);
            }
            RoomType::Rest => self.room = Room::Rest,
            RoomType::Shop => {
                let shop = generate_shop(&self.run.shop_context()?);
                self.emit(SessionEvent::ShopOpened {
                    cards: shop.cards.len(),
                    relics: shop.relics.len(),
                    consumables: shop.consumables.len(),
                });
                self.room = Room::Shop(shop);
            }
            RoomType::Event => match generate_event(&self.run.event_context()?) {
                Some(offer) => {
                    self.emit(SessionEvent::EventOffered {
                        event_id: offer.event_id.clone(),
                        name: offer.name.clone(),
                    });
                    self.room = Room::Event(offer);
                }
                None => self.complete_node()?,
            },
        }
        Ok(())
    }

    /// Completes the current node, reports act changes and the end of the
    /// run, and saves.
    fn complete_node(&mut self) -> Result<()> {
        let node_id = self.run.current_node.clone();
        let floor = self.run.floor;
        self.run.complete_current_node()?;
        self.room = Room::Map;

        if let Some(node_id) = node_id {
            self.emit(SessionEvent::NodeCompleted { node_id });
        }
        if self.run.floor != floor {
            self.emit(SessionEvent::ActAdvanced {
                floor: self.run.floor,
            });
        }
        if self.run.is_over && self.run.won {
            tracing::info!(seed = self.run.seed, "run won");
            self.emit(SessionEvent::RunWon);
            self.room = Room::Finished;
        }

        self.persistence.save(&self.run.snapshot());
        Ok(())
    }

    fn end_run_lost(&mut self) {
        tracing::info!(seed = self.run.seed, floor = self.run.floor, "run lost");
        self.emit(SessionEvent::RunLost);
        self.room = Room::Finished;
        self.persistence.save(&self.run.snapshot());
    }

    // ========================================================================
    // Battles
    // ========================================================================

    fn begin_battle(&mut self, mut engine: BattleEngine, drop: Option<RelicDropSource>) {
        engine.start();
        let events = engine.take_events();
        let over = engine.is_over();
        self.push_battle_events(events);
        self.room = Room::Battle {
            engine: Box::new(engine),
            drop,
        };
        if over {
            self.finish_battle();
        }
    }

    fn battle_action(&mut self, label: &'static str, action: PlayerAction) -> Result<()> {
        let room = self.room.name();
        let (events, over) = match &mut self.room {
            Room::Battle { engine, .. } => {
                engine.apply(action);
                (engine.take_events(), engine.is_over())
            }
            _ => return Err(SessionError::Unavailable { action: label, room }),
        };

        self.push_battle_events(events);
        if over {
            self.finish_battle();
        }
        Ok(())
    }

    /// Writes the battle back to the run, records it and hands out rewards.
    fn finish_battle(&mut self) {
        let Room::Battle { engine, drop } = std::mem::replace(&mut self.room, Room::Map) else {
            return;
        };

        self.run.apply_battle_result(&engine);
        self.persistence
            .record(&BattleRecord::from_battle(&self.run, &engine, unix_now()));
        tracing::debug!(
            won = engine.outcome() == Some(true),
            turns = engine.state().turn,
            "battle finished"
        );

        if self.run.is_over {
            self.end_run_lost();
            return;
        }

        let Ok(ctx) = self.run.reward_context() else {
            return;
        };

        let gold = generate_gold_reward(&ctx);
        if gold > 0 {
            self.run.gold += gold;
            self.emit(SessionEvent::GoldGained { amount: gold });
        }

        if let Some(source) = drop
            && let Some(relic_id) = generate_relic_drop(&ctx, source, &self.run.relics)
        {
            self.run.add_relic(relic_id.clone());
            self.emit(SessionEvent::RelicObtained { relic_id });
        }

        let offer = generate_card_reward(&ctx);
        self.emit(SessionEvent::CardRewardOffered {
            choices: offer.choices.clone(),
        });
        self.room = Room::CardReward(offer);
    }

    fn choose_card(&mut self, index: Option<usize>) -> Result<()> {
        let room = self.room.name();
        let Room::CardReward(offer) = &self.room else {
            return Err(SessionError::Unavailable {
                action: "card reward",
                room,
            });
        };

        let card_id = match index {
            Some(index) => Some(offer.choices.get(index).cloned().ok_or(
                SessionError::InvalidChoice {
                    index,
                    len: offer.choices.len(),
                },
            )?),
            None => None,
        };

        match card_id {
            Some(card_id) => {
                let instance_id = self.run.add_card(card_id.clone()).id.clone();
                self.emit(SessionEvent::CardAdded {
                    instance_id,
                    card_id,
                });
            }
            None => self.emit(SessionEvent::RewardSkipped),
        }
        self.complete_node()
    }

    // ========================================================================
    // Rest sites
    // ========================================================================

    fn rest(&mut self) -> Result<()> {
        self.require_rest("rest")?;
        let healed = self.run.rest()?;
        self.emit(SessionEvent::Rested { healed });
        self.complete_node()
    }

    fn rest_upgrade(&mut self, deck_index: usize) -> Result<()> {
        self.require_rest("upgrade")?;
        self.upgrade(deck_index)?;
        self.complete_node()
    }

    fn upgrade(&mut self, deck_index: usize) -> Result<()> {
        let card_id = self.run.upgrade_card(deck_index)?;
        let instance_id = self.run.deck[deck_index].id.clone();
        self.emit(SessionEvent::CardUpgraded {
            instance_id,
            card_id,
        });
        Ok(())
    }

    fn require_rest(&self, action: &'static str) -> Result<()> {
        match self.room {
            Room::Rest => Ok(()),
            _ => Err(SessionError::Unavailable {
                action,
                room: self.room.name(),
            }),
        }
    }

    // ========================================================================
    // Shops
    // ========================================================================

    fn buy_card(&mut self, index: usize) -> Result<()> {
        let room = self.room.name();
        let Room::Shop(shop) = &mut self.room else {
            return Err(SessionError::Unavailable {
                action: "buy card",
                room,
            });
        };
        let card_id = self.run.buy_card(shop, index)?;
        let price = shop.cards[index].price;
        self.emit(SessionEvent::Purchased {
            item: card_id.to_string(),
            price,
        });
        Ok(())
    }

    fn buy_relic(&mut self, index: usize) -> Result<()> {
        let room = self.room.name();
        let Room::Shop(shop) = &mut self.room else {
            return Err(SessionError::Unavailable {
                action: "buy relic",
                room,
            });
        };
        let relic_id = self.run.buy_relic(shop, index)?;
        let price = shop.relics[index].price;
        self.emit(SessionEvent::Purchased {
            item: relic_id.to_string(),
            price,
        });
        Ok(())
    }

    fn buy_consumable(&mut self, index: usize) -> Result<()> {
        let room = self.room.name();
        let Room::Shop(shop) = &mut self.room else {
            return Err(SessionError::Unavailable {
                action: "buy consumable",
                room,
            });
        };
        let consumable_id = self.run.buy_consumable(shop, index)?;
        let price = shop.consumables[index].price;
        self.emit(SessionEvent::Purchased {
            item: consumable_id.to_string(),
            price,
        });
        Ok(())
    }

    fn remove_card(&mut self, deck_index: usize) -> Result<()> {
        let room = self.room.name();
        let Room::Shop(shop) = &mut self.room else {
            return Err(SessionError::Unavailable {
                action: "remove card",
                room,
            });
        };
        let price = shop.remove_card_price;
        let card = self.run.shop_remove_card(shop, deck_index)?;
        self.emit(SessionEvent::Purchased {
            item: "card removal".to_string(),
            price,
        });
        self.emit(SessionEvent::CardRemoved {
            instance_id: card.id,
            card_id: card.card_id,
        });
        Ok(())
    }

    // ========================================================================
    // Events
    // ========================================================================

    fn choose_option(&mut self, index: usize) -> Result<()> {
        let room = self.room.name();
        let Room::Event(offer) = &self.room else {
            return Err(SessionError::Unavailable {
                action: "choose option",
                room,
            });
        };
        let option = offer
            .options
            .get(index)
            .cloned()
            .ok_or(SessionError::InvalidChoice {
                index,
                len: offer.options.len(),
            })?;

        let gold_before = self.run.gold;
        let relics_before = self.run.relics.len();
        let deck_before = self.run.deck.len();
        self.run.apply_run_effects(&option.effects)?;
        self.emit(SessionEvent::EventOptionChosen {
            index,
            label: option.label.clone(),
        });
        self.report_run_changes(gold_before, relics_before, deck_before);

        if self.run.is_over {
            self.end_run_lost();
            return Ok(());
        }

        match option.follow_up {
            Some(EventFollowUp::ChooseUpgradeableCard { indices }) if !indices.is_empty() => {
                self.room = Room::UpgradeChoice(indices);
                Ok(())
            }
            Some(EventFollowUp::StartEliteBattle { enemy_id }) => {
                let engine = self.run.start_battle_against(enemy_id)?;
                self.begin_battle(engine, Some(RelicDropSource::Elite));
                Ok(())
            }
            _ => self.complete_node(),
        }
    }

    /// Reports what event effects gave the player.
    fn report_run_changes(&mut self, gold_before: i32, relics_before: usize, deck_before: usize) {
        if self.run.gold > gold_before {
            self.emit(SessionEvent::GoldGained {
                amount: self.run.gold - gold_before,
            });
        }
        let relics: Vec<_> = self.run.relics[relics_before..].to_vec();
        for relic_id in relics {
            self.emit(SessionEvent::RelicObtained { relic_id });
        }
        let cards: Vec<_> = self.run.deck[deck_before..].to_vec();
        for card in cards {
            self.emit(SessionEvent::CardAdded {
                instance_id: card.id,
                card_id: card.card_id,
            });
        }
    }

    fn choose_upgrade(&mut self, index: usize) -> Result<()> {
        let room = self.room.name();
        let Room::UpgradeChoice(indices) = &self.room else {
            return Err(SessionError::Unavailable {
                action: "choose upgrade",
                room,
            });
        };
        let deck_index = *indices.get(index).ok_or(SessionError::InvalidChoice {
            index,
            len: indices.len(),
        })?;

        self.upgrade(deck_index)?;
        self.complete_node()
    }

    // ========================================================================
    // Shared
    // ========================================================================

    fn leave(&mut self) -> Result<()> {
        match self.room {
            Room::Shop(_) | Room::Rest | Room::Event(_) => self.complete_node(),
            _ => Err(SessionError::Unavailable {
                action: "leave",
                room: self.room.name(),
            }),
        }
    }

    fn use_consumable_outside(&mut self, slot: usize) -> Result<()> {
        if matches!(self.room, Room::Finished) {
            return Err(SessionError::Unavailable {
                action: "use consumable",
                room: self.room.name(),
            });
        }
        let consumable_id = self.run.use_consumable(slot)?;
        self.emit(SessionEvent::ConsumableUsed { consumable_id });
        Ok(())
    }

    fn require_map(&self, action: &'static str) -> Result<()> {
        match self.room {
            Room::Map => Ok(()),
            _ => Err(SessionError::Unavailable {
                action,
                room: self.room.name(),
            }),
        }
    }

    fn push_battle_events(&mut self, events: Vec<game_core::BattleEvent>) {
        for event in events {
            self.emit(SessionEvent::Battle(event));
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        self.persistence.log(&event.to_string());
        self.log.push(event);
    }
}

#[cfg(test)]
mod tests;
