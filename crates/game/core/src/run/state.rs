use crate::action::RunEffect;
use crate::config::GameConfig;
use crate::content::{BURNING_BLOOD, MADNESS, get_consumable, require_card, require_consumable, starter_deck};
use crate::engine::{BattleEngine, Loadout};
use crate::generate::{EventContext, MapNode, RewardContext, RoomType, ShopContext, generate_map};
use crate::ids::{CardId, ConsumableId, EnemyId, RelicId};
use crate::rng::seed::{battle_seed, map_seed};
use crate::state::{Card, Entity};

use super::RunError;

/// The persistent state of one play-through.
///
/// Only explicit operations mutate it; each either succeeds completely or
/// returns a [`RunError`] and leaves the run untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunState {
    pub seed: u64,
    /// Current act, starting at 1.
    pub floor: u32,
    pub max_floor: u32,
    /// Rows per act map, used when the next act's map is generated.
    pub map_rows: u32,
    pub gold: i32,
    /// HP and run-level statuses such as madness. Block is always 0 here.
    pub player: Entity,
    pub deck: Vec<Card>,
    /// Owned relics in acquisition order, without duplicates.
    pub relics: Vec<RelicId>,
    pub consumables: Vec<ConsumableId>,
    pub map: Vec<MapNode>,
    pub current_node: Option<String>,
    pub is_over: bool,
    pub won: bool,
}

impl RunState {
    /// Starts a fresh run: starter deck, [`BURNING_BLOOD`] and the act 1 map.
    pub fn new(seed: u64, config: &GameConfig) -> Self {
        let floor = 1;
        let rows = config.map_rows.max(GameConfig::MIN_MAP_ROWS);
        tracing::debug!(seed, rows, max_floor = config.max_floor, "new run");
        Self {
            seed,
            floor,
            max_floor: config.max_floor.max(1),
            map_rows: rows,
            gold: GameConfig::STARTING_GOLD,
            player: Entity::player(
                GameConfig::PLAYER_NAME,
                GameConfig::PLAYER_MAX_HP,
                GameConfig::PLAYER_MAX_HP,
            ),
            deck: starter_deck(),
            relics: vec![BURNING_BLOOD],
            consumables: Vec::new(),
            map: generate_map(map_seed(seed, floor), rows),
            current_node: None,
            is_over: false,
            won: false,
        }
    }

    // ========================================================================
    // Map navigation
    // ========================================================================

    pub fn node(&self, node_id: &str) -> Option<&MapNode> {
        self.map.iter().find(|node| node.id == node_id)
    }

    pub fn current_node(&self) -> Option<&MapNode> {
        self.current_node.as_deref().and_then(|id| self.node(id))
    }

    pub fn accessible_nodes(&self) -> Vec<&MapNode> {
        self.map
            .iter()
            .filter(|node| node.accessible && !node.completed)
            .collect()
    }

    /// Moves onto an accessible, uncompleted node connected to the current one.
    pub fn enter_node(&mut self, node_id: &str) -> Result<&MapNode, RunError> {
        self.ensure_running()?;
        let node = self
            .node(node_id)
            .ok_or_else(|| RunError::NodeNotFound(node_id.to_owned()))?;
        if node.completed {
            return Err(RunError::NodeCompleted(node_id.to_owned()));
        }
        if !node.accessible {
            return Err(RunError::NodeNotAccessible(node_id.to_owned()));
        }
        if let Some(current) = self.current_node()
            && !current.connections.iter().any(|id| id == node_id)
        {
            return Err(RunError::NodeUnreachable {
                from: current.id.clone(),
                to: node_id.to_owned(),
            });
        }

        self.current_node = Some(node_id.to_owned());
        self.node(node_id)
            .ok_or_else(|| RunError::NodeNotFound(node_id.to_owned()))
    }

    /// Completes the current node and opens its connections.
    ///
    /// Completing a boss either advances to the next act or, on the last act,
    /// ends the run as won.
    pub fn complete_current_node(&mut self) -> Result<(), RunError> {
        self.ensure_running()?;
        let current_id = self.current_node.clone().ok_or(RunError::NoCurrentNode)?;
        let node = self
            .node(&current_id)
            .ok_or_else(|| RunError::NodeNotFound(current_id.clone()))?;
        let room_type = node.room_type;
        let next = node.connections.clone();

        for node in &mut self.map {
            if node.id == current_id {
                node.completed = true;
            }
            node.accessible = next.contains(&node.id);
        }

        if room_type == RoomType::Boss {
            if self.floor >= self.max_floor {
                self.is_over = true;
                self.won = true;
                tracing::debug!(floor = self.floor, "run won");
            } else {
                self.advance_act();
            }
        }
        Ok(())
    }

    fn advance_act(&mut self) {
        self.floor += 1;
        self.map = generate_map(map_seed(self.seed, self.floor), self.map_rows);
        self.current_node = None;
        tracing::debug!(floor = self.floor, "advanced to next act");
    }

    fn ensure_running(&self) -> Result<(), RunError> {
        if self.is_over {
            Err(RunError::RunOver)
        } else {
            Ok(())
        }
    }

    // ========================================================================
    // Generation contexts for the current node
    // ========================================================================

    fn current(&self) -> Result<&MapNode, RunError> {
        self.current_node().ok_or(RunError::NoCurrentNode)
    }

    pub fn battle_seed(&self) -> Result<u64, RunError> {
        Ok(battle_seed(self.seed, self.floor, &self.current()?.id))
    }

    pub fn reward_context(&self) -> Result<RewardContext, RunError> {
        let node = self.current()?;
        Ok(RewardContext::new(
            self.seed,
            self.floor,
            node.row,
            node.id.clone(),
            node.room_type,
        ))
    }

    pub fn shop_context(&self) -> Result<ShopContext, RunError> {
        let node = self.current()?;
        Ok(ShopContext {
            seed: self.seed,
            floor: self.floor,
            row: node.row,
            node_id: node.id.clone(),
            owned_relics: self.relics.clone(),
        })
    }

    pub fn event_context(&self) -> Result<EventContext, RunError> {
        let node = self.current()?;
        Ok(EventContext {
            seed: self.seed,
            floor: self.floor,
            row: node.row,
            node_id: node.id.clone(),
            player_max_hp: self.player.max_hp,
            player_current_hp: self.player.current_hp,
            gold: self.gold,
            deck: self.deck.clone(),
            relic_ids: self.relics.clone(),
        })
    }

    // ========================================================================
    // Battles
    // ========================================================================

    /// What the player brings into a battle started now.
    pub fn loadout(&self) -> Loadout {
        let mut player = self.player.clone();
        player.block = 0;
        Loadout {
            player,
            deck: self.deck.clone(),
            relics: self.relics.clone(),
            consumables: self.consumables.clone(),
        }
    }

    /// Battle for the current combat node.
    pub fn start_battle(&self) -> Result<BattleEngine, RunError> {
        self.ensure_running()?;
        let node = self.current()?;
        let seed = self.battle_seed()?;
        Ok(BattleEngine::for_encounter(self.loadout(), self.floor, node.room_type, seed))
    }

    /// Battle against a fixed enemy, e.g. an elite summoned by an event.
    pub fn start_battle_against(&self, enemy_id: EnemyId) -> Result<BattleEngine, RunError> {
        self.ensure_running()?;
        let seed = self.battle_seed()?;
        Ok(BattleEngine::for_enemies(self.loadout(), &[enemy_id], seed))
    }

    /// Writes a finished battle back: HP, madness and unused consumables.
    /// A lost battle ends the run.
    pub fn apply_battle_result(&mut self, engine: &BattleEngine) {
        let player = &engine.state().player;
        self.player.current_hp = player.current_hp.clamp(0, self.player.max_hp);
        self.player.statuses.set(&MADNESS, player.statuses.stacks(MADNESS.as_str()));
        self.consumables = engine.remaining_consumables();

        if engine.outcome() == Some(false) || self.player.current_hp == 0 {
            self.is_over = true;
            self.won = false;
            tracing::debug!(floor = self.floor, "run lost");
        }
    }

    // ========================================================================
    // Run effects
    // ========================================================================

    /// Applies `effects` in order. When one of them fails the run is left
    /// exactly as it was.
    pub fn apply_run_effects(&mut self, effects: &[RunEffect]) -> Result<(), RunError> {
        let mut staged = self.clone();
        effects
            .iter()
            .try_for_each(|effect| staged.apply_run_effect(effect))?;
        *self = staged;
        Ok(())
    }

    pub fn apply_run_effect(&mut self, effect: &RunEffect) -> Result<(), RunError> {
        match effect {
            RunEffect::GainGold { amount } => self.gold = (self.gold + amount).max(0),
            RunEffect::LoseGold { amount } => self.gold = (self.gold - amount).max(0),
            RunEffect::Heal { amount } => {
                self.player.heal(*amount);
            }
            RunEffect::TakeDamage { amount } => {
                self.player.current_hp = (self.player.current_hp - (*amount).max(0)).max(0);
                if self.player.current_hp == 0 {
                    self.is_over = true;
                    self.won = false;
                }
            }
            RunEffect::AddCard { card_id } => {
                self.add_card(card_id.clone());
            }
            RunEffect::AddRelic { relic_id } => {
                self.add_relic(relic_id.clone());
            }
            RunEffect::ApplyStatus { status, stacks } => {
                self.player.statuses.apply(status, *stacks);
            }
            RunEffect::SetStatus { status, stacks } => self.player.statuses.set(status, *stacks),
            RunEffect::AddConsumable { consumable_id } => {
                // A full belt silently drops the consumable.
                let _ = self.add_consumable(consumable_id.clone());
            }
            RunEffect::UpgradeCard { deck_index } => {
                self.upgrade_card(*deck_index)?;
            }
        }
        Ok(())
    }

    /// Adds a new card instance and returns it.
    pub fn add_card(&mut self, card_id: CardId) -> &Card {
        require_card(card_id.as_str());
        let instance = self.next_instance_id(&card_id);
        self.deck.push(Card::new(instance, card_id));
        &self.deck[self.deck.len() - 1]
    }

    /// First free `{card_id}_{n}` instance id, counting from 1.
    fn next_instance_id(&self, card_id: &CardId) -> String {
        (1..)
            .map(|n| format!("{card_id}_{n}"))
            .find(|candidate| !self.deck.iter().any(|card| &card.id == candidate))
            .unwrap_or_else(|| format!("{card_id}_{}", self.deck.len() + 1))
    }

    /// Returns `false` when the relic was already owned.
    pub fn add_relic(&mut self, relic_id: RelicId) -> bool {
        if self.relics.contains(&relic_id) {
            return false;
        }
        self.relics.push(relic_id);
        true
    }

    pub fn add_consumable(&mut self, consumable_id: ConsumableId) -> Result<(), RunError> {
        if self.consumables.len() >= GameConfig::MAX_CONSUMABLE_SLOTS {
            return Err(RunError::NoConsumableSlot {
                max: GameConfig::MAX_CONSUMABLE_SLOTS,
            });
        }
        require_consumable(consumable_id.as_str());
        self.consumables.push(consumable_id);
        Ok(())
    }

    /// Uses a consumable outside of battle. Battle-only consumables are
    /// rejected and stay in their slot.
    pub fn use_consumable(&mut self, slot: usize) -> Result<ConsumableId, RunError> {
        self.ensure_running()?;
        let consumable_id = self
            .consumables
            .get(slot)
            .cloned()
            .ok_or(RunError::InvalidIndex {
                index: slot,
                len: self.consumables.len(),
            })?;
        let effects = get_consumable(consumable_id.as_str())
            .and_then(|definition| definition.out_of_battle)
            .ok_or_else(|| RunError::ConsumableNotUsable(consumable_id.clone()))?;

        self.apply_run_effects(&effects())?;
        self.consumables.remove(slot);
        Ok(consumable_id)
    }

    /// Replaces the card at `deck_index` with its upgraded version, keeping
    /// the instance id.
    pub fn upgrade_card(&mut self, deck_index: usize) -> Result<CardId, RunError> {
        let len = self.deck.len();
        let card = self
            .deck
            .get_mut(deck_index)
            .ok_or(RunError::InvalidIndex {
                index: deck_index,
                len,
            })?;
        let upgraded = require_card(card.card_id.as_str())
            .upgraded_id
            .clone()
            .ok_or_else(|| RunError::CardNotUpgradeable(card.card_id.clone()))?;
        card.card_id = upgraded.clone();
        Ok(upgraded)
    }

    pub fn remove_card(&mut self, deck_index: usize) -> Result<Card, RunError> {
        if deck_index >= self.deck.len() {
            return Err(RunError::InvalidIndex {
                index: deck_index,
                len: self.deck.len(),
            });
        }
        Ok(self.deck.remove(deck_index))
    }

    /// Rest site: heals a fixed share of max HP, rounded down.
    pub fn rest(&mut self) -> Result<i32, RunError> {
        self.ensure_running()?;
        let amount = self.player.max_hp * GameConfig::REST_HEAL_PERCENT / 100;
        Ok(self.player.heal(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MADNESS;

    fn run() -> RunState {
        RunState::new(2024, &GameConfig::new())
    }

    fn boss_id(run: &RunState) -> String {
        run.map
            .iter()
            .find(|node| node.room_type == RoomType::Boss)
            .map(|node| node.id.clone())
            .unwrap()
    }

    #[test]
    fn new_run_starts_at_the_map_origin() {
        let run = run();
        assert_eq!(run.floor, 1);
        assert_eq!(run.gold, 99);
        assert_eq!(run.deck.len(), 12);
        assert_eq!(run.relics, vec![BURNING_BLOOD]);
        assert_eq!(run.current_node, None);
        let accessible: Vec<_> = run.accessible_nodes().iter().map(|n| n.id.clone()).collect();
        assert_eq!(accessible, vec!["0_0".to_string()]);
    }

    #[test]
    fn completing_a_node_opens_its_connections() {
        let mut run = run();
        run.enter_node("0_0").unwrap();
        run.complete_current_node().unwrap();

        let expected = run.node("0_0").unwrap().connections.clone();
        let accessible: Vec<_> = run.accessible_nodes().iter().map(|n| n.id.clone()).collect();
        assert_eq!(accessible, expected);
        assert!(run.node("0_0").unwrap().completed);
        assert_eq!(run.enter_node("0_0").unwrap_err(), RunError::NodeCompleted("0_0".into()));
    }

    #[test]
    fn traversal_rejects_bad_targets() {
        let mut run = run();
        assert_eq!(run.enter_node("1_0").unwrap_err(), RunError::NodeNotAccessible("1_0".into()));
        assert_eq!(run.enter_node("9_9").unwrap_err(), RunError::NodeNotFound("9_9".into()));

        run.enter_node("0_0").unwrap();
        run.complete_current_node().unwrap();
        let first = run.accessible_nodes()[0].id.clone();
        run.enter_node(&first).unwrap();

        // Siblings on row 1 are accessible but not connected to each other.
        let sibling = run
            .map
            .iter()
            .find(|node| node.row == 1 && node.id != first)
            .map(|node| node.id.clone())
            .unwrap();
        let before = run.clone();
        assert!(matches!(
            run.enter_node(&sibling),
            Err(RunError::NodeUnreachable { .. })
        ));
        assert_eq!(run, before);
    }

    #[test]
    fn boss_completion_advances_then_wins() {
        let mut run = run();
        let first_map = run.map.clone();

        run.current_node = Some(boss_id(&run));
        run.complete_current_node().unwrap();
        assert_eq!(run.floor, 2);
        assert_eq!(run.current_node, None);
        assert_ne!(run.map, first_map);
        assert!(!run.is_over);

        run.current_node = Some(boss_id(&run));
        run.complete_current_node().unwrap();
        assert!(run.is_over);
        assert!(run.won);
        assert_eq!(run.enter_node("0_0").unwrap_err(), RunError::RunOver);
    }

    #[test]
    fn run_effects_clamp() {
        let mut run = run();
        run.apply_run_effects(&[
            RunEffect::LoseGold { amount: 500 },
            RunEffect::Heal { amount: 50 },
            RunEffect::ApplyStatus {
                status: MADNESS,
                stacks: 2,
            },
        ])
        .unwrap();
        assert_eq!(run.gold, 0);
        assert_eq!(run.player.current_hp, 80);
        assert_eq!(run.player.statuses.stacks("madness"), 2);

        run.apply_run_effect(&RunEffect::TakeDamage { amount: 200 }).unwrap();
        assert_eq!(run.player.current_hp, 0);
        assert!(run.is_over);
        assert!(!run.won);
    }

    #[test]
    fn failing_run_effects_roll_back_earlier_ones() {
        let mut run = run();
        let before = run.clone();
        let result = run.apply_run_effects(&[
            RunEffect::GainGold { amount: 25 },
            RunEffect::AddCard {
                card_id: CardId::from_static("cleave"),
            },
            RunEffect::UpgradeCard { deck_index: 40 },
        ]);
        assert_eq!(result, Err(RunError::InvalidIndex { index: 40, len: 13 }));
        assert_eq!(run, before);
    }

    #[test]
    fn relics_are_not_duplicated() {
        let mut run = run();
        assert!(!run.add_relic(BURNING_BLOOD));
        run.apply_run_effect(&RunEffect::AddRelic {
            relic_id: BURNING_BLOOD,
        })
        .unwrap();
        assert_eq!(run.relics.len(), 1);
    }

    #[test]
    fn added_cards_get_fresh_instance_ids() {
        let mut run = run();
        assert_eq!(run.add_card(CardId::from_static("strike")).id, "strike_5");
        assert_eq!(run.add_card(CardId::from_static("cleave")).id, "cleave_1");
        assert_eq!(run.add_card(CardId::from_static("cleave")).id, "cleave_2");
    }

    #[test]
    fn upgrading_keeps_the_instance() {
        let mut run = run();
        assert_eq!(run.upgrade_card(0).unwrap(), "strike+");
        assert_eq!(run.deck[0].id, "strike_1");
        assert_eq!(
            run.upgrade_card(0),
            Err(RunError::CardNotUpgradeable(CardId::from_static("strike+")))
        );
        assert_eq!(
            run.apply_run_effect(&RunEffect::UpgradeCard { deck_index: 40 }),
            Err(RunError::InvalidIndex { index: 40, len: 12 })
        );
    }

    #[test]
    fn resting_heals_thirty_percent() {
        let mut run = run();
        run.player.current_hp = 40;
        assert_eq!(run.rest().unwrap(), 24);
        assert_eq!(run.player.current_hp, 64);
    }

    #[test]
    fn battle_only_consumables_stay_in_the_belt() {
        let mut run = run();
        run.player.current_hp = 30;
        run.add_consumable(ConsumableId::from_static("block_potion")).unwrap();
        run.add_consumable(ConsumableId::from_static("healing_potion")).unwrap();

        assert!(matches!(
            run.use_consumable(0),
            Err(RunError::ConsumableNotUsable(_))
        ));
        assert_eq!(run.use_consumable(1).unwrap(), "healing_potion");
        assert_eq!(run.player.current_hp, 50);
        assert_eq!(run.consumables.len(), 1);
    }

    #[test]
    fn lost_battles_end_the_run() {
        let mut run = run();
        run.enter_node("0_0").unwrap();
        run.complete_current_node().unwrap();
        let first = run.accessible_nodes()[0].id.clone();
        run.enter_node(&first).unwrap();

        let mut engine = run.start_battle().unwrap();
        engine.start();
        for _ in 0..200 {
            if engine.is_over() {
                break;
            }
            engine.end_turn();
        }

        run.apply_battle_result(&engine);
        assert_eq!(engine.outcome(), Some(false));
        assert_eq!(run.player.current_hp, 0);
        assert!(run.is_over);
        assert!(!run.won);
    }
}
