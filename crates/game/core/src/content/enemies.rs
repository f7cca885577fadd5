//! Enemy kinds and their decision policies.

use std::sync::OnceLock;

use super::Registry;
use super::statuses::{FRAIL, MADNESS, POISON, STRENGTH, VULNERABLE, WEAK};
use crate::action::EffectTarget::Player;
use crate::ai::{AiContext, EnemyMove, IntentCategory};
use crate::ids::EnemyId;
use crate::rng::SeededRng;

/// Strength of an enemy within its act.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EnemyTier {
    Normal,
    Elite,
    Boss,
}

/// Behavior of one enemy kind.
pub trait EnemyDefinition: Send + Sync {
    fn id(&self) -> EnemyId;

    fn name(&self) -> &'static str;

    /// Inclusive HP bounds rolled at battle start.
    fn hp_range(&self) -> (i32, i32);

    fn tier(&self) -> EnemyTier {
        EnemyTier::Normal
    }

    /// Picks the next move. May draw from `rng`; must not touch anything else.
    fn choose_move(&self, ctx: &AiContext<'_>, rng: &mut SeededRng) -> EnemyMove;
}

use IntentCategory::{Attack, Buff, Debuff, Defend, Mixed};

// ============================================================================
// Act 1
// ============================================================================

struct JawWorm;

impl EnemyDefinition for JawWorm {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("jaw_worm")
    }
    fn name(&self) -> &'static str {
        "Jaw Worm"
    }
    fn hp_range(&self) -> (i32, i32) {
        (40, 44)
    }
    fn choose_move(&self, ctx: &AiContext<'_>, rng: &mut SeededRng) -> EnemyMove {
        let me = ctx.me();
        let chomp = || EnemyMove::new(Attack, "Chomp 11").hit(me, 11);
        let bellow = || EnemyMove::new(Buff, "Bellow: Strength +3").apply(me, STRENGTH, 3);

        // rolled before the turn-1 branch
        let roll = rng.next_int(100);
        if ctx.turn == 1 {
            return if roll < 75 { chomp() } else { bellow() };
        }
        if roll < 45 {
            chomp()
        } else if roll < 75 {
            bellow()
        } else {
            EnemyMove::new(Attack, "Thrash 7").hit(me, 7)
        }
    }
}

struct Cultist;

impl EnemyDefinition for Cultist {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("cultist")
    }
    fn name(&self) -> &'static str {
        "Cultist"
    }
    fn hp_range(&self) -> (i32, i32) {
        (48, 54)
    }
    fn choose_move(&self, ctx: &AiContext<'_>, _rng: &mut SeededRng) -> EnemyMove {
        let me = ctx.me();
        if ctx.turn == 1 {
            EnemyMove::new(Buff, "Incantation: Strength +3").apply(me, STRENGTH, 3)
        } else {
            EnemyMove::new(Attack, "Dark Strike 6").hit(me, 6)
        }
    }
}

/// Both louse colors share one policy.
fn louse_move(ctx: &AiContext<'_>, rng: &mut SeededRng) -> EnemyMove {
    let me = ctx.me();
    if rng.next_int(100) < 75 {
        EnemyMove::new(Attack, "Bite 6").hit(me, 6)
    } else {
        EnemyMove::new(Buff, "Curl Up: Strength +3").apply(me, STRENGTH, 3)
    }
}

struct LouseGreen;

impl EnemyDefinition for LouseGreen {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("louse_green")
    }
    fn name(&self) -> &'static str {
        "Green Louse"
    }
    fn hp_range(&self) -> (i32, i32) {
        (11, 17)
    }
    fn choose_move(&self, ctx: &AiContext<'_>, rng: &mut SeededRng) -> EnemyMove {
        louse_move(ctx, rng)
    }
}

struct LouseRed;

impl EnemyDefinition for LouseRed {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("louse_red")
    }
    fn name(&self) -> &'static str {
        "Red Louse"
    }
    fn hp_range(&self) -> (i32, i32) {
        (10, 15)
    }
    fn choose_move(&self, ctx: &AiContext<'_>, rng: &mut SeededRng) -> EnemyMove {
        louse_move(ctx, rng)
    }
}

struct SporeBeast;

impl EnemyDefinition for SporeBeast {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("spore_beast")
    }
    fn name(&self) -> &'static str {
        "Spore Beast"
    }
    fn hp_range(&self) -> (i32, i32) {
        (24, 28)
    }
    fn choose_move(&self, ctx: &AiContext<'_>, rng: &mut SeededRng) -> EnemyMove {
        let me = ctx.me();
        let spray = || {
            EnemyMove::new(Mixed, "Spore Spray 5 + Frail 1")
                .hit(me, 5)
                .apply(Player, FRAIL, 1)
        };
        // turn 1 is fixed and does not roll
        if ctx.turn == 1 || rng.next_int(100) < 65 {
            spray()
        } else {
            EnemyMove::new(Defend, "Spore Shell: Block 10").block(me, 10)
        }
    }
}

/// Both acid slimes attack or smear; only the numbers differ.
fn acid_slime_move(
    ctx: &AiContext<'_>,
    rng: &mut SeededRng,
    attack: i32,
    smear: i32,
) -> EnemyMove {
    let me = ctx.me();
    if rng.next_int(100) < 70 {
        EnemyMove::new(Attack, format!("Tackle {attack}")).hit(me, attack)
    } else {
        EnemyMove::new(Mixed, format!("Smear {smear} + Weak 1"))
            .hit(me, smear)
            .apply(Player, WEAK, 1)
    }
}

struct SlimeSmallAcid;

impl EnemyDefinition for SlimeSmallAcid {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("slime_small_acid")
    }
    fn name(&self) -> &'static str {
        "Small Acid Slime"
    }
    fn hp_range(&self) -> (i32, i32) {
        (20, 24)
    }
    fn choose_move(&self, ctx: &AiContext<'_>, rng: &mut SeededRng) -> EnemyMove {
        acid_slime_move(ctx, rng, 7, 4)
    }
}

struct SlimeMediumAcid;

impl EnemyDefinition for SlimeMediumAcid {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("slime_medium_acid")
    }
    fn name(&self) -> &'static str {
        "Acid Slime"
    }
    fn hp_range(&self) -> (i32, i32) {
        (28, 32)
    }
    fn tier(&self) -> EnemyTier {
        EnemyTier::Elite
    }
    fn choose_move(&self, ctx: &AiContext<'_>, rng: &mut SeededRng) -> EnemyMove {
        acid_slime_move(ctx, rng, 10, 7)
    }
}

struct StoneSentinel;

impl EnemyDefinition for StoneSentinel {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("stone_sentinel")
    }
    fn name(&self) -> &'static str {
        "Stone Sentinel"
    }
    fn hp_range(&self) -> (i32, i32) {
        (60, 66)
    }
    fn tier(&self) -> EnemyTier {
        EnemyTier::Elite
    }
    fn choose_move(&self, ctx: &AiContext<'_>, rng: &mut SeededRng) -> EnemyMove {
        let me = ctx.me();
        if ctx.turn == 1 {
            return EnemyMove::new(Defend, "Guard Stance: Block 18").block(me, 18);
        }
        let roll = rng.next_int(100);
        if roll < 45 {
            EnemyMove::new(Mixed, "Smash 16 + Vulnerable 1")
                .hit(me, 16)
                .apply(Player, VULNERABLE, 1)
        } else if roll < 80 {
            EnemyMove::new(Attack, "Double Slash 8×2").hit(me, 8).hit(me, 8)
        } else {
            EnemyMove::new(Mixed, "Hold Fast: Block 12 + Strength +1")
                .block(me, 12)
                .apply(me, STRENGTH, 1)
        }
    }
}

struct ToxicColossus;

impl EnemyDefinition for ToxicColossus {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("toxic_colossus")
    }
    fn name(&self) -> &'static str {
        "Toxic Colossus"
    }
    fn hp_range(&self) -> (i32, i32) {
        (95, 105)
    }
    fn tier(&self) -> EnemyTier {
        EnemyTier::Boss
    }
    fn choose_move(&self, ctx: &AiContext<'_>, _rng: &mut SeededRng) -> EnemyMove {
        let me = ctx.me();
        match ctx.turn.saturating_sub(1) % 4 {
            0 => EnemyMove::new(Mixed, "Toxic Cloud")
                .apply(me, STRENGTH, 1)
                .block(me, 8)
                .apply(Player, POISON, 3),
            1 => EnemyMove::new(Attack, "Crush 14").hit(me, 14),
            2 => EnemyMove::new(Mixed, "Corrode 8 + Weak 2")
                .hit(me, 8)
                .apply(Player, WEAK, 2),
            _ => EnemyMove::new(Mixed, "Flail 6×2 + Frail 1")
                .hit(me, 6)
                .hit(me, 6)
                .apply(Player, FRAIL, 1),
        }
    }
}

// ============================================================================
// Act 2
// ============================================================================

struct ShadowStalker;

impl EnemyDefinition for ShadowStalker {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("shadow_stalker")
    }
    fn name(&self) -> &'static str {
        "Shadow Stalker"
    }
    fn hp_range(&self) -> (i32, i32) {
        (32, 36)
    }
    fn choose_move(&self, ctx: &AiContext<'_>, rng: &mut SeededRng) -> EnemyMove {
        let me = ctx.me();
        if ctx.turn == 1 {
            return EnemyMove::new(Debuff, "Shadow Veil: Weak 2").apply(Player, WEAK, 2);
        }
        if rng.next_int(100) < 55 {
            EnemyMove::new(Attack, "Stab 10").hit(me, 10)
        } else {
            EnemyMove::new(Defend, "Fade: Block 12").block(me, 12)
        }
    }
}

struct ClockworkSentinel;

impl EnemyDefinition for ClockworkSentinel {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("clockwork_sentinel")
    }
    fn name(&self) -> &'static str {
        "Clockwork Sentinel"
    }
    fn hp_range(&self) -> (i32, i32) {
        (36, 40)
    }
    fn choose_move(&self, ctx: &AiContext<'_>, rng: &mut SeededRng) -> EnemyMove {
        let me = ctx.me();
        let roll = rng.next_int(100);
        if roll < 60 {
            EnemyMove::new(Attack, "Gear Strike 6×2").hit(me, 6).hit(me, 6)
        } else if roll < 85 {
            EnemyMove::new(Defend, "Plating: Block 10").block(me, 10)
        } else {
            EnemyMove::new(Buff, "Overclock: Strength +1").apply(me, STRENGTH, 1)
        }
    }
}

struct MadProphet;

impl EnemyDefinition for MadProphet {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("mad_prophet")
    }
    fn name(&self) -> &'static str {
        "Mad Prophet"
    }
    fn hp_range(&self) -> (i32, i32) {
        (50, 60)
    }
    fn tier(&self) -> EnemyTier {
        EnemyTier::Elite
    }
    fn choose_move(&self, ctx: &AiContext<'_>, _rng: &mut SeededRng) -> EnemyMove {
        let me = ctx.me();
        let chosen = if ctx.turn == 1 {
            EnemyMove::new(Buff, "Prophecy: Strength +2").apply(me, STRENGTH, 2)
        } else {
            match (ctx.turn - 2) % 3 {
                0 => EnemyMove::new(Mixed, "Mind Blast 10 + Madness 2")
                    .hit(me, 10)
                    .apply(Player, MADNESS, 2),
                1 => EnemyMove::new(Defend, "Ward: Block 15").block(me, 15),
                _ => EnemyMove::new(Mixed, "Revelation 14 + Madness 3")
                    .hit(me, 14)
                    .apply(Player, MADNESS, 3),
            }
        };
        // passive: every move whispers one more madness
        chosen.apply(Player, MADNESS, 1)
    }
}

struct TimeGuardian;

impl EnemyDefinition for TimeGuardian {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("time_guardian")
    }
    fn name(&self) -> &'static str {
        "Time Guardian"
    }
    fn hp_range(&self) -> (i32, i32) {
        (65, 75)
    }
    fn tier(&self) -> EnemyTier {
        EnemyTier::Elite
    }
    fn choose_move(&self, ctx: &AiContext<'_>, _rng: &mut SeededRng) -> EnemyMove {
        let me = ctx.me();
        if ctx.turn == 1 {
            return EnemyMove::new(Debuff, "Time Stasis: Frail 2").apply(Player, FRAIL, 2);
        }
        match (ctx.turn - 2) % 3 {
            0 => EnemyMove::new(Attack, "Time Slash 12").hit(me, 12),
            1 => EnemyMove::new(Mixed, "Acceleration: Strength +1 + Block 10")
                .apply(me, STRENGTH, 1)
                .block(me, 10),
            _ => EnemyMove::new(Attack, "Time Collapse 18").hit(me, 18),
        }
    }
}

struct RuneGuardian;

impl EnemyDefinition for RuneGuardian {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("rune_guardian")
    }
    fn name(&self) -> &'static str {
        "Rune Guardian"
    }
    fn hp_range(&self) -> (i32, i32) {
        (70, 76)
    }
    fn tier(&self) -> EnemyTier {
        EnemyTier::Elite
    }
    fn choose_move(&self, ctx: &AiContext<'_>, _rng: &mut SeededRng) -> EnemyMove {
        let me = ctx.me();
        if ctx.turn == 1 {
            return EnemyMove::new(Debuff, "Sunder: Vulnerable 2").apply(Player, VULNERABLE, 2);
        }
        match (ctx.turn - 2) % 3 {
            0 => EnemyMove::new(Attack, "Rune Smash 18").hit(me, 18),
            1 => EnemyMove::new(Defend, "Rune Shield: Block 20").block(me, 20),
            _ => EnemyMove::new(Attack, "Rune Flurry 9×2").hit(me, 9).hit(me, 9),
        }
    }
}

struct ChronoWatcher;

impl EnemyDefinition for ChronoWatcher {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("chrono_watcher")
    }
    fn name(&self) -> &'static str {
        "Chrono Watcher"
    }
    fn hp_range(&self) -> (i32, i32) {
        (110, 120)
    }
    fn tier(&self) -> EnemyTier {
        EnemyTier::Boss
    }
    fn choose_move(&self, ctx: &AiContext<'_>, _rng: &mut SeededRng) -> EnemyMove {
        let me = ctx.me();
        match ctx.turn.saturating_sub(1) % 3 {
            0 => EnemyMove::new(Mixed, "Time Warp")
                .apply(me, STRENGTH, 1)
                .apply(Player, POISON, 2)
                .apply(Player, FRAIL, 1),
            1 => EnemyMove::new(Attack, "Hour Hand 20").hit(me, 20),
            _ => EnemyMove::new(Attack, "Second Hand 8×2").hit(me, 8).hit(me, 8),
        }
    }
}

// ============================================================================
// Act 3
// ============================================================================

struct VoidWalker;

impl EnemyDefinition for VoidWalker {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("void_walker")
    }
    fn name(&self) -> &'static str {
        "Void Walker"
    }
    fn hp_range(&self) -> (i32, i32) {
        (42, 48)
    }
    fn choose_move(&self, ctx: &AiContext<'_>, rng: &mut SeededRng) -> EnemyMove {
        let me = ctx.me();
        let roll = rng.next_int(100);
        if roll < 40 {
            EnemyMove::new(Mixed, "Void Touch 10 + Vulnerable 1")
                .hit(me, 10)
                .apply(Player, VULNERABLE, 1)
        } else if roll < 70 {
            EnemyMove::new(Attack, "Void Rend 14").hit(me, 14)
        } else {
            EnemyMove::new(Defend, "Phase Shift: Block 12").block(me, 12)
        }
    }
}

struct DreamParasite;

impl EnemyDefinition for DreamParasite {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("dream_parasite")
    }
    fn name(&self) -> &'static str {
        "Dream Parasite"
    }
    fn hp_range(&self) -> (i32, i32) {
        (28, 34)
    }
    fn choose_move(&self, ctx: &AiContext<'_>, rng: &mut SeededRng) -> EnemyMove {
        let me = ctx.me();
        let roll = rng.next_int(100);
        if roll < 35 {
            EnemyMove::new(Debuff, "Nightmare: Weak 1 + Frail 1")
                .apply(Player, WEAK, 1)
                .apply(Player, FRAIL, 1)
        } else if roll < 70 {
            EnemyMove::new(Mixed, "Dream Gnaw 6 + Poison 3")
                .hit(me, 6)
                .apply(Player, POISON, 3)
        } else {
            EnemyMove::new(Mixed, "Life Drain 8").hit(me, 8).heal(me, 4)
        }
    }
}

struct CycleGuardian;

impl EnemyDefinition for CycleGuardian {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("cycle_guardian")
    }
    fn name(&self) -> &'static str {
        "Cycle Guardian"
    }
    fn hp_range(&self) -> (i32, i32) {
        (85, 95)
    }
    fn tier(&self) -> EnemyTier {
        EnemyTier::Elite
    }
    fn choose_move(&self, ctx: &AiContext<'_>, _rng: &mut SeededRng) -> EnemyMove {
        let me = ctx.me();
        match ctx.turn.saturating_sub(1) % 3 {
            0 => EnemyMove::new(Buff, "Empower: Strength +2").apply(me, STRENGTH, 2),
            1 => EnemyMove::new(Attack, "Samsara Slash 22").hit(me, 22),
            _ => EnemyMove::new(Mixed, "Counter Guard: Block 15 + 10")
                .block(me, 15)
                .hit(me, 10),
        }
    }
}

/// Final boss. A four-turn cycle that gains strength every lap.
struct SequenceProgenitor;

impl EnemyDefinition for SequenceProgenitor {
    fn id(&self) -> EnemyId {
        EnemyId::from_static("sequence_progenitor")
    }
    fn name(&self) -> &'static str {
        "Sequence Progenitor"
    }
    fn hp_range(&self) -> (i32, i32) {
        (150, 170)
    }
    fn tier(&self) -> EnemyTier {
        EnemyTier::Boss
    }
    fn choose_move(&self, ctx: &AiContext<'_>, _rng: &mut SeededRng) -> EnemyMove {
        let me = ctx.me();
        match ctx.turn.saturating_sub(1) % 4 {
            0 => EnemyMove::new(Mixed, "Fate Decree")
                .apply(me, STRENGTH, 1)
                .apply(Player, VULNERABLE, 2)
                .apply(Player, WEAK, 2),
            1 => EnemyMove::new(Attack, "Tentacle Frenzy 10×3")
                .hit(me, 10)
                .hit(me, 10)
                .hit(me, 10),
            2 => EnemyMove::new(Mixed, "Void Gaze 25 + Poison 3")
                .hit(me, 25)
                .apply(Player, POISON, 3),
            _ => EnemyMove::new(Mixed, "Cycle's End 35 + Heal 10")
                .hit(me, 35)
                .heal(me, 10),
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

static DEFINITIONS: &[&dyn EnemyDefinition] = &[
    &JawWorm,
    &Cultist,
    &LouseGreen,
    &LouseRed,
    &SporeBeast,
    &SlimeSmallAcid,
    &SlimeMediumAcid,
    &StoneSentinel,
    &ToxicColossus,
    &ShadowStalker,
    &ClockworkSentinel,
    &MadProphet,
    &TimeGuardian,
    &RuneGuardian,
    &ChronoWatcher,
    &VoidWalker,
    &DreamParasite,
    &CycleGuardian,
    &SequenceProgenitor,
];

/// The enemy table.
pub fn enemies() -> &'static Registry<EnemyId, dyn EnemyDefinition> {
    static REGISTRY: OnceLock<Registry<EnemyId, dyn EnemyDefinition>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        Registry::new(
            "enemy",
            DEFINITIONS.iter().map(|definition| (definition.id(), *definition)),
        )
    })
}

pub fn get_enemy(id: &str) -> Option<&'static dyn EnemyDefinition> {
    enemies().get(id)
}

/// Panics on an unknown id.
pub fn require_enemy(id: &str) -> &'static dyn EnemyDefinition {
    enemies().require(id)
}
