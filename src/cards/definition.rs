//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: identity,
//! type, keywords, cost, base power, its ordered effect list, and an
//! optional [`PowerFormula`].
//!
//! The formula is the tagged-variant replacement for the original rules'
//! name-keyed special cases: instead of the resolver string-matching on a
//! display name to decide how a card's power is derived, the definition
//! carries the variant and the resolver dispatches on it with one `match`.
//!
//! Instance-specific data (current power, stacked bonuses) is stored
//! separately in `CardInstance`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Unique identifier for a card definition.
///
/// Identifies the "type" of card (e.g. 法师), not a specific copy in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The three card types the rules distinguish.
///
/// Units occupy slots and score; environments occupy slots, score, and are
/// immune to destruction; tactics resolve on reveal and never persist on
/// the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Unit,
    Environment,
    Tactic,
}

/// When an effect fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTiming {
    /// Once, when the card is deployed from hand.
    OnDeploy,
    /// Continuously while the card is fielded; recomputed every full pass.
    OnField,
    /// Once per qualifying card the owner deploys while this card is fielded.
    OnOtherPlay,
    /// Once, when a tactic card resolves.
    OnReveal,
    /// When a card would be destroyed. Carried as data; destruction is not
    /// currently enforced by the state machine.
    OnDestroy,
}

/// What an effect does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Grant the owner one additional play this round.
    ExtraPlay,
    /// Add `value` to a card's power.
    ModifyPower,
    /// Add `value` to the opponent's current cost.
    ModifyCost,
    /// Append an extra field slot parented to this card's slot.
    CreateSlot,
    /// Rules-text marker for behavior expressed by a [`PowerFormula`].
    Conditional,
    /// Rules-text marker for substitution on destroy (not enforced).
    Protect,
}

/// Who receives an `OnOtherPlay` power bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectRecipient {
    /// The card carrying the effect (accumulates into its stacked bonus).
    Bearer,
    /// The card whose deployment triggered the effect (one-shot, no stack).
    PlayedCard,
}

/// Per-card power derivation that cannot be expressed as a flat modifier.
///
/// Dispatched by a single `match` in the effect resolver. Each variant
/// recomputes from the current board on every full pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerFormula {
    /// Base power plus one per distinct keyword across the owner's other
    /// fielded cards (见习冒险者).
    UniqueKeywords,
    /// Base power, -2 while any other fielded card carries a
    /// hunter/farmer/adventurer keyword, +2 while a 农田 or 森林 is fielded
    /// (野猪).
    WildInstinct,
    /// One point per farming-keyword unit occupying this card's extra
    /// slots; base power is ignored (农田).
    AttachedFarmhands,
    /// Base power plus 15 while 矮人铁匠, 锻炉 and 板甲 are all fielded
    /// (铁匠铺).
    ForgeTriad,
}

/// One entry in a card's ordered effect list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSpec {
    pub timing: EffectTiming,
    pub kind: EffectKind,
    /// Keywords the affected card must carry (any-of). Empty = unfiltered.
    pub target_keywords: Vec<String>,
    pub value: i32,
    /// Whether repeated triggers accumulate permanently.
    pub stackable: bool,
    /// Who an `OnOtherPlay` bonus lands on.
    pub recipient: EffectRecipient,
    /// Restrict `OnOtherPlay` triggering to deployments of this card type.
    pub requires_card_type: Option<CardType>,
    /// Display rules text.
    pub text: String,
}

impl EffectSpec {
    /// Create an effect with defaults: no keyword filter, value 0,
    /// non-stacking, bearer-targeted, any card type.
    #[must_use]
    pub fn new(timing: EffectTiming, kind: EffectKind) -> Self {
        Self {
            timing,
            kind,
            target_keywords: Vec::new(),
            value: 0,
            stackable: false,
            recipient: EffectRecipient::Bearer,
            requires_card_type: None,
            text: String::new(),
        }
    }

    /// Set the keyword filter (builder pattern).
    #[must_use]
    pub fn targeting<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the numeric value.
    #[must_use]
    pub fn value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }

    /// Mark the effect as permanently stacking.
    #[must_use]
    pub fn stacking(mut self) -> Self {
        self.stackable = true;
        self
    }

    /// Direct the bonus at the deployed card instead of the bearer.
    #[must_use]
    pub fn to_played_card(mut self) -> Self {
        self.recipient = EffectRecipient::PlayedCard;
        self
    }

    /// Only trigger for deployments of the given card type.
    #[must_use]
    pub fn only_for(mut self, card_type: CardType) -> Self {
        self.requires_card_type = Some(card_type);
        self
    }

    /// Set the display rules text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// Static card definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Display name. Keyword matching deliberately also searches this
    /// string, so names like 农田 carry implied keywords.
    pub name: String,

    /// Card type.
    pub card_type: CardType,

    /// Literal keyword set.
    pub keywords: Vec<String>,

    /// Elemental attribute (display data).
    pub attribute: String,

    /// Power before any modifier.
    pub base_power: i32,

    /// Deployment cost.
    pub cost: i32,

    /// Slots occupied when deployed.
    pub slot_required: u8,

    /// False for tactic cards, which never stay on the field.
    pub is_persistent: bool,

    /// Ordered effect list.
    pub effects: SmallVec<[EffectSpec; 2]>,

    /// Named power derivation, if this card has one.
    pub formula: Option<PowerFormula>,
}

impl CardDefinition {
    /// Create a new definition with defaults: no keywords, attribute 无,
    /// zero power, zero cost, one slot, persistent, no effects, no formula.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            name: name.into(),
            card_type,
            keywords: Vec::new(),
            attribute: "无".to_string(),
            base_power: 0,
            cost: 0,
            slot_required: 1,
            is_persistent: card_type != CardType::Tactic,
            effects: SmallVec::new(),
            formula: None,
        }
    }

    /// Set the keyword set (builder pattern).
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the elemental attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// Set the base power.
    #[must_use]
    pub fn with_base_power(mut self, power: i32) -> Self {
        self.base_power = power;
        self
    }

    /// Set the deployment cost.
    #[must_use]
    pub fn with_cost(mut self, cost: i32) -> Self {
        self.cost = cost;
        self
    }

    /// Append an effect.
    #[must_use]
    pub fn with_effect(mut self, effect: EffectSpec) -> Self {
        self.effects.push(effect);
        self
    }

    /// Attach a power formula.
    #[must_use]
    pub fn with_formula(mut self, formula: PowerFormula) -> Self {
        self.formula = Some(formula);
        self
    }

    /// Effects with the given timing, in definition order.
    pub fn effects_with_timing(
        &self,
        timing: EffectTiming,
    ) -> impl Iterator<Item = &EffectSpec> {
        self.effects.iter().filter(move |e| e.timing == timing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(3);
        assert_eq!(id.raw(), 3);
        assert_eq!(format!("{}", id), "Card(3)");
    }

    #[test]
    fn test_definition_builder() {
        let def = CardDefinition::new(CardId::new(1), "法师", CardType::Unit)
            .with_keywords(["魔法", "职业者"])
            .with_base_power(1)
            .with_cost(2)
            .with_effect(
                EffectSpec::new(EffectTiming::OnOtherPlay, EffectKind::ModifyPower)
                    .targeting(["魔法"])
                    .value(2)
                    .stacking()
                    .only_for(CardType::Tactic),
            );

        assert_eq!(def.name, "法师");
        assert_eq!(def.cost, 2);
        assert!(def.is_persistent);
        assert_eq!(def.effects.len(), 1);
        assert_eq!(def.effects[0].value, 2);
        assert!(def.effects[0].stackable);
        assert_eq!(def.effects[0].requires_card_type, Some(CardType::Tactic));
        assert_eq!(def.effects[0].recipient, EffectRecipient::Bearer);
    }

    #[test]
    fn test_tactic_defaults_non_persistent() {
        let def = CardDefinition::new(CardId::new(13), "金牌烤火鸡", CardType::Tactic);
        assert!(!def.is_persistent);
    }

    #[test]
    fn test_effects_with_timing() {
        let def = CardDefinition::new(CardId::new(2), "驮用马", CardType::Unit)
            .with_effect(EffectSpec::new(EffectTiming::OnDeploy, EffectKind::CreateSlot))
            .with_effect(
                EffectSpec::new(EffectTiming::OnField, EffectKind::ModifyPower)
                    .targeting(["武器", "护甲", "物件"])
                    .value(2),
            );

        let deploy: Vec<_> = def.effects_with_timing(EffectTiming::OnDeploy).collect();
        assert_eq!(deploy.len(), 1);
        assert_eq!(deploy[0].kind, EffectKind::CreateSlot);

        let field: Vec<_> = def.effects_with_timing(EffectTiming::OnField).collect();
        assert_eq!(field.len(), 1);
        assert_eq!(field[0].value, 2);
    }

    #[test]
    fn test_definition_serialization() {
        let def = CardDefinition::new(CardId::new(6), "野猪", CardType::Unit)
            .with_keywords(["野兽"])
            .with_base_power(3)
            .with_cost(1)
            .with_formula(PowerFormula::WildInstinct);

        let json = serde_json::to_string(&def).unwrap();
        let back: CardDefinition = serde_json::from_str(&json).unwrap();

        assert_eq!(def, back);
        assert_eq!(back.formula, Some(PowerFormula::WildInstinct));
    }
}
