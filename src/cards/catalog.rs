//! The card catalog: an explicitly constructed, immutable registry of
//! card definitions.
//!
//! Sessions receive a `&CardCatalog` at creation; there is no process-wide
//! singleton, so concurrent rooms share nothing mutable. The standard
//! catalog is the 15-card set of the original game, one copy each per deck.

use rustc_hash::FxHashMap;

use super::definition::{
    CardDefinition, CardId, CardType, EffectKind, EffectSpec, EffectTiming, PowerFormula,
};
use super::instance::{CardInstance, InstanceId};

/// Display names referenced by effects and formulas.
///
/// 锻炉, 板甲 and 森林 have no standard-catalog entry; the forge combo and
/// the boar bonus reference them all the same, exactly as the original
/// rules text does.
pub mod names {
    pub const WORKER: &str = "辛勤的苦工";
    pub const PACK_HORSE: &str = "驮用马";
    pub const MAGE: &str = "法师";
    pub const APPRENTICE: &str = "见习冒险者";
    pub const DWARVEN_BLACKSMITH: &str = "矮人铁匠";
    pub const BOAR: &str = "野猪";
    pub const MILITIA: &str = "民兵";
    pub const WARRIOR: &str = "战士";
    pub const GRIFFIN: &str = "狮鹫";
    pub const FARMLAND: &str = "农田";
    pub const WEAPON_SHOP: &str = "橡木武器店";
    pub const SMITHY: &str = "铁匠铺";
    pub const ROAST_TURKEY: &str = "金牌烤火鸡";
    pub const LIFE_POTION: &str = "生命药水";
    pub const MAGIC_MISSILE: &str = "魔法飞弹";

    pub const FURNACE: &str = "锻炉";
    pub const PLATE_ARMOR: &str = "板甲";
    pub const FOREST: &str = "森林";
}

/// Keywords used across the standard catalog.
pub mod keywords {
    pub const RESIDENT: &str = "居民";
    pub const BEAST: &str = "野兽";
    pub const VEHICLE: &str = "载具";
    pub const MAGIC: &str = "魔法";
    pub const PROFESSIONAL: &str = "职业者";
    pub const SOLDIER: &str = "士兵";
    pub const FLYING: &str = "飞行";
    pub const NATURE: &str = "自然";
    pub const FARMING: &str = "务农";
    pub const WEAPON: &str = "武器";
    pub const ARMOR: &str = "护甲";
    pub const OBJECT: &str = "物件";
    pub const BUILDING: &str = "建筑";
    pub const FOOD: &str = "食物";
    pub const POTION: &str = "药剂";
    pub const ARCANE: &str = "奥术";
    pub const HUNTER: &str = "猎人";
    pub const FARMER: &str = "农夫";
    pub const ADVENTURER: &str = "冒险者";
    pub const WARRIOR: &str = "战士";
}

/// Immutable registry of card definitions with id lookup.
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<CardDefinition>,
    by_id: FxHashMap<CardId, usize>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if self.by_id.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.by_id.insert(card.id, self.cards.len());
        self.cards.push(card);
    }

    /// Get a definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.by_id.get(&id).map(|&idx| &self.cards[idx])
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    /// Deal one fresh instance of every definition, in catalog order.
    ///
    /// `next_instance_id` is the session's instance-id allocator; it is
    /// advanced past the dealt cards. Shuffling is the caller's job.
    #[must_use]
    pub fn create_deck(&self, next_instance_id: &mut u32) -> Vec<CardInstance> {
        self.cards
            .iter()
            .map(|def| {
                let id = InstanceId::new(*next_instance_id);
                *next_instance_id += 1;
                CardInstance::new(id, def.clone())
            })
            .collect()
    }

    /// The standard 15-card set.
    #[must_use]
    pub fn standard() -> Self {
        use keywords as kw;

        let mut catalog = Self::new();

        catalog.register(
            CardDefinition::new(CardId::new(1), names::WORKER, CardType::Unit)
                .with_keywords([kw::RESIDENT])
                .with_base_power(1)
                .with_cost(1)
                .with_effect(
                    EffectSpec::new(EffectTiming::OnDeploy, EffectKind::ExtraPlay)
                        .with_text("在这张牌进场后，你可以立即从手牌中额外打出一张牌"),
                ),
        );

        catalog.register(
            CardDefinition::new(CardId::new(2), names::PACK_HORSE, CardType::Unit)
                .with_keywords([kw::BEAST, kw::VEHICLE])
                .with_attribute("土")
                .with_base_power(1)
                .with_cost(1)
                .with_effect(
                    EffectSpec::new(EffectTiming::OnDeploy, EffectKind::CreateSlot)
                        .with_text("创建一个额外槽位"),
                )
                .with_effect(
                    EffectSpec::new(EffectTiming::OnField, EffectKind::ModifyPower)
                        .targeting([kw::WEAPON, kw::ARMOR, kw::OBJECT])
                        .value(2)
                        .with_text("如果部署的卡牌带有\"武器/护甲/物件\"的关键词，这张牌的战力+2"),
                ),
        );

        catalog.register(
            CardDefinition::new(CardId::new(3), names::MAGE, CardType::Unit)
                .with_keywords([kw::MAGIC, kw::PROFESSIONAL])
                .with_base_power(1)
                .with_cost(2)
                .with_effect(
                    EffectSpec::new(EffectTiming::OnOtherPlay, EffectKind::ModifyPower)
                        .targeting([kw::MAGIC])
                        .value(2)
                        .stacking()
                        .only_for(CardType::Tactic)
                        .with_text("每当你打出一张拥有\"魔法\"关键词的战术牌后，这张牌的战力+2"),
                ),
        );

        catalog.register(
            CardDefinition::new(CardId::new(4), names::APPRENTICE, CardType::Unit)
                .with_keywords([kw::RESIDENT, kw::PROFESSIONAL])
                .with_base_power(2)
                .with_cost(2)
                .with_formula(PowerFormula::UniqueKeywords)
                .with_effect(
                    EffectSpec::new(EffectTiming::OnField, EffectKind::Conditional)
                        .with_text("你的场上每拥有一种不同的关键词，这张牌的战力+1（不计算这张牌上的关键词）"),
                ),
        );

        catalog.register(
            CardDefinition::new(CardId::new(5), names::DWARVEN_BLACKSMITH, CardType::Unit)
                .with_keywords([kw::RESIDENT])
                .with_attribute("钢")
                .with_base_power(2)
                .with_cost(1)
                .with_effect(
                    EffectSpec::new(EffectTiming::OnOtherPlay, EffectKind::ModifyPower)
                        .targeting([kw::WEAPON, kw::ARMOR])
                        .value(2)
                        .to_played_card()
                        .with_text("每当你打出一张带有\"武器/护甲\"关键词的卡牌，那张卡牌的战力+2"),
                ),
        );

        catalog.register(
            CardDefinition::new(CardId::new(6), names::BOAR, CardType::Unit)
                .with_keywords([kw::BEAST])
                .with_attribute("土")
                .with_base_power(3)
                .with_cost(1)
                .with_formula(PowerFormula::WildInstinct)
                .with_effect(
                    EffectSpec::new(EffectTiming::OnField, EffectKind::Conditional)
                        .targeting([kw::HUNTER, kw::FARMER, kw::ADVENTURER])
                        .value(-2)
                        .with_text("如果你场上拥有\"猎人/农夫/冒险者\"关键词的卡牌，这张卡的战力-2"),
                )
                .with_effect(
                    EffectSpec::new(EffectTiming::OnField, EffectKind::Conditional)
                        .value(2)
                        .with_text("如果你场上拥有\"农田/森林\"名称的卡牌，这张牌的战力+2"),
                ),
        );

        catalog.register(
            CardDefinition::new(CardId::new(7), names::MILITIA, CardType::Unit)
                .with_keywords([kw::SOLDIER])
                .with_base_power(3)
                .with_cost(2)
                .with_effect(
                    EffectSpec::new(EffectTiming::OnDestroy, EffectKind::Protect)
                        .targeting([kw::RESIDENT])
                        .with_text("当你一名带有\"居民\"关键词的卡牌将要被摧毁时，可以用这张牌代替被摧毁"),
                ),
        );

        catalog.register(
            CardDefinition::new(CardId::new(8), names::WARRIOR, CardType::Unit)
                .with_keywords([kw::PROFESSIONAL])
                .with_base_power(3)
                .with_cost(2)
                .with_effect(
                    EffectSpec::new(EffectTiming::OnOtherPlay, EffectKind::ModifyPower)
                        .targeting([kw::WEAPON])
                        .value(1)
                        .stacking()
                        .with_text("每当你打出一张拥有\"武器\"关键词的卡牌后，这张牌的战力+1"),
                ),
        );

        catalog.register(
            CardDefinition::new(CardId::new(9), names::GRIFFIN, CardType::Unit)
                .with_keywords([kw::BEAST, kw::VEHICLE, kw::FLYING])
                .with_attribute("风")
                .with_base_power(5)
                .with_cost(3)
                .with_effect(
                    EffectSpec::new(EffectTiming::OnDeploy, EffectKind::CreateSlot)
                        .with_text("你可以将其他单位牌部署在这张牌上"),
                ),
        );

        catalog.register(
            CardDefinition::new(CardId::new(10), names::FARMLAND, CardType::Environment)
                .with_keywords([kw::NATURE, kw::FARMING])
                .with_attribute("土")
                .with_cost(1)
                .with_formula(PowerFormula::AttachedFarmhands)
                .with_effect(
                    EffectSpec::new(EffectTiming::OnField, EffectKind::Conditional)
                        .targeting([kw::FARMING])
                        .value(1)
                        .stacking()
                        .with_text("这张牌上每部署一张带有\"务农\"关键词的单位牌，这张牌的战力+1"),
                ),
        );

        catalog.register(
            CardDefinition::new(CardId::new(11), names::WEAPON_SHOP, CardType::Environment)
                .with_keywords([kw::WEAPON, kw::BUILDING])
                .with_attribute("木")
                .with_cost(2)
                .with_effect(
                    EffectSpec::new(EffectTiming::OnField, EffectKind::ModifyPower)
                        .targeting([kw::WARRIOR, kw::SOLDIER, kw::ADVENTURER])
                        .value(3)
                        .with_text("你的带有\"战士/士兵/冒险者\"关键词的卡牌战力+3"),
                ),
        );

        catalog.register(
            CardDefinition::new(CardId::new(12), names::SMITHY, CardType::Environment)
                .with_keywords([kw::ARMOR, kw::BUILDING])
                .with_attribute("钢")
                .with_cost(2)
                .with_formula(PowerFormula::ForgeTriad)
                .with_effect(
                    EffectSpec::new(EffectTiming::OnField, EffectKind::Conditional)
                        .value(15)
                        .with_text("如果你拥有\"矮人铁匠\"，\"锻炉\"和\"板甲\"，这张牌的战力+15"),
                ),
        );

        catalog.register(
            CardDefinition::new(CardId::new(13), names::ROAST_TURKEY, CardType::Tactic)
                .with_keywords([kw::FOOD])
                .with_attribute("火")
                .with_cost(1)
                .with_effect(
                    EffectSpec::new(EffectTiming::OnReveal, EffectKind::ModifyPower)
                        .targeting([kw::RESIDENT, kw::ADVENTURER])
                        .value(2)
                        .with_text("揭示后为你场上一张带有\"居民/冒险者\"关键词的卡牌战力+2"),
                ),
        );

        catalog.register(
            CardDefinition::new(CardId::new(14), names::LIFE_POTION, CardType::Tactic)
                .with_keywords([kw::POTION])
                .with_cost(1)
                .with_effect(
                    EffectSpec::new(EffectTiming::OnReveal, EffectKind::ModifyPower)
                        .targeting([kw::PROFESSIONAL])
                        .value(2)
                        .with_text("揭示后为你的场上带有\"职业者\"关键词的卡牌战力+2"),
                ),
        );

        catalog.register(
            CardDefinition::new(CardId::new(15), names::MAGIC_MISSILE, CardType::Tactic)
                .with_keywords([kw::MAGIC, kw::ARCANE])
                .with_cost(1)
                .with_effect(
                    EffectSpec::new(EffectTiming::OnReveal, EffectKind::ModifyCost)
                        .value(-2)
                        .with_text("揭示后使你左手边第一名玩家当前能量值-2"),
                ),
        );

        catalog
    }
}
