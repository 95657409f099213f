//! Roulette variants.
//!
//! A variant fixes the slot layout, how long the spin animates, the prompt
//! template, and whether the post comes from the remote model or a local
//! template.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::SlotKind;
use crate::selection::Selection;

/// Interval between spin ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Delay of the legacy one-shot re-roll
pub const LEGACY_REROLL_DELAY: Duration = Duration::from_millis(1000);

/// Default text-generation model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// How a variant produces its post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Ask the remote text-generation service
    Remote { model: &'static str },
    /// Fill a local template, no network involved
    Local,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// One dish: what's for dinner today
    Daily,
    /// Two dishes fused into a new one
    #[default]
    Fusion,
    /// A dish with a secret ingredient
    Secret,
    /// A cooking method applied to a dish, no text generation
    Method,
    /// Cooking method, secret ingredient and dish
    Chef,
}

impl Variant {
    pub fn all() -> &'static [Variant] {
        &[
            Variant::Daily,
            Variant::Fusion,
            Variant::Secret,
            Variant::Method,
            Variant::Chef,
        ]
    }

    /// Config/CLI identifier
    pub fn id(&self) -> &'static str {
        match self {
            Variant::Daily => "daily",
            Variant::Fusion => "fusion",
            Variant::Secret => "secret",
            Variant::Method => "method",
            Variant::Chef => "chef",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Daily => "今日のごはん",
            Variant::Fusion => "絶対1万リツイート超える君",
            Variant::Secret => "隠し味ルーレット",
            Variant::Method => "調理法ルーレット",
            Variant::Chef => "シェフの気まぐれ",
        }
    }

    pub fn slots(&self) -> &'static [SlotKind] {
        match self {
            Variant::Daily => &[SlotKind::Dish],
            Variant::Fusion => &[SlotKind::Dish, SlotKind::Dish],
            Variant::Secret => &[SlotKind::Ingredient, SlotKind::Dish],
            Variant::Method => &[SlotKind::Method, SlotKind::Dish],
            Variant::Chef => &[SlotKind::Method, SlotKind::Ingredient, SlotKind::Dish],
        }
    }

    /// Number of spin ticks before the roulette lands
    pub fn tick_count(&self) -> u32 {
        match self {
            Variant::Daily => 10,
            Variant::Fusion => 20,
            Variant::Secret => 15,
            Variant::Method => 20,
            Variant::Chef => 15,
        }
    }

    pub fn generation(&self) -> GenerationMode {
        match self {
            Variant::Method => GenerationMode::Local,
            _ => GenerationMode::Remote { model: DEFAULT_MODEL },
        }
    }

    pub fn initial_selection(&self) -> Selection {
        Selection::initial(self.slots())
    }

    /// Build the generation input for the given slot names.
    ///
    /// For remote variants this is the instruction sent to the model; for the
    /// local variant it is the finished post. Names are embedded verbatim.
    pub fn prompt(&self, names: &[&str]) -> String {
        let name = |i: usize| names.get(i).copied().unwrap_or_default();

        match self {
            Variant::Daily => format!(
                "Xで140文字以内のバズるツイートを作成してください。今日のごはんは{}に決まりました。読んだ人が思わず今日{}を食べたくなるような文章にしてください",
                name(0),
                name(0)
            ),
            Variant::Fusion => format!(
                "Xで140文字いないのバズるツイートを作成してください。{}と{}を組み合わせて新しい料理を作ります。投稿をみたら思わず試してみたくなるような文章にしてください",
                name(0),
                name(1)
            ),
            Variant::Secret => format!(
                "Xで140文字以内のバズるツイートを作成してください。{}に隠し味として{}を入れた新しい料理を作ります。投稿をみたら思わず試してみたくなるような文章にしてください",
                name(1),
                name(0)
            ),
            Variant::Method => format!(
                "今日の献立は「{}{}」に決定！ #レシピルーレット",
                name(0),
                name(1)
            ),
            Variant::Chef => format!(
                "Xで140文字以内のバズるツイートを作成してください。{}を隠し味にした{}{}を作ります。シェフになりきって、投稿をみたら思わず試してみたくなるような文章にしてください",
                name(1),
                name(0),
                name(2)
            ),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::all()
            .iter()
            .find(|v| v.id() == s)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Unknown variant: {}", s))
    }
}
