//! Roulette session state.
//!
//! Holds the current selection, the two busy flags and the generated post,
//! and decides which actions are currently allowed. Both the GUI and the
//! CLI shell drive a `Roulette`; the async work itself (spinning,
//! generating) lives in [`crate::spin`] and [`crate::generate`].

use crate::generate::{self, FALLBACK_POST, TextGenerator};
use crate::selection::Selection;
use crate::share;
use crate::spin::SpinFrame;
use crate::variant::Variant;

#[derive(Debug, Clone)]
pub struct Roulette {
    variant: Variant,
    selection: Selection,
    spinning: bool,
    generating: bool,
    post: String,
}

impl Roulette {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            selection: variant.initial_selection(),
            spinning: false,
            generating: false,
            post: String::new(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn post(&self) -> &str {
        &self.post
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn is_busy(&self) -> bool {
        self.spinning || self.generating
    }

    /// Switch variant, resetting selection and post. Rejected while busy.
    pub fn set_variant(&mut self, variant: Variant) -> bool {
        if self.is_busy() {
            return false;
        }
        if variant != self.variant {
            *self = Self::new(variant);
        }
        true
    }

    /// Replace the selection outright. Rejected while busy or if the slot
    /// layout does not match the variant.
    pub fn set_selection(&mut self, selection: Selection) -> bool {
        if self.is_busy() {
            return false;
        }
        let kinds: Vec<_> = selection.picks().iter().map(|p| p.kind).collect();
        if kinds != self.variant.slots() || !selection.is_valid() {
            return false;
        }
        self.selection = selection;
        true
    }

    pub fn can_spin(&self) -> bool {
        !self.is_busy()
    }

    pub fn can_generate(&self) -> bool {
        !self.is_busy() && self.selection.is_complete()
    }

    pub fn can_share(&self) -> bool {
        !self.post.is_empty()
    }

    /// Mark a spin as started. Returns false if a spin or generation is
    /// already running.
    pub fn begin_spin(&mut self) -> bool {
        if !self.can_spin() {
            return false;
        }
        self.spinning = true;
        true
    }

    /// Apply a published spin frame; the finished frame ends the spin
    pub fn apply_frame(&mut self, frame: &SpinFrame) {
        if !self.spinning {
            return;
        }
        self.selection = frame.selection.clone();
        if frame.finished {
            self.spinning = false;
        }
    }

    /// Force the spin to end, keeping the current selection
    pub fn abort_spin(&mut self) {
        self.spinning = false;
    }

    /// Mark generation as started and return the prompt to send.
    ///
    /// Returns `None` (and changes nothing) while busy or when any slot
    /// name is empty.
    pub fn begin_generation(&mut self) -> Option<String> {
        if !self.can_generate() {
            return None;
        }
        self.generating = true;
        Some(self.variant.prompt(&self.selection.names()))
    }

    /// Store the generation result and clear the busy flag
    pub fn finish_generation(&mut self, post: String) {
        self.post = post;
        self.generating = false;
    }

    /// Store the fallback text after a generation task died
    pub fn fail_generation(&mut self) {
        self.finish_generation(FALLBACK_POST.to_string());
    }

    /// Run a full generation in place. No-op if generation is not allowed.
    pub async fn generate<G: TextGenerator>(&mut self, generator: &G) -> bool {
        let Some(prompt) = self.begin_generation() else {
            return false;
        };
        let post = generate::generate_post(generator, &prompt).await;
        self.finish_generation(post);
        true
    }

    /// Compose URL for the current post, if any
    pub fn share_url(&self) -> Option<String> {
        share::compose_url(&self.post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Item, SlotKind};
    use crate::generate::mock::MockGenerator;
    use crate::selection::SlotPick;

    fn finished_frame(selection: Selection) -> SpinFrame {
        SpinFrame { selection, tick: 20, total: 20, finished: true }
    }

    #[test]
    fn test_new_session() {
        let roulette = Roulette::new(Variant::Fusion);
        assert_eq!(roulette.selection().names(), vec!["ラーメン", "カレー"]);
        assert!(roulette.post().is_empty());
        assert!(roulette.can_spin());
        assert!(roulette.can_generate());
        assert!(!roulette.can_share());
    }

    #[test]
    fn test_spin_blocks_spin_and_generation() {
        let mut roulette = Roulette::new(Variant::Fusion);
        assert!(roulette.begin_spin());
        assert!(!roulette.begin_spin());
        assert!(!roulette.can_generate());
        assert!(roulette.begin_generation().is_none());
        assert!(!roulette.set_variant(Variant::Chef));
    }

    #[test]
    fn test_frames_update_selection_until_finished() {
        let mut roulette = Roulette::new(Variant::Fusion);
        roulette.begin_spin();

        let mid = Selection::initial(&[SlotKind::Dish, SlotKind::Dish]);
        roulette.apply_frame(&SpinFrame { selection: mid.clone(), tick: 3, total: 20, finished: false });
        assert!(roulette.is_spinning());
        assert_eq!(roulette.selection(), &mid);

        roulette.apply_frame(&finished_frame(mid));
        assert!(!roulette.is_spinning());
        assert!(roulette.can_generate());
    }

    #[test]
    fn test_frames_ignored_when_not_spinning() {
        let mut roulette = Roulette::new(Variant::Daily);
        let before = roulette.selection().clone();
        let other = Selection::from_picks(vec![SlotPick { kind: SlotKind::Dish, item: crate::catalog::DISHES[5] }]);
        roulette.apply_frame(&finished_frame(other));
        assert_eq!(roulette.selection(), &before);
    }

    #[test]
    fn test_generation_blocks_spin() {
        let mut roulette = Roulette::new(Variant::Fusion);
        let prompt = roulette.begin_generation().unwrap();
        assert!(prompt.contains("ラーメンとカレー"));
        assert!(roulette.is_generating());
        assert!(!roulette.begin_spin());
        assert!(roulette.begin_generation().is_none());

        roulette.finish_generation("done".to_string());
        assert!(!roulette.is_generating());
        assert!(roulette.can_spin());
        assert_eq!(roulette.post(), "done");
    }

    #[tokio::test]
    async fn test_generate_success_and_share() {
        let mut roulette = Roulette::new(Variant::Fusion);
        let generator = MockGenerator::replying("テスト投稿");

        assert!(roulette.generate(&generator).await);
        assert_eq!(roulette.post(), "テスト投稿");
        assert!(!roulette.is_generating());

        let url = roulette.share_url().unwrap();
        assert!(url.contains("text=%E3%83%86%E3%82%B9%E3%83%88%E6%8A%95%E7%A8%BF"));
    }

    #[tokio::test]
    async fn test_generate_failure_sets_fallback() {
        let mut roulette = Roulette::new(Variant::Fusion);
        roulette.finish_generation("old post".to_string());

        assert!(roulette.generate(&MockGenerator::failing()).await);
        assert_eq!(roulette.post(), "投稿の生成中にエラーが発生しました。");
        assert!(!roulette.is_generating());
    }

    #[tokio::test]
    async fn test_generate_skipped_for_empty_name() {
        let mut roulette = Roulette::new(Variant::Daily);
        roulette.selection = Selection::from_picks(vec![SlotPick {
            kind: SlotKind::Dish,
            item: Item { name: "", icon: "❓" },
        }]);

        let generator = MockGenerator::replying("unused");
        assert!(!roulette.generate(&generator).await);
        assert_eq!(generator.call_count(), 0);
        assert!(roulette.post().is_empty());
    }

    #[tokio::test]
    async fn test_generate_sends_variant_prompt() {
        let mut roulette = Roulette::new(Variant::Secret);
        let generator = MockGenerator::replying("ok");
        roulette.generate(&generator).await;

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], Variant::Secret.prompt(&roulette.selection().names()));
    }

    #[test]
    fn test_share_requires_post() {
        let roulette = Roulette::new(Variant::Fusion);
        assert!(roulette.share_url().is_none());
    }

    #[test]
    fn test_set_variant_resets_state() {
        let mut roulette = Roulette::new(Variant::Fusion);
        roulette.finish_generation("post".to_string());
        assert!(roulette.set_variant(Variant::Chef));
        assert_eq!(roulette.variant(), Variant::Chef);
        assert_eq!(roulette.selection().len(), 3);
        assert!(roulette.post().is_empty());
    }

    #[test]
    fn test_set_selection_checks_layout() {
        let mut roulette = Roulette::new(Variant::Fusion);
        assert!(!roulette.set_selection(Variant::Chef.initial_selection()));
        let sushi = SlotKind::Dish.find("寿司").unwrap();
        let pizza = SlotKind::Dish.find("ピザ").unwrap();
        let picked = Selection::from_picks(vec![
            SlotPick { kind: SlotKind::Dish, item: sushi },
            SlotPick { kind: SlotKind::Dish, item: pizza },
        ]);
        assert!(roulette.set_selection(picked));
        assert_eq!(roulette.selection().names(), vec!["寿司", "ピザ"]);
    }
}
