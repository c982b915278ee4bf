//! Box that recolours itself when interacted with.

use glam::Vec3;
use holdfast_scene::ObjectId;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::interaction::{Interactable, InteractionStatus, Interactor};

/// Always-available interactable that assigns itself a random colour.
///
/// Colours are drawn from a per-object seeded RNG, so a given seed yields the
/// same colour sequence on every run.
#[derive(Debug, Clone)]
pub struct ColorChangerBox {
    prompt: String,
    color: Vec3,
    changes: u32,
    rng: ChaCha8Rng,
}

impl ColorChangerBox {
    /// Default prompt.
    pub const DEFAULT_PROMPT: &'static str = "[E] change color";

    /// Creates a white box whose colour sequence is derived from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            prompt: Self::DEFAULT_PROMPT.to_owned(),
            color: Vec3::ONE,
            changes: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Replaces the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Current colour as linear RGB in `[0, 1]`.
    #[must_use]
    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// Number of times the colour has changed.
    #[must_use]
    pub fn changes(&self) -> u32 {
        self.changes
    }
}

impl Interactable for ColorChangerBox {
    fn interaction_status(&self, _hand_is_full: bool) -> InteractionStatus {
        InteractionStatus::available(self.prompt.clone())
    }

    fn interact(&mut self, this: ObjectId, _interactor: &mut dyn Interactor) {
        let hue: f32 = self.rng.gen();
        let saturation: f32 = self.rng.gen();
        let value: f32 = self.rng.gen();
        self.color = hsv_to_rgb(hue, saturation, value);
        self.changes += 1;
        info!(object = %this, color = ?self.color, "box recoloured");
    }
}

/// Converts HSV (all components in `[0, 1]`) to RGB.
fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Vec3 {
    let h = (hue.rem_euclid(1.0)) * 6.0;
    let chroma = value * saturation;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let m = value - chroma;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    Vec3::new(r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullInteractor;

    impl Interactor for NullInteractor {
        fn origin(&self) -> Vec3 {
            Vec3::ZERO
        }

        fn pick_up_object(&mut self, _object: ObjectId) {
            panic!("colour changer must not request pickup");
        }
    }

    #[test]
    fn available_regardless_of_hand() {
        let changer = ColorChangerBox::new(1);
        assert!(changer.interaction_status(false).can_interact);
        assert!(changer.interaction_status(true).can_interact);
        assert_eq!(changer.interaction_status(true).prompt_message, "[E] change color");
    }

    #[test]
    fn interact_changes_color_without_pickup() {
        let mut changer = ColorChangerBox::new(42);
        changer.interact(ObjectId::new(1), &mut NullInteractor);
        assert_eq!(changer.changes(), 1);
        let c = changer.color();
        for channel in [c.x, c.y, c.z] {
            assert!((0.0..=1.0).contains(&channel));
        }
    }

    #[test]
    fn same_seed_same_colors() {
        let mut a = ColorChangerBox::new(9);
        let mut b = ColorChangerBox::new(9);
        for _ in 0..3 {
            a.interact(ObjectId::new(1), &mut NullInteractor);
            b.interact(ObjectId::new(1), &mut NullInteractor);
            assert_eq!(a.color(), b.color());
        }
    }

    #[test]
    fn hsv_primaries() {
        assert!(hsv_to_rgb(0.0, 1.0, 1.0).abs_diff_eq(Vec3::X, 1e-5));
        assert!(hsv_to_rgb(0.25, 1.0, 1.0).abs_diff_eq(Vec3::new(0.5, 1.0, 0.0), 1e-5));
        assert!(hsv_to_rgb(0.5, 1.0, 1.0).abs_diff_eq(Vec3::new(0.0, 1.0, 1.0), 1e-5));
        assert!(hsv_to_rgb(0.75, 1.0, 1.0).abs_diff_eq(Vec3::new(0.5, 0.0, 1.0), 1e-5));
        assert!(hsv_to_rgb(0.5, 0.0, 0.5).abs_diff_eq(Vec3::splat(0.5), 1e-5));
    }
}
