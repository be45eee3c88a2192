//! Tea-ware gallery
//!
//! A cyclic index over a fixed list of pieces plus a purely cosmetic
//! rotation accumulator.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::consts::ROTATION_STEP_DEG;
use crate::{SetupError, cyclic_index};

/// Outline used to draw a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Silhouette {
    /// Round bowl or jar
    Bowl,
    /// Jian tea bowl, slightly narrower at the foot
    JianBowl,
    /// Bamboo whisk, flat top and rounded tines
    Whisk,
}

impl Silhouette {
    pub fn border_radius(self) -> &'static str {
        match self {
            Silhouette::Bowl => "50%",
            Silhouette::JianBowl => "50% 50% 40% 40%",
            Silhouette::Whisk => "0 0 50% 50%",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeaWare {
    pub name: String,
    pub description: String,
    pub color: Rgb,
    pub silhouette: Silhouette,
}

impl TeaWare {
    fn new(name: &str, description: &str, color: u32, silhouette: Silhouette) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            color: Rgb::from_u32(color),
            silhouette,
        }
    }

    /// CSS for the preview: a radial gradient from the shaded base colour
    pub fn preview_background(&self) -> String {
        let [light, base, dark] = self.color.shade_gradient();
        format!("radial-gradient(circle at 30% 30%, {light}, {base}, {dark})")
    }
}

/// The Song-dynasty tea set on show
pub fn song_tea_set() -> Vec<TeaWare> {
    vec![
        TeaWare::new("建盏", "宋代斗茶专用茶盏，色黑衬茶", 0x1a1a1a, Silhouette::JianBowl),
        TeaWare::new("茶筅", "竹制击拂工具，用于点茶", 0x8b4513, Silhouette::Whisk),
        TeaWare::new("汤瓶", "注汤用执壶，控制水流", 0xd4b483, Silhouette::Bowl),
        TeaWare::new("茶罗", "筛茶工具，确保茶末均匀", 0xa0522d, Silhouette::Bowl),
    ]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryState {
    pub current_index: usize,
    /// Degrees, accumulates without wrapping
    pub rotation_deg: f32,
}

#[derive(Debug, Clone)]
pub struct GalleryBrowser {
    items: Vec<TeaWare>,
    state: GalleryState,
    rotation_step: f32,
}

impl GalleryBrowser {
    pub fn new(items: Vec<TeaWare>) -> Result<Self, SetupError> {
        if items.is_empty() {
            return Err(SetupError::EmptyGallery);
        }
        Ok(Self {
            items,
            state: GalleryState::default(),
            rotation_step: ROTATION_STEP_DEG,
        })
    }

    pub fn with_rotation_step(mut self, degrees: f32) -> Self {
        self.rotation_step = degrees;
        self
    }

    pub fn items(&self) -> &[TeaWare] {
        &self.items
    }

    pub fn state(&self) -> GalleryState {
        self.state
    }

    pub fn current(&self) -> &TeaWare {
        &self.items[self.state.current_index]
    }

    pub fn next(&mut self) -> &TeaWare {
        self.step_by(1)
    }

    pub fn previous(&mut self) -> &TeaWare {
        self.step_by(-1)
    }

    pub fn rotate(&mut self) -> f32 {
        self.state.rotation_deg += self.rotation_step;
        self.state.rotation_deg
    }

    fn step_by(&mut self, offset: isize) -> &TeaWare {
        self.state.current_index = cyclic_index(self.state.current_index, offset, self.items.len());
        self.state.rotation_deg = 0.0;
        log::debug!("gallery showing {}", self.current().name);
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn gallery() -> GalleryBrowser {
        GalleryBrowser::new(song_tea_set()).unwrap()
    }

    #[test]
    fn test_wraps_both_directions() {
        let mut g = gallery();
        assert_eq!(g.previous().name, "茶罗");
        assert_eq!(g.state().current_index, 3);
        assert_eq!(g.next().name, "建盏");
        assert_eq!(g.state().current_index, 0);
    }

    #[test]
    fn test_navigation_resets_rotation() {
        let mut g = gallery();
        assert_eq!(g.rotate(), 45.0);
        assert_eq!(g.rotate(), 90.0);
        g.next();
        assert_eq!(g.state().rotation_deg, 0.0);
    }

    #[test]
    fn test_rotation_accumulates_past_full_turn() {
        let mut g = gallery().with_rotation_step(90.0);
        for _ in 0..5 {
            g.rotate();
        }
        assert_eq!(g.state().rotation_deg, 450.0);
    }

    #[test]
    fn test_empty_gallery_rejected() {
        assert!(matches!(
            GalleryBrowser::new(Vec::new()),
            Err(SetupError::EmptyGallery)
        ));
    }

    #[test]
    fn test_preview_background() {
        let g = gallery();
        assert_eq!(
            g.current().preview_background(),
            "radial-gradient(circle at 30% 30%, #4d4d4d, #1a1a1a, #000000)"
        );
        assert_eq!(g.items()[1].silhouette.border_radius(), "0 0 50% 50%");
    }

    #[test]
    fn test_silhouettes_per_ware() {
        let g = gallery();
        let radii: Vec<_> = g
            .items()
            .iter()
            .map(|w| w.silhouette.border_radius())
            .collect();
        assert_eq!(radii, ["50% 50% 40% 40%", "0 0 50% 50%", "50%", "50%"]);
    }

    proptest! {
        #[test]
        fn prop_full_cycle_is_identity(start in 0usize..4, forward in any::<bool>()) {
            let mut g = gallery();
            for _ in 0..start {
                g.next();
            }
            let origin = g.state().current_index;
            for _ in 0..g.items().len() {
                if forward { g.next(); } else { g.previous(); }
            }
            prop_assert_eq!(g.state().current_index, origin);
        }

        #[test]
        fn prop_index_always_in_range(moves in prop::collection::vec(any::<bool>(), 0..40)) {
            let mut g = gallery();
            for forward in moves {
                if forward { g.next(); } else { g.previous(); }
                prop_assert!(g.state().current_index < g.items().len());
            }
        }
    }
}
