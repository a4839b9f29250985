//! Static terrain features: ponds and clearings

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::WorldConfig;
use crate::core::types::Vec2;

/// Circular body of water
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pond {
    pub center: Vec2,
    pub radius: f32,
}

impl Pond {
    /// Distance from `pos` to the shoreline; negative inside the water
    pub fn distance_to_edge(&self, pos: Vec2) -> f32 {
        self.center.distance(&pos) - self.radius
    }
}

/// Open ground suitable for farming
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clearing {
    pub center: Vec2,
    pub radius: f32,
}

impl Clearing {
    pub fn contains(&self, pos: Vec2) -> bool {
        self.center.distance(&pos) <= self.radius
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub width: f32,
    pub height: f32,
    pub ponds: Vec<Pond>,
    pub clearings: Vec<Clearing>,
}

impl Terrain {
    pub fn empty(width: f32, height: f32) -> Self {
        Self { width, height, ponds: Vec::new(), clearings: Vec::new() }
    }

    /// Scatter ponds and clearings inside the world bounds
    pub fn generate(config: &WorldConfig, rng: &mut impl Rng) -> Self {
        let mut terrain = Self::empty(config.width, config.height);

        for _ in 0..config.pond_count {
            let radius = if config.pond_max_radius > config.pond_min_radius {
                rng.gen_range(config.pond_min_radius..config.pond_max_radius)
            } else {
                config.pond_min_radius
            };
            let center = terrain.random_point(rng, radius);
            terrain.ponds.push(Pond { center, radius });
        }

        for _ in 0..config.clearing_count {
            let center = terrain.random_point(rng, config.clearing_radius);
            terrain.clearings.push(Clearing { center, radius: config.clearing_radius });
        }

        terrain
    }

    /// Uniform point at least `margin` from every border
    pub fn random_point(&self, rng: &mut impl Rng, margin: f32) -> Vec2 {
        let span = |extent: f32| {
            if extent > 2.0 * margin {
                (margin, extent - margin)
            } else {
                (0.0, extent.max(f32::EPSILON))
            }
        };
        let (x0, x1) = span(self.width);
        let (y0, y1) = span(self.height);
        Vec2::new(rng.gen_range(x0..x1), rng.gen_range(y0..y1))
    }

    pub fn clamp_to_bounds(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.clamp(0.0, self.width), pos.y.clamp(0.0, self.height))
    }

    /// Pond whose shoreline is closest to `pos`
    pub fn nearest_pond(&self, pos: Vec2) -> Option<&Pond> {
        self.ponds.iter().min_by_key(|p| ordered_float::OrderedFloat(p.distance_to_edge(pos)))
    }

    /// Distance to the closest shoreline, `None` without ponds
    pub fn distance_to_water(&self, pos: Vec2) -> Option<f32> {
        self.nearest_pond(pos).map(|p| p.distance_to_edge(pos))
    }

    pub fn nearest_clearing(&self, pos: Vec2) -> Option<&Clearing> {
        self.clearings
            .iter()
            .min_by_key(|c| ordered_float::OrderedFloat(c.center.distance(&pos)))
    }

    pub fn in_clearing(&self, pos: Vec2) -> bool {
        self.clearings.iter().any(|c| c.contains(pos))
    }
}
