//! User-adjustable simulation parameters.
//!
//! Every field is paired with a [`SettingField`] that knows its slider range and
//! whether changing it is a cheap property write or forces the box to be rebuilt.

use crate::environment::EnvironmentParams;

/// Flat configuration record read by the physics world and the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationSettings {
    /// Downward gravity magnitude (m/s^2).
    pub gravity: f32,
    /// Coin mass scale; mass is `density * COIN_MASS_PER_DENSITY`.
    pub density: f32,
    pub restitution: f32,
    pub ground_curvature: f32,
    /// Inner size of the box (meters).
    pub box_size: f32,
    /// Coin linear damping.
    pub damping: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            gravity: 9.82,
            density: 1.0,
            restitution: 0.6,
            ground_curvature: 10.0,
            box_size: 5.0,
            damping: 0.1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SettingField {
    Gravity,
    Density,
    Restitution,
    GroundCurvature,
    BoxSize,
    Damping,
}

/// Slider limits for a setting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SettingField {
    pub const ALL: [SettingField; 6] = [
        SettingField::Gravity,
        SettingField::Density,
        SettingField::Restitution,
        SettingField::GroundCurvature,
        SettingField::BoxSize,
        SettingField::Damping,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingField::Gravity => "Gravity",
            SettingField::Density => "Density",
            SettingField::Restitution => "Bounciness",
            SettingField::GroundCurvature => "Ground curvature",
            SettingField::BoxSize => "Box size",
            SettingField::Damping => "Air resistance",
        }
    }

    /// Name used for CLI flags (`--box-size`) and, upper-cased, env vars.
    pub fn key(self) -> &'static str {
        match self {
            SettingField::Gravity => "gravity",
            SettingField::Density => "density",
            SettingField::Restitution => "restitution",
            SettingField::GroundCurvature => "ground-curvature",
            SettingField::BoxSize => "box-size",
            SettingField::Damping => "damping",
        }
    }

    pub fn range(self) -> SliderRange {
        let (min, max, step) = match self {
            SettingField::Gravity => (0.0, 20.0, 0.1),
            SettingField::Density => (0.1, 5.0, 0.1),
            SettingField::Restitution => (0.0, 1.0, 0.05),
            SettingField::GroundCurvature => (1.0, 30.0, 1.0),
            SettingField::BoxSize => (2.0, 15.0, 0.5),
            SettingField::Damping => (0.0, 1.0, 0.05),
        };
        SliderRange { min, max, step }
    }

    /// True when a change tears down and rebuilds every environment body.
    pub fn rebuilds_environment(self) -> bool {
        matches!(self, SettingField::GroundCurvature | SettingField::BoxSize)
    }

    pub fn next(self) -> Self {
        let i = self.index();
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = self.index();
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|&f| f == self).unwrap_or(0)
    }
}

/// A single requested change, as produced by a slider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettingChange {
    pub field: SettingField,
    pub value: f32,
}

impl SettingChange {
    pub fn new(field: SettingField, value: f32) -> Self {
        Self { field, value }
    }

    /// Clamp into the slider range. Non-finite values are rejected.
    pub fn validated(self) -> Result<Self, &'static str> {
        if !self.value.is_finite() {
            return Err("Setting value is not finite");
        }
        let range = self.field.range();
        Ok(Self {
            value: self.value.clamp(range.min, range.max),
            ..self
        })
    }
}

impl SimulationSettings {
    pub fn get(&self, field: SettingField) -> f32 {
        match field {
            SettingField::Gravity => self.gravity,
            SettingField::Density => self.density,
            SettingField::Restitution => self.restitution,
            SettingField::GroundCurvature => self.ground_curvature,
            SettingField::BoxSize => self.box_size,
            SettingField::Damping => self.damping,
        }
    }

    /// Write a validated change. Returns the value actually stored.
    pub fn set(&mut self, change: SettingChange) -> Result<f32, &'static str> {
        let SettingChange { field, value } = change.validated()?;
        let slot = match field {
            SettingField::Gravity => &mut self.gravity,
            SettingField::Density => &mut self.density,
            SettingField::Restitution => &mut self.restitution,
            SettingField::GroundCurvature => &mut self.ground_curvature,
            SettingField::BoxSize => &mut self.box_size,
            SettingField::Damping => &mut self.damping,
        };
        *slot = value;
        Ok(value)
    }

    /// The change that moves `field` by `steps` slider steps.
    pub fn nudge(&self, field: SettingField, steps: i32) -> SettingChange {
        let range = field.range();
        SettingChange::new(field, self.get(field) + range.step * steps as f32)
    }

    pub fn environment(&self) -> EnvironmentParams {
        EnvironmentParams {
            box_size: self.box_size,
            ground_curvature: self.ground_curvature,
        }
    }

    pub fn coin_mass(&self) -> f32 {
        self.density * crate::COIN_MASS_PER_DENSITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_sit_inside_slider_ranges() {
        let settings = SimulationSettings::default();
        for field in SettingField::ALL {
            let range = field.range();
            let value = settings.get(field);
            assert!(
                (range.min..=range.max).contains(&value),
                "{field:?} default {value} outside {range:?}"
            );
        }
    }

    #[test]
    fn only_box_size_and_curvature_rebuild() {
        let rebuilding: Vec<_> = SettingField::ALL
            .into_iter()
            .filter(|f| f.rebuilds_environment())
            .collect();
        assert_eq!(
            rebuilding,
            vec![SettingField::GroundCurvature, SettingField::BoxSize]
        );
    }

    #[test]
    fn set_clamps_to_range() {
        let mut settings = SimulationSettings::default();
        let stored = settings
            .set(SettingChange::new(SettingField::BoxSize, 100.0))
            .unwrap();
        assert_eq!(stored, 15.0);
        assert_eq!(settings.box_size, 15.0);

        let stored = settings
            .set(SettingChange::new(SettingField::Restitution, -3.0))
            .unwrap();
        assert_eq!(stored, 0.0);
    }

    #[test]
    fn set_rejects_non_finite_values() {
        let mut settings = SimulationSettings::default();
        assert_eq!(
            settings.set(SettingChange::new(SettingField::Gravity, f32::NAN)),
            Err("Setting value is not finite")
        );
        assert_eq!(settings.gravity, 9.82);
    }

    #[test]
    fn nudge_moves_by_slider_step() {
        let settings = SimulationSettings::default();
        let change = settings.nudge(SettingField::BoxSize, 1);
        assert_eq!(change.field, SettingField::BoxSize);
        assert!((change.value - 5.5).abs() < 1.0e-6);

        let change = settings.nudge(SettingField::Gravity, -2);
        assert!((change.value - 9.62).abs() < 1.0e-5);
    }

    #[test]
    fn field_cycling_wraps() {
        assert_eq!(SettingField::Damping.next(), SettingField::Gravity);
        assert_eq!(SettingField::Gravity.prev(), SettingField::Damping);
        assert_eq!(SettingField::Density.next().prev(), SettingField::Density);
    }

    #[test]
    fn coin_mass_scales_with_density() {
        let mut settings = SimulationSettings::default();
        settings.density = 2.5;
        assert!((settings.coin_mass() - 0.25).abs() < 1.0e-6);
    }
}
