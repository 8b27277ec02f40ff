//! Padrões de interferência registrados

use serde::{Deserialize, Serialize};

/// Tipo de interferência
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterferenceKind {
    Constructive,
    Destructive,
}

/// Escala mínima usada ao reverter interferência construtiva
pub const MIN_CONSTRUCTIVE_SCALE: f64 = 1.01;
/// Fator residual mínimo usado ao reverter interferência destrutiva
pub const MIN_DESTRUCTIVE_RESIDUAL: f64 = 0.01;

/// Entrada do log de interferência
///
/// `amplitude` é o fator de amplificação (construtiva) ou a supressão
/// (destrutiva). `amplitude_indices` guarda as posições escaladas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterferencePattern {
    pub kind: InterferenceKind,
    pub amplitude: f64,
    pub phase: f64,
    pub state_indices: Vec<usize>,
    pub amplitude_indices: Vec<usize>,
    pub iteration: u32,
}

impl InterferencePattern {
    /// Multiplicador aplicado na ida
    pub fn forward_scale(&self) -> f64 {
        match self.kind {
            InterferenceKind::Constructive => self.amplitude,
            InterferenceKind::Destructive => 1.0 - self.amplitude,
        }
    }

    /// Multiplicador aplicado na volta (com clamps)
    pub fn reverse_scale(&self) -> f64 {
        match self.kind {
            InterferenceKind::Constructive => 1.0 / self.amplitude.max(MIN_CONSTRUCTIVE_SCALE),
            InterferenceKind::Destructive => 1.0 / (1.0 - self.amplitude).max(MIN_DESTRUCTIVE_RESIDUAL),
        }
    }
}

/// Resultado de `apply_constructive` / `apply_destructive`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizedPattern {
    pub index: usize,
    pub kind: InterferenceKind,
    pub original_probability: f64,
    pub optimized_probability: f64,
    pub factor: f64,
    pub phase_delta: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(kind: InterferenceKind, amplitude: f64) -> InterferencePattern {
        InterferencePattern {
            kind,
            amplitude,
            phase: 0.1,
            state_indices: vec![0, 1],
            amplitude_indices: vec![2],
            iteration: 0,
        }
    }

    #[test]
    fn test_scales_are_inverse_inside_clamps() {
        let c = pattern(InterferenceKind::Constructive, 1.25);
        assert!((c.forward_scale() * c.reverse_scale() - 1.0).abs() < 1e-12);
        let d = pattern(InterferenceKind::Destructive, 0.25);
        assert!((d.forward_scale() * d.reverse_scale() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reverse_clamps() {
        assert!((pattern(InterferenceKind::Constructive, 0.5).reverse_scale() - 1.0 / 1.01).abs() < 1e-12);
        assert!((pattern(InterferenceKind::Destructive, 1.0).reverse_scale() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_kind_serde() {
        let json = serde_json::to_string(&InterferenceKind::Destructive).unwrap();
        assert_eq!(json, "\"destructive\"");
    }
}
