//! # StateVector: Unidade fundamental do pipeline
//!
//! Lista normalizada de amplitudes complexas + fase escalar + tag opcional
//! de entanglement. Cada pass recebe clones, nunca aliases.
//!
//! ## Invariantes
//!
//! - `Σ|aᵢ|² == 1` dentro de [`NORMALIZATION_TOLERANCE`]
//! - `phase ∈ [0, 2π)`
//! - pelo menos uma amplitude

use crate::analysis::{shannon_entropy, variance};
use crate::complex::Complex;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::f64::consts::TAU;
use std::hash::{Hash, Hasher};

/// Tolerância de normalização
pub const NORMALIZATION_TOLERANCE: f64 = 1e-5;

/// Reduz fase para [0, 2π)
pub fn normalize_phase(theta: f64) -> f64 {
    if !theta.is_finite() {
        return 0.0;
    }
    let reduced = theta.rem_euclid(TAU);
    // rem_euclid pode devolver exatamente 2π para valores negativos minúsculos
    if reduced >= TAU { 0.0 } else { reduced }
}

/// Vetor de estado normalizado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    amplitudes: Vec<Complex>,
    phase: f64,
    entanglement_id: Option<String>,
}

impl StateVector {
    /// Cria estado normalizando as amplitudes
    pub fn new(amplitudes: Vec<Complex>, phase: f64) -> CoreResult<Self> {
        let mut state = Self {
            amplitudes,
            phase: normalize_phase(phase),
            entanglement_id: None,
        };
        state.check_finite()?;
        state.renormalize()?;
        Ok(state)
    }

    /// Reconstrói estado já normalizado sem tocar nas amplitudes
    ///
    /// Usado na desserialização: renormalizar alteraria bits e invalidaria
    /// o checksum.
    pub fn from_raw_parts(
        amplitudes: Vec<Complex>,
        phase: f64,
        entanglement_id: Option<String>,
    ) -> CoreResult<Self> {
        let state = Self {
            amplitudes,
            phase,
            entanglement_id,
        };
        state.validate()?;
        Ok(state)
    }

    /// Valida todas as invariantes
    pub fn validate(&self) -> CoreResult<()> {
        self.check_finite()?;
        let norm = self.norm_sq();
        if (norm - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(CoreError::NotNormalized(norm));
        }
        if !(0.0..TAU).contains(&self.phase) {
            return Err(CoreError::PhaseOutOfRange(self.phase));
        }
        Ok(())
    }

    fn check_finite(&self) -> CoreResult<()> {
        if self.amplitudes.is_empty() {
            return Err(CoreError::EmptyAmplitudes);
        }
        if let Some(idx) = self.amplitudes.iter().position(|a| !a.is_finite()) {
            return Err(CoreError::NonFinite(idx));
        }
        Ok(())
    }

    /// Define tag de entanglement (builder)
    pub fn with_entanglement_id(mut self, id: impl Into<String>) -> Self {
        self.entanglement_id = Some(id.into());
        self
    }

    // =========================================================================
    // Acessores
    // =========================================================================

    pub fn amplitudes(&self) -> &[Complex] {
        &self.amplitudes
    }

    pub fn amplitude(&self, index: usize) -> Option<Complex> {
        self.amplitudes.get(index).copied()
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn entanglement_id(&self) -> Option<&str> {
        self.entanglement_id.as_deref()
    }

    pub fn set_entanglement_id(&mut self, id: Option<String>) {
        self.entanglement_id = id;
    }

    /// Número de amplitudes
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Sempre falso para estados construídos; mantido por simetria com `len`
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    // =========================================================================
    // Medidas
    // =========================================================================

    /// Σ|aᵢ|²
    pub fn norm_sq(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sq()).sum()
    }

    pub fn is_normalized(&self) -> bool {
        (self.norm_sq() - 1.0).abs() <= NORMALIZATION_TOLERANCE
    }

    /// Distribuição de probabilidade |aᵢ|²
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sq()).collect()
    }

    /// Entropia de Shannon (bits) da distribuição
    pub fn entropy(&self) -> f64 {
        shannon_entropy(&self.probabilities())
    }

    /// Variância das magnitudes |aᵢ|
    pub fn amplitude_variance(&self) -> f64 {
        let magnitudes: Vec<f64> = self.amplitudes.iter().map(|a| a.abs()).collect();
        variance(&magnitudes)
    }

    /// Índice de maior probabilidade (primeiro em caso de empate)
    pub fn max_likelihood_index(&self) -> usize {
        let mut best = 0;
        let mut best_p = f64::MIN;
        for (i, a) in self.amplitudes.iter().enumerate() {
            let p = a.norm_sq();
            if p > best_p {
                best_p = p;
                best = i;
            }
        }
        best
    }

    /// Soma das magnitudes Σ|aᵢ|
    pub fn magnitude_sum(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.abs()).sum()
    }

    // =========================================================================
    // Transformações (sempre renormalizam)
    // =========================================================================

    /// Renormaliza para Σ|aᵢ|² = 1
    pub fn renormalize(&mut self) -> CoreResult<()> {
        let norm = self.norm_sq().sqrt();
        if !norm.is_finite() || norm <= f64::EPSILON {
            return Err(CoreError::ZeroNorm);
        }
        let inv = 1.0 / norm;
        for a in &mut self.amplitudes {
            *a = a.scale(inv);
        }
        Ok(())
    }

    /// Rotação global: aᵢ ← aᵢ·e^(iθ), fase ← fase + θ
    pub fn rotate(&mut self, theta: f64) {
        let phasor = Complex::cis(theta);
        for a in &mut self.amplitudes {
            *a = a.mul(phasor);
        }
        self.phase = normalize_phase(self.phase + theta);
    }

    /// Escala amplitudes selecionadas por `factor·e^(i·phase_delta)` e renormaliza
    pub fn scale_indices(&mut self, indices: &[usize], factor: f64, phase_delta: f64) -> CoreResult<()> {
        let len = self.amplitudes.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(CoreError::IndexOutOfRange { index, len });
        }
        let multiplier = Complex::from_polar(factor, phase_delta);
        for &i in indices {
            self.amplitudes[i] = self.amplitudes[i].mul(multiplier);
        }
        self.check_finite()?;
        self.renormalize()
    }

    /// Aplica função a cada amplitude e renormaliza
    pub fn map_amplitudes<F>(&mut self, mut f: F) -> CoreResult<()>
    where
        F: FnMut(usize, Complex) -> Complex,
    {
        for (i, a) in self.amplitudes.iter_mut().enumerate() {
            *a = f(i, *a);
        }
        self.check_finite()?;
        self.renormalize()
    }

    // =========================================================================
    // Serialização canônica
    // =========================================================================

    /// Bytes determinísticos (LE) usados por checksum e chaves de cache
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let id_len = self.entanglement_id.as_ref().map_or(0, |s| s.len());
        let mut out = Vec::with_capacity(4 + self.amplitudes.len() * 16 + 8 + 5 + id_len);
        out.extend_from_slice(&(self.amplitudes.len() as u32).to_le_bytes());
        for a in &self.amplitudes {
            out.extend_from_slice(&a.re.to_le_bytes());
            out.extend_from_slice(&a.im.to_le_bytes());
        }
        out.extend_from_slice(&self.phase.to_le_bytes());
        match &self.entanglement_id {
            Some(id) => {
                out.push(1);
                out.extend_from_slice(&(id.len() as u32).to_le_bytes());
                out.extend_from_slice(id.as_bytes());
            }
            None => out.push(0),
        }
        out
    }

    /// Hash de conteúdo (64 bits) apenas sobre as amplitudes
    ///
    /// Ignora a fase global e a tag de entanglement: a correlação depende só
    /// de |aₖ|², então estados com as mesmas amplitudes compartilham entradas
    /// do cache.
    pub fn content_key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.amplitudes.len().hash(&mut hasher);
        for a in &self.amplitudes {
            a.re.to_bits().hash(&mut hasher);
            a.im.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sample() -> StateVector {
        StateVector::new(
            vec![Complex::new(1.0, 1.0), Complex::new(-0.5, 1.0), Complex::new(0.25, 1.0)],
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_new_normalizes() {
        let s = sample();
        assert!(s.is_normalized());
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(StateVector::new(vec![], 0.0), Err(CoreError::EmptyAmplitudes));
    }

    #[test]
    fn test_zero_rejected() {
        let res = StateVector::new(vec![Complex::ZERO; 4], 0.0);
        assert_eq!(res, Err(CoreError::ZeroNorm));
    }

    #[test]
    fn test_nan_rejected() {
        let res = StateVector::new(vec![Complex::new(f64::NAN, 0.0)], 0.0);
        assert_eq!(res, Err(CoreError::NonFinite(0)));
    }

    #[test]
    fn test_phase_reduced() {
        let s = StateVector::new(vec![Complex::ONE], -PI / 2.0).unwrap();
        assert!((s.phase() - 1.5 * PI).abs() < 1e-12);
        let s = StateVector::new(vec![Complex::ONE], 5.0 * PI).unwrap();
        assert!((s.phase() - PI).abs() < 1e-9);
        assert_eq!(normalize_phase(-1e-18), 0.0);
        assert_eq!(normalize_phase(f64::NAN), 0.0);
    }

    #[test]
    fn test_rotate_keeps_norm() {
        let mut s = sample();
        s.rotate(2.0);
        assert!(s.is_normalized());
        s.rotate(-2.0);
        let original = sample();
        for (a, b) in s.amplitudes().iter().zip(original.amplitudes()) {
            assert!((a.re - b.re).abs() < 1e-12);
            assert!((a.im - b.im).abs() < 1e-12);
        }
    }

    #[test]
    fn test_scale_indices_renormalizes() {
        let mut s = sample();
        let before = s.probabilities()[0];
        s.scale_indices(&[0], 2.0, 0.1).unwrap();
        assert!(s.is_normalized());
        assert!(s.probabilities()[0] > before);
    }

    #[test]
    fn test_scale_indices_out_of_range() {
        let mut s = sample();
        let err = s.scale_indices(&[5], 2.0, 0.0).unwrap_err();
        assert_eq!(err, CoreError::IndexOutOfRange { index: 5, len: 3 });
    }

    #[test]
    fn test_from_raw_parts_validates() {
        let s = sample();
        let rebuilt = StateVector::from_raw_parts(s.amplitudes().to_vec(), s.phase(), None).unwrap();
        assert_eq!(rebuilt, s);

        let bad = StateVector::from_raw_parts(vec![Complex::new(2.0, 0.0)], 0.0, None);
        assert!(matches!(bad, Err(CoreError::NotNormalized(_))));

        let bad_phase = StateVector::from_raw_parts(vec![Complex::ONE], 7.0, None);
        assert!(matches!(bad_phase, Err(CoreError::PhaseOutOfRange(_))));
    }

    #[test]
    fn test_canonical_bytes_include_id() {
        let s = sample();
        let tagged = s.clone().with_entanglement_id("ent-0-1");
        assert_ne!(s.canonical_bytes(), tagged.canonical_bytes());
        assert_eq!(s.content_key(), tagged.content_key());
    }

    #[test]
    fn test_content_key_ignores_global_phase() {
        let s = sample();
        let shifted = StateVector::from_raw_parts(s.amplitudes().to_vec(), 2.5, None).unwrap();
        assert_ne!(s.phase(), shifted.phase());
        assert_eq!(s.content_key(), shifted.content_key());

        let other = StateVector::new(vec![Complex::ONE, Complex::ZERO], 0.0).unwrap();
        assert_ne!(s.content_key(), other.content_key());
    }

    #[test]
    fn test_max_likelihood_index() {
        let s = StateVector::new(vec![Complex::new(0.1, 0.0), Complex::new(0.9, 0.0)], 0.0).unwrap();
        assert_eq!(s.max_likelihood_index(), 1);
    }

    #[test]
    fn test_entropy_and_variance() {
        let uniform = StateVector::new(vec![Complex::ONE; 4], 0.0).unwrap();
        assert!((uniform.entropy() - 2.0).abs() < 1e-9);
        assert!(uniform.amplitude_variance() < 1e-12);
    }
}
