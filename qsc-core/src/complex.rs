//! # Complex: Número complexo imutável
//!
//! Primitivo aritmético de todas as amplitudes do pipeline.
//! Tipo valor (`Copy`), sem identidade.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Número complexo simples
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    /// Zero complexo
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    /// Um complexo
    pub const ONE: Self = Self { re: 1.0, im: 0.0 };

    /// Unidade imaginária
    pub const I: Self = Self { re: 0.0, im: 1.0 };

    /// Cria número complexo
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Cria de coordenadas polares (r, θ)
    pub fn from_polar(r: f64, theta: f64) -> Self {
        Self {
            re: r * theta.cos(),
            im: r * theta.sin(),
        }
    }

    /// Fasor unitário: e^(iθ)
    pub fn cis(theta: f64) -> Self {
        Self::from_polar(1.0, theta)
    }

    /// Conjugado
    pub fn conj(self) -> Self {
        Self { re: self.re, im: -self.im }
    }

    /// Módulo ao quadrado (massa de probabilidade)
    pub fn norm_sq(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Módulo
    pub fn abs(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Fase (argumento) em (-π, π]
    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Adição
    pub fn add(self, other: Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }

    /// Subtração
    pub fn sub(self, other: Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }

    /// Multiplicação
    pub fn mul(self, other: Self) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }

    /// Multiplicação por escalar
    pub fn scale(self, s: f64) -> Self {
        Self {
            re: self.re * s,
            im: self.im * s,
        }
    }

    /// Ambas as componentes são finitas?
    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Mul<f64> for Complex {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.re * rhs, self.im * rhs)
    }
}

impl Neg for Complex {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl From<num_complex::Complex64> for Complex {
    fn from(z: num_complex::Complex64) -> Self {
        Self::new(z.re, z.im)
    }
}

impl From<Complex> for num_complex::Complex64 {
    fn from(z: Complex) -> Self {
        num_complex::Complex64::new(z.re, z.im)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < 0.0 {
            write!(f, "{:.6}-{:.6}i", self.re, -self.im)
        } else {
            write!(f, "{:.6}+{:.6}i", self.re, self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_mul_i_squared() {
        let z = Complex::I.mul(Complex::I);
        assert!((z.re + 1.0).abs() < 1e-12);
        assert!(z.im.abs() < 1e-12);
    }

    #[test]
    fn test_operators_match_methods() {
        let a = Complex::new(1.5, -2.0);
        let b = Complex::new(-0.5, 3.0);
        assert_eq!(a + b, Complex::add(a, b));
        assert_eq!(a - b, Complex::sub(a, b));
        assert_eq!(a * b, Complex::mul(a, b));
        assert_eq!(a * 2.0, a.scale(2.0));
        assert_eq!(-a, a.scale(-1.0));
    }

    #[test]
    fn test_polar_roundtrip() {
        let z = Complex::from_polar(2.0, FRAC_PI_2);
        assert!((z.abs() - 2.0).abs() < 1e-12);
        assert!((z.arg() - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_conj_and_norm() {
        let z = Complex::new(3.0, 4.0);
        assert_eq!(z.conj(), Complex::new(3.0, -4.0));
        assert_eq!(z.norm_sq(), 25.0);
        assert_eq!(z.abs(), 5.0);
        assert!((z.mul(z.conj()).re - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_cis_is_unit() {
        for k in 0..8 {
            let z = Complex::cis(k as f64 * PI / 4.0);
            assert!((z.abs() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_num_complex_interop() {
        let z = Complex::new(0.25, -0.75);
        let n: num_complex::Complex64 = z.into();
        assert_eq!(Complex::from(n), z);
    }
}
