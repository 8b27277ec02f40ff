//! Estatísticas de entropia usadas por conversão e otimização

/// Histograma de bytes (256 posições)
pub fn byte_histogram(bytes: &[u8]) -> [u64; 256] {
    let mut histogram = [0u64; 256];
    for &b in bytes {
        histogram[b as usize] += 1;
    }
    histogram
}

/// Entropia de Shannon do histograma de bytes, em bits por byte ∈ [0, 8]
pub fn byte_entropy(bytes: &[u8]) -> f64 {
    if bytes.is_empty() {
        return 0.0;
    }

    let total = bytes.len() as f64;
    byte_histogram(bytes)
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Entropia de Shannon (bits) de uma distribuição de probabilidade
///
/// Entradas não-positivas são ignoradas; a distribuição não precisa
/// somar exatamente 1.
pub fn shannon_entropy(probabilities: &[f64]) -> f64 {
    probabilities
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum()
}

/// Entropia normalizada ∈ [0, 1] (divide pelo máximo log2(n))
pub fn normalized_entropy(probabilities: &[f64]) -> f64 {
    if probabilities.len() < 2 {
        return 0.0;
    }
    (shannon_entropy(probabilities) / (probabilities.len() as f64).log2()).clamp(0.0, 1.0)
}

/// Variância populacional
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

/// Produto interno normalizado de duas distribuições ∈ [0, 1]
///
/// Comprimentos diferentes comparam o prefixo comum.
pub fn distribution_correlation(p: &[f64], q: &[f64]) -> f64 {
    let (mut dot, mut norm_p, mut norm_q) = (0.0, 0.0, 0.0);
    for (&x, &y) in p.iter().zip(q) {
        dot += x * y;
        norm_p += x * x;
        norm_q += y * y;
    }
    let denom = (norm_p * norm_q).sqrt();
    if !denom.is_finite() || denom <= f64::EPSILON {
        return 0.0;
    }
    (dot / denom).clamp(0.0, 1.0)
}
