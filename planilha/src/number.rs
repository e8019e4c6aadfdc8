//! Parsing de números em formato pt-BR
//!
//! Usa fast-float para o parsing final, como no resto do pipeline.

/// Converte uma string numérica em formato pt-BR para f64.
///
/// Remove os pontos de milhar e troca a vírgula decimal por ponto:
/// `"1.234,56"` → `1234.56`. Um prefixo numérico basta: células com
/// unidade anexada ("310,5 kW") valem o número. Texto sem prefixo
/// numérico retorna `None` (o chamador preserva a string original).
pub fn parse_ptbr_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned: String = trimmed
        .chars()
        .filter(|c| *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    match fast_float::parse_partial::<f64, _>(cleaned.as_str()) {
        Ok((value, digits)) if digits > 0 => Some(value),
        _ => None,
    }
}

/// Prefixo inteiro no estilo `parseInt`: `"123abc"` → `123`, `"12.9"` → `12`.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok().map(|n| sign * n)
}

/// Parsing tolerante usado na recuperação de campos alternativos: só a
/// vírgula vira ponto e um prefixo numérico é aceito ("4.5 kW" → 4.5).
pub fn parse_lenient_number(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replacen(',', ".", 1);
    match fast_float::parse_partial::<f64, _>(cleaned.as_str()) {
        Ok((value, digits)) if digits > 0 => Some(value),
        _ => None,
    }
}
