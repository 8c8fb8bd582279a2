//! Lecture et écriture des nombres au format des fichiers GCP

/// Parse une cellule numérique entière (`"12abc"` est rejeté).
///
/// Les valeurs non finies (`inf`, `NaN`) sont rejetées.
pub fn parse_number(cell: &str) -> Option<f64> {
    let value: f64 = fast_float::parse(cell.trim()).ok()?;
    value.is_finite().then_some(value)
}

/// Écrit un nombre sous sa forme la plus courte (`10`, `10.5`, `-98.7`).
///
/// Le zéro négatif s'écrit `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Écrit un nombre en virgule fixe avec `digits` décimales, jamais en notation scientifique.
///
/// Arrondi sur la valeur binaire exacte; une égalité exacte entre deux
/// candidats est arrondie en s'éloignant de zéro (`45.0078125` -> `45.007813`).
pub fn format_fixed(value: f64, digits: usize) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    if is_decimal_tie(value, digits) {
        return round_half_away(format!("{:.*}", digits + 1, value));
    }
    format!("{:.*}", digits, value)
}

/// `value` est exactement à mi-chemin entre deux nombres à `digits` décimales,
/// soit `value = impair / 2^(digits + 1)`
fn is_decimal_tie(value: f64, digits: usize) -> bool {
    if !value.is_finite() || value == 0.0 {
        return false;
    }
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };
    exponent + i64::from(mantissa.trailing_zeros()) == -(digits as i64 + 1)
}

/// Retire le `5` final d'une écriture exacte et incrémente le dernier chiffre
fn round_half_away(mut text: String) -> String {
    text.pop();
    if text.ends_with('.') {
        text.pop();
    }
    let mut bytes = text.into_bytes();
    let start = usize::from(bytes.first() == Some(&b'-'));
    let mut i = bytes.len();
    loop {
        if i == start {
            bytes.insert(start, b'1');
            break;
        }
        i -= 1;
        match bytes[i] {
            b'.' => {}
            b'9' => bytes[i] = b'0',
            digit => {
                bytes[i] = digit + 1;
                break;
            }
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}
