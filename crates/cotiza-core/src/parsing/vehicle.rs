/// Labels that introduce the insured vehicle, tried in order.
const VEHICLE_LABELS: &[&str] = &[
    "DESCRIPCION DEL VEHICULO ASEGURADO",
    "DESCRIPCIÓN DEL VEHÍCULO ASEGURADO",
    "DESCRIPCION DEL VEHICULO",
    "DESCRIPCIÓN DEL VEHÍCULO",
    "VEHÍCULO:",
    "VEHICULO:",
];

/// Tokens that describe the coverage or trim rather than the vehicle.
const NOISE_TOKENS: &[&str] = &[
    "AUTOMOVILES NACIONALES",
    "AUTOMOVILES",
    "PARTICULAR",
    "NORMAL",
    "SERVICIO",
    "AMPLIA",
    "PLAN",
    "USO",
    "L4",
    "TSI",
    "ABS",
    "BA",
    "AC",
    "AUT",
    "AUTO",
    "5 OCUP",
    "5P",
    "5PTAS",
    "1.4T",
    "2.0T",
    "CVT",
    "TIPTRONIC",
    "AT",
    "MT",
];

const MAX_DESCRIPTOR_LEN: usize = 60;

/// Best-effort vehicle descriptor, e.g. "VOLKSWAGEN JETTA 2024".
///
/// Returns None when no vehicle label is present or nothing usable follows it.
pub fn extract_vehicle(text: &str) -> Option<String> {
    let upper = text.to_uppercase();

    for label in VEHICLE_LABELS {
        let Some(idx) = upper.find(label) else {
            continue;
        };
        let after = upper[idx + label.len()..].trim_start_matches([':', ' ', '\t', '\n', '\r']);
        let line = after.lines().next().unwrap_or_default();
        let candidate: String = line
            .chars()
            .take_while(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | ',' | '.' | '/'))
            .take(MAX_DESCRIPTOR_LEN)
            .collect();

        let cleaned = clean_descriptor(&candidate);
        if cleaned.chars().filter(|c| c.is_alphabetic()).count() >= 2 {
            return Some(cleaned);
        }
    }

    None
}

fn clean_descriptor(raw: &str) -> String {
    let mut words: Vec<&str> = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .collect();

    // Multi-word noise first, then single tokens.
    for noise in NOISE_TOKENS.iter().filter(|n| n.contains(' ')) {
        let parts: Vec<&str> = noise.split(' ').collect();
        while let Some(pos) = words.windows(parts.len()).position(|w| w == parts.as_slice()) {
            words.drain(pos..pos + parts.len());
        }
    }
    words.retain(|w| !NOISE_TOKENS.contains(w));

    let mut descriptor = words.join(" ");
    if let Some(rest) = descriptor.strip_prefix("VW ") {
        descriptor = format!("VOLKSWAGEN {rest}");
    }
    descriptor
}
