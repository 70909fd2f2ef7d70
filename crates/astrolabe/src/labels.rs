/// Signs of the zodiac, starting at the March equinox.
pub const ZODIAC: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

/// Hour numerals engraved on the limb.
pub const HOURS: [&str; 12] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
];

/// Two-digit latitude engraving, tens and units separated by a gap.
pub fn latitude_label(latitude: f64) -> String {
    let rounded = latitude + 0.5;
    let tens = (rounded / 10.0).trunc() as i64;
    let units = rounded.rem_euclid(10.0).trunc() as i64;
    format!("{tens}  {units}")
}

/// Limb degree reading for bearing `angle`: 0 at the top and bottom of
/// the limb, rising to 90 at the sides.
pub fn limb_degrees(angle: u32) -> u32 {
    match angle {
        a if a > 270 => 360 - a,
        a if a > 180 => a - 180,
        a if a > 90 => 180 - a,
        a => a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_label() {
        assert_eq!(latitude_label(50.37), "5  0");
        assert_eq!(latitude_label(51.6), "5  2");
        assert_eq!(latitude_label(9.2), "0  9");
    }

    #[test]
    fn test_limb_degrees_fold() {
        let readings: Vec<u32> = (0..360).step_by(45).map(limb_degrees).collect();
        assert_eq!(readings, vec![0, 45, 90, 45, 0, 45, 90, 45]);
    }
}
