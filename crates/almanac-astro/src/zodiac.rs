use serde::Deserialize;

const JAPANESE: [&str; 12] = [
    "牡羊座", "牡牛座", "双子座", "蟹座", "獅子座", "乙女座",
    "天秤座", "蠍座", "射手座", "山羊座", "水瓶座", "魚座",
];

const ENGLISH: [&str; 12] = [
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

/// The twelve 30° sectors of the ecliptic, starting at 0° Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Position of the sign in the zodiac, 0 for Aries.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self, labels: SignLabels) -> &'static str {
        match labels {
            SignLabels::Japanese => JAPANESE[self.index()],
            SignLabels::English => ENGLISH[self.index()],
        }
    }
}

/// Which set of sign names ends up in the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignLabels {
    #[default]
    Japanese,
    English,
}

/// Sign containing `longitude` and the degree within that sign.
///
/// The longitude is wrapped into [0, 360) first, so the sign index is always
/// `floor(L / 30)` in 0..=11 and the degree is in [0, 30).
pub fn sign_of(longitude: f64) -> (ZodiacSign, f64) {
    let lon = normalize_longitude(longitude);
    let idx = ((lon / 30.0).floor() as usize).min(11);
    (ZodiacSign::ALL[idx], lon % 30.0)
}

/// Wrap a longitude into [0, 360).
pub fn normalize_longitude(longitude: f64) -> f64 {
    let lon = longitude.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if lon >= 360.0 {
        0.0
    } else {
        lon
    }
}
