//! Amateur radio band plan (HF through 23 cm).

/// One amateur band with the frequency used as its design center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Short name, e.g. `"2m"`.
    pub name: &'static str,
    pub lower_mhz: f64,
    pub upper_mhz: f64,
    pub center_mhz: f64,
}

impl Band {
    pub fn contains(&self, frequency_mhz: f64) -> bool {
        frequency_mhz >= self.lower_mhz && frequency_mhz <= self.upper_mhz
    }

    /// Human-readable label, e.g. `"2m (144-146 MHz)"`.
    pub fn label(&self) -> String {
        format!("{} ({}-{} MHz)", self.name, self.lower_mhz, self.upper_mhz)
    }
}

const fn band(name: &'static str, lower_mhz: f64, upper_mhz: f64, center_mhz: f64) -> Band {
    Band {
        name,
        lower_mhz,
        upper_mhz,
        center_mhz,
    }
}

pub const BANDS: [Band; 13] = [
    band("160m", 1.8, 2.0, 1.9),
    band("80m", 3.5, 4.0, 3.75),
    band("40m", 7.0, 7.3, 7.15),
    band("30m", 10.1, 10.15, 10.125),
    band("20m", 14.0, 14.35, 14.175),
    band("17m", 18.068, 18.168, 18.118),
    band("15m", 21.0, 21.45, 21.225),
    band("12m", 24.89, 24.99, 24.94),
    band("10m", 28.0, 29.7, 28.85),
    band("6m", 50.0, 54.0, 52.0),
    band("2m", 144.0, 146.0, 145.0),
    band("70cm", 430.0, 440.0, 435.0),
    band("23cm", 1240.0, 1300.0, 1270.0),
];

const DEFAULT_BAND_INDEX: usize = 10;

/// The 2 m band.
pub fn default_band() -> &'static Band {
    &BANDS[DEFAULT_BAND_INDEX]
}

/// Look up a band by name, ignoring ASCII case.
pub fn find_band(name: &str) -> Option<&'static Band> {
    BANDS.iter().find(|b| b.name.eq_ignore_ascii_case(name.trim()))
}

/// The band whose edges include `frequency_mhz`, if any.
pub fn band_containing(frequency_mhz: f64) -> Option<&'static Band> {
    BANDS.iter().find(|b| b.contains(frequency_mhz))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_two_meters() {
        assert_eq!(default_band().name, "2m");
        assert_eq!(default_band().center_mhz, 145.0);
    }

    #[test]
    fn centers_lie_inside_their_band() {
        for b in &BANDS {
            assert!(b.contains(b.center_mhz), "{}", b.name);
            assert!(b.lower_mhz < b.upper_mhz);
        }
    }

    #[test]
    fn lookup_by_name_and_frequency() {
        assert_eq!(find_band("70CM").map(|b| b.center_mhz), Some(435.0));
        assert!(find_band("11m").is_none());
        assert_eq!(band_containing(14.2).map(|b| b.name), Some("20m"));
        assert!(band_containing(100.0).is_none());
    }

    #[test]
    fn label_format() {
        assert_eq!(find_band("2m").unwrap().label(), "2m (144-146 MHz)");
    }
}
