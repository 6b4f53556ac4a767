// af-core/src/units.rs

use uom::si::f64::{Frequency as UomFrequency, Length as UomLength};

// Public canonical unit types (SI, f64)
pub type Frequency = UomFrequency;
pub type Length = UomLength;

#[inline]
pub fn hz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

#[inline]
pub fn mhz(v: f64) -> Frequency {
    use uom::si::frequency::megahertz;
    Frequency::new::<megahertz>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

/// Free-space wavelength for a frequency.
#[inline]
pub fn wavelength(f: Frequency) -> Length {
    m(constants::SPEED_OF_LIGHT_MPS / f.value)
}

pub mod constants {
    /// Speed of light in vacuum, exact by SI definition.
    pub const SPEED_OF_LIGHT_MPS: f64 = 299_792_458.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn constructors_smoke() {
        let _f = hz(145.0e6);
        let _l = m(2.0);
        let _d = mm(4.0);
    }

    #[test]
    fn mhz_and_mm_scale_to_si() {
        assert!((mhz(145.0).value - 145.0e6).abs() < 1e-6);
        assert!((mm(4.0).value - 0.004).abs() < 1e-15);
    }

    #[test]
    fn wavelength_two_meter_band() {
        let lam = wavelength(mhz(145.0));
        assert!((lam.value - 2.0676).abs() < 1e-4, "got {}", lam.value);
    }

    proptest! {
        #[test]
        fn wavelength_strictly_decreasing(f in 1.0e5_f64..1.0e10, bump in 1.0_f64..1.0e6) {
            let lower = wavelength(hz(f)).value;
            let higher = wavelength(hz(f + bump)).value;
            prop_assert!(higher < lower);
        }
    }
}
