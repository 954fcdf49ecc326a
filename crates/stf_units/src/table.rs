//! Static suffix tables for every quantity family
//!
use crate::{
    family::Units,
    parse::Conversion::{self, FahrenheitToCelsius, Scale},
};

pub(crate) struct Family {
    pub units: Units,
    pub suffixes: &'static [(&'static str, Conversion)],
}

const LB_TO_KG: f64 = 0.45359237;
const MPH_TO_MPS: f64 = 0.44704;
const KPH_TO_MPS: f64 = 0.27777778;
const LBF_TO_N: f64 = 4.44822162;
const BAR_TO_PSI: f64 = 14.5037738;
const INHG_TO_PSI: f64 = 0.4911542;
const CMHG_TO_PSI: f64 = 0.1933672;
const KPA_TO_PSI: f64 = 0.145037738;
const HP_TO_W: f64 = 745.699872;

const SPEED: &[(&str, Conversion)] = &[
    ("m/s", Scale(1.0)),
    ("cm/s", Scale(0.01)),
    ("mm/s", Scale(0.001)),
    ("mph", Scale(MPH_TO_MPS)),
    ("ft/s", Scale(0.3048)),
    ("in/s", Scale(0.0254)),
    ("kph", Scale(KPH_TO_MPS)),
    ("km/h", Scale(KPH_TO_MPS)),
    ("kmph", Scale(KPH_TO_MPS)),
    // misspelling found in MSTS content
    ("kmh", Scale(KPH_TO_MPS)),
];

const PRESSURE_RATE: &[(&str, Conversion)] = &[
    ("psi/s", Scale(1.0)),
    ("psi/min", Scale(1.0 / 60.0)),
    ("inhg/s", Scale(INHG_TO_PSI)),
    ("cmhg/s", Scale(CMHG_TO_PSI)),
    ("bar/s", Scale(BAR_TO_PSI)),
    ("bar/min", Scale(BAR_TO_PSI / 60.0)),
    ("kpa/s", Scale(0.145)),
];

/// Families in bit order. The empty suffix is the family's default and is
/// only listed where it differs from a unit scale.
pub(crate) static FAMILIES: &[Family] = &[
    Family {
        units: Units::MASS,
        suffixes: &[
            ("kg", Scale(1.0)),
            ("lb", Scale(LB_TO_KG)),
            ("t", Scale(1e3)),
            ("t-uk", Scale(1016.05)),
            ("t-us", Scale(907.18474)),
        ],
    },
    Family {
        units: Units::DISTANCE,
        suffixes: &[
            ("m", Scale(1.0)),
            ("cm", Scale(0.01)),
            ("mm", Scale(0.001)),
            ("km", Scale(1e3)),
            ("ft", Scale(0.3048)),
            ("in", Scale(0.0254)),
            // wheel radii are sometimes given in half inches
            ("in/2", Scale(0.0127)),
        ],
    },
    Family {
        units: Units::AREA_DEFAULT_FT2,
        suffixes: &[
            ("", Scale(0.09290304)),
            ("*(m^2)", Scale(1.0)),
            ("m^2", Scale(1.0)),
            ("*(ft^2)", Scale(0.09290304)),
            ("ft^2", Scale(0.09290304)),
        ],
    },
    Family {
        units: Units::VOLUME,
        suffixes: &[
            ("*(ft^3)", Scale(28.3168)),
            ("ft^3", Scale(28.3168)),
            ("*(in^3)", Scale(0.0163871)),
            ("in^3", Scale(0.0163871)),
            ("*(m^3)", Scale(1000.0)),
            ("m^3", Scale(1000.0)),
            ("l", Scale(1.0)),
            ("g-uk", Scale(4.54609)),
            ("g-us", Scale(3.78541)),
            ("gal", Scale(3.78541)),
            ("gals", Scale(3.78541)),
        ],
    },
    Family {
        units: Units::VOLUME_DEFAULT_FT3,
        suffixes: &[
            ("*(ft^3)", Scale(1.0)),
            ("ft^3", Scale(1.0)),
            ("*(in^3)", Scale(0.000578703704)),
            ("in^3", Scale(0.000578703704)),
            ("*(m^3)", Scale(35.3146667)),
            ("m^3", Scale(35.3146667)),
            ("l", Scale(0.0353146667)),
            ("g-uk", Scale(0.16054372)),
            ("g-us", Scale(0.133680556)),
            ("gal", Scale(0.133680556)),
            ("gals", Scale(0.133680556)),
        ],
    },
    Family {
        units: Units::TIME,
        suffixes: &[("s", Scale(1.0)), ("m", Scale(60.0)), ("h", Scale(3600.0))],
    },
    Family {
        units: Units::TIME_DEFAULT_M,
        suffixes: &[
            ("", Scale(60.0)),
            ("s", Scale(1.0)),
            ("m", Scale(60.0)),
            ("h", Scale(3600.0)),
        ],
    },
    Family {
        units: Units::TIME_DEFAULT_H,
        suffixes: &[
            ("", Scale(3600.0)),
            ("s", Scale(1.0)),
            ("m", Scale(60.0)),
            ("h", Scale(3600.0)),
        ],
    },
    Family {
        units: Units::CURRENT,
        suffixes: &[("amps", Scale(1.0)), ("a", Scale(1.0))],
    },
    Family {
        units: Units::VOLTAGE,
        suffixes: &[("v", Scale(1.0)), ("kv", Scale(1000.0))],
    },
    Family {
        units: Units::MASS_RATE_DEFAULT_LBPH,
        suffixes: &[
            ("lb/h", Scale(1.0)),
            ("kg/h", Scale(2.20462)),
            ("g/h", Scale(0.00220462)),
        ],
    },
    Family {
        units: Units::SPEED,
        suffixes: SPEED,
    },
    Family {
        units: Units::SPEED_DEFAULT_MPH,
        suffixes: &[
            ("", Scale(MPH_TO_MPS)),
            ("m/s", Scale(1.0)),
            ("cm/s", Scale(0.01)),
            ("mm/s", Scale(0.001)),
            ("mph", Scale(MPH_TO_MPS)),
            ("ft/s", Scale(0.3048)),
            ("in/s", Scale(0.0254)),
            ("kph", Scale(KPH_TO_MPS)),
            ("km/h", Scale(KPH_TO_MPS)),
            ("kmph", Scale(KPH_TO_MPS)),
            ("kmh", Scale(KPH_TO_MPS)),
        ],
    },
    Family {
        units: Units::FREQUENCY,
        suffixes: &[
            ("hz", Scale(1.0)),
            ("rps", Scale(1.0)),
            ("rpm", Scale(1.0 / 60.0)),
        ],
    },
    Family {
        units: Units::FORCE,
        suffixes: &[
            ("n", Scale(1.0)),
            ("kn", Scale(1e3)),
            ("lbf", Scale(LBF_TO_N)),
            ("lb", Scale(LBF_TO_N)),
        ],
    },
    Family {
        units: Units::POWER,
        suffixes: &[("w", Scale(1.0)), ("kw", Scale(1e3)), ("hp", Scale(HP_TO_W))],
    },
    Family {
        units: Units::STIFFNESS,
        suffixes: &[("n/m", Scale(1.0))],
    },
    Family {
        units: Units::RESISTANCE,
        suffixes: &[
            ("n/m/s", Scale(1.0)),
            ("ns/m", Scale(1.0)),
            // lbf / mph
            ("lbf/mph", Scale(9.9503884)),
        ],
    },
    Family {
        units: Units::PRESSURE_DEFAULT_PSI,
        suffixes: &[
            ("psi", Scale(1.0)),
            ("bar", Scale(BAR_TO_PSI)),
            ("inhg", Scale(INHG_TO_PSI)),
            ("cmhg", Scale(CMHG_TO_PSI)),
            ("kpa", Scale(KPA_TO_PSI)),
        ],
    },
    Family {
        units: Units::PRESSURE_DEFAULT_INHG,
        suffixes: &[
            ("", Scale(INHG_TO_PSI)),
            ("psi", Scale(1.0)),
            ("bar", Scale(BAR_TO_PSI)),
            ("inhg", Scale(INHG_TO_PSI)),
            ("kpa", Scale(KPA_TO_PSI)),
        ],
    },
    Family {
        units: Units::PRESSURE_RATE_DEFAULT_PSIPS,
        suffixes: PRESSURE_RATE,
    },
    Family {
        units: Units::PRESSURE_RATE_DEFAULT_INHGPS,
        suffixes: &[
            ("", Scale(INHG_TO_PSI)),
            ("psi/s", Scale(1.0)),
            ("psi/min", Scale(1.0 / 60.0)),
            ("inhg/s", Scale(INHG_TO_PSI)),
            ("cmhg/s", Scale(CMHG_TO_PSI)),
            ("bar/s", Scale(BAR_TO_PSI)),
            ("bar/min", Scale(BAR_TO_PSI / 60.0)),
            ("kpa/s", Scale(0.145)),
        ],
    },
    Family {
        units: Units::ENERGY_DENSITY,
        suffixes: &[
            ("kj/kg", Scale(1.0)),
            ("j/g", Scale(1.0)),
            ("btu/lb", Scale(2.326)),
        ],
    },
    Family {
        units: Units::TEMPERATURE_DIFFERENCE,
        suffixes: &[("degc", Scale(1.0)), ("degf", Scale(100.0 / 180.0))],
    },
    Family {
        units: Units::ROTATIONAL_INERTIA,
        suffixes: &[],
    },
    Family {
        units: Units::RESISTANCE_DAVIS_C,
        suffixes: &[
            ("nm/s^2", Scale(1.0)),
            // lbf / mph²
            ("lbf/mph^2", Scale(22.2583849)),
        ],
    },
    Family {
        units: Units::TEMPERATURE,
        suffixes: &[("degc", Scale(1.0)), ("degf", FahrenheitToCelsius)],
    },
    Family {
        units: Units::ANGLE,
        suffixes: &[("rad", Scale(1.0)), ("deg", Scale(0.0174533))],
    },
    Family {
        units: Units::ENERGY,
        suffixes: &[
            ("j", Scale(1.0)),
            ("kj", Scale(1e3)),
            ("mj", Scale(1e6)),
            ("wh", Scale(3.6e3)),
            ("kwh", Scale(3.6e6)),
        ],
    },
    Family {
        units: Units::FORCE_RATE,
        suffixes: &[
            ("n/s", Scale(1.0)),
            ("kn/s", Scale(1e3)),
            ("lbf/s", Scale(LBF_TO_N)),
            ("lb/s", Scale(LBF_TO_N)),
        ],
    },
    Family {
        units: Units::POWER_RATE,
        suffixes: &[
            ("w/s", Scale(1.0)),
            ("kw/s", Scale(1e3)),
            ("hp/s", Scale(HP_TO_W)),
        ],
    },
];

impl Family {
    fn lookup(&self, suffix: &str) -> Option<Conversion> {
        let found = self
            .suffixes
            .iter()
            .find(|(name, _)| *name == suffix)
            .map(|(_, conversion)| *conversion);

        match (found, suffix.is_empty()) {
            (None, true) => Some(Scale(1.0)),
            (found, _) => found,
        }
    }
}

/// Find the conversion for a lower-cased suffix in the first family of
/// `units` that knows it
pub(crate) fn lookup(units: Units, suffix: &str) -> Option<Conversion> {
    FAMILIES
        .iter()
        .filter(|family| units.contains(family.units))
        .find_map(|family| family.lookup(suffix))
}
