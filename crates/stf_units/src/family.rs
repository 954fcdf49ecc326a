//! Quantity family flags
//!
use std::{fmt, ops, str::FromStr};

use crate::error::{Error, Result};

/// A set of quantity families a numeric literal may be expressed in.
///
/// Families are bit flags so a caller may accept several at once, e.g.
/// `Units::PRESSURE_DEFAULT_PSI | Units::COMPULSORY`. When a suffix is
/// looked up, families are probed in bit order and the first one that knows
/// the suffix wins, so `Units::ANY` reads `m` as metres rather than minutes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Units(u64);

impl Units {
    /// No unit parsing at all, the literal is used as is
    pub const NONE: Self = Self(0);
    /// Warn when the literal carries no suffix
    pub const COMPULSORY: Self = Self(1 << 0);
    /// kg
    pub const MASS: Self = Self(1 << 1);
    /// m
    pub const DISTANCE: Self = Self(1 << 2);
    /// m², unsuffixed values are ft²
    pub const AREA_DEFAULT_FT2: Self = Self(1 << 3);
    /// litres
    pub const VOLUME: Self = Self(1 << 4);
    /// ft³
    pub const VOLUME_DEFAULT_FT3: Self = Self(1 << 5);
    /// s
    pub const TIME: Self = Self(1 << 6);
    /// s, unsuffixed values are minutes
    pub const TIME_DEFAULT_M: Self = Self(1 << 7);
    /// s, unsuffixed values are hours
    pub const TIME_DEFAULT_H: Self = Self(1 << 8);
    /// A
    pub const CURRENT: Self = Self(1 << 9);
    /// V
    pub const VOLTAGE: Self = Self(1 << 10);
    /// lb/h
    pub const MASS_RATE_DEFAULT_LBPH: Self = Self(1 << 11);
    /// m/s
    pub const SPEED: Self = Self(1 << 12);
    /// m/s, unsuffixed values are mph
    pub const SPEED_DEFAULT_MPH: Self = Self(1 << 13);
    /// Hz
    pub const FREQUENCY: Self = Self(1 << 14);
    /// N
    pub const FORCE: Self = Self(1 << 15);
    /// W
    pub const POWER: Self = Self(1 << 16);
    /// N/m
    pub const STIFFNESS: Self = Self(1 << 17);
    /// N/m/s
    pub const RESISTANCE: Self = Self(1 << 18);
    /// psi
    pub const PRESSURE_DEFAULT_PSI: Self = Self(1 << 19);
    /// psi, unsuffixed values are inHg
    pub const PRESSURE_DEFAULT_INHG: Self = Self(1 << 20);
    /// psi/s
    pub const PRESSURE_RATE_DEFAULT_PSIPS: Self = Self(1 << 21);
    /// psi/s, unsuffixed values are inHg/s
    pub const PRESSURE_RATE_DEFAULT_INHGPS: Self = Self(1 << 22);
    /// kJ/kg
    pub const ENERGY_DENSITY: Self = Self(1 << 23);
    /// °C difference
    pub const TEMPERATURE_DIFFERENCE: Self = Self(1 << 24);
    /// kg·m²
    pub const ROTATIONAL_INERTIA: Self = Self(1 << 25);
    /// N/(m/s)²
    pub const RESISTANCE_DAVIS_C: Self = Self(1 << 26);
    /// °C
    pub const TEMPERATURE: Self = Self(1 << 27);
    /// rad
    pub const ANGLE: Self = Self(1 << 28);
    /// J
    pub const ENERGY: Self = Self(1 << 29);
    /// N/s
    pub const FORCE_RATE: Self = Self(1 << 30);
    /// W/s
    pub const POWER_RATE: Self = Self(1 << 31);
    /// Every quantity family, without [`Units::COMPULSORY`]
    pub const ANY: Self = Self(0xFFFF_FFFE);

    /// Raw flag bits
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Whether no flag is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Checks if any of the given flags are set
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Checks if all of the given flags are set
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Returns the union of two flag sets
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the intersection of two flag sets
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Iterate over the single named flags contained in this set, in bit order
    pub fn iter(self) -> impl Iterator<Item = Units> {
        NAMES
            .iter()
            .map(|(flag, _)| *flag)
            .filter(move |flag| self.contains(*flag))
    }
}

const NAMES: [(Units, &str); 32] = [
    (Units::COMPULSORY, "Compulsory"),
    (Units::MASS, "Mass"),
    (Units::DISTANCE, "Distance"),
    (Units::AREA_DEFAULT_FT2, "AreaDefaultFT2"),
    (Units::VOLUME, "Volume"),
    (Units::VOLUME_DEFAULT_FT3, "VolumeDefaultFT3"),
    (Units::TIME, "Time"),
    (Units::TIME_DEFAULT_M, "TimeDefaultM"),
    (Units::TIME_DEFAULT_H, "TimeDefaultH"),
    (Units::CURRENT, "Current"),
    (Units::VOLTAGE, "Voltage"),
    (Units::MASS_RATE_DEFAULT_LBPH, "MassRateDefaultLBpH"),
    (Units::SPEED, "Speed"),
    (Units::SPEED_DEFAULT_MPH, "SpeedDefaultMPH"),
    (Units::FREQUENCY, "Frequency"),
    (Units::FORCE, "Force"),
    (Units::POWER, "Power"),
    (Units::STIFFNESS, "Stiffness"),
    (Units::RESISTANCE, "Resistance"),
    (Units::PRESSURE_DEFAULT_PSI, "PressureDefaultPSI"),
    (Units::PRESSURE_DEFAULT_INHG, "PressureDefaultInHg"),
    (Units::PRESSURE_RATE_DEFAULT_PSIPS, "PressureRateDefaultPSIpS"),
    (Units::PRESSURE_RATE_DEFAULT_INHGPS, "PressureRateDefaultInHgpS"),
    (Units::ENERGY_DENSITY, "EnergyDensity"),
    (Units::TEMPERATURE_DIFFERENCE, "TemperatureDifference"),
    (Units::ROTATIONAL_INERTIA, "RotationalInertia"),
    (Units::RESISTANCE_DAVIS_C, "ResistanceDavisC"),
    (Units::TEMPERATURE, "Temperature"),
    (Units::ANGLE, "Angle"),
    (Units::ENERGY, "Energy"),
    (Units::FORCE_RATE, "ForceRate"),
    (Units::POWER_RATE, "PowerRate"),
];

impl ops::BitOr for Units {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl ops::BitOrAssign for Units {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl ops::BitAnd for Units {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }

        let mut rest = *self;
        let mut first = true;
        let mut write = |f: &mut fmt::Formatter<'_>, name: &str| {
            let sep = if first { "" } else { ", " };
            first = false;
            write!(f, "{sep}{name}")
        };

        if rest.contains(Units::ANY) {
            write(f, "Any")?;
            rest = Self(rest.0 & !Units::ANY.0);
        }
        for (flag, name) in NAMES {
            if rest.contains(flag) {
                write(f, name)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Units({self})")
    }
}

impl FromStr for Units {
    type Err = Error;

    /// Parse family names separated by `,` or `|`, e.g. `"speed | compulsory"`.
    /// Underscores and case are ignored, so `pressure_default_psi` and
    /// `PressureDefaultPSI` name the same family.
    fn from_str(s: &str) -> Result<Self> {
        let mut units = Units::NONE;
        for part in s.split([',', '|']) {
            let wanted: String = part
                .trim()
                .chars()
                .filter(|c| *c != '_' && *c != '-')
                .collect();

            units |= match wanted.to_ascii_lowercase().as_str() {
                "none" => Units::NONE,
                "any" => Units::ANY,
                _ => NAMES
                    .iter()
                    .find(|(_, name)| name.eq_ignore_ascii_case(&wanted))
                    .map(|(flag, _)| *flag)
                    .ok_or_else(|| Error::UnknownFamily(part.trim().to_string()))?,
            };
        }
        Ok(units)
    }
}
