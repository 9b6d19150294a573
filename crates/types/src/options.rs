//! Fixed option sets offered by the requirement and quotation forms.
//!
//! Each set is a closed enum with a stable wire name per variant. The wire name is what the
//! forms submit and what gets stored, so it must not change once released.

use std::fmt;
use std::str::FromStr;

/// An option value that is not part of its set.
#[derive(Debug, thiserror::Error)]
#[error("unknown {set} option: '{value}'")]
pub struct OptionError {
    pub set: &'static str,
    pub value: String,
}

macro_rules! option_set {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every option, in form order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Returns the stable wire name of this option.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = OptionError;

            /// Parses a wire name, ignoring ASCII case and surrounding whitespace.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|option| option.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| OptionError {
                        set: $label,
                        value: s.to_owned(),
                    })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

option_set! {
    /// Installed capacity of the requested or quoted system.
    CapacityClass ("capacity") {
        Kw1 => "1kW",
        Kw2 => "2kW",
        Kw3 => "3kW",
        Kw4 => "4kW",
        Kw5 => "5kW",
        Kw6 => "6kW",
        Kw8 => "8kW",
        Kw10 => "10kW",
        Kw15 => "15kW",
        Kw20 => "20kW",
        Kw25 => "25kW",
        Kw50 => "50kW",
        Kw100 => "100kW",
        /// Capacity outside the standard ratings; the description carries the detail.
        Custom => "custom",
    }
}

impl CapacityClass {
    /// Nominal rating in kilowatts, `None` for [`CapacityClass::Custom`].
    pub fn kilowatts(self) -> Option<u32> {
        match self {
            CapacityClass::Kw1 => Some(1),
            CapacityClass::Kw2 => Some(2),
            CapacityClass::Kw3 => Some(3),
            CapacityClass::Kw4 => Some(4),
            CapacityClass::Kw5 => Some(5),
            CapacityClass::Kw6 => Some(6),
            CapacityClass::Kw8 => Some(8),
            CapacityClass::Kw10 => Some(10),
            CapacityClass::Kw15 => Some(15),
            CapacityClass::Kw20 => Some(20),
            CapacityClass::Kw25 => Some(25),
            CapacityClass::Kw50 => Some(50),
            CapacityClass::Kw100 => Some(100),
            CapacityClass::Custom => None,
        }
    }
}

option_set! {
    /// How the system connects to the utility grid.
    SystemTopology ("system topology") {
        OnGrid => "on-grid",
        OffGrid => "off-grid",
        Hybrid => "hybrid",
    }
}

option_set! {
    /// Category of a priced line item in a quotation.
    ComponentCategory ("component category") {
        SolarPanel => "solar-panel",
        Inverter => "inverter",
        Battery => "battery",
        AcCable => "ac-cable",
        DcCable => "dc-cable",
        MountingStructure => "mounting-structure",
        Earthing => "earthing",
        LightningArrestor => "lightning-arrestor",
        Connector => "connector",
        JunctionBox => "junction-box",
        Other => "other",
    }
}

impl ComponentCategory {
    /// Cable line items may carry an included length in metres.
    pub fn is_cable(self) -> bool {
        matches!(self, ComponentCategory::AcCable | ComponentCategory::DcCable)
    }
}

option_set! {
    /// Kind of property the installation is for.
    PropertyType ("property type") {
        Residential => "residential",
        Commercial => "commercial",
        Industrial => "industrial",
        Agricultural => "agricultural",
        Institutional => "institutional",
    }
}

option_set! {
    /// Mounting surface at the installation site.
    RoofType ("roof type") {
        Concrete => "concrete",
        MetalSheet => "metal-sheet",
        Tiled => "tiled",
        Asbestos => "asbestos",
        GroundMount => "ground-mount",
        Other => "other",
    }
}

option_set! {
    /// When the customer wants the installation done.
    Timeline ("timeline") {
        Immediate => "immediate",
        WithinOneMonth => "within-1-month",
        WithinThreeMonths => "within-3-months",
        WithinSixMonths => "within-6-months",
        Exploring => "exploring",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_parses_case_insensitively() {
        assert_eq!("5kw".parse::<CapacityClass>().unwrap(), CapacityClass::Kw5);
        assert_eq!(" 10KW ".parse::<CapacityClass>().unwrap(), CapacityClass::Kw10);
        assert_eq!(
            "Custom".parse::<CapacityClass>().unwrap(),
            CapacityClass::Custom
        );
    }

    #[test]
    fn test_capacity_kilowatts() {
        assert_eq!(CapacityClass::Kw3.kilowatts(), Some(3));
        assert_eq!(CapacityClass::Custom.kilowatts(), None);
    }

    #[test]
    fn test_unknown_option_reports_set_and_value() {
        let err = "tidal".parse::<SystemTopology>().unwrap_err();

        assert_eq!(err.set, "system topology");
        assert_eq!(err.value, "tidal");
        assert_eq!(err.to_string(), "unknown system topology option: 'tidal'");
    }

    #[test]
    fn test_wire_names_round_trip_for_every_option() {
        for category in ComponentCategory::ALL {
            assert_eq!(
                category.as_str().parse::<ComponentCategory>().unwrap(),
                *category
            );
        }
        for roof in RoofType::ALL {
            assert_eq!(roof.as_str().parse::<RoofType>().unwrap(), *roof);
        }
    }

    #[test]
    fn test_cable_categories() {
        assert!(ComponentCategory::AcCable.is_cable());
        assert!(ComponentCategory::DcCable.is_cable());
        assert!(!ComponentCategory::Inverter.is_cable());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&SystemTopology::OffGrid).unwrap();
        assert_eq!(json, "\"off-grid\"");

        let parsed: Timeline = serde_json::from_str("\"within-3-months\"").unwrap();
        assert_eq!(parsed, Timeline::WithinThreeMonths);

        let bad: Result<PropertyType, _> = serde_json::from_str("\"castle\"");
        assert!(bad.is_err());
    }
}
