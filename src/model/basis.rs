use std::fmt;

use serde::{Deserialize, Serialize};

/// Pair of model axes mapped onto the image's horizontal and vertical axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Basis {
    #[default]
    Xy,
    Xz,
    Yz,
}

impl Basis {
    pub const ALL: [Self; 3] = [Self::Xy, Self::Xz, Self::Yz];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Xy => "xy",
            Self::Xz => "xz",
            Self::Yz => "yz",
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Namespace of addressable objects; also selects which namespace colors a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DomainKind {
    Cell,
    #[default]
    Material,
}

impl DomainKind {
    pub const ALL: [Self; 2] = [Self::Cell, Self::Material];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cell => "cell",
            Self::Material => "material",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Cell => "Cell",
            Self::Material => "Material",
        }
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}
