#![forbid(unsafe_code)]

//! The closed set of geometry families.

/// A geometry or fractal family with its own configuration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Family {
    Polytope,
    RootSystem,
    CliffordTorus,
    NestedTorus,
    Mandelbulb,
    Mandelbox,
    Kali,
    QuaternionJulia,
    Menger,
    Schroedinger,
    BlackHole,
}

impl Family {
    pub const ALL: [Family; 11] = [
        Family::Polytope,
        Family::RootSystem,
        Family::CliffordTorus,
        Family::NestedTorus,
        Family::Mandelbulb,
        Family::Mandelbox,
        Family::Kali,
        Family::QuaternionJulia,
        Family::Menger,
        Family::Schroedinger,
        Family::BlackHole,
    ];

    /// Stable lowercase identifier, used in log fields.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Family::Polytope => "polytope",
            Family::RootSystem => "root_system",
            Family::CliffordTorus => "clifford_torus",
            Family::NestedTorus => "nested_torus",
            Family::Mandelbulb => "mandelbulb",
            Family::Mandelbox => "mandelbox",
            Family::Kali => "kali",
            Family::QuaternionJulia => "quaternion_julia",
            Family::Menger => "menger",
            Family::Schroedinger => "schroedinger",
            Family::BlackHole => "black_hole",
        }
    }

    /// Whether the family's stability defaults change with dimension.
    #[must_use]
    pub const fn is_dimension_sensitive(self) -> bool {
        !matches!(
            self,
            Family::Polytope | Family::RootSystem | Family::CliffordTorus | Family::NestedTorus
        )
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
