use serde::{Deserialize, Serialize};

/// Standard drag-curve model tag attached to a projectile profile.
///
/// G1 suits flat-based projectiles, G7 boat-tailed ones; the tag selects
/// which Mach→Cd table the drag force consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragModel {
    G1,
    G7,
}

impl DragModel {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "G1" => Some(DragModel::G1),
            "G7" => Some(DragModel::G7),
            _ => None,
        }
    }
}

impl std::fmt::Display for DragModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
