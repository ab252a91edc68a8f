/// Named-entity category as labelled by the recognizer.
///
/// Only the three place categories are consumed by the pipeline; every other
/// label is kept verbatim in `Other` so it can be logged.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    /// Countries, cities, states (`GPE`).
    GeopoliticalEntity,
    /// Non-political locations: mountains, rivers, regions (`LOC`).
    Location,
    /// Buildings, airports, bridges, landmarks (`FAC`).
    Facility,
    Other(String),
}

impl EntityCategory {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "GPE" => Self::GeopoliticalEntity,
            "LOC" => Self::Location,
            "FAC" => Self::Facility,
            _ => Self::Other(label.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::GeopoliticalEntity => "GPE",
            Self::Location => "LOC",
            Self::Facility => "FAC",
            Self::Other(label) => label,
        }
    }

    pub fn is_place(&self) -> bool {
        matches!(
            self,
            Self::GeopoliticalEntity | Self::Location | Self::Facility
        )
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
