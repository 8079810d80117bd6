use std::fmt;

/// Closed set of artifact classifications, persisted as text.
///
/// The codec is explicit: [`ArtifactType::parse`] rejects anything outside
/// the set (no silent coercion to `Unknown`), and [`ArtifactType::as_str`]
/// is the only string form that gets stored. Parsing is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactType {
    Weapon,
    EnergySource,
    CommunicationDevice,
    Machine,
    Tool,
    Monolith,
    Device,
    Unknown,
}

/// Input string did not name a known artifact type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid artifact type: {0:?}")]
pub struct UnknownArtifactType(pub String);

impl ArtifactType {
    pub const ALL: [ArtifactType; 8] = [
        ArtifactType::Weapon,
        ArtifactType::EnergySource,
        ArtifactType::CommunicationDevice,
        ArtifactType::Machine,
        ArtifactType::Tool,
        ArtifactType::Monolith,
        ArtifactType::Device,
        ArtifactType::Unknown,
    ];

    pub fn parse(s: &str) -> Result<Self, UnknownArtifactType> {
        match s.to_ascii_lowercase().as_str() {
            "weapon" => Ok(ArtifactType::Weapon),
            "energysource" => Ok(ArtifactType::EnergySource),
            "communicationdevice" => Ok(ArtifactType::CommunicationDevice),
            "machine" => Ok(ArtifactType::Machine),
            "tool" => Ok(ArtifactType::Tool),
            "monolith" => Ok(ArtifactType::Monolith),
            "device" => Ok(ArtifactType::Device),
            "unknown" => Ok(ArtifactType::Unknown),
            _ => Err(UnknownArtifactType(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactType::Weapon => "Weapon",
            ArtifactType::EnergySource => "EnergySource",
            ArtifactType::CommunicationDevice => "CommunicationDevice",
            ArtifactType::Machine => "Machine",
            ArtifactType::Tool => "Tool",
            ArtifactType::Monolith => "Monolith",
            ArtifactType::Device => "Device",
            ArtifactType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
