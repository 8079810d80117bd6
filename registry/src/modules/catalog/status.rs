use std::fmt;

/// Lifecycle state of a catalog record, persisted as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogStatus {
    Draft,
    Submitted,
    Verified,
    Rejected,
}

/// Input string did not name a known catalog status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid catalog status: {0:?}")]
pub struct UnknownCatalogStatus(pub String);

impl CatalogStatus {
    pub fn parse(s: &str) -> Result<Self, UnknownCatalogStatus> {
        match s {
            "Draft" => Ok(CatalogStatus::Draft),
            "Submitted" => Ok(CatalogStatus::Submitted),
            "Verified" => Ok(CatalogStatus::Verified),
            "Rejected" => Ok(CatalogStatus::Rejected),
            _ => Err(UnknownCatalogStatus(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogStatus::Draft => "Draft",
            CatalogStatus::Submitted => "Submitted",
            CatalogStatus::Verified => "Verified",
            CatalogStatus::Rejected => "Rejected",
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// `allow_resubmission` opens the single optional edge
    /// Rejected → Submitted; everything else is fixed.
    pub fn can_transition_to(self, next: CatalogStatus, allow_resubmission: bool) -> bool {
        matches!(
            (self, next),
            (CatalogStatus::Draft, CatalogStatus::Submitted)
                | (CatalogStatus::Submitted, CatalogStatus::Verified)
                | (CatalogStatus::Submitted, CatalogStatus::Rejected)
        ) || (allow_resubmission
            && matches!((self, next), (CatalogStatus::Rejected, CatalogStatus::Submitted)))
    }
}

impl fmt::Display for CatalogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
