/// Role assigned to a user by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Archivist,
    Researcher,
    Viewer,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(Role::Admin),
            "Archivist" => Some(Role::Archivist),
            "Researcher" => Some(Role::Researcher),
            "Viewer" => Some(Role::Viewer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Archivist => "Archivist",
            Role::Researcher => "Researcher",
            Role::Viewer => "Viewer",
        }
    }
}

/// Named permission grant, independent of role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    VerifyCatalogRecords,
    UploadMedia,
}

impl Capability {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CanVerifyCatalogRecords" => Some(Capability::VerifyCatalogRecords),
            "CanUploadMedia" => Some(Capability::UploadMedia),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::VerifyCatalogRecords => "CanVerifyCatalogRecords",
            Capability::UploadMedia => "CanUploadMedia",
        }
    }
}

/// The effective capability set of one caller, derived from roles plus
/// explicit grants. Built once per request and passed into service calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    verify_catalog_records: bool,
    upload_media: bool,
}

impl CapabilitySet {
    /// Derive the capability set from claim strings.
    ///
    /// Admin and Archivist roles imply `CanVerifyCatalogRecords`; Admin and
    /// Researcher imply `CanUploadMedia`. Unknown role or grant strings are
    /// ignored rather than rejected, matching how the identity provider
    /// treats unrecognized claims.
    pub fn from_claims(roles: &[String], grants: &[String]) -> Self {
        let mut set = CapabilitySet::default();

        for role in roles.iter().filter_map(|r| Role::parse(r)) {
            match role {
                Role::Admin => {
                    set.verify_catalog_records = true;
                    set.upload_media = true;
                }
                Role::Archivist => set.verify_catalog_records = true,
                Role::Researcher => set.upload_media = true,
                Role::Viewer => {}
            }
        }

        for grant in grants.iter().filter_map(|g| Capability::parse(g)) {
            match grant {
                Capability::VerifyCatalogRecords => set.verify_catalog_records = true,
                Capability::UploadMedia => set.upload_media = true,
            }
        }

        set
    }

    pub fn contains(&self, cap: Capability) -> bool {
        match cap {
            Capability::VerifyCatalogRecords => self.verify_catalog_records,
            Capability::UploadMedia => self.upload_media,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn admin_role_implies_verify_and_upload() {
        let caps = CapabilitySet::from_claims(&strings(&["Admin"]), &[]);
        assert!(caps.contains(Capability::VerifyCatalogRecords));
        assert!(caps.contains(Capability::UploadMedia));
    }

    #[test]
    fn archivist_can_verify_but_not_upload() {
        let caps = CapabilitySet::from_claims(&strings(&["Archivist"]), &[]);
        assert!(caps.contains(Capability::VerifyCatalogRecords));
        assert!(!caps.contains(Capability::UploadMedia));
    }

    #[test]
    fn viewer_has_no_capabilities() {
        let caps = CapabilitySet::from_claims(&strings(&["Viewer"]), &[]);
        assert!(!caps.contains(Capability::VerifyCatalogRecords));
        assert!(!caps.contains(Capability::UploadMedia));
    }

    #[test]
    fn explicit_grant_without_role() {
        let caps = CapabilitySet::from_claims(&[], &strings(&["CanVerifyCatalogRecords"]));
        assert!(caps.contains(Capability::VerifyCatalogRecords));
        assert!(!caps.contains(Capability::UploadMedia));
    }

    #[test]
    fn unknown_claims_are_ignored() {
        let caps = CapabilitySet::from_claims(
            &strings(&["Overlord"]),
            &strings(&["CanDoAnything"]),
        );
        assert_eq!(caps, CapabilitySet::default());
    }
}
