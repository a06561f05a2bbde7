use serde::Serialize;

/// A dropdown-backed form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Key used in form data and in the submission payload.
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub options: &'static [&'static str],
    pub mandatory: bool,
}

pub const FACILITY_OWNERS: &[&str] = &[
    "Government",
    "FBO",
    "Local Government",
    "NGO/FBO",
    "NGO",
    "Government/NGO",
];

pub const FACILITY_TYPES: &[&str] = &[
    "Base Hospital",
    "Central Hospital",
    "Centre Hospital",
    "Cottage Hospital",
    "County Hospital",
    "District Hospital",
    "General Hospital",
    "Health Centre",
    "Hopital Comboutique",
    "Hospital",
    "Level 1 Hospital",
    "Level 2 Hospital",
    "Level 3 Hospital",
    "Medical Centre",
    "Memorial Hospital",
    "Metropolitan Hospital",
    "Mini Hospital",
    "Municipal Hospital",
    "National Hospital",
    "National Referral Hospital",
    "Primary Hospital",
    "Regional Hospital",
    "Rural Hospital",
    "Sub-District Hospital",
    "Teaching Hospital",
    "Tertiary Hospital",
    "University Hospital",
];

pub const HEALTHCARE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "facilityOwnerType",
        label: "Facility Owner Type",
        placeholder: "Select owner type",
        options: FACILITY_OWNERS,
        mandatory: true,
    },
    FieldSpec {
        name: "facilityType",
        label: "Facility Type",
        placeholder: "Select facility type",
        options: FACILITY_TYPES,
        mandatory: true,
    },
];
