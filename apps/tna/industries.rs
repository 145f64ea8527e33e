use serde::{Serialize, Serializer, ser::SerializeMap};

pub struct Sector {
    pub name: &'static str,
    pub industries: &'static [&'static str],
}

/// Sectors in presentation order; serialises as `{sector: [industry, ..]}`.
pub struct SectorDirectory(pub &'static [Sector]);

impl Serialize for SectorDirectory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for sector in self.0 {
            map.serialize_entry(sector.name, sector.industries)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
pub struct IndustriesResponse {
    pub sectors: SectorDirectory,
}

pub const SECTORS: &[Sector] = &[
    Sector {
        name: "Primary Sector (Raw Materials)",
        industries: &[
            "Agriculture",
            "Fisheries & Aquaculture",
            "Forestry & Logging",
            "Mining & Quarrying",
            "Oil & Gas",
        ],
    },
    Sector {
        name: "Secondary Sector (Manufacturing & Construction)",
        industries: &[
            "Automotive & Transportation Equipment",
            "Chemical Manufacturing",
            "Construction",
            "Electronics & Electrical Manufacturing",
            "Food & Beverage Processing",
            "Metal & Machinery",
            "Pharmaceuticals & Biotech Manufacturing",
            "Textile & Apparel Manufacturing",
        ],
    },
    Sector {
        name: "Tertiary Sector (Services & Retail)",
        industries: &[
            "Banking & Finance",
            "E-commerce & Retail",
            "Education",
            "Entertainment & Media",
            "Healthcare & Pharmaceuticals",
            "Hospitality & Tourism",
            "Insurance",
            "Logistics & Supply Chain",
            "Professional & Business Services",
            "Real Estate & Property Management",
            "Telecommunications",
            "Wholesale & Distribution",
        ],
    },
    Sector {
        name: "Quaternary Sector (Knowledge & Information)",
        industries: &[
            "Artificial Intelligence & Big Data",
            "Biotechnology & Life Sciences",
            "Cybersecurity",
            "Information Technology & Software Development",
            "Research & Development",
            "Space & Aerospace Technology",
        ],
    },
    Sector {
        name: "Quinary Sector (Government & Non-Profit)",
        industries: &[
            "Defense & Public Safety",
            "Environmental & Waste Management",
            "Government & Public Administration",
            "Non-Profit Organizations",
            "Social Services",
        ],
    },
];

pub fn directory() -> IndustriesResponse {
    IndustriesResponse {
        sectors: SectorDirectory(SECTORS),
    }
}
