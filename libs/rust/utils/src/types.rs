use serde::{Deserialize, Deserializer, Serialize};

/// Organization details as submitted by the client
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NewOrganization {
    pub name: String,
    #[serde(rename = "companyRegistrationNumber")]
    pub company_registration_number: String,
    pub industry: String,
    /// Free-text industry when "Other" was picked
    #[serde(rename = "customIndustry", default)]
    pub custom_industry: Option<String>,
    #[serde(default)]
    pub vision: Option<String>,
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default)]
    pub objectives: Option<Vec<String>>,
    #[serde(default)]
    pub client_charter: Option<String>,
}

/// The single stored organization record.
///
/// Reading is lenient: older records may lack the identifier or the
/// required fields, and any of them may be `null`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Organization {
    #[serde(rename = "organizationID", default, deserialize_with = "null_as_default")]
    pub organization_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(
        rename = "companyRegistrationNumber",
        default,
        deserialize_with = "null_as_default"
    )]
    pub company_registration_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub industry: String,
    #[serde(rename = "customIndustry", default)]
    pub custom_industry: Option<String>,
    #[serde(default)]
    pub vision: Option<String>,
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub client_charter: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Organization {
    pub fn from_new(organization_id: String, new: NewOrganization) -> Self {
        Self {
            organization_id,
            name: new.name,
            company_registration_number: new.company_registration_number,
            industry: new.industry,
            custom_industry: new.custom_industry,
            vision: new.vision,
            mission: new.mission,
            objectives: new.objectives.unwrap_or_default(),
            client_charter: new.client_charter,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OrganizationCreated {
    pub message: String,
    #[serde(rename = "organizationID")]
    pub organization_id: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TrainingRecommendations {
    pub training_recommendations: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ErrorBody {
    pub error: String,
}
