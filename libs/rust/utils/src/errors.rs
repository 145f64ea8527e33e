//organization store
pub const ORGANIZATION_ALREADY_EXISTS: &str =
    "Organization already exists. Contact support to modify details.";
pub const ORGANIZATION_NOT_FOUND: &str = "No organization found. Please add one first.";
pub const ORGANIZATION_ADDED: &str = "Organization added successfully";

//recommendations
pub const NO_OBJECTIVES_PROVIDED: &str = "No objectives provided";
pub const EMPTY_SKILL_CATALOG: &str = "Skill catalog is empty";
pub const EMBEDDING_PROVIDER_UNAVAILABLE: &str = "Embedding provider unavailable";
