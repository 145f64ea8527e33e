use tna::store::{JsonFileStore, OrganizationStore, StoreError};
use utils::types::Organization;

fn organization() -> Organization {
    Organization {
        organization_id: "Q7ZX0P2M4KD".to_string(),
        name: "Northwind".to_string(),
        company_registration_number: "NW-42".to_string(),
        industry: "Logistics & Supply Chain".to_string(),
        custom_industry: None,
        vision: None,
        mission: Some("Move things reliably".to_string()),
        objectives: vec!["Automate warehouse scheduling".to_string()],
        client_charter: Some("Deliveries within 48 hours".to_string()),
    }
}

#[tokio::test]
async fn test_missing_file_has_no_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("organizations.json"));

    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_saved_record_is_loaded_back() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("organizations.json"));

    store.save(&organization()).await.unwrap();

    assert_eq!(store.load().await.unwrap(), Some(organization()));
    assert!(!dir.path().join("organizations.json.tmp").exists());

    let raw = std::fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["organizationID"], "Q7ZX0P2M4KD");
    assert_eq!(value["client_charter"], "Deliveries within 48 hours");
}

#[tokio::test]
async fn test_unreadable_contents_are_treated_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("organizations.json");
    let store = JsonFileStore::new(&path);

    for contents in ["", "   \n", "{not json", "[]", "\"text\"", "null"] {
        std::fs::write(&path, contents).unwrap();
        assert!(
            store.load().await.unwrap().is_none(),
            "contents {contents:?} should load as no record"
        );
    }
}

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("data/tna/organizations.json"));

    store.save(&organization()).await.unwrap();

    assert!(store.load().await.unwrap().is_some());
}

#[tokio::test]
async fn test_save_replaces_previous_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("organizations.json"));

    store.save(&organization()).await.unwrap();
    let mut updated = organization();
    updated.objectives.push("Cut fuel costs".to_string());
    store.save(&updated).await.unwrap();

    assert_eq!(store.load().await.unwrap().unwrap().objectives.len(), 2);
}

#[tokio::test]
async fn test_record_without_id_or_objectives_still_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("organizations.json");
    std::fs::write(
        &path,
        r#"{"name": "Legacy Co", "industry": "Education", "objectives": null}"#,
    )
    .unwrap();

    let record = JsonFileStore::new(&path).load().await.unwrap().unwrap();

    assert_eq!(record.name, "Legacy Co");
    assert!(record.organization_id.is_empty());
    assert!(record.objectives.is_empty());
}

#[tokio::test]
async fn test_object_with_wrong_field_types_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("organizations.json");
    std::fs::write(&path, r#"{"name": 42, "objectives": "grow"}"#).unwrap();

    let result = JsonFileStore::new(&path).load().await;

    assert!(matches!(result, Err(StoreError::Malformed(_))));
}
