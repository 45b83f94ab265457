use super::*;
use uuid::Uuid;

#[test]
fn test_fresh_ids_differ() {
    assert_ne!(PersonId::new(), PersonId::new());
}

#[test]
fn test_from_uuid_keeps_value() {
    let uuid = Uuid::new_v4();
    assert_eq!(BudgetId::from(uuid).as_uuid(), &uuid);
}

#[test]
fn test_display_is_hyphenated_lowercase() {
    let id = PersonId::from_str("0191F0A82A4E7C3B9C1E3F5D2B8A7E01").unwrap();
    assert_eq!(id.to_string(), "0191f0a8-2a4e-7c3b-9c1e-3f5d2b8a7e01");
}

#[test]
fn test_parse_trims_whitespace() {
    let id = PersonId::new();
    let parsed = PersonId::from_str(&format!("  {id}\n")).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(BudgetId::from_str("not-a-uuid").is_err());
    assert!(BudgetId::from_str("").is_err());
}

#[test]
fn test_serializes_as_plain_string() {
    let uuid = Uuid::new_v4();
    let json = serde_json::to_string(&PersonId::from(uuid)).unwrap();
    assert_eq!(json, format!("\"{uuid}\""));
    let back: PersonId = serde_json::from_str(&json).unwrap();
    assert_eq!(back.as_uuid(), &uuid);
}
