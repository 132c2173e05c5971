// ==========================================
// AdminApi integration tests
// ==========================================
// Coverage:
// 1. district creation, duplicate codes, activation
// 2. district wipe
// 3. system statistics
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use om_readiness::api::ApiError;
use om_readiness::domain::NewDistrict;
use om_readiness::{IssueCategory, Severity};

fn new_district(name: &str, code: &str) -> NewDistrict {
    NewDistrict {
        district_name: name.to_string(),
        district_code: code.to_string(),
        contact_person: Some("  ".to_string()),
        contact_email: Some("ee.office@example.org".to_string()),
        contact_phone: None,
    }
}

#[test]
fn test_create_district_normalises_input() {
    let env = ApiTestEnv::new().expect("test env");
    let district = env
        .admin_api
        .create_district(&env.admin(), &new_district(" Sultanpur ", " sul001 "))
        .expect("create");

    assert_eq!(district.district_name, "Sultanpur");
    assert_eq!(district.district_code, "SUL001");
    assert!(district.is_active);
    assert_eq!(district.contact_person, None);
    assert_eq!(district.contact_email.as_deref(), Some("ee.office@example.org"));

    let all = env.admin_api.list_districts(&env.admin()).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_duplicate_code_rejected() {
    let env = ApiTestEnv::new().expect("test env");
    let result = env
        .admin_api
        .create_district(&env.admin(), &new_district("Ayodhya Again", "ayodhya001"));
    assert!(matches!(result, Err(ApiError::BusinessRuleViolation(_))));

    let result = env
        .admin_api
        .create_district(&env.admin(), &new_district("", "NEW001"));
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[test]
fn test_admin_only() {
    let env = ApiTestEnv::new().expect("test env");
    let result = env
        .admin_api
        .create_district(&env.manager(), &new_district("Sultanpur", "SUL001"));
    assert!(matches!(result, Err(ApiError::PermissionDenied(_))));

    assert!(matches!(
        env.admin_api.system_statistics(&env.viewer()),
        Err(ApiError::PermissionDenied(_))
    ));
    assert!(matches!(
        env.admin_api.wipe_district(&env.manager(), &env.district_id),
        Err(ApiError::PermissionDenied(_))
    ));
}

#[test]
fn test_deactivate_district() {
    let env = ApiTestEnv::new().expect("test env");
    let district = env
        .admin_api
        .set_district_active(&env.admin(), &env.district_id, false)
        .expect("deactivate");
    assert!(!district.is_active);

    let stats = env.admin_api.system_statistics(&env.admin()).unwrap();
    assert_eq!(stats.active_districts, 0);

    let missing = env.admin_api.set_district_active(&env.admin(), "no-such-district", true);
    assert!(matches!(missing, Err(ApiError::NotFound(_))));
}

#[test]
fn test_wipe_district_removes_everything() {
    let env = ApiTestEnv::new().expect("test env");
    env.seed_simple(&[("S1", "Milkipur", "Alpha Infra"), ("S2", "Sohawal", "Beta Projects")]);
    env.save_task("S1", 30.0, 10);
    env.report("S2", Severity::Critical, IssueCategory::Payment, "Bill pending");
    env.config_api
        .set_company_name(&env.manager(), "Alpha Infra Pvt Ltd")
        .unwrap();

    let counts = env
        .admin_api
        .wipe_district(&env.admin(), &env.district_id)
        .expect("wipe");
    assert_eq!(counts.schemes, 2);
    assert_eq!(counts.progress, 1);
    assert_eq!(counts.issues, 1);
    assert_eq!(counts.settings, 1);

    assert!(env.admin_api.list_districts(&env.admin()).unwrap().is_empty());

    let again = env.admin_api.wipe_district(&env.admin(), &env.district_id);
    assert!(matches!(again, Err(ApiError::NotFound(_))));
}

#[test]
fn test_system_statistics() {
    let env = ApiTestEnv::new().expect("test env");
    env.seed_simple(&[("S1", "Milkipur", "Alpha Infra"), ("S2", "Sohawal", "Beta Projects")]);
    let other = env
        .admin_api
        .create_district(&env.admin(), &new_district("Sultanpur", "SUL001"))
        .unwrap();

    let stats = env.admin_api.system_statistics(&env.admin()).unwrap();
    assert_eq!(stats.active_districts, 2);
    assert_eq!(stats.total_schemes, 2);

    let per: Vec<(&str, i64)> = stats
        .schemes_per_district
        .iter()
        .map(|d| (d.district_name.as_str(), d.scheme_count))
        .collect();
    assert_eq!(per, vec![("Ayodhya", 2), ("Sultanpur", 0)]);
    assert_eq!(stats.schemes_per_district[1].district_id, other.district_id);
}
