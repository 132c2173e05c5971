// ==========================================
// ConfigApi integration tests
// ==========================================
// Coverage:
// 1. delay penalties: defaults, update, validation, upper bound
// 2. default verification buffer
// 3. per-district company name
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use om_readiness::api::ApiError;
use om_readiness::config::MAX_PENALTY_DAYS;
use om_readiness::domain::NewDistrict;
use om_readiness::engine::DEFAULT_BUFFER_DAYS;
use om_readiness::{ActorScope, IssueCategory, Role, Severity};

#[test]
fn test_default_penalties() {
    let env = ApiTestEnv::new().expect("test env");
    let p = env.config_api.get_delay_penalties().unwrap();
    assert_eq!(p.critical_days, 14);
    assert_eq!(p.high_days, 7);
    assert_eq!(p.material_days, 10);
    assert_eq!(p.payment_days, 21);
    assert_eq!(p.contractor_days, 14);
}

#[test]
fn test_update_penalty() {
    let env = ApiTestEnv::new().expect("test env");
    let p = env
        .config_api
        .update_delay_penalty(&env.manager(), "Payment", 30)
        .expect("update");
    assert_eq!(p.payment_days, 30);
    assert_eq!(p.critical_days, 14);

    // admin without a district may edit the process-wide table
    let p = env
        .config_api
        .update_delay_penalty(&env.admin(), "critical", 0)
        .expect("update");
    assert_eq!(p.critical_days, 0);
}

#[test]
fn test_update_penalty_rejections() {
    let env = ApiTestEnv::new().expect("test env");

    let result = env.config_api.update_delay_penalty(&env.manager(), "weather", 5);
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));

    let result = env.config_api.update_delay_penalty(&env.manager(), "high", -1);
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));

    let result = env.config_api.update_delay_penalty(&env.data_entry(), "high", 3);
    assert!(matches!(result, Err(ApiError::PermissionDenied(_))));

    assert_eq!(env.config_api.get_delay_penalties().unwrap().high_days, 7);
}

#[test]
fn test_penalty_upper_bound() {
    let env = ApiTestEnv::new().expect("test env");

    let result = env.config_api.update_delay_penalty(&env.manager(), "high", i64::MAX / 2);
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));

    let result = env
        .config_api
        .update_delay_penalty(&env.manager(), "high", MAX_PENALTY_DAYS + 1);
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    assert_eq!(env.config_api.get_delay_penalties().unwrap().high_days, 7);

    let p = env
        .config_api
        .update_delay_penalty(&env.manager(), "high", MAX_PENALTY_DAYS)
        .expect("update at bound");
    assert_eq!(p.high_days, MAX_PENALTY_DAYS);
}

#[test]
fn test_max_penalty_evaluates() {
    let env = ApiTestEnv::new().expect("test env");
    env.seed_simple(&[("S1", "Milkipur", "Alpha Infra")]);
    env.save_task("S1", 40.0, 10);
    env.report("S1", Severity::High, IssueCategory::Other, "Pump seized");
    env.report("S1", Severity::High, IssueCategory::Other, "Panel flooded");

    env.config_api
        .update_delay_penalty(&env.manager(), "high", MAX_PENALTY_DAYS)
        .expect("update penalty");

    let evals = env
        .dashboard_api
        .evaluate_schemes(&env.viewer(), &Default::default())
        .expect("evaluate");
    let s1 = &evals[0];
    assert_eq!(s1.delay.issue_delay_days, 2 * MAX_PENALTY_DAYS);
    assert_eq!(s1.delay.adjusted_days_remaining, 10 + 2 * MAX_PENALTY_DAYS);
    assert!(s1.delay.adjusted_days_remaining >= s1.progress.max_days_remaining);
}

#[test]
fn test_default_buffer() {
    let env = ApiTestEnv::new().expect("test env");
    assert_eq!(env.config_api.get_default_buffer_days().unwrap(), DEFAULT_BUFFER_DAYS);

    env.config_api.set_default_buffer_days(&env.admin(), 45).unwrap();
    assert_eq!(env.config_api.get_default_buffer_days().unwrap(), 45);

    let result = env.config_api.set_default_buffer_days(&env.admin(), 61);
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));

    let result = env.config_api.set_default_buffer_days(&env.manager(), 10);
    assert!(matches!(result, Err(ApiError::PermissionDenied(_))));

    assert_eq!(env.config_api.get_default_buffer_days().unwrap(), 45);
}

#[test]
fn test_company_name_per_district() {
    let env = ApiTestEnv::new().expect("test env");
    let default_name = env.config_api.get_company_name(&env.viewer()).unwrap();
    assert!(!default_name.is_empty());

    env.config_api
        .set_company_name(&env.manager(), "  Alpha Infra Pvt Ltd ")
        .unwrap();
    assert_eq!(
        env.config_api.get_company_name(&env.viewer()).unwrap(),
        "Alpha Infra Pvt Ltd"
    );

    let other = env
        .admin_api
        .create_district(
            &env.admin(),
            &NewDistrict {
                district_name: "Sultanpur".to_string(),
                district_code: "SUL001".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
    let other_viewer = ActorScope::district("viewer", Role::Viewer, &other.district_id);
    assert_eq!(env.config_api.get_company_name(&other_viewer).unwrap(), default_name);

    let result = env.config_api.set_company_name(&env.data_entry(), "X");
    assert!(matches!(result, Err(ApiError::PermissionDenied(_))));
    let result = env.config_api.set_company_name(&env.manager(), "   ");
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}
