// ==========================================
// O&M Readiness Tracker - Command Line Entry
// ==========================================
// Usage:
//   om-readiness district-add <NAME> <CODE>
//   om-readiness import <DISTRICT_CODE> <FILE>
//   om-readiness report <DISTRICT_CODE> [BUFFER_DAYS]
//   om-readiness stats
// Database: $OM_TRACKER_DB or the platform data directory.
// ==========================================

use anyhow::{anyhow, bail, Context};
use chrono::Local;
use serde_json::json;
use std::path::Path;

use om_readiness::app::{get_default_db_path, AppState};
use om_readiness::domain::{ActorScope, District, NewDistrict, SchemeFilter};
use om_readiness::{logging, Role};

const CLI_ACTOR: &str = "cli";

const USAGE: &str = "usage:
  om-readiness district-add <NAME> <CODE>
  om-readiness import <DISTRICT_CODE> <FILE>
  om-readiness report <DISTRICT_CODE> [BUFFER_DAYS]
  om-readiness stats";

#[tokio::main]
async fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args).await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: &[String]) -> anyhow::Result<()> {
    let command = match args.first() {
        Some(c) => c.as_str(),
        None => {
            println!("{} {}", om_readiness::APP_NAME, om_readiness::VERSION);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    let db_path = get_default_db_path();
    tracing::info!(version = om_readiness::VERSION, db_path = %db_path, "starting");
    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;
    let admin = ActorScope::admin(CLI_ACTOR);

    match (command, &args[1..]) {
        ("district-add", [name, code]) => {
            let district = state.admin_api.create_district(
                &admin,
                &NewDistrict {
                    district_name: name.clone(),
                    district_code: code.clone(),
                    ..Default::default()
                },
            )?;
            print_json(&district)?;
        }
        ("import", [code, file]) => {
            let district = find_district(&state, &admin, code)?;
            let scope = ActorScope::district(CLI_ACTOR, Role::DistrictManager, &district.district_id);
            let response = state.import_api.import_schemes(&scope, Path::new(file)).await?;
            print_json(&response)?;
        }
        ("report", [code, rest @ ..]) if rest.len() <= 1 => {
            let buffer_days = rest
                .first()
                .map(|v| v.parse::<i64>().with_context(|| format!("invalid buffer days: {}", v)))
                .transpose()?;
            let district = find_district(&state, &admin, code)?;
            let scope = ActorScope::district(CLI_ACTOR, Role::Viewer, &district.district_id);
            let filter = SchemeFilter::default();
            let today = Local::now().date_naive();

            let tables = state
                .dashboard_api
                .report_tables(&scope, &filter, buffer_days, today)?;
            let report = json!({
                "district": district.district_name,
                "generated_on": today.format("%Y-%m-%d").to_string(),
                "status_summary": tables.status_summary,
                "forecast": tables.forecast,
                "monthly_om_forecast": tables.monthly_om_forecast,
                "problem_schemes": tables.problem_schemes,
            });
            print_json(&report)?;
        }
        ("stats", []) => {
            print_json(&state.admin_api.system_statistics(&admin)?)?;
        }
        _ => bail!("unrecognised arguments\n{}", USAGE),
    }

    Ok(())
}

fn find_district(state: &AppState, admin: &ActorScope, code: &str) -> anyhow::Result<District> {
    let code = code.trim().to_ascii_uppercase();
    state
        .admin_api
        .list_districts(admin)?
        .into_iter()
        .find(|d| d.district_code == code)
        .ok_or_else(|| anyhow!("no district with code {}", code))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
