use ipon::cli::accounts::FormInput;
use ipon::core::config::{Palette, StorageKind};
use ipon::core::persistence::Persistence;
use ipon::core::{AccountStore, LoadStatus, Quadrant, aggregate, chart, label_quadrant};
use ipon::store::file::FilePersistence;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

mod test_utils {
    use std::path::Path;

    pub fn write_config(dir: &Path, storage: &str) -> std::path::PathBuf {
        let config_path = dir.join("config.yaml");
        let data_dir = dir.join("data");
        let config_content = format!(
            r##"
currency: "PHP"
palette: ["#007AFF", "#5856D6", "#34C759"]
storage: {storage}
data_path: "{}"
"##,
            data_dir.display()
        );
        std::fs::write(&config_path, config_content).expect("Failed to write config file");
        config_path
    }
}

async fn run(command: ipon::AppCommand, config_path: &Path) -> anyhow::Result<()> {
    ipon::run_command(command, Some(config_path.to_str().unwrap())).await
}

fn add(institution: &str, name: Option<&str>, balance: &str) -> ipon::AppCommand {
    ipon::AppCommand::Add(FormInput {
        institution: Some(institution.to_string()),
        custom_name: name.map(str::to_string),
        balance: Some(balance.to_string()),
    })
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), "file");

    run(add("BDO Unibank", None, "1000"), &config_path).await.unwrap();
    run(add("GCash", None, "500"), &config_path).await.unwrap();
    run(add("CREDIT CARD", None, "-300"), &config_path).await.unwrap();

    let rejected = run(add("Maya", None, "-1"), &config_path).await;
    assert!(rejected.is_err());
    let rejected = run(add("Other", Some("  "), "1"), &config_path).await;
    assert!(rejected.is_err());
    let rejected = run(add("BDO Unibank", None, "1e27"), &config_path).await;
    assert!(rejected.is_err());

    run(
        ipon::AppCommand::Overview { select: vec![0] },
        &config_path,
    )
    .await
    .unwrap();
    run(ipon::AppCommand::List, &config_path).await.unwrap();

    let data_file = dir.path().join("data").join("savingsData.json");
    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&data_file).unwrap()).unwrap();
    info!(?saved, "Saved accounts");
    let names: Vec<_> = saved
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["BDO Unibank", "GCash", "CREDIT CARD"]);
    assert_eq!(saved[2]["balance"].as_f64(), Some(-300.0));
    assert!(saved[0]["id"].is_string());

    let first_id = saved[0]["id"].as_str().unwrap().to_string();
    run(
        ipon::AppCommand::Edit {
            id: first_id.clone(),
            input: FormInput {
                balance: Some("1200".to_string()),
                ..FormInput::default()
            },
        },
        &config_path,
    )
    .await
    .unwrap();
    run(ipon::AppCommand::Delete { id: first_id.clone() }, &config_path)
        .await
        .unwrap();
    assert!(
        run(ipon::AppCommand::Delete { id: first_id }, &config_path)
            .await
            .is_err()
    );

    let persistence = Arc::new(FilePersistence::new(&data_file));
    let (store, status) = AccountStore::open(persistence).await;
    assert!(matches!(status, LoadStatus::Loaded(2)));
    assert_eq!(store.accounts()[0].name, "GCash");
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_fjall_storage() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), "fjall");

    run(add("Other", Some("Piggy Bank"), "250.75"), &config_path)
        .await
        .unwrap();
    run(ipon::AppCommand::List, &config_path).await.unwrap();

    let config = ipon::core::config::AppConfig::load_from_path(&config_path).unwrap();
    assert_eq!(config.storage, StorageKind::Fjall);
    assert!(dir.path().join("data").join("db").exists());
}

#[test_log::test(tokio::test)]
async fn test_corrupt_data_file_is_recovered() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), "file");
    let data_dir = dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("savingsData.json"), "{definitely not json").unwrap();

    run(ipon::AppCommand::List, &config_path).await.unwrap();
    run(add("CASH", None, "20"), &config_path).await.unwrap();

    let persistence = Arc::new(FilePersistence::in_dir(&data_dir));
    let (store, status) = AccountStore::open(persistence).await;
    assert!(matches!(status, LoadStatus::Loaded(1)));
    assert_eq!(store.accounts()[0].name, "CASH");
}

#[test_log::test(tokio::test)]
async fn test_totals_never_drift_from_recomputation() {
    let dir = tempfile::tempdir().unwrap();
    let persistence = Arc::new(FilePersistence::in_dir(dir.path()));
    let (mut store, _) = AccountStore::open(persistence.clone()).await;
    let palette = Palette::default();

    let a = store.add("BDO Unibank", "1000").unwrap();
    let b = store.add("Credit Card", "-250.50").unwrap();
    let c = store.add("Cash", "0").unwrap();
    store.add("Maya", "75.25").unwrap();
    store.update(&a, "BDO Unibank", "900").unwrap();
    store.remove(&c);
    store.update(&b, "Credit Card", "-100").unwrap();

    let breakdown = aggregate(store.accounts(), &palette);
    let recomputed: Decimal = store.accounts().iter().map(|a| a.balance.abs()).sum();
    assert_eq!(breakdown.total, recomputed);
    assert_eq!(breakdown.total, chart::total_balance(store.accounts()));
    let nonzero = store
        .accounts()
        .iter()
        .filter(|a| !a.balance.is_zero())
        .count();
    assert_eq!(breakdown.slices.len(), nonzero);

    store.flush().await;
    assert!(persistence.exists().await);
    let (reopened, _) = AccountStore::open(persistence).await;
    assert_eq!(aggregate(reopened.accounts(), &palette), breakdown);
}

#[test_log::test(tokio::test)]
async fn test_sample_scenario_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let persistence = Arc::new(FilePersistence::in_dir(dir.path()));
    let (mut store, status) = AccountStore::open(persistence).await;
    assert!(matches!(status, LoadStatus::Fresh));

    store.add("BDO", "1000").unwrap();
    store.add("GCash", "500").unwrap();
    store.add("Credit Card", "-300").unwrap();

    let breakdown = aggregate(store.accounts(), &Palette::default());
    assert_eq!(breakdown.total, Decimal::from(1800));
    let pcts: Vec<_> = breakdown.slices.iter().map(|s| s.percentage).collect();
    assert_eq!(pcts, vec![56, 28, 17]);

    // spans 200°, 100°, 60°: midpoints 100°, 250°, 330°
    assert_eq!(label_quadrant(&breakdown, 0), Quadrant::BottomRight);
    assert_eq!(label_quadrant(&breakdown, 1), Quadrant::BottomLeft);
    assert_eq!(label_quadrant(&breakdown, 2), Quadrant::TopLeft);
    assert_eq!(label_quadrant(&breakdown, 3), Quadrant::TopLeft);
    store.flush().await;
}
