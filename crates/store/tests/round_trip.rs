//! End-to-end: train on a synthetic history, persist, reload, and serve
//! predictions and recommendations from the reloaded context.

use crumbcast_core::{ForecastError, Product};
use crumbcast_dataset::{SalesHistory, DAY_COLUMN, WEATHER_COLUMN};
use crumbcast_forecast::{train_all, RecommendPolicy, TrainConfig};
use crumbcast_store::{ArtifactStore, StoreError};

fn synthetic_history() -> SalesHistory {
    let mut header = vec![DAY_COLUMN.to_string(), WEATHER_COLUMN.to_string()];
    header.extend(Product::ALL.iter().map(|p| p.column_name().to_string()));
    let mut csv = format!("{}\n", header.join(","));
    for i in 0..20 {
        let day = ["Lunes", "Martes", "Miercoles", "Jueves"][i % 4];
        let weather = ["Soleado", "Lluvioso"][i % 2];
        let quantities: Vec<String> = (0..Product::ALL.len())
            .map(|p| (15 + p * 4 + i % 6).to_string())
            .collect();
        csv.push_str(&format!("{day},{weather},{}\n", quantities.join(",")));
    }
    SalesHistory::from_reader(csv.as_bytes()).unwrap()
}

fn config() -> TrainConfig {
    TrainConfig {
        epochs: 5,
        min_rows: 4,
        ..TrainConfig::default()
    }
}

#[test]
fn save_then_load_serves_the_same_predictions() {
    let artifacts = train_all(&synthetic_history(), &config()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());

    store.save(&artifacts).unwrap();
    let loaded = store.load().unwrap();

    let direct = crumbcast_forecast::ForecastContext::from_artifacts(artifacts).unwrap();
    for product in Product::ALL {
        assert_eq!(
            loaded.predict(product, "Lunes", "Soleado").unwrap(),
            direct.predict(product, "Lunes", "Soleado").unwrap(),
        );
    }

    let recs = loaded
        .recommend_all("Martes", "Lluvioso", &RecommendPolicy::default())
        .unwrap();
    assert_eq!(recs.len(), Product::ALL.len());
}

#[test]
fn a_deleted_model_file_surfaces_as_missing_artifact() {
    let artifacts = train_all(&synthetic_history(), &config()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    store.save(&artifacts).unwrap();

    std::fs::remove_file(dir.path().join("model_pan-sobao.json")).unwrap();
    let err = store.load().unwrap_err();
    match err {
        StoreError::Forecast(ForecastError::MissingArtifact { name }) => {
            assert!(name.contains("pan-sobao"), "unexpected name: {name}");
        }
        other => panic!("expected MissingArtifact, got {other:?}"),
    }
}

#[test]
fn an_empty_directory_directs_the_user_to_training() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());
    let err = store.load().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("run the training step first"), "{message}");
}
