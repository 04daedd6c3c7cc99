//! JsonCheckpointStore against a real directory, and a full run that
//! persists to it.

use std::fs;

use medal_core::config::MedalConfig;
use medal_core::errors::{CheckpointError, MedalError};
use medal_core::models::{Checkpoint, IterationRecord, LabelState, LayerId, ParameterBlob};
use medal_core::traits::ICheckpointStore;
use medal_learning::{ActiveLearningLoop, Collaborators, JsonCheckpointStore, TerminalState};
use test_fixtures::{InMemoryDataset, LogisticClassifier, SgdTrainer, HIDDEN_LAYER};

fn checkpoint(run_id: &str, al_iter: u32, epoch: u32) -> Checkpoint {
    let mut labels = LabelState::new((0..6).collect());
    labels.mark(&[1, 4]).unwrap();
    Checkpoint {
        run_id: run_id.to_string(),
        record: IterationRecord {
            al_iter,
            epoch,
            exhausted: false,
        },
        labels,
        model_state: ParameterBlob::new(vec![1, 2, 3]),
        optimizer_state: None,
        initial_model_state: Some(ParameterBlob::new(vec![9])),
    }
}

#[test]
fn writes_one_file_per_iteration_and_epoch() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonCheckpointStore::new(dir.path());
    store.save(&checkpoint("run", 3, 7)).unwrap();

    let path = dir.path().join("run").join("al_3_epoch_7.json");
    assert!(path.is_file());
    assert_eq!(store.path_for("run", 3, 7), path);
    // No temp file left behind.
    assert_eq!(fs::read_dir(dir.path().join("run")).unwrap().count(), 1);
}

#[test]
fn latest_is_chosen_numerically() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonCheckpointStore::new(dir.path());
    for (al_iter, epoch) in [(2, 9), (10, 2), (2, 10), (9, 100)] {
        store.save(&checkpoint("run", al_iter, epoch)).unwrap();
    }

    let latest = store.load_latest("run").unwrap().unwrap();
    assert_eq!((latest.record.al_iter, latest.record.epoch), (10, 2));
    assert_eq!(latest, checkpoint("run", 10, 2));
}

#[test]
fn missing_run_has_no_checkpoint() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonCheckpointStore::new(dir.path());
    assert!(store.load_latest("nothing-here").unwrap().is_none());
}

#[test]
fn unrelated_files_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonCheckpointStore::new(dir.path());
    store.save(&checkpoint("run", 1, 1)).unwrap();
    fs::write(dir.path().join("run").join("notes.txt"), "hello").unwrap();
    fs::write(dir.path().join("run").join("al_5_epoch_1.json.tmp"), "{").unwrap();

    let latest = store.load_latest("run").unwrap().unwrap();
    assert_eq!(latest.record.al_iter, 1);
}

#[test]
fn corrupt_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonCheckpointStore::new(dir.path());
    fs::create_dir_all(dir.path().join("run")).unwrap();
    fs::write(dir.path().join("run").join("al_1_epoch_1.json"), "not json").unwrap();

    let err = store.load_latest("run").unwrap_err();
    assert!(matches!(
        err,
        MedalError::Checkpoint(CheckpointError::Corrupt { .. })
    ));
}

#[test]
fn checkpoint_from_another_run_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonCheckpointStore::new(dir.path());
    store.save(&checkpoint("a", 1, 1)).unwrap();
    fs::create_dir_all(dir.path().join("b")).unwrap();
    fs::copy(
        dir.path().join("a").join("al_1_epoch_1.json"),
        dir.path().join("b").join("al_1_epoch_1.json"),
    )
    .unwrap();

    let err = store.load_latest("b").unwrap_err();
    assert!(matches!(
        err,
        MedalError::Checkpoint(CheckpointError::RunMismatch { .. })
    ));
}

fn logistic_run(
    dir: &std::path::Path,
    al_iters: u32,
) -> (ActiveLearningLoop, JsonCheckpointStore) {
    let mut config = MedalConfig::default();
    config.run_id = "logistic".to_string();
    config.seed = 5;
    config.selection.al_iters = al_iters;
    config.selection.num_points_to_label_per_al_iter = 4;
    config.selection.num_max_entropy_samples = 8;
    config.training.epochs = 3;
    config.checkpoint.dir = dir.display().to_string();

    let store = JsonCheckpointStore::from_config(&config.checkpoint);
    let dataset = InMemoryDataset::blobs(40, 3, 5, 8);
    let collaborators = Collaborators {
        classifier: Box::new(LogisticClassifier::new(3, 5)),
        layer_selector: Box::new(LayerId::new(HIDDEN_LAYER)),
        batch_source: Box::new(dataset),
        trainer: Box::new(SgdTrainer::new(0.3)),
        checkpoint_store: Some(Box::new(store.clone())),
    };
    let engine = ActiveLearningLoop::new(config, (0..40).collect(), collaborators).unwrap();
    (engine, store)
}

#[test]
fn logistic_run_persists_and_resumes() {
    let dir = tempfile::tempdir().unwrap();

    let (mut engine, store) = logistic_run(dir.path(), 3);
    let outcome = engine.run().unwrap();
    assert_eq!(outcome.terminal, TerminalState::CompletedIterations);
    assert_eq!(outcome.labeled, 12);
    assert!(outcome.last_metrics.unwrap().train_loss.is_finite());

    let files = store.list("logistic").unwrap();
    assert_eq!(files.len(), 9);
    let (al_iter, epoch, _) = files.last().unwrap();
    assert_eq!((*al_iter, *epoch), (3, 3));

    let latest = store.load_latest("logistic").unwrap().unwrap();
    assert!(latest.optimizer_state.is_some());
    let saved_model = latest.model_state.clone();

    let (resumed, _) = logistic_run(dir.path(), 4);
    assert_eq!(resumed.record().al_iter, 3);
    assert_eq!(resumed.labels(), &latest.labels);
    assert_eq!(resumed.classifier().snapshot().unwrap(), saved_model);
}
