//! ActiveLearningLoop: the MedAL iteration state machine.
//!
//! Per iteration: select points → label → optional weight reset →
//! build training set → retrain for the epoch budget → termination check.
//! Iteration 1 picks uniformly at random; later iterations shortlist the
//! most uncertain unlabeled items and pick a diverse subset of them.

use medal_core::config::MedalConfig;
use medal_core::errors::{CheckpointError, MedalResult};
use medal_core::models::{
    Checkpoint, EpochMetrics, IterationRecord, LabelState, ParameterBlob, ResumePoint,
};
use medal_core::traits::{
    IBatchSource, ICheckpointStore, IClassifier, IEmbeddingLayerSelector, ITrainer,
    ITrainingSetPolicy,
};
use medal_sampling::{pick_initial_positions, select_diverse, EntropyTopKExtractor, TopK};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::policy::build_policy;

/// The external pieces the loop drives.
pub struct Collaborators {
    pub classifier: Box<dyn IClassifier>,
    pub layer_selector: Box<dyn IEmbeddingLayerSelector>,
    pub batch_source: Box<dyn IBatchSource>,
    pub trainer: Box<dyn ITrainer>,
    /// Loaded from on construction and saved to while training.
    /// `None` runs without persistence.
    pub checkpoint_store: Option<Box<dyn ICheckpointStore>>,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    /// Every training index got labeled before `al_iters` ran out.
    StoppedExhaustedPool,
    /// All configured iterations ran.
    CompletedIterations,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopOutcome {
    pub terminal: TerminalState,
    /// Iterations (fully or partly) executed by this `run` call.
    pub iterations_run: u32,
    /// Labeled training indices at the end.
    pub labeled: usize,
    /// Metrics of the last epoch trained by this call.
    pub last_metrics: Option<EpochMetrics>,
}

pub struct ActiveLearningLoop {
    config: MedalConfig,
    labels: LabelState,
    record: IterationRecord,
    collaborators: Collaborators,
    extractor: EntropyTopKExtractor,
    policy: Box<dyn ITrainingSetPolicy>,
    rng: StdRng,
    /// Classifier weights before the first iteration; the reset target.
    initial_state: ParameterBlob,
}

impl ActiveLearningLoop {
    /// Validate `config`, snapshot the initial weights, and resume from the
    /// latest checkpoint for `config.run_id` if the store has one.
    pub fn new(
        config: MedalConfig,
        training_indices: Vec<usize>,
        collaborators: Collaborators,
    ) -> MedalResult<Self> {
        config.validate()?;
        let policy = build_policy(&config.training, config.seed)?;
        let extractor = EntropyTopKExtractor::new(collaborators.layer_selector.as_ref());
        let initial_state = collaborators.classifier.snapshot()?;
        let rng = StdRng::seed_from_u64(config.seed);

        let mut engine = Self {
            labels: LabelState::new(training_indices),
            record: IterationRecord::new(),
            config,
            collaborators,
            extractor,
            policy,
            rng,
            initial_state,
        };
        engine.resume()?;
        Ok(engine)
    }

    pub fn config(&self) -> &MedalConfig {
        &self.config
    }

    pub fn labels(&self) -> &LabelState {
        &self.labels
    }

    pub fn record(&self) -> &IterationRecord {
        &self.record
    }

    pub fn classifier(&self) -> &dyn IClassifier {
        self.collaborators.classifier.as_ref()
    }

    /// Hand the collaborators back, e.g. to keep using the trained classifier.
    pub fn into_collaborators(self) -> Collaborators {
        self.collaborators
    }

    /// Run iterations until `al_iters` is reached or the pool is used up.
    pub fn run(&mut self) -> MedalResult<LoopOutcome> {
        let epochs = self.config.training.epochs;
        let al_iters = self.config.selection.al_iters;
        let mut iterations_run = 0u32;
        let mut last_metrics = None;

        let (start, mut resume_epoch) = match self.record.resume_point(epochs) {
            ResumePoint::Fresh { al_iter } => (al_iter, None),
            ResumePoint::Continue { al_iter, epoch } => (al_iter, Some(epoch)),
        };

        info!(
            version = medal_core::constants::VERSION,
            run_id = %self.config.run_id,
            start_al_iter = start,
            al_iters,
            pool = self.labels.len(),
            labeled = self.labels.labeled_count(),
            policy = self.policy.name(),
            layer = %self.extractor.layer(),
            "active learning started"
        );

        for al_iter in start..=al_iters {
            match resume_epoch.take() {
                Some(epoch) => {
                    info!(al_iter, epoch, "continuing interrupted iteration");
                }
                None => {
                    if self.labels.is_exhausted() {
                        return Ok(self.exhausted(iterations_run, last_metrics));
                    }
                    self.record.begin_iteration(al_iter);
                    self.label_next(al_iter)?;
                    if self.config.training.reset_model_weights_each_al_iter {
                        self.collaborators.classifier.restore(&self.initial_state)?;
                        debug!(al_iter, "classifier weights reset");
                    }
                }
            }

            let train_indices = self.policy.build(&self.labels);
            if let Some(metrics) = self.retrain(al_iter, &train_indices)? {
                last_metrics = Some(metrics);
            }
            iterations_run += 1;

            if self.labels.is_exhausted() {
                return Ok(self.exhausted(iterations_run, last_metrics));
            }
        }

        info!(
            iterations_run,
            labeled = self.labels.labeled_count(),
            "active learning complete"
        );
        Ok(self.outcome(
            TerminalState::CompletedIterations,
            iterations_run,
            last_metrics,
        ))
    }

    /// Current state as a checkpoint.
    pub fn checkpoint(&self) -> MedalResult<Checkpoint> {
        Ok(Checkpoint {
            run_id: self.config.run_id.clone(),
            record: self.record,
            labels: self.labels.clone(),
            model_state: self.collaborators.classifier.snapshot()?,
            optimizer_state: self.collaborators.trainer.optimizer_state()?,
            initial_model_state: Some(self.initial_state.clone()),
        })
    }

    fn resume(&mut self) -> MedalResult<()> {
        let Some(store) = &self.collaborators.checkpoint_store else {
            return Ok(());
        };
        let Some(checkpoint) = store.load_latest(&self.config.run_id)? else {
            debug!(run_id = %self.config.run_id, "no checkpoint, starting fresh");
            return Ok(());
        };
        if checkpoint.run_id != self.config.run_id {
            return Err(CheckpointError::RunMismatch {
                expected: self.config.run_id.clone(),
                found: checkpoint.run_id,
            }
            .into());
        }
        checkpoint.labels.validate()?;
        if checkpoint.labels.train_indices() != self.labels.train_indices() {
            warn!(
                checkpoint_pool = checkpoint.labels.len(),
                given_pool = self.labels.len(),
                "training indices differ from checkpoint; using the checkpoint's"
            );
        }

        self.collaborators
            .classifier
            .restore(&checkpoint.model_state)?;
        if let Some(optimizer_state) = &checkpoint.optimizer_state {
            self.collaborators
                .trainer
                .restore_optimizer_state(optimizer_state)?;
        }
        if let Some(initial) = checkpoint.initial_model_state {
            self.initial_state = initial;
        }
        self.labels = checkpoint.labels;
        self.record = checkpoint.record;

        info!(
            al_iter = self.record.al_iter,
            epoch = self.record.epoch,
            labeled = self.labels.labeled_count(),
            exhausted = self.record.exhausted,
            "resumed from checkpoint"
        );
        Ok(())
    }

    /// Select this iteration's points and mark them labeled.
    fn label_next(&mut self, al_iter: u32) -> MedalResult<()> {
        let positions = self.select_points(al_iter)?;
        let marked = self.labels.mark(&positions)?;
        self.record.exhausted = self.labels.is_exhausted();
        info!(
            al_iter,
            newly_labeled = marked.len(),
            labeled = self.labels.labeled_count(),
            unlabeled = self.labels.unlabeled_count(),
            "points labeled"
        );
        Ok(())
    }

    /// Positions into the current unlabeled pool.
    fn select_points(&mut self, al_iter: u32) -> MedalResult<Vec<usize>> {
        let n = self.config.selection.num_points_to_label_per_al_iter;
        let pool_size = self.labels.unlabeled_count();

        // Nothing labeled yet means there is no centroid to be diverse from.
        if al_iter == 1 || self.labels.labeled_count() == 0 {
            let picks = pick_initial_positions(pool_size, n, &mut self.rng);
            debug!(al_iter, picked = picks.len(), pool_size, "random initial pick");
            return Ok(picks);
        }

        let topk = TopK::highest(self.config.selection.num_max_entropy_samples)
            .unwrap_or(TopK::All);
        let unlabeled = self.labels.unlabeled_indices();
        let shortlist = self.extractor.extract(
            self.collaborators.classifier.as_mut(),
            self.collaborators.batch_source.batches(&unlabeled)?,
            topk,
        )?;
        if shortlist.len() <= n {
            debug!(al_iter, shortlist = shortlist.len(), "labeling whole shortlist");
            return Ok(shortlist.positions());
        }

        let labeled = self.labels.labeled_indices();
        let labeled_set = self.extractor.extract(
            self.collaborators.classifier.as_mut(),
            self.collaborators.batch_source.batches(&labeled)?,
            TopK::All,
        )?;

        let picks = select_diverse(&labeled_set.embeddings(), &shortlist.embeddings(), n)?;
        let records = shortlist.records();
        let positions: Vec<usize> = picks.iter().map(|&i| records[i].position).collect();
        debug!(
            al_iter,
            pool_size,
            shortlist = shortlist.len(),
            picked = positions.len(),
            "diverse pick from most uncertain"
        );
        Ok(positions)
    }

    /// Train the remaining epochs of `al_iter`, checkpointing as configured.
    fn retrain(
        &mut self,
        al_iter: u32,
        train_indices: &[usize],
    ) -> MedalResult<Option<EpochMetrics>> {
        let epochs = self.config.training.epochs;
        let interval = self.config.checkpoint.interval;
        let mut last = None;

        info!(
            al_iter,
            train_size = train_indices.len(),
            from_epoch = self.record.epoch + 1,
            epochs,
            "retraining"
        );

        for epoch in self.record.epoch + 1..=epochs {
            let metrics = self.collaborators.trainer.train_epoch(
                self.collaborators.classifier.as_mut(),
                self.collaborators.batch_source.as_ref(),
                train_indices,
                epoch,
            )?;
            self.record.epoch = epoch;
            info!(
                al_iter,
                epoch,
                train_loss = metrics.train_loss,
                train_accuracy = metrics.train_accuracy,
                val_loss = ?metrics.val_loss,
                val_accuracy = ?metrics.val_accuracy,
                "epoch complete"
            );
            last = Some(metrics);

            if interval > 0 && (epoch % interval == 0 || epoch == epochs) {
                self.save_checkpoint()?;
            }
        }
        Ok(last)
    }

    fn save_checkpoint(&self) -> MedalResult<()> {
        let Some(store) = &self.collaborators.checkpoint_store else {
            return Ok(());
        };
        store.save(&self.checkpoint()?)?;
        debug!(
            al_iter = self.record.al_iter,
            epoch = self.record.epoch,
            "checkpoint saved"
        );
        Ok(())
    }

    fn exhausted(&self, iterations_run: u32, last_metrics: Option<EpochMetrics>) -> LoopOutcome {
        info!(
            al_iter = self.record.al_iter,
            labeled = self.labels.labeled_count(),
            "stop training: used up all available training data"
        );
        self.outcome(
            TerminalState::StoppedExhaustedPool,
            iterations_run,
            last_metrics,
        )
    }

    fn outcome(
        &self,
        terminal: TerminalState,
        iterations_run: u32,
        last_metrics: Option<EpochMetrics>,
    ) -> LoopOutcome {
        LoopOutcome {
            terminal,
            iterations_run,
            labeled: self.labels.labeled_count(),
            last_metrics,
        }
    }
}

/// Build a loop over `training_indices` and run it to completion.
pub fn run_active_learning(
    config: MedalConfig,
    training_indices: Vec<usize>,
    collaborators: Collaborators,
) -> MedalResult<LoopOutcome> {
    ActiveLearningLoop::new(config, training_indices, collaborators)?.run()
}
