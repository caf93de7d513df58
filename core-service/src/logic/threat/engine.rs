//! Decision Engine
//!
//! Allowlist short-circuit, then both classifiers, then the agreement rule:
//! a URL is malicious only when the forest AND the network vote malicious.
//!
//! Lifecycle is `Untrained -> Trained`, one transition per process. The
//! trained state sits in a write-once cell so every `predict` after the
//! transition reads shared immutable data without locking.

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;

use super::allowlist::Allowlist;
use super::rules::DECISION_THRESHOLD;
use super::types::{ClassifierVerdict, EngineStatus, FinalVerdict, VerdictSource};
use crate::error::{ClassifierError, ClassifierResult};
use crate::logic::explain::get_triggered_features;
use crate::logic::features::{extract_features, LayoutInfo, FEATURE_COUNT};
use crate::logic::model::{ProbabilityModel, StandardScaler};
use crate::logic::stats::{StatsRegistry, TrainingStats};

// ============================================================================
// TRAINED MODELS
// ============================================================================

/// Everything `predict` needs once training is done
pub struct TrainedModels {
    /// Consumes raw feature vectors
    pub forest: Box<dyn ProbabilityModel>,
    /// Consumes scaler-transformed vectors
    pub neural: Box<dyn ProbabilityModel>,
    pub scaler: StandardScaler,
}

impl TrainedModels {
    pub fn new(
        forest: impl ProbabilityModel + 'static,
        neural: impl ProbabilityModel + 'static,
        scaler: StandardScaler,
    ) -> Self {
        Self {
            forest: Box::new(forest),
            neural: Box::new(neural),
            scaler,
        }
    }

    fn validate(&self) -> ClassifierResult<()> {
        self.forest.layout().validate()?;
        self.neural.layout().validate()?;

        if self.scaler.n_features() != FEATURE_COUNT {
            return Err(ClassifierError::Model(format!(
                "scaler fitted on {} features, extractor produces {}",
                self.scaler.n_features(),
                FEATURE_COUNT
            )));
        }
        Ok(())
    }
}

struct TrainedState {
    models: TrainedModels,
    trained_at: DateTime<Utc>,
}

// ============================================================================
// ENGINE
// ============================================================================

#[derive(Default)]
pub struct DecisionEngine {
    allowlist: Allowlist,
    state: OnceCell<TrainedState>,
    stats: StatsRegistry,
}

impl DecisionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `Trained`. Fails if models were fitted against another
    /// feature layout or if the engine is already trained.
    pub fn install(&self, models: TrainedModels, stats: TrainingStats) -> ClassifierResult<()> {
        models.validate()?;

        // Stats are write-once too; recording them claims the transition
        self.stats.record(stats).map_err(|err| match err {
            ClassifierError::AlreadyRecorded => ClassifierError::AlreadyTrained,
            other => other,
        })?;

        self.state
            .set(TrainedState {
                models,
                trained_at: Utc::now(),
            })
            .map_err(|_| ClassifierError::AlreadyTrained)?;

        log::info!("Decision engine trained; classification enabled");
        Ok(())
    }

    pub fn is_trained(&self) -> bool {
        self.state.get().is_some()
    }

    pub fn trained_at(&self) -> Option<DateTime<Utc>> {
        self.state.get().map(|state| state.trained_at)
    }

    pub fn stats(&self) -> ClassifierResult<&TrainingStats> {
        self.stats.get()
    }

    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            trained: self.is_trained(),
            trained_at: self.trained_at(),
            layout: LayoutInfo::current(),
            allowlist_size: self.allowlist.len(),
        }
    }

    /// Classify one URL.
    ///
    /// Returns `NotReady` until training completes, allowlisted URLs included.
    pub fn predict(&self, url: &str) -> ClassifierResult<FinalVerdict> {
        let state = self.state.get().ok_or(ClassifierError::NotReady)?;
        let reasons = get_triggered_features(url);

        if self.allowlist.is_allowlisted(url) {
            log::debug!("Allowlisted: {}", url);
            return Ok(FinalVerdict::from_votes(
                url,
                ClassifierVerdict::allowlisted(),
                ClassifierVerdict::allowlisted(),
                VerdictSource::Allowlist,
                reasons,
            ));
        }

        let features = extract_features(url);
        log::trace!("{} features: {}", url, features.to_log_entry());
        let raw = features.as_slice();
        let scaled = state.models.scaler.transform_row(raw);

        let forest = ClassifierVerdict::from_probability(
            state.models.forest.predict_probability(raw),
            DECISION_THRESHOLD,
        );
        let neural = ClassifierVerdict::from_probability(
            state.models.neural.predict_probability(&scaled),
            DECISION_THRESHOLD,
        );

        let verdict = FinalVerdict::from_votes(url, forest, neural, VerdictSource::Models, reasons);
        log::debug!(
            "{} -> {} (rf {:.4}, nn {:.4})",
            url,
            verdict.verdict,
            forest.confidence,
            neural.confidence
        );
        Ok(verdict)
    }
}
