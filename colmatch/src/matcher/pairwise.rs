//! Pairwise matching of two profile collections.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::name::name_similarity;
use super::overlap::{overlap_score, DEFAULT_OVERLAP_THRESHOLD};
use super::scalar::{null_similarity, unique_similarity};
use super::type_score::type_score;
use crate::error::{ColmatchError, Result};
use crate::profile::{ColumnProfile, ColumnProfileId, ColumnProfilePair};

/// Tolerance when checking that weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Per-component weights of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub name: f64,
    pub dtype: f64,
    pub unique: f64,
    pub overlap: f64,
    pub null: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            name: 0.30,
            dtype: 0.25,
            unique: 0.20,
            overlap: 0.15,
            null: 0.10,
        }
    }
}

impl MatchWeights {
    /// Checks that every weight is finite and non-negative and that the
    /// weights sum to one.
    pub fn validate(&self) -> Result<()> {
        let weights = [self.name, self.dtype, self.unique, self.overlap, self.null];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ColmatchError::configuration(format!(
                "match weights must be finite and non-negative, got {self:?}"
            )));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ColmatchError::configuration(format!(
                "match weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }

    fn combine(&self, c: &ScoreComponents) -> f64 {
        self.name * c.name
            + self.dtype * c.dtype
            + self.unique * c.unique
            + self.overlap * c.overlap
            + self.null * c.null
    }
}

/// How component scores are combined into one pair score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoringScheme {
    /// Weighted sum of all five components.
    Weighted(MatchWeights),
    /// Product of the type and null components only.
    TypeNullProduct,
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self::Weighted(MatchWeights::default())
    }
}

/// Configuration for [`ColumnMatcher`].
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Composite scoring scheme
    pub scheme: ScoringScheme,
    /// Edit similarity a sample value needs to count as a fuzzy match
    pub overlap_threshold: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            scheme: ScoringScheme::default(),
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
        }
    }
}

impl MatcherConfig {
    pub fn validate(&self) -> Result<()> {
        if let ScoringScheme::Weighted(weights) = &self.scheme {
            weights.validate()?;
        }
        if !(self.overlap_threshold > 0.0 && self.overlap_threshold <= 1.0) {
            return Err(ColmatchError::configuration(format!(
                "overlap threshold must be in (0, 1], got {}",
                self.overlap_threshold
            )));
        }
        Ok(())
    }
}

/// The individual scores a pair score is built from, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub name: f64,
    pub dtype: f64,
    pub unique: f64,
    pub overlap: f64,
    pub null: f64,
}

/// A scored candidate correspondence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfilePairScore {
    /// Composite score in `[0, 1]`
    pub score: f64,
    pub left: ColumnProfile,
    pub right: ColumnProfile,
    /// Component breakdown of `score`
    pub components: ScoreComponents,
}

/// Builder for [`ColumnMatcher`].
#[derive(Debug, Clone, Default)]
pub struct ColumnMatcherBuilder {
    config: MatcherConfig,
}

impl ColumnMatcherBuilder {
    /// Use the weighted scheme with these weights.
    pub fn weights(mut self, weights: MatchWeights) -> Self {
        self.config.scheme = ScoringScheme::Weighted(weights);
        self
    }

    /// Set the scoring scheme.
    pub fn scheme(mut self, scheme: ScoringScheme) -> Self {
        self.config.scheme = scheme;
        self
    }

    /// Set the fuzzy overlap threshold.
    pub fn overlap_threshold(mut self, threshold: f64) -> Self {
        self.config.overlap_threshold = threshold;
        self
    }

    /// Validate the configuration and build the matcher.
    pub fn build(self) -> Result<ColumnMatcher> {
        ColumnMatcher::with_config(self.config)
    }
}

/// Scores every left/right column pair and ranks the results.
#[derive(Debug, Clone, Default)]
pub struct ColumnMatcher {
    config: MatcherConfig,
}

impl ColumnMatcher {
    pub fn builder() -> ColumnMatcherBuilder {
        ColumnMatcherBuilder::default()
    }

    /// Creates a matcher after validating `config`.
    pub fn with_config(config: MatcherConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Computes the component scores for one pair.
    pub fn components(&self, left: &ColumnProfile, right: &ColumnProfile) -> ScoreComponents {
        ScoreComponents {
            name: name_similarity(left.name(), right.name()),
            dtype: type_score(left.declared_type(), right.declared_type()),
            unique: unique_similarity(left.unique_pct(), right.unique_pct()),
            overlap: overlap_score(
                left.samples(),
                right.samples(),
                self.config.overlap_threshold,
            ),
            null: null_similarity(left.null_pct(), right.null_pct()),
        }
    }

    /// Scores one pair.
    pub fn score_pair(&self, left: &ColumnProfile, right: &ColumnProfile) -> ColumnProfilePairScore {
        let components = self.components(left, right);
        let score = match &self.config.scheme {
            ScoringScheme::Weighted(weights) => weights.combine(&components),
            ScoringScheme::TypeNullProduct => components.dtype * components.null,
        };
        ColumnProfilePairScore {
            score: score.clamp(0.0, 1.0),
            left: left.clone(),
            right: right.clone(),
            components,
        }
    }

    /// Scores the cross product of `left` and `right`.
    ///
    /// Each unordered pair of profiles is scored at most once: a pair whose
    /// mirror (same content on swapped sides) was already scored is skipped.
    /// Results are sorted by descending score; ties keep iteration order,
    /// i.e. left index first, then right index. Nothing is filtered out.
    #[instrument(skip_all, fields(left = left.len(), right = right.len()))]
    pub fn match_profiles(
        &self,
        left: &[ColumnProfile],
        right: &[ColumnProfile],
    ) -> Vec<ColumnProfilePairScore> {
        let left_ids: Vec<ColumnProfileId> = left.iter().map(ColumnProfileId::of).collect();
        let right_ids: Vec<ColumnProfileId> = right.iter().map(ColumnProfileId::of).collect();

        let mut seen = HashSet::with_capacity(left.len() * right.len());
        let mut results = Vec::with_capacity(left.len() * right.len());
        let mut skipped = 0usize;

        for (l, left_id) in left.iter().zip(&left_ids) {
            for (r, right_id) in right.iter().zip(&right_ids) {
                let pair = ColumnProfilePair::new(*left_id, *right_id);
                if seen.contains(&pair) || seen.contains(&pair.mirrored()) {
                    skipped += 1;
                    continue;
                }
                seen.insert(pair);
                results.push(self.score_pair(l, r));
            }
        }

        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        if skipped > 0 {
            debug!(skipped, "Skipped duplicate or mirrored pairs");
        }
        info!(
            pairs = results.len(),
            top_score = results.first().map(|s| s.score),
            "Completed column matching"
        );

        results
    }
}
