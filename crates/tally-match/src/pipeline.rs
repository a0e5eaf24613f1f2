//! Composable text scoring pipeline.
//!
//! Ordered stages plus an explicit combination rule, so every scoring step
//! is a testable unit instead of an inline conditional. The default
//! pipeline is: exact short-circuit, then Jaro-Winkler and trigram Jaccard
//! blended 0.7/0.3.

use tally_core::models::{MatchAlgorithm, MatchType};

use crate::algorithms;

/// Output of one scoring stage.
#[derive(Debug, Clone, Copy)]
pub struct StageScore {
    pub score: f64,
    pub algorithm: MatchAlgorithm,
    /// Terminal stages short-circuit the rest of the pipeline.
    pub terminal: bool,
}

/// One stage of the scoring pipeline.
pub trait Scorer: Send + Sync {
    fn name(&self) -> &'static str;
    /// Score a candidate against the query. None means the stage has no
    /// opinion (it is excluded from the combination).
    fn score(&self, query: &str, candidate: &str) -> Option<StageScore>;
    /// Weight of this stage in the combined average.
    fn weight(&self) -> f64;
}

/// Exact equality short-circuit.
pub struct ExactScorer;

impl Scorer for ExactScorer {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn score(&self, query: &str, candidate: &str) -> Option<StageScore> {
        if !query.is_empty() && query == candidate {
            Some(StageScore {
                score: 1.0,
                algorithm: MatchAlgorithm::Exact,
                terminal: true,
            })
        } else {
            None
        }
    }

    fn weight(&self) -> f64 {
        1.0
    }
}

/// Jaro-Winkler stage.
pub struct JaroWinklerScorer {
    pub weight: f64,
}

impl Scorer for JaroWinklerScorer {
    fn name(&self) -> &'static str {
        "jaro_winkler"
    }

    fn score(&self, query: &str, candidate: &str) -> Option<StageScore> {
        Some(StageScore {
            score: algorithms::jaro_winkler(query, candidate),
            algorithm: MatchAlgorithm::JaroWinkler,
            terminal: false,
        })
    }

    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Trigram Jaccard stage.
pub struct TrigramScorer {
    pub weight: f64,
}

impl Scorer for TrigramScorer {
    fn name(&self) -> &'static str {
        "trigram"
    }

    fn score(&self, query: &str, candidate: &str) -> Option<StageScore> {
        Some(StageScore {
            score: algorithms::trigram_jaccard(query, candidate),
            algorithm: MatchAlgorithm::TrigramJaccard,
            terminal: false,
        })
    }

    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Combined verdict of a pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineScore {
    pub score: f64,
    pub algorithm: MatchAlgorithm,
    pub match_type: MatchType,
}

/// Ordered scorers plus the weighted-average combination rule.
pub struct TextPipeline {
    stages: Vec<Box<dyn Scorer>>,
}

impl TextPipeline {
    /// The default pipeline: exact, Jaro-Winkler, trigram.
    pub fn standard(jaro_weight: f64, trigram_weight: f64) -> Self {
        Self {
            stages: vec![
                Box::new(ExactScorer),
                Box::new(JaroWinklerScorer { weight: jaro_weight }),
                Box::new(TrigramScorer {
                    weight: trigram_weight,
                }),
            ],
        }
    }

    /// A pipeline running a single named algorithm (caller override).
    pub fn single(algorithm: MatchAlgorithm) -> Self {
        let stage: Box<dyn Scorer> = match algorithm {
            MatchAlgorithm::TrigramJaccard => Box::new(TrigramScorer { weight: 1.0 }),
            // Exact-only requests still deserve a fuzzy fallback of zero,
            // so exact is modeled as jaro over identical strings.
            _ => Box::new(JaroWinklerScorer { weight: 1.0 }),
        };
        Self {
            stages: vec![Box::new(ExactScorer), stage],
        }
    }

    /// Run the stages in order. Terminal stages short-circuit; the rest
    /// combine as a weighted average over the stages that had an opinion.
    pub fn run(&self, query: &str, candidate: &str) -> PipelineScore {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        let mut last_algorithm = MatchAlgorithm::Combined;
        let mut opinions = 0usize;

        for stage in &self.stages {
            let Some(outcome) = stage.score(query, candidate) else {
                continue;
            };
            if outcome.terminal {
                return PipelineScore {
                    score: outcome.score,
                    algorithm: outcome.algorithm,
                    match_type: MatchType::Exact,
                };
            }
            weighted_sum += outcome.score * stage.weight();
            total_weight += stage.weight();
            last_algorithm = outcome.algorithm;
            opinions += 1;
        }

        let score = if total_weight > 0.0 {
            weighted_sum / total_weight
        } else {
            0.0
        };
        PipelineScore {
            score,
            algorithm: if opinions > 1 {
                MatchAlgorithm::Combined
            } else {
                last_algorithm
            },
            match_type: MatchType::Fuzzy,
        }
    }
}
