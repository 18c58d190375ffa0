//! Score-ordered ranking of upcoming events.

use std::time::Instant;

use eventide_core::store::EventStore;
use eventide_core::{
    Diagnostics, Event, RankRequest, RankResponse, RankedEvent, Recommender, Scorer, ScoringResult,
};

const DEFAULT_MAX_RESULTS: usize = 5;

/// Configuration for [`EventRanker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankerConfig {
    /// Maximum number of recommendations returned per request.
    pub max_results: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Ranks upcoming events by a scorer's verdict.
///
/// Candidates are the store's events dated on or after the request's
/// `today`; the scorer never sees events that have already happened. Each
/// candidate is scored, the batch sorted best-first, and the list truncated
/// to the configured size. Equal scores break towards the lower event id so
/// a ranking is reproducible run to run.
#[derive(Debug, Clone)]
pub struct EventRanker<E, C> {
    store: E,
    scorer: C,
    config: RankerConfig,
}

impl<E, C> EventRanker<E, C> {
    /// Creates a ranker returning at most [`RankerConfig::default`] items.
    #[must_use]
    pub fn new(store: E, scorer: C) -> Self {
        Self::with_config(store, scorer, RankerConfig::default())
    }

    /// Creates a ranker with a custom configuration.
    #[must_use]
    pub const fn with_config(store: E, scorer: C, config: RankerConfig) -> Self {
        Self {
            store,
            scorer,
            config,
        }
    }
}

fn into_ranked((event, result): (Event, ScoringResult)) -> RankedEvent {
    RankedEvent {
        event_id: event.id,
        title: event.title,
        category: event.category,
        location: event.location,
        mode: event.mode,
        date: event.date,
        final_score: result.final_score,
        explanation: result.explanation,
    }
}

impl<E, C> Recommender for EventRanker<E, C>
where
    E: EventStore + Send + Sync,
    C: Scorer,
{
    fn rank(&self, request: &RankRequest) -> RankResponse {
        let started_at = Instant::now();
        let Some(user) = request.user.as_ref() else {
            log::debug!("ranking requested without a resolved user; returning no items");
            return RankResponse {
                items: Vec::new(),
                diagnostics: Diagnostics {
                    rank_time: started_at.elapsed(),
                    candidates_evaluated: 0,
                },
            };
        };

        let mut scored: Vec<(Event, ScoringResult)> = self
            .store
            .events_on_or_after(request.today)
            .map(|event| {
                let result = self.scorer.evaluate(user, &event, request.today);
                if !result.final_score.is_finite() {
                    log::warn!("scorer produced a non-finite score for event {}", event.id);
                    debug_assert!(
                        result.final_score.is_finite(),
                        "non-finite score for event {}",
                        event.id,
                    );
                }
                (event, result)
            })
            .collect();
        let candidates_evaluated = scored.len() as u64;

        scored.sort_unstable_by(|(lhs_event, lhs_result), (rhs_event, rhs_result)| {
            rhs_result
                .final_score
                .partial_cmp(&lhs_result.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| lhs_event.id.cmp(&rhs_event.id))
        });
        scored.truncate(self.config.max_results);

        log::debug!(
            "ranked {candidates_evaluated} candidates for user {}; returning {}",
            user.id,
            scored.len(),
        );
        RankResponse {
            items: scored.into_iter().map(into_ranked).collect(),
            diagnostics: Diagnostics {
                rank_time: started_at.elapsed(),
                candidates_evaluated,
            },
        }
    }
}
