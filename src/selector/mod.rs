//! Content Selector
//!
//! Finds the main-content node with a four-state machine:
//!
//! ```text
//! TryVariantSelectors -> TryGenericSelectors -> HeuristicScan -> Fallback
//! ```
//!
//! The selector only moves to the next state when the current one yields no
//! node passing [`is_valid_content`]. `Fallback` always succeeds with the
//! document body, so selection never fails outright.
//!
//! When no candidate in any state reached `min_text_length`, the three
//! searching states run once more with `retry_length` as the length floor.

use std::collections::HashMap;

use dom_query::{Document, NodeId, Selection};
use tracing::{debug, trace};

use crate::dom;
use crate::link_density::link_density;
use crate::options::Options;
use crate::scoring::score_node;
use crate::text_metrics::text_length;
use crate::variant::VariantProfile;

pub mod content;
pub mod discard;

use content::{EXCLUDED_TAGS, GENERIC_SELECTORS, HEURISTIC_TAGS};

/// Scores computed during one selector run, keyed by node.
pub type CandidateScore = HashMap<NodeId, Option<f64>>;

/// States of the content selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    TryVariantSelectors,
    TryGenericSelectors,
    HeuristicScan,
    Fallback,
}

impl SelectorState {
    /// The state entered when this one yields nothing.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::TryVariantSelectors => Self::TryGenericSelectors,
            Self::TryGenericSelectors => Self::HeuristicScan,
            Self::HeuristicScan | Self::Fallback => Self::Fallback,
        }
    }
}

/// The node chosen as main content and how it was found.
#[derive(Debug, Clone)]
pub struct ContentSelection<'a> {
    pub node: Selection<'a>,
    pub state: SelectorState,
    /// Score of the chosen node; `0.0` for an unscorable fallback.
    pub score: f64,
    /// Whether the relaxed `retry_length` floor was in effect.
    pub relaxed: bool,
}

/// Whether a node qualifies as main content.
///
/// Requires a tag outside [`EXCLUDED_TAGS`], a score of at least
/// `min_score`, a text length of at least `min_length`, and a link density
/// no higher than `max_link_density`. Unscorable nodes are never valid.
#[must_use]
pub fn is_valid_content(sel: &Selection, profile: &VariantProfile, opts: &Options, min_length: usize) -> bool {
    let Some(score) = score_node(sel, profile, opts) else {
        return false;
    };
    passes_checks(sel, score, opts, min_length)
}

fn passes_checks(sel: &Selection, score: f64, opts: &Options, min_length: usize) -> bool {
    let Some(tag) = dom::tag_name(sel) else {
        return false;
    };
    if EXCLUDED_TAGS.contains(&tag.as_str()) {
        return false;
    }
    score >= f64::from(opts.min_score)
        && text_length(&dom::text_content(sel)) >= min_length
        && link_density(sel) <= opts.max_link_density
}

/// Find the main-content node of a cleaned document.
#[must_use]
pub fn find_main_content<'a>(doc: &'a Document, profile: &VariantProfile, opts: &Options) -> ContentSelection<'a> {
    let mut run = SelectorRun {
        doc,
        profile,
        opts,
        scores: CandidateScore::new(),
        cleared_min_length: false,
    };

    if let Some(found) = run.search(opts.min_text_length, false) {
        return found;
    }

    if !run.cleared_min_length && opts.retry_length < opts.min_text_length {
        debug!(retry_length = opts.retry_length, "no candidate reached min_text_length, retrying");
        if let Some(found) = run.search(opts.retry_length, true) {
            return found;
        }
    }

    let body = dom::body(doc);
    let score = run.score(&body).unwrap_or(0.0);
    debug!(score, "falling back to document body");
    ContentSelection {
        node: body,
        state: SelectorState::Fallback,
        score,
        relaxed: !run.cleared_min_length,
    }
}

/// State shared by the passes of one selector run.
struct SelectorRun<'a, 'p> {
    doc: &'a Document,
    profile: &'p VariantProfile,
    opts: &'p Options,
    scores: CandidateScore,
    /// Whether any evaluated candidate reached `min_text_length`.
    cleared_min_length: bool,
}

impl<'a> SelectorRun<'a, '_> {
    fn search(&mut self, min_length: usize, relaxed: bool) -> Option<ContentSelection<'a>> {
        let mut state = SelectorState::TryVariantSelectors;

        while state != SelectorState::Fallback {
            let found = match state {
                SelectorState::TryVariantSelectors => self.try_selectors(self.profile.selectors, min_length),
                SelectorState::TryGenericSelectors => self.try_selectors(GENERIC_SELECTORS, min_length),
                SelectorState::HeuristicScan => {
                    let candidates = self.doc.select(HEURISTIC_TAGS);
                    self.best_valid(&candidates, min_length)
                }
                SelectorState::Fallback => None,
            };

            if let Some((node, score)) = found {
                debug!(?state, score, relaxed, tag = ?dom::tag_name(&node), "main content selected");
                return Some(ContentSelection { node, state, score, relaxed });
            }

            trace!(?state, "no valid content");
            state = state.next();
        }

        None
    }

    /// First selector in the list with a valid match wins; its best-scoring
    /// valid match is taken.
    fn try_selectors(&mut self, selectors: &[&str], min_length: usize) -> Option<(Selection<'a>, f64)> {
        selectors.iter().find_map(|selector| {
            let matches = self.doc.select(selector);
            self.best_valid(&matches, min_length)
        })
    }

    /// Highest-scoring valid node, ties going to the first in document order.
    fn best_valid(&mut self, candidates: &Selection<'a>, min_length: usize) -> Option<(Selection<'a>, f64)> {
        let mut best: Option<(Selection<'a>, f64)> = None;

        for node in candidates.nodes() {
            let sel = Selection::from(*node);
            let Some(score) = self.score(&sel) else {
                trace!("skipping unscorable candidate");
                continue;
            };
            if text_length(&dom::text_content(&sel)) >= self.opts.min_text_length {
                self.cleared_min_length = true;
            }
            if !passes_checks(&sel, score, self.opts, min_length) {
                continue;
            }
            if best.as_ref().is_none_or(|(_, best_score)| score > *best_score) {
                best = Some((sel, score));
            }
        }

        best
    }

    fn score(&mut self, sel: &Selection) -> Option<f64> {
        let node = sel.nodes().first()?;
        let (profile, opts) = (self.profile, self.opts);
        *self
            .scores
            .entry(node.id)
            .or_insert_with(|| score_node(sel, profile, opts))
    }
}
