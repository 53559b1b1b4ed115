// file: src/matcher/resolver.rs
// description: candidate resolution driven by an explicit ambiguity policy
// reference: decision argument replaces interactive prompts

use crate::models::Document;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// What to do when more than one candidate survives the filters. The policy
/// is supplied up front (config or CLI flag) so the same resolver serves any
/// input surface.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AmbiguityPolicy {
    /// Write the candidate listing file and report ambiguous.
    #[default]
    List,
    /// Convert the first candidate in traversal order.
    First,
    /// Report the candidates and do nothing else.
    Skip,
}

#[derive(Debug, Clone)]
pub enum ResolveDecision {
    NoMatch,
    Convert(Arc<Document>),
    Ambiguous {
        candidates: Vec<Arc<Document>>,
        write_listing: bool,
    },
}

pub struct Resolver {
    policy: AmbiguityPolicy,
}

impl Resolver {
    pub fn new(policy: AmbiguityPolicy) -> Self {
        Self { policy }
    }

    /// Zero candidates is terminal, one goes to conversion, many are settled
    /// by the policy.
    pub fn resolve(&self, mut candidates: Vec<Arc<Document>>) -> ResolveDecision {
        match candidates.len() {
            0 => {
                info!("No matching documents found");
                ResolveDecision::NoMatch
            }
            1 => ResolveDecision::Convert(candidates.swap_remove(0)),
            n => {
                info!("{} candidates remain after filtering", n);
                match self.policy {
                    AmbiguityPolicy::First => {
                        ResolveDecision::Convert(candidates.swap_remove(0))
                    }
                    AmbiguityPolicy::List => ResolveDecision::Ambiguous {
                        candidates,
                        write_listing: true,
                    },
                    AmbiguityPolicy::Skip => ResolveDecision::Ambiguous {
                        candidates,
                        write_listing: false,
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn doc(name: &str) -> Arc<Document> {
        Arc::new(Document::new(
            PathBuf::from(name),
            name.to_string(),
            format!("text of {name}"),
            0,
        ))
    }

    #[test]
    fn test_zero_candidates_is_no_match() {
        let resolver = Resolver::new(AmbiguityPolicy::List);
        assert!(matches!(resolver.resolve(vec![]), ResolveDecision::NoMatch));
    }

    #[test]
    fn test_single_candidate_converts_regardless_of_policy() {
        for policy in [
            AmbiguityPolicy::List,
            AmbiguityPolicy::First,
            AmbiguityPolicy::Skip,
        ] {
            let resolver = Resolver::new(policy);
            match resolver.resolve(vec![doc("only.png")]) {
                ResolveDecision::Convert(document) => {
                    assert_eq!(document.relative_path, "only.png");
                }
                other => panic!("expected Convert, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_first_policy_picks_first_in_order() {
        let resolver = Resolver::new(AmbiguityPolicy::First);
        match resolver.resolve(vec![doc("first.png"), doc("second.png")]) {
            ResolveDecision::Convert(document) => {
                assert_eq!(document.relative_path, "first.png");
            }
            other => panic!("expected Convert, got {other:?}"),
        }
    }

    #[test]
    fn test_list_policy_requests_listing() {
        let resolver = Resolver::new(AmbiguityPolicy::List);
        match resolver.resolve(vec![doc("a.png"), doc("b.png")]) {
            ResolveDecision::Ambiguous {
                candidates,
                write_listing,
            } => {
                assert_eq!(candidates.len(), 2);
                assert!(write_listing);
            }
            other => panic!("expected Ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn test_skip_policy_reports_without_listing() {
        let resolver = Resolver::new(AmbiguityPolicy::Skip);
        match resolver.resolve(vec![doc("a.png"), doc("b.png")]) {
            ResolveDecision::Ambiguous { write_listing, .. } => assert!(!write_listing),
            other => panic!("expected Ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn test_default_policy_is_list() {
        assert_eq!(AmbiguityPolicy::default(), AmbiguityPolicy::List);
    }
}
