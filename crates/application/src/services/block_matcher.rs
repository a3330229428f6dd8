use super::rule_set::CreatorRuleSet;
use chrono::{DateTime, Utc};
use regexblock_domain::{MatchedBy, Rule, Subject};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RuleHit {
    pub rule: Arc<Rule>,
    pub matched_by: MatchedBy,
    pub matched_value: Arc<str>,
}

#[derive(Debug, Default)]
pub struct MatchOutcome {
    pub hit: Option<RuleHit>,
    /// Rules that matched but had already expired; callers purge them.
    pub expired: Vec<Arc<Rule>>,
}

impl MatchOutcome {
    fn consider(&mut self, rule: &Arc<Rule>, all_live: bool, now: DateTime<Utc>) -> bool {
        if all_live || rule.is_live_at(now) {
            true
        } else {
            self.expired.push(Arc::clone(rule));
            false
        }
    }
}

/// Matches a subject against one creator's rules.
///
/// Priority is IP literal, then exact name, then regex (oldest rule first,
/// first non-empty match wins). An expired candidate never matches; the scan
/// moves on to the next candidate.
pub fn match_subject(set: &CreatorRuleSet, subject: &Subject, now: DateTime<Utc>) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();
    let all_live = set.all_live_at(now);

    if !set.ip_literals.is_empty() {
        for candidate in subject.address_candidates() {
            if let Some(rule) = set.ip_literals.get(&candidate) {
                if outcome.consider(rule, all_live, now) {
                    outcome.hit = Some(RuleHit {
                        rule: Arc::clone(rule),
                        matched_by: MatchedBy::Address,
                        matched_value: candidate,
                    });
                    return outcome;
                }
            }
        }
    }

    if let Some(rule) = set.exact_names.get(&subject.name) {
        if outcome.consider(rule, all_live, now) {
            outcome.hit = Some(RuleHit {
                rule: Arc::clone(rule),
                matched_by: MatchedBy::Name,
                matched_value: subject.name.clone(),
            });
            return outcome;
        }
    }

    for compiled in &set.regexes {
        match compiled.regex.find(&subject.name) {
            Ok(Some(m)) if !m.as_str().is_empty() => {
                if outcome.consider(&compiled.rule, all_live, now) {
                    outcome.hit = Some(RuleHit {
                        rule: Arc::clone(&compiled.rule),
                        matched_by: MatchedBy::Regex,
                        matched_value: compiled.rule.pattern.clone(),
                    });
                    return outcome;
                }
            }
            Ok(_) => {}
            Err(e) => {
                debug!(rule_id = compiled.rule.id, error = %e, "Regex evaluation aborted");
            }
        }
    }

    outcome
}
