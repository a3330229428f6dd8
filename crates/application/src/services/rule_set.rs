use super::pattern::compile_pattern;
use chrono::{DateTime, Utc};
use fancy_regex::Regex;
use regexblock_domain::{Expiry, Rule, RuleKind};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug)]
pub struct CompiledRegexRule {
    pub regex: Regex,
    pub rule: Arc<Rule>,
}

/// Immutable snapshot of one creator's live rules, split by match kind.
#[derive(Debug)]
pub struct CreatorRuleSet {
    pub creator: Arc<str>,
    pub ip_literals: FxHashMap<Arc<str>, Arc<Rule>>,
    pub exact_names: FxHashMap<Arc<str>, Arc<Rule>>,
    /// Oldest rule first.
    pub regexes: Vec<CompiledRegexRule>,
    /// Earliest finite expiry in the set. While it lies in the future every
    /// rule in the set is live.
    pub next_expiry: Option<DateTime<Utc>>,
}

impl CreatorRuleSet {
    pub fn empty(creator: Arc<str>) -> Self {
        Self {
            creator,
            ip_literals: FxHashMap::default(),
            exact_names: FxHashMap::default(),
            regexes: Vec::new(),
            next_expiry: None,
        }
    }

    pub fn compile(creator: Arc<str>, mut rules: Vec<Rule>) -> Self {
        rules.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let mut set = Self::empty(creator);
        for rule in rules {
            if let Expiry::At(t) = rule.expiry {
                set.next_expiry = Some(set.next_expiry.map_or(t, |cur| cur.min(t)));
            }
            let rule = Arc::new(rule);
            match rule.kind {
                RuleKind::IpLiteral => {
                    set.ip_literals.insert(rule.pattern.clone(), rule);
                }
                RuleKind::ExactName => {
                    set.exact_names.insert(rule.pattern.clone(), rule);
                }
                RuleKind::Regex => match compile_pattern(&rule.pattern) {
                    Ok(regex) => set.regexes.push(CompiledRegexRule { regex, rule }),
                    Err(e) => {
                        warn!(rule_id = rule.id, error = %e, "Skipping stored rule with invalid pattern");
                    }
                },
            }
        }
        set
    }

    pub fn len(&self) -> usize {
        self.ip_literals.len() + self.exact_names.len() + self.regexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when this exact rule snapshot belongs to the set.
    pub fn contains(&self, rule: &Arc<Rule>) -> bool {
        let same = |r: &Arc<Rule>| Arc::ptr_eq(r, rule);
        match rule.kind {
            RuleKind::IpLiteral => self.ip_literals.get(&rule.pattern).is_some_and(same),
            RuleKind::ExactName => self.exact_names.get(&rule.pattern).is_some_and(same),
            RuleKind::Regex => self.regexes.iter().any(|c| same(&c.rule)),
        }
    }

    #[inline]
    pub fn all_live_at(&self, now: DateTime<Utc>) -> bool {
        self.next_expiry.map_or(true, |t| t > now)
    }
}
