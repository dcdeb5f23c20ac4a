//! Resolver: task signal in, applicable rules and best agent out.
//!
//! Resolution borrows the repository, registry and policy and never fails.
//! Absence of a rule or an agent is a normal outcome, not an error.

use crate::agents::{AgentDescriptor, AgentRegistry};
use crate::policy::{KeywordMatcher, Policy};
use crate::rules::{RuleDocument, RuleRepository};
use crate::types::{TaskCategory, TaskSignal};
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One agent whose trigger text mentions at least one category keyword.
#[derive(Debug, Clone, Serialize)]
pub struct AgentMatch<'a> {
    #[serde(serialize_with = "agent_name")]
    pub agent: &'a AgentDescriptor,
    pub score: usize,
    pub matched_keywords: Vec<&'a str>,
}

fn agent_name<S: Serializer>(agent: &&AgentDescriptor, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&agent.name)
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolvedRuleSet<'a> {
    pub signal: TaskSignal,
    /// Topics requested for the category, before omission.
    pub topics: &'a [String],
    pub applicable_rules: Vec<&'a RuleDocument>,
    pub selected_agent: Option<&'a AgentDescriptor>,
    /// Every matching agent, best first. `selected_agent` is the head.
    pub candidates: Vec<AgentMatch<'a>>,
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    rules: &'a RuleRepository,
    agents: &'a AgentRegistry,
    policy: &'a Policy,
}

impl<'a> Resolver<'a> {
    pub fn new(rules: &'a RuleRepository, agents: &'a AgentRegistry, policy: &'a Policy) -> Self {
        Self {
            rules,
            agents,
            policy,
        }
    }

    pub fn resolve(&self, signal: &TaskSignal) -> ResolvedRuleSet<'a> {
        let topics = self.policy.topics_for(signal.category);
        let applicable_rules = self.rules.resolve(signal.language.as_ref(), topics);
        let candidates = self.rank_agents(signal.category);
        let selected_agent = candidates.first().map(|m| m.agent);

        ResolvedRuleSet {
            signal: signal.clone(),
            topics,
            applicable_rules,
            selected_agent,
            candidates,
        }
    }

    /// Agents whose trigger text has a word starting with a keyword of
    /// `category`, ranked by distinct keyword hits, then by name.
    pub fn rank_agents(&self, category: TaskCategory) -> Vec<AgentMatch<'a>> {
        let matchers = self.policy.matchers_for(category);
        let mut matches: Vec<AgentMatch<'a>> = self
            .agents
            .iter()
            .filter_map(|agent| {
                let matched: Vec<&'a str> = matchers
                    .iter()
                    .filter(|m| m.is_match(&agent.trigger_description))
                    .map(KeywordMatcher::keyword)
                    .collect();
                (!matched.is_empty()).then(|| AgentMatch {
                    agent,
                    score: matched.len(),
                    matched_keywords: matched,
                })
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.agent.name.cmp(&b.agent.name))
        });
        matches
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
