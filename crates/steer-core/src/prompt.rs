use crate::resolver::ResolvedRuleSet;

/// Concatenate a resolution into one instruction payload.
///
/// The selected agent's instructions come first, then every rule body in
/// resolved order. Each rule is preceded by an HTML comment naming its topic
/// and scope so the payload stays traceable. Bodies are inserted verbatim.
pub fn assemble_prompt(set: &ResolvedRuleSet<'_>) -> String {
    let mut sections: Vec<String> = Vec::with_capacity(set.applicable_rules.len() + 1);

    if let Some(agent) = set.selected_agent {
        let body = agent.instructions.trim();
        if !body.is_empty() {
            sections.push(format!("<!-- agent: {} -->\n{body}", agent.name));
        }
    }

    for rule in &set.applicable_rules {
        sections.push(format!(
            "<!-- rule: {} ({}) -->\n{}",
            rule.key(),
            rule.scope(),
            rule.content().trim_end()
        ));
    }

    if sections.is_empty() {
        return String::new();
    }
    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{AgentDescriptor, AgentRegistry};
    use crate::policy::Policy;
    use crate::resolver::Resolver;
    use crate::rules::{RuleDocument, RuleRepository};
    use crate::types::{LanguageTag, TaskCategory, TaskSignal};

    #[test]
    fn agent_first_then_rules_in_order() {
        let rust = LanguageTag::new("rust").unwrap();
        let rules = RuleRepository::from_documents([
            RuleDocument::global("coding-style", "Global style.\n", "c.md"),
            RuleDocument::global("security", "Never log secrets.\n", "s.md"),
            RuleDocument::language_specific(rust.clone(), "coding-style", "Use clippy.\n", "r.md"),
        ])
        .unwrap();
        let mut reviewer = AgentDescriptor::new("code-reviewer", "code review for quality");
        reviewer.instructions = "You review code.".into();
        let agents = AgentRegistry::from_descriptors([reviewer]).unwrap();
        let policy = Policy::default();

        let set = Resolver::new(&rules, &agents, &policy)
            .resolve(&TaskSignal::new(TaskCategory::ReviewingCode).with_language(rust));
        let prompt = assemble_prompt(&set);

        assert_eq!(
            prompt,
            "<!-- agent: code-reviewer -->\nYou review code.\n\n\
             <!-- rule: rust/coding-style (language_specific) -->\nUse clippy.\n\n\
             <!-- rule: security (global) -->\nNever log secrets.\n"
        );
    }

    #[test]
    fn empty_resolution_is_empty_prompt() {
        let (rules, agents, policy) = (
            RuleRepository::default(),
            AgentRegistry::default(),
            Policy::default(),
        );
        let set = Resolver::new(&rules, &agents, &policy).resolve(&TaskSignal::new(TaskCategory::E2e));
        assert_eq!(assemble_prompt(&set), "");
    }
}
