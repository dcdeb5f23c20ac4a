use crate::agents::AgentRegistry;
use crate::config::Config;
use crate::error::{Result, SteerError};
use crate::policy::Policy;
use crate::resolver::{ResolvedRuleSet, Resolver};
use crate::rules::RuleRepository;
use crate::types::TaskSignal;
use std::path::Path;
use tracing::debug;

/// Everything a resolution reads, loaded once from a workspace root.
///
/// Loading is all-or-nothing: any rule, agent or config error aborts and no
/// catalog is produced. To pick up changes on disk, load a new catalog.
#[derive(Debug)]
pub struct Catalog {
    config: Config,
    rules: RuleRepository,
    agents: AgentRegistry,
    policy: Policy,
}

impl Catalog {
    pub fn load(root: &Path) -> Result<Self> {
        let config = Config::load(root)?;
        let (rules_root, agents_root) = (config.rules_root(root), config.agents_root(root));
        if rules_root == agents_root {
            return Err(SteerError::load(
                rules_root,
                "rules_dir and agents_dir must be different directories",
            ));
        }
        let rules = RuleRepository::load(&rules_root)?;
        let agents = AgentRegistry::load(&agents_root)?;
        let policy = config.policy();

        debug!(
            root = %root.display(),
            rules = rules.len(),
            agents = agents.len(),
            "catalog loaded"
        );
        Ok(Self {
            config,
            rules,
            agents,
            policy,
        })
    }

    pub fn from_parts(rules: RuleRepository, agents: AgentRegistry, policy: Policy) -> Self {
        Self {
            config: Config::default(),
            rules,
            agents,
            policy,
        }
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.rules, &self.agents, &self.policy)
    }

    pub fn resolve(&self, signal: &TaskSignal) -> ResolvedRuleSet<'_> {
        self.resolver().resolve(signal)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rules(&self) -> &RuleRepository {
        &self.rules
    }

    pub fn agents(&self) -> &AgentRegistry {
        &self.agents
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentDescriptor;
    use crate::rules::RuleDocument;
    use crate::types::{LanguageTag, TaskCategory};
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    fn workspace() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "rules/coding-style.md", "global style");
        write(dir.path(), "rules/testing.md", "global testing");
        write(dir.path(), "rules/languages/rust/coding-style.md", "rust style");
        write(
            dir.path(),
            "agents/tdd-guide.md",
            "---\nname: tdd-guide\ndescription: tdd coverage test\n---\nWrite the test first.\n",
        );
        write(
            dir.path(),
            "agents/security-reviewer.md",
            "---\nname: security-reviewer\ndescription: security vulnerability secret\n---\n",
        );
        dir
    }

    #[test]
    fn catalog_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
    }

    #[test]
    fn load_and_resolve() {
        let dir = workspace();
        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.rules().len(), 3);
        assert_eq!(catalog.agents().len(), 2);

        let signal = TaskSignal::new(TaskCategory::Testing)
            .with_language(LanguageTag::new("rust").unwrap());
        let set = catalog.resolve(&signal);
        assert_eq!(set.applicable_rules.len(), 1);
        assert_eq!(set.applicable_rules[0].content(), "global testing");
        assert_eq!(set.selected_agent.unwrap().name, "tdd-guide");
    }

    #[test]
    fn config_redirects_directories() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".claude/rules/security.md", "sec");
        write(
            dir.path(),
            ".claude/agents/sec.md",
            "---\nname: sec\ndescription: security\n---\n",
        );
        write(
            dir.path(),
            "steer.yaml",
            "rules_dir: .claude/rules\nagents_dir: .claude/agents\n",
        );
        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.config().rules_dir, Path::new(".claude/rules"));
        let set = catalog.resolve(&TaskSignal::new(TaskCategory::Security));
        assert_eq!(set.applicable_rules[0].content(), "sec");
        assert_eq!(set.selected_agent.unwrap().name, "sec");
    }

    #[test]
    fn duplicate_rule_aborts_load() {
        let dir = workspace();
        write(dir.path(), "rules/coding-style.txt", "again");
        let err = Catalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, SteerError::DuplicateRule { .. }));
    }

    #[test]
    fn malformed_agent_aborts_load() {
        let dir = workspace();
        write(dir.path(), "agents/broken.md", "---\nname: broken\n---\n");
        let err = Catalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, SteerError::MalformedAgent { .. }));
    }

    #[test]
    fn missing_agents_dir_aborts_load() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "rules/testing.md", "t");
        let err = Catalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, SteerError::RepositoryLoad { .. }));
    }

    #[test]
    fn shared_rules_and_agents_dir_rejected() {
        let dir = workspace();
        write(dir.path(), "steer.yaml", "rules_dir: agents\nagents_dir: agents\n");
        let err = Catalog::load(dir.path()).unwrap_err();
        match err {
            SteerError::RepositoryLoad { reason, .. } => assert!(reason.contains("different")),
            other => panic!("expected RepositoryLoad, got {other:?}"),
        }
    }

    #[test]
    fn from_parts_resolves_in_memory() {
        let rules = RuleRepository::from_documents([RuleDocument::global(
            "security",
            "Never log secrets.",
            "security.md",
        )])
        .unwrap();
        let agents = AgentRegistry::from_descriptors([AgentDescriptor::new(
            "security-reviewer",
            "security vulnerability review",
        )
        .with_tools(["Read", "Grep"])
        .with_model("opus")])
        .unwrap();
        let catalog = Catalog::from_parts(rules, agents, Policy::default());

        assert_eq!(catalog.config(), &Config::default());
        assert_eq!(catalog.policy().topics_for(TaskCategory::Security), ["security"]);

        let set = catalog.resolve(&TaskSignal::new(TaskCategory::Security));
        let agent = set.selected_agent.unwrap();
        assert!(agent.allows("Grep"));
        assert!(!agent.allows("Bash"));
        assert_eq!(agent.model.as_deref(), Some("opus"));
        assert_eq!(set.applicable_rules[0].content(), "Never log secrets.");
    }
}
