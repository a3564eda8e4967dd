//! Decides whether a source file is a React component worth analyzing.

use super::patterns::{PatternRule, RuleKind, CLASSIFIER_RULES};

/// Which classifier rules matched a piece of source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationEvidence {
    pub matched_rules: Vec<&'static str>,
    pub has_framework_import: bool,
    pub has_component_definition: bool,
    pub has_markup_return: bool,
    pub has_hook_usage: bool,
}

impl ClassificationEvidence {
    /// The framework import is mandatory; any one of the shape signals
    /// completes the match.
    pub fn is_component(&self) -> bool {
        self.has_framework_import
            && (self.has_component_definition || self.has_markup_return || self.has_hook_usage)
    }

    fn record(&mut self, rule: &PatternRule) {
        self.matched_rules.push(rule.id);
        match rule.kind {
            RuleKind::FrameworkImport => self.has_framework_import = true,
            RuleKind::ComponentDefinition => self.has_component_definition = true,
            RuleKind::MarkupReturn => self.has_markup_return = true,
            RuleKind::HookUsage => self.has_hook_usage = true,
        }
    }
}

pub fn classify_with_evidence(source: &str) -> ClassificationEvidence {
    CLASSIFIER_RULES
        .iter()
        .filter(|rule| rule.is_match(source))
        .fold(ClassificationEvidence::default(), |mut evidence, rule| {
            evidence.record(rule);
            evidence
        })
}

/// Best-effort textual check; see [`super::patterns`] for the rules.
pub fn classify(source: &str) -> bool {
    classify_with_evidence(source).is_component()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_function_component_with_import() {
        let source = indoc! {r#"
            import React from 'react';

            export function Greeting({ name }) {
              return <h1>Hello {name}</h1>;
            }
        "#};
        assert!(classify(source));
    }

    #[test]
    fn test_hooks_without_import_are_rejected() {
        let source = "const [count, setCount] = useState(0);\nuseEffect(() => {}, []);";
        let evidence = classify_with_evidence(source);
        assert!(evidence.has_hook_usage);
        assert!(!evidence.is_component());
    }

    #[test]
    fn test_import_alone_is_not_enough() {
        assert!(!classify("import React from 'react';\nexport const VERSION = 3;"));
    }

    #[test]
    fn test_import_with_hook_only() {
        let source = "import { useMemo } from 'react';\nexport default useMemo;";
        assert!(classify(source));
    }

    #[test]
    fn test_empty_source() {
        assert!(!classify(""));
        assert!(classify_with_evidence("").matched_rules.is_empty());
    }

    #[test]
    fn test_evidence_lists_matched_rules_in_table_order() {
        let source = indoc! {r#"
            import React from 'react';
            const Card: React.FC = () => {
              return (
                <div />
              );
            };
        "#};
        let evidence = classify_with_evidence(source);
        assert_eq!(
            evidence.matched_rules,
            vec!["react-import", "arrow-component", "fc-annotation", "markup-return"]
        );
    }
}
