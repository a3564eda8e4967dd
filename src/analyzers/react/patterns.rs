//! Textual heuristic rules for React source.
//!
//! Every source-understanding decision in the analyzer goes through one of
//! the rules below. They are regular expressions over raw text, not a
//! parser: false positives and negatives are expected, and callers treat
//! results as best-effort evidence.
//!
//! | id                    | kind                | matches                                  |
//! |-----------------------|---------------------|------------------------------------------|
//! | `react-import`        | framework import    | `import ... React` (case-insensitive)     |
//! | `react-require`       | framework import    | `require('react')`                        |
//! | `function-component`  | component shape     | `function X(...) {`                       |
//! | `class-component`     | component shape     | `class X extends Component`               |
//! | `arrow-component`     | component shape     | `const X = (...) =>`                      |
//! | `fc-annotation`       | component shape     | `React.FC`                                |
//! | `markup-return`       | markup return       | `return <div>` / `return (\n <div>`       |
//! | `hook-call`           | hook usage          | any built-in state/effect hook name       |
//!
//! Per-setter rules (call sites, self-referential updates, adjacent updates)
//! depend on the hook being analyzed and are built by [`SetterRules`].

use once_cell::sync::Lazy;
use regex::Regex;

/// What a classifier rule is evidence of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    FrameworkImport,
    ComponentDefinition,
    MarkupReturn,
    HookUsage,
}

#[derive(Debug)]
pub struct PatternRule {
    pub id: &'static str,
    pub kind: RuleKind,
    pub description: &'static str,
    regex: &'static Lazy<Regex>,
}

impl PatternRule {
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

static REACT_IMPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)import.*react").unwrap());
static REACT_REQUIRE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"require\(\s*['"]react['"]\s*\)"#).unwrap());
static FUNCTION_COMPONENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)function.*\(.*\).*\{").unwrap());
static CLASS_COMPONENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)class.*extends.*component").unwrap());
static ARROW_COMPONENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)const.*=.*\(.*\).*=>").unwrap());
static FC_ANNOTATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)react\.fc").unwrap());
static MARKUP_RETURN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)return(?:.*|\s*\(\s*)<").unwrap());
static HOOK_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)use(?:State|Effect|LayoutEffect|Context|Reducer|Callback|Memo|Ref)").unwrap()
});

pub static CLASSIFIER_RULES: [PatternRule; 8] = [
    PatternRule {
        id: "react-import",
        kind: RuleKind::FrameworkImport,
        description: "ES import mentioning React",
        regex: &REACT_IMPORT,
    },
    PatternRule {
        id: "react-require",
        kind: RuleKind::FrameworkImport,
        description: "CommonJS require of react",
        regex: &REACT_REQUIRE,
    },
    PatternRule {
        id: "function-component",
        kind: RuleKind::ComponentDefinition,
        description: "function declaration with a body",
        regex: &FUNCTION_COMPONENT,
    },
    PatternRule {
        id: "class-component",
        kind: RuleKind::ComponentDefinition,
        description: "class extending Component",
        regex: &CLASS_COMPONENT,
    },
    PatternRule {
        id: "arrow-component",
        kind: RuleKind::ComponentDefinition,
        description: "arrow function bound to a const",
        regex: &ARROW_COMPONENT,
    },
    PatternRule {
        id: "fc-annotation",
        kind: RuleKind::ComponentDefinition,
        description: "React.FC type annotation",
        regex: &FC_ANNOTATION,
    },
    PatternRule {
        id: "markup-return",
        kind: RuleKind::MarkupReturn,
        description: "return statement followed by markup",
        regex: &MARKUP_RETURN,
    },
    PatternRule {
        id: "hook-call",
        kind: RuleKind::HookUsage,
        description: "built-in state or effect hook name",
        regex: &HOOK_CALL,
    },
];

/// `const [value, setValue] = useState(...)`, also with `let`/`var` and a
/// `React.` qualifier. Captures the value and setter identifiers.
pub static STATE_HOOK_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:const|let|var)\s+\[\s*(\w+)\s*,\s*(\w+)\s*\]\s*=\s*(?:React\s*\.\s*)?useState\b")
        .unwrap()
});

/// `export default Name;`, `export default function Name(` or
/// `export default class Name extends`. Captures the identifier.
pub static DEFAULT_EXPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)export\s+default\s+(?:(?:async\s+)?function\s*\*?\s*|class\s+)?([A-Z]\w*)\s*(?:[;({]|extends\b|$)",
    )
    .unwrap()
});

/// Rules scoped to one state setter.
#[derive(Debug)]
pub struct SetterRules {
    /// `setX(` anywhere in the source
    pub call_site: Regex,
    /// `setX(x)`: the setter fed its own state variable
    pub self_referential: Regex,
    /// `setX(...) ... setX(` with no `;` in between
    pub adjacent_calls: Regex,
}

impl SetterRules {
    pub fn new(state_name: &str, setter_name: &str) -> Result<Self, regex::Error> {
        let setter = regex::escape(setter_name);
        let state = regex::escape(state_name);
        Ok(Self {
            call_site: Regex::new(&format!(r"\b{setter}\s*\("))?,
            self_referential: Regex::new(&format!(r"\b{setter}\s*\(\s*{state}\s*\)"))?,
            adjacent_calls: Regex::new(&format!(r"\b{setter}\s*\([^;]+\)[^;]*\b{setter}\s*\("))?,
        })
    }
}
