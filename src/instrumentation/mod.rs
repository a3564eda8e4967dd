//! Wraps a component's source in render-tracking instrumentation.
//!
//! The generated module is the original source, verbatim, surrounded by:
//!
//! - a namespaced `react` import that cannot clash with the component's own
//!   imports,
//! - a higher-order wrapper rendering the component inside a `Profiler`,
//!   keeping its render counter and sample list in `useRef`s so they belong
//!   to one mounted instance,
//! - a named export of the wrapped component, leaving the original default
//!   export untouched.
//!
//! On every commit the wrapper logs one line with the render count and the
//! latest duration; on unmount it logs the full sample list as JSON. Both
//! formats are defined in [`crate::harness::transcript`].

pub mod workspace;

pub use workspace::{ArtifactGuard, RunId, RunWorkspace};

use crate::analyzers::react::patterns::DEFAULT_EXPORT;
use crate::core::{ComponentIdentity, ComponentSource};
use crate::errors::{AnalysisError, Result};
use crate::harness::transcript::LOG_PREFIX;
use std::path::Path;
use tracing::{debug, warn};

/// Named export under which the instrumented module exposes the wrapper.
pub const TRACKED_EXPORT: &str = "BlinkReactTracked";

/// Instrumented copy of a component, removed from disk when dropped.
#[derive(Debug)]
pub struct InstrumentedArtifact {
    identity: ComponentIdentity,
    wrapped_component: String,
    run_id: RunId,
    guard: ArtifactGuard,
}

impl InstrumentedArtifact {
    pub fn path(&self) -> &Path {
        self.guard.path()
    }

    pub fn identity(&self) -> &ComponentIdentity {
        &self.identity
    }

    /// Identifier passed to the tracking wrapper.
    pub fn wrapped_component(&self) -> &str {
        &self.wrapped_component
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }
}

/// Write the instrumented copy of `source` into `workspace`.
pub fn instrument(
    source: &ComponentSource,
    identity: &ComponentIdentity,
    workspace: &RunWorkspace,
) -> Result<InstrumentedArtifact> {
    let wrapped = wrapped_component_name(source.content(), identity);
    let code = render_instrumented_source(source.content(), identity, &wrapped);
    let path = workspace.artifact_path(identity, instrumented_suffix(source.path()));

    let guard = ArtifactGuard::write(path.clone(), &code)
        .map_err(|source| AnalysisError::Instrumentation { path, source })?;
    debug!(
        artifact = %guard.path().display(),
        wrapped = %wrapped,
        "Instrumented component"
    );

    Ok(InstrumentedArtifact {
        identity: identity.clone(),
        wrapped_component: wrapped,
        run_id: workspace.run_id().clone(),
        guard,
    })
}

/// TypeScript sources keep a TypeScript extension so type annotations in
/// the verbatim copy still compile.
fn instrumented_suffix(original: &Path) -> &'static str {
    match original.extension().and_then(|e| e.to_str()) {
        Some("ts") | Some("tsx") => "instrumented.tsx",
        _ => "instrumented.jsx",
    }
}

/// The default-exported identifier when there is one, else the identity.
pub fn wrapped_component_name(source: &str, identity: &ComponentIdentity) -> String {
    if let Some(caps) = DEFAULT_EXPORT.captures(source) {
        return caps[1].to_string();
    }
    if !is_js_identifier(identity.as_str()) {
        warn!(
            identity = %identity,
            "No default export found and the file name is not a valid identifier"
        );
    }
    identity.as_str().to_string()
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Escape text for use inside single-quoted and template JS literals.
fn escape_js(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '\'' | '`' | '$' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const HEADER: &str = "// Instrumented by BlinkReact
import * as __blinkReact from 'react';

// Original component code
";

const WRAPPER: &str = r#"

// Performance tracking wrapper
function __blinkReactWithTracking(Component) {
  const WrappedComponent = (props) => {
    const renderCount = __blinkReact.useRef(0);
    const renderTimes = __blinkReact.useRef([]);

    __blinkReact.useEffect(() => () => {
      console.log(`__PREFIX__ __ID__ render times: ${JSON.stringify(renderTimes.current)}`);
    }, []);

    const handleRender = (id, phase, actualDuration, baseDuration, startTime, commitTime) => {
      renderCount.current += 1;
      renderTimes.current.push({ phase, actualDuration, baseDuration, startTime, commitTime });
      console.log(`__PREFIX__ __ID__ rendered ${renderCount.current} times, render duration: ${actualDuration.toFixed(2)}ms`);
    };

    return __blinkReact.createElement(
      __blinkReact.Profiler,
      { id: '__ID__', onRender: handleRender },
      __blinkReact.createElement(Component, props)
    );
  };

  WrappedComponent.displayName = `WithPerformanceTracking(${Component.displayName || Component.name || '__ID__'})`;
  return WrappedComponent;
}

export const __EXPORT__ = __blinkReactWithTracking(__WRAPPED__);
"#;

/// Build the instrumented module text. The original source is inserted
/// verbatim between the generated header and wrapper.
pub fn render_instrumented_source(
    original: &str,
    identity: &ComponentIdentity,
    wrapped: &str,
) -> String {
    let wrapper = WRAPPER
        .replace("__PREFIX__", &escape_js(LOG_PREFIX))
        .replace("__ID__", &escape_js(identity.as_str()))
        .replace("__EXPORT__", TRACKED_EXPORT)
        .replace("__WRAPPED__", wrapped);

    let mut code = String::with_capacity(HEADER.len() + original.len() + wrapper.len());
    code.push_str(HEADER);
    code.push_str(original);
    code.push_str(&wrapper);
    code
}
