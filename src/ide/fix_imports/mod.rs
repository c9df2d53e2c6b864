//! Import normalization ("fix usings").
//!
//! A run takes one buffer through four stages:
//!
//! ```text
//! buffer ─▶ remove redundant ─▶ sort ─▶ query import ─▶ resolution loop ─▶ FixResult
//! ```
//!
//! The resolution loop repeatedly asks the scanner for the next unresolved
//! reference and the code actions for namespaces that would bind it.
//! Exactly one candidate is applied and the buffer re-snapshotted; several
//! candidates become an [`AmbiguityNotice`]; none stalls the reference. A
//! handled reference is never offered again, and every applied edit must
//! change the text, so the loop always terminates.

mod config;
mod error;
mod passes;
mod response;
mod scanner;
mod traits;

pub use config::FixImportsConfig;
pub use error::FixError;
pub use passes::{ensure_query_import, remove_redundant_imports, sort_imports};
pub use response::{
    AmbiguityNotice, FixImportsRequest, FixImportsResponse, FixResult, FixStats, NoticeKind,
};
pub use scanner::{
    Cursor, HandledSet, ReferenceKey, ReferenceKind, UnresolvedReference, all_unresolved,
    next_unresolved,
};
pub use traits::{CodeActions, EditContext, ImportCandidate, ImportSite, Snapshot, SnapshotProvider};

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::SourceBuffer;
use crate::ide::edit::EditScript;

/// Drives the passes and the resolution loop over collaborators `P` and `A`.
#[derive(Clone, Debug, Default)]
pub struct ImportFixer<P, A> {
    provider: P,
    actions: A,
    config: FixImportsConfig,
}

/// What happened to one reference.
enum Step {
    Applied(SourceBuffer),
    Ambiguous,
    Stalled,
}

/// Mutable state of one loop run.
struct LoopState {
    buffer: SourceBuffer,
    notices: Vec<AmbiguityNotice>,
    stats: FixStats,
    handled: HandledSet,
    applied: FxHashSet<SmolStr>,
}

impl<P, A> ImportFixer<P, A>
where
    P: SnapshotProvider,
    A: CodeActions<Snapshot = P::Snapshot>,
{
    /// Create a fixer with the default configuration.
    pub fn new(provider: P, actions: A) -> Self {
        Self {
            provider,
            actions,
            config: FixImportsConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: FixImportsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &FixImportsConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    /// Normalize the imports of `buffer`.
    #[tracing::instrument(level = "debug", skip_all, fields(file = buffer.name()))]
    pub fn run(&self, buffer: SourceBuffer) -> Result<FixResult, FixError> {
        let buffer = remove_redundant_imports(&self.provider, &self.actions, buffer)?;
        let buffer = sort_imports(&self.provider, &self.actions, buffer)?;
        let buffer = ensure_query_import(&self.provider, &self.actions, buffer)?;

        let mut state = LoopState {
            buffer,
            notices: Vec::new(),
            stats: FixStats::default(),
            handled: HandledSet::default(),
            applied: FxHashSet::default(),
        };
        self.resolve_references(&mut state)?;

        tracing::debug!(
            iterations = state.stats.iterations,
            applied = state.stats.applied,
            ambiguous = state.stats.ambiguous,
            stalled = state.stats.stalled,
            "fix finished"
        );
        Ok(FixResult::assemble(state.buffer, state.notices, state.stats))
    }

    fn resolve_references(&self, state: &mut LoopState) -> Result<(), FixError> {
        let mut snapshot = self.provider.snapshot(&state.buffer)?;
        let budget = self.config.iteration_budget(all_unresolved(&snapshot)?.len());
        let mut cursor = Cursor::Start;

        loop {
            let Some(reference) = next_unresolved(&snapshot, cursor, &state.handled)? else {
                if cursor == Cursor::Start {
                    return Ok(());
                }
                // Something before the cursor may have changed; confirm with a
                // full scan before finishing.
                cursor = Cursor::Start;
                continue;
            };

            if state.stats.iterations >= budget {
                tracing::warn!(budget, "iteration budget exhausted; returning best-effort buffer");
                return Ok(());
            }
            state.stats.iterations += 1;

            match self.handle(&snapshot, &reference, state)? {
                Step::Applied(next) => {
                    state.stats.applied += 1;
                    state.buffer = next;
                    snapshot = self.provider.snapshot(&state.buffer)?;
                    cursor = Cursor::Start;
                }
                Step::Ambiguous | Step::Stalled => {
                    state.handled.insert(reference.key.clone());
                    cursor = Cursor::After(reference.index);
                }
            }
        }
    }

    fn handle(
        &self,
        snapshot: &P::Snapshot,
        reference: &UnresolvedReference<<P::Snapshot as Snapshot>::Node>,
        state: &mut LoopState,
    ) -> Result<Step, FixError> {
        let name = reference.name();
        let target = narrowest_named(snapshot, &reference.node, name);
        let ctx = EditContext {
            buffer: &state.buffer,
            snapshot,
            position: snapshot.start(&target),
        };
        let mut candidates = self.actions.import_candidates(&ctx)?;
        let position = snapshot.start(&reference.node);

        tracing::trace!(%name, %position, candidates = candidates.len(), "unresolved reference");

        if candidates.len() > 1 {
            tracing::debug!(%name, %position, "ambiguous reference");
            let namespaces = candidates.into_iter().map(|c| c.namespace).collect();
            state.notices.push(AmbiguityNotice::ambiguous(
                state.buffer.name(),
                position,
                name,
                namespaces,
            ));
            state.stats.ambiguous += 1;
            return Ok(Step::Ambiguous);
        }

        let Some(candidate) = candidates.pop() else {
            tracing::debug!(%name, %position, "no import binds reference");
            if self.config.report_unresolved {
                state
                    .notices
                    .push(AmbiguityNotice::unresolved(state.buffer.name(), position, name));
            }
            state.stats.stalled += 1;
            return Ok(Step::Stalled);
        };

        if state.applied.contains(&candidate.namespace) {
            tracing::warn!(%name, namespace = %candidate.namespace, "namespace already imported this run; skipping");
            state.stats.stalled += 1;
            return Ok(Step::Stalled);
        }

        let mut script = EditScript::begin(&state.buffer);
        script.apply(candidate.edits);
        let next = script.commit()?;
        if next.text() == state.buffer.text() {
            tracing::error!(%name, namespace = %candidate.namespace, "import edit left the buffer unchanged");
            state.stats.stalled += 1;
            return Ok(Step::Stalled);
        }

        tracing::debug!(%name, namespace = %candidate.namespace, "import added");
        state.applied.insert(candidate.namespace);
        Ok(Step::Applied(next))
    }
}

/// The smallest node under `node` whose text is `name`, else `node` itself.
fn narrowest_named<S: Snapshot>(snapshot: &S, node: &S::Node, name: &str) -> S::Node {
    snapshot
        .descendants(node)
        .into_iter()
        .filter(|candidate| snapshot.text(candidate) == name)
        .min_by_key(|candidate| snapshot.range(candidate).len())
        .unwrap_or_else(|| node.clone())
}
