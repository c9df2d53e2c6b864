//! Finding the next reference that needs an import.

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::FixError;
use super::traits::Snapshot;
use crate::hir::ResolutionOutcome;

/// Kind of unresolved reference. Identifiers sort before members.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReferenceKind {
    Identifier,
    Member,
}

/// Identity of a reference that survives re-parsing: the nth unresolved
/// reference of this kind and name in document order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReferenceKey {
    pub kind: ReferenceKind,
    pub name: SmolStr,
    pub occurrence: u32,
}

/// An unresolved node in one snapshot. Not valid after re-snapshotting.
#[derive(Clone, Debug, PartialEq)]
pub struct UnresolvedReference<N> {
    pub node: N,
    /// Position in the snapshot's preorder.
    pub index: usize,
    pub outcome: ResolutionOutcome,
    pub key: ReferenceKey,
}

impl<N> UnresolvedReference<N> {
    /// The name an import has to bind.
    pub fn name(&self) -> &SmolStr {
        &self.key.name
    }
}

/// Where the next scan starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Start,
    /// Strictly after the node at this preorder index.
    After(usize),
}

impl Cursor {
    fn admits(self, index: usize) -> bool {
        match self {
            Cursor::Start => true,
            Cursor::After(handled) => index > handled,
        }
    }
}

/// References already dealt with during a run.
#[derive(Clone, Debug, Default)]
pub struct HandledSet {
    keys: FxHashSet<ReferenceKey>,
}

impl HandledSet {
    pub fn insert(&mut self, key: ReferenceKey) -> bool {
        self.keys.insert(key)
    }

    pub fn contains(&self, key: &ReferenceKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Every unresolved reference of `snapshot`, in document order.
pub fn all_unresolved<S: Snapshot>(snapshot: &S) -> Result<Vec<UnresolvedReference<S::Node>>, FixError> {
    let mut seen: FxHashMap<(ReferenceKind, SmolStr), u32> = FxHashMap::default();
    let mut found = Vec::new();

    for (index, node) in snapshot.preorder().into_iter().enumerate() {
        let outcome = snapshot.resolve(&node)?;
        let (kind, name) = match &outcome {
            ResolutionOutcome::Resolved => continue,
            ResolutionOutcome::UnknownIdentifier { name } => (ReferenceKind::Identifier, name.clone()),
            ResolutionOutcome::UnknownMember { member_name } => (ReferenceKind::Member, member_name.clone()),
        };
        let counter = seen.entry((kind, name.clone())).or_insert(0);
        let occurrence = *counter;
        *counter += 1;

        found.push(UnresolvedReference {
            node,
            index,
            outcome,
            key: ReferenceKey {
                kind,
                name,
                occurrence,
            },
        });
    }

    Ok(found)
}

/// The next reference to work on.
///
/// Only references after `cursor` that are not `handled` qualify. The first
/// unknown identifier wins; failing that, the first unknown member.
pub fn next_unresolved<S: Snapshot>(
    snapshot: &S,
    cursor: Cursor,
    handled: &HandledSet,
) -> Result<Option<UnresolvedReference<S::Node>>, FixError> {
    let mut first_member = None;

    for reference in all_unresolved(snapshot)? {
        if !cursor.admits(reference.index) || handled.contains(&reference.key) {
            continue;
        }
        match reference.key.kind {
            ReferenceKind::Identifier => return Ok(Some(reference)),
            ReferenceKind::Member => {
                if first_member.is_none() {
                    first_member = Some(reference);
                }
            }
        }
    }

    Ok(first_member)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{FileId, SourceBuffer};
    use crate::hir::SymbolTable;
    use crate::ide::fix_imports::SnapshotProvider;
    use crate::ide::snapshot::CSharpSnapshotProvider;
    use std::sync::Arc;

    fn snapshot(text: &str) -> crate::ide::snapshot::CSharpSnapshot {
        let provider = CSharpSnapshotProvider::new(Arc::new(SymbolTable::standard()));
        provider
            .snapshot(&SourceBuffer::new(FileId::new(0), "a.cs", text))
            .unwrap()
    }

    const TEXT: &str = "class A {\n void M() {\n  \"s\".Whatever();\n  Foo f;\n  Bar b;\n  Foo g;\n }\n}";

    #[test]
    fn test_occurrence_keys_count_per_name() {
        let all = all_unresolved(&snapshot(TEXT)).unwrap();
        let keys: Vec<(ReferenceKind, &str, u32)> = all
            .iter()
            .map(|r| (r.key.kind, r.key.name.as_str(), r.key.occurrence))
            .collect();
        assert_eq!(
            keys,
            vec![
                (ReferenceKind::Member, "Whatever", 0),
                (ReferenceKind::Identifier, "Foo", 0),
                (ReferenceKind::Identifier, "Bar", 0),
                (ReferenceKind::Identifier, "Foo", 1),
            ]
        );
    }

    #[test]
    fn test_identifiers_win_over_earlier_members() {
        let next = next_unresolved(&snapshot(TEXT), Cursor::Start, &HandledSet::default())
            .unwrap()
            .unwrap();
        assert_eq!(next.name(), "Foo");
        assert_eq!(next.key.occurrence, 0);
    }

    #[test]
    fn test_cursor_and_handled_skip_references() {
        let snapshot = snapshot(TEXT);
        let first = next_unresolved(&snapshot, Cursor::Start, &HandledSet::default())
            .unwrap()
            .unwrap();

        let mut handled = HandledSet::default();
        handled.insert(first.key.clone());
        let second = next_unresolved(&snapshot, Cursor::After(first.index), &handled)
            .unwrap()
            .unwrap();
        assert_eq!(second.name(), "Bar");

        handled.insert(second.key.clone());
        let third = next_unresolved(&snapshot, Cursor::After(second.index), &handled)
            .unwrap()
            .unwrap();
        assert_eq!((third.name().as_str(), third.key.occurrence), ("Foo", 1));

        handled.insert(third.key.clone());
        let fourth = next_unresolved(&snapshot, Cursor::After(third.index), &handled).unwrap();
        assert!(fourth.is_none(), "member before the cursor is not offered");

        let rescan = next_unresolved(&snapshot, Cursor::Start, &handled)
            .unwrap()
            .unwrap();
        assert_eq!(rescan.name(), "Whatever");
    }
}
