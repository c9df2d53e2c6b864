//! IDE features: the import fixer and the C# collaborators it runs against.
//!
//! [`fix_imports`] is language independent; it only sees the
//! [`SnapshotProvider`] and [`CodeActions`] traits. [`snapshot`] and
//! [`code_actions`] implement them for the C# subset, and
//! [`AnalysisHost`] wires everything together for editor requests.
//!
//! ## Usage
//!
//! ```
//! use sharpfix::ide::{AnalysisHost, FixImportsRequest};
//!
//! let host = AnalysisHost::new();
//! let response = host
//!     .fix_imports(&FixImportsRequest::new("a.cs", "using System.IO;\nclass A {}"))
//!     .unwrap();
//! assert_eq!(response.buffer, "class A {}");
//! ```

mod analysis;
pub mod code_actions;
pub mod edit;
pub mod fix_imports;
pub mod snapshot;

pub use analysis::AnalysisHost;
pub use code_actions::CSharpCodeActions;
pub use edit::{EditError, EditScript, TextEdit, apply_edits};
pub use fix_imports::{
    AmbiguityNotice, CodeActions, EditContext, FixError, FixImportsConfig, FixImportsRequest,
    FixImportsResponse, FixResult, FixStats, ImportCandidate, ImportFixer, ImportSite, NoticeKind,
    Snapshot, SnapshotProvider,
};
pub use snapshot::{CSharpSnapshot, CSharpSnapshotProvider};
