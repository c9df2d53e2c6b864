//! Symbol tables: which namespaces declare which types and extension methods.
//!
//! A [`SymbolTable`] is built either from a buffer's own declarations
//! ([`SymbolTable::collect`]) or from the bundled framework library
//! ([`SymbolTable::standard`]). The resolver consults both through a
//! [`Symbols`] view.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use crate::syntax::ast;
use crate::syntax::{SyntaxKind, SyntaxNode};

/// Namespace whose import enables query syntax.
pub const LINQ_NAMESPACE: &str = "System.Linq";

/// Members every value has.
pub const OBJECT_MEMBERS: &[&str] = &["Equals", "GetHashCode", "GetType", "ToString"];

// ============================================================================
// TYPES
// ============================================================================

/// A declared class and the member names it exposes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeInfo {
    /// Simple name.
    pub name: SmolStr,
    /// Declaring namespace; empty for the global namespace.
    pub namespace: SmolStr,
    /// Field, property, method and nested type names.
    pub members: FxHashSet<SmolStr>,
    /// Declared `static`.
    pub is_static: bool,
    /// Declares a base list, so its member set may be incomplete.
    pub has_base: bool,
}

impl TypeInfo {
    /// Create an empty type in `namespace`.
    pub fn new(namespace: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Add member names.
    pub fn with_members<'m>(mut self, members: impl IntoIterator<Item = &'m str>) -> Self {
        self.members.extend(members.into_iter().map(SmolStr::new));
        self
    }

    /// Mark as a static class.
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Whether `member` is declared on this type.
    pub fn has_member(&self, member: &str) -> bool {
        self.members.contains(member)
    }

    /// Qualified name, `Namespace.Name`.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.to_string()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

/// Built-in type for a predefined keyword such as `string`.
pub fn predefined_type(keyword: &str) -> TypeInfo {
    let members: &[&str] = match keyword {
        "string" => &[
            "Length", "Substring", "ToUpper", "ToLower", "ToUpperInvariant", "ToLowerInvariant",
            "Trim", "TrimStart", "TrimEnd", "Split", "Contains", "StartsWith", "EndsWith",
            "Replace", "IndexOf", "LastIndexOf", "PadLeft", "PadRight", "Insert", "Remove",
            "ToCharArray", "CompareTo", "Format", "Join", "Concat", "IsNullOrEmpty",
            "IsNullOrWhiteSpace", "Empty", "Compare",
        ],
        _ => &["CompareTo", "Parse", "TryParse", "MaxValue", "MinValue", "HasValue", "Value"],
    };
    TypeInfo::new("System", keyword).with_members(members.iter().copied())
}

/// Built-in type for any array.
pub fn array_type() -> TypeInfo {
    TypeInfo::new("System", "Array")
        .with_members(["Length", "LongLength", "Rank", "Clone", "CopyTo", "GetValue", "SetValue"])
}

/// Types and extension methods declared in one namespace.
#[derive(Clone, Debug, Default)]
pub struct NamespaceScope {
    types: FxHashMap<SmolStr, TypeInfo>,
    extensions: FxHashSet<SmolStr>,
}

impl NamespaceScope {
    /// Look up a type by simple name.
    pub fn type_named(&self, name: &str) -> Option<&TypeInfo> {
        self.types.get(name)
    }

    /// Whether an extension method named `name` is declared here.
    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    /// All types declared here.
    pub fn types(&self) -> impl Iterator<Item = &TypeInfo> {
        self.types.values()
    }
}

// ============================================================================
// SYMBOL TABLE
// ============================================================================

/// Namespace → declarations, in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    namespaces: IndexMap<SmolStr, NamespaceScope>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a namespace, even if it declares nothing.
    pub fn add_namespace(&mut self, namespace: &str) -> &mut NamespaceScope {
        self.namespaces.entry(SmolStr::new(namespace)).or_default()
    }

    /// Register a type in its namespace.
    pub fn add_type(&mut self, info: TypeInfo) {
        let scope = self.add_namespace(&info.namespace.clone());
        match scope.types.get_mut(&info.name) {
            // Partial classes contribute members from every declaration.
            Some(existing) => {
                existing.members.extend(info.members);
                existing.is_static |= info.is_static;
                existing.has_base |= info.has_base;
            }
            None => {
                scope.types.insert(info.name.clone(), info);
            }
        }
    }

    /// Register an extension method.
    pub fn add_extension(&mut self, namespace: &str, method: &str) {
        self.add_namespace(namespace).extensions.insert(SmolStr::new(method));
    }

    /// The scope of a namespace, if known.
    pub fn namespace(&self, namespace: &str) -> Option<&NamespaceScope> {
        self.namespaces.get(namespace)
    }

    /// Known namespaces in registration order.
    pub fn namespaces(&self) -> impl Iterator<Item = &SmolStr> {
        self.namespaces.keys()
    }

    /// Number of known namespaces.
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    /// Whether the table knows no namespace.
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    /// Collect the declarations of one parsed buffer.
    pub fn collect(root: &SyntaxNode) -> Self {
        let mut table = Self::new();

        for node in root.descendants() {
            match node.kind() {
                SyntaxKind::NAMESPACE_DECL => {
                    let namespace = ast::enclosing_namespace(&node);
                    table.add_namespace(&namespace);
                }
                SyntaxKind::CLASS_DECL => {
                    let nested = node
                        .parent()
                        .is_some_and(|parent| parent.kind() == SyntaxKind::CLASS_DECL);
                    if !nested {
                        table.collect_class(&node);
                    }
                }
                _ => {}
            }
        }

        table
    }

    fn collect_class(&mut self, class: &SyntaxNode) {
        let Some(name) = ast::name_text(class) else {
            return;
        };
        let namespace = ast::enclosing_namespace(class);
        let is_static = ast::has_token(class, SyntaxKind::STATIC_KW);

        let mut info = TypeInfo::new(namespace.as_str(), name).with_static(is_static);
        info.has_base = ast::child_of_kind(class, SyntaxKind::BASE_LIST).is_some();

        for member in class.children() {
            match member.kind() {
                SyntaxKind::FIELD_DECL => {
                    info.members
                        .extend(ast::children_of_kind(&member, SyntaxKind::NAME).map(|n| ast::compact_text(&n)));
                }
                SyntaxKind::METHOD_DECL | SyntaxKind::CLASS_DECL => {
                    let Some(method) = ast::name_text(&member) else {
                        continue;
                    };
                    if is_static && member.kind() == SyntaxKind::METHOD_DECL && is_extension_method(&member) {
                        self.add_extension(&namespace, &method);
                    }
                    info.members.insert(method);
                }
                _ => {}
            }
        }

        self.add_type(info);
    }

    /// The bundled framework library.
    pub fn standard() -> Self {
        let mut table = Self::new();
        let mut add = |namespace: &str, name: &str, is_static: bool, members: &[&str]| {
            table.add_type(
                TypeInfo::new(namespace, name)
                    .with_static(is_static)
                    .with_members(members.iter().copied()),
            );
        };

        add("System", "Console", true, &[
            "WriteLine", "Write", "ReadLine", "ReadKey", "Read", "Clear", "Beep", "Out", "Error",
            "In", "ForegroundColor", "BackgroundColor", "ResetColor",
        ]);
        add("System", "Uri", false, &[
            "AbsoluteUri", "AbsolutePath", "Host", "Port", "Scheme", "Query", "Fragment",
            "Segments", "IsAbsoluteUri", "OriginalString", "TryCreate", "EscapeDataString",
            "UnescapeDataString",
        ]);
        add("System", "Math", true, &[
            "Abs", "Max", "Min", "Pow", "Sqrt", "Floor", "Ceiling", "Round", "Sign", "Log", "Exp",
            "Sin", "Cos", "Tan", "PI", "E",
        ]);
        add("System", "DateTime", false, &[
            "Now", "UtcNow", "Today", "Year", "Month", "Day", "Hour", "Minute", "Second",
            "Millisecond", "Date", "DayOfWeek", "AddDays", "AddHours", "AddMinutes",
            "AddSeconds", "Parse", "TryParse", "MinValue", "MaxValue",
        ]);
        add("System", "TimeSpan", false, &[
            "FromSeconds", "FromMinutes", "FromHours", "FromMilliseconds", "FromDays",
            "TotalSeconds", "TotalMilliseconds", "TotalMinutes", "Zero",
        ]);
        add("System", "Guid", false, &["NewGuid", "Empty", "Parse", "TryParse"]);
        add("System", "Exception", false, &["Message", "StackTrace", "InnerException", "Data", "Source"]);
        add("System", "ArgumentException", false, &["Message", "ParamName", "InnerException"]);
        add("System", "ArgumentNullException", false, &["Message", "ParamName", "ThrowIfNull"]);
        add("System", "InvalidOperationException", false, &["Message", "InnerException"]);
        add("System", "NotImplementedException", false, &["Message"]);
        add("System", "Environment", true, &[
            "NewLine", "GetEnvironmentVariable", "SetEnvironmentVariable", "Exit",
            "CurrentDirectory", "MachineName", "ProcessorCount", "GetCommandLineArgs",
        ]);
        add("System", "Convert", true, &[
            "ToInt32", "ToInt64", "ToString", "ToBoolean", "ToDouble", "ToBase64String",
            "FromBase64String",
        ]);
        add("System", "Random", false, &["Next", "NextDouble", "NextBytes", "Shared"]);
        add("System", "Lazy", false, &["Value", "IsValueCreated"]);
        add("System", "Action", false, &["Invoke"]);
        add("System", "Func", false, &["Invoke"]);
        add("System", "IDisposable", false, &["Dispose"]);
        add("System", "String", false, &[
            "Format", "Join", "Concat", "IsNullOrEmpty", "IsNullOrWhiteSpace", "Empty", "Compare",
        ]);
        add("System", "Int32", false, &["Parse", "TryParse", "MaxValue", "MinValue"]);

        add("System.Collections.Generic", "List", false, &[
            "Add", "AddRange", "Remove", "RemoveAt", "RemoveAll", "Clear", "Contains", "Count",
            "IndexOf", "Insert", "Sort", "ToArray", "Find", "FindAll", "FindIndex", "ForEach",
            "Reverse", "Exists", "Capacity",
        ]);
        add("System.Collections.Generic", "Dictionary", false, &[
            "Add", "Remove", "ContainsKey", "ContainsValue", "TryGetValue", "TryAdd", "Keys",
            "Values", "Count", "Clear",
        ]);
        add("System.Collections.Generic", "HashSet", false, &[
            "Add", "Remove", "Contains", "Count", "Clear", "UnionWith", "IntersectWith",
            "ExceptWith", "IsSubsetOf", "IsSupersetOf",
        ]);
        add("System.Collections.Generic", "Queue", false, &[
            "Enqueue", "Dequeue", "TryDequeue", "Peek", "Count", "Clear",
        ]);
        add("System.Collections.Generic", "Stack", false, &["Push", "Pop", "TryPop", "Peek", "Count", "Clear"]);
        add("System.Collections.Generic", "IEnumerable", false, &["GetEnumerator"]);
        add("System.Collections.Generic", "IList", false, &["Add", "Remove", "Count", "IndexOf", "Insert"]);
        add("System.Collections.Generic", "KeyValuePair", false, &["Key", "Value"]);

        add("System.IO", "File", true, &[
            "ReadAllText", "WriteAllText", "ReadAllLines", "WriteAllLines", "ReadAllBytes",
            "WriteAllBytes", "AppendAllText", "Exists", "Delete", "Copy", "Move", "OpenRead",
            "OpenWrite", "Create",
        ]);
        add("System.IO", "Directory", true, &[
            "Exists", "CreateDirectory", "GetFiles", "GetDirectories", "Delete",
            "GetCurrentDirectory", "EnumerateFiles",
        ]);
        add("System.IO", "Path", true, &[
            "Combine", "GetFileName", "GetExtension", "GetDirectoryName", "GetFullPath",
            "GetTempPath", "GetFileNameWithoutExtension", "DirectorySeparatorChar",
        ]);
        add("System.IO", "StreamReader", false, &["ReadLine", "ReadToEnd", "Close", "Dispose", "EndOfStream", "Peek"]);
        add("System.IO", "StreamWriter", false, &["Write", "WriteLine", "Flush", "Close", "Dispose", "AutoFlush"]);
        add("System.IO", "FileInfo", false, &["Name", "FullName", "Length", "Exists", "Extension", "Directory", "Delete"]);
        add("System.IO", "MemoryStream", false, &["ToArray", "Write", "Read", "Position", "Length", "Dispose", "Seek"]);

        const LINQ_OPERATORS: &[&str] = &[
            "Where", "Select", "SelectMany", "First", "FirstOrDefault", "Last", "LastOrDefault",
            "Single", "SingleOrDefault", "Any", "All", "Count", "Sum", "Min", "Max", "Average",
            "OrderBy", "OrderByDescending", "ThenBy", "ThenByDescending", "GroupBy", "Distinct",
            "Skip", "Take", "ToList", "ToArray", "ToDictionary", "ToHashSet", "Contains",
            "Aggregate", "Concat", "Zip", "Reverse", "Cast", "OfType",
        ];
        let mut enumerable_members = vec!["Range", "Repeat", "Empty"];
        enumerable_members.extend_from_slice(LINQ_OPERATORS);
        add(LINQ_NAMESPACE, "Enumerable", true, &enumerable_members);

        add("System.Text", "StringBuilder", false, &[
            "Append", "AppendLine", "AppendFormat", "Insert", "Remove", "Replace", "Clear",
            "Length", "Capacity",
        ]);
        add("System.Text", "Encoding", false, &["UTF8", "ASCII", "Unicode", "Default", "GetEncoding", "GetBytes", "GetString"]);

        add("System.Threading.Tasks", "Task", false, &[
            "Run", "Delay", "WhenAll", "WhenAny", "FromResult", "CompletedTask", "Wait",
            "Result", "ContinueWith", "ConfigureAwait", "IsCompleted", "GetAwaiter",
        ]);
        add("System.Threading.Tasks", "Parallel", true, &["For", "ForEach", "Invoke"]);

        for operator in LINQ_OPERATORS {
            table.add_extension(LINQ_NAMESPACE, operator);
        }

        table
    }
}

/// A method whose first parameter carries `this`.
fn is_extension_method(method: &SyntaxNode) -> bool {
    ast::child_of_kind(method, SyntaxKind::PARAM_LIST)
        .and_then(|params| ast::child_of_kind(&params, SyntaxKind::PARAM))
        .is_some_and(|param| ast::has_token(&param, SyntaxKind::THIS_KW))
}

// ============================================================================
// COMBINED VIEW
// ============================================================================

/// The library and buffer tables seen as one.
///
/// Buffer declarations shadow library ones of the same qualified name.
#[derive(Clone, Copy, Debug)]
pub struct Symbols<'a> {
    library: &'a SymbolTable,
    local: &'a SymbolTable,
}

impl<'a> Symbols<'a> {
    /// Combine a library table with a buffer's own table.
    pub fn new(library: &'a SymbolTable, local: &'a SymbolTable) -> Self {
        Self { library, local }
    }

    fn tables(&self) -> [&'a SymbolTable; 2] {
        [self.local, self.library]
    }

    /// The type `name` declared in `namespace`.
    pub fn type_in(&self, namespace: &str, name: &str) -> Option<&'a TypeInfo> {
        self.tables()
            .into_iter()
            .find_map(|table| table.namespace(namespace)?.type_named(name))
    }

    /// Resolve a dotted type path such as `System.Text.StringBuilder`.
    pub fn type_by_path(&self, path: &str) -> Option<&'a TypeInfo> {
        match path.rsplit_once('.') {
            Some((namespace, name)) => self.type_in(namespace, name),
            None => self.type_in("", path),
        }
    }

    /// Whether an extension method `name` is declared in `namespace`.
    pub fn extension_in(&self, namespace: &str, name: &str) -> bool {
        self.tables()
            .into_iter()
            .any(|table| table.namespace(namespace).is_some_and(|scope| scope.has_extension(name)))
    }

    /// Whether `namespace` names a namespace, or a prefix of one.
    pub fn is_namespace(&self, namespace: &str) -> bool {
        if namespace.is_empty() {
            return false;
        }
        self.tables().into_iter().any(|table| {
            table.namespaces().any(|known| {
                known.as_str() == namespace
                    || known
                        .strip_prefix(namespace)
                        .is_some_and(|rest| rest.starts_with('.'))
            })
        })
    }

    /// Named namespaces declaring a type `name`, ordinal order.
    pub fn namespaces_with_type(&self, name: &str) -> Vec<SmolStr> {
        self.namespaces_where(|scope| scope.type_named(name).is_some())
    }

    /// Named namespaces declaring an extension method `name`, ordinal order.
    pub fn namespaces_with_extension(&self, name: &str) -> Vec<SmolStr> {
        self.namespaces_where(|scope| scope.has_extension(name))
    }

    fn namespaces_where(&self, predicate: impl Fn(&NamespaceScope) -> bool) -> Vec<SmolStr> {
        let mut found: Vec<SmolStr> = self
            .tables()
            .into_iter()
            .flat_map(|table| table.namespaces.iter())
            .filter(|(namespace, scope)| !namespace.is_empty() && predicate(scope))
            .map(|(namespace, _)| namespace.clone())
            .collect();
        found.sort();
        found.dedup();
        found
    }
}
