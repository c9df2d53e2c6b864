//! End-to-end tests for the fix imports run
//!
//! Buffers go through `AnalysisHost` exactly as an editor request would; most
//! assertions only look at the lines mentioning `using`.

use rstest::rstest;
use sharpfix::ide::{AnalysisHost, FixImportsConfig, FixImportsRequest, FixImportsResponse, NoticeKind};
use sharpfix::{FileId, SourceBuffer};

fn fix(buffer: &str) -> FixImportsResponse {
    let request = FixImportsRequest::new("myfile", buffer).with_position(i32::MAX as u32, 0);
    AnalysisHost::new().fix_imports(&request).unwrap()
}

fn using_lines(buffer: &str) -> Vec<&str> {
    buffer
        .split(['\n', '\r'])
        .filter(|line| !line.is_empty() && line.contains("using"))
        .collect()
}

const SORT_INPUT: &str = "
using ns2;
using ns1;

public class test {
    class1 ns1 = new class1();
    class2 ns2 = new class2();
}

namespace ns1
{
    public class class1{}
}

namespace ns2
{
    public class class2{}
}
";

const ADD_ONE_INPUT: &str = "
public class test {
    class1 ns1 = new class1();
}

namespace ns1
{
    public class class1{}
}";

const ADD_TWO_INPUT: &str = "
public class test {
    class1 ns1 = new class1();
    class2 ns2 = new class2();
}

namespace ns1
{
    public class class1{}
}

namespace ns2
{
    public class class2{}
}
";

const EXTENSION_INPUT: &str = "
public class test {
    public test()
    {
        \"string\".Whatever();
    }
}

namespace ns1
{
    public static class StringExtension
    {
        public static void Whatever(this string astring) {}
    }
}
";

const METHOD_INPUT: &str = "
public class test {
    public test()
    {
        Console.WriteLine(\"test\");
    }
}
";

const NEW_CLASS_INPUT: &str = "
public class test {
    public test()
    {
        var uri = new Uri(\"\");
    }
}
";

const QUERY_INPUT: &str = "
public class test {
    public void Run(int[] numbers)
    {
        var evens = from n in numbers where n > 2 select n;
    }
}
";

#[rstest]
#[case::remove_unused("\nusing System;\npublic class {}", &[])]
#[case::remove_duplicates(
    "\nusing System;\nusing System;\nusing System;\nusing System;\nusing System;\nusing System;\nusing System;\nusing System;\nusing System;\npublic class {}",
    &[]
)]
#[case::sort(SORT_INPUT, &["using ns1;", "using ns2;"])]
#[case::add_one(ADD_ONE_INPUT, &["using ns1;"])]
#[case::add_two(ADD_TWO_INPUT, &["using ns1;", "using ns2;"])]
#[case::extension_method(EXTENSION_INPUT, &["using ns1;"])]
#[case::static_method(METHOD_INPUT, &["using System;"])]
#[case::object_creation(NEW_CLASS_INPUT, &["using System;"])]
#[case::query_syntax(QUERY_INPUT, &["using System.Linq;"])]
#[case::block_comment_header("/* header */\nclass A\n{\n    StringBuilder b;\n}\n", &["using System.Text;"])]
#[case::doc_comment(
    "using System;\n/** Entry point. */\nclass A\n{\n    void M() { Console.WriteLine(1); }\n}\n",
    &["using System;"]
)]
#[case::preprocessor_region(
    "#region Imports\nusing System.IO;\n#endregion\nclass A\n{\n    StringBuilder b;\n}\n",
    &["using System.Text;"]
)]
fn test_fix_using_lines(#[case] input: &str, #[case] expected: &[&str]) {
    let response = fix(input);
    assert_eq!(using_lines(&response.buffer), expected);
    assert!(response.ambiguities.is_empty());
}

#[rstest]
#[case::clean_file("using System;\n\nclass A\n{\n    void M() { Console.WriteLine(1); }\n}\n")]
#[case::no_imports("class A\n{\n    int x;\n}\n")]
#[case::sorted_mixed(
    "using System;\nusing System.Text;\nusing IO = System.IO;\n\nclass A\n{\n    StringBuilder b = new StringBuilder();\n    IO.File f;\n    void M() { Console.WriteLine(1); }\n}\n"
)]
fn test_clean_buffers_are_unchanged(#[case] input: &str) {
    let response = fix(input);
    assert_eq!(response.buffer, input);
}

#[rstest]
#[case::insert_at_top(
    "using System;\r\nclass A\r\n{\r\n    StringBuilder b;\r\n}\r\n",
    "using System.Text;\r\nclass A\r\n{\r\n    StringBuilder b;\r\n}\r\n"
)]
#[case::insert_after_existing(
    "using System;\r\nclass A\r\n{\r\n    Console c;\r\n    StringBuilder b;\r\n}\r\n",
    "using System;\r\nusing System.Text;\r\nclass A\r\n{\r\n    Console c;\r\n    StringBuilder b;\r\n}\r\n"
)]
fn test_crlf_buffers_keep_their_line_endings(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(fix(input).buffer, expected);
}

#[test]
fn test_fix_is_idempotent() {
    let once = fix(ADD_TWO_INPUT);
    let twice = fix(&once.buffer);
    assert_eq!(once.buffer, twice.buffer);
}

#[test]
fn test_added_import_keeps_body_intact() {
    let response = fix(METHOD_INPUT);
    assert_eq!(response.buffer, format!("using System;\n{METHOD_INPUT}"));
}

#[test]
fn test_each_ambiguous_reference_reported_once() {
    let input = "
class test {
    Foo foo;
    Foo bar;
}

namespace a
{
    public class Foo {}
}

namespace b
{
    public class Foo {}
}
";
    let response = fix(input);
    assert_eq!(response.buffer, input);
    assert_eq!(response.ambiguities.len(), 2);

    let first = &response.ambiguities[0];
    assert_eq!(first.file_name, "myfile");
    assert_eq!((first.line, first.column), (3, 5));
    assert_eq!(first.message, "`Foo` is ambiguous");
    assert_eq!(first.candidates, vec!["a", "b"]);
    assert_eq!((response.ambiguities[1].line, response.ambiguities[1].column), (4, 5));
}

#[test]
fn test_ambiguity_does_not_block_other_imports() {
    let input = "
class test {
    Foo foo;
    StringBuilder builder;
}

namespace a { public class Foo {} }
namespace b { public class Foo {} }
";
    let response = fix(input);
    assert_eq!(using_lines(&response.buffer), vec!["using System.Text;"]);
    assert_eq!(response.ambiguities.len(), 1);
    assert_eq!(response.ambiguities[0].message, "`Foo` is ambiguous");
}

#[test]
fn test_qualified_names_need_no_import() {
    let input = "class A\n{\n    void M() { System.Console.WriteLine(1); }\n}\n";
    assert_eq!(fix(input).buffer, input);
}

#[test]
fn test_unresolved_names_reported_on_request() {
    let host = AnalysisHost::new().with_config(FixImportsConfig::new().with_report_unresolved(true));
    let buffer = SourceBuffer::new(FileId::new(0), "a.cs", "class A\n{\n    Gizmo g;\n}\n");
    let result = host.fix_buffer(buffer).unwrap();

    assert_eq!(result.buffer.text(), "class A\n{\n    Gizmo g;\n}\n");
    let notices: Vec<_> = result.notices_of(NoticeKind::Unresolved).collect();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "`Gizmo` could not be resolved");
    assert_eq!((notices[0].line, notices[0].column), (3, 5));
    assert_eq!(result.stats.stalled, 1);
}

#[test]
fn test_unresolved_names_silent_by_default() {
    let response = fix("class A\n{\n    Gizmo g;\n}\n");
    assert!(response.ambiguities.is_empty());
}

#[test]
fn test_stats_count_applied_imports() {
    let host = AnalysisHost::new();
    let buffer = SourceBuffer::new(FileId::new(0), "a.cs", ADD_TWO_INPUT);
    let result = host.fix_buffer(buffer).unwrap();
    assert_eq!(result.stats.applied, 2);
    assert_eq!(result.stats.ambiguous, 0);
    assert!(result.stats.iterations >= 2);
}
