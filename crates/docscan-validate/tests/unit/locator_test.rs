//! Tests for Doc-Block Location

use crate::test_utils::missing_symbols;
use docscan_validate::locator::insertion_line;
use docscan_validate::{AnalysisConfig, DocLocation, fix_source, locate_doc_block};
use std::path::Path;

#[test]
fn test_decorators_and_blank_lines_are_transparent() {
    let lines = [
        "/**",
        " * Service.",
        " */",
        "",
        "@Injectable()",
        "@Tracked({ level: 'debug' })",
        "",
        "export class Service {}",
    ];
    assert_eq!(
        locate_doc_block(&lines, 7),
        Some(DocLocation {
            start_line: 0,
            end_line: 2
        })
    );
}

#[test]
fn test_decorated_class_is_documented() {
    let text = r"/**
 * Handles users.
 */

@Controller('users')

export class UsersController {}
";
    assert!(missing_symbols(text).is_empty());
}

#[test]
fn test_content_on_delimiter_lines() {
    let lines = ["  /** Summary", "   * more */", "  export function a() {}"];
    assert_eq!(
        locate_doc_block(&lines, 2),
        Some(DocLocation {
            start_line: 0,
            end_line: 1
        })
    );
}

#[test]
fn test_rejections() {
    let plain = ["/* plain */", "export function a() {}"];
    assert_eq!(locate_doc_block(&plain, 1), None);

    let no_opener = ["  orphan text */", "export function a() {}"];
    assert_eq!(locate_doc_block(&no_opener, 1), None);

    let first_line = ["export function a() {}"];
    assert_eq!(locate_doc_block(&first_line, 0), None);

    let line_comment = ["// Adds numbers.", "export function a() {}"];
    assert_eq!(locate_doc_block(&line_comment, 1), None);
}

#[test]
fn test_lint_pragmas() {
    for pragma in [
        "// @ts-ignore",
        "// @ts-expect-error missing types",
        "// eslint-disable-next-line no-console",
        "// prettier-ignore",
        "/* istanbul ignore next */",
    ] {
        let lines = ["/** Doc. */", pragma, "export function a() {}"];
        let found = locate_doc_block(&lines, 2);
        if pragma.starts_with("//") {
            assert!(found.is_some(), "{pragma} should be transparent");
        } else {
            assert!(found.is_none(), "{pragma} is a block comment");
        }
    }
}

#[test]
fn test_insertion_above_decorators() {
    let lines = ["", "@A()", "// @ts-ignore", "@B()", "export class X {}"];
    assert_eq!(insertion_line(&lines, 4), 1);
    assert_eq!(insertion_line(&lines, 0), 0);
}

#[test]
fn test_glob_text_in_doc_body_keeps_block_attached() {
    let text = r"/**
 * Uploads files matching image/* types.
 *
 * @param file - The file.
 * @returns The upload id.
 */
export function upload(file: File) {}
";
    assert!(missing_symbols(text).is_empty());

    let outcome = fix_source(Path::new("upload.ts"), text, &AnalysisConfig::default());
    assert_eq!(outcome.content, None);
    assert!(outcome.changes.is_empty());
}

#[test]
fn test_multi_line_decorator_keeps_block_attached() {
    let text = r"/**
 * Button.
 */
@Component({
  selector: 'x',
})
export class Button {}
";
    assert!(missing_symbols(text).is_empty());
}

#[test]
fn test_fix_inserts_above_multi_line_decorator() {
    let text = "@Component({\n  selector: 'x',\n})\nexport class Button {}\n";
    let outcome = fix_source(Path::new("button.ts"), text, &AnalysisConfig::default());
    assert_eq!(
        outcome.content.as_deref(),
        Some("/**\n * The button.\n */\n@Component({\n  selector: 'x',\n})\nexport class Button {}\n")
    );
}
