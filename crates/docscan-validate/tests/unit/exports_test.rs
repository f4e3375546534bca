//! Tests for Export Resolution

use crate::test_utils::{missing_symbols, scan};
use docscan_validate::{ExportForm, ExportResolver, SourceText};

fn resolve(text: &str) -> Vec<(String, String, ExportForm)> {
    let declarations = scan(text);
    ExportResolver::resolve(&SourceText::new(text), &declarations)
        .into_iter()
        .map(|r| (r.exported_name, r.local_name, r.form))
        .collect()
}

#[test]
fn test_alias_reports_local_name() {
    let text = r"function a() {}
function b() {}
function c() {}
export { a, b as c };
";
    assert_eq!(
        resolve(text),
        vec![
            ("a".to_string(), "a".to_string(), ExportForm::NamedBlock),
            ("c".to_string(), "b".to_string(), ExportForm::NamedBlock),
        ]
    );
    assert_eq!(missing_symbols(text), vec!["a", "b"]);
}

#[test]
fn test_re_exports_are_skipped() {
    let text = r"function x() {}
function y() {}
export { x } from './x';
export {
  y,
} from './y';
export * from './z';
";
    assert!(resolve(text).is_empty());
}

#[test]
fn test_multi_line_block_with_comments() {
    let text = r"function alpha() {}
const beta = () => 1;
interface Gamma {}
export {
  // the first one
  alpha,
  /* renamed */ beta as renamedBeta,
  type Gamma,
};
";
    let locals: Vec<String> = resolve(text).into_iter().map(|(_, local, _)| local).collect();
    assert_eq!(locals, vec!["alpha", "beta", "Gamma"]);
}

#[test]
fn test_unknown_names_ignored() {
    let text = "import { external } from './lib';\nexport { external };\n";
    assert!(resolve(text).is_empty());
}

#[test]
fn test_duplicate_exports_collapse() {
    let text = "export function a() {}\nexport { a };\n";
    assert_eq!(
        resolve(text),
        vec![("a".to_string(), "a".to_string(), ExportForm::Direct)]
    );
    assert_eq!(missing_symbols(text), vec!["a"]);

    let text = "function b() {}\nexport { b };\nexport { b };\n";
    assert_eq!(resolve(text).len(), 1);
}

#[test]
fn test_nested_export_block_ignored() {
    let text = r"function a() {}
namespace Inner {
  export { a };
}
";
    assert!(resolve(text).is_empty());
}

#[test]
fn test_direct_export_forms() {
    let text = r"export default class Store {}
export interface Props {}
class Hidden {}
";
    let exported: Vec<String> = resolve(text).into_iter().map(|(name, _, _)| name).collect();
    assert_eq!(exported, vec!["Store", "Props"]);
}
