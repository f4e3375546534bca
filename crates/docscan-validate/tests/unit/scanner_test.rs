//! Tests for Declaration Scanning

use crate::test_utils::{scan, scan_kinds};
use docscan_validate::{AnalysisConfig, DeclarationKind, DeclarationScanner, SourceText};

#[test]
fn test_function_declaration_forms() {
    let found = scan(
        r"export async function fetchUser(id: string) {}
export default function* gen() {}
declare function ambient(x: number): void;
export function generic<T extends Record<string, unknown>>(value: T): T { return value; }
",
    );

    let names: Vec<&str> = found.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["fetchUser", "gen", "ambient", "generic"]);
    assert_eq!(found[0].raw_parameter_text.as_deref(), Some("id: string"));
    assert_eq!(found[1].raw_parameter_text.as_deref(), Some(""));
    assert_eq!(found[2].raw_parameter_text.as_deref(), Some("x: number"));
    assert_eq!(found[3].raw_parameter_text.as_deref(), Some("value: T"));
    assert!(found.iter().all(|d| d.kind == DeclarationKind::Function));
    assert_eq!(found[3].start_line, 3);
}

#[test]
fn test_arrow_consts_and_wrappers() {
    let found = scan(
        r"export const Button = ({ label }: Props) => <button>{label}</button>;
export const useCounter = (initial = 0) => {
  const [count, setCount] = useState(initial);
  return count;
};
export const Memoized = memo(function Inner(props: Props) { return null; });
export const Forwarded = React.forwardRef<HTMLInputElement, Props>((props, ref) => null);
export const double = async x => x * 2;
export const LIMIT = 10;
",
    );

    let summary: Vec<(&str, DeclarationKind, Option<&str>)> = found
        .iter()
        .map(|d| (d.name.as_str(), d.kind, d.raw_parameter_text.as_deref()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Button", DeclarationKind::Component, Some("{ label }: Props")),
            ("useCounter", DeclarationKind::Hook, Some("initial = 0")),
            ("Memoized", DeclarationKind::Component, Some("props: Props")),
            ("Forwarded", DeclarationKind::Component, Some("props, ref")),
            ("double", DeclarationKind::Function, Some("x")),
        ]
    );
}

#[test]
fn test_wrapper_around_identifier_has_no_parameters() {
    let found = scan("export const Connected = observer(Inner);\n");
    assert_eq!(found[0].kind, DeclarationKind::Component);
    assert_eq!(found[0].raw_parameter_text.as_deref(), Some(""));
}

#[test]
fn test_unknown_wrapper_is_a_value() {
    assert!(scan("export const Styled = styled(Button);\n").is_empty());
}

#[test]
fn test_type_declarations() {
    let kinds = scan_kinds(
        r"export abstract class Repository<T> {
  find(id: string): T | undefined { return undefined; }
}
export interface Props { label: string }
export type Handler = (event: Event) => void;
export const enum Direction { Up, Down }
type Local<T> = T[];
",
    );

    assert_eq!(
        kinds,
        vec![
            ("Repository".to_string(), DeclarationKind::Class),
            ("Props".to_string(), DeclarationKind::Interface),
            ("Handler".to_string(), DeclarationKind::TypeAlias),
            ("Direction".to_string(), DeclarationKind::Enum),
            ("Local".to_string(), DeclarationKind::TypeAlias),
        ]
    );
}

#[test]
fn test_nested_declarations_ignored() {
    let kinds = scan_kinds(
        r"export function outer() {
  function inner() {}
  const helper = () => 1;
}
",
    );
    assert_eq!(kinds, vec![("outer".to_string(), DeclarationKind::Function)]);
}

#[test]
fn test_first_overload_wins() {
    let found = scan(
        r"export function parse(input: string): number;
export function parse(input: number): number;
export function parse(input: string | number): number { return 0; }
",
    );
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].start_line, 0);
    assert_eq!(found[0].raw_parameter_text.as_deref(), Some("input: string"));
}

#[test]
fn test_braces_in_strings_and_comments() {
    let kinds = scan_kinds(
        r#"export const open = "{";
const template = `${"}"} {`;
/* { */
export function after() {}
"#,
    );
    assert_eq!(kinds, vec![("after".to_string(), DeclarationKind::Function)]);
}

#[test]
fn test_multi_line_signature() {
    let found = scan(
        r"export function build(
  name: string,
  options: BuildOptions = {},
): Result {
  return run(name, options);
}
",
    );
    let raw = found[0].raw_parameter_text.as_deref().unwrap();
    assert!(raw.contains("name: string"));
    assert!(raw.contains("options: BuildOptions = {}"));
}

#[test]
fn test_include_variables() {
    let config = AnalysisConfig {
        include_variables: true,
        ..AnalysisConfig::default()
    };
    let found = DeclarationScanner::new(&config)
        .scan(&SourceText::new("export const LIMIT = 10;\nexport let current;\n"));
    let kinds: Vec<(&str, DeclarationKind)> =
        found.iter().map(|d| (d.name.as_str(), d.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            ("LIMIT", DeclarationKind::Variable),
            ("current", DeclarationKind::Variable),
        ]
    );
    assert!(found.iter().all(|d| d.raw_parameter_text.is_none()));
}
