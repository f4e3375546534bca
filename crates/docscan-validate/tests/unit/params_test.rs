//! Tests for Parameter Extraction

use docscan_validate::extract_parameters;
use docscan_validate::params::parameter_names;

#[test]
fn test_destructured_props_use_local_names() {
    assert_eq!(
        parameter_names("{ id, name: displayName, onClick }: Props"),
        vec!["id", "displayName", "onClick"]
    );
}

#[test]
fn test_object_pattern_defaults_and_nesting() {
    assert_eq!(
        parameter_names("{ a = 1, b: { c }, d: [e], ...rest } = {}"),
        vec!["a", "b", "d"]
    );
}

#[test]
fn test_array_pattern_drops_holes_and_rest() {
    assert_eq!(
        parameter_names("[first, , third = 3, ...others]: Tuple"),
        vec!["first", "third"]
    );
}

#[test]
fn test_optional_and_generic_function_types() {
    assert_eq!(
        parameter_names("value?: string, fn: <T>(x: T) => T, y"),
        vec!["value", "fn", "y"]
    );
}

#[test]
fn test_defaults_containing_arrows() {
    assert_eq!(
        parameter_names("cb = () => {}, n = 1, label = \"a, b\""),
        vec!["cb", "n", "label"]
    );
}

#[test]
fn test_empty_and_trailing_comma() {
    assert!(extract_parameters("").is_empty());
    assert!(extract_parameters("  \n ").is_empty());
    assert_eq!(parameter_names("\n  a: string,\n"), vec!["a"]);
}

#[test]
fn test_parameter_properties() {
    assert_eq!(
        parameter_names("private readonly http: HttpClient, public name = ''"),
        vec!["http", "name"]
    );
}
