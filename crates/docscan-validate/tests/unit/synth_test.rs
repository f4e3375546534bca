//! Tests for Doc Synthesis

use crate::test_utils::callable;
use docscan_validate::{DeclarationKind, DocSynthesizer, Parameter};

#[test]
fn test_component_rendering() {
    let declaration = callable("Button", DeclarationKind::Component);
    let params = [Parameter::new("label"), Parameter::new("onClick")];
    let doc = DocSynthesizer::synthesize(&declaration, &params);

    assert!(!doc.is_generic_placeholder);
    assert_eq!(
        doc.render(""),
        vec![
            "/**",
            " * Button component.",
            " *",
            " * @param label - The label parameter.",
            " * @param onClick - Callback invoked on click.",
            " * @returns The rendered component.",
            " */",
        ]
    );
}

#[test]
fn test_hook_without_parameters_is_placeholder() {
    let declaration = callable("useUserData", DeclarationKind::Hook);
    let doc = DocSynthesizer::synthesize(&declaration, &[]);

    assert_eq!(doc.description, "Hook to use user data.");
    assert!(doc.is_generic_placeholder);
    assert_eq!(
        doc.render("  "),
        vec![
            "  /**",
            "   * Hook to use user data.",
            "   *",
            "   * @returns The result of useUserData.",
            "   * @docscan-placeholder",
            "   */",
        ]
    );
}

#[test]
fn test_setter_has_no_return_line() {
    let declaration = callable("setName", DeclarationKind::Function);
    let doc = DocSynthesizer::synthesize(&declaration, &[Parameter::new("value")]);
    assert_eq!(doc.description, "Sets the name.");
    assert_eq!(doc.returns, None);
    assert!(!doc.is_generic_placeholder);
}

#[test]
fn test_non_callable_has_description_only() {
    let declaration = callable("UserRepository", DeclarationKind::Class);
    let doc = DocSynthesizer::synthesize(&declaration, &[]);
    assert!(!doc.is_generic_placeholder);
    assert_eq!(
        doc.render(""),
        vec!["/**", " * The user repository.", " */"]
    );
}

#[test]
fn test_verb_descriptions() {
    let cases = [
        ("createUser", "Creates a new user."),
        ("getAPIKey", "Gets the api key."),
        ("updateProfile", "Updates the profile."),
        ("deleteItem", "Deletes the item."),
        ("validateForm", "Validates the form."),
        ("formatDate", "The format date."),
    ];
    for (name, expected) in cases {
        assert_eq!(
            DocSynthesizer::describe_symbol(name, DeclarationKind::Function),
            expected
        );
    }
}

#[test]
fn test_parameter_keywords() {
    let cases = [
        ("id", "The unique identifier."),
        ("name", "The name."),
        ("children", "The child elements to render."),
        ("className", "Additional CSS class names to apply."),
        ("cb", "The callback function to invoke."),
        ("props", "The component props."),
        ("opts", "The configuration options."),
        ("orderId", "The identifier of the order."),
        ("firstName", "The first name."),
        ("onValueChange", "Callback invoked on value change."),
    ];
    for (name, expected) in cases {
        assert_eq!(DocSynthesizer::describe_parameter(name), expected);
    }
}
