//! Input validation against a tool's declared fields.

use crate::types::{FieldKind, InputField, Inputs, ToolDescriptor};
use thiserror::Error;

/// A single rejected input. Messages reference the field's label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{label} is required")]
    Required { field: String, label: String },

    #[error("{label} must be at most {max} characters (got {actual})")]
    TooLong {
        field: String,
        label: String,
        max: usize,
        actual: usize,
    },

    #[error("{label} must be one of: {}", .options.join(", "))]
    NotAnOption {
        field: String,
        label: String,
        options: Vec<String>,
    },

    #[error("{label} must be a number")]
    NotANumber { field: String, label: String },
}

impl ValidationError {
    /// Id of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::Required { field, .. }
            | Self::TooLong { field, .. }
            | Self::NotAnOption { field, .. }
            | Self::NotANumber { field, .. } => field,
        }
    }
}

/// Check `inputs` against every declared field of `tool`.
///
/// Errors come back in field declaration order; an empty vec means the
/// inputs are acceptable. Keys that name no declared field are ignored.
pub fn validate(tool: &ToolDescriptor, inputs: &Inputs) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for field in &tool.inputs {
        let value = inputs
            .get(&field.id)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty());

        match value {
            None if field.required => errors.push(ValidationError::Required {
                field: field.id.clone(),
                label: field.label.clone(),
            }),
            None => {}
            Some(v) => check_value(field, v, &mut errors),
        }
    }
    errors
}

fn check_value(field: &InputField, value: &str, errors: &mut Vec<ValidationError>) {
    if let Some(max) = field.max_length {
        let actual = value.chars().count();
        if actual > max {
            errors.push(ValidationError::TooLong {
                field: field.id.clone(),
                label: field.label.clone(),
                max,
                actual,
            });
        }
    }

    match field.kind {
        FieldKind::Select if !field.options.iter().any(|o| o == value) => {
            errors.push(ValidationError::NotAnOption {
                field: field.id.clone(),
                label: field.label.clone(),
                options: field.options.clone(),
            });
        }
        FieldKind::Number if !value.trim().parse::<f64>().is_ok_and(f64::is_finite) => {
            errors.push(ValidationError::NotANumber {
                field: field.id.clone(),
                label: field.label.clone(),
            });
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToolCategory;

    fn field(id: &str, kind: FieldKind, required: bool) -> InputField {
        InputField {
            id: id.into(),
            label: format!("{} label", id),
            kind,
            placeholder: String::new(),
            required,
            options: Vec::new(),
            max_length: None,
        }
    }

    fn tool(inputs: Vec<InputField>) -> ToolDescriptor {
        ToolDescriptor {
            id: "t".into(),
            name: "T".into(),
            description: String::new(),
            icon: String::new(),
            category: ToolCategory::Content,
            inputs,
            prompt_template: String::new(),
            max_tokens: 100,
            temperature: 0.5,
            examples: Vec::new(),
        }
    }

    fn one(k: &str, v: &str) -> Inputs {
        Inputs::from([(k.to_string(), v.to_string())])
    }

    #[test]
    fn missing_required_field_yields_exactly_one_error() {
        let t = tool(vec![field("f", FieldKind::Text, true)]);
        let errors = validate(&t, &Inputs::new());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("f label"));
        assert!(errors[0].to_string().contains("required"));
        assert_eq!(errors[0].field(), "f");
    }

    #[test]
    fn empty_and_blank_values_count_as_missing() {
        let t = tool(vec![field("f", FieldKind::Text, true)]);
        assert_eq!(validate(&t, &one("f", "")).len(), 1);
        assert_eq!(validate(&t, &one("f", "  \n")).len(), 1);
    }

    #[test]
    fn optional_field_may_be_absent() {
        let t = tool(vec![field("f", FieldKind::Text, false)]);
        assert!(validate(&t, &Inputs::new()).is_empty());
    }

    #[test]
    fn max_length_is_inclusive() {
        let mut f = field("f", FieldKind::Text, true);
        f.max_length = Some(5);
        let t = tool(vec![f]);
        assert!(validate(&t, &one("f", "abcde")).is_empty());
        let errors = validate(&t, &one("f", "abcdef"));
        assert_eq!(
            errors,
            vec![ValidationError::TooLong {
                field: "f".into(),
                label: "f label".into(),
                max: 5,
                actual: 6,
            }]
        );
    }

    #[test]
    fn max_length_counts_characters_not_bytes() {
        let mut f = field("f", FieldKind::Text, true);
        f.max_length = Some(3);
        let t = tool(vec![f]);
        assert!(validate(&t, &one("f", "ééé")).is_empty());
    }

    #[test]
    fn select_rejects_values_outside_options() {
        let mut f = field("tone", FieldKind::Select, true);
        f.options = vec!["Friendly".into(), "Technical".into()];
        let t = tool(vec![f]);
        assert!(validate(&t, &one("tone", "Technical")).is_empty());
        let errors = validate(&t, &one("tone", "Angry"));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "tone label must be one of: Friendly, Technical"
        );
    }

    #[test]
    fn number_fields_must_parse() {
        let t = tool(vec![field("n", FieldKind::Number, true)]);
        assert!(validate(&t, &one("n", "42.5")).is_empty());
        assert!(matches!(
            validate(&t, &one("n", "many")).as_slice(),
            [ValidationError::NotANumber { .. }]
        ));
        assert_eq!(validate(&t, &one("n", "inf")).len(), 1);
    }

    #[test]
    fn fields_are_checked_independently_in_declaration_order() {
        let mut long = field("b", FieldKind::Text, false);
        long.max_length = Some(1);
        let t = tool(vec![field("a", FieldKind::Text, true), long]);
        let errors = validate(&t, &one("b", "too long"));
        let fields: Vec<&str> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["a", "b"]);
    }

    #[test]
    fn undeclared_keys_are_ignored() {
        let t = tool(vec![field("f", FieldKind::Text, false)]);
        assert!(validate(&t, &one("other", "x")).is_empty());
    }
}
