//! Data-driven shape validation for configuration blobs
//!
//! A schema is a static table of field rules walked by one generic checker.
//! The same checker validates user input (lenient: unknown top-level keys are
//! ignored, every field optional) and the canonical resolved structure
//! (strict: every field required, nothing extra).

use serde_json::{Map, Value};

use crate::errors::{ConfigOrigin, ValidationError};

/// Expected shape of a single configuration value
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Bool,
    StringList,
    BoolOrObject(&'static [FieldRule]),
    FalseOrObject(&'static [FieldRule]),
}

impl Shape {
    fn expected(self) -> &'static str {
        match self {
            Shape::Bool => "a boolean",
            Shape::StringList => "a list of strings",
            Shape::BoolOrObject(_) => "a boolean or an object",
            Shape::FalseOrObject(_) => "`false` or an object",
        }
    }
}

/// One named field and the shape its value must have
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub key: &'static str,
    pub shape: Shape,
    /// Required fields may be neither absent nor `null`
    pub required: bool,
}

const fn optional(key: &'static str, shape: Shape) -> FieldRule {
    FieldRule {
        key,
        shape,
        required: false,
    }
}

const fn required(key: &'static str, shape: Shape) -> FieldRule {
    FieldRule {
        key,
        shape,
        required: true,
    }
}

/// Top-level field table plus how to treat keys the table doesn't list
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [FieldRule],
    pub allow_unknown: bool,
}

const USER_PRERENDER_FIELDS: &[FieldRule] = &[
    optional("partial", Shape::Bool),
    optional("noExtraDir", Shape::Bool),
    optional("parallel", Shape::Bool),
    optional("disableAutoRun", Shape::Bool),
];

const RESOLVED_PRERENDER_FIELDS: &[FieldRule] = &[
    required("partial", Shape::Bool),
    required("noExtraDir", Shape::Bool),
    required("parallel", Shape::Bool),
    required("disableAutoRun", Shape::Bool),
];

/// Shape of either raw configuration channel.
///
/// Unknown top-level keys are tolerated because the build-config section
/// shares its object with unrelated host settings.
pub const USER_SCHEMA: Schema = Schema {
    fields: &[
        optional("disableAutoFullBuild", Shape::Bool),
        optional("pageFilesInclude", Shape::StringList),
        optional("prerender", Shape::BoolOrObject(USER_PRERENDER_FIELDS)),
        optional("includeCSS", Shape::StringList),
        optional("includeAssetsImportedByServer", Shape::Bool),
    ],
    allow_unknown: true,
};

/// Shape of the serialized `ResolvedConfig`
pub const RESOLVED_SCHEMA: Schema = Schema {
    fields: &[
        required("disableAutoFullBuild", Shape::Bool),
        required("pageFilesInclude", Shape::StringList),
        required("prerender", Shape::FalseOrObject(RESOLVED_PRERENDER_FIELDS)),
        required("includeCSS", Shape::StringList),
        required("includeAssetsImportedByServer", Shape::Bool),
    ],
    allow_unknown: false,
};

impl Schema {
    /// Check `value` against this schema; errors carry `origin` and the dotted path
    pub fn validate(&self, value: &Value, origin: ConfigOrigin) -> Result<(), ValidationError> {
        let checker = Checker { origin };
        match value {
            Value::Object(map) => checker.object(map, self.fields, self.allow_unknown, ""),
            _ => Err(checker.error("", "an object")),
        }
    }
}

struct Checker {
    origin: ConfigOrigin,
}

impl Checker {
    fn error(&self, path: &str, expected: &'static str) -> ValidationError {
        ValidationError {
            origin: self.origin,
            path: path.to_string(),
            expected,
        }
    }

    fn object(
        &self,
        map: &Map<String, Value>,
        fields: &[FieldRule],
        allow_unknown: bool,
        prefix: &str,
    ) -> Result<(), ValidationError> {
        for rule in fields {
            let path = join_path(prefix, rule.key);
            match map.get(rule.key) {
                None | Some(Value::Null) if rule.required => {
                    return Err(self.error(&path, rule.shape.expected()));
                }
                None | Some(Value::Null) => {}
                Some(value) => self.value(value, rule.shape, &path)?,
            }
        }

        if !allow_unknown {
            if let Some(unknown) = map
                .keys()
                .find(|key| !fields.iter().any(|rule| rule.key == key.as_str()))
            {
                return Err(self.error(&join_path(prefix, unknown), "removed (unknown option)"));
            }
        }

        Ok(())
    }

    fn value(&self, value: &Value, shape: Shape, path: &str) -> Result<(), ValidationError> {
        let valid = match (shape, value) {
            (Shape::Bool, Value::Bool(_)) => true,
            (Shape::StringList, Value::Array(items)) => items.iter().all(Value::is_string),
            (Shape::BoolOrObject(_), Value::Bool(_)) => true,
            (Shape::FalseOrObject(_), Value::Bool(false)) => true,
            (Shape::BoolOrObject(fields) | Shape::FalseOrObject(fields), Value::Object(map)) => {
                return self.object(map, fields, false, path)
            }
            _ => false,
        };

        if valid {
            Ok(())
        } else {
            Err(self.error(path, shape.expected()))
        }
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::ConfigOrigin;
    use crate::schema::*;
    use serde_json::json;

    #[test]
    fn test_user_schema_accepts_empty_and_unknown_keys() {
        assert!(USER_SCHEMA
            .validate(&json!({}), ConfigOrigin::PluginOptions)
            .is_ok());
        assert!(USER_SCHEMA
            .validate(
                &json!({"root": "/app", "pageFilesInclude": null}),
                ConfigOrigin::BuildConfigSection
            )
            .is_ok());
    }

    #[test]
    fn test_user_schema_rejects_non_string_include() {
        let result = USER_SCHEMA.validate(
            &json!({"pageFilesInclude": ["ok", 3]}),
            ConfigOrigin::PluginOptions,
        );
        assert!(matches!(
            result,
            Err(ref e) if e.path == "pageFilesInclude" && e.expected == "a list of strings"
        ));
    }

    #[test]
    fn test_user_schema_rejects_unknown_prerender_key() {
        let result = USER_SCHEMA.validate(
            &json!({"prerender": {"partial": true, "turbo": true}}),
            ConfigOrigin::BuildConfigSection,
        );
        assert!(matches!(result, Err(ref e) if e.path == "prerender.turbo"));
    }

    #[test]
    fn test_user_schema_rejects_wrong_prerender_sub_field() {
        let result = USER_SCHEMA.validate(
            &json!({"prerender": {"parallel": "yes"}}),
            ConfigOrigin::PluginOptions,
        );
        assert!(matches!(
            result,
            Err(ref e) if e.path == "prerender.parallel" && e.expected == "a boolean"
        ));
    }

    #[test]
    fn test_user_schema_rejects_string_prerender() {
        let result = USER_SCHEMA.validate(&json!({"prerender": "yes"}), ConfigOrigin::PluginOptions);
        assert!(matches!(
            result,
            Err(ref e) if e.expected == "a boolean or an object" && e.origin == ConfigOrigin::PluginOptions
        ));
    }

    #[test]
    fn test_non_object_input_fails_at_root() {
        let result = USER_SCHEMA.validate(&json!([1, 2]), ConfigOrigin::BuildConfigSection);
        assert!(matches!(result, Err(ref e) if e.path.is_empty()));
    }

    #[test]
    fn test_resolved_schema_requires_every_field() {
        let result = RESOLVED_SCHEMA.validate(
            &json!({
                "disableAutoFullBuild": false,
                "pageFilesInclude": [],
                "prerender": false,
                "includeCSS": []
            }),
            ConfigOrigin::PluginOptions,
        );
        assert!(matches!(result, Err(ref e) if e.path == "includeAssetsImportedByServer"));
    }

    #[test]
    fn test_resolved_schema_rejects_true_prerender_and_partial_options() {
        let base = |prerender| {
            json!({
                "disableAutoFullBuild": false,
                "pageFilesInclude": [],
                "prerender": prerender,
                "includeCSS": [],
                "includeAssetsImportedByServer": true
            })
        };
        let origin = ConfigOrigin::PluginOptions;
        assert!(RESOLVED_SCHEMA.validate(&base(json!(false)), origin).is_ok());
        assert!(RESOLVED_SCHEMA.validate(&base(json!(true)), origin).is_err());
        assert!(RESOLVED_SCHEMA
            .validate(&base(json!({"partial": true})), origin)
            .is_err());
        assert!(RESOLVED_SCHEMA
            .validate(
                &base(json!({"partial": true, "noExtraDir": false, "parallel": true, "disableAutoRun": false})),
                origin
            )
            .is_ok());
    }
}
