//! The schema rule type and its combinators

use crate::error::{Segment, ValidationError};
use serde_json::Value;
use std::sync::Arc;

type ParseFn = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;
type ValidateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Post-processing step applied after the base rule accepts.
#[derive(Clone)]
enum Step {
    Parse { name: String, func: ParseFn },
    Validate { name: String, func: ValidateFn },
}

/// The structural rule a schema starts from.
#[derive(Clone)]
enum Base {
    /// Accepts any present value unchanged
    Any,
    /// Accepts exactly one value
    Literal(Value),
    /// Element-wise rule over a JSON array
    Array(Box<Schema>),
    /// Field-wise rules over a JSON object. With `pick`, only declared
    /// fields survive into the output; otherwise unknown fields pass
    /// through unchanged.
    Object {
        fields: Vec<(String, Schema)>,
        pick: bool,
    },
    /// Accepts only a missing object field. Combined via [`Schema::or`]
    /// this is how optional fields are declared.
    Absent,
}

/// An immutable validation/normalization rule for [`serde_json::Value`].
///
/// Application runs the base rule, then each [`parse`](Schema::parse) /
/// [`validate`](Schema::validate) step in order. On failure, each
/// [`or`](Schema::or) alternative is tried against the original input; if
/// every branch fails, their messages are aggregated into one error.
#[derive(Clone)]
pub struct Schema {
    base: Base,
    steps: Vec<Step>,
    alternatives: Vec<Schema>,
    default_value: Option<Value>,
}

impl Schema {
    fn from_base(base: Base) -> Self {
        Schema {
            base,
            steps: Vec::new(),
            alternatives: Vec::new(),
            default_value: None,
        }
    }

    /// The identity rule: accepts any present value unchanged.
    pub fn any() -> Self {
        Schema::from_base(Base::Any)
    }

    /// Accepts exactly `value` (deep equality), yielding it unchanged.
    pub fn literal(value: Value) -> Self {
        Schema::from_base(Base::Literal(value))
    }

    /// Applies `item` to every element of a JSON array. Non-array input is
    /// rejected; an element failure carries its index in the error path.
    pub fn array(item: Schema) -> Self {
        Schema::from_base(Base::Array(Box::new(item)))
    }

    /// Applies per-field rules to a JSON object. Fields not named in
    /// `fields` pass through unchanged.
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Schema)>) -> Self {
        Schema::from_base(Base::Object {
            fields: fields.into_iter().map(|(k, s)| (k.into(), s)).collect(),
            pick: false,
        })
    }

    /// Like [`Schema::object`], but the output contains only the declared
    /// fields; everything else is dropped.
    pub fn object_pick<K: Into<String>>(fields: impl IntoIterator<Item = (K, Schema)>) -> Self {
        Schema::from_base(Base::Object {
            fields: fields.into_iter().map(|(k, s)| (k.into(), s)).collect(),
            pick: true,
        })
    }

    /// Accepts only a *missing* object field. `rule.or(Schema::absent())`
    /// declares an optional field.
    pub fn absent() -> Self {
        Schema::from_base(Base::Absent)
    }

    /// Returns a new schema that additionally transforms the value with
    /// `func` after this schema accepts. `name` labels the rule in errors.
    pub fn parse<F>(&self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.steps.push(Step::Parse {
            name: name.into(),
            func: Arc::new(func),
        });
        next
    }

    /// Returns a new schema that additionally requires `func` to hold after
    /// this schema accepts. `name` labels the rule in errors.
    pub fn validate<F>(&self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        let mut next = self.clone();
        next.steps.push(Step::Validate {
            name: name.into(),
            func: Arc::new(func),
        });
        next
    }

    /// Returns a new schema that falls back to `other` when this schema
    /// rejects. When every branch rejects, the error message is the
    /// conjunction `(m1) && (m2) && ...` of every branch's message.
    pub fn or(&self, other: &Schema) -> Self {
        let mut next = self.clone();
        next.alternatives.push(other.clone());
        next
    }

    /// Returns a new schema that substitutes `value` when the input is a
    /// missing object field. The substituted value still runs through the
    /// full rule chain; present input (including JSON null) is untouched.
    pub fn default(&self, value: Value) -> Self {
        let mut next = self.clone();
        next.default_value = Some(value);
        next
    }

    /// Apply the rule to a present value.
    pub fn apply(&self, value: &Value) -> Result<Value, ValidationError> {
        match self.apply_opt(Some(value))? {
            Some(output) => Ok(output),
            // An absent-only rule matched at top level; there is no value
            // to produce, render as null.
            None => Ok(Value::Null),
        }
    }

    /// Internal application with the absent channel: `None` input means
    /// "missing object field". `Ok(None)` means the absent rule matched and
    /// the field stays absent in the output.
    fn apply_opt(&self, input: Option<&Value>) -> Result<Option<Value>, ValidationError> {
        // Default substitution happens before anything else, on absence only.
        let substituted;
        let input = match (input, &self.default_value) {
            (None, Some(default)) => {
                substituted = default.clone();
                Some(&substituted)
            }
            (other, _) => other,
        };

        let primary = match self.apply_core(input) {
            Ok(output) => return Ok(output),
            Err(e) => e,
        };

        if self.alternatives.is_empty() {
            return Err(primary);
        }

        let mut messages = vec![primary.message.clone()];
        for alternative in &self.alternatives {
            match alternative.apply_opt(input) {
                Ok(output) => return Ok(output),
                Err(e) => messages.push(e.message),
            }
        }

        let rendered = messages
            .iter()
            .map(|m| format!("({m})"))
            .collect::<Vec<_>>()
            .join(" && ");
        Err(ValidationError {
            path: primary.path,
            message: rendered,
            value: input.map(|v| v.to_string()).unwrap_or_else(|| "absent".to_string()),
        })
    }

    fn apply_core(&self, input: Option<&Value>) -> Result<Option<Value>, ValidationError> {
        let value = match (&self.base, input) {
            (Base::Absent, None) => return Ok(None),
            (Base::Absent, Some(v)) => {
                return Err(ValidationError::new("expected value to be absent", v))
            }
            (_, None) => {
                return Err(ValidationError {
                    path: Default::default(),
                    message: "value is required".to_string(),
                    value: "absent".to_string(),
                })
            }
            (_, Some(v)) => v,
        };

        let mut current = match &self.base {
            Base::Any | Base::Absent => value.clone(),
            Base::Literal(expected) => {
                if value == expected {
                    value.clone()
                } else {
                    return Err(ValidationError::new(
                        format!("expected literal {expected}"),
                        value,
                    ));
                }
            }
            Base::Array(item) => {
                let elements = value
                    .as_array()
                    .ok_or_else(|| ValidationError::new("expected an array", value))?;
                let mut output = Vec::with_capacity(elements.len());
                for (index, element) in elements.iter().enumerate() {
                    // Fresh application per element: errors never leak
                    // between siblings.
                    match item.apply_opt(Some(element)) {
                        Ok(Some(v)) => output.push(v),
                        Ok(None) => output.push(Value::Null),
                        Err(e) => return Err(e.nest(Segment::Index(index))),
                    }
                }
                Value::Array(output)
            }
            Base::Object { fields, pick } => {
                let map = value
                    .as_object()
                    .ok_or_else(|| ValidationError::new("expected an object", value))?;
                let mut output = if *pick {
                    serde_json::Map::new()
                } else {
                    map.clone()
                };
                for (key, schema) in fields {
                    match schema.apply_opt(map.get(key)) {
                        Ok(Some(v)) => {
                            output.insert(key.clone(), v);
                        }
                        Ok(None) => {
                            output.remove(key);
                        }
                        Err(e) => return Err(e.nest(Segment::Key(key.clone()))),
                    }
                }
                Value::Object(output)
            }
        };

        for step in &self.steps {
            match step {
                Step::Parse { name, func } => {
                    current = func(&current).map_err(|reason| {
                        ValidationError::new(format!("{name}: {reason}"), &current)
                    })?;
                }
                Step::Validate { name, func } => {
                    if !func(&current) {
                        return Err(ValidationError::new(
                            format!("does not match {name}"),
                            &current,
                        ));
                    }
                }
            }
        }

        Ok(Some(current))
    }
}
