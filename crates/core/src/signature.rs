//! Operation signatures and the catalog of registered operations.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::value::Value;

/// Parameter list and defaults for one registered operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationSignature {
    pub name: String,
    pub parameters: Vec<String>,
    /// Aligned with `parameters`.
    pub defaults: Vec<Value>,
}

impl OperationSignature {
    /// Build a signature from `(parameter, default)` pairs.
    pub fn new(name: &str, params: Vec<(&str, Value)>) -> Self {
        let (parameters, defaults): (Vec<String>, Vec<Value>) = params
            .into_iter()
            .map(|(p, d)| (p.to_string(), d))
            .unzip();
        OperationSignature {
            name: name.to_string(),
            parameters,
            defaults,
        }
    }

    pub fn param_index(&self, param: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p == param)
    }

    /// Human-readable form, e.g. `build_house(row=None, col=None, floors=1, name="")`.
    pub fn describe(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .zip(&self.defaults)
            .map(|(p, d)| format!("{}={}", p, d))
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

/// The set of operations a script may call. Fixed once a session is built.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    signatures: BTreeMap<String, OperationSignature>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The city-building operations.
    pub fn builtin() -> Self {
        let mut catalog = Catalog::new();
        let named = |op: &str| {
            OperationSignature::new(
                op,
                vec![
                    ("row", Value::Null),
                    ("col", Value::Null),
                    ("name", Value::from("")),
                ],
            )
        };

        catalog.register(OperationSignature::new(
            "build_house",
            vec![
                ("row", Value::Null),
                ("col", Value::Null),
                ("floors", Value::from(1i64)),
                ("name", Value::from("")),
            ],
        ));
        for op in [
            "build_park",
            "build_pool",
            "build_library",
            "build_school",
            "build_hospital",
            "build_shop",
            "build_fountain",
        ] {
            catalog.register(named(op));
        }
        catalog.register(OperationSignature::new(
            "build_road",
            vec![
                ("row", Value::from(20i64)),
                ("col", Value::from(20i64)),
                ("direction", Value::from("h")),
            ],
        ));
        catalog.register(OperationSignature::new(
            "build_power_tower",
            vec![("row", Value::Null), ("col", Value::Null)],
        ));
        catalog.register(OperationSignature::new(
            "build_apartment",
            vec![
                ("row", Value::Null),
                ("col", Value::Null),
                ("floors", Value::from(4i64)),
                ("name", Value::from("")),
            ],
        ));
        catalog.register(OperationSignature::new("clear_all", vec![]));
        catalog
    }

    /// Add or replace a signature.
    pub fn register(&mut self, signature: OperationSignature) {
        self.signatures.insert(signature.name.clone(), signature);
    }

    pub fn get(&self, name: &str) -> Option<&OperationSignature> {
        self.signatures.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.signatures.contains_key(name)
    }

    /// Signatures in name order.
    pub fn iter(&self) -> impl Iterator<Item = &OperationSignature> {
        self.signatures.values()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_every_city_operation() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 12);
        for op in ["build_house", "build_road", "build_apartment", "clear_all"] {
            assert!(catalog.contains(op), "missing {}", op);
        }
    }

    #[test]
    fn defaults_align_with_parameters() {
        for sig in Catalog::builtin().iter() {
            assert_eq!(sig.parameters.len(), sig.defaults.len(), "{}", sig.name);
        }
        let road = Catalog::builtin().get("build_road").cloned().unwrap();
        assert_eq!(road.defaults[0], Value::Number(20.0));
        assert_eq!(road.param_index("direction"), Some(2));
    }

    #[test]
    fn describe_renders_defaults() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.get("build_house").unwrap().describe(),
            "build_house(row=None, col=None, floors=1, name=\"\")"
        );
        assert_eq!(catalog.get("clear_all").unwrap().describe(), "clear_all()");
    }
}
