//! Variable bindings: the resolved name/value map one apply renders against.

use indexmap::IndexMap;
use log::debug;

use crate::descriptor::Template;
use crate::value::Value;

/// Resolved variable values, in insertion order.
pub type Bindings = IndexMap<String, Value>;

/// Builds the bindings for one apply.
///
/// Layers, lowest precedence first:
/// 1. `config_defaults` from `tg.config.toml`
/// 2. the template's declared defaults
/// 3. `overrides` supplied on the command line, always as strings
///
/// Variables without a default are left unbound; referencing them in a
/// template is a render error.
pub fn build_bindings(
    template: &Template,
    config_defaults: &IndexMap<String, Value>,
    overrides: &[(String, String)],
) -> Bindings {
    let mut bindings = config_defaults.clone();

    for (name, variable) in &template.variables {
        if let Some(default) = &variable.default {
            bindings.insert(name.clone(), default.clone());
        }
    }

    for (name, value) in overrides {
        bindings.insert(name.clone(), Value::String(value.clone()));
    }

    for (name, value) in &bindings {
        debug!("Variable {name} = {value}");
    }

    bindings
}
