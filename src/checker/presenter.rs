// src/checker/presenter.rs
//! Signature-key rendering.
//!
//! Keys are pure functions of declaration shape: two declarations that may
//! legally coexist must render differently, and rendering never depends on
//! visitation order. Functions key on name, type-parameter count and the
//! parameter list (declared type text plus vararg markers); classes and type
//! aliases share one classifier rendering so they collide with each other;
//! properties key on name alone (`val x` and `var x` conflict).

use crate::syntax::{FuncDecl, PropertyDecl};
use std::fmt::Write;

pub(crate) fn represent_function(func: &FuncDecl) -> String {
    let mut key = String::from("fun ");
    if func.type_params > 0 {
        let _ = write!(key, "<{}> ", func.type_params);
    }
    key.push_str(&func.name);
    key.push('(');
    for (i, param) in func.params.iter().enumerate() {
        if i > 0 {
            key.push_str(", ");
        }
        if param.is_vararg {
            key.push_str("vararg ");
        }
        key.push_str(&param.ty.0);
    }
    key.push(')');
    key
}

pub(crate) fn represent_classifier(name: &str, type_params: u32) -> String {
    if type_params > 0 {
        format!("<{}> {}", type_params, name)
    } else {
        name.to_string()
    }
}

pub(crate) fn represent_property(prop: &PropertyDecl) -> String {
    format!("val {}", prop.name)
}
