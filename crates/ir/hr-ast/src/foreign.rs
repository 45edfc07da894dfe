//! Nodes describing foreign-interop wrappers
//!
//! A [`ForeignFunction`] wraps a typed function so that a foreign compiler
//! can export it. The interface nodes rebind the exported wrappers under
//! their original names on the calling side.

use crate::def::FunctionDef;
use serde::Serialize;
use std::sync::Arc;

/// A typed function wrapped for export
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct ForeignFunction {
    pub inner: FunctionDef,
    /// Module declaring `inner`
    pub module_name: String,
}

impl ForeignFunction {
    pub fn new(inner: FunctionDef, module_name: impl Into<String>) -> Self {
        Self {
            inner,
            module_name: module_name.into(),
        }
    }

    /// Name of the wrapped function
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Name of the generated wrapper
    pub fn wrapper_name(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.inner.name)
    }
}

/// Wrappers exported together from one module
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct ForeignModule {
    pub name: String,
    pub functions: Vec<Arc<ForeignFunction>>,
}

impl ForeignModule {
    pub fn new(name: impl Into<String>, functions: Vec<Arc<ForeignFunction>>) -> Self {
        Self {
            name: name.into(),
            functions,
        }
    }
}

/// Rebinds one exported wrapper under its original name
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct ForeignFunctionInterface {
    pub wrapper_module: String,
    pub function: Arc<ForeignFunction>,
}

impl ForeignFunctionInterface {
    pub fn new(wrapper_module: impl Into<String>, function: Arc<ForeignFunction>) -> Self {
        Self {
            wrapper_module: wrapper_module.into(),
            function,
        }
    }
}

/// Rebinds every wrapper of a module
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct ForeignModuleInterface {
    pub module: Arc<ForeignModule>,
}

impl ForeignModuleInterface {
    pub fn new(module: Arc<ForeignModule>) -> Self {
        Self { module }
    }
}
