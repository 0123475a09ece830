//! Emission options.
//!
//! Runtime object names and formatting switches that differ between hosting
//! environments. Every field has a default, so a partial JSON object (or none
//! at all) is a valid configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmitOptions {
    /// Expression global-methods holders attach their static methods to.
    pub global_object: String,
    /// Runtime object hosting `registerNamespace` and the generic-instance helpers.
    pub type_system: String,
    /// Start every type fragment with a `// Qualified.Name` comment.
    pub emit_type_banners: bool,
    /// Local binding that stands for the instantiated type inside a generic factory.
    pub generic_placeholder: String,
    /// Name of the method synthesized on test fixtures.
    pub test_runner_method: String,
    pub test_functions: TestFunctionNames,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            global_object: "window".to_string(),
            type_system: "Type".to_string(),
            emit_type_banners: true,
            generic_placeholder: "$type".to_string(),
            test_runner_method: "runTests".to_string(),
            test_functions: TestFunctionNames::default(),
        }
    }
}

/// Functions of the test harness a fixture's runner method calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestFunctionNames {
    pub test: String,
    pub async_test: String,
    pub begin_category: String,
}

impl Default for TestFunctionNames {
    fn default() -> Self {
        Self {
            test: "test".to_string(),
            async_test: "asyncTest".to_string(),
            begin_category: "module".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/options.rs"]
mod tests;
