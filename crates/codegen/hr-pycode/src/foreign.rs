//! Foreign-interop wrappers
//!
//! A wrapper calls the original function and is preceded by a static header
//! pragma that the foreign compiler reads to type its arguments. A single
//! array result is turned into an extra output argument, so the wrapper
//! assigns into it instead of returning it.

use crate::PrintError;
use crate::printer::PythonCodePrinter;
use hr_ast::{
    Argument, Expr, ForeignFunction, ForeignFunctionInterface, ForeignModule,
    ForeignModuleInterface, FunctionDef, Name, Parameter, Stmt, Visitor,
};

impl PythonCodePrinter {
    pub(crate) fn print_foreign_function(
        &mut self,
        function: &ForeignFunction,
    ) -> Result<String, PrintError> {
        let inner = &function.inner;
        let wrapper_name = function.wrapper_name(&self.settings.wrapper_prefix);

        let call = Expr::call(
            Name::symbol(inner.name.clone()),
            inner.argument_names().map(Expr::symbol).collect(),
        );

        let mut arguments = inner.arguments.clone();
        let body = match inner.results.as_slice() {
            [] => vec![Stmt::Expr { value: call }],
            [result] if result.is_array() => {
                arguments.push(Parameter::Plain(Argument {
                    name: result.name.clone(),
                    meta: result.meta,
                }));
                vec![Stmt::Assign {
                    lhs: Expr::Symbol(result.clone()),
                    rhs: call,
                }]
            }
            [result] => vec![
                Stmt::Assign {
                    lhs: Expr::Symbol(result.clone()),
                    rhs: call,
                },
                Stmt::Return {
                    value: Expr::Symbol(result.clone()),
                },
            ],
            results => {
                let targets = Expr::Tuple(results.iter().cloned().map(Expr::Symbol).collect());
                vec![
                    Stmt::Assign {
                        lhs: targets.clone(),
                        rhs: call,
                    },
                    Stmt::Return { value: targets },
                ]
            }
        };

        let header = self.wrapper_header(&wrapper_name, &arguments)?;
        let wrapper = FunctionDef::new(wrapper_name, arguments, body)
            .with_results(inner.results.clone());

        tracing::debug!(
            function = %inner.name,
            wrapper = %wrapper.name,
            results = inner.results.len(),
            "printing foreign wrapper"
        );

        let indent = self.indent();
        let def = self.visit_function_def(&wrapper)?;
        Ok(format!(
            "{indent}from {} import {}\n{indent}{header}\n{def}",
            function.module_name, inner.name
        ))
    }

    pub(crate) fn print_foreign_module(
        &mut self,
        module: &ForeignModule,
    ) -> Result<String, PrintError> {
        let wrappers = module
            .functions
            .iter()
            .map(|function| self.print_foreign_function(function))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(wrappers.join("\n\n"))
    }

    pub(crate) fn print_foreign_function_interface(
        &mut self,
        interface: &ForeignFunctionInterface,
    ) -> Result<String, PrintError> {
        let module = &interface.wrapper_module;
        let indent = self.indent();
        Ok(format!(
            "{indent}from {module} import {module}\n{}",
            self.rebinding(module, &interface.function)
        ))
    }

    /// One import, then one rebinding per wrapper in declaration order
    pub(crate) fn print_foreign_module_interface(
        &mut self,
        interface: &ForeignModuleInterface,
    ) -> Result<String, PrintError> {
        let module = &interface.module.name;
        let mut lines = vec![format!("{}from {module} import {module}", self.indent())];
        lines.extend(
            interface
                .module
                .functions
                .iter()
                .map(|function| self.rebinding(module, function)),
        );
        Ok(lines.join("\n"))
    }

    fn rebinding(&self, module: &str, function: &ForeignFunction) -> String {
        format!(
            "{}{} = {module}.{}",
            self.indent(),
            function.name(),
            function.wrapper_name(&self.settings.wrapper_prefix)
        )
    }

    /// `#$ header procedure static name(int,float[:])`
    fn wrapper_header(&self, name: &str, arguments: &[Parameter]) -> Result<String, PrintError> {
        let types = arguments
            .iter()
            .map(|parameter| self.argument_type(parameter.argument()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("#$ header procedure static {name}({})", types.join(",")))
    }

    fn argument_type(&self, argument: &Argument) -> Result<String, PrintError> {
        let meta = argument.meta.ok_or_else(|| PrintError::MissingTypeInfo {
            argument: argument.name.clone(),
        })?;

        let mut text = meta.dtype.to_string();
        if meta.rank > 0 {
            let dims = vec![":"; usize::from(meta.rank)].join(",");
            text.push_str(&format!("[{dims}]"));
        }
        if meta.rank > 1 {
            text.push_str(&format!("(order={})", self.settings.array_order));
        }
        Ok(text)
    }
}
