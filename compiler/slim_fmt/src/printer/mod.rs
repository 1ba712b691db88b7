//! The printer: a [`SlimTransformer`] producing strings.
//!
//! Every hook receives its children already printed, so each node only
//! decides how to join them. Nested multi-line bodies are re-indented as a
//! unit when they are embedded in an outer body.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use slim_ir::{
    BinaryExpressionSlim, BlockExpressionSlim, CatchBlockSlim, ConditionalExpressionSlim,
    ConstantExpressionSlim, ConstantLayout, DefaultExpressionSlim, ElementInitSlim, ExpressionSlim,
    ExpressionType, GotoExpressionSlim, IndexExpressionSlim, InvocationExpressionSlim,
    LabelExpressionSlim, LabelTargetSlim, LambdaExpressionSlim, ListInitExpressionSlim,
    LoopExpressionSlim, MemberAssignmentSlim, MemberExpressionSlim, MemberInitExpressionSlim,
    MemberListBindingSlim, MemberMemberBindingSlim, MethodCallExpressionSlim, MethodInfoSlim,
    NewArrayExpressionSlim, NewExpressionSlim, NewLayout, ParameterExpressionSlim, SlimError,
    SlimTransformer, SwitchCaseSlim, SwitchExpressionSlim, TryExpressionSlim,
    TypeBinaryExpressionSlim, UnaryExpressionSlim,
};

use crate::FormatOptions;

/// Names handed out to unnamed parameters (`p0`, `p1`, ...) and labels
/// (`L0`, `L1`, ...), keyed by node address so every occurrence of one
/// node prints the same name.
#[derive(Default)]
struct GeneratedNames {
    names: FxHashMap<usize, usize>,
}

impl GeneratedNames {
    fn name<T>(&mut self, prefix: char, node: &Arc<T>) -> String {
        let next = self.names.len();
        let index = *self.names.entry(Arc::as_ptr(node) as usize).or_insert(next);
        format!("{prefix}{index}")
    }
}

pub(crate) struct Printer {
    options: FormatOptions,
    parameters: GeneratedNames,
    labels: GeneratedNames,
}

fn comma_separated(items: &[String]) -> String {
    items.join(", ")
}

fn static_call(method: &MethodInfoSlim, arguments: &[String]) -> String {
    format!(
        "{}.{}({})",
        method.declaring_type(),
        method.name(),
        comma_separated(arguments)
    )
}

impl Printer {
    pub(crate) fn new(options: FormatOptions) -> Self {
        Printer {
            options,
            parameters: GeneratedNames::default(),
            labels: GeneratedNames::default(),
        }
    }

    fn parameter_name(&mut self, node: &Arc<ParameterExpressionSlim>) -> String {
        match node.name() {
            Some(name) => name.to_owned(),
            None => self.parameters.name('p', node),
        }
    }

    /// `{ a; b }` on one line, or one statement per line.
    fn braced(&self, items: &[String]) -> String {
        if items.is_empty() {
            return "{ }".to_owned();
        }
        if !self.options.multiline_blocks {
            return format!("{{ {} }}", items.join("; "));
        }
        let indent = " ".repeat(self.options.indent);
        let mut out = String::from("{\n");
        for line in items.join(";\n").lines() {
            out.push_str(&indent);
            out.push_str(line);
            out.push('\n');
        }
        out.push('}');
        out
    }
}

impl SlimTransformer for Printer {
    type Expression = String;
    type Lambda = String;
    type Parameter = String;
    type New = String;
    type ElementInit = String;
    type MemberBinding = String;
    type MemberAssignment = String;
    type MemberListBinding = String;
    type MemberMemberBinding = String;
    type CatchBlock = String;
    type SwitchCase = String;
    type LabelTarget = String;
    type Error = SlimError;

    fn make_binary(
        &mut self,
        node: &Arc<BinaryExpressionSlim>,
        left: String,
        conversion: Option<String>,
        right: String,
    ) -> Result<String, SlimError> {
        if let Some(method) = node.method() {
            return Ok(static_call(method, &[left, right]));
        }
        let node_type = node.node_type();
        Ok(match (conversion, node_type.infix_symbol()) {
            (Some(conversion), _) => format!("{node_type}({left}, {right}, {conversion})"),
            (None, Some(symbol)) => format!("({left} {symbol} {right})"),
            (None, None) if node_type == ExpressionType::ArrayIndex => format!("{left}[{right}]"),
            (None, None) => format!("{node_type}({left}, {right})"),
        })
    }

    fn make_unary(&mut self, node: &Arc<UnaryExpressionSlim>, operand: Option<String>) -> Result<String, SlimError> {
        let node_type = node.node_type();
        let Some(operand) = operand else {
            return Ok(if node_type == ExpressionType::Throw {
                "throw".to_owned()
            } else {
                format!("{node_type}()")
            });
        };
        if let Some(method) = node.method() {
            return Ok(static_call(method, &[operand]));
        }
        let ty = node.ty().map(ToString::to_string).unwrap_or_default();
        Ok(match node_type {
            ExpressionType::Negate | ExpressionType::NegateChecked => format!("-{operand}"),
            ExpressionType::UnaryPlus => format!("+{operand}"),
            ExpressionType::Not => format!("!{operand}"),
            ExpressionType::OnesComplement => format!("~{operand}"),
            ExpressionType::PreIncrementAssign => format!("++{operand}"),
            ExpressionType::PreDecrementAssign => format!("--{operand}"),
            ExpressionType::PostIncrementAssign => format!("{operand}++"),
            ExpressionType::PostDecrementAssign => format!("{operand}--"),
            ExpressionType::Convert | ExpressionType::ConvertChecked => format!("({ty}){operand}"),
            ExpressionType::TypeAs => format!("({operand} as {ty})"),
            ExpressionType::Unbox => format!("unbox<{ty}>({operand})"),
            ExpressionType::ArrayLength => format!("{operand}.Length"),
            ExpressionType::Throw => format!("throw {operand}"),
            _ => format!("{node_type}({operand})"),
        })
    }

    fn make_conditional(
        &mut self,
        _: &Arc<ConditionalExpressionSlim>,
        test: String,
        if_true: String,
        if_false: String,
    ) -> Result<String, SlimError> {
        Ok(format!("({test} ? {if_true} : {if_false})"))
    }

    fn make_constant(&mut self, node: &Arc<ConstantExpressionSlim>) -> Result<String, SlimError> {
        Ok(match node.layout() {
            ConstantLayout::Plain => node.value().to_string(),
            ConstantLayout::Typed => format!("({}){}", node.ty(), node.value()),
        })
    }

    fn make_default(&mut self, node: &Arc<DefaultExpressionSlim>) -> Result<String, SlimError> {
        Ok(format!("default({})", node.ty()))
    }

    fn make_parameter(&mut self, node: &Arc<ParameterExpressionSlim>) -> Result<String, SlimError> {
        Ok(self.parameter_name(node))
    }

    fn make_lambda(
        &mut self,
        _: &Arc<LambdaExpressionSlim>,
        body: String,
        parameters: Vec<String>,
    ) -> Result<String, SlimError> {
        Ok(match parameters.as_slice() {
            [single] => format!("{single} => {body}"),
            parameters => format!("({}) => {body}", comma_separated(parameters)),
        })
    }

    fn make_invocation(
        &mut self,
        node: &Arc<InvocationExpressionSlim>,
        expression: String,
        arguments: Vec<String>,
    ) -> Result<String, SlimError> {
        let arguments = comma_separated(&arguments);
        Ok(match node.expression() {
            ExpressionSlim::Lambda(_) => format!("({expression})({arguments})"),
            _ => format!("{expression}({arguments})"),
        })
    }

    fn make_method_call(
        &mut self,
        node: &Arc<MethodCallExpressionSlim>,
        object: Option<String>,
        arguments: Vec<String>,
    ) -> Result<String, SlimError> {
        let method = node.method();
        Ok(match object {
            Some(object) => format!("{object}.{}({})", method.name(), comma_separated(&arguments)),
            None => static_call(method, &arguments),
        })
    }

    fn make_new(&mut self, node: &Arc<NewExpressionSlim>, arguments: Vec<String>) -> Result<String, SlimError> {
        let ty = node.ty();
        Ok(match (node.layout(), node.members()) {
            (NewLayout::WithMembers, Some(members)) => {
                let assigned: Vec<String> = members
                    .iter()
                    .zip(&arguments)
                    .map(|(member, argument)| format!("{} = {argument}", member.name()))
                    .collect();
                format!("new {ty}({})", comma_separated(&assigned))
            }
            _ => format!("new {ty}({})", comma_separated(&arguments)),
        })
    }

    fn make_new_array(&mut self, node: &Arc<NewArrayExpressionSlim>, expressions: Vec<String>) -> Result<String, SlimError> {
        let element = node.element_type();
        Ok(if node.node_type() == ExpressionType::NewArrayBounds {
            format!("new {element}[{}]", comma_separated(&expressions))
        } else {
            format!("new {element}[] {{ {} }}", comma_separated(&expressions))
        })
    }

    fn make_index(
        &mut self,
        _: &Arc<IndexExpressionSlim>,
        object: String,
        arguments: Vec<String>,
    ) -> Result<String, SlimError> {
        Ok(format!("{object}[{}]", comma_separated(&arguments)))
    }

    fn make_member(&mut self, node: &Arc<MemberExpressionSlim>, expression: Option<String>) -> Result<String, SlimError> {
        let member = node.member();
        Ok(match expression {
            Some(expression) => format!("{expression}.{}", member.name()),
            None => member.to_string(),
        })
    }

    fn make_list_init(
        &mut self,
        _: &Arc<ListInitExpressionSlim>,
        new_expression: String,
        initializers: Vec<String>,
    ) -> Result<String, SlimError> {
        Ok(format!("{new_expression} {{ {} }}", comma_separated(&initializers)))
    }

    fn make_member_init(
        &mut self,
        _: &Arc<MemberInitExpressionSlim>,
        new_expression: String,
        bindings: Vec<String>,
    ) -> Result<String, SlimError> {
        Ok(format!("{new_expression} {{ {} }}", comma_separated(&bindings)))
    }

    fn make_type_binary(&mut self, node: &Arc<TypeBinaryExpressionSlim>, expression: String) -> Result<String, SlimError> {
        let ty = node.type_operand();
        Ok(if node.node_type() == ExpressionType::TypeEqual {
            format!("({expression}.GetType() == typeof({ty}))")
        } else {
            format!("({expression} is {ty})")
        })
    }

    fn make_block(
        &mut self,
        node: &Arc<BlockExpressionSlim>,
        variables: Vec<String>,
        expressions: Vec<String>,
    ) -> Result<String, SlimError> {
        let mut items: Vec<String> = node
            .variables()
            .iter()
            .zip(variables)
            .map(|(declaration, name)| format!("{} {name}", declaration.ty()))
            .collect();
        items.extend(expressions);
        Ok(self.braced(&items))
    }

    fn make_goto(&mut self, node: &Arc<GotoExpressionSlim>, target: String, value: Option<String>) -> Result<String, SlimError> {
        let kind = node.kind();
        Ok(match value {
            Some(value) => format!("{kind} {target} {value}"),
            None => format!("{kind} {target}"),
        })
    }

    fn make_label(
        &mut self,
        _: &Arc<LabelExpressionSlim>,
        target: String,
        default_value: Option<String>,
    ) -> Result<String, SlimError> {
        Ok(match default_value {
            Some(value) => format!("{target}: {value}"),
            None => format!("{target}:"),
        })
    }

    fn make_loop(
        &mut self,
        _: &Arc<LoopExpressionSlim>,
        body: String,
        break_label: Option<String>,
        continue_label: Option<String>,
    ) -> Result<String, SlimError> {
        let labels: Vec<String> = [("break", break_label), ("continue", continue_label)]
            .into_iter()
            .filter_map(|(role, label)| label.map(|label| format!("{role}: {label}")))
            .collect();
        let body = self.braced(&[body]);
        Ok(if labels.is_empty() {
            format!("loop {body}")
        } else {
            format!("loop({}) {body}", comma_separated(&labels))
        })
    }

    fn make_switch(
        &mut self,
        _: &Arc<SwitchExpressionSlim>,
        switch_value: String,
        mut cases: Vec<String>,
        default_body: Option<String>,
    ) -> Result<String, SlimError> {
        if let Some(default_body) = default_body {
            cases.push(format!("default: {default_body}"));
        }
        Ok(format!("switch ({switch_value}) {}", self.braced(&cases)))
    }

    fn make_try(
        &mut self,
        _: &Arc<TryExpressionSlim>,
        body: String,
        handlers: Vec<String>,
        finally: Option<String>,
        fault: Option<String>,
    ) -> Result<String, SlimError> {
        let mut out = format!("try {}", self.braced(&[body]));
        for handler in handlers {
            out.push(' ');
            out.push_str(&handler);
        }
        if let Some(finally) = finally {
            out.push_str(" finally ");
            out.push_str(&self.braced(&[finally]));
        }
        if let Some(fault) = fault {
            out.push_str(" fault ");
            out.push_str(&self.braced(&[fault]));
        }
        Ok(out)
    }

    fn make_catch_block(
        &mut self,
        node: &Arc<CatchBlockSlim>,
        variable: Option<String>,
        body: String,
        filter: Option<String>,
    ) -> Result<String, SlimError> {
        let mut out = match variable {
            Some(variable) => format!("catch ({} {variable})", node.test()),
            None => format!("catch ({})", node.test()),
        };
        if let Some(filter) = filter {
            out.push_str(&format!(" when ({filter})"));
        }
        out.push(' ');
        out.push_str(&self.braced(&[body]));
        Ok(out)
    }

    fn make_switch_case(
        &mut self,
        _: &Arc<SwitchCaseSlim>,
        test_values: Vec<String>,
        body: String,
    ) -> Result<String, SlimError> {
        Ok(format!("case {}: {body}", comma_separated(&test_values)))
    }

    fn make_label_target(&mut self, node: &Arc<LabelTargetSlim>) -> Result<String, SlimError> {
        Ok(match node.name() {
            Some(name) => name.to_owned(),
            None => self.labels.name('L', node),
        })
    }

    fn make_element_init(&mut self, node: &Arc<ElementInitSlim>, arguments: Vec<String>) -> Result<String, SlimError> {
        Ok(format!("{}({})", node.add_method().name(), comma_separated(&arguments)))
    }

    fn make_member_assignment(&mut self, node: &Arc<MemberAssignmentSlim>, expression: String) -> Result<String, SlimError> {
        Ok(format!("{} = {expression}", node.member().name()))
    }

    fn make_member_list_binding(
        &mut self,
        node: &Arc<MemberListBindingSlim>,
        initializers: Vec<String>,
    ) -> Result<String, SlimError> {
        Ok(format!("{} = {{ {} }}", node.member().name(), comma_separated(&initializers)))
    }

    fn make_member_member_binding(
        &mut self,
        node: &Arc<MemberMemberBindingSlim>,
        bindings: Vec<String>,
    ) -> Result<String, SlimError> {
        Ok(format!("{} = {{ {} }}", node.member().name(), comma_separated(&bindings)))
    }
}
