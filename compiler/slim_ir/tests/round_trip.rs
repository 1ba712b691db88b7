//! Host tree -> slim -> host tree.
//!
//! A small owned expression tree stands in for a host representation. It is
//! lowered through the public factories and raised back through a
//! `SlimTransformer`; the raised tree must equal the original.

#![allow(clippy::unwrap_used, reason = "tests unwrap fixture construction")]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rustc_hash::FxHashMap;
use slim_ir::{
    BinaryExpressionSlim, BlockExpressionSlim, CatchBlockSlim, ConditionalExpressionSlim,
    ConstantExpressionSlim, ConstructorInfoSlim, DefaultExpressionSlim, ElementInitSlim,
    ExpressionSlim, ExpressionType, FieldInfoSlim, GotoExpressionSlim, GotoKind,
    IndexExpressionSlim, InvocationExpressionSlim, LabelExpressionSlim, LabelTargetSlim,
    LambdaExpressionSlim, ListInitExpressionSlim, LoopExpressionSlim, MemberAssignmentSlim,
    MemberExpressionSlim, MemberInitExpressionSlim, MemberListBindingSlim,
    MemberMemberBindingSlim, MethodCallExpressionSlim, MethodInfoSlim, NewArrayExpressionSlim,
    NewExpressionSlim, NodeKind, ObjectSlim, ObjectValue, ParameterExpressionSlim, SlimError,
    SlimTransformer, SwitchCaseSlim, SwitchExpressionSlim, TryExpressionSlim,
    TypeBinaryExpressionSlim, TypeSlim, UnaryExpressionSlim,
};

#[derive(Clone, Debug, PartialEq)]
enum Host {
    Binary(ExpressionType, Box<Host>, Box<Host>),
    Unary(ExpressionType, Box<Host>),
    Conditional(Box<Host>, Box<Host>, Box<Host>),
    Int(i64),
    Zero,
    Var(String),
    Lambda(Vec<String>, Box<Host>),
    Invoke(Box<Host>, Vec<Host>),
    Call(String, Vec<Host>),
    Point(Vec<Host>),
    Array(Vec<Host>),
    Field(Option<Box<Host>>, String),
    Block(Vec<String>, Vec<Host>),
    Goto(GotoKind, String, Option<Box<Host>>),
    Label(String, Option<Box<Host>>),
    Loop(Box<Host>, Option<String>),
    Switch(Box<Host>, Vec<(Vec<Host>, Host)>, Option<Box<Host>>),
    Try(Box<Host>, Vec<(Option<String>, Host)>, Option<Box<Host>>),
}

fn int() -> TypeSlim {
    TypeSlim::simple("Int32")
}

fn point() -> TypeSlim {
    TypeSlim::simple("Point")
}

// Lowering

/// Name-to-handle tables. Equal names share one handle, which is all the
/// raised tree can observe.
#[derive(Default)]
struct Lower {
    parameters: FxHashMap<String, Arc<ParameterExpressionSlim>>,
    labels: FxHashMap<String, Arc<LabelTargetSlim>>,
}

impl Lower {
    fn parameter(&mut self, name: &str) -> Arc<ParameterExpressionSlim> {
        Arc::clone(
            self.parameters
                .entry(name.to_owned())
                .or_insert_with(|| ParameterExpressionSlim::named(int(), name)),
        )
    }

    fn label(&mut self, name: &str) -> Arc<LabelTargetSlim> {
        Arc::clone(
            self.labels
                .entry(name.to_owned())
                .or_insert_with(|| LabelTargetSlim::named(name)),
        )
    }

    fn all(&mut self, hosts: &[Host]) -> Result<Vec<ExpressionSlim>, SlimError> {
        hosts.iter().map(|host| self.lower(host)).collect()
    }

    fn optional(&mut self, host: Option<&Host>) -> Result<Option<ExpressionSlim>, SlimError> {
        host.map(|host| self.lower(host)).transpose()
    }

    fn lower(&mut self, host: &Host) -> Result<ExpressionSlim, SlimError> {
        Ok(match host {
            Host::Binary(op, left, right) => {
                let (left, right) = (self.lower(left)?, self.lower(right)?);
                ExpressionSlim::make_binary(*op, left, right, false, None, None)?
            }
            Host::Unary(op, operand) => {
                let operand = self.lower(operand)?;
                ExpressionSlim::make_unary(*op, Some(operand), None, None)?
            }
            Host::Conditional(test, if_true, if_false) => ExpressionSlim::condition(
                self.lower(test)?,
                self.lower(if_true)?,
                self.lower(if_false)?,
            ),
            Host::Int(value) => ExpressionSlim::constant(ObjectSlim::new(int(), ObjectValue::Int(*value))),
            Host::Zero => ExpressionSlim::default_value(int()),
            Host::Var(name) => self.parameter(name).into(),
            Host::Lambda(names, body) => {
                let parameters: Vec<_> = names.iter().map(|name| self.parameter(name)).collect();
                ExpressionSlim::lambda(self.lower(body)?, parameters)
            }
            Host::Invoke(target, arguments) => {
                let target = self.lower(target)?;
                ExpressionSlim::invoke(target, self.all(arguments)?)
            }
            Host::Call(name, arguments) => {
                let method = MethodInfoSlim::new(
                    TypeSlim::simple("Program"),
                    name.as_str(),
                    std::iter::repeat_with(int).take(arguments.len()),
                    Some(int()),
                );
                ExpressionSlim::call(None, method, self.all(arguments)?)
            }
            Host::Point(arguments) => {
                let constructor = ConstructorInfoSlim::new(point(), std::iter::repeat_with(int).take(arguments.len()));
                NewExpressionSlim::new(constructor, self.all(arguments)?).into()
            }
            Host::Array(items) => NewArrayExpressionSlim::init(int(), self.all(items)?).into(),
            Host::Field(object, name) => {
                let object = self.optional(object.as_deref())?;
                ExpressionSlim::member(object, FieldInfoSlim::new(point(), name.as_str(), int()))
            }
            Host::Block(names, body) => {
                let variables: Vec<_> = names.iter().map(|name| self.parameter(name)).collect();
                ExpressionSlim::block(variables, self.all(body)?)?
            }
            Host::Goto(kind, label, value) => {
                let value = self.optional(value.as_deref())?;
                GotoExpressionSlim::new(*kind, self.label(label), value, None).into()
            }
            Host::Label(label, default_value) => {
                let default_value = self.optional(default_value.as_deref())?;
                LabelExpressionSlim::new(self.label(label), default_value).into()
            }
            Host::Loop(body, break_label) => {
                let body = self.lower(body)?;
                let break_label = break_label.as_deref().map(|name| self.label(name));
                LoopExpressionSlim::new(body, break_label, None).into()
            }
            Host::Switch(value, cases, default_body) => {
                let value = self.lower(value)?;
                let cases = cases
                    .iter()
                    .map(|(tests, body)| SwitchCaseSlim::new(self.all(tests)?, self.lower(body)?))
                    .collect::<Result<Vec<_>, _>>()?;
                let default_body = self.optional(default_body.as_deref())?;
                SwitchExpressionSlim::new(None, value, cases, default_body, None).into()
            }
            Host::Try(body, handlers, finally) => {
                let body = self.lower(body)?;
                let handlers = handlers
                    .iter()
                    .map(|(variable, body)| {
                        let variable = variable.as_deref().map(|name| self.parameter(name));
                        Ok(CatchBlockSlim::new(TypeSlim::simple("Exception"), variable, self.lower(body)?, None))
                    })
                    .collect::<Result<Vec<_>, SlimError>>()?;
                let finally = self.optional(finally.as_deref())?;
                TryExpressionSlim::new(None, body, handlers, finally, None)?.into()
            }
        })
    }
}

// Raising

struct Name(String);

impl From<Name> for Host {
    fn from(name: Name) -> Self {
        Host::Var(name.0)
    }
}

fn name_of(parameter: &ParameterExpressionSlim) -> String {
    parameter.name().unwrap_or_default().to_owned()
}

fn boxed(host: Option<Host>) -> Option<Box<Host>> {
    host.map(Box::new)
}

/// Raises slim trees into [`Host`]. Initializer kinds have no host form.
struct Raise;

impl SlimTransformer for Raise {
    type Expression = Host;
    type Lambda = Host;
    type Parameter = Name;
    type New = Host;
    type ElementInit = Host;
    type MemberBinding = Host;
    type MemberAssignment = Host;
    type MemberListBinding = Host;
    type MemberMemberBinding = Host;
    type CatchBlock = (Option<String>, Host);
    type SwitchCase = (Vec<Host>, Host);
    type LabelTarget = String;
    type Error = SlimError;

    fn make_binary(
        &mut self,
        node: &Arc<BinaryExpressionSlim>,
        left: Host,
        _: Option<Host>,
        right: Host,
    ) -> Result<Host, SlimError> {
        Ok(Host::Binary(node.node_type(), Box::new(left), Box::new(right)))
    }

    fn make_unary(&mut self, node: &Arc<UnaryExpressionSlim>, operand: Option<Host>) -> Result<Host, SlimError> {
        let operand = operand.ok_or(SlimError::MissingField {
            node: "Unary",
            field: "operand",
        })?;
        Ok(Host::Unary(node.node_type(), Box::new(operand)))
    }

    fn make_conditional(
        &mut self,
        _: &Arc<ConditionalExpressionSlim>,
        test: Host,
        if_true: Host,
        if_false: Host,
    ) -> Result<Host, SlimError> {
        Ok(Host::Conditional(Box::new(test), Box::new(if_true), Box::new(if_false)))
    }

    fn make_constant(&mut self, node: &Arc<ConstantExpressionSlim>) -> Result<Host, SlimError> {
        match node.value().value() {
            ObjectValue::Int(value) => Ok(Host::Int(*value)),
            _ => Err(SlimError::Unsupported { kind: NodeKind::Constant }),
        }
    }

    fn make_default(&mut self, _: &Arc<DefaultExpressionSlim>) -> Result<Host, SlimError> {
        Ok(Host::Zero)
    }

    fn make_parameter(&mut self, node: &Arc<ParameterExpressionSlim>) -> Result<Name, SlimError> {
        Ok(Name(name_of(node)))
    }

    fn make_lambda(&mut self, _: &Arc<LambdaExpressionSlim>, body: Host, parameters: Vec<Name>) -> Result<Host, SlimError> {
        Ok(Host::Lambda(parameters.into_iter().map(|name| name.0).collect(), Box::new(body)))
    }

    fn make_invocation(
        &mut self,
        _: &Arc<InvocationExpressionSlim>,
        expression: Host,
        arguments: Vec<Host>,
    ) -> Result<Host, SlimError> {
        Ok(Host::Invoke(Box::new(expression), arguments))
    }

    fn make_method_call(
        &mut self,
        node: &Arc<MethodCallExpressionSlim>,
        _: Option<Host>,
        arguments: Vec<Host>,
    ) -> Result<Host, SlimError> {
        Ok(Host::Call(node.method().name().to_owned(), arguments))
    }

    fn make_new(&mut self, _: &Arc<NewExpressionSlim>, arguments: Vec<Host>) -> Result<Host, SlimError> {
        Ok(Host::Point(arguments))
    }

    fn make_new_array(&mut self, _: &Arc<NewArrayExpressionSlim>, expressions: Vec<Host>) -> Result<Host, SlimError> {
        Ok(Host::Array(expressions))
    }

    fn make_index(&mut self, _: &Arc<IndexExpressionSlim>, _: Host, _: Vec<Host>) -> Result<Host, SlimError> {
        Err(SlimError::Unsupported { kind: NodeKind::Index })
    }

    fn make_member(&mut self, node: &Arc<MemberExpressionSlim>, expression: Option<Host>) -> Result<Host, SlimError> {
        Ok(Host::Field(boxed(expression), node.member().name().to_owned()))
    }

    fn make_list_init(&mut self, _: &Arc<ListInitExpressionSlim>, _: Host, _: Vec<Host>) -> Result<Host, SlimError> {
        Err(SlimError::Unsupported { kind: NodeKind::ListInit })
    }

    fn make_member_init(&mut self, _: &Arc<MemberInitExpressionSlim>, _: Host, _: Vec<Host>) -> Result<Host, SlimError> {
        Err(SlimError::Unsupported { kind: NodeKind::MemberInit })
    }

    fn make_type_binary(&mut self, _: &Arc<TypeBinaryExpressionSlim>, _: Host) -> Result<Host, SlimError> {
        Err(SlimError::Unsupported { kind: NodeKind::TypeBinary })
    }

    fn make_block(
        &mut self,
        _: &Arc<BlockExpressionSlim>,
        variables: Vec<Name>,
        expressions: Vec<Host>,
    ) -> Result<Host, SlimError> {
        Ok(Host::Block(variables.into_iter().map(|name| name.0).collect(), expressions))
    }

    fn make_goto(
        &mut self,
        node: &Arc<GotoExpressionSlim>,
        target: String,
        value: Option<Host>,
    ) -> Result<Host, SlimError> {
        Ok(Host::Goto(node.kind(), target, boxed(value)))
    }

    fn make_label(
        &mut self,
        _: &Arc<LabelExpressionSlim>,
        target: String,
        default_value: Option<Host>,
    ) -> Result<Host, SlimError> {
        Ok(Host::Label(target, boxed(default_value)))
    }

    fn make_loop(
        &mut self,
        _: &Arc<LoopExpressionSlim>,
        body: Host,
        break_label: Option<String>,
        _: Option<String>,
    ) -> Result<Host, SlimError> {
        Ok(Host::Loop(Box::new(body), break_label))
    }

    fn make_switch(
        &mut self,
        _: &Arc<SwitchExpressionSlim>,
        switch_value: Host,
        cases: Vec<(Vec<Host>, Host)>,
        default_body: Option<Host>,
    ) -> Result<Host, SlimError> {
        Ok(Host::Switch(Box::new(switch_value), cases, boxed(default_body)))
    }

    fn make_try(
        &mut self,
        _: &Arc<TryExpressionSlim>,
        body: Host,
        handlers: Vec<(Option<String>, Host)>,
        finally: Option<Host>,
        _: Option<Host>,
    ) -> Result<Host, SlimError> {
        Ok(Host::Try(Box::new(body), handlers, boxed(finally)))
    }

    fn make_catch_block(
        &mut self,
        _: &Arc<CatchBlockSlim>,
        variable: Option<Name>,
        body: Host,
        _: Option<Host>,
    ) -> Result<(Option<String>, Host), SlimError> {
        Ok((variable.map(|name| name.0), body))
    }

    fn make_switch_case(
        &mut self,
        _: &Arc<SwitchCaseSlim>,
        test_values: Vec<Host>,
        body: Host,
    ) -> Result<(Vec<Host>, Host), SlimError> {
        Ok((test_values, body))
    }

    fn make_label_target(&mut self, node: &Arc<LabelTargetSlim>) -> Result<String, SlimError> {
        Ok(node.name().unwrap_or_default().to_owned())
    }

    fn make_element_init(&mut self, _: &Arc<ElementInitSlim>, _: Vec<Host>) -> Result<Host, SlimError> {
        Err(SlimError::Unsupported { kind: NodeKind::ListInit })
    }

    fn make_member_assignment(&mut self, _: &Arc<MemberAssignmentSlim>, _: Host) -> Result<Host, SlimError> {
        Err(SlimError::Unsupported { kind: NodeKind::MemberInit })
    }

    fn make_member_list_binding(&mut self, _: &Arc<MemberListBindingSlim>, _: Vec<Host>) -> Result<Host, SlimError> {
        Err(SlimError::Unsupported { kind: NodeKind::MemberInit })
    }

    fn make_member_member_binding(
        &mut self,
        _: &Arc<MemberMemberBindingSlim>,
        _: Vec<Host>,
    ) -> Result<Host, SlimError> {
        Err(SlimError::Unsupported { kind: NodeKind::MemberInit })
    }
}

fn round_trip(host: &Host) -> Host {
    let slim = Lower::default().lower(host).unwrap();
    Raise.visit(&slim).unwrap()
}

fn var(name: &str) -> Host {
    Host::Var(name.to_owned())
}

fn b(host: Host) -> Box<Host> {
    Box::new(host)
}

#[test]
fn test_lambda_round_trip() {
    // (x, y) => Max(x + 1, y) * -x
    let host = Host::Lambda(
        vec!["x".into(), "y".into()],
        b(Host::Binary(
            ExpressionType::Multiply,
            b(Host::Call(
                "Max".into(),
                vec![Host::Binary(ExpressionType::Add, b(var("x")), b(Host::Int(1))), var("y")],
            )),
            b(Host::Unary(ExpressionType::Negate, b(var("x")))),
        )),
    );
    assert_eq!(round_trip(&host), host);
}

#[test]
fn test_statement_round_trip() {
    // { var i; loop { if (i == 10) break exit; i = i + 1 }; exit: ; try { i } catch (e) { 0 } finally { default } }
    let host = Host::Block(
        vec!["i".into()],
        vec![
            Host::Loop(
                b(Host::Conditional(
                    b(Host::Binary(ExpressionType::Equal, b(var("i")), b(Host::Int(10)))),
                    b(Host::Goto(GotoKind::Break, "exit".into(), None)),
                    b(Host::Binary(
                        ExpressionType::Assign,
                        b(var("i")),
                        b(Host::Binary(ExpressionType::Add, b(var("i")), b(Host::Int(1)))),
                    )),
                )),
                Some("exit".into()),
            ),
            Host::Label("exit".into(), None),
            Host::Switch(
                b(var("i")),
                vec![(vec![Host::Int(1), Host::Int(2)], Host::Array(vec![var("i")]))],
                Some(b(Host::Point(vec![Host::Int(0), Host::Int(0)]))),
            ),
            Host::Try(
                b(Host::Field(Some(b(var("i"))), "X".into())),
                vec![(Some("e".into()), Host::Int(0))],
                Some(b(Host::Zero)),
            ),
        ],
    );
    assert_eq!(round_trip(&host), host);
}

#[test]
fn test_initializers_have_no_host_form() {
    let init: ExpressionSlim = ListInitExpressionSlim::new(
        NewExpressionSlim::value_type(point()),
        [ElementInitSlim::new(
            MethodInfoSlim::new(point(), "Add", [int()], None),
            [ExpressionSlim::default_value(int())],
        )],
    )
    .unwrap()
    .into();
    assert_eq!(
        Raise.visit(&init),
        Err(SlimError::Unsupported { kind: NodeKind::ListInit })
    );
}

// Generated trees

fn names() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c"]).prop_map(str::to_owned)
}

fn host_tree() -> impl Strategy<Value = Host> {
    let leaf = prop_oneof![
        (-100i64..100).prop_map(Host::Int),
        Just(Host::Zero),
        names().prop_map(Host::Var),
    ];
    leaf.prop_recursive(4, 48, 4, |inner| {
        let binary_op = prop::sample::select(vec![
            ExpressionType::Add,
            ExpressionType::Subtract,
            ExpressionType::Multiply,
            ExpressionType::Equal,
            ExpressionType::AndAlso,
        ]);
        let unary_op = prop::sample::select(vec![ExpressionType::Negate, ExpressionType::Not]);
        let list = prop::collection::vec(inner.clone(), 0..4);
        let non_empty = prop::collection::vec(inner.clone(), 1..3);
        prop_oneof![
            (binary_op, inner.clone(), inner.clone()).prop_map(|(op, l, r)| Host::Binary(op, b(l), b(r))),
            (unary_op, inner.clone()).prop_map(|(op, operand)| Host::Unary(op, b(operand))),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(test, t, f)| Host::Conditional(b(test), b(t), b(f))),
            (prop::collection::vec(names(), 0..3), inner.clone()).prop_map(|(ps, body)| Host::Lambda(ps, b(body))),
            (inner.clone(), list.clone()).prop_map(|(target, args)| Host::Invoke(b(target), args)),
            list.clone().prop_map(|args| Host::Call("F".into(), args)),
            list.clone().prop_map(Host::Point),
            list.prop_map(Host::Array),
            (prop::option::of(inner.clone()), names()).prop_map(|(object, name)| Host::Field(object.map(b), name)),
            (prop::collection::vec(names(), 0..2), non_empty.clone()).prop_map(|(vs, body)| Host::Block(vs, body)),
            (inner.clone(), prop::option::of(names())).prop_map(|(body, label)| Host::Loop(b(body), label)),
            (names(), prop::option::of(inner.clone()))
                .prop_map(|(label, value)| Host::Goto(GotoKind::Return, label, value.map(b))),
            (
                inner.clone(),
                prop::collection::vec((non_empty, inner.clone()), 0..3),
                prop::option::of(inner.clone())
            )
                .prop_map(|(value, cases, default)| Host::Switch(b(value), cases, default.map(b))),
            (inner.clone(), prop::option::of(names()), inner)
                .prop_map(|(body, variable, handler)| Host::Try(b(body), vec![(variable, handler)], None)),
        ]
    })
}

proptest! {
    #[test]
    fn generated_trees_round_trip(host in host_tree()) {
        prop_assert_eq!(round_trip(&host), host);
    }
}
