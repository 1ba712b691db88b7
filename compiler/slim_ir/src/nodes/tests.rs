#![allow(clippy::unwrap_used, reason = "tests unwrap fixture construction")]

use super::*;
use crate::test_helpers::{bool_const, init_test_logging, int, int_const, param, point_constructor, static_method};
use crate::{
    ArgumentProvider, FieldInfoSlim, MemberInfoSlim, MethodInfoSlim, ObjectSlim, ObjectValue,
    PropertyInfoSlim, SlimError,
};
use pretty_assertions::assert_eq;

fn point_x() -> MemberInfoSlim {
    FieldInfoSlim::new(TypeSlim::simple("Point"), "X", int()).into()
}

// Scenarios

#[test]
fn test_add_scenario() {
    init_test_logging();
    let a = param("a");
    let b = param("b");
    let sum = ExpressionSlim::add(a.clone().into(), b.clone().into());
    let ExpressionSlim::Binary(node) = &sum else {
        panic!("add should build a binary node");
    };

    assert_eq!(node.node_type(), ExpressionType::Add);
    assert_eq!(node.left().as_parameter().and_then(|p| p.name()), Some("a"));
    assert_eq!(node.right().as_parameter().and_then(|p| p.name()), Some("b"));
    assert!(node.method().is_none());
    assert!(!node.is_lifted_to_null());

    let same = node.update(node.left().clone(), None, node.right().clone());
    assert!(Arc::ptr_eq(&same, node));

    let changed = node.update(int_const(1), None, node.right().clone());
    assert!(!Arc::ptr_eq(&changed, node));
    assert!(changed.right().same(node.right()));
    assert_eq!(changed.node_type(), ExpressionType::Add);
}

#[test]
fn test_call_scenario() {
    let (x, y, z) = (int_const(1), int_const(2), int_const(3));
    let call = MethodCallExpressionSlim::new(None, static_method("Foo", 3), [x, y.clone(), z]);

    assert_eq!(call.argument_count(), 3);
    assert!(call.argument(1).unwrap().same(&y));
    assert!(Arc::ptr_eq(call.arguments(), call.arguments()));
    assert_eq!(call.argument_count(), call.arguments().len());
    assert_eq!(
        call.argument(3).err(),
        Some(SlimError::ArgumentOutOfRange { index: 3, count: 3 })
    );
}

// Layouts

#[test]
fn test_binary_layout_selection() {
    let method = MethodInfoSlim::new(TypeSlim::simple("Money"), "op_Addition", [], None);
    let conversion = LambdaExpressionSlim::new(None, int_const(0), [param("x")]);
    let build = |lifted, method: Option<MethodInfoSlim>, conversion: Option<Arc<LambdaExpressionSlim>>| {
        BinaryExpressionSlim::new(ExpressionType::Add, int_const(1), int_const(2), lifted, method, conversion)
            .unwrap()
            .layout()
    };

    assert_eq!(build(false, None, None), BinaryLayout::Simple);
    assert_eq!(build(true, None, None), BinaryLayout::Lifted);
    assert_eq!(build(false, Some(method.clone()), None), BinaryLayout::Method);
    assert_eq!(build(true, Some(method.clone()), None), BinaryLayout::LiftedMethod);
    assert_eq!(build(false, None, Some(conversion)), BinaryLayout::Full);
}

#[test]
fn test_binary_with_method_keeps_other_fields() {
    let method = MethodInfoSlim::new(TypeSlim::simple("Money"), "op_Addition", [], None);
    let node =
        BinaryExpressionSlim::new(ExpressionType::Add, int_const(1), int_const(2), false, Some(method.clone()), None)
            .unwrap();
    assert_eq!(node.layout(), BinaryLayout::Method);
    assert_eq!(node.method(), Some(&method));
    assert!(!node.is_lifted_to_null());
    assert!(node.conversion().is_none());
}

#[test]
fn test_make_binary_rejects_non_binary_type() {
    let result = ExpressionSlim::make_binary(ExpressionType::Constant, int_const(1), int_const(2), false, None, None);
    assert_eq!(
        result.err(),
        Some(SlimError::InvalidNodeType {
            node_type: ExpressionType::Constant,
            expected: NodeKind::Binary,
        })
    );
}

#[test]
fn test_unary_layouts_and_validation() {
    let plain = UnaryExpressionSlim::new(ExpressionType::Negate, Some(int_const(1)), None, None).unwrap();
    assert_eq!(plain.layout(), UnaryLayout::Simple);
    assert_eq!(plain.static_type(), Some(int()));

    let convert =
        UnaryExpressionSlim::new(ExpressionType::Convert, Some(int_const(1)), Some(TypeSlim::simple("Int64")), None)
            .unwrap();
    assert_eq!(convert.layout(), UnaryLayout::Typed);

    let rethrow = UnaryExpressionSlim::new(ExpressionType::Throw, None, None, None).unwrap();
    assert!(rethrow.operand().is_none());

    assert_eq!(
        UnaryExpressionSlim::new(ExpressionType::Not, None, None, None).err(),
        Some(SlimError::MissingField {
            node: "Unary",
            field: "operand",
        })
    );
    assert_eq!(
        UnaryExpressionSlim::new(ExpressionType::Convert, Some(int_const(1)), None, None).err(),
        Some(SlimError::MissingField {
            node: "Unary",
            field: "type",
        })
    );
    assert!(matches!(
        UnaryExpressionSlim::new(ExpressionType::Add, Some(int_const(1)), None, None),
        Err(SlimError::InvalidNodeType { .. })
    ));
}

#[test]
fn test_constant_layouts() {
    let string = TypeSlim::simple("String");
    let object = TypeSlim::simple("Object");
    let null = ObjectSlim::new(object.clone(), ObjectValue::Null);

    let plain = ConstantExpressionSlim::new(null.clone(), None);
    assert_eq!(plain.layout(), ConstantLayout::Plain);
    assert_eq!(plain.ty(), &object);

    // Equal by value, different instance: still plain.
    let same_type = ConstantExpressionSlim::new(null.clone(), Some(TypeSlim::simple("Object")));
    assert_eq!(same_type.layout(), ConstantLayout::Plain);

    let typed = ConstantExpressionSlim::new(null, Some(string.clone()));
    assert_eq!(typed.layout(), ConstantLayout::Typed);
    assert_eq!(typed.ty(), &string);
}

#[test]
fn test_new_layouts_and_validation() {
    assert_eq!(NewExpressionSlim::value_type(int()).layout(), NewLayout::ValueType);

    let ctor = NewExpressionSlim::new(point_constructor(), [int_const(1), int_const(2)]);
    assert_eq!(ctor.layout(), NewLayout::Constructor);
    assert_eq!(ctor.ty(), &TypeSlim::simple("Point"));

    let members = [point_x(), FieldInfoSlim::new(TypeSlim::simple("Point"), "Y", int()).into()];
    let with_members = NewExpressionSlim::with_members(point_constructor(), [int_const(1), int_const(2)], members)
        .unwrap();
    assert_eq!(with_members.layout(), NewLayout::WithMembers);
    assert_eq!(with_members.members().map(<[_]>::len), Some(2));

    assert!(matches!(
        NewExpressionSlim::with_members(point_constructor(), [int_const(1)], [point_x(), point_x()]),
        Err(SlimError::ConflictingFields { .. })
    ));
    assert_eq!(
        NewExpressionSlim::make(None, None, [int_const(1)], None).err(),
        Some(SlimError::MissingField {
            node: "New",
            field: "constructor",
        })
    );
    assert_eq!(
        NewExpressionSlim::make(Some(int()), None, [], None).map(|node| node.layout()),
        Ok(NewLayout::ValueType)
    );
}

#[test]
fn test_collection_validation() {
    assert_eq!(
        BlockExpressionSlim::new(None, [], []).err(),
        Some(SlimError::EmptyCollection {
            node: "Block",
            what: "expression",
        })
    );
    assert_eq!(
        SwitchCaseSlim::new([], int_const(1)).err(),
        Some(SlimError::EmptyCollection {
            node: "SwitchCase",
            what: "test value",
        })
    );
    assert_eq!(
        NewArrayExpressionSlim::new(ExpressionType::NewArrayBounds, int(), []).err(),
        Some(SlimError::EmptyCollection {
            node: "NewArrayBounds",
            what: "bound",
        })
    );
    assert!(matches!(
        ListInitExpressionSlim::new(NewExpressionSlim::value_type(int()), []),
        Err(SlimError::EmptyCollection { .. })
    ));
}

#[test]
fn test_try_validation() {
    let body = int_const(1);
    let handler = CatchBlockSlim::new(TypeSlim::simple("Exception"), None, int_const(0), None);

    assert!(matches!(
        TryExpressionSlim::new(None, body.clone(), [], None, None),
        Err(SlimError::MissingField { node: "Try", .. })
    ));
    assert!(matches!(
        TryExpressionSlim::new(None, body.clone(), [handler.clone()], None, Some(int_const(2))),
        Err(SlimError::ConflictingFields { node: "Try", .. })
    ));
    assert!(TryExpressionSlim::new(None, body.clone(), [handler], Some(int_const(2)), None).is_ok());
    assert!(TryExpressionSlim::new(None, body, [], None, Some(int_const(2))).is_ok());
}

#[test]
fn test_block_drops_redundant_type() {
    let redundant = BlockExpressionSlim::new(Some(int()), [], [int_const(1)]).unwrap();
    assert!(redundant.explicit_type().is_none());
    assert_eq!(redundant.static_type(), Some(int()));

    let object = TypeSlim::simple("Object");
    let widened = BlockExpressionSlim::new(Some(object.clone()), [], [int_const(1)]).unwrap();
    assert_eq!(widened.explicit_type(), Some(&object));
}

fn string_const(value: &str) -> ExpressionSlim {
    ExpressionSlim::constant(ObjectSlim::new(TypeSlim::simple("String"), ObjectValue::string(value)))
}

#[test]
fn test_update_rederives_block_type() {
    let x = param("x");
    let block = BlockExpressionSlim::new(None, [x.clone()], [x.clone().into()]).unwrap();
    assert_eq!(block.static_type(), Some(int()));

    let rebuilt = block.update(block.variables(), &[string_const("done")]).unwrap();
    let fresh = BlockExpressionSlim::new(None, [x], [string_const("done")]).unwrap();
    assert!(rebuilt.explicit_type().is_none());
    assert_eq!(rebuilt.static_type(), Some(TypeSlim::simple("String")));
    assert_eq!(rebuilt.static_type(), fresh.static_type());

    // A stored explicit type survives the rebuild.
    let object = TypeSlim::simple("Object");
    let widened = BlockExpressionSlim::new(Some(object.clone()), [], [int_const(1)]).unwrap();
    let rebuilt = widened.update(&[], &[string_const("done")]).unwrap();
    assert_eq!(rebuilt.explicit_type(), Some(&object));
}

#[test]
fn test_update_rederives_conditional_type() {
    let conditional = ConditionalExpressionSlim::new(bool_const(true), int_const(1), int_const(2), None);
    assert_eq!(conditional.static_type(), Some(int()));

    let rebuilt = conditional.update(conditional.test().clone(), string_const("a"), string_const("b"));
    assert!(rebuilt.explicit_type().is_none());
    assert_eq!(rebuilt.static_type(), Some(TypeSlim::simple("String")));

    let object = TypeSlim::simple("Object");
    let widened = ConditionalExpressionSlim::new(bool_const(true), int_const(1), int_const(2), Some(object.clone()));
    let rebuilt = widened.update(widened.test().clone(), string_const("a"), string_const("b"));
    assert_eq!(rebuilt.explicit_type(), Some(&object));
}

#[test]
fn test_new_array_static_type() {
    let init = NewArrayExpressionSlim::init(int(), [int_const(1)]);
    assert_eq!(init.static_type().to_string(), "Int32[]");
    let bounds =
        NewArrayExpressionSlim::new(ExpressionType::NewArrayBounds, int(), [int_const(2), int_const(3)]).unwrap();
    assert_eq!(bounds.static_type().to_string(), "Int32[,]");
}

#[test]
fn test_static_call_rewritten_with_instance_is_unreachable() {
    let call = MethodCallExpressionSlim::new(None, static_method("Foo", 0), []);
    assert!(matches!(
        call.rewrite(Some(int_const(1)), None),
        Err(SlimError::Unreachable { .. })
    ));
    // The public update may change static-ness.
    let instance = call.update(Some(int_const(1)), &[]);
    assert!(!instance.is_static());
}

// Identity short-circuit, one test per family

#[test]
fn test_update_identity_expressions() {
    let x = param("x");
    let one = int_const(1);

    let unary = UnaryExpressionSlim::new(ExpressionType::Negate, Some(one.clone()), None, None).unwrap();
    assert!(Arc::ptr_eq(&unary.update(unary.operand().cloned()).unwrap(), &unary));

    let conditional = ConditionalExpressionSlim::new(bool_const(true), one.clone(), int_const(2), None);
    assert!(Arc::ptr_eq(
        &conditional.update(
            conditional.test().clone(),
            conditional.if_true().clone(),
            conditional.if_false().clone()
        ),
        &conditional
    ));

    let lambda = LambdaExpressionSlim::new(None, x.clone().into(), [x.clone()]);
    assert!(Arc::ptr_eq(&lambda.update(lambda.body().clone(), lambda.parameters()), &lambda));
    let rebuilt = lambda.update(one.clone(), lambda.parameters());
    assert!(!Arc::ptr_eq(&rebuilt, &lambda));
    assert!(Arc::ptr_eq(&rebuilt.parameters()[0], &x));

    let invocation = InvocationExpressionSlim::new(lambda.clone().into(), [one.clone()]);
    let args = invocation.arguments().clone();
    assert!(Arc::ptr_eq(&invocation.update(invocation.expression().clone(), &args), &invocation));

    let call = MethodCallExpressionSlim::new(Some(one.clone()), static_method("Bar", 1), [one.clone()]);
    let args = call.arguments().clone();
    assert!(Arc::ptr_eq(&call.update(call.object().cloned(), &args), &call));

    let new = NewExpressionSlim::new(point_constructor(), [one.clone(), one.clone()]);
    let args = new.arguments().clone();
    assert!(Arc::ptr_eq(&new.update(&args), &new));

    let array = NewArrayExpressionSlim::init(int(), [one.clone()]);
    let items = array.arguments().clone();
    assert!(Arc::ptr_eq(&array.update(&items).unwrap(), &array));

    let indexer = PropertyInfoSlim::new(TypeSlim::simple("List"), "Item", int(), [int()]);
    let index = IndexExpressionSlim::new(x.clone().into(), Some(indexer), [one.clone()]);
    let args = index.arguments().clone();
    assert!(Arc::ptr_eq(&index.update(index.object().clone(), &args), &index));

    let member = MemberExpressionSlim::new(Some(x.clone().into()), point_x());
    assert!(Arc::ptr_eq(&member.update(member.expression().cloned()), &member));

    let type_is = TypeBinaryExpressionSlim::new(ExpressionType::TypeIs, one.clone(), int()).unwrap();
    assert!(Arc::ptr_eq(&type_is.update(type_is.expression().clone()), &type_is));
}

#[test]
fn test_update_identity_initializers() {
    let one = int_const(1);
    let add = MethodInfoSlim::new(TypeSlim::simple("List"), "Add", [int()], None);
    let element = ElementInitSlim::new(add.clone(), [one.clone()]);
    let args = element.arguments().clone();
    assert!(Arc::ptr_eq(&element.update(&args), &element));

    let new_list = NewExpressionSlim::value_type(TypeSlim::simple("List"));
    let list_init = ListInitExpressionSlim::new(new_list.clone(), [element.clone()]).unwrap();
    assert!(Arc::ptr_eq(
        &list_init
            .update(list_init.new_expression().clone(), list_init.initializers())
            .unwrap(),
        &list_init
    ));

    let assignment = MemberAssignmentSlim::new(point_x(), one.clone());
    assert!(Arc::ptr_eq(&assignment.update(assignment.expression().clone()), &assignment));
    let list_binding = MemberListBindingSlim::new(point_x(), [element]);
    assert!(Arc::ptr_eq(&list_binding.update(list_binding.initializers()), &list_binding));
    let nested = MemberMemberBindingSlim::new(point_x(), [MemberBindingSlim::from(assignment.clone())]);
    assert!(Arc::ptr_eq(&nested.update(nested.bindings()), &nested));

    let member_init = MemberInitExpressionSlim::new(
        NewExpressionSlim::value_type(TypeSlim::simple("Point")),
        [MemberBindingSlim::from(assignment), MemberBindingSlim::from(nested)],
    );
    assert!(Arc::ptr_eq(
        &member_init.update(member_init.new_expression().clone(), member_init.bindings()),
        &member_init
    ));
    assert_eq!(member_init.bindings()[0].binding_type(), BindingType::Assignment);
    assert_eq!(member_init.bindings()[1].binding_type(), BindingType::MemberBinding);
}

#[test]
fn test_update_identity_statements() {
    let v = param("v");
    let one = int_const(1);

    let block = BlockExpressionSlim::new(None, [v.clone()], [v.clone().into(), one.clone()]).unwrap();
    assert!(Arc::ptr_eq(&block.update(block.variables(), block.expressions()).unwrap(), &block));

    let exit = LabelTargetSlim::named("exit");
    let goto = GotoExpressionSlim::new(GotoKind::Break, exit.clone(), None, None);
    assert!(Arc::ptr_eq(&goto.update(goto.target().clone(), None), &goto));
    assert!(!Arc::ptr_eq(&goto.update(LabelTargetSlim::named("exit"), None), &goto));

    let label = LabelExpressionSlim::new(exit.clone(), Some(one.clone()));
    assert!(Arc::ptr_eq(&label.update(exit.clone(), label.default_value().cloned()), &label));

    let looped = LoopExpressionSlim::new(goto.clone().into(), Some(exit.clone()), None);
    assert!(Arc::ptr_eq(
        &looped.update(looped.break_label().cloned(), None, looped.body().clone()),
        &looped
    ));

    let case = SwitchCaseSlim::new([one.clone()], int_const(10)).unwrap();
    assert!(Arc::ptr_eq(&case.update(case.test_values(), case.body().clone()).unwrap(), &case));
    let switch = SwitchExpressionSlim::new(None, v.clone().into(), [case], Some(int_const(0)), None);
    assert!(Arc::ptr_eq(
        &switch.update(switch.switch_value().clone(), switch.cases(), switch.default_body().cloned()),
        &switch
    ));

    let handler = CatchBlockSlim::new(TypeSlim::simple("Exception"), Some(v.clone()), one.clone(), None);
    assert!(Arc::ptr_eq(
        &handler.update(handler.variable().cloned(), None, handler.body().clone()),
        &handler
    ));
    let tried = TryExpressionSlim::new(None, one.clone(), [handler], None, None).unwrap();
    assert!(Arc::ptr_eq(
        &tried
            .update(tried.body().clone(), tried.handlers(), None, None)
            .unwrap(),
        &tried
    ));
}

#[test]
fn test_update_keeps_unchanged_collections_shared() {
    let x = param("x");
    let block = BlockExpressionSlim::new(None, [x.clone()], [x.clone().into()]).unwrap();
    let rebuilt = block.update(block.variables(), &[int_const(1)]).unwrap();
    assert!(!Arc::ptr_eq(&rebuilt, &block));
    assert!(std::ptr::eq(rebuilt.variables(), block.variables()));
}

#[test]
fn test_expression_identity_and_kind() {
    let one = int_const(1);
    assert!(one.same(&one.clone()));
    assert!(!one.same(&int_const(1)));
    assert_eq!(one.kind(), NodeKind::Constant);
    assert_eq!(one.node_type(), ExpressionType::Constant);

    let test = ExpressionSlim::equal(one.clone(), int_const(2));
    assert_eq!(test.kind(), NodeKind::Binary);
    assert_eq!(test.static_type(), Some(TypeSlim::simple("Boolean")));
}

// Teardown

/// Wrap `inner` in one level of a kind that owns it through a different
/// kind of slot, cycling through the slot shapes.
fn wrap(level: usize, inner: ExpressionSlim) -> ExpressionSlim {
    match level % 8 {
        0 => ExpressionSlim::and_also(bool_const(true), inner),
        1 => {
            let call = MethodCallExpressionSlim::new(None, static_method("Foo", 1), [inner]);
            // Materialized copies share the inline arguments.
            let _ = call.arguments();
            call.into()
        }
        2 => ExpressionSlim::lambda(inner, [param("x")]),
        3 => ExpressionSlim::block([], [int_const(1), inner]).unwrap(),
        4 => ExpressionSlim::member(Some(inner), point_x()),
        5 => {
            let conversion = LambdaExpressionSlim::new(None, inner, [param("x")]);
            BinaryExpressionSlim::new(ExpressionType::AddAssign, param("y").into(), int_const(1), false, None, Some(conversion))
                .unwrap()
                .into()
        }
        6 => MemberInitExpressionSlim::new(
            NewExpressionSlim::value_type(TypeSlim::simple("Point")),
            [MemberBindingSlim::from(MemberAssignmentSlim::new(point_x(), inner))],
        )
        .into(),
        _ => {
            let handler = CatchBlockSlim::new(TypeSlim::simple("Exception"), None, inner, None);
            TryExpressionSlim::new(None, int_const(0), [handler], None, None)
                .unwrap()
                .into()
        }
    }
}

#[test]
fn test_drop_deep_tree_on_default_stack() {
    let mut tree = int_const(0);
    for level in 0..100_000 {
        tree = wrap(level, tree);
    }
    drop(tree);

    let mut chain = int_const(0);
    for _ in 0..100_000 {
        chain = ExpressionSlim::and_also(bool_const(false), chain);
    }
    drop(chain);
}

#[test]
fn test_drop_leaves_shared_subtrees_intact() {
    let shared = ExpressionSlim::add(int_const(1), int_const(2));
    let mut tree = shared.clone();
    for level in 0..64 {
        tree = wrap(level, tree);
    }
    drop(tree);

    let ExpressionSlim::Binary(node) = &shared else {
        panic!("add should build a binary node");
    };
    assert_eq!(Arc::strong_count(node), 1);
    assert_eq!(node.left().kind(), NodeKind::Constant);
    assert_eq!(node.right().kind(), NodeKind::Constant);

    let call = MethodCallExpressionSlim::new(None, static_method("Foo", 2), [shared.clone(), int_const(3)]);
    let arguments = Arc::clone(call.arguments());
    drop(call);
    assert_eq!(arguments.len(), 2);
    assert!(arguments[0].same(&shared));
    assert_eq!(arguments[1].kind(), NodeKind::Constant);
    assert_eq!(arguments[1].static_type(), Some(int()));
}
