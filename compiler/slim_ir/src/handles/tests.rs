use super::*;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

#[test]
fn test_type_equality_is_by_value() {
    let a = TypeSlim::simple("Int32");
    let b = TypeSlim::simple("Int32");
    assert!(!a.ptr_eq(&b));
    assert_eq!(a, b);
    assert_ne!(a, TypeSlim::simple("Int64"));
}

#[test]
fn test_type_hash_matches_equality() {
    let mut set = HashSet::new();
    set.insert(TypeSlim::simple("Int32"));
    set.insert(TypeSlim::simple("Int32"));
    set.insert(TypeSlim::array(TypeSlim::simple("Int32")));
    set.insert(TypeSlim::array(TypeSlim::simple("Int32")));
    assert_eq!(set.len(), 2);
}

#[test]
fn test_type_display() {
    let int = TypeSlim::simple("Int32");
    let list = TypeSlim::generic(TypeSlim::simple("List"), [int.clone()]);
    let dict = TypeSlim::generic(TypeSlim::simple("Dictionary"), [int.clone(), list.clone()]);

    assert_eq!(list.to_string(), "List<Int32>");
    assert_eq!(dict.to_string(), "Dictionary<Int32, List<Int32>>");
    assert_eq!(TypeSlim::array(int.clone()).to_string(), "Int32[]");
    assert_eq!(TypeSlim::array_with_rank(int, 3).to_string(), "Int32[,,]");
    assert_eq!(TypeSlim::generic_parameter("T").to_string(), "T");
}

#[test]
fn test_element_type() {
    let int = TypeSlim::simple("Int32");
    assert_eq!(TypeSlim::array(int.clone()).element_type(), Some(&int));
    assert_eq!(int.element_type(), None);
}

#[test]
fn test_method_accessors() {
    let int = TypeSlim::simple("Int32");
    let method = MethodInfoSlim::new(
        TypeSlim::simple("Math"),
        "Max",
        [int.clone(), int.clone()],
        Some(int.clone()),
    );
    assert_eq!(method.name(), "Max");
    assert_eq!(method.parameter_types().len(), 2);
    assert_eq!(method.return_type(), Some(&int));
}

#[test]
fn test_member_info_dispatch() {
    let person = TypeSlim::simple("Person");
    let string = TypeSlim::simple("String");
    let name: MemberInfoSlim = PropertyInfoSlim::new(person.clone(), "Name", string.clone(), []).into();

    assert_eq!(name.kind(), MemberKind::Property);
    assert_eq!(name.declaring_type(), &person);
    assert_eq!(name.member_type(), Some(&string));
    assert_eq!(name.to_string(), "Person.Name");

    let ctor = MemberInfoSlim::Constructor(ConstructorInfoSlim::new(person.clone(), []));
    assert_eq!(ctor.name(), ".ctor");
    assert_eq!(ctor.member_type(), Some(&person));
}

#[test]
fn test_members_with_same_shape_are_equal() {
    let person = TypeSlim::simple("Person");
    let int = TypeSlim::simple("Int32");
    let a = FieldInfoSlim::new(person.clone(), "age", int.clone());
    let b = FieldInfoSlim::new(person, "age", int);
    assert_eq!(MemberInfoSlim::from(a), MemberInfoSlim::from(b));
}

#[test]
fn test_object_values() {
    let double = TypeSlim::simple("Double");
    let half = ObjectSlim::new(double.clone(), ObjectValue::float(0.5));
    assert_eq!(half.value().as_f64(), Some(0.5));
    assert_eq!(half, ObjectSlim::new(double.clone(), ObjectValue::float(0.5)));
    assert_ne!(half, ObjectSlim::new(TypeSlim::simple("Single"), ObjectValue::float(0.5)));

    let text = ObjectSlim::new(TypeSlim::simple("String"), ObjectValue::string("hi\n"));
    assert_eq!(text.to_string(), "\"hi\\n\"");
    assert_eq!(ObjectValue::Null.to_string(), "null");
    assert_eq!(ObjectValue::Char('x').to_string(), "'x'");
}
