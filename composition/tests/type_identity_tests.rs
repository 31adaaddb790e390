use composition::attributed::contract_info;
use composition::types::identity::{method_identity, type_identity};
use composition::types::{
    CanonicalTypeIdentity, DefaultGenericOrdering, GenericParameterOrdering, TypeIdentityProvider,
};
use composition::{CompositionError, ExportAttribute, ExportedMember, TypeRef};

fn host() -> TypeRef {
    TypeRef::named("Demo", "Host")
}

fn string() -> TypeRef {
    TypeRef::named("System", "String")
}

#[test]
fn test_identity_for_each_member_shape() {
    let provider = CanonicalTypeIdentity;
    let members = [
        (ExportedMember::part_type(host()), "Demo.Host"),
        (ExportedMember::field(host(), "Name", string()), "System.String"),
        (
            ExportedMember::property(
                host(),
                "Names",
                TypeRef::generic("System.Collections.Generic", "IEnumerable", vec![string()]),
            ),
            "System.Collections.Generic.IEnumerable(System.String)",
        ),
        (
            ExportedMember::method(host(), "Log", None, vec![string(), string()]),
            "System.Void(System.String,System.String)",
        ),
    ];

    for (member, expected) in members {
        assert_eq!(
            provider.type_identity(&member, None).unwrap(),
            expected,
            "identity of {}",
            member.display_name()
        );
    }
}

#[test]
fn test_explicit_identity_type_wins_over_member_shape() {
    let service = TypeRef::named("Demo", "IService");
    let method = ExportedMember::method(host(), "Create", Some(string()), vec![]);

    assert_eq!(
        CanonicalTypeIdentity
            .type_identity(&method, Some(&service))
            .unwrap(),
        "Demo.IService"
    );
}

#[test]
fn test_nested_generic_and_array_identity() {
    let ty = TypeRef::generic(
        "Demo",
        "Map",
        vec![
            TypeRef::parameter("TKey", 0),
            TypeRef::array_of(TypeRef::generic(
                "Demo",
                "Box",
                vec![TypeRef::parameter("TValue", 1)],
            )),
        ],
    );
    assert_eq!(type_identity(&ty), "Demo.Map({0},Demo.Box({1})[])");

    let jagged = TypeRef::array(TypeRef::array_of(string()), 3).unwrap();
    assert_eq!(type_identity(&jagged), "System.String[][,,]");
}

#[test]
fn test_array_ranks_have_distinct_identities() {
    let vector = TypeRef::array(string(), 1).unwrap();
    let matrix = TypeRef::array(string(), 2).unwrap();
    assert_eq!(type_identity(&vector), "System.String[]");
    assert_eq!(type_identity(&matrix), "System.String[,]");
    assert_eq!(
        TypeRef::array(string(), 0),
        Err(CompositionError::InvalidArrayRank(0))
    );
}

#[test]
fn test_open_identity_type_uses_generic_definition() {
    let lookup = TypeRef::generic(
        "Demo",
        "ILookup",
        vec![TypeRef::parameter("TValue", 1), TypeRef::parameter("TKey", 0)],
    );
    let field = ExportedMember::field(host(), "Reverse", lookup.clone());

    let provider = CanonicalTypeIdentity;
    assert_eq!(
        provider.type_identity(&field, Some(&lookup)).unwrap(),
        "Demo.ILookup({0},{1})"
    );
    assert_eq!(provider.type_identity(&field, None).unwrap(), "Demo.ILookup({0},{1})");
    assert_eq!(
        DefaultGenericOrdering.parameters_order(&lookup).unwrap(),
        vec![1, 0]
    );
}

#[test]
fn test_type_without_namespace() {
    assert_eq!(type_identity(&TypeRef::named("", "Local")), "Local");
    assert_eq!(method_identity(Some(&TypeRef::named("", "Local")), &[]), "Local()");
}

#[test]
fn test_contract_info_for_open_generic_field() {
    let repeater = TypeRef::generic("Demo", "Repeater", vec![TypeRef::parameter("T", 0)]);
    let member = ExportedMember::field(host(), "Items", repeater.clone());

    let info = contract_info(&member, &ExportAttribute::new(), &CanonicalTypeIdentity).unwrap();
    assert_eq!(info.contract_name, "Demo.Repeater({0})");
    assert_eq!(info.type_identity_type, Some(repeater));
}

#[test]
fn test_contract_info_method_with_contract_type() {
    let service = TypeRef::named("Demo", "IFactory");
    let member = ExportedMember::method(host(), "Create", Some(string()), vec![]);

    let info = contract_info(
        &member,
        &ExportAttribute::typed(service.clone()),
        &CanonicalTypeIdentity,
    )
    .unwrap();
    assert_eq!(info.contract_name, "Demo.IFactory");
    assert_eq!(info.type_identity_type, Some(service));
}
