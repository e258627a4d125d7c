//! Canonical EIP-712 type strings.
//!
//! Grammar: `Name(type1 name1,type2 name2)` without whitespace. Referenced
//! struct types are appended as their own blocks in ascending order of name,
//! with no separators. Maps are `BTreeMap`s so the order never depends on how
//! a caller declared them.

use {
    crate::FieldDef,
    std::collections::{BTreeMap, BTreeSet},
};

/// Name of the wrapper struct every witness is spliced into.
pub const MANDATE: &str = "Mandate";

/// Every nested mandate type must carry this prefix. Host type strings sort
/// their own referenced types (`Element`, `Lock`, ...) alphabetically in front
/// of `Mandate`, so prefixed nested types always land after the wrapper.
pub const NESTED_TYPE_PREFIX: &str = "Mandate_";

/// `type1 name1,type2 name2`
pub fn encode_fields(fields: &[FieldDef]) -> String {
    fields
        .iter()
        .map(|field| format!("{} {}", field.ty, field.name))
        .collect::<Vec<_>>()
        .join(",")
}

/// `Name(type1 name1,type2 name2)`
pub fn encode_block(name: &str, fields: &[FieldDef]) -> String {
    format!("{name}({})", encode_fields(fields))
}

/// The open witness fragment: the wrapper's fields followed by every nested
/// type block, without the final closing parenthesis. Hosts append it to
/// `Mandate(` and supply the closing `)` themselves.
pub fn witness_typestring(
    fields: &[FieldDef],
    nested_types: &BTreeMap<String, Vec<FieldDef>>,
) -> String {
    let mut witness = encode_fields(fields);
    if nested_types.is_empty() {
        return witness;
    }
    witness.push(')');
    for (name, fields) in nested_types {
        witness.push_str(&encode_block(name, fields));
    }
    witness.pop();
    witness
}

/// The closed type string of a nested type: its own block followed by every
/// struct type reachable from its fields.
///
/// The wrapper [`MANDATE`] is never part of the result, it is resolved by the
/// host that the witness gets spliced into.
pub fn encode_type(
    name: &str,
    fields: &[FieldDef],
    types: &BTreeMap<String, Vec<FieldDef>>,
) -> String {
    let mut referenced = BTreeSet::new();
    collect_references(name, fields, types, &mut referenced);

    let mut encoded = encode_block(name, fields);
    for reference in referenced {
        if let Some(fields) = types.get(reference) {
            encoded.push_str(&encode_block(reference, fields));
        }
    }
    encoded
}

fn collect_references<'a>(
    root: &str,
    fields: &'a [FieldDef],
    types: &'a BTreeMap<String, Vec<FieldDef>>,
    referenced: &mut BTreeSet<&'a str>,
) {
    for field in fields {
        let base = field.ty.strip_suffix("[]").unwrap_or(&field.ty);
        if base == MANDATE || base == root {
            continue;
        }
        let Some((name, fields)) = types.get_key_value(base) else {
            // primitive
            continue;
        };
        if referenced.insert(name.as_str()) {
            collect_references(root, fields, types, referenced);
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, maplit::btreemap};

    fn fields(members: &[(&str, &str)]) -> Vec<FieldDef> {
        members.iter().map(|(ty, name)| FieldDef::new(*name, *ty)).collect()
    }

    #[test]
    fn flat_witness_has_no_parenthesis() {
        let witness = witness_typestring(
            &fields(&[("uint256", "amount"), ("address", "recipient")]),
            &BTreeMap::new(),
        );
        assert_eq!(witness, "uint256 amount,address recipient");
    }

    #[test]
    fn nested_witness_leaves_last_block_open() {
        let nested = btreemap! {
            "Mandate_Lock".to_string() => fields(&[("uint256", "amount")]),
            "Mandate_Fill".to_string() => fields(&[("Mandate_Lock[]", "locks"), ("bytes32", "salt")]),
        };
        let witness = witness_typestring(&fields(&[("Mandate_Fill", "fill")]), &nested);
        assert_eq!(
            witness,
            "Mandate_Fill fill)Mandate_Fill(Mandate_Lock[] locks,bytes32 salt)Mandate_Lock(uint256 \
             amount",
        );
    }

    #[test]
    fn encode_type_sorts_transitive_references() {
        let types = btreemap! {
            "Mandate_C".to_string() => fields(&[("uint256", "c")]),
            "Mandate_B".to_string() => fields(&[("Mandate_C", "c"), ("Mandate", "parent")]),
            "Mandate_A".to_string() => fields(&[("Mandate_C[]", "cs"), ("Mandate_B", "b")]),
            "Mandate_Unused".to_string() => fields(&[("bool", "flag")]),
        };
        assert_eq!(
            encode_type("Mandate_A", &types["Mandate_A"], &types),
            "Mandate_A(Mandate_C[] cs,Mandate_B b)Mandate_B(Mandate_C c,Mandate parent)Mandate_C(\
             uint256 c)",
        );
        assert_eq!(
            encode_type("Mandate_B", &types["Mandate_B"], &types),
            "Mandate_B(Mandate_C c,Mandate parent)Mandate_C(uint256 c)",
        );
    }

    #[test]
    fn encode_type_tolerates_cycles() {
        let types = btreemap! {
            "Mandate_Node".to_string() => fields(&[("Mandate_Node[]", "children"), ("Mandate_Leaf", "leaf")]),
            "Mandate_Leaf".to_string() => fields(&[("Mandate_Node", "parent")]),
        };
        assert_eq!(
            encode_type("Mandate_Node", &types["Mandate_Node"], &types),
            "Mandate_Node(Mandate_Node[] children,Mandate_Leaf leaf)Mandate_Leaf(Mandate_Node parent)",
        );
    }
}
