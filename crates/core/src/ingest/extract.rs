use std::borrow::Cow;

use serde_yaml::{Mapping, Value};

pub const ID_KEY: &str = "id";

/// A record-like mapping found in a document, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
  pub fields: Cow<'a, Mapping>,
  /// True when the whole document was taken as one record and its id was
  /// derived from the file name.
  pub synthesized_id: bool,
}

/// Depth-first, pre-order walk calling `visit` for every mapping node.
/// Values of a mapping are visited in document order; keys are not visited.
pub fn walk_mappings<'a, F>(value: &'a Value, visit: &mut F)
where
  F: FnMut(&'a Mapping),
{
  match value {
    Value::Mapping(map) => {
      visit(map);
      for (_, child) in map.iter() {
        walk_mappings(child, visit);
      }
    }
    Value::Sequence(items) => {
      for item in items {
        walk_mappings(item, visit);
      }
    }
    Value::Tagged(tagged) => walk_mappings(&tagged.value, visit),
    Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
  }
}

/// Every mapping carrying an `id` key, outer records before nested ones.
pub fn tagged_mappings<'a>(doc: &'a Value) -> Vec<&'a Mapping> {
  let mut found = Vec::new();
  walk_mappings(doc, &mut |map: &'a Mapping| {
    if map.contains_key(ID_KEY) {
      found.push(map);
    }
  });
  found
}

/// Extract record candidates from a parsed document.
///
/// Falls back to the whole document when no node carries an `id` and the
/// top level is a mapping; the fallback's id is `stem`, the source file's
/// base name.
pub fn extract<'a>(doc: &'a Value, stem: &str) -> Vec<Candidate<'a>> {
  let tagged = tagged_mappings(doc);
  if !tagged.is_empty() {
    return tagged
      .into_iter()
      .map(|map| Candidate {
        fields: Cow::Borrowed(map),
        synthesized_id: false,
      })
      .collect();
  }
  match doc {
    Value::Mapping(map) => {
      let mut fields = map.clone();
      fields.insert(Value::from(ID_KEY), Value::from(stem));
      vec![Candidate {
        fields: Cow::Owned(fields),
        synthesized_id: true,
      }]
    }
    _ => Vec::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  fn yaml(s: &str) -> Value {
    serde_yaml::from_str(s).unwrap()
  }

  fn ids(candidates: &[Candidate<'_>]) -> Vec<String> {
    candidates
      .iter()
      .map(|c| c.fields.get(ID_KEY).and_then(Value::as_str).unwrap_or("?").to_string())
      .collect()
  }

  #[test]
  fn finds_records_at_any_depth_in_preorder() {
    let doc = yaml(
      r#"
queue:
  - id: cmd_001
    subtasks:
      - id: sub_a
      - id: sub_b
  - id: cmd_002
meta:
  history:
    - note: none
    - id: old_1
"#,
    );
    let found = extract(&doc, "ignored");
    assert_eq!(ids(&found), vec!["cmd_001", "sub_a", "sub_b", "cmd_002", "old_1"]);
    assert!(found.iter().all(|c| !c.synthesized_id));
  }

  #[test]
  fn top_level_sequence_of_records() {
    let doc = yaml("- id: a\n- id: b\n- name: no id\n");
    assert_eq!(ids(&extract(&doc, "x")), vec!["a", "b"]);
  }

  #[test]
  fn top_level_record_is_emitted_before_children() {
    let doc = yaml("id: outer\nchild:\n  id: inner\n");
    assert_eq!(ids(&extract(&doc, "x")), vec!["outer", "inner"]);
  }

  #[test]
  fn falls_back_to_whole_document() {
    let doc = yaml("task:\n  task_id: subtask_1\n  status: assigned\n");
    let found = extract(&doc, "ashigaru1");
    assert_eq!(found.len(), 1);
    assert!(found[0].synthesized_id);
    assert_eq!(ids(&found), vec!["ashigaru1"]);
    assert!(found[0].fields.contains_key("task"));
  }

  #[test]
  fn fallback_does_not_fire_when_something_was_found() {
    let doc = yaml("title: board\nitems:\n  - id: only\n");
    let found = extract(&doc, "board");
    assert_eq!(ids(&found), vec!["only"]);
  }

  #[test]
  fn scalars_and_sequences_without_records_yield_nothing() {
    assert!(extract(&yaml("just text"), "a").is_empty());
    assert!(extract(&yaml("- 1\n- 2\n"), "a").is_empty());
  }

  #[test]
  fn looks_through_yaml_tags() {
    let doc = yaml("items:\n  - !custom\n    id: tagged\n");
    assert_eq!(ids(&extract(&doc, "a")), vec!["tagged"]);
  }

  fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
      Just(Value::Null),
      any::<bool>().prop_map(Value::Bool),
      any::<i32>().prop_map(|n| Value::from(n)),
      "[a-z]{0,6}".prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
      prop_oneof![
        prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Sequence),
        prop::collection::vec(
          (prop_oneof![Just("id".to_string()), "[a-z]{1,4}"], inner),
          0..5
        )
        .prop_map(|pairs| {
          let mut map = Mapping::new();
          for (k, v) in pairs {
            map.insert(Value::from(k), v);
          }
          Value::Mapping(map)
        }),
      ]
    })
  }

  proptest! {
    #[test]
    fn extraction_is_idempotent(doc in arb_value()) {
      let first = extract(&doc, "stem");
      let second = extract(&doc, "stem");
      prop_assert_eq!(first, second);
    }

    #[test]
    fn every_candidate_has_an_id(doc in arb_value()) {
      for candidate in extract(&doc, "stem") {
        prop_assert!(candidate.fields.contains_key(ID_KEY));
      }
    }

    #[test]
    fn fallback_only_when_nothing_tagged(doc in arb_value()) {
      let tagged = tagged_mappings(&doc).len();
      let found = extract(&doc, "stem");
      if tagged > 0 {
        prop_assert_eq!(found.len(), tagged);
        prop_assert!(found.iter().all(|c| !c.synthesized_id));
      } else {
        prop_assert!(found.len() <= 1);
        prop_assert_eq!(found.len() == 1, doc.is_mapping());
      }
    }
  }
}
