use serde_json::Value;

/// Decides when two captured `module_rules` values are "the same rules".
///
/// Implementations map a value to a comparison key; values with equal keys
/// are equivalent.
pub trait RulesEquivalence {
    fn canonical_key(&self, rules: &Value) -> String;

    fn equivalent(&self, a: &Value, b: &Value) -> bool {
        self.canonical_key(a) == self.canonical_key(b)
    }
}

/// Compare by canonical JSON: object keys sorted at every depth, compact
/// encoding. Text rules and list-shaped rules are both covered; a string
/// never equals a list.
#[derive(Clone, Copy, Debug, Default)]
pub struct CanonicalJson;

impl RulesEquivalence for CanonicalJson {
    fn canonical_key(&self, rules: &Value) -> String {
        let mut out = String::new();
        write_canonical(rules, &mut out);
        out
    }
}

fn write_canonical(v: &Value, out: &mut String) {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (k, vv)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(k.clone()).to_string());
                out.push(':');
                write_canonical(vv, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, vv) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(vv, out);
            }
            out.push(']');
        }
        leaf => out.push_str(&leaf.to_string()),
    }
}
