//! IR expression definitions

use super::{Block, Line, glue, glue_all, nest, single};

/// An IR expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A bare identifier (`arg0`, `nil`)
    Ident(String),

    /// Target text emitted verbatim (`&entity`, `result.MatchedCount > 0`)
    Raw(String),

    /// Function or method call (`options.Find()`)
    Call { func: String, args: Vec<Expr> },

    /// Chained access, joined with `.` (`r.collection.FindOne(...).Decode(&entity)`)
    Chain(Vec<Expr>),

    /// Sequence literal (`[]bson.M{...}`), always one element per line
    Slice { ty: String, elements: Vec<Expr> },

    /// Mapping literal (`bson.M{"age": arg1}`)
    Map { ty: String, entries: Vec<(Expr, Expr)> },

    /// Struct literal (`{Key: "age", Value: 1}`); an empty `ty` elides the type inside a typed sequence
    Struct { ty: String, fields: Vec<(String, Expr)> },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Expr::Raw(text.into())
    }

    /// A double-quoted string literal.
    pub fn string(value: &str) -> Self {
        Expr::Raw(serde_json::Value::String(value.to_string()).to_string())
    }

    pub fn call(func: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: func.into(),
            args,
        }
    }

    pub fn map(ty: impl Into<String>, entries: Vec<(Expr, Expr)>) -> Self {
        Expr::Map { ty: ty.into(), entries }
    }

    /// Whether the expression is a literal with its own braces.
    pub fn is_composite(&self) -> bool {
        matches!(self, Expr::Slice { .. } | Expr::Map { .. } | Expr::Struct { .. })
    }

    /// Render to lines.
    ///
    /// ## Notes
    /// - A mapping or struct literal stays on one line when every entry fits on one line and it either has a single
    ///   entry or holds no nested literal. Otherwise each entry gets its own line with a trailing comma.
    pub fn lines(&self) -> Block {
        match self {
            Expr::Ident(text) | Expr::Raw(text) => single(text.clone()),
            Expr::Call { func, args } => {
                let open = single(format!("{func}("));
                let args = glue_all(args.iter().map(Expr::lines), ", ");
                glue(glue(open, args, ""), single(")"), "")
            }
            Expr::Chain(parts) => glue_all(parts.iter().map(Expr::lines), "."),
            Expr::Slice { ty, elements } => {
                let entries = elements.iter().map(Expr::lines).collect();
                braced(ty, entries, false)
            }
            Expr::Map { ty, entries } => {
                let inline = inline_allowed(entries.iter().map(|(_, value)| value));
                let entries = entries
                    .iter()
                    .map(|(key, value)| glue(key.lines(), value.lines(), ": "))
                    .collect();
                braced(ty, entries, inline)
            }
            Expr::Struct { ty, fields } => {
                let inline = inline_allowed(fields.iter().map(|(_, value)| value));
                let entries = fields
                    .iter()
                    .map(|(name, value)| glue(single(name.clone()), value.lines(), ": "))
                    .collect();
                braced(ty, entries, inline)
            }
        }
    }
}

fn inline_allowed<'a>(values: impl ExactSizeIterator<Item = &'a Expr>) -> bool {
    let single_entry = values.len() == 1;
    let mut leaf_only = true;
    for value in values {
        if value.lines().len() > 1 {
            return false;
        }
        leaf_only &= !value.is_composite();
    }
    single_entry || leaf_only
}

/// `ty{a, b}` when `inline` and every entry is one line; otherwise one entry per line.
fn braced(ty: &str, entries: Vec<Block>, inline: bool) -> Block {
    if entries.is_empty() {
        return single(format!("{ty}{{}}"));
    }
    if inline && entries.iter().all(|entry| entry.len() == 1) {
        let body = glue_all(entries, ", ");
        return glue(glue(single(format!("{ty}{{")), body, ""), single("}"), "");
    }

    let mut out = single(format!("{ty}{{"));
    for entry in entries {
        out.extend(nest(glue(entry, single(","), ""), 1));
    }
    out.push(Line::new("}"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ir::render;

    fn show(expr: &Expr) -> String {
        render(&expr.lines(), "\t")
    }

    #[test]
    fn test_string_literal_is_escaped() {
        assert_eq!(show(&Expr::string(r#"a"b"#)), "\"a\\\"b\"\n");
    }

    #[test]
    fn test_call_with_no_args() {
        assert_eq!(show(&Expr::call("options.Find", vec![])), "options.Find()\n");
    }

    #[test]
    fn test_leaf_map_renders_inline() {
        let map = Expr::map(
            "bson.M",
            vec![
                (Expr::string("$gte"), Expr::ident("arg1")),
                (Expr::string("$lte"), Expr::ident("arg2")),
            ],
        );
        assert_eq!(show(&map), "bson.M{\"$gte\": arg1, \"$lte\": arg2}\n");
    }

    #[test]
    fn test_single_nested_entry_stays_inline() {
        let inner = Expr::map("bson.M", vec![(Expr::string("$lt"), Expr::ident("arg1"))]);
        let outer = Expr::map("bson.M", vec![(Expr::string("age"), inner)]);
        assert_eq!(show(&outer), "bson.M{\"age\": bson.M{\"$lt\": arg1}}\n");
    }

    #[test]
    fn test_slice_is_block_and_call_glues_it() {
        let slice = Expr::Slice {
            ty: "[]bson.M".into(),
            elements: vec![
                Expr::map("", vec![(Expr::string("a"), Expr::ident("arg1"))]),
                Expr::map("", vec![(Expr::string("b"), Expr::ident("arg2"))]),
            ],
        };
        let call = Expr::call("f", vec![Expr::ident("arg0"), slice]);
        assert_eq!(show(&call), "f(arg0, []bson.M{\n\t{\"a\": arg1},\n\t{\"b\": arg2},\n})\n");
    }

    #[test]
    fn test_empty_literals() {
        assert_eq!(show(&Expr::map("bson.M", vec![])), "bson.M{}\n");
        let slice = Expr::Slice {
            ty: "[]*UserModel".into(),
            elements: vec![],
        };
        assert_eq!(show(&slice), "[]*UserModel{}\n");
    }

    #[test]
    fn test_map_with_several_nested_entries_breaks() {
        let set = Expr::map("bson.M", vec![(Expr::string("city"), Expr::ident("arg2"))]);
        let inc = Expr::map("bson.M", vec![(Expr::string("age"), Expr::ident("arg1"))]);
        let update = Expr::map("bson.M", vec![(Expr::string("$set"), set), (Expr::string("$inc"), inc)]);
        assert_eq!(
            show(&update),
            "bson.M{\n\t\"$set\": bson.M{\"city\": arg2},\n\t\"$inc\": bson.M{\"age\": arg1},\n}\n"
        );
    }
}
